use mashq::cli::MashqArgs;
use mashq::{ClientConfig, MlaasClient};
use ortho_config::OrthoConfig;

/// Format an accuracy score in `[0, 1]` for display.
#[expect(clippy::float_arithmetic, reason = "percentage scaling for display")]
fn percentage(accuracy: f64) -> String {
    format!("{:.1}%", accuracy * 100.0)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = MashqArgs::load()?;
    if args.dry_run {
        return Ok(());
    }
    let config = ClientConfig::for_base_url(args.server_url).validate()?;
    let client = MlaasClient::new(&config)?;
    let results = client.compare_models(args.dsid).await?;
    let mut rows: Vec<(String, f64)> = results.into_iter().collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, accuracy) in rows {
        println!("{name}: {}", percentage(accuracy));
    }
    Ok(())
}
