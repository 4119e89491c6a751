#![cfg(feature = "cli")]
//! Unit tests for `MashqArgs` argument parsing and layered loading.

use mashq::cli::MashqArgs;
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::NamedTempFile;

#[fixture]
fn temp_toml_file() -> NamedTempFile {
    NamedTempFile::new().unwrap_or_else(|e| panic!("create temp file: {e}"))
}

fn write_toml_content(file: &mut NamedTempFile, content: &str) {
    writeln!(file, "{content}").unwrap_or_else(|e| panic!("write config: {e}"));
}

fn get_config_path(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap_or_else(|| panic!("path str"))
}

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

struct EnvVarGuard {
    key: String,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    fn new(key: &str, val: &str) -> Self {
        let lock = ENV_LOCK
            .lock()
            .unwrap_or_else(|e| panic!("env lock poisoned: {e}"));
        // Safety: process-wide env mutation is synchronised by ENV_LOCK.
        unsafe { env::set_var(key, val) };
        Self {
            key: key.to_owned(),
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // Safety: process-wide env mutation is synchronised by ENV_LOCK.
        unsafe { env::remove_var(&self.key) };
    }
}

#[rstest]
fn defaults_apply_without_flags() {
    let args = MashqArgs::load_from_iter(["mashq"])
        .unwrap_or_else(|e| panic!("load default args: {e}"));
    assert_eq!(args.server_url, "http://127.0.0.1:8000");
    assert_eq!(args.dsid, 1);
    assert!(!args.dry_run);
}

#[rstest]
fn flags_override_defaults() {
    let args = MashqArgs::load_from_iter([
        "mashq",
        "--server-url",
        "http://10.0.0.9:8000",
        "--dsid",
        "4",
    ])
    .unwrap_or_else(|e| panic!("load args: {e}"));
    assert_eq!(args.server_url, "http://10.0.0.9:8000");
    assert_eq!(args.dsid, 4);
}

#[rstest]
fn config_file_supplies_values(mut temp_toml_file: NamedTempFile) {
    write_toml_content(&mut temp_toml_file, "dsid = 9\ndry_run = true");
    let args = MashqArgs::load_from_config(get_config_path(&temp_toml_file))
        .unwrap_or_else(|e| panic!("load from config: {e}"));
    assert_eq!(args.dsid, 9);
    assert!(args.dry_run);
}

#[rstest]
#[serial]
fn environment_supplies_values() {
    let _guard = EnvVarGuard::new("MASHQ_DSID", "12");
    let args = MashqArgs::load_from_env().unwrap_or_else(|e| panic!("load from env: {e}"));
    assert_eq!(args.dsid, 12);
}

#[rstest]
#[serial]
fn environment_overrides_config_file(mut temp_toml_file: NamedTempFile) {
    write_toml_content(&mut temp_toml_file, "dsid = 9");
    let _guard = EnvVarGuard::new("MASHQ_DSID", "3");
    let args = MashqArgs::load_from_env_and_config(get_config_path(&temp_toml_file))
        .unwrap_or_else(|e| panic!("load layered config: {e}"));
    assert_eq!(args.dsid, 3);
}
