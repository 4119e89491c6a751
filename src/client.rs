//! Session-oriented client for the remote handwriting ML service.
//!
//! `MlaasClient` is the single source of truth for remote interaction:
//! dataset preparation, labelled-sample upload, training, prediction, and
//! model comparison. It performs exactly one network attempt per call and
//! never retries; sequencing (prepare/upload → train → predict) is the
//! caller's responsibility. Two HTTP clients with independent timeout
//! classes are built once at construction and never reconfigured in place.

use crate::alphabet;
use crate::config::{ApiFlavour, ClientConfig};
use crate::error::ClientError;
use crate::feature::{Dsid, FeatureVector, LabeledSample, ModelType, PredictionResult};
use reqwest::{Client, Response, StatusCode, multipart};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Outcome of a batch upload after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReport {
    /// Samples that passed validation and were sent.
    pub uploaded: usize,
    /// Samples discarded before sending.
    pub discarded: usize,
}

#[derive(Serialize)]
struct PrepareDatasetBody<'a> {
    dsid: Dsid,
    data_path: &'a str,
}

#[derive(Serialize)]
struct LabeledDataBody<'a> {
    feature: &'a FeatureVector,
    label: &'a str,
    dsid: Dsid,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<f32>,
}

#[derive(Serialize)]
struct TutorialDataBody<'a> {
    dsid: Dsid,
    tutorial_data: Vec<&'a LabeledSample>,
}

#[derive(Serialize)]
struct PredictBody<'a> {
    dsid: Dsid,
    feature: &'a FeatureVector,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_type: Option<ModelType>,
}

#[derive(Deserialize)]
struct PredictResponse {
    prediction: PredictedValue,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PredictedValue {
    Index(i64),
    Label(String),
}

#[derive(Deserialize)]
struct CompareResponse {
    comparison_results: HashMap<String, f64>,
}

/// Stateful HTTP client wrapping the training service's API.
///
/// # Examples
///
/// ```no_run
/// use mashq::{ClientConfig, FeatureVector, MlaasClient};
///
/// # async fn run() -> Result<(), mashq::ClientError> {
/// let client = MlaasClient::new(&ClientConfig::for_host("192.168.1.92"))?;
/// let result = client
///     .predict(1, &FeatureVector::new(vec![0.0; 1024]), None)
///     .await?;
/// println!("predicted {}", result.label);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MlaasClient {
    base: Url,
    /// Bounds prepare, upload, predict, and compare calls.
    short_ops: Client,
    /// Bounds training calls, which can legitimately run for minutes.
    long_ops: Client,
    dimension: usize,
    flavour: ApiFlavour,
}

impl MlaasClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the configured base URL does
    /// not parse, or [`ClientError::Transport`] if an HTTP client cannot
    /// be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url).map_err(|source| ClientError::InvalidUrl {
            base: config.base_url.clone(),
            source,
        })?;
        let short_ops = Client::builder()
            .timeout(config.short_timeout())
            .build()
            .map_err(ClientError::Transport)?;
        let long_ops = Client::builder()
            .timeout(config.long_timeout())
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self {
            base,
            short_ops,
            long_ops,
            dimension: config.dimension,
            flavour: config.flavour,
        })
    }

    /// The feature dimension this session enforces on uploads and
    /// predictions.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(|source| ClientError::InvalidUrl {
            base: self.base.as_str().to_owned(),
            source,
        })
    }

    /// Ask the server to (re)index the dataset at `data_path`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty path, `Transport` on connection
    /// failure, `Server` on any non-200 response.
    pub async fn prepare_dataset(&self, dsid: Dsid, data_path: &str) -> Result<(), ClientError> {
        if data_path.trim().is_empty() {
            return Err(ClientError::invalid_input("data_path must not be empty"));
        }
        let url = self.endpoint("/prepare_dataset/")?;
        tracing::debug!(%url, dsid, "preparing dataset");
        let response = self
            .short_ops
            .post(url)
            .json(&PrepareDatasetBody { dsid, data_path })
            .send()
            .await
            .map_err(ClientError::Transport)?;
        expect_ok(response)
    }

    /// Upload a single labelled sample, optionally weighted.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the feature length does not match the configured
    /// dimension or the label is empty; `Transport` and `Server` as for
    /// every call.
    pub async fn upload_sample(
        &self,
        sample: &LabeledSample,
        dsid: Dsid,
        weight: Option<f32>,
    ) -> Result<(), ClientError> {
        validate_sample(sample, self.dimension).map_err(ClientError::invalid_input)?;
        let url = self.endpoint("/labeled_data/")?;
        tracing::debug!(%url, dsid, label = %sample.label, "uploading sample");
        let response = self
            .short_ops
            .post(url)
            .json(&LabeledDataBody {
                feature: &sample.feature,
                label: &sample.label,
                dsid,
                weight,
            })
            .send()
            .await
            .map_err(ClientError::Transport)?;
        expect_ok(response)
    }

    /// Upload a batch of labelled samples as tutorial data.
    ///
    /// Every sample is validated before anything is sent. Invalid samples
    /// are discarded, counted in the returned report, and logged; if none
    /// are valid the call fails without touching the network.
    ///
    /// # Errors
    ///
    /// `NoValidData` if zero samples survive validation; `Transport` and
    /// `Server` as for every call.
    pub async fn upload_samples(
        &self,
        samples: &[LabeledSample],
        dsid: Dsid,
    ) -> Result<UploadReport, ClientError> {
        let valid: Vec<&LabeledSample> = samples
            .iter()
            .filter(|sample| validate_sample(sample, self.dimension).is_ok())
            .collect();
        let discarded = samples.len() - valid.len();
        if valid.is_empty() {
            return Err(ClientError::NoValidData);
        }
        if discarded > 0 {
            tracing::warn!(
                discarded,
                uploaded = valid.len(),
                "discarding samples that failed validation"
            );
        }
        let uploaded = valid.len();
        let url = self.endpoint("/prepare_user_data/")?;
        tracing::debug!(%url, dsid, uploaded, "uploading tutorial data");
        let response = self
            .short_ops
            .post(url)
            .json(&TutorialDataBody {
                dsid,
                tutorial_data: valid,
            })
            .send()
            .await
            .map_err(ClientError::Transport)?;
        expect_ok(response)?;
        Ok(UploadReport {
            uploaded,
            discarded,
        })
    }

    /// Upload one encoded PNG for server-side reprocessing.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for empty bytes or a blank filename; `Transport` and
    /// `Server` as for every call.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        dsid: Dsid,
    ) -> Result<(), ClientError> {
        if bytes.is_empty() {
            return Err(ClientError::invalid_input("image payload must not be empty"));
        }
        if filename.trim().is_empty() {
            return Err(ClientError::invalid_input("filename must not be empty"));
        }
        let url = self.endpoint("/upload_png/")?;
        tracing::debug!(%url, dsid, filename, "uploading image");
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str("image/png")
            .map_err(ClientError::Transport)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("dsid", dsid.to_string());
        let response = self
            .short_ops
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        expect_ok(response)
    }

    /// Trigger server-side training. Uses the long timeout class.
    ///
    /// # Errors
    ///
    /// `Transport` and `Server` as for every call.
    pub async fn train_model(
        &self,
        dsid: Dsid,
        model_type: Option<ModelType>,
    ) -> Result<(), ClientError> {
        let url = match self.flavour {
            ApiFlavour::Sklearn => {
                let mut url = self.endpoint(&format!("/train_model_sklearn/{dsid}"))?;
                if let Some(model) = model_type {
                    url.query_pairs_mut()
                        .append_pair("model_type", model.as_str());
                }
                url
            }
            ApiFlavour::Plain => self.endpoint(&format!("/train_model/{dsid}"))?,
        };
        tracing::debug!(%url, dsid, "training model");
        let response = self
            .long_ops
            .get(url)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        expect_ok(response)
    }

    /// Classify one feature vector.
    ///
    /// # Errors
    ///
    /// `InvalidInput` (before any network call) if the feature length does
    /// not match the configured dimension; `UnmappablePrediction` if the
    /// server's answer is outside the alphabet; `Transport` and `Server`
    /// as for every call.
    pub async fn predict(
        &self,
        dsid: Dsid,
        feature: &FeatureVector,
        model_type: Option<ModelType>,
    ) -> Result<PredictionResult, ClientError> {
        if !feature.matches_dimension(self.dimension) {
            return Err(ClientError::invalid_input(format!(
                "feature vector has length {} but the configured dimension is {}",
                feature.len(),
                self.dimension
            )));
        }
        let path = match self.flavour {
            ApiFlavour::Sklearn => "/predict_sklearn/",
            ApiFlavour::Plain => "/predict/",
        };
        let url = self.endpoint(path)?;
        tracing::debug!(%url, dsid, "requesting prediction");
        let response = self
            .short_ops
            .post(url)
            .json(&PredictBody {
                dsid,
                feature,
                model_type,
            })
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let response = ok_response(response)?;
        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|_| ClientError::malformed("prediction response"))?;
        resolve_prediction(parsed.prediction)
    }

    /// Fetch per-model accuracy scores in `[0, 1]`, keyed by the model
    /// names the server reports, preserved verbatim.
    ///
    /// # Errors
    ///
    /// `Transport` and `Server` as for every call.
    pub async fn compare_models(&self, dsid: Dsid) -> Result<HashMap<String, f64>, ClientError> {
        let url = self.endpoint(&format!("/compare_models/{dsid}"))?;
        tracing::debug!(%url, dsid, "comparing models");
        let response = self
            .short_ops
            .get(url)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let response = ok_response(response)?;
        let parsed: CompareResponse = response
            .json()
            .await
            .map_err(|_| ClientError::malformed("comparison response"))?;
        Ok(parsed.comparison_results)
    }
}

fn validate_sample(sample: &LabeledSample, dimension: usize) -> Result<(), String> {
    if !sample.feature.matches_dimension(dimension) {
        return Err(format!(
            "feature vector has length {} but the configured dimension is {dimension}",
            sample.feature.len()
        ));
    }
    if sample.label.trim().is_empty() {
        return Err("label must not be empty".into());
    }
    Ok(())
}

fn ok_response(response: Response) -> Result<Response, ClientError> {
    if response.status() == StatusCode::OK {
        Ok(response)
    } else {
        Err(ClientError::status(response.status()))
    }
}

fn expect_ok(response: Response) -> Result<(), ClientError> {
    ok_response(response).map(|_| ())
}

/// Map the server's prediction payload to a letter. The server may answer
/// with a class index, a decimal string, or the letter itself.
fn resolve_prediction(value: PredictedValue) -> Result<PredictionResult, ClientError> {
    match value {
        PredictedValue::Index(index) => map_index(index),
        PredictedValue::Label(raw) => {
            if let Ok(index) = raw.parse::<i64>() {
                map_index(index)
            } else if alphabet::contains(&raw) {
                Ok(PredictionResult { label: raw })
            } else {
                Err(ClientError::UnmappablePrediction { raw })
            }
        }
    }
}

fn map_index(index: i64) -> Result<PredictionResult, ClientError> {
    usize::try_from(index)
        .ok()
        .and_then(alphabet::letter_at)
        .map(|letter| PredictionResult {
            label: letter.to_string(),
        })
        .ok_or(ClientError::UnmappablePrediction {
            raw: index.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "ا")]
    #[case(3, "ث")]
    #[case(27, "ي")]
    fn indices_map_through_the_alphabet(#[case] index: i64, #[case] expected: &str) {
        let result = map_index(index).unwrap_or_else(|e| panic!("map index: {e}"));
        assert_eq!(result.label, expected);
    }

    #[rstest]
    #[case(-1)]
    #[case(28)]
    fn out_of_range_indices_are_unmappable(#[case] index: i64) {
        assert!(matches!(
            map_index(index),
            Err(ClientError::UnmappablePrediction { .. })
        ));
    }

    #[rstest]
    fn string_predictions_resolve_letters_and_indices() {
        let result = resolve_prediction(PredictedValue::Label("ب".into()))
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(result.label, "ب");
        let result = resolve_prediction(PredictedValue::Label("7".into()))
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(result.label, "د");
        assert!(matches!(
            resolve_prediction(PredictedValue::Label("Q".into())),
            Err(ClientError::UnmappablePrediction { .. })
        ));
    }

    #[rstest]
    fn sample_validation_checks_length_and_label() {
        let good = LabeledSample::new(FeatureVector::new(vec![0.0; 4]), "ب");
        assert!(validate_sample(&good, 4).is_ok());
        let short = LabeledSample::new(FeatureVector::new(vec![0.0; 3]), "ب");
        assert!(validate_sample(&short, 4).is_err());
        let unlabeled = LabeledSample::new(FeatureVector::new(vec![0.0; 4]), "  ");
        assert!(validate_sample(&unlabeled, 4).is_err());
    }
}
