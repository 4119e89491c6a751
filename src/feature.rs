//! Core data model: feature vectors, labelled samples, and the types that
//! cross the wire to the training service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dataset and model namespace identifier on the server.
///
/// Caller-supplied; the client forwards it without interpretation.
pub type Dsid = u32;

/// An ordered, fixed-length sequence of feature values.
///
/// The configured dimension (canonically 1024 = 32×32) is enforced at the
/// network boundary rather than here: encoders legitimately produce other
/// lengths (flattened stroke paths are `2 × point count`, the sentinel
/// vector is empty). A vector is never silently padded or truncated.
///
/// # Examples
///
/// ```
/// use mashq::FeatureVector;
///
/// let v = FeatureVector::new(vec![0.0; 1024]);
/// assert!(v.matches_dimension(1024));
/// assert!(!v.matches_dimension(32));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Wrap raw feature values.
    #[must_use]
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// The zero-length sentinel returned by lenient encoders on bad input.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Whether the vector is valid model input for `dimension`.
    #[must_use]
    pub fn matches_dimension(&self, dimension: usize) -> bool {
        self.0.len() == dimension
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// A feature vector paired with its ground-truth letter.
///
/// Built by the feature pipeline once a drawing is finalised; immutable
/// afterwards. The session owns it until upload, then may discard it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub feature: FeatureVector,
    pub label: String,
}

impl LabeledSample {
    #[must_use]
    pub fn new(feature: FeatureVector, label: impl Into<String>) -> Self {
        Self {
            feature,
            label: label.into(),
        }
    }
}

/// Model family tag forwarded opaquely to the server.
///
/// The client never interprets the value; it only controls which model the
/// server trains or queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "KNN")]
    Knn,
    #[serde(rename = "XGBoost")]
    XgBoost,
    #[serde(rename = "sklearn-default")]
    SklearnDefault,
}

impl ModelType {
    /// The wire string the server expects.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Knn => "KNN",
            Self::XgBoost => "XGBoost",
            Self::SklearnDefault => "sklearn-default",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful classification outcome. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: String,
}
