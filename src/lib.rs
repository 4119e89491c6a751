//! Client and feature-encoding core for the Arabic handwriting tutor.
//!
//! A captured drawing flows through one of the [`encoder`] strategies into a
//! [`FeatureVector`], which the [`MlaasClient`] uploads to the remote
//! training service or submits for classification. The client owns all
//! remote interaction: endpoint composition, timeout classes, and the
//! [`ClientError`] taxonomy. Rendering, touch capture, and the training
//! server itself live elsewhere.

pub mod alphabet;
#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod config;
pub mod encoder;
pub mod error;
pub mod feature;
pub mod progress;

#[cfg(feature = "cli")]
pub use cli::MashqArgs;
pub use client::{MlaasClient, UploadReport};
pub use config::{ApiFlavour, ClientConfig};
pub use encoder::{
    EncodeError, GrayImage, ImageEncoder, MIN_STROKE_POINTS, MismatchPolicy, PixelScale, Point,
    Screen, StrokeEncoder, StrokeMode,
};
pub use error::ClientError;
pub use feature::{Dsid, FeatureVector, LabeledSample, ModelType, PredictionResult};
pub use progress::ProgressStore;
