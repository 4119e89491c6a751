//! Caller-owned learning progress.
//!
//! Replaces the original app's global preference store with an explicit
//! value object the orchestrating layer passes around and persists. The
//! client and encoders never read or write it.

use crate::feature::ModelType;
use serde::{Deserialize, Serialize};

/// Tutorial and quiz progress for one learner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressStore {
    /// Model family the learner last selected for training.
    #[serde(default)]
    pub selected_model: Option<ModelType>,
    /// Whether a model has been trained for this learner's dataset.
    #[serde(default)]
    pub trained: bool,
    /// Letters the learner missed during quizzes, each recorded once.
    #[serde(default)]
    pub missed_letters: Vec<char>,
}

impl ProgressStore {
    /// Record a missed letter, keeping the list free of duplicates.
    pub fn record_miss(&mut self, letter: char) {
        if !self.missed_letters.contains(&letter) {
            self.missed_letters.push(letter);
        }
    }

    /// Drop a letter once the learner has mastered it.
    pub fn clear_miss(&mut self, letter: char) {
        self.missed_letters.retain(|&missed| missed != letter);
    }

    /// Whether any letters remain to review.
    #[must_use]
    pub fn needs_review(&self) -> bool {
        !self.missed_letters.is_empty()
    }
}
