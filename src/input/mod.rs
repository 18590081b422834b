//! Labeled URL input
//!
//! URL lists arrive as line-delimited files of either `url` or `url,label`
//! entries. Several lists (typically one phishing, one legitimate) are read
//! and concatenated before extraction.

mod reader;

pub use reader::{parse_line, read_labeled_urls, read_sources};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class label of a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Label {
    Legitimate = 0,
    Phishing = 1,
}

impl Label {
    /// Returns the integer encoding used in feature files
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legitimate),
            1 => Ok(Self::Phishing),
            other => Err(format!("label must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.as_u8()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A URL paired with its class label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledUrl {
    pub url: String,
    pub label: Label,
}

impl LabeledUrl {
    pub fn new(url: impl Into<String>, label: Label) -> Self {
        Self {
            url: url.into(),
            label,
        }
    }
}
