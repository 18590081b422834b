use crate::content::ContentFeatures;
use crate::input::Label;
use crate::lexical::LexicalFeatures;
use serde::{Deserialize, Serialize};

/// One row of the training dataset
///
/// Serializes as a single flat object: the lexical keys, the content keys and
/// `label`, side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(flatten)]
    pub lexical: LexicalFeatures,

    #[serde(flatten)]
    pub content: ContentFeatures,

    pub label: Label,
}

impl FeatureRecord {
    pub fn new(lexical: LexicalFeatures, content: ContentFeatures, label: Label) -> Self {
        Self {
            lexical,
            content,
            label,
        }
    }
}
