use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Host-supplied data stored next to a pattern.
///
/// Scoring only looks at `category` (filtering) and `valence` (emotional
/// modulation). Everything else rides along untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_preview: Option<String>,
    /// Emotional valence in [-1, 1] (sad to happy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valence: Option<f32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ItemMetadata {
    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn valence(mut self, valence: f32) -> Self {
        self.valence = Some(valence);
        self
    }

    pub fn preview(mut self, text: impl Into<String>) -> Self {
        self.text_preview = Some(text.into());
        self
    }
}

/// Allow-list of categories. Items without a category never pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    allowed: BTreeSet<String>,
}

impl CategoryFilter {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, metadata: &ItemMetadata) -> bool {
        metadata
            .category
            .as_ref()
            .is_some_and(|c| self.allowed.contains(c))
    }
}
