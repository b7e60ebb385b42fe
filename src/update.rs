//! Update records and the collections built from them
//!
//! An updates collection maps an update id to its record. Collections keep
//! insertion order, and every transformation in this crate reports records in
//! that order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Opaque identifier of an update (the key of an [`Updates`] collection)
pub type UpdateId = String;

/// All known updates, keyed by id, in document order
pub type Updates = IndexMap<UpdateId, UpdateRecord>;

/// One extracted `(id, record)` pair
pub type CategoryMatch = (UpdateId, UpdateRecord);

/// Category name mapped to the updates extracted for it
pub type CategorizedUpdates = IndexMap<String, Vec<CategoryMatch>>;

/// A single update, patch or advisory
///
/// Only `title` and `categories` are interpreted. Any other field is kept in
/// `extra` so that templates can still reach it after extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Human readable title; absent titles render as a placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Category tags in source order; absent means no categories
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl UpdateRecord {
    /// Create a record with a title and no categories
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Create a record without a title
    pub fn untitled() -> Self {
        Self::default()
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// True when `needle` (already lowercased) is a substring of any
    /// lowercased category. Stops at the first matching category.
    pub fn matches_category(&self, needle: &str) -> bool {
        self.categories
            .iter()
            .any(|category| category.to_lowercase().contains(needle))
    }
}
