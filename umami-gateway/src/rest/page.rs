//! List response envelope.

use serde::Deserialize;

/// A list response from the API.
///
/// Endpoints return either a paginated envelope (`{count, results}`) or a
/// bare array depending on the view's pagination class; both decode into
/// `Page`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Page<T> {
    /// Paginated envelope.
    Paginated {
        /// Total number of items across all pages.
        count: i64,
        /// Items on this page.
        results: Vec<T>,
    },
    /// Bare array response.
    Plain(Vec<T>),
}

impl<T> Page<T> {
    /// Consumes the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paginated { results, .. } => results,
            Self::Plain(items) => items,
        }
    }

    /// Returns the number of items in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Paginated { results, .. } => results.len(),
            Self::Plain(items) => items.len(),
        }
    }

    /// Returns true if this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
