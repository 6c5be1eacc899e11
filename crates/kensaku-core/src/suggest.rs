//! Live title suggestions.
//!
//! The catalog's search ranks by relevance and may return loose matches, so
//! suggestions are narrowed locally to titles that contain the typed text.

use crate::models::{AnimeRecord, SuggestionItem};

/// Default minimum input length (in characters) before suggesting.
pub const MIN_SUGGEST_CHARS: usize = 2;

/// Trim and lowercase raw input text.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether a normalized query is long enough to issue a suggestion search.
pub fn should_suggest(normalized: &str, min_chars: usize) -> bool {
    normalized.chars().count() >= min_chars
}

/// Keep records whose lowercased title contains `normalized`, in catalog order.
pub fn filter_suggestions(records: &[AnimeRecord], normalized: &str) -> Vec<SuggestionItem> {
    records
        .iter()
        .filter(|r| r.title.to_lowercase().contains(normalized))
        .map(SuggestionItem::from)
        .collect()
}
