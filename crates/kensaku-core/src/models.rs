use serde::{Deserialize, Serialize};

pub use kensaku_api::traits::{AnimeRecord, RecommendationEntry};

/// Title-only projection of an [`AnimeRecord`] shown in the live dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub id: u64,
    pub title: String,
}

impl From<&AnimeRecord> for SuggestionItem {
    fn from(record: &AnimeRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
        }
    }
}
