use serde::Deserialize;

use crate::traits::{AnimeRecord, RecommendationEntry};

// ── Response envelopes ──────────────────────────────────────────

/// Every Jikan v4 payload is wrapped as `{ "data": T }`.
#[derive(Debug, Deserialize)]
pub struct JikanResponse<T> {
    pub data: T,
}

// ── Anime ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub anime_type: Option<String>,
    pub episodes: Option<u32>,
    pub score: Option<f64>,
    pub images: Option<JikanImages>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
}

// ── Recommendations ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JikanRecommendation {
    pub entry: JikanAnime,
    pub url: Option<String>,
    pub votes: Option<u32>,
}

// ── Conversions to shared trait types ───────────────────────────

impl JikanAnime {
    pub fn into_record(self) -> AnimeRecord {
        let image_url = self
            .images
            .and_then(|i| i.jpg)
            .and_then(|jpg| jpg.image_url)
            .unwrap_or_default();
        AnimeRecord {
            id: self.mal_id,
            title: self.title,
            kind: self.anime_type,
            episodes: self.episodes,
            score: self.score,
            image_url,
            url: self.url.unwrap_or_default(),
        }
    }
}

impl JikanRecommendation {
    pub fn into_entry(self) -> RecommendationEntry {
        RecommendationEntry {
            entry: self.entry.into_record(),
            url: self.url,
            votes: self.votes,
        }
    }
}
