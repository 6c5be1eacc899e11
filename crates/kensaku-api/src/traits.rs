//! Trait definitions for anime catalog services.
//!
//! The catalog client implements [`CatalogService`], so the query adapter and
//! the page controller never depend on a concrete HTTP client.

use std::future::Future;

/// A read-only anime catalog.
pub trait CatalogService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Search for anime by free text, returning at most `limit` records.
    fn search_anime(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<AnimeRecord>, Self::Error>> + Send;

    /// Fetch one random anime.
    fn random_anime(&self) -> impl Future<Output = Result<AnimeRecord, Self::Error>> + Send;

    /// Fetch the recommendations attached to an anime.
    fn anime_recommendations(
        &self,
        anime_id: u64,
    ) -> impl Future<Output = Result<Vec<RecommendationEntry>, Self::Error>> + Send;
}

/// One catalog entry, kept exactly as the service returned it.
///
/// Optional fields stay `None` (or zero/empty) here; display fallbacks are
/// applied by the renderers.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimeRecord {
    pub id: u64,
    pub title: String,
    pub kind: Option<String>,
    pub episodes: Option<u32>,
    pub score: Option<f64>,
    pub image_url: String,
    pub url: String,
}

/// A recommended title plus where the recommendation came from.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecommendationEntry {
    pub entry: AnimeRecord,
    pub url: Option<String>,
    pub votes: Option<u32>,
}
