//! Never-fail wrapper over a [`CatalogService`].
//!
//! Every remote error is logged and replaced by an empty sequence, so callers
//! have a single rendering path: an empty list renders as "no results".

use kensaku_api::traits::CatalogService;

use crate::models::{AnimeRecord, RecommendationEntry};

/// Page size used for text searches.
pub const SEARCH_LIMIT: u32 = 8;

pub struct QueryAdapter<S> {
    service: S,
    search_limit: u32,
}

impl<S: CatalogService> QueryAdapter<S> {
    pub fn new(service: S) -> Self {
        Self::with_search_limit(service, SEARCH_LIMIT)
    }

    pub fn with_search_limit(service: S, search_limit: u32) -> Self {
        Self {
            service,
            search_limit,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn search_by_text(&self, query: &str) -> Vec<AnimeRecord> {
        match self.service.search_anime(query, self.search_limit).await {
            Ok(records) => {
                tracing::debug!(query, count = records.len(), "search returned");
                records
            }
            Err(e) => {
                tracing::error!(error = %e, query, "error fetching search results");
                Vec::new()
            }
        }
    }

    /// One-element list on success so random picks share the search render path.
    pub async fn fetch_random(&self) -> Vec<AnimeRecord> {
        match self.service.random_anime().await {
            Ok(record) => vec![record],
            Err(e) => {
                tracing::error!(error = %e, "error fetching random anime");
                Vec::new()
            }
        }
    }

    pub async fn fetch_recommendations(&self, anime_id: u64) -> Vec<RecommendationEntry> {
        match self.service.anime_recommendations(anime_id).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, anime_id, "error fetching recommendations");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use kensaku_api::traits::CatalogService;

    use crate::models::{AnimeRecord, RecommendationEntry};

    #[derive(Debug, thiserror::Error)]
    #[error("simulated transport failure")]
    pub struct FakeError;

    pub fn record(id: u64, title: &str) -> AnimeRecord {
        AnimeRecord {
            id,
            title: title.to_string(),
            kind: Some("TV".into()),
            episodes: Some(12),
            score: Some(8.1),
            image_url: format!("https://img.example/{id}.jpg"),
            url: format!("https://mal.example/anime/{id}"),
        }
    }

    /// In-memory catalog that records every call it receives.
    #[derive(Default)]
    pub struct FakeCatalog {
        pub search_results: Vec<AnimeRecord>,
        pub random: Option<AnimeRecord>,
        pub recommendations: Vec<RecommendationEntry>,
        pub fail: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl CatalogService for FakeCatalog {
        type Error = FakeError;

        async fn search_anime(&self, query: &str, limit: u32) -> Result<Vec<AnimeRecord>, FakeError> {
            self.log(format!("search:{query}:{limit}"));
            if self.fail {
                return Err(FakeError);
            }
            Ok(self.search_results.clone())
        }

        async fn random_anime(&self) -> Result<AnimeRecord, FakeError> {
            self.log("random".into());
            match (&self.random, self.fail) {
                (Some(r), false) => Ok(r.clone()),
                _ => Err(FakeError),
            }
        }

        async fn anime_recommendations(
            &self,
            anime_id: u64,
        ) -> Result<Vec<RecommendationEntry>, FakeError> {
            self.log(format!("recommendations:{anime_id}"));
            if self.fail {
                return Err(FakeError);
            }
            Ok(self.recommendations.clone())
        }
    }
}
