use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::JikanError;
use super::types::{JikanAnime, JikanRecommendation, JikanResponse};
use crate::traits::{AnimeRecord, CatalogService, RecommendationEntry};

/// Public Jikan v4 endpoint (unofficial MyAnimeList API, no auth).
pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";

const USER_AGENT: &str = concat!("kensaku/", env!("CARGO_PKG_VERSION"));

/// Jikan API v4 client.
pub struct JikanClient {
    base_url: String,
    http: Client,
}

impl JikanClient {
    /// Build a client against `base_url`, e.g. [`DEFAULT_BASE_URL`].
    pub fn new(base_url: &str) -> Result<Self, JikanError> {
        url::Url::parse(base_url)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, JikanError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "Jikan API error");
            Err(JikanError::Api {
                status,
                message: body,
            })
        }
    }

    /// GET `{base}{path}` and decode the `data` field of the response.
    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, JikanError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "Jikan request");

        let resp = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: JikanResponse<T> = resp
            .json()
            .await
            .map_err(|e| JikanError::Parse(e.to_string()))?;
        Ok(body.data)
    }
}

impl CatalogService for JikanClient {
    type Error = JikanError;

    async fn search_anime(&self, query: &str, limit: u32) -> Result<Vec<AnimeRecord>, JikanError> {
        let limit = limit.to_string();
        let data: Vec<JikanAnime> = self
            .get_data("/anime", &[("q", query), ("limit", limit.as_str())])
            .await?;
        Ok(data.into_iter().map(JikanAnime::into_record).collect())
    }

    async fn random_anime(&self) -> Result<AnimeRecord, JikanError> {
        let data: JikanAnime = self.get_data("/random/anime", &[]).await?;
        Ok(data.into_record())
    }

    async fn anime_recommendations(
        &self,
        anime_id: u64,
    ) -> Result<Vec<RecommendationEntry>, JikanError> {
        let data: Vec<JikanRecommendation> = self
            .get_data(&format!("/anime/{anime_id}/recommendations"), &[])
            .await?;
        Ok(data
            .into_iter()
            .map(JikanRecommendation::into_entry)
            .collect())
    }
}
