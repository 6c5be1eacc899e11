//! Browser bindings: feed raw Jikan `data` arrays in, get panel markup out.
//!
//! Input that is `null` or does not decode is treated as an empty list, so a
//! failed fetch on the page still renders the "no results" message.

use wasm_bindgen::prelude::*;

use kensaku_api::jikan::types::{JikanAnime, JikanRecommendation};
use kensaku_core::models::{AnimeRecord, RecommendationEntry};
use kensaku_core::render::{render_recommendations, render_results};
use kensaku_core::suggest::{filter_suggestions, normalize_query, should_suggest, MIN_SUGGEST_CHARS};

fn decode_list<T: serde::de::DeserializeOwned>(json: &str) -> Vec<T> {
    serde_json::from_str::<Option<Vec<T>>>(json)
        .ok()
        .flatten()
        .unwrap_or_default()
}

fn records(json: &str) -> Vec<AnimeRecord> {
    decode_list::<JikanAnime>(json)
        .into_iter()
        .map(JikanAnime::into_record)
        .collect()
}

fn recommendations(json: &str) -> Vec<RecommendationEntry> {
    decode_list::<JikanRecommendation>(json)
        .into_iter()
        .map(JikanRecommendation::into_entry)
        .collect()
}

/// `#anime-list` markup for a search or random response.
#[wasm_bindgen]
pub fn render_results_html(json: &str) -> String {
    render_results(&records(json)).to_html()
}

/// `#recommended-list` markup for a recommendations response.
#[wasm_bindgen]
pub fn render_recommendations_html(json: &str) -> String {
    render_recommendations(&recommendations(json)).to_html()
}

/// Suggestions as a JSON array of `{id, title}`; `[]` when the input is too short.
#[wasm_bindgen]
pub fn suggestions_json(json: &str, raw_query: &str) -> String {
    let query = normalize_query(raw_query);
    if !should_suggest(&query, MIN_SUGGEST_CHARS) {
        return "[]".to_string();
    }
    let items = filter_suggestions(&records(json), &query);
    serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string())
}

/// Whether typing `raw_query` should trigger a suggestion fetch at all.
#[wasm_bindgen]
pub fn wants_suggestions(raw_query: &str) -> bool {
    should_suggest(&normalize_query(raw_query), MIN_SUGGEST_CHARS)
}
