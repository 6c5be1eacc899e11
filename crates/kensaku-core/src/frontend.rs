//! Event-driven page controller.
//!
//! [`Frontend`] owns the page state that a browser would keep in the DOM
//! (input value, result panel, recommendation panel, suggestion box) and
//! exposes one async handler per user event. Handlers may run concurrently;
//! each panel tracks the latest request issued for it and drops responses
//! that arrive for an older one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use kensaku_api::traits::CatalogService;

use crate::adapter::QueryAdapter;
use crate::config::AppConfig;
use crate::models::SuggestionItem;
use crate::render::{render_recommendations, render_results, Panel};
use crate::suggest::{filter_suggestions, normalize_query, should_suggest};

/// Dropdown of title suggestions under the search input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionBox {
    pub items: Vec<SuggestionItem>,
    pub visible: bool,
}

impl SuggestionBox {
    /// Replace the items; an empty list leaves the box hidden.
    pub fn show(&mut self, items: Vec<SuggestionItem>) {
        self.visible = !items.is_empty();
        self.items = items;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Everything currently displayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub input: String,
    pub results: Panel,
    pub recommendations: Panel,
    pub suggestions: SuggestionBox,
}

/// Monotonic request counter for one panel.
#[derive(Debug, Default)]
struct RequestSeq(AtomicU64);

impl RequestSeq {
    fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

pub struct Frontend<S> {
    adapter: QueryAdapter<S>,
    min_chars: usize,
    page: Mutex<Page>,
    suggestions_seq: RequestSeq,
    results_seq: RequestSeq,
    recommendations_seq: RequestSeq,
}

impl<S: CatalogService> Frontend<S> {
    pub fn new(service: S, config: &AppConfig) -> Self {
        Self {
            adapter: QueryAdapter::with_search_limit(service, config.catalog.search_limit),
            min_chars: config.suggestions.min_chars,
            page: Mutex::new(Page::default()),
            suggestions_seq: RequestSeq::default(),
            results_seq: RequestSeq::default(),
            recommendations_seq: RequestSeq::default(),
        }
    }

    pub fn adapter(&self) -> &QueryAdapter<S> {
        &self.adapter
    }

    /// Snapshot of the current page.
    pub fn page(&self) -> Page {
        self.with_page(|p| p.clone())
    }

    fn with_page<R>(&self, f: impl FnOnce(&mut Page) -> R) -> R {
        let mut page = self.page.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut page)
    }

    /// Hide the box and invalidate any suggestion response still in flight.
    fn hide_suggestions(&self, page: &mut Page) {
        self.suggestions_seq.issue();
        page.suggestions.hide();
    }

    /// Text input changed: refresh the suggestion dropdown.
    pub async fn input_changed(&self, value: &str) {
        let token = self.suggestions_seq.issue();
        let query = self.with_page(|p| {
            p.input = value.to_string();
            normalize_query(value)
        });

        if !should_suggest(&query, self.min_chars) {
            self.with_page(|p| p.suggestions.hide());
            return;
        }

        let records = self.adapter.search_by_text(&query).await;
        let items = filter_suggestions(&records, &query);

        if !self.suggestions_seq.is_latest(token) {
            tracing::debug!(query, "discarding stale suggestions");
            return;
        }
        tracing::debug!(query, count = items.len(), "showing suggestions");
        self.with_page(|p| p.suggestions.show(items));
    }

    /// Search button: render results for the trimmed input.
    pub async fn search_clicked(&self) {
        let query = self.with_page(|p| p.input.trim().to_string());
        if query.is_empty() {
            return;
        }

        let token = self.results_seq.issue();
        let records = self.adapter.search_by_text(&query).await;

        if !self.results_seq.is_latest(token) {
            tracing::debug!(query, "discarding stale search results");
            return;
        }
        self.with_page(|p| {
            p.results = render_results(&records);
            self.hide_suggestions(p);
        });
    }

    /// Random button: render a single random title.
    pub async fn random_clicked(&self) {
        let token = self.results_seq.issue();
        let records = self.adapter.fetch_random().await;

        if !self.results_seq.is_latest(token) {
            tracing::debug!("discarding stale random result");
            return;
        }
        self.with_page(|p| {
            p.results = render_results(&records);
            self.hide_suggestions(p);
        });
    }

    /// Result card at `index` clicked: load its recommendations.
    pub async fn card_clicked(&self, index: usize) {
        let anime_id = self.with_page(|p| {
            p.results
                .cards()
                .get(index)
                .filter(|c| c.clickable)
                .map(|c| c.anime_id)
        });
        let Some(anime_id) = anime_id else {
            tracing::debug!(index, "no clickable card at index");
            return;
        };

        let token = self.recommendations_seq.issue();
        let entries = self.adapter.fetch_recommendations(anime_id).await;

        if !self.recommendations_seq.is_latest(token) {
            tracing::debug!(anime_id, "discarding stale recommendations");
            return;
        }
        self.with_page(|p| p.recommendations = render_recommendations(&entries));
    }

    /// Suggestion at `index` clicked: fill the input with its title and search.
    pub async fn suggestion_clicked(&self, index: usize) {
        let picked = self.with_page(|p| {
            if !p.suggestions.visible {
                return None;
            }
            let title = p.suggestions.items.get(index)?.title.clone();
            p.input = title.clone();
            self.hide_suggestions(p);
            Some(title)
        });
        if picked.is_some() {
            self.search_clicked().await;
        }
    }

    /// Click anywhere outside the input and the dropdown.
    pub fn outside_clicked(&self) {
        self.with_page(|p| self.hide_suggestions(p));
    }
}
