use serde::Serialize;

use crate::models::{AnimeRecord, RecommendationEntry};

pub const NO_RESULTS: &str = "No results found.";
pub const NO_RECOMMENDATIONS: &str = "No recommendations available.";

/// Rendered content of one panel. Each render fully replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum Panel {
    /// Nothing rendered yet.
    #[default]
    Blank,
    Message(String),
    Cards(Vec<Card>),
}

impl Panel {
    pub fn cards(&self) -> &[Card] {
        match self {
            Panel::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Panel::Message(m) => Some(m),
            _ => None,
        }
    }
}

/// One anime card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub anime_id: u64,
    pub image_url: String,
    pub title: String,
    /// `"TV • 12 eps"`; only result cards carry it.
    pub summary: Option<String>,
    pub score_line: String,
    pub link: String,
    /// Clicking a result card loads its recommendations.
    pub clickable: bool,
}

// ── Fallbacks ───────────────────────────────────────────────────
// Empty strings and zero counts are shown the same as missing values.

pub fn kind_label(kind: Option<&str>) -> &str {
    kind.filter(|k| !k.is_empty()).unwrap_or("Unknown")
}

pub fn episodes_label(episodes: Option<u32>) -> String {
    match episodes {
        Some(n) if n > 0 => n.to_string(),
        _ => "?".to_string(),
    }
}

pub fn score_label(score: Option<f64>) -> String {
    match score {
        Some(s) if s != 0.0 && !s.is_nan() => s.to_string(),
        _ => "N/A".to_string(),
    }
}

fn summary_line(record: &AnimeRecord) -> String {
    format!(
        "{} • {} eps",
        kind_label(record.kind.as_deref()),
        episodes_label(record.episodes)
    )
}

fn base_card(record: &AnimeRecord) -> Card {
    Card {
        anime_id: record.id,
        image_url: record.image_url.clone(),
        title: record.title.clone(),
        summary: None,
        score_line: format!("Score: {}", score_label(record.score)),
        link: record.url.clone(),
        clickable: false,
    }
}

/// Result panel: one clickable card per record, or [`NO_RESULTS`].
pub fn render_results(records: &[AnimeRecord]) -> Panel {
    if records.is_empty() {
        return Panel::Message(NO_RESULTS.to_string());
    }
    Panel::Cards(
        records
            .iter()
            .map(|r| Card {
                summary: Some(summary_line(r)),
                clickable: true,
                ..base_card(r)
            })
            .collect(),
    )
}

/// Recommendation panel: one static card per wrapped record, or [`NO_RECOMMENDATIONS`].
pub fn render_recommendations(entries: &[RecommendationEntry]) -> Panel {
    if entries.is_empty() {
        return Panel::Message(NO_RECOMMENDATIONS.to_string());
    }
    Panel::Cards(entries.iter().map(|e| base_card(&e.entry)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::testing::record;

    #[test]
    fn test_empty_results_message() {
        let panel = render_results(&[]);
        assert_eq!(panel.message(), Some("No results found."));
        assert!(panel.cards().is_empty());
    }

    #[test]
    fn test_one_card_per_record() {
        let records: Vec<_> = (1..=5).map(|i| record(i, &format!("Title {i}"))).collect();
        let panel = render_results(&records);
        let cards = panel.cards();
        assert_eq!(cards.len(), 5);
        for (card, rec) in cards.iter().zip(&records) {
            assert_eq!(card.title, rec.title);
            assert_eq!(card.anime_id, rec.id);
            assert!(card.clickable);
        }
        assert_eq!(cards[0].summary.as_deref(), Some("TV • 12 eps"));
        assert_eq!(cards[0].score_line, "Score: 8.1");
    }

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let mut rec = record(7, "Untitled Project");
        rec.kind = None;
        rec.episodes = None;
        rec.score = None;
        let panel = render_results(&[rec]);
        let card = &panel.cards()[0];
        assert_eq!(card.summary.as_deref(), Some("Unknown • ? eps"));
        assert_eq!(card.score_line, "Score: N/A");
    }

    #[test]
    fn test_zero_and_empty_values_use_fallbacks() {
        let mut rec = record(8, "Announced");
        rec.kind = Some(String::new());
        rec.episodes = Some(0);
        rec.score = Some(0.0);
        let panel = render_results(&[rec]);
        let card = &panel.cards()[0];
        assert_eq!(card.summary.as_deref(), Some("Unknown • ? eps"));
        assert_eq!(card.score_line, "Score: N/A");
    }

    #[test]
    fn test_whole_scores_print_without_decimals() {
        assert_eq!(score_label(Some(9.0)), "9");
        assert_eq!(score_label(Some(8.75)), "8.75");
    }

    #[test]
    fn test_empty_recommendations_message() {
        let panel = render_recommendations(&[]);
        assert_eq!(panel.message(), Some("No recommendations available."));
    }

    #[test]
    fn test_recommendation_cards_are_static() {
        let mut rec = record(20, "Naruto");
        rec.score = None;
        let entries = vec![RecommendationEntry {
            entry: rec,
            url: None,
            votes: Some(3),
        }];
        let panel = render_recommendations(&entries);
        let card = &panel.cards()[0];
        assert_eq!(card.title, "Naruto");
        assert_eq!(card.score_line, "Score: N/A");
        assert!(card.summary.is_none());
        assert!(!card.clickable);
    }
}
