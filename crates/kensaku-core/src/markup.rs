//! HTML and plain-text output for rendered panels.

use std::fmt;

use askama::Template;

use crate::frontend::{Page, SuggestionBox};
use crate::models::SuggestionItem;
use crate::render::{Card, Panel};

#[derive(Template)]
#[template(
    source = r#"{% if let Some(message) = message %}<p>{{ message }}</p>
{% endif %}{% for card in cards %}<div class="anime-card" data-id="{{ card.anime_id }}">
  <img src="{{ card.image_url }}" alt="{{ card.title }}">
  <h3>{{ card.title }}</h3>
{% if let Some(summary) = card.summary %}  <p>{{ summary }}</p>
{% endif %}  <p>{{ card.score_line }}</p>
  <a href="{{ card.link }}" target="_blank">More Info</a>
</div>
{% endfor %}"#,
    ext = "html"
)]
struct PanelTemplate<'a> {
    message: Option<&'a str>,
    cards: &'a [Card],
}

#[derive(Template)]
#[template(
    source = r#"{% for item in items %}<div class="suggestion-item" data-index="{{ loop.index0 }}">{{ item.title }}</div>
{% endfor %}"#,
    ext = "html"
)]
struct SuggestionsTemplate<'a> {
    items: &'a [SuggestionItem],
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Kensaku</title>
</head>
<body>
<div class="search-bar">
<input id="search" type="text" value="{{ input }}" placeholder="Search anime...">
<button id="searchBtn">Search</button>
<button id="randomBtn">Random</button>
<div id="suggestions" style="display: {{ display }}">
{{ suggestions|safe }}</div>
</div>
<div id="anime-list">
{{ results|safe }}</div>
<h2>Recommended</h2>
<div id="recommended-list">
{{ recommendations|safe }}</div>
</body>
</html>
"#,
    ext = "html"
)]
struct PageTemplate<'a> {
    input: &'a str,
    display: &'static str,
    // Panel markup, already escaped by its own template.
    suggestions: String,
    results: String,
    recommendations: String,
}

fn render(template: &impl Template) -> String {
    template.render().unwrap_or_else(|e| {
        tracing::error!(error = %e, "template render failed");
        String::new()
    })
}

impl Card {
    pub fn to_html(&self) -> String {
        render(&PanelTemplate {
            message: None,
            cards: std::slice::from_ref(self),
        })
    }
}

impl Panel {
    pub fn to_html(&self) -> String {
        let template = match self {
            Panel::Blank => return String::new(),
            Panel::Message(m) => PanelTemplate {
                message: Some(m.as_str()),
                cards: &[],
            },
            Panel::Cards(cards) => PanelTemplate {
                message: None,
                cards,
            },
        };
        render(&template)
    }
}

impl SuggestionBox {
    pub fn to_html(&self) -> String {
        render(&SuggestionsTemplate { items: &self.items })
    }
}

impl Page {
    /// Full standalone document with the current panel contents.
    pub fn to_html(&self) -> String {
        render(&PageTemplate {
            input: &self.input,
            display: if self.suggestions.visible {
                "block"
            } else {
                "none"
            },
            suggestions: self.suggestions.to_html(),
            results: self.results.to_html(),
            recommendations: self.recommendations.to_html(),
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [#{}]", self.title, self.anime_id)?;
        if let Some(summary) = &self.summary {
            writeln!(f, "  {summary}")?;
        }
        writeln!(f, "  {}", self.score_line)?;
        if !self.link.is_empty() {
            writeln!(f, "  {}", self.link)?;
        }
        Ok(())
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Blank => Ok(()),
            Panel::Message(m) => writeln!(f, "{m}"),
            Panel::Cards(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    write!(f, "{:>2}. {card}", i + 1)?;
                }
                Ok(())
            }
        }
    }
}
