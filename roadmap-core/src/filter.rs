//! Category chips and free-text search over the roadmap cards.

use serde::{Deserialize, Serialize};

use crate::ids::CardId;

/// Category selected by the active chip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    /// Parse a chip's `data-category` value. Empty and `all` select everything.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim().to_lowercase();
        if value.is_empty() || value == "all" {
            Self::All
        } else {
            Self::Named(value)
        }
    }

    #[must_use]
    pub fn accepts(&self, card_category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == card_category,
        }
    }
}

/// Normalized search input: trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm(String);

impl SearchTerm {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn found_in(&self, haystack: &str) -> bool {
        haystack.contains(self.0.as_str())
    }
}

/// Searchable facts about one card, lowercased once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    /// Index of the enclosing stage; `None` for cards outside any stage.
    pub stage: Option<usize>,
    category: String,
    name: String,
    description: String,
}

impl CardRecord {
    #[must_use]
    pub fn new(stage: Option<usize>, category: &str, name: &str, description: &str) -> Self {
        Self {
            stage,
            category: category.trim().to_lowercase(),
            name: name.to_lowercase(),
            description: description.to_lowercase(),
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Visibility predicate: category gate AND search gate.
#[must_use]
pub fn card_matches(card: &CardRecord, category: &Category, term: &SearchTerm) -> bool {
    let category_ok = category.accepts(&card.category);
    let search_ok = term.is_empty() || term.found_in(&card.name) || term.found_in(&card.description);
    category_ok && search_ok
}

pub trait FilterSurface {
    fn set_card_hidden(&self, card: CardId, hidden: bool);
    fn set_stage_empty(&self, stage: usize, empty: bool);
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterSummary {
    pub visible: usize,
    pub total: usize,
    /// Stages that have cards but none of them visible.
    pub empty_stages: Vec<usize>,
}

/// The active chip and search term, held explicitly rather than read back
/// from the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: Category,
    pub term: SearchTerm,
}

impl FilterState {
    #[must_use]
    pub fn matches(&self, card: &CardRecord) -> bool {
        card_matches(card, &self.category, &self.term)
    }
}

pub struct FilterEngine {
    cards: Vec<CardRecord>,
    stage_count: usize,
    state: FilterState,
}

impl FilterEngine {
    #[must_use]
    pub fn new(stage_count: usize, cards: Vec<CardRecord>) -> Self {
        Self {
            cards,
            stage_count,
            state: FilterState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.state.category
    }

    #[must_use]
    pub const fn term(&self) -> &SearchTerm {
        &self.state.term
    }

    pub fn select_category(&mut self, category: Category) {
        self.state.category = category;
    }

    pub fn set_term(&mut self, term: SearchTerm) {
        self.state.term = term;
    }

    /// Per-card visibility in document order.
    #[must_use]
    pub fn visibility(&self) -> Vec<bool> {
        self.cards
            .iter()
            .map(|card| self.state.matches(card))
            .collect()
    }

    /// Push the current visibility and per-stage empty flags to the surface.
    pub fn apply(&self, surface: &dyn FilterSurface) -> FilterSummary {
        let mut totals = vec![0_usize; self.stage_count];
        let mut visible_per_stage = vec![0_usize; self.stage_count];
        let mut visible = 0;

        for (idx, (card, shown)) in self.cards.iter().zip(self.visibility()).enumerate() {
            surface.set_card_hidden(CardId(idx), !shown);
            if shown {
                visible += 1;
            }
            if let Some(stage) = card.stage.filter(|s| *s < self.stage_count) {
                totals[stage] += 1;
                if shown {
                    visible_per_stage[stage] += 1;
                }
            }
        }

        let mut empty_stages = Vec::new();
        for (stage, (total, shown)) in totals.iter().zip(&visible_per_stage).enumerate() {
            let empty = *total > 0 && *shown == 0;
            surface.set_stage_empty(stage, empty);
            if empty {
                empty_stages.push(stage);
            }
        }

        log::debug!(
            "filter applied: category={:?} term={:?} visible={visible}/{}",
            self.state.category,
            self.state.term.as_str(),
            self.cards.len()
        );

        FilterSummary {
            visible,
            total: self.cards.len(),
            empty_stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_keeps_the_explicit_state() {
        let mut engine = FilterEngine::new(1, vec![CardRecord::new(Some(0), "data", "Kafka", "")]);
        engine.select_category(Category::parse("Data"));
        engine.set_term(SearchTerm::new(" KAF "));
        assert_eq!(
            engine.state(),
            &FilterState {
                category: Category::Named("data".into()),
                term: SearchTerm::new("kaf"),
            }
        );
        assert_eq!(engine.visibility(), vec![true]);
    }

    #[test]
    fn category_parse_treats_blank_and_all_alike() {
        assert_eq!(Category::parse("all"), Category::All);
        assert_eq!(Category::parse("  "), Category::All);
        assert_eq!(Category::parse("ALL"), Category::All);
        assert_eq!(
            Category::parse(" Frontend "),
            Category::Named("frontend".into())
        );
    }

    #[test]
    fn card_matches_on_category_and_term() {
        let react = CardRecord::new(Some(0), "frontend", "React", "Component UI library");
        let empty = SearchTerm::new("");
        assert!(card_matches(&react, &Category::parse("frontend"), &empty));
        assert!(!card_matches(&react, &Category::parse("backend"), &empty));
        assert!(card_matches(&react, &Category::All, &SearchTerm::new("  REAC ")));
        assert!(card_matches(&react, &Category::All, &SearchTerm::new("ui lib")));
        assert!(!card_matches(&react, &Category::All, &SearchTerm::new("vue")));
    }

    #[test]
    fn search_term_is_trimmed_and_lowercased() {
        let term = SearchTerm::new("  Rust  ");
        assert_eq!(term.as_str(), "rust");
        assert!(SearchTerm::new("   ").is_empty());
    }

    #[test]
    fn engine_keeps_explicit_selection_state() {
        let mut engine = FilterEngine::new(0, Vec::new());
        assert_eq!(engine.category(), &Category::All);
        engine.select_category(Category::parse("data"));
        engine.set_term(SearchTerm::new("Kafka"));
        assert_eq!(engine.category(), &Category::Named("data".into()));
        assert_eq!(engine.term().as_str(), "kafka");
    }
}
