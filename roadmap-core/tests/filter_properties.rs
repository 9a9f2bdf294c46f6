use std::cell::RefCell;
use std::collections::BTreeMap;

use roadmap_core::{
    CardId, CardRecord, Category, FilterEngine, FilterSurface, SearchTerm, card_matches,
};

#[derive(Default)]
struct PageFlags {
    hidden: RefCell<BTreeMap<usize, bool>>,
    empty: RefCell<BTreeMap<usize, bool>>,
}

impl FilterSurface for PageFlags {
    fn set_card_hidden(&self, card: CardId, hidden: bool) {
        self.hidden.borrow_mut().insert(card.0, hidden);
    }

    fn set_stage_empty(&self, stage: usize, empty: bool) {
        self.empty.borrow_mut().insert(stage, empty);
    }
}

fn sample_cards() -> Vec<CardRecord> {
    vec![
        CardRecord::new(Some(0), "frontend", "React", "Component model for UIs"),
        CardRecord::new(Some(0), "frontend", "Svelte", "Compiler-first UI framework"),
        CardRecord::new(Some(0), "backend", "Axum", "Ergonomic web framework"),
        CardRecord::new(Some(1), "data", "Kafka", "Distributed event log"),
        CardRecord::new(Some(1), "data", "Postgres", "Relational database"),
        CardRecord::new(Some(1), "backend", "gRPC", "RPC framework"),
        // Stage 2 deliberately has no cards.
        CardRecord::new(None, "ops", "Terraform", "Infrastructure as code"),
    ]
}

fn engine(category: &str, term: &str) -> FilterEngine {
    let mut engine = FilterEngine::new(3, sample_cards());
    engine.select_category(Category::parse(category));
    engine.set_term(SearchTerm::new(term));
    engine
}

#[test]
fn applying_twice_yields_identical_flags() {
    let combos = [
        ("all", ""),
        ("frontend", ""),
        ("backend", "framework"),
        ("data", "ZZZ"),
        ("all", "  UI "),
    ];
    for (category, term) in combos {
        let engine = engine(category, term);
        let page = PageFlags::default();
        let first_summary = engine.apply(&page);
        let first_hidden = page.hidden.borrow().clone();
        let first_empty = page.empty.borrow().clone();

        let second_summary = engine.apply(&page);
        assert_eq!(first_summary, second_summary, "{category}/{term}");
        assert_eq!(*page.hidden.borrow(), first_hidden, "{category}/{term}");
        assert_eq!(*page.empty.borrow(), first_empty, "{category}/{term}");
    }
}

#[test]
fn react_card_visibility_follows_category() {
    let react = CardRecord::new(Some(0), "frontend", "React", "");
    let blank = SearchTerm::new("");
    assert!(card_matches(&react, &Category::parse("frontend"), &blank));
    assert!(!card_matches(&react, &Category::parse("backend"), &blank));
}

#[test]
fn visible_set_is_intersection_of_both_predicates() {
    let engine = engine("backend", "framework");
    assert_eq!(
        engine.visibility(),
        vec![false, false, true, false, false, true, false]
    );
}

#[test]
fn fully_filtered_stage_is_flagged_but_cardless_stage_is_not() {
    let engine = engine("frontend", "");
    let page = PageFlags::default();
    let summary = engine.apply(&page);

    assert_eq!(summary.total, 7);
    assert_eq!(summary.visible, 2);
    assert_eq!(summary.empty_stages, vec![1]);
    let empty = page.empty.borrow();
    assert_eq!(empty.get(&0), Some(&false));
    assert_eq!(empty.get(&1), Some(&true));
    assert_eq!(empty.get(&2), Some(&false), "stage without cards is never flagged");
}

#[test]
fn empty_flag_clears_when_filter_relaxes() {
    let mut engine = engine("all", "no-such-tech");
    let page = PageFlags::default();
    let summary = engine.apply(&page);
    assert_eq!(summary.empty_stages, vec![0, 1]);

    engine.set_term(SearchTerm::new(""));
    let summary = engine.apply(&page);
    assert!(summary.empty_stages.is_empty());
    assert!(page.hidden.borrow().values().all(|hidden| !hidden));
}
