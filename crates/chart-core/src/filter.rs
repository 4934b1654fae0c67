// File: crates/chart-core/src/filter.rs
// Summary: Card grid and the item-name filter that toggles card visibility.

use crate::target::Panel;

/// One rendered item card.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub panel: Panel,
    /// Lower-cased item name the filter matches against.
    key: String,
    pub visible: bool,
}

impl Card {
    pub fn new(panel: Panel) -> Self {
        let key = panel.item.to_lowercase();
        Self { panel, key, visible: true }
    }

    pub fn item(&self) -> &str { &self.panel.item }

    /// Case-insensitive substring match; `query` must already be normalised.
    pub fn matches(&self, query: &str) -> bool {
        self.key.contains(query)
    }
}

/// Result of one filter pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: usize,
    pub total: usize,
    /// Whether the empty-results indicator is shown.
    pub empty_shown: bool,
}

/// Cards in display order plus the empty-results indicator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardGrid {
    pub cards: Vec<Card>,
    pub empty_shown: bool,
}

/// Trim and lower-case a raw query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl CardGrid {
    pub fn new(cards: Vec<Card>) -> Self {
        let empty_shown = cards.is_empty();
        Self { cards, empty_shown }
    }

    /// Show cards whose item contains `query` (case-insensitive), hide the
    /// rest; the empty indicator is shown iff nothing stays visible.
    pub fn apply_filter(&mut self, query: &str) -> FilterOutcome {
        let q = normalize_query(query);
        let mut visible = 0;
        for card in &mut self.cards {
            card.visible = card.matches(&q);
            if card.visible { visible += 1; }
        }
        self.empty_shown = visible == 0;
        FilterOutcome { visible, total: self.cards.len(), empty_shown: self.empty_shown }
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.visible)
    }

    pub fn items(&self) -> Vec<&str> {
        self.cards.iter().map(Card::item).collect()
    }
}
