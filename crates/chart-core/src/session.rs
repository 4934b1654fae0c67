// File: crates/chart-core/src/session.rs
// Summary: Dashboard session; serialised dataset loads, the display area and the live filter.
// Notes:
// - `load_dataset` is the only await point. A load requested while another is
//   in flight is skipped, so two loads never interleave writes to the display.
// - The display is replaced wholesale when a load finishes: a fresh grid on
//   success, a single error message on failure.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::chart::Chart;
use crate::dataset::{load_dataset, Dataset, DefaultSource, Source};
use crate::filter::{Card, CardGrid, FilterOutcome};
use crate::group::ItemGroups;
use crate::series::PlotSeries;
use crate::theme::RenderConfig;

/// What the output area currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DisplayArea {
    /// Nothing loaded yet.
    #[default]
    Blank,
    Grid(CardGrid),
    /// Human-readable load failure; replaces any previous grid.
    Error(String),
}

/// Row and item accounting of a successful load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadSummary {
    pub total_rows: usize,
    pub excluded_rows: usize,
    pub items: usize,
    pub cards: usize,
    pub filter: FilterOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded(LoadSummary),
    Failed(String),
    /// Another load was still in flight.
    Skipped,
}

/// Group, order and render every item with a plottable point.
pub fn build_grid(dataset: Dataset, config: &RenderConfig) -> CardGrid {
    let groups = ItemGroups::from_records(dataset.records);
    let cards = groups
        .ordered()
        .into_iter()
        .filter_map(|ranked| {
            let series = PlotSeries::build(&ranked.item, groups.get(&ranked.item)?)?;
            Some(Card::new(Chart::new(&series, config).panel()))
        })
        .collect();
    CardGrid::new(cards)
}

#[derive(Debug, Default)]
struct State {
    area: DisplayArea,
    query: String,
}

/// Clears the in-flight flag when the load ends, however it ends.
struct LoadGuard<'a>(&'a AtomicBool);

impl<'a> LoadGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Dashboard<S = DefaultSource> {
    source: S,
    config: RenderConfig,
    loading: AtomicBool,
    state: Mutex<State>,
}

impl Dashboard<DefaultSource> {
    /// Dashboard reading from disk or HTTP.
    pub fn with_default_source(config: RenderConfig) -> Self {
        Self::new(DefaultSource::new(), config)
    }
}

impl<S: Source> Dashboard<S> {
    pub fn new(source: S, config: RenderConfig) -> Self {
        Self { source, config, loading: AtomicBool::new(false), state: Mutex::new(State::default()) }
    }

    pub fn config(&self) -> &RenderConfig { &self.config }

    pub fn source(&self) -> &S { &self.source }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Fetch, parse and render `locator`, replacing the display area. The
    /// current filter query is re-applied to the new grid.
    pub async fn load_dataset(&self, locator: &str) -> LoadStatus {
        let Some(_guard) = LoadGuard::acquire(&self.loading) else {
            warn!(locator, "load already in progress; ignoring request");
            return LoadStatus::Skipped;
        };

        info!(locator, "loading dataset");
        let dataset = match load_dataset(&self.source, locator).await {
            Ok(d) => d,
            Err(e) => {
                let msg = format!("Failed to load CSV: {e}");
                warn!(locator, error = %e, "dataset load failed");
                self.state().area = DisplayArea::Error(msg.clone());
                return LoadStatus::Failed(msg);
            }
        };

        let (total_rows, excluded_rows) = (dataset.total_rows, dataset.excluded_rows);
        let items = dataset.records.iter().map(|r| r.item.as_str()).collect::<HashSet<_>>().len();
        let mut grid = build_grid(dataset, &self.config);
        debug!(items, cards = grid.cards.len(), "rendered item cards");

        let mut st = self.state();
        let filter = grid.apply_filter(&st.query);
        let summary = LoadSummary { total_rows, excluded_rows, items, cards: grid.cards.len(), filter };
        st.area = DisplayArea::Grid(grid);
        info!(total_rows, excluded_rows, cards = summary.cards, visible = filter.visible, "dataset loaded");
        LoadStatus::Loaded(summary)
    }

    /// Remember `query` and apply it to the current grid, if any.
    pub fn apply_filter(&self, query: &str) -> Option<FilterOutcome> {
        let mut st = self.state();
        st.query = query.to_string();
        match &mut st.area {
            DisplayArea::Grid(grid) => Some(grid.apply_filter(query)),
            _ => None,
        }
    }

    pub fn query(&self) -> String {
        self.state().query.clone()
    }

    /// Snapshot of the display area.
    pub fn display(&self) -> DisplayArea {
        self.state().area.clone()
    }

    /// Borrow the display area and query without cloning the grid.
    pub fn with_display<R>(&self, f: impl FnOnce(&DisplayArea, &str) -> R) -> R {
        let st = self.state();
        f(&st.area, &st.query)
    }
}
