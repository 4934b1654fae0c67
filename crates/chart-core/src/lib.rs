// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; CSV-to-chart pipeline for price-index item grids.

pub mod axis;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod grid;
pub mod group;
pub mod page;
pub mod record;
pub mod scale;
pub mod series;
pub mod session;
pub mod svg;
pub mod target;
pub mod theme;
pub mod types;

pub use chart::Chart;
pub use dataset::{load_dataset, parse_csv, Dataset, DefaultSource, Source};
pub use error::{ConfigError, Error, LoadError, Result};
pub use filter::{Card, CardGrid, FilterOutcome};
pub use group::{ItemGroups, ItemSortKey, RankedItem};
pub use page::{render_page, write_page, PageOptions};
pub use record::{RawRecord, Record};
pub use series::{Channel, PlotSeries};
pub use session::{build_grid, Dashboard, DisplayArea, LoadStatus, LoadSummary};
pub use svg::{file_stem, panel_to_svg, write_svgs, SvgTarget};
pub use target::{ChartScene, Panel, Primitive, RenderTarget, Role};
pub use theme::{Color, RenderConfig, Stroke, Theme};
pub use types::{ChartLayout, Insets};
