// File: crates/demo/src/main.rs
// Summary: pricegrid CLI; loads a price-index CSV and writes the item chart grid (HTML, SVG, PNG).

use std::path::PathBuf;

use anyhow::{Context, Result};
use chart_core::filter::normalize_query;
use chart_core::{
    load_dataset, write_page, write_svgs, Dashboard, DefaultSource, DisplayArea, ItemGroups, LoadStatus,
    PageOptions, Panel, PlotSeries, RenderConfig,
};
use chart_render_skia::{write_pngs, RasterOptions};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info};

/// pricegrid: small-multiples charts of price-index items
#[derive(Parser, Debug)]
#[command(name = "pricegrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a CSV and write the chart grid
    Render(RenderArgs),

    /// Print items in display order with their sort keys
    List(ListArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// CSV file path or http(s) URL
    locator: String,

    /// HTML page to write
    #[arg(short, long, default_value = "pricegrid/index.html")]
    out: PathBuf,

    /// Also write one SVG per visible item into this directory
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// Also write one PNG per visible item into this directory
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Pixel density of PNG output
    #[arg(long, default_value = "2.0")]
    png_scale: f32,

    /// Initial item filter (case-insensitive substring)
    #[arg(short, long, default_value = "")]
    filter: String,

    /// Page title
    #[arg(long, default_value = "Price index YoY")]
    title: String,

    /// Theme preset (dark, light)
    #[arg(long, env = "PRICEGRID_THEME", default_value = "dark")]
    theme: String,

    /// JSON file overriding theme, layout and channel styles
    #[arg(long, env = "PRICEGRID_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// CSV file path or http(s) URL
    locator: String,

    /// Mark items matching this filter
    #[arg(short, long, default_value = "")]
    filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Render(args) => render_command(args).await,
        Commands::List(args) => list_command(args).await,
    }
}

/// Load, filter and write every requested output.
async fn render_command(args: RenderArgs) -> Result<()> {
    let config = RenderConfig::load(&args.theme, args.config.as_deref())
        .with_context(|| "Failed to load render config")?;
    debug!(theme = %config.theme.name, "resolved render config");

    let dash = Dashboard::with_default_source(config);
    dash.apply_filter(&args.filter);
    let status = dash.load_dataset(&args.locator).await;

    let page = PageOptions { title: args.title.clone(), source: Some(args.locator.clone()) };
    dash.with_display(|area, query| write_page(&args.out, area, query, dash.config(), &page))
        .with_context(|| format!("Failed to write page: {:?}", args.out))?;
    info!("Wrote {:?}", args.out);

    match status {
        LoadStatus::Loaded(s) => {
            println!(
                "{} rows ({} excluded), {} items, {} cards, {} shown",
                s.total_rows, s.excluded_rows, s.items, s.cards, s.filter.visible
            );
        }
        LoadStatus::Failed(msg) => {
            error!("{}", msg);
            anyhow::bail!(msg);
        }
        LoadStatus::Skipped => anyhow::bail!("load skipped: another load is in progress"),
    }

    let panels: Vec<Panel> = dash.with_display(|area, _| match area {
        DisplayArea::Grid(grid) => grid.visible_cards().map(|c| c.panel.clone()).collect(),
        _ => Vec::new(),
    });

    if let Some(dir) = &args.svg_dir {
        let written = write_svgs(&panels, dir).with_context(|| format!("Failed to write SVGs to {:?}", dir))?;
        info!("Wrote {} SVG files to {:?}", written.len(), dir);
    }

    if let Some(dir) = &args.png_dir {
        let theme = &dash.config().theme;
        let opts = RasterOptions {
            scale: args.png_scale,
            background: theme.card,
            title_color: theme.title,
            ..RasterOptions::default()
        };
        let written = write_pngs(&panels, dir, opts).with_context(|| format!("Failed to write PNGs to {:?}", dir))?;
        info!("Wrote {} PNG files to {:?}", written.len(), dir);
    }

    Ok(())
}

/// Show display order, sort keys and filter matches
async fn list_command(args: ListArgs) -> Result<()> {
    let dataset = load_dataset(&DefaultSource::new(), &args.locator)
        .await
        .with_context(|| format!("Failed to load CSV: {}", args.locator))?;
    info!("Loaded {} rows ({} excluded)", dataset.total_rows, dataset.excluded_rows);

    let query = normalize_query(&args.filter);
    let groups = ItemGroups::from_records(dataset.records);
    for (i, ranked) in groups.ordered().into_iter().enumerate() {
        let has_card = groups.get(&ranked.item).and_then(|r| PlotSeries::build(&ranked.item, r)).is_some();
        let shown = has_card && ranked.item.to_lowercase().contains(&query);
        let cpi = if ranked.key.cpi.is_finite() { ranked.key.cpi.to_string() } else { "-".to_string() };
        let mark = match (has_card, shown) {
            (false, _) => "no data",
            (true, true) => "shown",
            (true, false) => "hidden",
        };
        println!("{:>4}  {:<32} level={:<3} cpi={:<8} {}", i + 1, ranked.item, ranked.key.level, cpi, mark);
    }

    Ok(())
}
