// File: crates/chart-core/src/page.rs
// Summary: Self-contained HTML page with the card grid, filter input and empty indicator.

use std::path::Path;

use minijinja::{context, Environment};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::session::DisplayArea;
use crate::svg::panel_to_svg;
use crate::theme::RenderConfig;

/// Shown when nothing qualifies or the filter matches nothing.
pub const EMPTY_MESSAGE: &str = "No matching items.";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{ title }}</title>
<style>
  body { margin: 0; padding: 1.5rem; background: {{ theme.background }}; color: {{ theme.title }};
         font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; }
  header { display: flex; gap: 1rem; align-items: baseline; margin-bottom: 1rem; }
  h1 { font-size: 1.25rem; font-weight: 600; margin: 0; }
  .source { color: {{ theme.muted }}; font-size: 0.85rem; }
  #filter { padding: 0.35rem 0.6rem; border-radius: 6px; border: 1px solid {{ theme.border }};
            background: {{ theme.card }}; color: {{ theme.title }}; min-width: 16rem; }
  #grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(420px, 1fr)); gap: 1rem; }
  .card { background: {{ theme.card }}; border: 1px solid {{ theme.border }}; border-radius: 10px; padding: 0.6rem 0.75rem; }
  .title { font-weight: 600; margin-bottom: 0.25rem; }
  .legend { display: flex; gap: 1rem; font-size: 0.8rem; color: {{ theme.muted }}; margin-bottom: 0.25rem; }
  .swatch { display: inline-block; width: 18px; height: 0; margin-right: 0.35rem; vertical-align: middle; border-top-width: 2px; }
  .card svg { width: 100%; height: auto; display: block; }
  #empty { color: {{ theme.muted }}; padding: 2rem 0; }
</style>
</head>
<body>
<header>
  <h1>{{ title }}</h1>
  <input id="filter" type="search" placeholder="Filter items" value="{{ query }}">
  {% if source %}<span class="source">{{ source }}</span>{% endif %}
</header>
<div id="grid">
{%- for card in cards %}
  <div class="card" data-item="{{ card.item }}"{% if not card.visible %} style="display:none"{% endif %}>
    <div class="title"><div>{{ card.item }}</div></div>
    <div class="legend">
    {%- for entry in card.legend %}
      <span><span class="swatch" style="border-top-color:{{ entry.color }};border-top-style:{{ entry.style }}"></span>{{ entry.label }}</span>
    {%- endfor %}
    </div>
    {{ card.svg|safe }}
  </div>
{%- endfor %}
</div>
<div id="empty"{% if not empty_shown %} style="display:none"{% endif %}>{{ empty_message }}</div>
<script>
  (function () {
    var input = document.getElementById('filter');
    var empty = document.getElementById('empty');
    var failed = {{ failed }};
    function apply() {
      if (failed) return;
      var q = input.value.trim().toLowerCase();
      var visible = 0;
      document.querySelectorAll('.card').forEach(function (card) {
        var item = (card.getAttribute('data-item') || '').toLowerCase();
        var show = item.indexOf(q) !== -1;
        card.style.display = show ? '' : 'none';
        if (show) visible++;
      });
      empty.style.display = visible ? 'none' : '';
    }
    input.addEventListener('input', apply);
  })();
</script>
</body>
</html>
"#;

#[derive(Serialize)]
struct LegendView {
    label: String,
    color: String,
    style: &'static str,
}

#[derive(Serialize)]
struct CardView {
    item: String,
    visible: bool,
    legend: Vec<LegendView>,
    svg: String,
}

#[derive(Serialize)]
struct ThemeView {
    background: String,
    card: String,
    border: String,
    title: String,
    muted: String,
}

/// Page options that are not part of the chart configuration.
#[derive(Clone, Debug)]
pub struct PageOptions {
    pub title: String,
    /// Locator shown next to the title.
    pub source: Option<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { title: "Price index YoY".to_string(), source: None }
    }
}

/// Render the display area to HTML. Hidden cards are emitted with
/// `display:none` so the in-page filter can reveal them again.
pub fn render_page(area: &DisplayArea, query: &str, config: &RenderConfig, opts: &PageOptions) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("index.html", PAGE_TEMPLATE)?;
    let template = env.get_template("index.html")?;

    let (cards, empty_shown, empty_message, failed) = match area {
        DisplayArea::Blank => (Vec::new(), true, EMPTY_MESSAGE.to_string(), false),
        DisplayArea::Error(msg) => (Vec::new(), true, msg.clone(), true),
        DisplayArea::Grid(grid) => {
            let cards = grid
                .cards
                .iter()
                .map(|c| CardView {
                    item: c.item().to_string(),
                    visible: c.visible,
                    legend: c
                        .panel
                        .legend
                        .iter()
                        .map(|e| LegendView {
                            label: e.label.clone(),
                            color: e.stroke.color.to_string(),
                            style: if e.stroke.dash.is_some() { "dashed" } else { "solid" },
                        })
                        .collect(),
                    svg: panel_to_svg(&c.panel),
                })
                .collect::<Vec<_>>();
            (cards, grid.empty_shown, EMPTY_MESSAGE.to_string(), false)
        }
    };

    let t = &config.theme;
    let theme = ThemeView {
        background: t.background.to_string(),
        card: t.card.to_string(),
        border: t.border.to_string(),
        title: t.title.to_string(),
        muted: t.muted.to_string(),
    };

    let html = template.render(context! {
        title => &opts.title,
        source => &opts.source,
        query => query.trim(),
        theme => theme,
        cards => cards,
        empty_shown => empty_shown,
        empty_message => empty_message,
        failed => failed,
    })?;
    Ok(html)
}

/// Render and write the page to `path`, creating parent directories.
pub fn write_page(path: &Path, area: &DisplayArea, query: &str, config: &RenderConfig, opts: &PageOptions) -> Result<()> {
    let html = render_page(area, query, config, opts)?;
    let write_err = |source| Error::Write { path: path.display().to_string(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, html).map_err(write_err)
}
