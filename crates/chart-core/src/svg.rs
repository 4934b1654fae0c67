// File: crates/chart-core/src/svg.rs
// Summary: SVG render target; serialises panels into standalone `<svg>` documents.

use std::convert::Infallible;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::target::{Anchor, Panel, Primitive, RenderTarget};
use crate::theme::Stroke;

/// Collects one `<svg>` string per panel.
#[derive(Debug, Default)]
pub struct SvgTarget {
    current: String,
    done: Vec<String>,
}

impl SvgTarget {
    pub fn new() -> Self { Self::default() }

    /// Finished documents in panel order.
    pub fn into_documents(self) -> Vec<String> { self.done }
}

/// Render a single panel to an SVG document.
pub fn panel_to_svg(panel: &Panel) -> String {
    let mut t = SvgTarget::new();
    match panel.draw(&mut t) {
        Ok(()) => t.into_documents().pop().unwrap_or_default(),
        Err(never) => match never {},
    }
}

/// File-system friendly name for an item.
pub fn file_stem(item: &str) -> String {
    let stem: String = item
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() { "item".to_string() } else { stem }
}

/// Write `<dir>/<NNN>_<item>.svg` for every panel, numbered in display order.
pub fn write_svgs<'a>(panels: impl IntoIterator<Item = &'a Panel>, dir: &Path) -> Result<Vec<PathBuf>> {
    let write_err = |path: &Path| {
        let path = path.display().to_string();
        move |source| Error::Write { path, source }
    };
    std::fs::create_dir_all(dir).map_err(write_err(dir))?;
    let mut written = Vec::new();
    for (i, panel) in panels.into_iter().enumerate() {
        let path = dir.join(format!("{:03}_{}.svg", i + 1, file_stem(&panel.item)));
        std::fs::write(&path, panel_to_svg(panel)).map_err(write_err(&path))?;
        written.push(path);
    }
    Ok(written)
}

impl RenderTarget for SvgTarget {
    type Error = Infallible;

    fn begin_panel(&mut self, panel: &Panel) -> std::result::Result<(), Self::Error> {
        let s = &panel.scene;
        self.current.clear();
        let _ = write!(
            self.current,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" preserveAspectRatio="xMinYMin meet" role="img" aria-label="{label}">"#,
            w = s.width,
            h = s.height,
            label = escape(&panel.item),
        );
        if let Some(bg) = s.background {
            let _ = write!(self.current, r#"<rect width="100%" height="100%" fill="{bg}"/>"#);
        }
        let _ = write!(self.current, r#"<g transform="translate({},{})">"#, num(s.origin.x), num(s.origin.y));
        Ok(())
    }

    fn draw(&mut self, primitive: &Primitive) -> std::result::Result<(), Self::Error> {
        let out = &mut self.current;
        match primitive {
            Primitive::Line { from, to, stroke, .. } => {
                let _ = write!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y),
                    stroke_attrs(stroke),
                );
            }
            Primitive::Path { runs, stroke, .. } => {
                let _ = write!(out, r#"<path fill="none" d="{}"{}/>"#, path_data(runs), stroke_attrs(stroke));
            }
            Primitive::Text { at, text, anchor, color, size, .. } => {
                let anchor = match anchor {
                    Anchor::Start => "start",
                    Anchor::Middle => "middle",
                    Anchor::End => "end",
                };
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" fill="{color}" font-size="{}" text-anchor="{anchor}">{}</text>"#,
                    num(at.x),
                    num(at.y),
                    num(*size),
                    escape(text),
                );
            }
        }
        Ok(())
    }

    fn end_panel(&mut self) -> std::result::Result<(), Self::Error> {
        self.current.push_str("</g></svg>");
        self.done.push(std::mem::take(&mut self.current));
        Ok(())
    }
}

/// `M x,y L x,y ...` per run; a lone point closes on itself so it stays visible.
pub fn path_data(runs: &[Vec<Point>]) -> String {
    let mut d = String::new();
    for run in runs {
        for (i, p) in run.iter().enumerate() {
            let _ = write!(d, "{}{},{}", if i == 0 { 'M' } else { 'L' }, num(p.x), num(p.y));
        }
        if run.len() == 1 {
            d.push('Z');
        }
    }
    d
}

fn stroke_attrs(s: &Stroke) -> String {
    let mut a = format!(r#" stroke="{}" stroke-width="{}""#, s.color, num(s.width));
    if let Some(dash) = s.dash_attr() {
        let _ = write!(a, r#" stroke-dasharray="{dash}""#);
    }
    if s.opacity < 1.0 {
        let _ = write!(a, r#" opacity="{}""#, num(s.opacity));
    }
    a
}

/// Up to three decimals, trailing zeros trimmed.
pub fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Escape text for element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.25), "1.25");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(432.0), "432");
        assert_eq!(num(2.00049), "2");
    }

    #[test]
    fn path_runs() {
        let runs = vec![
            vec![Point::new(0.0, 1.0), Point::new(2.0, 3.0)],
            vec![Point::new(5.0, 5.5)],
        ];
        assert_eq!(path_data(&runs), "M0,1L2,3M5,5.5Z");
    }

    #[test]
    fn one_document_per_panel() {
        use crate::{dataset::parse_csv, Chart, PlotSeries, RenderConfig};
        let ds = parse_csv("item,date,index\nA,2020-01-01,1\nB,2021-01-01,2\n").unwrap();
        let cfg = RenderConfig::default();
        let mut t = SvgTarget::new();
        for item in ["A", "B"] {
            let recs: Vec<_> = ds.records.iter().filter(|r| r.item == item).cloned().collect();
            let series = PlotSeries::build(item, &recs).unwrap();
            Chart::new(&series, &cfg).panel().draw(&mut t).unwrap();
        }
        let docs = t.into_documents();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].contains(r#"aria-label="A""#));
        assert!(docs[1].contains(r#"aria-label="B""#));
        assert!(docs.iter().all(|d| d.ends_with("</g></svg>")));
    }

    #[test]
    fn stems() {
        assert_eq!(file_stem("Tea/Green leaf"), "Tea_Green_leaf");
        assert_eq!(file_stem(""), "item");
    }

    #[test]
    fn escaping() {
        assert_eq!(escape(r#"A&B <"x">"#), "A&amp;B &lt;&quot;x&quot;&gt;");
    }
}
