// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia raster render target; draws chart-core panels on CPU surfaces and encodes PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_core::file_stem;
use chart_core::geometry::Point;
use chart_core::target::{Anchor, Panel, Primitive, RenderTarget, Role};
use chart_core::theme::{Color, Stroke};
use skia_safe as skia;

pub mod text;

pub use text::{Face, TextShaper};

/// Options for raster output.
pub struct RasterOptions {
    /// Pixel density multiplier applied to the panel's canvas size.
    pub scale: f32,
    pub background: Color,
    /// Draw the item name in the top margin.
    pub draw_title: bool,
    /// Text output depends on installed fonts; tests switch it off.
    pub draw_labels: bool,
    pub title_color: Color,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: Color::rgb(0x17, 0x1a, 0x21),
            draw_title: true,
            draw_labels: true,
            title_color: Color::rgb(0xe8, 0xec, 0xf3),
        }
    }
}

/// Collects one PNG per panel.
pub struct SkiaTarget {
    opts: RasterOptions,
    text: Option<TextShaper>,
    surface: Option<skia::Surface>,
    current: String,
    done: Vec<(String, Vec<u8>)>,
}

impl SkiaTarget {
    pub fn new(opts: RasterOptions) -> Self {
        let text = (opts.draw_labels || opts.draw_title).then(TextShaper::new);
        Self { opts, text, surface: None, current: String::new(), done: Vec::new() }
    }

    /// `(item, png bytes)` in panel order.
    pub fn into_pngs(self) -> Vec<(String, Vec<u8>)> { self.done }
}

#[inline]
fn sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

#[inline]
fn sk_point(p: Point) -> skia::Point {
    skia::Point::new(p.x as f32, p.y as f32)
}

fn stroke_paint(s: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(s.width as f32);
    paint.set_color(sk_color(s.color));
    paint.set_alpha_f(s.opacity as f32);
    if let Some(dash) = &s.dash {
        let intervals: Vec<f32> = dash.iter().map(|v| *v as f32).collect();
        if let Some(effect) = skia::PathEffect::dash(&intervals, 0.0) {
            paint.set_path_effect(effect);
        }
    }
    paint
}

impl RenderTarget for SkiaTarget {
    type Error = anyhow::Error;

    fn begin_panel(&mut self, panel: &Panel) -> Result<()> {
        let s = &panel.scene;
        let k = self.opts.scale.max(0.1);
        let w = (s.width as f32 * k).round() as i32;
        let h = (s.height as f32 * k).round() as i32;
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(sk_color(s.background.unwrap_or(self.opts.background)));
        canvas.scale((k, k));
        if self.opts.draw_title {
            if let Some(text) = &self.text {
                let baseline = (s.origin.y as f32 * 0.7).max(10.0);
                text.draw(canvas, &panel.item, (s.origin.x as f32, baseline), Anchor::Start, 12.0, sk_color(self.opts.title_color), Face::Ui);
            }
        }
        canvas.translate((s.origin.x as f32, s.origin.y as f32));
        self.current = panel.item.clone();
        self.surface = Some(surface);
        Ok(())
    }

    fn draw(&mut self, primitive: &Primitive) -> Result<()> {
        let surface = self.surface.as_mut().context("draw called outside a panel")?;
        let canvas = surface.canvas();
        match primitive {
            Primitive::Line { from, to, stroke, .. } => {
                canvas.draw_line(sk_point(*from), sk_point(*to), &stroke_paint(stroke));
            }
            Primitive::Path { runs, stroke, role } => {
                let paint = stroke_paint(stroke);
                let mut path = skia::Path::new();
                for run in runs {
                    let Some((first, rest)) = run.split_first() else { continue };
                    path.move_to(sk_point(*first));
                    for p in rest {
                        path.line_to(sk_point(*p));
                    }
                    if rest.is_empty() && matches!(role, Role::Series(_)) {
                        // lone point: draw a dot so the sample stays visible
                        let mut dot = paint.clone();
                        dot.set_style(skia::paint::Style::Fill);
                        canvas.draw_circle(sk_point(*first), stroke.width as f32, &dot);
                    }
                }
                canvas.draw_path(&path, &paint);
            }
            Primitive::Text { at, text, anchor, color, size, .. } => {
                if self.opts.draw_labels {
                    if let Some(shaper) = &self.text {
                        shaper.draw(canvas, text, (at.x as f32, at.y as f32), *anchor, *size as f32, sk_color(*color), Face::Numeric);
                    }
                }
            }
        }
        Ok(())
    }

    fn end_panel(&mut self) -> Result<()> {
        let mut surface = self.surface.take().context("end_panel called outside a panel")?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        self.done.push((std::mem::take(&mut self.current), data.as_bytes().to_vec()));
        Ok(())
    }
}

/// Render one panel to PNG bytes.
pub fn render_panel_png(panel: &Panel, opts: RasterOptions) -> Result<Vec<u8>> {
    let mut target = SkiaTarget::new(opts);
    panel.draw(&mut target)?;
    target
        .into_pngs()
        .pop()
        .map(|(_, bytes)| bytes)
        .context("no panel rendered")
}

/// Write `<dir>/<NNN>_<item>.png` for every panel; returns the written paths.
pub fn write_pngs<'a>(panels: impl IntoIterator<Item = &'a Panel>, dir: &Path, opts: RasterOptions) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut target = SkiaTarget::new(opts);
    for panel in panels {
        panel.draw(&mut target)?;
    }
    let mut written = Vec::new();
    for (i, (item, bytes)) in target.into_pngs().into_iter().enumerate() {
        let path = dir.join(format!("{:03}_{}.png", i + 1, file_stem(&item)));
        std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
