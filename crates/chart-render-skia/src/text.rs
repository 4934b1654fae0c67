// File: crates/chart-render-skia/src/text.rs
// Summary: Axis-label and title text through Skia textlayout, aligned like SVG text-anchor.

use chart_core::target::Anchor;
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

/// Font family preference lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    /// Tabular digits so tick labels line up.
    Numeric,
    Ui,
}

impl Face {
    fn families(self) -> &'static [&'static str] {
        match self {
            Face::Numeric => &["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"],
            Face::Ui => &["Segoe UI", "Helvetica", "Arial", "DejaVu Sans", "sans-serif"],
        }
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fonts = FontCollection::new();
        fonts.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts }
    }

    /// Single-line paragraph.
    pub fn shape(&self, text: &str, size: f32, color: skia::Color, face: Face) -> Paragraph {
        let mut para = ParagraphStyle::new();
        para.set_text_align(TextAlign::Left);
        para.set_max_lines(1);
        let mut style = TextStyle::new();
        style.set_font_size(size.max(1.0));
        style.set_color(color);
        style.set_font_families(face.families());

        let mut builder = ParagraphBuilder::new(&para, &self.fonts);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint `text` with its baseline at `y`; `anchor` picks which edge sits on `x`.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, (x, y): (f32, f32), anchor: Anchor, size: f32, color: skia::Color, face: Face) {
        let paragraph = self.shape(text, size, color, face);
        let w = paragraph.longest_line();
        let left = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - w * 0.5,
            Anchor::End => x - w,
        };
        // paragraphs paint from their top edge
        let top = y - paragraph.alphabetic_baseline();
        paragraph.paint(canvas, (left, top));
    }
}
