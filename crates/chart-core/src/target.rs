// File: crates/chart-core/src/target.rs
// Summary: Renderer-agnostic scene model (panels and primitives) and the render target trait.

use crate::geometry::Point;
use crate::series::Channel;
use crate::theme::{Color, Stroke};

/// What a primitive depicts; lets targets and tests tell parts apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Gridline,
    AxisDomain,
    AxisTick,
    AxisLabel,
    ZeroLine,
    Series(Channel),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Drawing primitive in plot-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line { role: Role, from: Point, to: Point, stroke: Stroke },
    /// Open polyline made of separate runs; gaps between runs are not drawn.
    Path { role: Role, runs: Vec<Vec<Point>>, stroke: Stroke },
    Text { role: Role, at: Point, text: String, anchor: Anchor, color: Color, size: f64 },
}

impl Primitive {
    pub fn role(&self) -> Role {
        match self {
            Primitive::Line { role, .. } | Primitive::Path { role, .. } | Primitive::Text { role, .. } => *role,
        }
    }
}

/// Geometry of one channel's line generator.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelLine {
    pub channel: Channel,
    pub runs: Vec<Vec<Point>>,
    pub visible: bool,
}

/// One legend entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub stroke: Stroke,
}

/// A rendered chart: canvas size, plot offset and primitives in draw order.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartScene {
    pub width: u32,
    pub height: u32,
    /// Translation from panel to plot-local coordinates (left/top margins).
    pub origin: Point,
    pub background: Option<Color>,
    pub primitives: Vec<Primitive>,
    /// All three line generators, drawn or not.
    pub lines: Vec<ChannelLine>,
    pub y_domain: (f64, f64),
}

impl ChartScene {
    pub fn primitives_with(&self, role: Role) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.role() == role)
    }

    pub fn line(&self, channel: Channel) -> Option<&ChannelLine> {
        self.lines.iter().find(|l| l.channel == channel)
    }
}

/// Card contents for one item: title, legend and chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub item: String,
    pub legend: Vec<LegendEntry>,
    pub scene: ChartScene,
}

impl Panel {
    /// Replay this panel onto `target`.
    pub fn draw<T: RenderTarget + ?Sized>(&self, target: &mut T) -> Result<(), T::Error> {
        target.begin_panel(self)?;
        for p in &self.scene.primitives {
            target.draw(p)?;
        }
        target.end_panel()
    }
}

/// A surface panels can be drawn onto (SVG text, raster image, test recorder).
pub trait RenderTarget {
    type Error;
    /// Start a panel; `panel` carries title, legend and canvas size.
    fn begin_panel(&mut self, panel: &Panel) -> Result<(), Self::Error>;
    fn draw(&mut self, primitive: &Primitive) -> Result<(), Self::Error>;
    fn end_panel(&mut self) -> Result<(), Self::Error>;
}
