// File: crates/chart-core/src/axis.rs
// Summary: Axis model; tick positions and labels for the year axis and the value axis.

use crate::scale::{format_tick, LinearScale, TimeScale};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    /// Horizontal, ticks hang below the baseline.
    Bottom,
    /// Vertical, ticks point left of the baseline.
    Left,
}

/// One tick: pixel offset along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub pos: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orient: Orient,
    /// Pixel extent of the axis line.
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// One tick per calendar year, labelled `YYYY`.
    pub fn years(x: &TimeScale) -> Self {
        let ticks = x
            .year_ticks()
            .into_iter()
            .map(|t| Tick { pos: x.to_px(t), label: t.format("%Y").to_string() })
            .collect();
        Self { orient: Orient::Bottom, range: (x.r0, x.r1), ticks }
    }

    /// About `count` round values, labelled at the step's precision.
    pub fn values(y: &LinearScale, count: usize) -> Self {
        let precision = y.tick_precision(count);
        let ticks = y
            .ticks(count)
            .into_iter()
            .map(|v| Tick { pos: y.to_px(v), label: format_tick(v, precision) })
            .collect();
        Self { orient: Orient::Left, range: (y.r0, y.r1), ticks }
    }
}
