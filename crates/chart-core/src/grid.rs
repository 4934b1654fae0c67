// File: crates/chart-core/src/grid.rs
// Summary: Gridline layout helpers.

use crate::axis::Axis;
use crate::geometry::Point;

/// Vertical gridlines at each tick of a bottom axis, spanning `height`
/// from the baseline up to the top of the plot.
pub fn vertical_gridlines(axis: &Axis, height: f64) -> Vec<(Point, Point)> {
    axis.ticks
        .iter()
        .map(|t| (Point::new(t.pos, height), Point::new(t.pos, 0.0)))
        .collect()
}
