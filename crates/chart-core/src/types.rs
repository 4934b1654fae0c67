// File: crates/chart-core/src/types.rs
// Summary: Shared layout types and constants (canvas size, margins).

use serde::Deserialize;

use crate::geometry::Rect;

/// Default panel width in pixels.
pub const WIDTH: u32 = 520;
/// Default panel height in pixels.
pub const HEIGHT: u32 = 220;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(46, 42, 22, 30)
    }
}

/// Fixed canvas of one chart panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, insets: Insets::default() }
    }
}

impl ChartLayout {
    /// Drawable width inside the margins.
    pub fn inner_width(&self) -> f64 { self.width.saturating_sub(self.insets.hsum()) as f64 }
    /// Drawable height inside the margins.
    pub fn inner_height(&self) -> f64 { self.height.saturating_sub(self.insets.vsum()) as f64 }
    /// Plot area in panel-local coordinates (origin at the inner top-left).
    pub fn plot_rect(&self) -> Rect {
        Rect::from_ltwh(0.0, 0.0, self.inner_width(), self.inner_height())
    }
}
