// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming and per-channel render configuration.
// Notes:
// - `RenderConfig` is resolved once at startup (preset + optional JSON file)
//   and passed by reference into the renderer; nothing reads styles globally.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::series::Channel;
use crate::types::ChartLayout;

/// 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn parse_hex(s: &str) -> Result<Self, ConfigError> {
        let bad = || ConfigError::Color(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        let nib = |i: usize| u8::from_str_radix(hex.get(i..i + 1).ok_or_else(bad)?, 16).map_err(|_| bad());
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2).ok_or_else(bad)?, 16).map_err(|_| bad());
        match hex.len() {
            3 => Ok(Self::rgb(nib(0)? * 17, nib(1)? * 17, nib(2)? * 17)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Color::parse_hex(&s) }
}

impl From<Color> for String {
    fn from(c: Color) -> Self { c.to_string() }
}

/// Stroke appearance of a line or path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash pattern in pixels (on, off, ...); `None` draws solid.
    #[serde(default)]
    pub dash: Option<Vec<f64>>,
    #[serde(default = "opaque")]
    pub opacity: f64,
}

fn opaque() -> f64 { 1.0 }

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None, opacity: 1.0 }
    }
    pub fn dashed(color: Color, width: f64, dash: &[f64]) -> Self {
        Self { color, width, dash: Some(dash.to_vec()), opacity: 1.0 }
    }
    /// `"5,3"`-style dash attribute value.
    pub fn dash_attr(&self) -> Option<String> {
        self.dash.as_ref().map(|d| d.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(","))
    }
}

/// How one channel is drawn and labelled.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelStyle {
    pub label: String,
    pub stroke: Stroke,
    /// Hidden channels are still computed, just not drawn or listed in the legend.
    pub visible: bool,
}

/// Surface colours shared by every panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub card: Color,
    pub border: Color,
    pub grid: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub title: Color,
    pub muted: Color,
    pub zero_line: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(0x0f, 0x11, 0x15),
            card: Color::rgb(0x17, 0x1a, 0x21),
            border: Color::rgb(0x2a, 0x2f, 0x3a),
            grid: Color::rgb(0x2c, 0x31, 0x3c),
            axis_line: Color::rgb(0x8a, 0x93, 0xa6),
            axis_label: Color::rgb(0xb4, 0xbc, 0xcc),
            title: Color::rgb(0xe8, 0xec, 0xf3),
            muted: Color::rgb(0x8a, 0x93, 0xa6),
            zero_line: Color::rgb(0xff, 0xff, 0xff),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::rgb(0xf6, 0xf7, 0xf9),
            card: Color::rgb(0xff, 0xff, 0xff),
            border: Color::rgb(0xdd, 0xe1, 0xe8),
            grid: Color::rgb(0xe6, 0xe8, 0xee),
            axis_line: Color::rgb(0x5a, 0x62, 0x72),
            axis_label: Color::rgb(0x3c, 0x43, 0x50),
            title: Color::rgb(0x14, 0x18, 0x1f),
            muted: Color::rgb(0x6b, 0x72, 0x80),
            zero_line: Color::rgb(0x33, 0x33, 0x33),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}

/// Everything the chart renderer needs besides the data.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub layout: ChartLayout,
    pub theme: Theme,
    pub index: ChannelStyle,
    pub yoy_quantity: ChannelStyle,
    pub yoy_expenditure: ChannelStyle,
    pub zero_line: Stroke,
    /// Requested y-axis tick count.
    pub y_ticks: usize,
    /// Tick mark length for both axes.
    pub tick_size: f64,
    pub font_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::with_theme(Theme::dark())
    }
}

impl RenderConfig {
    /// Defaults for every channel, surfaces from `theme`.
    pub fn with_theme(theme: Theme) -> Self {
        let mut zero_line = Stroke::dashed(theme.zero_line, 1.5, &[6.0, 3.0]);
        zero_line.opacity = 0.9;
        Self {
            layout: ChartLayout::default(),
            theme,
            index: ChannelStyle {
                label: "YoY index".into(),
                stroke: Stroke::solid(Color::rgb(0x4a, 0xa3, 0xff), 1.6),
                visible: true,
            },
            yoy_quantity: ChannelStyle {
                label: "YoY quantity(%)".into(),
                stroke: Stroke::dashed(Color::rgb(0xff, 0xd1, 0x66), 1.4, &[5.0, 3.0]),
                visible: true,
            },
            yoy_expenditure: ChannelStyle {
                label: "YoY expenditure(%)".into(),
                stroke: Stroke::solid(Color::rgb(0xef, 0x47, 0x6f), 1.4),
                visible: false,
            },
            zero_line,
            y_ticks: 5,
            tick_size: 6.0,
            font_size: 10.0,
        }
    }

    pub fn channel(&self, c: Channel) -> &ChannelStyle {
        match c {
            Channel::Index => &self.index,
            Channel::YoyQuantity => &self.yoy_quantity,
            Channel::YoyExpenditure => &self.yoy_expenditure,
        }
    }

    fn channel_mut(&mut self, c: Channel) -> &mut ChannelStyle {
        match c {
            Channel::Index => &mut self.index,
            Channel::YoyQuantity => &mut self.yoy_quantity,
            Channel::YoyExpenditure => &mut self.yoy_expenditure,
        }
    }

    /// Channels drawn as paths, in draw order.
    pub fn visible_channels(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL.into_iter().filter(|c| self.channel(*c).visible)
    }

    /// Apply a parsed config file on top of this config.
    pub fn apply(&mut self, file: ConfigFile) {
        if let Some(name) = file.theme.as_deref() {
            let zero_was_theme = self.zero_line.color == self.theme.zero_line;
            self.theme = find(name);
            if zero_was_theme { self.zero_line.color = self.theme.zero_line; }
        }
        if let Some(layout) = file.layout { self.layout = layout; }
        if let Some(n) = file.y_ticks { self.y_ticks = n; }
        if let Some(z) = file.zero_line { self.zero_line = z; }
        for (channel, o) in file.channels {
            let style = self.channel_mut(channel);
            if let Some(label) = o.label { style.label = label; }
            if let Some(color) = o.color { style.stroke.color = color; }
            if let Some(width) = o.width { style.stroke.width = width; }
            if let Some(dash) = o.dash { style.stroke.dash = if dash.is_empty() { None } else { Some(dash) }; }
            if let Some(visible) = o.visible { style.visible = visible; }
        }
    }

    /// Preset `theme` plus an optional JSON config file.
    pub fn load(theme: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = Self::with_theme(find(theme));
        if let Some(path) = path {
            let text = std::fs::read_to_string(path)
                .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
            cfg.apply(serde_json::from_str(&text)?);
        }
        Ok(cfg)
    }
}

/// Optional overrides read from a JSON config file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub theme: Option<String>,
    pub layout: Option<ChartLayout>,
    pub y_ticks: Option<usize>,
    pub zero_line: Option<Stroke>,
    pub channels: HashMap<Channel, ChannelOverride>,
}

/// Per-channel override; unset fields keep the current value.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelOverride {
    pub label: Option<String>,
    pub color: Option<Color>,
    pub width: Option<f64>,
    pub dash: Option<Vec<f64>>,
    pub visible: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours() {
        assert_eq!(Color::parse_hex("#4aa3ff").unwrap(), Color::rgb(0x4a, 0xa3, 0xff));
        assert_eq!(Color::parse_hex("#fff").unwrap(), Color::rgb(255, 255, 255));
        assert!(Color::parse_hex("4aa3ff").is_err());
        assert!(Color::parse_hex("#12345").is_err());
        assert_eq!(Color::rgb(0xef, 0x47, 0x6f).to_string(), "#ef476f");
    }

    #[test]
    fn third_channel_hidden_by_default() {
        let cfg = RenderConfig::default();
        let visible: Vec<_> = cfg.visible_channels().collect();
        assert_eq!(visible, vec![Channel::Index, Channel::YoyQuantity]);
    }
}
