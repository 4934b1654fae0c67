// File: crates/chart-core/src/chart.rs
// Summary: Chart renderer; turns one plot series into a scene of axes, gridlines and line paths.
//
// All three channels share one y scale. Draw order:
//   gridlines -> y axis -> zero line -> visible channel lines -> x axis

use crate::axis::{Axis, Orient};
use crate::geometry::Point;
use crate::grid::vertical_gridlines;
use crate::record::Record;
use crate::scale::{padded_domain, LinearScale, TimeScale, NICE_COUNT};
use crate::series::{Channel, PlotSeries};
use crate::target::{Anchor, ChannelLine, ChartScene, LegendEntry, Panel, Primitive, Role};
use crate::theme::{RenderConfig, Stroke};

/// Label baseline shifts, in ems, that centre text on its tick.
const LEFT_LABEL_DY: f64 = 0.32;
const BOTTOM_LABEL_DY: f64 = 0.71;
/// Gap between a tick mark and its label.
const LABEL_GAP: f64 = 3.0;

pub struct Chart<'a> {
    pub series: &'a PlotSeries,
    pub config: &'a RenderConfig,
}

impl<'a> Chart<'a> {
    pub fn new(series: &'a PlotSeries, config: &'a RenderConfig) -> Self {
        Self { series, config }
    }

    /// Date extent onto `[0, inner width]`.
    pub fn x_scale(&self) -> TimeScale {
        let extent = self.series.date_extent().unwrap_or_default();
        TimeScale::new(extent, (0.0, self.config.layout.inner_width()))
    }

    /// Shared value scale, padded if degenerate, niced, inverted onto the inner height.
    pub fn y_scale(&self) -> LinearScale {
        let domain = padded_domain(self.series.value_extent());
        LinearScale::new(domain, (self.config.layout.inner_height(), 0.0)).nice(NICE_COUNT)
    }

    /// Build the full scene for this series.
    pub fn render(&self) -> ChartScene {
        let cfg = self.config;
        let layout = cfg.layout;
        let plot = layout.plot_rect();
        let (iw, ih) = (plot.width(), plot.height());
        let x = self.x_scale();
        let y = self.y_scale();
        let x_axis = Axis::years(&x);
        let y_axis = Axis::values(&y, cfg.y_ticks);

        let mut prims = Vec::new();

        let grid = Stroke::solid(cfg.theme.grid, 1.0);
        for (from, to) in vertical_gridlines(&x_axis, ih) {
            prims.push(Primitive::Line { role: Role::Gridline, from, to, stroke: grid.clone() });
        }

        push_axis(&mut prims, &y_axis, 0.0, cfg);

        let zy = y.to_px(0.0);
        prims.push(Primitive::Line {
            role: Role::ZeroLine,
            from: Point::new(0.0, zy),
            to: Point::new(iw, zy),
            stroke: cfg.zero_line.clone(),
        });

        let lines: Vec<ChannelLine> = Channel::ALL
            .into_iter()
            .map(|c| ChannelLine {
                channel: c,
                runs: line_runs(&self.series.points, c, &x, &y),
                visible: cfg.channel(c).visible,
            })
            .collect();
        for l in lines.iter().filter(|l| l.visible && !l.runs.is_empty()) {
            prims.push(Primitive::Path {
                role: Role::Series(l.channel),
                runs: l.runs.clone(),
                stroke: cfg.channel(l.channel).stroke.clone(),
            });
        }

        push_axis(&mut prims, &x_axis, ih, cfg);

        ChartScene {
            width: layout.width,
            height: layout.height,
            origin: Point::new(layout.insets.left as f64, layout.insets.top as f64),
            background: None,
            primitives: prims,
            lines,
            y_domain: y.domain(),
        }
    }

    /// Scene plus title and legend of the visible channels.
    pub fn panel(&self) -> Panel {
        let legend = self
            .config
            .visible_channels()
            .map(|c| {
                let style = self.config.channel(c);
                LegendEntry { label: style.label.clone(), stroke: style.stroke.clone() }
            })
            .collect();
        Panel { item: self.series.item.clone(), legend, scene: self.render() }
    }
}

/// Points of one channel split into runs at NaN values.
pub fn line_runs(points: &[Record], channel: Channel, x: &TimeScale, y: &LinearScale) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut run: Vec<Point> = Vec::new();
    for r in points {
        let v = channel.value(r);
        if v.is_nan() {
            if !run.is_empty() {
                runs.push(std::mem::take(&mut run));
            }
            continue;
        }
        run.push(Point::new(x.to_px(r.date), y.to_px(v)));
    }
    if !run.is_empty() {
        runs.push(run);
    }
    runs
}

/// Axis line with outer ticks, tick marks and labels. `at` is the cross
/// position of the axis line (x for a left axis, y for a bottom axis).
fn push_axis(prims: &mut Vec<Primitive>, axis: &Axis, at: f64, cfg: &RenderConfig) {
    let ts = cfg.tick_size;
    let stroke = Stroke::solid(cfg.theme.axis_line, 1.0);
    let (r0, r1) = axis.range;
    let color = cfg.theme.axis_label;
    let size = cfg.font_size;
    match axis.orient {
        Orient::Left => {
            let domain = vec![
                Point::new(at - ts, r0),
                Point::new(at, r0),
                Point::new(at, r1),
                Point::new(at - ts, r1),
            ];
            prims.push(Primitive::Path { role: Role::AxisDomain, runs: vec![domain], stroke: stroke.clone() });
            for t in &axis.ticks {
                prims.push(Primitive::Line {
                    role: Role::AxisTick,
                    from: Point::new(at, t.pos),
                    to: Point::new(at - ts, t.pos),
                    stroke: stroke.clone(),
                });
                prims.push(Primitive::Text {
                    role: Role::AxisLabel,
                    at: Point::new(at - ts - LABEL_GAP, t.pos + LEFT_LABEL_DY * size),
                    text: t.label.clone(),
                    anchor: Anchor::End,
                    color,
                    size,
                });
            }
        }
        Orient::Bottom => {
            let domain = vec![
                Point::new(r0, at + ts),
                Point::new(r0, at),
                Point::new(r1, at),
                Point::new(r1, at + ts),
            ];
            prims.push(Primitive::Path { role: Role::AxisDomain, runs: vec![domain], stroke: stroke.clone() });
            for t in &axis.ticks {
                prims.push(Primitive::Line {
                    role: Role::AxisTick,
                    from: Point::new(t.pos, at),
                    to: Point::new(t.pos, at + ts),
                    stroke: stroke.clone(),
                });
                prims.push(Primitive::Text {
                    role: Role::AxisLabel,
                    at: Point::new(t.pos, at + ts + LABEL_GAP + BOTTOM_LABEL_DY * size),
                    text: t.label.clone(),
                    anchor: Anchor::Middle,
                    color,
                    size,
                });
            }
        }
    }
}
