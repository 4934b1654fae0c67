// File: crates/chart-core/src/series.rs
// Summary: Plot series for one item and the three value channels it carries.
// Notes:
// - A point survives only if at least one channel is a number; channels may
//   still be NaN individually and the line generators break there.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// The three numeric channels plotted on one shared y-axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Index,
    YoyQuantity,
    YoyExpenditure,
}

impl Channel {
    /// All channels in draw order.
    pub const ALL: [Channel; 3] = [Channel::Index, Channel::YoyQuantity, Channel::YoyExpenditure];

    /// Value of this channel on `r` (NaN when missing).
    #[inline]
    pub fn value(self, r: &Record) -> f64 {
        match self {
            Channel::Index => r.index,
            Channel::YoyQuantity => r.yoy_q_pct_chg,
            Channel::YoyExpenditure => r.yoy_e_pct_chg,
        }
    }
}

/// Chronologically ordered points of one item.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSeries {
    pub item: String,
    pub points: Vec<Record>,
}

impl PlotSeries {
    /// Drop points with no plottable channel, then stable-sort by date.
    /// Returns `None` when nothing is left; such items get no card.
    pub fn build(item: &str, records: &[Record]) -> Option<Self> {
        let mut points: Vec<Record> = records
            .iter()
            .filter(|r| Channel::ALL.iter().any(|c| !c.value(r).is_nan()))
            .cloned()
            .collect();
        if points.is_empty() {
            return None;
        }
        points.sort_by_key(|r| r.date);
        Some(Self { item: item.to_string(), points })
    }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// First and last date. Points are sorted, so these are the extent.
    pub fn date_extent(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    /// Min/max over every non-NaN value of all three channels.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut any = false;
        for r in &self.points {
            for c in Channel::ALL {
                let v = c.value(r);
                if v.is_nan() { continue; }
                lo = lo.min(v);
                hi = hi.max(v);
                any = true;
            }
        }
        if any { Some((lo, hi)) } else { None }
    }
}
