// File: crates/chart-core/src/scale.rs
// Summary: Time (X) and value (Y) scale transforms, domain nicing and tick generation.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Default tick count used when nicing a value domain.
pub const NICE_COUNT: usize = 10;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Continuous UTC time scale mapping a date extent onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub d0: DateTime<Utc>,
    pub d1: DateTime<Utc>,
    pub r0: f64,
    pub r1: f64,
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    /// A zero-width domain maps every date to the middle of the range.
    #[inline]
    pub fn to_px(&self, t: DateTime<Utc>) -> f64 {
        let span = (self.d1 - self.d0).num_milliseconds() as f64;
        let frac = if span == 0.0 { 0.5 } else { (t - self.d0).num_milliseconds() as f64 / span };
        self.r0 + frac * (self.r1 - self.r0)
    }

    /// January 1st (UTC) of every year inside the domain, bounds inclusive.
    pub fn year_ticks(&self) -> Vec<DateTime<Utc>> {
        let (lo, hi) = if self.d0 <= self.d1 { (self.d0, self.d1) } else { (self.d1, self.d0) };
        let mut out = Vec::new();
        let first = if is_year_start(lo) { lo.year() } else { lo.year() + 1 };
        for y in first..=hi.year() {
            if let Some(t) = year_start(y) {
                if t >= lo && t <= hi { out.push(t); }
            }
        }
        out
    }
}

fn year_start(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}

fn is_year_start(t: DateTime<Utc>) -> bool {
    year_start(t.year()) == Some(t)
}

/// Linear value scale; `r0` is the pixel of `d0`. Y axes pass an inverted
/// range (`r0 = inner height`, `r1 = 0`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f64,
    pub r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        let span = self.d1 - self.d0;
        let frac = if span == 0.0 { 0.5 } else { (v - self.d0) / span };
        self.r0 + frac * (self.r1 - self.r0)
    }

    pub fn domain(&self) -> (f64, f64) { (self.d0, self.d1) }

    /// Extend the domain outward to round tick boundaries.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = nice_domain(self.d0, self.d1, count);
        self.d0 = d0;
        self.d1 = d1;
        self
    }

    /// Roughly `count` round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.d0, self.d1, count)
    }

    /// Decimal places for labels of `ticks(count)`.
    pub fn tick_precision(&self, count: usize) -> usize {
        precision_fixed(tick_step(self.d0, self.d1, count))
    }
}

/// Value domain over all channels, padded when degenerate, before nicing.
/// A single value `v` becomes `v ± 5%·|v|`, or `[-1, 1]` when `v == 0`;
/// no values at all gives `[0, 1]`.
pub fn padded_domain(extent: Option<(f64, f64)>) -> (f64, f64) {
    let Some((mut lo, mut hi)) = extent else { return (0.0, 1.0) };
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        lo -= pad;
        hi += pad;
    }
    (lo, hi)
}

/// `floor(x + 0.5)`: halves round toward +inf.
#[inline]
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Returns `(i1, i2, inc)`: tick indices and increment. A negative `inc`
/// means the step is `1 / -inc` (keeps sub-unit steps exact).
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 { 10.0 } else if error >= E5 { 5.0 } else if error >= E2 { 2.0 } else { 1.0 };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * k);
        i2 = round_half_up(stop * k);
        if i1 / k < start { i1 += 1.0; }
        if i2 / k > stop { i2 -= 1.0; }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = round_half_up(start / k);
        i2 = round_half_up(stop / k);
        if i1 * k < start { i1 += 1.0; }
        if i2 * k > stop { i2 -= 1.0; }
        inc = k;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Signed tick increment (see `tick_spec`).
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Positive tick step between `start` and `stop`.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse { tick_increment(stop, start, count) } else { tick_increment(start, stop, count) };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Round tick values between `start` and `stop`, inclusive.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect();
    if reverse { out.reverse(); }
    out
}

/// Widen `[start, stop]` to multiples of the tick step. Iterates until the
/// step settles, at most ten rounds.
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut prestep: Option<f64> = None;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if prestep == Some(step) {
            break;
        } else if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        prestep = Some(step);
    }
    if reverse { (hi, lo) } else { (lo, hi) }
}

/// Decimal places needed to show multiples of `step` exactly.
pub fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    let exp = step.log10().floor() as i32;
    (-exp).max(0) as usize
}

/// Fixed-precision label with thousands grouping and a typographic minus.
/// Values that round to zero drop their sign.
pub fn format_tick(v: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, v.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body.as_str(), None),
    };
    let mut grouped = String::with_capacity(body.len() + body.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(f) = frac_part {
        grouped.push('.');
        grouped.push_str(f);
    }
    let is_zero = body.bytes().all(|b| b == b'0' || b == b'.');
    if v < 0.0 && !is_zero {
        format!("\u{2212}{grouped}")
    } else {
        grouped
    }
}
