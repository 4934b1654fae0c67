// File: crates/chart-core/src/record.rs
// Summary: Row parser; coerces one CSV record into a typed price-index record.
// Notes:
// - Numeric fields never fail: empty, missing or non-numeric text becomes NaN.
// - Dates never fail either: an unparsable string yields `None` and the row is
//   dropped later by `RawRecord::validate`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use csv::StringRecord;

/// Column names read from the header row. Extra columns are ignored.
pub const COLUMNS: [&str; 7] = [
    "item",
    "date",
    "index",
    "yoy_q_pct_chg",
    "yoy_e_pct_chg",
    "level_kakei",
    "code_cpi",
];

/// One CSV row after coercion, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    pub item: String,
    pub date: Option<DateTime<Utc>>,
    pub index: f64,
    pub yoy_q_pct_chg: f64,
    pub yoy_e_pct_chg: f64,
    pub level_kakei: f64,
    pub code_cpi: f64,
}

/// A row with a non-empty item and a valid calendar date.
/// Every record past the loader satisfies this.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub item: String,
    pub date: DateTime<Utc>,
    pub index: f64,
    pub yoy_q_pct_chg: f64,
    pub yoy_e_pct_chg: f64,
    pub level_kakei: f64,
    pub code_cpi: f64,
}

impl RawRecord {
    /// Promote to a [`Record`] when the item is non-empty and the date parsed.
    pub fn validate(self) -> Option<Record> {
        if self.item.is_empty() {
            return None;
        }
        let date = self.date?;
        Some(Record {
            item: self.item,
            date,
            index: self.index,
            yoy_q_pct_chg: self.yoy_q_pct_chg,
            yoy_e_pct_chg: self.yoy_e_pct_chg,
            level_kakei: self.level_kakei,
            code_cpi: self.code_cpi,
        })
    }
}

/// Positions of the known columns within a header row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnMap {
    item: Option<usize>,
    date: Option<usize>,
    index: Option<usize>,
    yoy_q: Option<usize>,
    yoy_e: Option<usize>,
    level: Option<usize>,
    code: Option<usize>,
}

impl ColumnMap {
    /// Resolve column positions by exact header name; the first match wins.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            item: find("item"),
            date: find("date"),
            index: find("index"),
            yoy_q: find("yoy_q_pct_chg"),
            yoy_e: find("yoy_e_pct_chg"),
            level: find("level_kakei"),
            code: find("code_cpi"),
        }
    }

    /// Names from [`COLUMNS`] absent from the header row.
    pub fn missing(&self) -> Vec<&'static str> {
        let slots = [self.item, self.date, self.index, self.yoy_q, self.yoy_e, self.level, self.code];
        COLUMNS
            .iter()
            .zip(slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Parse one CSV record. Pure; never fails.
pub fn parse_row(columns: &ColumnMap, rec: &StringRecord) -> RawRecord {
    let field = |i: Option<usize>| i.and_then(|ix| rec.get(ix));
    RawRecord {
        item: field(columns.item).unwrap_or_default().to_string(),
        date: field(columns.date).and_then(parse_date),
        index: parse_number(field(columns.index)),
        yoy_q_pct_chg: parse_number(field(columns.yoy_q)),
        yoy_e_pct_chg: parse_number(field(columns.yoy_e)),
        level_kakei: parse_number(field(columns.level)),
        code_cpi: parse_number(field(columns.code)),
    }
}

/// Missing or empty → NaN; otherwise a float parse with NaN on failure.
/// Only finite values survive: `inf`, `infinity` and `nan` spellings are not numbers here.
pub fn parse_number(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None | Some("") => f64::NAN,
        Some(s) => s.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(f64::NAN),
    }
}

/// Parse an ISO-8601 date or date-time. Date-only forms and date-times
/// without an offset are taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }
    let date = match s.len() {
        4 if s.bytes().all(|b| b.is_ascii_digit()) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        7 => NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
    }?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn numbers_coerce_to_nan() {
        assert!(parse_number(None).is_nan());
        assert!(parse_number(Some("")).is_nan());
        assert!(parse_number(Some("abc")).is_nan());
        assert_eq!(parse_number(Some(" 1.5 ")), 1.5);
        assert_eq!(parse_number(Some("-3e2")), -300.0);
        assert!(parse_number(Some("inf")).is_nan());
        assert!(parse_number(Some("Infinity")).is_nan());
        assert!(parse_number(Some("-infinity")).is_nan());
        assert!(parse_number(Some("NaN")).is_nan());
        assert!(parse_number(Some("1e999")).is_nan());
    }

    #[test]
    fn date_forms() {
        let d = parse_date("2020-03-01").expect("day");
        assert_eq!((d.year(), d.month(), d.day()), (2020, 3, 1));
        let m = parse_date("2021-07").expect("month");
        assert_eq!((m.year(), m.month(), m.day()), (2021, 7, 1));
        let y = parse_date("1999").expect("year");
        assert_eq!((y.year(), y.month()), (1999, 1));
        assert!(parse_date("2020-01-01T09:00:00+09:00").is_some());
        assert!(parse_date("2020-13-01").is_none());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("").is_none());
    }
}
