// File: crates/chart-core/src/group.rs
// Summary: Groups records by item and orders items for display.
//
// Display order, each level breaking ties of the previous one:
//   1. items whose max `level_kakei` is 3 come first;
//   2. ascending min `code_cpi`, items without one last;
//   3. ascending item name.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::record::Record;

/// The featured classification level.
pub const FEATURED_LEVEL: f64 = 3.0;

/// Per-item ordering attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSortKey {
    /// Max `level_kakei`; missing values count as 0.
    pub level: f64,
    /// Min `code_cpi`; missing, unparsable and zero codes count as +inf.
    pub cpi: f64,
}

impl ItemSortKey {
    pub fn from_records(records: &[Record]) -> Self {
        let level = records
            .iter()
            .map(|r| if r.level_kakei.is_nan() { 0.0 } else { r.level_kakei })
            .fold(f64::NEG_INFINITY, f64::max);
        let cpi = records
            .iter()
            .map(|r| if r.code_cpi.is_nan() || r.code_cpi == 0.0 { f64::INFINITY } else { r.code_cpi })
            .fold(f64::INFINITY, f64::min);
        // empty group
        let level = if level == f64::NEG_INFINITY { 0.0 } else { level };
        Self { level, cpi }
    }

    /// 0 for the featured tier, 1 otherwise.
    #[inline]
    pub fn rank(&self) -> u8 {
        if self.level == FEATURED_LEVEL { 0 } else { 1 }
    }
}

/// An item name with its sort key.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedItem {
    pub item: String,
    pub key: ItemSortKey,
}

/// Total order over ranked items. Names compare by UTF-16 code units.
pub fn compare_items(a: &RankedItem, b: &RankedItem) -> Ordering {
    a.key
        .rank()
        .cmp(&b.key.rank())
        .then_with(|| a.key.cpi.total_cmp(&b.key.cpi))
        .then_with(|| a.item.encode_utf16().cmp(b.item.encode_utf16()))
}

/// Records grouped by exact item name, each group in source order.
#[derive(Clone, Debug, Default)]
pub struct ItemGroups {
    groups: HashMap<String, Vec<Record>>,
}

impl ItemGroups {
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut groups: HashMap<String, Vec<Record>> = HashMap::new();
        for r in records {
            groups.entry(r.item.clone()).or_default().push(r);
        }
        Self { groups }
    }

    pub fn len(&self) -> usize { self.groups.len() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    pub fn get(&self, item: &str) -> Option<&[Record]> {
        self.groups.get(item).map(Vec::as_slice)
    }

    /// Items in display order.
    pub fn ordered(&self) -> Vec<RankedItem> {
        let mut items: Vec<RankedItem> = self
            .groups
            .iter()
            .map(|(item, records)| RankedItem { item: item.clone(), key: ItemSortKey::from_records(records) })
            .collect();
        items.sort_by(compare_items);
        items
    }
}
