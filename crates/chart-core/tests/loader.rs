// File: crates/chart-core/tests/loader.rs
// Purpose: CSV coercion, row exclusion accounting and item grouping/ordering.

mod common;

use chart_core::{parse_csv, ItemGroups, LoadError, PlotSeries};

#[test]
fn unparsable_numbers_become_nan() {
    let text = common::csv(&["A,2020-01-01,abc, ,1.5,,"]);
    let ds = parse_csv(&text).expect("parse");
    assert_eq!(ds.records.len(), 1);
    let r = &ds.records[0];
    assert!(r.index.is_nan());
    assert!(r.yoy_q_pct_chg.is_nan());
    assert_eq!(r.yoy_e_pct_chg, 1.5);
    assert!(r.level_kakei.is_nan());
    assert!(r.code_cpi.is_nan());
}

#[test]
fn invalid_rows_are_excluded_and_counted() {
    let text = common::csv(&[
        "A,2020-01-01,1,1,1,1,1",
        ",2020-01-01,1,1,1,1,1",
        "B,not-a-date,1,1,1,1,1",
        "C,2020-02-01,2,2,2,2,2",
    ]);
    let ds = parse_csv(&text).expect("parse");
    assert_eq!(ds.total_rows, 4);
    assert_eq!(ds.excluded_rows, 2);
    assert_eq!(ds.records.len() + ds.excluded_rows, ds.total_rows);
    let items: Vec<_> = ds.records.iter().map(|r| r.item.as_str()).collect();
    assert_eq!(items, ["A", "C"]);
}

#[test]
fn missing_columns_read_as_empty() {
    let ds = parse_csv("item,date,index\nA,2020-01-01,7\n").expect("parse");
    let r = &ds.records[0];
    assert_eq!(r.index, 7.0);
    assert!(r.yoy_q_pct_chg.is_nan() && r.yoy_e_pct_chg.is_nan());

    // without an item column every row is excluded
    let ds = parse_csv("date,index\n2020-01-01,7\n").expect("parse");
    assert_eq!((ds.total_rows, ds.excluded_rows), (1, 1));
}

#[test]
fn ragged_rows_fail_the_load() {
    let err = parse_csv("item,date,index\nA,2020-01-01\n").unwrap_err();
    assert!(matches!(err, LoadError::Csv(_)));
    assert!(err.to_string().starts_with("malformed CSV"));
}

#[test]
fn empty_input_yields_empty_dataset() {
    let ds = parse_csv(&common::csv(&[])).expect("parse");
    assert!(ds.records.is_empty());
    assert_eq!(ds.total_rows, 0);
}

fn order(text: &str) -> Vec<String> {
    let ds = parse_csv(text).expect("parse");
    ItemGroups::from_records(ds.records).ordered().into_iter().map(|r| r.item).collect()
}

#[test]
fn featured_items_first_then_cpi_then_name() {
    let text = common::csv(&[
        "Zeta,2020-01-01,1,,,,5",
        "Alpha,2020-01-01,1,,,,",
        "Beta,2020-01-01,1,,,2,7",
        "Gamma,2020-01-01,1,,,3,50",
        "Delta,2020-01-01,1,,,3,20",
        "Eps,2020-01-01,1,,,,0",
    ]);
    assert_eq!(order(&text), ["Delta", "Gamma", "Zeta", "Beta", "Alpha", "Eps"]);
}

#[test]
fn group_keys_use_max_level_and_min_cpi() {
    let text = common::csv(&[
        "Mixed,2020-01-01,1,,,2,40",
        "Mixed,2021-01-01,1,,,3,12",
        "Plain,2020-01-01,1,,,2,1",
    ]);
    let ds = parse_csv(&text).expect("parse");
    let groups = ItemGroups::from_records(ds.records);
    let ordered = groups.ordered();
    assert_eq!(ordered[0].item, "Mixed");
    assert_eq!(ordered[0].key.level, 3.0);
    assert_eq!(ordered[0].key.cpi, 12.0);
    assert_eq!(ordered[0].key.rank(), 0);
    assert_eq!(ordered[1].key.rank(), 1);
}

#[test]
fn ordering_is_stable_across_input_order() {
    let rows = [
        "B,2020-01-01,1,,,,3",
        "A,2020-01-01,1,,,,3",
        "C,2020-01-01,1,,,3,",
    ];
    let mut reversed = rows;
    reversed.reverse();
    let first = order(&common::csv(&rows));
    assert_eq!(first, ["C", "A", "B"]);
    assert_eq!(order(&common::csv(&reversed)), first);
}

#[test]
fn names_order_by_utf16_code_units() {
    // U+1F34E encodes as a surrogate pair (0xD83C ...), below U+FF08
    let text = common::csv(&[
        "\u{FF08}Rice\u{FF09},2020-01-01,1,,,,",
        "\u{1F34E},2020-01-01,1,,,,",
        "Apple,2020-01-01,1,,,,",
    ]);
    assert_eq!(order(&text), ["Apple", "\u{1F34E}", "\u{FF08}Rice\u{FF09}"]);
}

#[test]
fn series_drops_empty_points_and_sorts_by_date() {
    let text = common::csv(&[
        "A,2021-01-01,2,,,,",
        "A,2019-01-01,,,,,",
        "A,2020-01-01,1,,,,",
        "A,2020-01-01,,5,,,",
    ]);
    let ds = parse_csv(&text).expect("parse");
    let s = PlotSeries::build("A", &ds.records).expect("series");
    assert_eq!(s.len(), 3);
    // equal dates keep source order
    assert_eq!(s.points[0].index, 1.0);
    assert_eq!(s.points[1].yoy_q_pct_chg, 5.0);
    assert_eq!(s.points[2].index, 2.0);
    assert_eq!(s.value_extent(), Some((1.0, 5.0)));
}

#[test]
fn all_empty_item_has_no_series() {
    let ds = parse_csv(&common::csv(&["A,2020-01-01,,,,3,1"])).expect("parse");
    assert_eq!(ds.records.len(), 1);
    assert!(PlotSeries::build("A", &ds.records).is_none());
}
