// File: crates/chart-core/tests/common/mod.rs
// Purpose: Shared CSV fixtures for integration tests.
#![allow(dead_code)]

pub const HEADER: &str = "item,date,index,yoy_q_pct_chg,yoy_e_pct_chg,level_kakei,code_cpi";

/// Header plus `rows`, newline separated.
pub fn csv(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for r in rows {
        out.push('\n');
        out.push_str(r);
    }
    out.push('\n');
    out
}

/// One item with a gap in `index` (2021) and in `yoy_e_pct_chg` (2022).
pub fn rice() -> String {
    csv(&[
        "Rice,2019-01-01,98.5,-1.2,0.4,3,10",
        "Rice,2020-01-01,100,0.5,1.1,3,10",
        "Rice,2021-01-01,,2.0,1.5,3,10",
        "Rice,2022-01-01,103,3.1,,3,10",
    ])
}

/// Three single-point items named for filter tests.
pub fn fruit() -> String {
    csv(&[
        "Cherry,2020-01-01,3,,,,",
        "Banana,2020-01-01,2,,,,",
        "Apple,2020-01-01,1,,,,",
    ])
}
