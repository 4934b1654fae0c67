// File: crates/chart-render-skia/tests/smoke.rs
// Purpose: Raster smoke tests: PNG header, canvas size, background and file output.

use chart_core::{build_grid, parse_csv, Chart, Color, PlotSeries, RenderConfig};
use chart_render_skia::{render_panel_png, write_pngs, RasterOptions};

const CSV: &str = "item,date,index,yoy_q_pct_chg,yoy_e_pct_chg,level_kakei,code_cpi
Rice,2019-01-01,98.5,-1.2,0.4,3,10
Rice,2020-01-01,100,0.5,1.1,3,10
Rice,2021-01-01,,2.0,1.5,3,10
Rice,2022-01-01,103,3.1,,3,10
Tea/Green,2020-01-01,50,,,,
";

fn quiet(scale: f32) -> RasterOptions {
    RasterOptions { scale, draw_labels: false, draw_title: false, ..RasterOptions::default() }
}

#[test]
fn render_panel_to_png() {
    let ds = parse_csv(CSV).expect("parse");
    let series = PlotSeries::build("Rice", &ds.records).expect("series");
    let panel = Chart::new(&series, &RenderConfig::default()).panel();

    let bytes = render_panel_png(&panel, quiet(1.0)).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(img.dimensions(), (520, 220));
    let bg = RasterOptions::default().background;
    let px = img.get_pixel(0, 0).0;
    assert_eq!(px, [bg.r, bg.g, bg.b, 255]);
}

#[test]
fn scale_multiplies_canvas() {
    let ds = parse_csv(CSV).expect("parse");
    let series = PlotSeries::build("Rice", &ds.records).expect("series");
    let panel = Chart::new(&series, &RenderConfig::default()).panel();
    let mut opts = quiet(2.0);
    opts.background = Color::rgb(255, 255, 255);
    let bytes = render_panel_png(&panel, opts).expect("render bytes");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(img.dimensions(), (1040, 440));
    assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
}

#[test]
fn write_one_png_per_card() {
    let grid = build_grid(parse_csv(CSV).expect("parse"), &RenderConfig::default());
    let out = std::path::PathBuf::from("target/test_out/pngs");
    let _ = std::fs::remove_dir_all(&out);
    let written = write_pngs(grid.cards.iter().map(|c| &c.panel), &out, quiet(1.0)).expect("write pngs");
    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("001_Rice.png"));
    assert!(written[1].ends_with("002_Tea_Green.png"));
    for p in &written {
        let meta = std::fs::metadata(p).expect("output exists");
        assert!(meta.len() > 0, "png should be non-empty");
    }
}
