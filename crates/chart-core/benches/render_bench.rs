use chart_core::{build_grid, panel_to_svg, parse_csv, RenderConfig};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

/// `items` items with `months` monthly rows each, every tenth `index` missing.
fn build_csv(items: usize, months: usize) -> String {
    let mut out = String::from("item,date,index,yoy_q_pct_chg,yoy_e_pct_chg,level_kakei,code_cpi\n");
    for i in 0..items {
        for m in 0..months {
            let t = m as f64;
            let index = if m % 10 == 9 { String::new() } else { format!("{:.2}", 100.0 + (t * 0.1 + i as f64).sin() * 5.0) };
            out.push_str(&format!(
                "item{i:03},{}-{:02}-01,{index},{:.2},{:.2},{},{}\n",
                2000 + m / 12,
                m % 12 + 1,
                (t * 0.05).cos() * 3.0,
                (t * 0.07).sin() * 2.0,
                if i % 4 == 0 { 3 } else { 2 },
                1000 + i,
            ));
        }
    }
    out
}

fn bench_render(c: &mut Criterion) {
    let cfg = RenderConfig::default();
    let mut group = c.benchmark_group("render_grid_svg");
    for &(items, months) in &[(50usize, 120usize), (200usize, 240usize)] {
        let text = build_csv(items, months);
        group.bench_function(format!("items_{items}_months_{months}"), |b| {
            b.iter(|| {
                let ds = parse_csv(&text).expect("parse");
                let grid = build_grid(ds, &cfg);
                let bytes: usize = grid.cards.iter().map(|c| panel_to_svg(&c.panel).len()).sum();
                black_box(bytes);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
