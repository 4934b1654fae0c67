// File: crates/chart-core/tests/session.rs
// Purpose: Dashboard load/filter commands against files and a gated in-memory source.

mod common;

use std::io::Write;

use async_trait::async_trait;
use chart_core::{Dashboard, DisplayArea, LoadError, LoadStatus, RenderConfig, Source};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;

fn csv_file(text: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".csv").tempfile().expect("temp file");
    f.write_all(text.as_bytes()).expect("write csv");
    f
}

fn locator(f: &tempfile::NamedTempFile) -> String {
    f.path().display().to_string()
}

#[tokio::test]
async fn loads_file_and_reports_counts() {
    let f = csv_file(&common::csv(&[
        "Rice,2020-01-01,100,1,1,3,10",
        ",2020-01-01,1,1,1,1,1",
        "Tea,2020-01-01,,,,,",
    ]));
    let dash = Dashboard::with_default_source(RenderConfig::default());
    let LoadStatus::Loaded(summary) = dash.load_dataset(&locator(&f)).await else {
        panic!("load failed");
    };
    assert_eq!((summary.total_rows, summary.excluded_rows), (3, 1));
    assert_eq!(summary.items, 2);
    // Tea has no plottable point
    assert_eq!(summary.cards, 1);
    assert_eq!(summary.filter.visible, 1);
    assert!(!dash.is_loading());
}

#[tokio::test]
async fn failure_replaces_grid_with_message() {
    let f = csv_file(&common::fruit());
    let dash = Dashboard::with_default_source(RenderConfig::default());
    assert!(matches!(dash.load_dataset(&locator(&f)).await, LoadStatus::Loaded(_)));
    assert!(matches!(dash.display(), DisplayArea::Grid(_)));

    let missing = f.path().with_extension("missing.csv");
    let status = dash.load_dataset(&missing.display().to_string()).await;
    let LoadStatus::Failed(msg) = status else { panic!("expected failure") };
    assert!(msg.starts_with("Failed to load CSV:"), "{msg}");
    assert_eq!(dash.display(), DisplayArea::Error(msg));
    assert_eq!(dash.apply_filter("a"), None);
}

#[tokio::test]
async fn query_survives_reload() {
    let f = csv_file(&common::fruit());
    let dash = Dashboard::with_default_source(RenderConfig::default());
    assert_eq!(dash.display(), DisplayArea::Blank);
    assert_eq!(dash.apply_filter("BAN"), None);

    let LoadStatus::Loaded(summary) = dash.load_dataset(&locator(&f)).await else {
        panic!("load failed");
    };
    assert_eq!(summary.filter.visible, 1);
    assert_eq!(dash.query(), "BAN");
    let shown = dash.with_display(|area, _| match area {
        DisplayArea::Grid(g) => g.visible_cards().map(|c| c.item().to_string()).collect::<Vec<_>>(),
        _ => Vec::new(),
    });
    assert_eq!(shown, ["Banana"]);

    let out = dash.apply_filter("zzz").expect("grid present");
    assert!(out.empty_shown);
}

/// Serves fixed text once released.
struct GatedSource {
    gate: Notify,
    text: String,
}

#[async_trait]
impl Source for GatedSource {
    async fn fetch_text(&self, _locator: &str) -> Result<String, LoadError> {
        self.gate.notified().await;
        Ok(self.text.clone())
    }
}

#[tokio::test]
async fn overlapping_load_is_skipped() {
    let source = GatedSource { gate: Notify::new(), text: common::fruit() };
    let dash = Dashboard::new(source, RenderConfig::default());

    let (first, second) = tokio::join!(dash.load_dataset("first"), async {
        while !dash.is_loading() {
            tokio::task::yield_now().await;
        }
        let status = dash.load_dataset("second").await;
        dash.source().gate.notify_one();
        status
    });
    assert_eq!(second, LoadStatus::Skipped);
    assert!(matches!(first, LoadStatus::Loaded(s) if s.cards == 3));
    assert!(!dash.is_loading());
}

/// Answer one HTTP request with `status_line` and an empty body.
async fn serve_once(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.expect("accept");
        let mut buf = vec![0u8; 4096];
        let mut seen = Vec::new();
        while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = sock.read(&mut buf).await.expect("read request");
            if n == 0 { break; }
            seen.extend_from_slice(&buf[..n]);
        }
        let resp = format!("HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        sock.write_all(resp.as_bytes()).await.expect("write response");
        sock.shutdown().await.ok();
    });
    format!("http://{addr}/prices.csv")
}

#[tokio::test]
async fn http_error_status_fails_the_load() {
    let url = serve_once("404 Not Found").await;
    let dash = Dashboard::with_default_source(RenderConfig::default());
    let LoadStatus::Failed(msg) = dash.load_dataset(&url).await else {
        panic!("expected failure");
    };
    assert!(msg.starts_with("Failed to load CSV:"), "{msg}");
    assert!(msg.contains("404"), "{msg}");
    assert!(msg.contains(&url), "{msg}");
    assert_eq!(dash.display(), DisplayArea::Error(msg));
    assert!(!dash.is_loading());
}
