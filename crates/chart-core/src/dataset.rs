// File: crates/chart-core/src/dataset.rs
// Summary: Dataset loader; fetches CSV text from a path or URL and keeps the valid rows.

use async_trait::async_trait;
use tracing::debug;

use crate::error::LoadError;
use crate::record::{parse_row, ColumnMap, Record};

/// Where CSV text comes from. The only asynchronous boundary in the crate.
#[async_trait]
pub trait Source: Send + Sync {
    async fn fetch_text(&self, locator: &str) -> Result<String, LoadError>;
}

/// Reads `http://` / `https://` locators over HTTP and anything else from disk.
#[derive(Clone, Debug, Default)]
pub struct DefaultSource {
    client: reqwest::Client,
}

impl DefaultSource {
    pub fn new() -> Self {
        Self::default()
    }
}

/// True when the locator should be fetched over HTTP.
pub fn is_url(locator: &str) -> bool {
    let lower = locator.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[async_trait]
impl Source for DefaultSource {
    async fn fetch_text(&self, locator: &str) -> Result<String, LoadError> {
        if is_url(locator) {
            let resp = self.client.get(locator).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(LoadError::Status { url: locator.to_string(), status: status.as_u16() });
            }
            Ok(resp.text().await?)
        } else {
            tokio::fs::read_to_string(locator)
                .await
                .map_err(|source| LoadError::Read { path: locator.to_string(), source })
        }
    }
}

/// Valid records in source order plus the row accounting of one load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub total_rows: usize,
    pub excluded_rows: usize,
}

/// Parse CSV text with a header row. Rows with an empty item or an invalid
/// date are excluded; structural CSV errors fail the whole parse.
pub fn parse_csv(text: &str) -> Result<Dataset, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns = ColumnMap::from_headers(rdr.headers()?);
    let missing = columns.missing();
    if !missing.is_empty() {
        debug!(?missing, "CSV lacks columns; treating them as empty");
    }

    let mut out = Dataset::default();
    for rec in rdr.records() {
        let rec = rec?;
        out.total_rows += 1;
        match parse_row(&columns, &rec).validate() {
            Some(r) => out.records.push(r),
            None => out.excluded_rows += 1,
        }
    }
    debug!(total = out.total_rows, excluded = out.excluded_rows, "parsed CSV rows");
    Ok(out)
}

/// Fetch `locator` through `source` and parse it.
pub async fn load_dataset<S: Source + ?Sized>(source: &S, locator: &str) -> Result<Dataset, LoadError> {
    let text = source.fetch_text(locator).await?;
    parse_csv(&text)
}
