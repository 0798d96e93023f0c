use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_core::config::UrlConfig;
use folio_core::errors::{FolioError, FolioResult};
use folio_core::record::SourceRecord;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::cmd::Host;

/// Where a record comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    File(PathBuf),
    Url(String),
    /// Record id of the form `/collection/item`.
    RecordId(String),
}

pub fn classify(input: &str) -> RecordSource {
    // 1) URL
    if input.starts_with("http://") || input.starts_with("https://") {
        return RecordSource::Url(input.to_string());
    }

    // 2) Existing local file
    let path = Path::new(input);
    if path.exists() {
        return RecordSource::File(path.to_path_buf());
    }

    // 3) Record id
    if is_record_id(input) {
        return RecordSource::RecordId(input.to_string());
    }

    RecordSource::File(path.to_path_buf())
}

fn is_record_id(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('/') else {
        return false;
    };
    let parts: Vec<&str> = rest.split('/').collect();
    parts.len() == 2 && parts.iter().all(|p| !p.is_empty() && !p.contains('.'))
}

pub async fn load_record(host: &Host, input: &str) -> FolioResult<SourceRecord> {
    let timeout = Duration::from_millis(host.config.http.record_timeout_ms);
    match classify(input) {
        RecordSource::File(path) => read_record_file(&path),
        RecordSource::Url(url) => fetch_record(&host.client, &url, timeout).await,
        RecordSource::RecordId(id) => {
            let url = record_api_url(&host.config.urls, &id, host.api_key.as_deref())?;
            fetch_record(&host.client, url.as_str(), timeout).await
        }
    }
}

pub fn read_record_file(path: &Path) -> FolioResult<SourceRecord> {
    let raw = fs::read(path).map_err(|e| {
        FolioError::invalid_argument(format!("cannot read {}: {e}", path.display()))
    })?;
    SourceRecord::from_slice(&raw)
}

/// `{record_api_base}/record{id}.json`, with the API key as `wskey`.
pub fn record_api_url(urls: &UrlConfig, record_id: &str, api_key: Option<&str>) -> FolioResult<Url> {
    let raw = format!("{}/record{record_id}.json", urls.record_api_base_url);
    let mut url = Url::parse(&raw)
        .map_err(|e| FolioError::invalid_argument(format!("invalid record url {raw}: {e}")))?;
    if let Some(key) = api_key {
        url.query_pairs_mut().append_pair("wskey", key);
    }
    Ok(url)
}

/// Map a non-success record API status to the error a caller can act on.
pub fn status_error(status: StatusCode, what: &str) -> FolioError {
    match status {
        StatusCode::NOT_FOUND => FolioError::record_not_found(format!("{what}: {status}")),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            FolioError::invalid_credentials(format!("{what}: {status}"))
        }
        _ => FolioError::record_retrieve(format!("{what}: {status}")),
    }
}

async fn fetch_record(client: &reqwest::Client, url: &str, timeout: Duration) -> FolioResult<SourceRecord> {
    let what = redact(url);
    debug!(url = %what, "fetching record");
    let resp = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| FolioError::record_retrieve(format!("{what}: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(status_error(status, &what));
    }
    let body = resp
        .bytes()
        .await
        .map_err(|e| FolioError::record_retrieve(format!("{what}: {e}")))?;
    SourceRecord::from_slice(&body)
}

/// Drop the API key from a URL before it is logged or reported.
fn redact(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| k != "wskey")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept);
    }
    parsed.to_string()
}
