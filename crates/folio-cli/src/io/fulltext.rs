use std::time::Duration;

use folio_core::errors::FolioError;
use folio_core::fulltext::FullTextStatus;
use reqwest::StatusCode;
use tracing::warn;

/// 200 means full text exists, 404 means it does not, anything else is unknown.
pub fn status_for(code: StatusCode) -> FullTextStatus {
    match code {
        StatusCode::OK => FullTextStatus::Exists,
        StatusCode::NOT_FOUND => FullTextStatus::NotExists,
        _ => FullTextStatus::Unknown,
    }
}

/// Issue the single existence check. Never fails: transport errors and
/// timeouts answer `Unknown`.
pub async fn probe(client: &reqwest::Client, url: &str, timeout: Duration) -> FullTextStatus {
    match client.head(url).timeout(timeout).send().await {
        Ok(resp) => {
            let status = status_for(resp.status());
            if status == FullTextStatus::Unknown {
                warn!(url, code = resp.status().as_u16(), "unexpected full-text probe status");
            }
            status
        }
        Err(e) => {
            let err = FolioError::fulltext_probe(format!("{url}: {e}"));
            warn!(code = err.code(), timeout = e.is_timeout(), "{err}");
            FullTextStatus::Unknown
        }
    }
}
