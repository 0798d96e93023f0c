//! Configuration structures for folio-core.
//!
//! This module defines explicit, serializable configuration objects used by
//! host components (CLI, services) to control id templates, sequencing policy
//! and collaborator timeouts.
//!
//! The core crate itself does not read environment variables. All configuration
//! must be provided explicitly by the caller.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{FolioError, FolioResult};

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoreConfig {
    pub urls: UrlConfig,
    pub sequence_policy: SequencePolicy,
    pub http: HttpConfig,
}

/// Base URLs and templates used to build ids in generated manifests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UrlConfig {
    /// Base for manifest, canvas and annotation ids.
    pub iiif_base_url: String,
    /// Base for the record API (record fetch and see-also datasets).
    pub record_api_base_url: String,
    /// Thumbnail API endpoint; the resource URL is appended as `uri` query parameter.
    pub thumbnail_api_url: String,
    /// Base for full-text annotation pages.
    pub fulltext_base_url: String,
    /// Logo advertised on every manifest.
    pub logo_url: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            iiif_base_url: "https://iiif.europeana.eu".to_string(),
            record_api_base_url: "https://api.europeana.eu/record/v2".to_string(),
            thumbnail_api_url: "https://api.europeana.eu/thumbnail/v2/url.json".to_string(),
            fulltext_base_url: "https://iiif.europeana.eu".to_string(),
            logo_url: "https://style.europeana.eu/images/europeana-logo-default.png".to_string(),
        }
    }
}

/// What to do when the web-resource sequence graph is inconsistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencePolicy {
    /// Surface `DataInconsistent` to the caller.
    Strict,
    /// Log, record a diagnostic, and emit no canvases.
    #[default]
    Tolerant,
}

impl SequencePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Tolerant => "tolerant",
        }
    }
}

/// Timeouts for the two blocking collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    pub record_timeout_ms: u64,
    pub fulltext_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            record_timeout_ms: 20_000,
            fulltext_timeout_ms: 5_000,
        }
    }
}

fn require_http_url(field: &str, value: &str) -> FolioResult<()> {
    let parsed = Url::parse(value)
        .map_err(|e| FolioError::invalid_config(format!("{field} is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FolioError::invalid_config(format!(
            "{field} must use http or https, got {other}"
        ))),
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CoreConfig) -> FolioResult<()> {
    require_http_url("iiifBaseUrl", &cfg.urls.iiif_base_url)?;
    require_http_url("recordApiBaseUrl", &cfg.urls.record_api_base_url)?;
    require_http_url("thumbnailApiUrl", &cfg.urls.thumbnail_api_url)?;
    require_http_url("fulltextBaseUrl", &cfg.urls.fulltext_base_url)?;

    for (field, base) in [
        ("iiifBaseUrl", &cfg.urls.iiif_base_url),
        ("recordApiBaseUrl", &cfg.urls.record_api_base_url),
        ("fulltextBaseUrl", &cfg.urls.fulltext_base_url),
    ] {
        if base.ends_with('/') {
            return Err(FolioError::invalid_config(format!(
                "{field} must not end with a slash"
            )));
        }
    }

    if cfg.http.record_timeout_ms == 0 || cfg.http.fulltext_timeout_ms == 0 {
        return Err(FolioError::invalid_config(
            "timeouts must be greater than zero",
        ));
    }

    Ok(())
}
