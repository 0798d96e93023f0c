use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use folio_core::encode::encode;
use folio_core::fulltext::{enrich, fulltext_url, probe_page, FullTextStatus, KnownStatus};
use folio_core::pipeline::{map_record, DiagnosticLevel, MappingDiagnostic};
use folio_core::version::PresentationVersion;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use crate::cmd::Host;
use crate::io::{fulltext, input};
use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestOut {
    pub record_id: String,
    pub manifest_id: String,
    pub version: String,
    pub canvases: usize,
    pub fulltext: Option<String>,
    pub diagnostics: Vec<DiagnosticOut>,
    pub wrote_to: String,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticOut {
    pub level: &'static str,
    pub code: String,
    pub message: String,
}

impl From<&MappingDiagnostic> for DiagnosticOut {
    fn from(d: &MappingDiagnostic) -> Self {
        Self {
            level: d.level.as_str(),
            code: d.code.clone(),
            message: d.message.clone(),
        }
    }
}

fn status_str(s: FullTextStatus) -> &'static str {
    match s {
        FullTextStatus::Exists => "exists",
        FullTextStatus::NotExists => "not-exists",
        FullTextStatus::Unknown => "unknown",
    }
}

pub async fn run(
    host: &Host,
    input_arg: &str,
    version: PresentationVersion,
    with_fulltext: bool,
    out: Option<&Path>,
) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(80));

    pb.set_message("loading record");
    let record = input::load_record(host, input_arg).await?;

    pb.set_message("mapping");
    let report = map_record(&record, &host.config, &host.media)?;
    let mut manifest = report.manifest;

    let mut fulltext_status = None;
    if with_fulltext {
        if let Some(page) = probe_page(&manifest) {
            pb.set_message("probing full text");
            let url = fulltext_url(&host.config.urls, &manifest.record_id, page);
            let timeout = Duration::from_millis(host.config.http.fulltext_timeout_ms);
            let known = KnownStatus::new(fulltext::probe(&host.client, &url, timeout).await);
            fulltext_status = enrich(&mut manifest, &host.config.urls, &known);
        }
    }

    pb.set_message("encoding");
    let text = encode(&manifest, version).to_json_string(true)?;
    pb.finish_and_clear();

    let Some(path) = out else {
        println!("{text}");
        return Ok(());
    };

    fs::write(path, format!("{text}\n")).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), canvases = manifest.canvases.len(), "manifest written");

    let errors = report
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .count();
    if errors > 0 {
        tracing::warn!(errors, "manifest written with mapping errors");
    }

    let generated_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
    output::print(&ManifestOut {
        record_id: manifest.record_id.clone(),
        manifest_id: manifest.id.clone(),
        version: version.to_string(),
        canvases: manifest.canvases.len(),
        fulltext: fulltext_status.map(|s| status_str(s).to_string()),
        diagnostics: report.diagnostics.iter().map(DiagnosticOut::from).collect(),
        wrote_to: path.display().to_string(),
        generated_at,
    })?;
    Ok(())
}
