//! Full-text enrichment.
//!
//! A single existence probe is issued for the start canvas. When full text
//! exists for that page, every canvas gets a reference to the full-text
//! annotation page with its own page number; the other pages are not probed.
//! Any other outcome leaves the manifest untouched.

use std::cell::Cell;

use tracing::{debug, info};

use crate::config::UrlConfig;
use crate::model::{AnnotationPage, AnnotationPageKind, Manifest};

/// Outcome of a full-text existence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullTextStatus {
    Exists,
    NotExists,
    /// The probe could not be completed (timeout, network error, unexpected status).
    Unknown,
}

/// Answers "does full text exist for page N of this record".
pub trait FullTextProbe {
    fn probe(&self, page: u32) -> FullTextStatus;
}

impl<F> FullTextProbe for F
where
    F: Fn(u32) -> FullTextStatus,
{
    fn probe(&self, page: u32) -> FullTextStatus {
        self(page)
    }
}

/// A probe answered ahead of time, for hosts that run the request themselves
/// (for example on an async runtime) before calling [`enrich`].
#[derive(Debug)]
pub struct KnownStatus {
    status: FullTextStatus,
    used: Cell<bool>,
}

impl KnownStatus {
    pub fn new(status: FullTextStatus) -> Self {
        Self {
            status,
            used: Cell::new(false),
        }
    }

    /// Whether [`enrich`] consulted this probe.
    pub fn was_used(&self) -> bool {
        self.used.get()
    }
}

impl FullTextProbe for KnownStatus {
    fn probe(&self, _page: u32) -> FullTextStatus {
        self.used.set(true);
        self.status
    }
}

/// Full-text annotation page URL for `page` of `record_id`.
pub fn fulltext_url(urls: &UrlConfig, record_id: &str, page: u32) -> String {
    format!("{}/presentation{record_id}/annopage/{page}", urls.fulltext_base_url)
}

/// The page number the single probe must be issued for.
pub fn probe_page(manifest: &Manifest) -> Option<u32> {
    manifest.start_canvas().map(|c| c.order)
}

/// Probe once and, when full text exists, attach a full-text annotation page
/// reference to every canvas. Returns the probe outcome, or `None` when the
/// manifest has no start canvas and nothing was probed.
pub fn enrich<P>(manifest: &mut Manifest, urls: &UrlConfig, probe: &P) -> Option<FullTextStatus>
where
    P: FullTextProbe + ?Sized,
{
    let page = probe_page(manifest)?;
    let status = probe.probe(page);
    debug!(record = %manifest.record_id, page, ?status, "full-text probe answered");

    if status != FullTextStatus::Exists {
        return Some(status);
    }

    for canvas in &mut manifest.canvases {
        let already = canvas
            .fulltext_pages()
            .any(|p| p.id == fulltext_url(urls, &manifest.record_id, canvas.order));
        if already {
            continue;
        }
        canvas.annotation_pages.push(AnnotationPage {
            id: fulltext_url(urls, &manifest.record_id, canvas.order),
            kind: AnnotationPageKind::FullText,
            annotations: Vec::new(),
        });
    }
    info!(
        record = %manifest.record_id,
        canvases = manifest.canvases.len(),
        "full-text references attached"
    );
    Some(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::media::MediaTypes;
    use crate::pipeline::map_record;
    use crate::record::SourceRecord;
    use serde_json::json;

    fn manifest(pages: usize) -> Manifest {
        let views: Vec<String> = (2..=pages).map(|i| format!("http://x/{i}")).collect();
        let resources: Vec<serde_json::Value> = (1..=pages)
            .map(|i| json!({"about": format!("http://x/{i}")}))
            .collect();
        let record = SourceRecord::from_json(json!({
            "about": "/1/a",
            "aggregations": [{"edmIsShownBy": "http://x/1", "hasView": views, "webResources": resources}]
        }))
        .unwrap();
        map_record(&record, &CoreConfig::default(), &MediaTypes::builtin())
            .unwrap()
            .manifest
    }

    #[test]
    fn exists_enriches_every_canvas_with_one_probe() {
        let mut m = manifest(3);
        let calls = Cell::new(0u32);
        let probe = |page: u32| {
            calls.set(calls.get() + 1);
            assert_eq!(page, 1);
            FullTextStatus::Exists
        };
        let status = enrich(&mut m, &UrlConfig::default(), &probe);
        assert_eq!(status, Some(FullTextStatus::Exists));
        assert_eq!(calls.get(), 1);
        for c in &m.canvases {
            let pages: Vec<&AnnotationPage> = c.fulltext_pages().collect();
            assert_eq!(pages.len(), 1);
            assert_eq!(
                pages[0].id,
                format!("https://iiif.europeana.eu/presentation/1/a/annopage/{}", c.order)
            );
            assert_eq!(c.annotation_pages.len(), 2);
        }
    }

    #[test]
    fn unknown_and_not_exists_leave_manifest_unchanged() {
        for status in [FullTextStatus::Unknown, FullTextStatus::NotExists] {
            let mut m = manifest(2);
            let before = m.clone();
            assert_eq!(enrich(&mut m, &UrlConfig::default(), &KnownStatus::new(status)), Some(status));
            assert_eq!(m, before);
        }
    }

    #[test]
    fn no_canvases_means_no_probe() {
        let mut m = manifest(0);
        let probe = KnownStatus::new(FullTextStatus::Exists);
        assert_eq!(enrich(&mut m, &UrlConfig::default(), &probe), None);
        assert!(!probe.was_used());
    }

    #[test]
    fn enrichment_is_idempotent() {
        let mut m = manifest(2);
        let probe = KnownStatus::new(FullTextStatus::Exists);
        enrich(&mut m, &UrlConfig::default(), &probe);
        enrich(&mut m, &UrlConfig::default(), &probe);
        assert!(m.canvases.iter().all(|c| c.fulltext_pages().count() == 1));
    }
}
