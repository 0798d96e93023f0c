//! End-to-end mapping of the record fixtures.

mod common;

use assert_matches::assert_matches;
use folio_core::config::{CoreConfig, SequencePolicy};
use folio_core::media::{MediaCategory, MediaTypes};
use folio_core::model::TimeMode;
use folio_core::pipeline::{map_record, DiagnosticLevel};
use folio_core::FolioError;

const BOOK_BASE: &str = "https://iiif.europeana.eu/presentation/9200397/BibliographicResource_3000126284212";

fn map(name: &str) -> folio_core::pipeline::MappingReport {
    map_record(&common::record(name), &CoreConfig::default(), &MediaTypes::builtin()).unwrap()
}

#[test]
fn book_pages_follow_next_links() {
    let report = map("book.json");
    let m = &report.manifest;

    let bodies: Vec<&str> = m
        .canvases
        .iter()
        .map(|c| c.painting_body().unwrap().id.as_str())
        .collect();
    assert_eq!(
        bodies,
        vec![
            "https://content.example.org/gazette/p1.jpg",
            "https://content.example.org/gazette/p2.jpg",
            "https://content.example.org/gazette/p3.jpg",
        ]
    );
    for (i, c) in m.canvases.iter().enumerate() {
        let n = i + 1;
        assert_eq!(c.order as usize, n);
        assert_eq!(c.id, format!("{BOOK_BASE}/canvas/p{n}"));
        assert_eq!(c.label, format!("p. {n}"));
        assert_eq!(c.width, Some(1200));
        assert_eq!(c.height, Some(1800));
    }
    assert_eq!(m.id, format!("{BOOK_BASE}/manifest"));
    assert_eq!(m.start_canvas, Some(1));
}

#[test]
fn book_service_and_thumbnails() {
    let m = map("book.json").manifest;

    let first = m.canvas(1).unwrap();
    let service = first.painting_body().unwrap().service.as_ref().unwrap();
    assert_eq!(service.id, "https://iiif.example.org/image/gazette/p1");
    assert_eq!(service.profile.as_deref(), Some("http://iiif.io/api/image/2/level1.json"));
    assert!(first.thumbnail.is_none());
    assert_eq!(
        first.required_statement.as_deref(),
        Some("The Shipping Gazette - National Library - Public Domain")
    );

    let second = m.canvas(2).unwrap();
    assert!(second.painting_body().unwrap().service.is_none());
    assert!(second
        .thumbnail
        .as_deref()
        .unwrap()
        .starts_with("https://api.europeana.eu/thumbnail/v2/url.json?uri="));
}

#[test]
fn book_fields_follow_priority_chains() {
    let report = map("book.json");
    let m = &report.manifest;

    assert_eq!(m.label.as_ref().unwrap().get("en"), Some(&["The Shipping Gazette".to_string()][..]));
    assert_eq!(m.label.as_ref().unwrap().get("def"), Some(&["Lloyd's List".to_string()][..]));
    assert!(m.description.is_some());
    assert_eq!(m.nav_date.as_deref(), Some("1891-05-12T00:00:00Z"));
    assert_eq!(m.rights.as_deref(), Some("http://creativecommons.org/publicdomain/mark/1.0/"));
    assert_eq!(
        m.attribution.as_deref(),
        Some("The Shipping Gazette - National Library - Public Domain")
    );
    assert_eq!(
        m.homepage.as_deref(),
        Some("https://www.europeana.eu/item/9200397/BibliographicResource_3000126284212")
    );
    assert!(m.thumbnail.as_deref().unwrap().contains("type=TEXT"));
    assert_eq!(m.record_category, Some(MediaCategory::Text));
    assert_eq!(m.see_also.len(), 3);

    // two issued dates were present; the first is used and the second reported
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.level == DiagnosticLevel::Warning && d.message.starts_with("navDate")));
    assert!(!report.has_errors());
}

#[test]
fn book_metadata_links_entities() {
    let m = map("book.json").manifest;
    let entry = m
        .metadata
        .iter()
        .find(|e| e.label.first_value() == Some("type"))
        .unwrap();
    let link = "<a href='http://data.europeana.eu/concept/base/1'>Newspaper</a>";
    assert_eq!(entry.value.get("en").unwrap()[0], link);
    assert!(entry.value.get("en").unwrap().contains(&"Periodical".to_string()));
    assert_eq!(
        entry.value.get("nl"),
        Some(&["<a href='http://data.europeana.eu/concept/base/1'>Krant</a>".to_string()][..])
    );
    assert!(entry.value.get("def").unwrap().contains(&"newspaper".to_string()));
}

#[test]
fn description_only_record() {
    let report = map("description_only.json");
    let m = &report.manifest;
    let label = m.label.as_ref().unwrap();
    assert_eq!(label.get("nl"), Some(&["Meisje met de parel".to_string()][..]));
    assert!(m.description.is_none());
    assert!(m.nav_date.is_none());
    // aggregation has no rights; the europeana aggregation is the fallback
    assert_eq!(m.rights.as_deref(), Some("http://creativecommons.org/publicdomain/zero/1.0/"));
    assert_eq!(m.attribution.as_deref(), Some("Mauritshuis"));
    assert_eq!(m.canvases.len(), 1);
}

#[test]
fn video_canvas_is_timed() {
    let m = map("video.json").manifest;
    assert_eq!(m.canvases.len(), 1);
    let c = &m.canvases[0];
    assert_eq!(c.duration_seconds, Some(95.5));
    let ann = &c.annotation_pages[0].annotations[0];
    assert_eq!(ann.time_mode, Some(TimeMode::Trim));
    assert_eq!(ann.body.category, Some(MediaCategory::Video));
    assert_eq!(ann.body.format.as_deref(), Some("video/mp4"));
}

#[test]
fn euscreen_page_becomes_the_single_canvas() {
    let report = map("euscreen.json");
    let m = &report.manifest;
    assert_eq!(m.canvases.len(), 1);
    let c = &m.canvases[0];
    let ann = &c.annotation_pages[0].annotations[0];
    assert_eq!(ann.body.id, "http://www.euscreen.eu/item.html?id=EUS_0123456789");
    assert_eq!(ann.body.category, Some(MediaCategory::Video));
    assert!(ann.body.format.is_none());
    assert_eq!(ann.time_mode, Some(TimeMode::Trim));
    assert_eq!(m.start_canvas, Some(1));
    assert!(report.diagnostics.iter().any(|d| d.code == "eligibility.euscreen"));
}

#[test]
fn inconsistent_sequence_is_tolerated_by_default() {
    let report = map("inconsistent.json");
    assert!(report.manifest.canvases.is_empty());
    assert!(report.manifest.start_canvas.is_none());
    assert!(report.has_errors());
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.code == "sequence.inconsistent" && d.level == DiagnosticLevel::Error));
    // the rest of the manifest is still populated
    assert!(report.manifest.label.is_some());
}

#[test]
fn inconsistent_sequence_fails_when_strict() {
    let cfg = CoreConfig {
        sequence_policy: SequencePolicy::Strict,
        ..CoreConfig::default()
    };
    let err = map_record(&common::record("inconsistent.json"), &cfg, &MediaTypes::builtin()).unwrap_err();
    assert_matches!(err, FolioError::DataInconsistent(_));
    assert_eq!(err.code(), "data.inconsistent");
}

#[test]
fn mapping_is_deterministic() {
    for name in ["book.json", "description_only.json", "video.json", "euscreen.json", "inconsistent.json"] {
        let a = map(name);
        let b = map(name);
        assert_eq!(a.manifest, b.manifest, "{name}");
        assert_eq!(a.diagnostics, b.diagnostics, "{name}");
    }
}
