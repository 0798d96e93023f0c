//! Scalar manifest fields derived from the record.
//!
//! Single-valued fields follow a priority chain of record locations. Within a
//! location the first candidate wins; more than one distinct candidate is
//! recorded as a warning, never an error.

use itertools::Itertools;
use time::macros::format_description;
use time::{Date, Month};
use url::Url;

use crate::config::UrlConfig;
use crate::errors::FolioResult;
use crate::model::language::LanguageMap;
use crate::model::manifest::{Dataset, MetadataEntry};
use crate::model::web_resource::WebResource;
use crate::pipeline::canvas::thumbnail_url;
use crate::pipeline::MappingContext;
use crate::record::SourceRecord;

/// Structural metadata fields, in output order: (label, proxy field).
pub const METADATA_FIELDS: [(&str, &str); 6] = [
    ("date", "dcDate"),
    ("format", "dcFormat"),
    ("relation", "dcRelation"),
    ("type", "dcType"),
    ("language", "dcLanguage"),
    ("source", "dcSource"),
];

pub const EDM_PROFILE: &str = "http://www.europeana.eu/schemas/edm/";

/// Record renditions advertised as "see also": (postfix, media type).
pub const DATASET_FORMATS: [(&str, &str); 3] = [
    (".json-ld", "application/ld+json"),
    (".json", "application/json"),
    (".rdf", "application/rdf+xml"),
];

/// Label and description.
///
/// The label is the first non-empty title across proxies. Without any title
/// the first non-empty description becomes the label and the description is
/// left empty so the same text is not shown twice.
pub fn label_and_description(record: &SourceRecord) -> FolioResult<(Option<LanguageMap>, Option<LanguageMap>)> {
    let title = record.proxy_language_maps("dcTitle")?.into_iter().next();
    let description = record.proxy_language_maps("dcDescription")?.into_iter().next();
    Ok(match title {
        Some(t) => (Some(t), description),
        None => (description, None),
    })
}

/// One metadata entry per structural field that has values, merged across
/// proxies, with URL values turned into links.
pub fn metadata(record: &SourceRecord) -> FolioResult<Vec<MetadataEntry>> {
    let mut out = Vec::new();
    for (label, field) in METADATA_FIELDS {
        let maps = record.proxy_language_maps(field)?;
        let merged = LanguageMap::merge_all(&maps);
        if merged.is_empty() {
            continue;
        }
        out.push(MetadataEntry {
            label: LanguageMap::single("en", label),
            value: link_urls(record, &merged),
        });
    }
    Ok(out)
}

fn is_http_url(s: &str) -> bool {
    Url::parse(s.trim())
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Render URL values as links, labelled with the matching entity's preferred
/// labels when the record describes one.
pub fn link_urls(record: &SourceRecord, values: &LanguageMap) -> LanguageMap {
    values.map_values(|lang, value| {
        if !is_http_url(value) {
            return LanguageMap::single(lang, value);
        }
        let url = value.trim();
        match record.entity_label(url) {
            Some(labels) => labels.map_values(|label_lang, label| {
                LanguageMap::single(label_lang, format!("<a href='{url}'>{label}</a>"))
            }),
            None => LanguageMap::single(lang, format!("<a href='{url}'>{url}</a>")),
        }
    })
}

/// Distinct language-map values found at `path`, in document order.
fn language_map_values(record: &SourceRecord, path: &str) -> FolioResult<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    for v in record.select(path)? {
        for (_, s) in LanguageMap::from_json(v).pairs() {
            let s = s.trim();
            if !out.iter().any(|o| o == s) {
                out.push(s.to_string());
            }
        }
    }
    Ok(out)
}

/// `europeanaAggregation.edmPreview`, else the thumbnail API applied to the
/// aggregation's `edmObject`.
pub fn thumbnail(record: &SourceRecord, urls: &UrlConfig, ctx: &mut MappingContext<'_>) -> FolioResult<Option<String>> {
    let preview = record.candidates("europeanaAggregation.edmPreview")?;
    if let Some(p) = ctx.first_candidate("thumbnail", preview) {
        return Ok(Some(p));
    }
    let objects = record.candidates("aggregations[*].edmObject")?;
    Ok(ctx
        .first_candidate("edmObject", objects)
        .and_then(|o| thumbnail_url(&urls.thumbnail_api_url, &o, record.record_type().as_deref())))
}

/// Parse `YYYY-MM-DD...` or `YYYY` into a date.
pub fn parse_nav_date(s: &str) -> Option<Date> {
    let s = s.trim();
    if let Some(prefix) = s.get(..10) {
        if let Ok(d) = Date::parse(prefix, format_description!("[year]-[month]-[day]")) {
            return Some(d);
        }
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return Date::from_calendar_date(year, Month::January, 1).ok();
    }
    None
}

/// Navigation date from the proxies' `dctermsIssued`, formatted as
/// `YYYY-MM-DDT00:00:00Z`.
pub fn nav_date(record: &SourceRecord, ctx: &mut MappingContext<'_>) -> FolioResult<Option<String>> {
    let dates: Vec<String> = language_map_values(record, "proxies[*].dctermsIssued")?
        .iter()
        .filter_map(|raw| parse_nav_date(raw))
        .filter_map(|d| {
            d.format(format_description!("[year]-[month]-[day]T00:00:00Z"))
                .ok()
        })
        .unique()
        .collect();
    Ok(ctx.first_candidate("navDate", dates))
}

/// Aggregation `edmRights`, else `europeanaAggregation.edmRights`.
pub fn rights(record: &SourceRecord, ctx: &mut MappingContext<'_>) -> FolioResult<Option<String>> {
    let primary = language_map_values(record, "aggregations[*].edmRights")?;
    if let Some(r) = ctx.first_candidate("rights", primary) {
        return Ok(Some(r));
    }
    let fallback = language_map_values(record, "europeanaAggregation.edmRights")?;
    Ok(ctx.first_candidate("rights", fallback))
}

/// Attribution snippet of the primary display resource, else the aggregation's
/// data provider.
pub fn attribution(
    record: &SourceRecord,
    resources: &[WebResource],
    primary_id: Option<&str>,
    ctx: &mut MappingContext<'_>,
) -> FolioResult<Option<String>> {
    if let Some(text) = primary_id
        .and_then(|id| resources.iter().find(|wr| wr.id == id))
        .and_then(|wr| wr.attribution_text.clone())
    {
        return Ok(Some(text));
    }
    let providers = language_map_values(record, "aggregations[*].edmDataProvider")?;
    Ok(ctx.first_candidate("attribution", providers))
}

/// Landing page of the object.
pub fn homepage(record: &SourceRecord, ctx: &mut MappingContext<'_>) -> FolioResult<Option<String>> {
    let pages = record.candidates("europeanaAggregation.edmLandingPage")?;
    Ok(ctx.first_candidate("homepage", pages))
}

/// The three fixed "see also" datasets.
pub fn datasets(urls: &UrlConfig, record_id: &str) -> Vec<Dataset> {
    DATASET_FORMATS
        .iter()
        .map(|(postfix, format)| Dataset {
            id: format!("{}/record{record_id}{postfix}", urls.record_api_base_url),
            format: (*format).to_string(),
            profile: EDM_PROFILE.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::media::MediaTypes;
    use crate::pipeline::DiagnosticLevel;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> SourceRecord {
        SourceRecord::from_json(v).unwrap()
    }

    #[test]
    fn title_and_description() {
        let r = rec(json!({
            "about": "/1/a",
            "proxies": [
                {"dcDescription": {"en": ["A description"]}},
                {"dcTitle": {"en": ["A title"]}}
            ]
        }));
        let (label, desc) = label_and_description(&r).unwrap();
        assert_eq!(label.unwrap().first_value(), Some("A title"));
        assert_eq!(desc.unwrap().first_value(), Some("A description"));
    }

    #[test]
    fn description_only_becomes_label() {
        let r = rec(json!({
            "about": "/1/a",
            "proxies": [{"dcTitle": {"en": [""]}, "dcDescription": {"nl": ["Beschrijving"]}}]
        }));
        let (label, desc) = label_and_description(&r).unwrap();
        assert_eq!(label.unwrap().get("nl"), Some(&["Beschrijving".to_string()][..]));
        assert!(desc.is_none());
    }

    #[test]
    fn metadata_merges_proxies_in_field_order() {
        let r = rec(json!({
            "about": "/1/a",
            "proxies": [
                {"dcType": {"en": ["photograph"]}, "dcDate": {"def": ["1901"]}},
                {"dcType": {"en": ["print"], "nl": ["afdruk"]}}
            ]
        }));
        let md = metadata(&r).unwrap();
        let labels: Vec<&str> = md.iter().filter_map(|e| e.label.first_value()).collect();
        assert_eq!(labels, vec!["date", "type"]);
        assert_eq!(md[1].value.get("en"), Some(&["photograph".to_string(), "print".to_string()][..]));
        assert_eq!(md[1].value.get("nl"), Some(&["afdruk".to_string()][..]));
    }

    #[test]
    fn metadata_urls_become_links() {
        let r = rec(json!({
            "about": "/1/a",
            "proxies": [{"dcType": {"def": ["http://concept/1", "http://other/2", "plain"]}}],
            "concepts": [{"about": "http://concept/1", "prefLabel": {"en": ["Painting"], "de": ["Gemälde"]}}]
        }));
        let md = metadata(&r).unwrap();
        let v = &md[0].value;
        assert_eq!(
            v.get("def"),
            Some(&["<a href='http://other/2'>http://other/2</a>".to_string(), "plain".to_string()][..])
        );
        assert_eq!(v.get("en"), Some(&["<a href='http://concept/1'>Painting</a>".to_string()][..]));
        assert_eq!(v.get("de"), Some(&["<a href='http://concept/1'>Gemälde</a>".to_string()][..]));
    }

    #[test]
    fn nav_date_parsing() {
        assert_eq!(
            parse_nav_date("1921-03-04T10:00:00"),
            Some(Date::from_calendar_date(1921, Month::March, 4).unwrap())
        );
        assert_eq!(
            parse_nav_date("1921"),
            Some(Date::from_calendar_date(1921, Month::January, 1).unwrap())
        );
        assert_eq!(parse_nav_date("circa 1900"), None);
    }

    #[test]
    fn nav_date_first_candidate_with_warning() {
        let cfg = CoreConfig::default();
        let media = MediaTypes::builtin();
        let mut ctx = MappingContext::new(&cfg, &media);
        let r = rec(json!({
            "about": "/1/a",
            "proxies": [
                {"dctermsIssued": {"def": ["unknown", "1921-03-04"]}},
                {"dctermsIssued": {"en": ["1930"]}}
            ]
        }));
        assert_eq!(nav_date(&r, &mut ctx).unwrap().as_deref(), Some("1921-03-04T00:00:00Z"));
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].level, DiagnosticLevel::Warning);
    }

    #[test]
    fn rights_priority_chain() {
        let cfg = CoreConfig::default();
        let media = MediaTypes::builtin();
        let mut ctx = MappingContext::new(&cfg, &media);

        let r = rec(json!({
            "about": "/1/a",
            "europeanaAggregation": {"edmRights": {"def": ["http://fallback"]}}
        }));
        assert_eq!(rights(&r, &mut ctx).unwrap().as_deref(), Some("http://fallback"));

        let r = rec(json!({
            "about": "/1/a",
            "aggregations": [{"edmRights": {"def": ["http://primary"]}}],
            "europeanaAggregation": {"edmRights": {"def": ["http://fallback"]}}
        }));
        assert_eq!(rights(&r, &mut ctx).unwrap().as_deref(), Some("http://primary"));

        let r = rec(json!({"about": "/1/a"}));
        assert_eq!(rights(&r, &mut ctx).unwrap(), None);
    }

    #[test]
    fn thumbnail_priority_chain() {
        let cfg = CoreConfig::default();
        let media = MediaTypes::builtin();
        let mut ctx = MappingContext::new(&cfg, &media);

        let r = rec(json!({
            "about": "/1/a",
            "europeanaAggregation": {"edmPreview": "http://preview"},
            "aggregations": [{"edmObject": "http://object"}]
        }));
        assert_eq!(thumbnail(&r, &cfg.urls, &mut ctx).unwrap().as_deref(), Some("http://preview"));

        let r = rec(json!({"about": "/1/a", "aggregations": [{"edmObject": "http://object"}]}));
        let t = thumbnail(&r, &cfg.urls, &mut ctx).unwrap().unwrap();
        assert!(t.contains("uri=http%3A%2F%2Fobject"));
    }

    #[test]
    fn attribution_prefers_primary_resource() {
        let cfg = CoreConfig::default();
        let media = MediaTypes::builtin();
        let mut ctx = MappingContext::new(&cfg, &media);
        let r = rec(json!({"about": "/1/a", "aggregations": [{"edmDataProvider": {"def": ["Provider"]}}]}));

        let mut wr = WebResource::new("p");
        wr.attribution_text = Some("Snippet".into());
        assert_eq!(
            attribution(&r, &[wr], Some("p"), &mut ctx).unwrap().as_deref(),
            Some("Snippet")
        );
        assert_eq!(attribution(&r, &[], Some("p"), &mut ctx).unwrap().as_deref(), Some("Provider"));
    }

    #[test]
    fn three_datasets() {
        let ds = datasets(&UrlConfig::default(), "/1/a");
        assert_eq!(ds.len(), 3);
        assert_eq!(ds[0].id, "https://api.europeana.eu/record/v2/record/1/a.json-ld");
        assert_eq!(ds[1].format, "application/json");
        assert_eq!(ds[2].id, "https://api.europeana.eu/record/v2/record/1/a.rdf");
        assert!(ds.iter().all(|d| d.profile == EDM_PROFILE));
    }
}
