//! Output encodings.
//!
//! Both encodings are pure projections of the same [`Manifest`]; nothing is
//! re-derived from the record here.
//!
//! - [`v2`]: older encoding (`@id`/`@type`, sequences, `otherContent`)
//! - [`v3`]: newer encoding (`id`/`type`, nested annotation pages)

pub mod v2;
pub mod v3;

use serde::Serialize;

use crate::errors::{FolioError, FolioResult};
use crate::model::Manifest;
use crate::pipeline::canvas::IdTemplate;
use crate::version::PresentationVersion;

pub use v2::ManifestV2;
pub use v3::ManifestV3;

/// An encoded manifest of either generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EncodedManifest {
    V2(ManifestV2),
    V3(ManifestV3),
}

impl EncodedManifest {
    pub fn version(&self) -> PresentationVersion {
        match self {
            EncodedManifest::V2(_) => PresentationVersion::V2,
            EncodedManifest::V3(_) => PresentationVersion::V3,
        }
    }

    pub fn to_value(&self) -> FolioResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to JSON text.
    pub fn to_json_string(&self, pretty: bool) -> FolioResult<String> {
        let out = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        out.map_err(|e| {
            FolioError::serialization(format!(
                "failed to serialize v{} manifest: {e}",
                self.version()
            ))
        })
    }
}

/// Project `manifest` into the requested encoding.
pub fn encode(manifest: &Manifest, version: PresentationVersion) -> EncodedManifest {
    match version {
        PresentationVersion::V2 => {
            let ids = IdTemplate::from_manifest_id(&manifest.id);
            EncodedManifest::V2(v2::from_manifest(manifest, &ids))
        }
        PresentationVersion::V3 => EncodedManifest::V3(v3::from_manifest(manifest)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaCategory;
    use crate::model::{
        Annotation, AnnotationBody, AnnotationPage, AnnotationPageKind, Canvas, LanguageMap,
        TimeMode,
    };
    use serde_json::json;

    const BASE: &str = "https://iiif.example.org/presentation/1/a";

    fn canvas(order: u32, category: Option<MediaCategory>) -> Canvas {
        let id = format!("{BASE}/canvas/p{order}");
        Canvas {
            id: id.clone(),
            order,
            label: format!("p. {order}"),
            width: Some(100),
            height: Some(200),
            duration_seconds: None,
            rights: None,
            required_statement: None,
            thumbnail: None,
            annotation_pages: vec![AnnotationPage {
                id: format!("{BASE}/annopage/p{order}"),
                kind: AnnotationPageKind::Painting,
                annotations: vec![Annotation {
                    id: format!("{BASE}/annotation/p{order}"),
                    motivation: "painting",
                    time_mode: None,
                    target: id,
                    body: AnnotationBody {
                        id: format!("http://x/{order}.jpg"),
                        format: Some("image/jpeg".into()),
                        category,
                        service: None,
                    },
                }],
            }],
        }
    }

    fn manifest(canvases: Vec<Canvas>) -> Manifest {
        let start = canvases.first().map(|c| c.order);
        Manifest {
            record_id: "/1/a".into(),
            id: format!("{BASE}/manifest"),
            label: Some(LanguageMap::single("en", "A book")),
            description: None,
            metadata: Vec::new(),
            thumbnail: None,
            nav_date: None,
            rights: Some("http://creativecommons.org/publicdomain/mark/1.0/".into()),
            attribution: Some("Library".into()),
            homepage: None,
            logo: None,
            record_category: Some(MediaCategory::Text),
            see_also: Vec::new(),
            canvases,
            start_canvas: start,
        }
    }

    #[test]
    fn v2_without_canvases_has_no_sequence() {
        let v = encode(&manifest(Vec::new()), PresentationVersion::V2)
            .to_value()
            .unwrap();
        assert!(v.get("sequences").is_none());
        assert_eq!(v["@type"], "sc:Manifest");
        assert_eq!(v["label"], json!({"@language": "en", "@value": "A book"}));
    }

    #[test]
    fn v2_sequence_and_canvas_shape() {
        let v = encode(
            &manifest(vec![canvas(1, Some(MediaCategory::Image)), canvas(2, None)]),
            PresentationVersion::V2,
        )
        .to_value()
        .unwrap();
        let seq = &v["sequences"][0];
        assert_eq!(seq["@id"], format!("{BASE}/sequence/s1"));
        assert_eq!(seq["startCanvas"], format!("{BASE}/canvas/p1"));
        let c2 = &seq["canvases"][1];
        assert_eq!(c2["images"][0]["motivation"], "sc:painting");
        assert_eq!(c2["images"][0]["on"], format!("{BASE}/canvas/p2"));
        // untyped body falls back to the record type
        assert_eq!(c2["images"][0]["resource"]["@type"], "dctypes:Text");
        assert_eq!(v["license"], "http://creativecommons.org/publicdomain/mark/1.0/");
    }

    #[test]
    fn v3_canvas_shape() {
        let mut c = canvas(1, Some(MediaCategory::Video));
        c.duration_seconds = Some(12.5);
        c.annotation_pages[0].annotations[0].time_mode = Some(TimeMode::Trim);
        let v = encode(&manifest(vec![c]), PresentationVersion::V3)
            .to_value()
            .unwrap();
        assert_eq!(v["type"], "Manifest");
        assert_eq!(v["start"], json!({"id": format!("{BASE}/canvas/p1"), "type": "Canvas"}));
        let c = &v["items"][0];
        assert_eq!(c["label"], json!({"none": ["p. 1"]}));
        assert_eq!(c["duration"], json!(12.5));
        let ann = &c["items"][0]["items"][0];
        assert_eq!(ann["timeMode"], "trim");
        assert_eq!(ann["body"]["type"], "Video");
        assert_eq!(
            v["requiredStatement"],
            json!({"label": {"en": ["Attribution"]}, "value": {"none": ["Library"]}})
        );
    }

    #[test]
    fn both_encodings_agree_on_canvases() {
        let m = manifest(vec![canvas(1, None), canvas(2, None), canvas(3, None)]);
        let v2 = encode(&m, PresentationVersion::V2).to_value().unwrap();
        let v3 = encode(&m, PresentationVersion::V3).to_value().unwrap();
        let ids2: Vec<_> = v2["sequences"][0]["canvases"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["@id"].clone())
            .collect();
        let ids3: Vec<_> = v3["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].clone())
            .collect();
        assert_eq!(ids2, ids3);
    }

    #[test]
    fn json_string_reports_version() {
        let e = encode(&manifest(Vec::new()), PresentationVersion::V3);
        assert_eq!(e.version(), PresentationVersion::V3);
        let s = e.to_json_string(false).unwrap();
        assert!(s.starts_with("{\"@context\":[\"http://www.w3.org/ns/anno.jsonld\""));
    }
}
