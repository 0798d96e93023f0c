//! Newer encoding (Presentation API 3.x).
//!
//! Language maps keep their shape; only the no-language key is renamed from
//! `def` to `none`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::media::MediaCategory;
use crate::model::language::{LanguageMap, NO_LANGUAGE};
use crate::model::{
    Annotation, AnnotationPage, Canvas, Dataset, Manifest, MetadataEntry, Service, TimeMode,
};
use crate::version::PresentationVersion;

pub const CONTEXT: [&str; 2] = [
    "http://www.w3.org/ns/anno.jsonld",
    PresentationVersion::V3.context(),
];
pub const NONE_KEY: &str = "none";

/// Language map with the no-language key renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMapV3(pub LanguageMap);

impl LanguageMapV3 {
    pub fn from_map(m: &LanguageMap) -> Option<Self> {
        (!m.is_empty()).then(|| Self(m.clone()))
    }

    fn none(value: impl Into<String>) -> Self {
        Self(LanguageMap::no_language(value))
    }
}

impl Serialize for LanguageMapV3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // `def` and a literal `none` key share one entry, at the first one's position.
        let mut entries: Vec<(&str, Vec<&String>)> = Vec::with_capacity(self.0.len());
        for (lang, values) in self.0.iter() {
            let key = if lang == NO_LANGUAGE { NONE_KEY } else { lang };
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, merged)) => merged.extend(values),
                None => entries.push((key, values.iter().collect())),
            }
        }
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, values) in &entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataV3 {
    pub label: LanguageMapV3,
    pub value: LanguageMapV3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRefV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomepageV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: LanguageMapV3,
    pub format: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: LanguageMapV3,
    pub logo: Vec<ImageRefV3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredStatementV3 {
    pub label: LanguageMapV3,
    pub value: LanguageMapV3,
}

impl RequiredStatementV3 {
    fn attribution(text: &str) -> Self {
        Self {
            label: LanguageMapV3(LanguageMap::single("en", "Attribution")),
            value: LanguageMapV3::none(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub format: String,
    pub profile: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service: Vec<ServiceV3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub motivation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_mode: Option<&'static str>,
    pub body: BodyV3,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationPageV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub items: Vec<AnnotationV3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasV3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: LanguageMapV3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_statement: Option<RequiredStatementV3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thumbnail: Vec<ImageRefV3>,
    pub items: Vec<AnnotationPageV3>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<RefV3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestV3 {
    #[serde(rename = "@context")]
    pub context: [&'static str; 2],
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LanguageMapV3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<LanguageMapV3>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataV3>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thumbnail: Vec<ImageRefV3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub homepage: Vec<HomepageV3>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provider: Vec<AgentV3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_statement: Option<RequiredStatementV3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    pub see_also: Vec<DatasetV3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<RefV3>,
    pub items: Vec<CanvasV3>,
}

/// Body `type` for a category. Untyped bodies are images.
pub fn body_type(category: Option<MediaCategory>) -> &'static str {
    match category {
        Some(MediaCategory::Sound) => "Sound",
        Some(MediaCategory::Video) => "Video",
        Some(MediaCategory::Text) => "Text",
        Some(MediaCategory::ThreeD) => "Model",
        Some(MediaCategory::Image) | None => "Image",
    }
}

/// `ImageService2` when the service advertises the 2.x image API, else `ImageService3`.
pub fn service_type(s: &Service) -> &'static str {
    let v2 = [&s.profile, &s.conforms_to]
        .into_iter()
        .flatten()
        .any(|p| p.contains("image/2"));
    if v2 {
        "ImageService2"
    } else {
        "ImageService3"
    }
}

fn image(id: &str) -> ImageRefV3 {
    ImageRefV3 {
        id: id.to_string(),
        kind: "Image",
        format: None,
    }
}

fn metadata(entry: &MetadataEntry) -> Option<MetadataV3> {
    Some(MetadataV3 {
        label: LanguageMapV3::from_map(&entry.label)?,
        value: LanguageMapV3::from_map(&entry.value)?,
    })
}

fn dataset(d: &Dataset) -> DatasetV3 {
    DatasetV3 {
        id: d.id.clone(),
        kind: "Dataset",
        format: d.format.clone(),
        profile: d.profile.clone(),
    }
}

fn annotation(a: &Annotation, fallback: Option<MediaCategory>) -> AnnotationV3 {
    AnnotationV3 {
        id: a.id.clone(),
        kind: "Annotation",
        motivation: a.motivation,
        time_mode: a.time_mode.map(|m| match m {
            TimeMode::Trim => "trim",
        }),
        body: BodyV3 {
            id: a.body.id.clone(),
            kind: body_type(a.body.category.or(fallback)),
            format: a.body.format.clone(),
            service: a
                .body
                .service
                .iter()
                .map(|s| ServiceV3 {
                    id: s.id.clone(),
                    kind: service_type(s),
                    profile: s.profile.clone(),
                })
                .collect(),
        },
        target: a.target.clone(),
    }
}

fn page(p: &AnnotationPage, fallback: Option<MediaCategory>) -> AnnotationPageV3 {
    AnnotationPageV3 {
        id: p.id.clone(),
        kind: "AnnotationPage",
        items: p.annotations.iter().map(|a| annotation(a, fallback)).collect(),
    }
}

fn canvas(c: &Canvas, fallback: Option<MediaCategory>) -> CanvasV3 {
    CanvasV3 {
        id: c.id.clone(),
        kind: "Canvas",
        label: LanguageMapV3::none(c.label.clone()),
        height: c.height,
        width: c.width,
        duration: c.duration_seconds,
        required_statement: c
            .required_statement
            .as_deref()
            .map(RequiredStatementV3::attribution),
        rights: c.rights.clone(),
        thumbnail: c.thumbnail.as_deref().map(image).into_iter().collect(),
        items: c.painting_pages().map(|p| page(p, fallback)).collect(),
        annotations: c
            .fulltext_pages()
            .map(|p| RefV3 {
                id: p.id.clone(),
                kind: "AnnotationPage",
            })
            .collect(),
    }
}

/// Project a derived manifest into the newer encoding.
pub fn from_manifest(m: &Manifest) -> ManifestV3 {
    let homepage = m
        .homepage
        .iter()
        .map(|h| HomepageV3 {
            id: h.clone(),
            kind: "Text",
            label: LanguageMapV3(LanguageMap::single("en", "Europeana")),
            format: "text/html",
        })
        .collect();

    let provider = m
        .logo
        .iter()
        .map(|logo| AgentV3 {
            id: "https://www.europeana.eu".to_string(),
            kind: "Agent",
            label: LanguageMapV3(LanguageMap::single("en", "Europeana")),
            logo: vec![ImageRefV3 {
                id: logo.clone(),
                kind: "Image",
                format: Some("image/png".to_string()),
            }],
        })
        .collect();

    ManifestV3 {
        context: CONTEXT,
        id: m.id.clone(),
        kind: "Manifest",
        label: m.label.as_ref().and_then(LanguageMapV3::from_map),
        summary: m.description.as_ref().and_then(LanguageMapV3::from_map),
        metadata: m.metadata.iter().filter_map(metadata).collect(),
        thumbnail: m.thumbnail.as_deref().map(image).into_iter().collect(),
        nav_date: m.nav_date.clone(),
        homepage,
        provider,
        required_statement: m.attribution.as_deref().map(RequiredStatementV3::attribution),
        rights: m.rights.clone(),
        see_also: m.see_also.iter().map(dataset).collect(),
        start: m.start_canvas().map(|c| RefV3 {
            id: c.id.clone(),
            kind: "Canvas",
        }),
        items: m
            .canvases
            .iter()
            .map(|c| canvas(c, m.record_category))
            .collect(),
    }
}
