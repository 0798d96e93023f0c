//! Older encoding (Presentation API 2.x).

use serde::Serialize;

use crate::media::MediaCategory;
use crate::model::language::{LanguageMap, NO_LANGUAGE};
use crate::model::{AnnotationBody, Canvas, Dataset, Manifest, MetadataEntry, Service};
use crate::pipeline::canvas::IdTemplate;
use crate::version::PresentationVersion;

pub const CONTEXT: &str = PresentationVersion::V2.context();
pub const IMAGE_CONTEXT: &str = "http://iiif.io/api/image/2/context.json";
pub const SEQUENCE_LABEL: &str = "Current Page Order";

/// A language-tagged or plain value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LangItemV2 {
    Plain(String),
    Tagged {
        #[serde(rename = "@language")]
        language: String,
        #[serde(rename = "@value")]
        value: String,
    },
}

/// One value, or a list of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LanguageValueV2 {
    One(LangItemV2),
    Many(Vec<LangItemV2>),
}

impl LanguageValueV2 {
    pub fn from_map(m: &LanguageMap) -> Option<Self> {
        let mut items: Vec<LangItemV2> = m
            .pairs()
            .map(|(lang, value)| {
                if lang == NO_LANGUAGE {
                    LangItemV2::Plain(value.to_string())
                } else {
                    LangItemV2::Tagged {
                        language: lang.to_string(),
                        value: value.to_string(),
                    }
                }
            })
            .collect();
        match items.len() {
            0 => None,
            1 => items.pop().map(Self::One),
            _ => Some(Self::Many(items)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataV2 {
    pub label: LanguageValueV2,
    pub value: LanguageValueV2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThumbnailV2 {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetV2 {
    #[serde(rename = "@id")]
    pub id: String,
    pub format: String,
    pub profile: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceV2 {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceV2 {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceV2>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationV2 {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub motivation: String,
    pub resource: ResourceV2,
    pub on: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasV2 {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ThumbnailV2>,
    pub images: Vec<AnnotationV2>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceV2 {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_canvas: Option<String>,
    pub canvases: Vec<CanvasV2>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestV2 {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LanguageValueV2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LanguageValueV2>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataV2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ThumbnailV2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
    pub see_also: Vec<DatasetV2>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sequences: Vec<SequenceV2>,
}

/// `dctypes:` class for a body category. Untyped bodies are images.
pub fn dctype(category: Option<MediaCategory>) -> &'static str {
    match category {
        Some(MediaCategory::Sound) => "dctypes:Sound",
        Some(MediaCategory::Video) => "dctypes:MovingImage",
        Some(MediaCategory::Text) => "dctypes:Text",
        Some(MediaCategory::ThreeD) => "dctypes:PhysicalObject",
        Some(MediaCategory::Image) | None => "dctypes:Image",
    }
}

fn metadata(entry: &MetadataEntry) -> Option<MetadataV2> {
    Some(MetadataV2 {
        label: LanguageValueV2::from_map(&entry.label)?,
        value: LanguageValueV2::from_map(&entry.value)?,
    })
}

fn dataset(d: &Dataset) -> DatasetV2 {
    DatasetV2 {
        id: d.id.clone(),
        format: d.format.clone(),
        profile: d.profile.clone(),
    }
}

fn service(s: &Service) -> ServiceV2 {
    ServiceV2 {
        context: IMAGE_CONTEXT,
        id: s.id.clone(),
        profile: s.profile.clone(),
    }
}

fn resource(body: &AnnotationBody, fallback: Option<MediaCategory>) -> ResourceV2 {
    ResourceV2 {
        id: body.id.clone(),
        kind: dctype(body.category.or(fallback)),
        format: body.format.clone(),
        service: body.service.as_ref().map(service),
    }
}

fn canvas(c: &Canvas, fallback: Option<MediaCategory>) -> CanvasV2 {
    let images = c
        .painting_pages()
        .flat_map(|p| p.annotations.iter())
        .map(|a| AnnotationV2 {
            id: a.id.clone(),
            kind: "oa:Annotation",
            motivation: format!("sc:{}", a.motivation),
            resource: resource(&a.body, fallback),
            on: a.target.clone(),
        })
        .collect();

    CanvasV2 {
        id: c.id.clone(),
        kind: "sc:Canvas",
        label: c.label.clone(),
        height: c.height,
        width: c.width,
        attribution: c.required_statement.clone(),
        license: c.rights.clone(),
        thumbnail: c.thumbnail.as_ref().map(|t| ThumbnailV2 {
            id: t.clone(),
            kind: "dctypes:Image",
        }),
        images,
        other_content: c.fulltext_pages().map(|p| p.id.clone()).collect(),
    }
}

/// Project a derived manifest into the older encoding.
pub fn from_manifest(m: &Manifest, ids: &IdTemplate) -> ManifestV2 {
    let canvases: Vec<CanvasV2> = m
        .canvases
        .iter()
        .map(|c| canvas(c, m.record_category))
        .collect();

    let sequences = if canvases.is_empty() {
        Vec::new()
    } else {
        vec![SequenceV2 {
            id: ids.sequence(),
            kind: "sc:Sequence",
            label: SEQUENCE_LABEL,
            start_canvas: m.start_canvas().map(|c| c.id.clone()),
            canvases,
        }]
    };

    ManifestV2 {
        context: CONTEXT,
        id: m.id.clone(),
        kind: "sc:Manifest",
        label: m.label.as_ref().and_then(LanguageValueV2::from_map),
        description: m.description.as_ref().and_then(LanguageValueV2::from_map),
        metadata: m.metadata.iter().filter_map(metadata).collect(),
        thumbnail: m.thumbnail.as_ref().map(|t| ThumbnailV2 {
            id: t.clone(),
            kind: "dctypes:Image",
        }),
        nav_date: m.nav_date.clone(),
        attribution: m.attribution.clone(),
        license: m.rights.clone(),
        logo: m.logo.clone(),
        related: m.homepage.clone(),
        see_also: m.see_also.iter().map(dataset).collect(),
        sequences,
    }
}
