//! The derived manifest structure.
//!
//! This is the single result of mapping a record. Both output encodings are
//! projections of it (see `crate::encode`); nothing here is specific to one
//! encoding.

use crate::media::MediaCategory;
use crate::model::language::LanguageMap;

/// Top-level aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Source record id, e.g. `/9200397/BibliographicResource_3000126284212`.
    pub record_id: String,
    pub id: String,
    pub label: Option<LanguageMap>,
    pub description: Option<LanguageMap>,
    pub metadata: Vec<MetadataEntry>,
    pub thumbnail: Option<String>,
    /// `YYYY-MM-DDT00:00:00Z`.
    pub nav_date: Option<String>,
    pub rights: Option<String>,
    pub attribution: Option<String>,
    pub homepage: Option<String>,
    pub logo: Option<String>,
    /// Record media type, used for untyped bodies.
    pub record_category: Option<MediaCategory>,
    pub see_also: Vec<Dataset>,
    pub canvases: Vec<Canvas>,
    /// `order` of the start canvas.
    pub start_canvas: Option<u32>,
}

impl Manifest {
    pub fn start_canvas(&self) -> Option<&Canvas> {
        let order = self.start_canvas?;
        self.canvases.iter().find(|c| c.order == order)
    }

    pub fn canvas(&self, order: u32) -> Option<&Canvas> {
        self.canvases.iter().find(|c| c.order == order)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub label: LanguageMap,
    pub value: LanguageMap,
}

/// A "see also" link to a machine-readable rendition of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub id: String,
    pub format: String,
    pub profile: String,
}

/// One page of the object.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub id: String,
    /// 1-based position.
    pub order: u32,
    pub label: String,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub duration_seconds: Option<f64>,
    pub rights: Option<String>,
    pub required_statement: Option<String>,
    pub thumbnail: Option<String>,
    pub annotation_pages: Vec<AnnotationPage>,
}

impl Canvas {
    /// Body of the painting annotation.
    pub fn painting_body(&self) -> Option<&AnnotationBody> {
        self.annotation_pages
            .iter()
            .filter(|p| p.kind == AnnotationPageKind::Painting)
            .flat_map(|p| p.annotations.iter())
            .map(|a| &a.body)
            .next()
    }

    pub fn painting_pages(&self) -> impl Iterator<Item = &AnnotationPage> {
        self.annotation_pages
            .iter()
            .filter(|p| p.kind == AnnotationPageKind::Painting)
    }

    pub fn fulltext_pages(&self) -> impl Iterator<Item = &AnnotationPage> {
        self.annotation_pages
            .iter()
            .filter(|p| p.kind == AnnotationPageKind::FullText)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationPageKind {
    /// Holds the annotation that paints the resource onto the canvas.
    Painting,
    /// Reference to an externally hosted full-text annotation page.
    FullText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationPage {
    pub id: String,
    pub kind: AnnotationPageKind,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMode {
    Trim,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: String,
    /// Always "painting" for generated annotations.
    pub motivation: &'static str,
    pub time_mode: Option<TimeMode>,
    pub target: String,
    pub body: AnnotationBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationBody {
    /// The source web-resource id.
    pub id: String,
    pub format: Option<String>,
    pub category: Option<MediaCategory>,
    pub service: Option<Service>,
}

/// Image (or other) service advertised for a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: String,
    pub conforms_to: Option<String>,
    pub profile: Option<String>,
}
