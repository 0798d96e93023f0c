//! Canvas and painting-annotation assembly.
//!
//! One canvas per ordered web resource. Canvas `i` (1-based) gets id
//! `{base}/canvas/p{i}` and label `p. {i}`, and carries exactly one annotation
//! page with one painting annotation whose body is the web resource.

use url::Url;

use crate::errors::FolioResult;
use crate::media::MediaCategory;
use crate::model::web_resource::{find_service, WebResource};
use crate::model::{
    Annotation, AnnotationBody, AnnotationPage, AnnotationPageKind, Canvas, Service, TimeMode,
};
use crate::pipeline::eligibility::DisplayTarget;
use crate::pipeline::MappingContext;
use crate::record::SourceRecord;

pub const MOTIVATION_PAINTING: &str = "painting";

/// Ids derived from the manifest base, `{iiif_base}/presentation{record_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTemplate {
    base: String,
}

impl IdTemplate {
    pub fn new(iiif_base_url: &str, record_id: &str) -> Self {
        Self {
            base: format!("{iiif_base_url}/presentation{record_id}"),
        }
    }

    /// Recover the template from a manifest id built by [`IdTemplate::manifest`].
    pub fn from_manifest_id(manifest_id: &str) -> Self {
        Self {
            base: manifest_id
                .strip_suffix("/manifest")
                .unwrap_or(manifest_id)
                .to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn manifest(&self) -> String {
        format!("{}/manifest", self.base)
    }

    pub fn sequence(&self) -> String {
        format!("{}/sequence/s1", self.base)
    }

    pub fn canvas(&self, order: u32) -> String {
        format!("{}/canvas/p{order}", self.base)
    }

    pub fn annotation_page(&self, order: u32) -> String {
        format!("{}/annopage/p{order}", self.base)
    }

    pub fn annotation(&self, order: u32) -> String {
        format!("{}/annotation/p{order}", self.base)
    }
}

/// Thumbnail API URL for `resource_id`.
pub fn thumbnail_url(thumbnail_api: &str, resource_id: &str, record_type: Option<&str>) -> Option<String> {
    let mut params = vec![("uri", resource_id)];
    if let Some(t) = record_type {
        params.push(("type", t));
    }
    Url::parse_with_params(thumbnail_api, &params)
        .ok()
        .map(String::from)
}

/// Build the canvases for `ordered`.
pub fn assemble_canvases(
    ordered: &[WebResource],
    ids: &IdTemplate,
    record: &SourceRecord,
    target: &DisplayTarget,
    ctx: &mut MappingContext<'_>,
) -> FolioResult<Vec<Canvas>> {
    let record_type = record.record_type();
    let mut canvases = Vec::with_capacity(ordered.len());
    for (i, wr) in ordered.iter().enumerate() {
        let order = i as u32 + 1;
        canvases.push(build_canvas(order, wr, ids, record, record_type.as_deref(), target, ctx)?);
    }
    Ok(canvases)
}

fn build_canvas(
    order: u32,
    wr: &WebResource,
    ids: &IdTemplate,
    record: &SourceRecord,
    record_type: Option<&str>,
    target: &DisplayTarget,
    ctx: &mut MappingContext<'_>,
) -> FolioResult<Canvas> {
    let canvas_id = ids.canvas(order);

    let (category, format) = match target.forced_category {
        Some(forced) => (Some(forced), None),
        None => (
            wr.mime_type.as_deref().and_then(|m| ctx.media.category_for(m)),
            wr.mime_type.clone(),
        ),
    };
    let is_av = category.as_ref().is_some_and(MediaCategory::is_av);

    let service = match wr.service_id.as_deref() {
        Some(sid) => match find_service(record, sid)? {
            Some(entry) => Some(Service {
                id: entry.id,
                conforms_to: entry.conforms_to,
                profile: entry.profile,
            }),
            None => {
                ctx.push_warning(
                    "canvas.service_not_found",
                    format!("web resource {} declares service {sid} which is not in the service table", wr.id),
                );
                None
            }
        },
        None => None,
    };

    let thumbnail = if wr.service_id.is_none() {
        thumbnail_url(&ctx.config.urls.thumbnail_api_url, &wr.id, record_type)
    } else {
        None
    };

    let annotation = Annotation {
        id: ids.annotation(order),
        motivation: MOTIVATION_PAINTING,
        time_mode: is_av.then_some(TimeMode::Trim),
        target: canvas_id.clone(),
        body: AnnotationBody {
            id: wr.id.clone(),
            format,
            category,
            service,
        },
    };

    Ok(Canvas {
        id: canvas_id,
        order,
        label: format!("p. {order}"),
        width: wr.width,
        height: wr.height,
        duration_seconds: if is_av {
            wr.duration_ms.map(|ms| ms as f64 / 1000.0)
        } else {
            None
        },
        rights: wr.rights_text.clone(),
        required_statement: wr.attribution_text.clone(),
        thumbnail,
        annotation_pages: vec![AnnotationPage {
            id: ids.annotation_page(order),
            kind: AnnotationPageKind::Painting,
            annotations: vec![annotation],
        }],
    })
}
