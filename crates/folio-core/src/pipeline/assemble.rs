//! Record-to-manifest orchestration.

use tracing::debug;

use crate::config::{CoreConfig, SequencePolicy};
use crate::errors::FolioResult;
use crate::media::{MediaCategory, MediaTypes};
use crate::model::validate;
use crate::model::web_resource::{web_resources, WebResource};
use crate::model::{Canvas, Manifest};
use crate::pipeline::canvas::{assemble_canvases, IdTemplate};
use crate::pipeline::{eligibility, fields, MappingContext, MappingReport};
use crate::record::SourceRecord;
use crate::sequence;

/// Map `record` into a manifest, collecting diagnostics.
///
/// The result is a pure function of the record, the configuration and the
/// media table.
pub fn map_record(record: &SourceRecord, config: &CoreConfig, media: &MediaTypes) -> FolioResult<MappingReport> {
    let mut ctx = MappingContext::new(config, media);
    let manifest = map_record_with(record, &mut ctx)?;
    Ok(MappingReport {
        manifest,
        diagnostics: ctx.diagnostics,
    })
}

/// Same as [`map_record`] with a caller-owned context.
pub fn map_record_with(record: &SourceRecord, ctx: &mut MappingContext<'_>) -> FolioResult<Manifest> {
    let urls = ctx.config.urls.clone();
    let ids = IdTemplate::new(&urls.iiif_base_url, record.id());

    let target = eligibility::display_target(record, ctx)?;
    let all = web_resources(record)?;
    let attribution = fields::attribution(record, &all, target.primary_id.as_deref(), ctx)?;

    let total = all.len();
    let candidates = eligibility::eligible(all, &target);
    debug!(
        record = record.id(),
        web_resources = total,
        eligible = candidates.len(),
        "web resources filtered"
    );

    let ordered = canvas_order(candidates, ctx)?;

    let canvases = assemble_canvases(&ordered, &ids, record, &target, ctx)?;
    let start_canvas = start_canvas(&canvases, target.primary_id.as_deref());

    let (label, description) = fields::label_and_description(record)?;
    if label.is_none() {
        ctx.push_warning("field.no_label", "record has neither title nor description");
    }

    let manifest = Manifest {
        record_id: record.id().to_string(),
        id: ids.manifest(),
        label,
        description,
        metadata: fields::metadata(record)?,
        thumbnail: fields::thumbnail(record, &urls, ctx)?,
        nav_date: fields::nav_date(record, ctx)?,
        rights: fields::rights(record, ctx)?,
        attribution,
        homepage: fields::homepage(record, ctx)?,
        logo: Some(urls.logo_url.clone()).filter(|l| !l.is_empty()),
        record_category: record
            .record_type()
            .and_then(|t| MediaCategory::from_record_type(&t)),
        see_also: fields::datasets(&urls, record.id()),
        canvases,
        start_canvas,
    };

    validate::manifest_basic(&manifest)?;
    debug!(
        record = record.id(),
        canvases = manifest.canvases.len(),
        start = ?manifest.start_canvas,
        "manifest assembled"
    );
    Ok(manifest)
}

/// Forward page order of the eligible `candidates` under the configured
/// sequence policy. A tolerated inconsistency yields no pages.
pub fn canvas_order(candidates: Vec<WebResource>, ctx: &mut MappingContext<'_>) -> FolioResult<Vec<WebResource>> {
    match sequence::forward_order(candidates) {
        Ok(ordered) => Ok(ordered),
        Err(e) => match ctx.config.sequence_policy {
            SequencePolicy::Strict => Err(e),
            SequencePolicy::Tolerant => {
                ctx.push_error("sequence.inconsistent", format!("{e}; no canvases generated"));
                Ok(Vec::new())
            }
        },
    }
}

/// The canvas whose painting body is the primary display resource, else the
/// first canvas.
pub fn start_canvas(canvases: &[Canvas], primary_id: Option<&str>) -> Option<u32> {
    primary_id
        .and_then(|id| {
            canvases
                .iter()
                .find(|c| c.painting_body().is_some_and(|b| b.id == id))
        })
        .or_else(|| canvases.first())
        .map(|c| c.order)
}
