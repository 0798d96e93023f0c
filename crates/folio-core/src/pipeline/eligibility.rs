//! Which web resources become canvases.
//!
//! Only the primary display resource (`edmIsShownBy`) and the record's declared
//! alternate views (`hasView`) are eligible. Everything else is dropped
//! silently.

use crate::errors::FolioResult;
use crate::media::MediaCategory;
use crate::model::web_resource::WebResource;
use crate::pipeline::MappingContext;
use crate::record::SourceRecord;

/// Marker in `edmIsShownAt` URLs of EUScreen-hosted audio/video.
pub const EUSCREEN_PATTERN: &str = "euscreen.eu/item.html";

/// Resolved display resources of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTarget {
    pub primary_id: Option<String>,
    pub alternate_ids: Vec<String>,
    /// Set for EUScreen-hosted AV: the category every body is forced to.
    pub forced_category: Option<MediaCategory>,
}

impl DisplayTarget {
    pub fn is_euscreen(&self) -> bool {
        self.forced_category.is_some()
    }
}

/// Resolve primary and alternate display ids, applying the EUScreen override.
pub fn display_target(record: &SourceRecord, ctx: &mut MappingContext<'_>) -> FolioResult<DisplayTarget> {
    let alternate_ids = record.candidates("aggregations[*].hasView")?;
    let shown_by = record.candidates("aggregations[*].edmIsShownBy")?;
    let primary = ctx.first_candidate("edmIsShownBy", shown_by);

    if primary.is_some() {
        return Ok(DisplayTarget {
            primary_id: primary,
            alternate_ids,
            forced_category: None,
        });
    }

    let shown_at = record.candidates("aggregations[*].edmIsShownAt")?;
    let shown_at = ctx.first_candidate("edmIsShownAt", shown_at);
    let av_type = record
        .record_type()
        .and_then(|t| MediaCategory::from_record_type(&t))
        .filter(MediaCategory::is_av);

    match (shown_at, av_type) {
        (Some(url), Some(category)) if url.contains(EUSCREEN_PATTERN) => {
            ctx.push_info(
                "eligibility.euscreen",
                format!("no primary display resource, using EUScreen page {url} as {}", category.as_str()),
            );
            Ok(DisplayTarget {
                primary_id: Some(url),
                alternate_ids,
                forced_category: Some(category),
            })
        }
        _ => Ok(DisplayTarget {
            primary_id: None,
            alternate_ids,
            forced_category: None,
        }),
    }
}

/// Keep only resources whose id is `primary_id` or one of `alternate_ids`.
/// Record order is preserved.
pub fn filter(all: Vec<WebResource>, primary_id: Option<&str>, alternate_ids: &[String]) -> Vec<WebResource> {
    all.into_iter()
        .filter(|wr| primary_id == Some(wr.id.as_str()) || alternate_ids.iter().any(|a| *a == wr.id))
        .collect()
}

/// The resources that become canvases, in record order.
///
/// An EUScreen page that is not itself a web resource is synthesized as the
/// first candidate.
pub fn eligible(all: Vec<WebResource>, target: &DisplayTarget) -> Vec<WebResource> {
    let mut candidates = filter(all, target.primary_id.as_deref(), &target.alternate_ids);
    if let Some(primary) = target.primary_id.as_deref() {
        if target.is_euscreen() && !candidates.iter().any(|wr| wr.id == primary) {
            candidates.insert(0, WebResource::new(primary));
        }
    }
    candidates
}
