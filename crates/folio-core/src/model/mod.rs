//! Folio data models.
//!
//! - [`language`]: multilingual text and its merge rules
//! - [`web_resource`]: renditions declared by the record, plus its service table
//! - [`manifest`]: the derived manifest structure both encodings project from
//!
//! Models are mostly "dumb" data. Mapping policy lives in `crate::pipeline`;
//! wire shapes live in `crate::encode`.

pub mod language;
pub mod manifest;
pub mod web_resource;

pub use language::{LanguageMap, NO_LANGUAGE};
pub use manifest::{
    Annotation, AnnotationBody, AnnotationPage, AnnotationPageKind, Canvas, Dataset, Manifest,
    MetadataEntry, Service, TimeMode,
};
pub use web_resource::{ServiceEntry, WebResource};

/// Lightweight structural checks for model consumers.
pub mod validate {
    use std::collections::HashSet;

    use super::*;
    use crate::errors::{FolioError, FolioResult};

    /// Validate basic structural invariants of a derived manifest:
    /// - canvas ids are unique
    /// - canvas orders run 1..=n in sequence
    /// - every canvas has exactly one painting page with one annotation
    /// - the start canvas, when set, exists
    pub fn manifest_basic(m: &Manifest) -> FolioResult<()> {
        let mut ids = HashSet::new();
        for (i, c) in m.canvases.iter().enumerate() {
            if !ids.insert(c.id.as_str()) {
                return Err(FolioError::invalid_argument(format!(
                    "duplicate canvas id: {}",
                    c.id
                )));
            }
            let expected = i as u32 + 1;
            if c.order != expected {
                return Err(FolioError::invalid_argument(format!(
                    "canvas {} has order {}, expected {expected}",
                    c.id, c.order
                )));
            }
            let painting: Vec<&AnnotationPage> = c.painting_pages().collect();
            if painting.len() != 1 || painting[0].annotations.len() != 1 {
                return Err(FolioError::invalid_argument(format!(
                    "canvas {} must have exactly one painting annotation",
                    c.id
                )));
            }
        }

        if let Some(order) = m.start_canvas {
            if m.canvas(order).is_none() {
                return Err(FolioError::invalid_argument(format!(
                    "start canvas p{order} does not exist"
                )));
            }
        }

        Ok(())
    }
}
