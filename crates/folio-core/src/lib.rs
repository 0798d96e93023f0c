//! folio-core
//!
//! Core of the Folio manifest mapper:
//! - Read-only path queries over a source record
//! - Multilingual value merging
//! - Page-sequence reconstruction from "next in sequence" links
//! - Mapping a record into a single derived manifest
//! - Projecting that manifest into the older (v2) or newer (v3) encoding
//! - Optional full-text annotation-page enrichment
//!
//! The crate performs no I/O. Hosts supply the parsed record, configuration,
//! and (for full-text enrichment) a probe.

pub mod config;
pub mod encode;
pub mod errors;
pub mod fulltext;
pub mod media;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod sequence;
pub mod version;

pub use crate::errors::{FolioError, FolioResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{validate_config, CoreConfig, SequencePolicy, UrlConfig};
    pub use crate::encode::{encode, EncodedManifest};
    pub use crate::fulltext::{enrich, FullTextProbe, FullTextStatus, KnownStatus};
    pub use crate::media::{MediaCategory, MediaTypes};
    pub use crate::model::{LanguageMap, Manifest, WebResource};
    pub use crate::pipeline::{map_record, map_record_with, MappingContext, MappingReport};
    pub use crate::record::SourceRecord;
    pub use crate::sequence::{forward_order, reconstruct};
    pub use crate::version::PresentationVersion;
    pub use crate::{FolioError, FolioResult};
}
