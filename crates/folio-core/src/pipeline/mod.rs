//! Record-to-manifest mapping pipeline.
//!
//! Control flow:
//! - [`eligibility`] picks the primary display resource and its alternate
//!   views out of every web resource in the record
//! - `crate::sequence` puts the candidates in reading order
//! - [`canvas`] builds one canvas + painting annotation per resource
//! - [`fields`] derives the scalar manifest fields
//! - [`assemble`] ties the above together into a [`Manifest`]
//!
//! Full-text enrichment (`crate::fulltext`) and encoding (`crate::encode`)
//! happen after mapping, on the finished manifest.
//!
//! The core crate does not do network or filesystem I/O. Hosts fetch the
//! record and pass the parsed document in.

use crate::config::CoreConfig;
use crate::media::MediaTypes;
use crate::model::Manifest;

pub mod assemble;
pub mod canvas;
pub mod eligibility;
pub mod fields;

pub use assemble::{canvas_order, map_record, map_record_with};

/// A structured diagnostic emitted while mapping.
///
/// Diagnostics are intended for CLI printing and API response payloads. Every
/// diagnostic is also logged through `tracing` when it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDiagnostic {
    pub level: DiagnosticLevel,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl DiagnosticLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Context shared by all mapping steps: static configuration plus the
/// diagnostics collected so far.
#[derive(Debug, Clone)]
pub struct MappingContext<'a> {
    pub config: &'a CoreConfig,
    pub media: &'a MediaTypes,
    pub diagnostics: Vec<MappingDiagnostic>,
}

impl<'a> MappingContext<'a> {
    pub fn new(config: &'a CoreConfig, media: &'a MediaTypes) -> Self {
        Self {
            config,
            media,
            diagnostics: Vec::new(),
        }
    }

    pub fn push_info(&mut self, code: impl Into<String>, message: impl Into<String>) {
        let (code, message) = (code.into(), message.into());
        tracing::debug!(code = %code, "{message}");
        self.push(DiagnosticLevel::Info, code, message);
    }

    pub fn push_warning(&mut self, code: impl Into<String>, message: impl Into<String>) {
        let (code, message) = (code.into(), message.into());
        tracing::warn!(code = %code, "{message}");
        self.push(DiagnosticLevel::Warning, code, message);
    }

    pub fn push_error(&mut self, code: impl Into<String>, message: impl Into<String>) {
        let (code, message) = (code.into(), message.into());
        tracing::error!(code = %code, "{message}");
        self.push(DiagnosticLevel::Error, code, message);
    }

    fn push(&mut self, level: DiagnosticLevel, code: String, message: String) {
        self.diagnostics.push(MappingDiagnostic {
            level,
            code,
            message,
        });
    }

    /// First of `candidates`, recording a warning when there is more than one.
    pub fn first_candidate(&mut self, field: &str, candidates: Vec<String>) -> Option<String> {
        if candidates.len() > 1 {
            self.push_warning(
                "field.multiple_candidates",
                format!(
                    "{field}: {} candidates found, using {}",
                    candidates.len(),
                    candidates[0]
                ),
            );
        }
        candidates.into_iter().next()
    }
}

/// Mapping result.
#[derive(Debug, Clone)]
pub struct MappingReport {
    pub manifest: Manifest,
    pub diagnostics: Vec<MappingDiagnostic>,
}

impl MappingReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }

    pub fn warnings(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count()
    }
}
