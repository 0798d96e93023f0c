//! Presentation API versions.
//!
//! Centralizes version parsing for the two output encodings and the JSON-LD
//! contexts that identify them.

use crate::errors::{FolioError, FolioResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationVersion {
    /// Older schema generation (Presentation API 2.x).
    V2,
    /// Newer schema generation (Presentation API 3.x).
    V3,
}

impl PresentationVersion {
    /// Parse `2`, `3`, `v2`, `v3` (case-insensitive).
    pub fn parse(s: &str) -> FolioResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" | "v2" | "2.1" => Ok(Self::V2),
            "3" | "v3" | "3.0" => Ok(Self::V3),
            other => Err(FolioError::invalid_argument(format!(
                "unsupported presentation version: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2 => "2",
            Self::V3 => "3",
        }
    }

    /// JSON-LD context URL of the presentation API.
    pub const fn context(&self) -> &'static str {
        match self {
            Self::V2 => "http://iiif.io/api/presentation/2/context.json",
            Self::V3 => "http://iiif.io/api/presentation/3/context.json",
        }
    }
}

impl Default for PresentationVersion {
    fn default() -> Self {
        Self::V2
    }
}

impl std::fmt::Display for PresentationVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
