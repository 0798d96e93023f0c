//! Mime-type to media-category lookup.
//!
//! The table is loaded once by the host (or taken from [`MediaTypes::builtin`])
//! and queried as a pure function afterwards.

use serde::{Deserialize, Serialize};

use crate::errors::{FolioError, FolioResult};

/// Media category of a canvas body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Sound,
    Video,
    Text,
    #[serde(rename = "3d")]
    ThreeD,
}

impl MediaCategory {
    pub fn is_av(&self) -> bool {
        matches!(self, Self::Sound | Self::Video)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Sound => "sound",
            Self::Video => "video",
            Self::Text => "text",
            Self::ThreeD => "3d",
        }
    }

    /// Category implied by a record `type` value.
    pub fn from_record_type(t: &str) -> Option<Self> {
        match t.trim().to_ascii_uppercase().as_str() {
            "IMAGE" => Some(Self::Image),
            "SOUND" => Some(Self::Sound),
            "VIDEO" => Some(Self::Video),
            "TEXT" => Some(Self::Text),
            "3D" => Some(Self::ThreeD),
            _ => None,
        }
    }
}

/// One row of the media table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypeEntry {
    /// Lower-case mime type or mime fragment, matched as a substring.
    pub mime_type: String,
    pub category: MediaCategory,
}

/// Immutable mime-type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTypes {
    entries: Vec<MediaTypeEntry>,
}

impl Default for MediaTypes {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MediaTypes {
    pub fn new(entries: Vec<MediaTypeEntry>) -> FolioResult<Self> {
        for e in &entries {
            if e.mime_type.trim().is_empty() {
                return Err(FolioError::invalid_config("media table contains an empty mime type"));
            }
        }
        let entries = entries
            .into_iter()
            .map(|e| MediaTypeEntry {
                mime_type: e.mime_type.trim().to_ascii_lowercase(),
                category: e.category,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Load a table from JSON: `[{"mimeType": "...", "category": "image"}, ...]`.
    pub fn from_json_slice(bytes: &[u8]) -> FolioResult<Self> {
        let entries: Vec<MediaTypeEntry> = serde_json::from_slice(bytes)
            .map_err(|e| FolioError::invalid_config(format!("invalid media table: {e}")))?;
        Self::new(entries)
    }

    /// Table shipped with the crate.
    pub fn builtin() -> Self {
        use MediaCategory::*;
        let rows: [(&str, MediaCategory); 20] = [
            ("image/jpeg", Image),
            ("image/png", Image),
            ("image/tiff", Image),
            ("image/gif", Image),
            ("image/jp2", Image),
            ("image/webp", Image),
            ("audio/mpeg", Sound),
            ("audio/mp4", Sound),
            ("audio/x-wav", Sound),
            ("audio/ogg", Sound),
            ("audio/flac", Sound),
            ("video/mp4", Video),
            ("video/webm", Video),
            ("video/ogg", Video),
            ("video/quicktime", Video),
            ("application/dash+xml", Video),
            ("application/pdf", Text),
            ("text/plain", Text),
            ("model/gltf", ThreeD),
            ("model/obj", ThreeD),
        ];
        Self {
            entries: rows
                .iter()
                .map(|(m, c)| MediaTypeEntry {
                    mime_type: (*m).to_string(),
                    category: *c,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category for `mime`: first table entry contained in it, else a
    /// major-type fallback, else `None`.
    pub fn category_for(&self, mime: &str) -> Option<MediaCategory> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.is_empty() {
            return None;
        }
        if let Some(e) = self.entries.iter().find(|e| mime.contains(&e.mime_type)) {
            return Some(e.category);
        }
        match mime.split('/').next() {
            Some("image") => Some(MediaCategory::Image),
            Some("audio") => Some(MediaCategory::Sound),
            Some("video") => Some(MediaCategory::Video),
            Some("text") => Some(MediaCategory::Text),
            Some("model") => Some(MediaCategory::ThreeD),
            _ => None,
        }
    }
}
