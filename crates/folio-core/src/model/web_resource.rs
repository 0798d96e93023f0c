//! Web resources: the individual renditions (images, audio, video, pages) of
//! an object, as declared in the record's aggregations.

use serde::Serialize;
use serde_json::Value;

use crate::errors::FolioResult;
use crate::model::language::LanguageMap;
use crate::record::{query, SourceRecord};

/// A web resource. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebResource {
    pub id: String,
    /// Id of the resource that follows this one, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_in_sequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
}

impl WebResource {
    /// A bare resource with only an id, mostly useful for tests and callers
    /// that build resources by hand.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            next_in_sequence: None,
            mime_type: None,
            width: None,
            height: None,
            duration_ms: None,
            attribution_text: None,
            rights_text: None,
            service_id: None,
        }
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next_in_sequence = Some(next.into());
        self
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn with_size(mut self, width: u64, height: u64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_service(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Decode one record `webResources[]` entry. Returns `None` when the entry
    /// has no usable `about` id.
    pub fn from_json(v: &Value) -> Option<Self> {
        let id = v.get("about").and_then(query::as_first_str)?.trim().to_string();
        if id.is_empty() {
            return None;
        }

        let text = |key: &str| {
            v.get(key)
                .and_then(query::as_first_str)
                .map(|s| s.trim().to_string())
        };
        let number = |key: &str| v.get(key).and_then(query::as_u64);

        Some(Self {
            id,
            next_in_sequence: text("nextInSequence"),
            mime_type: text("ebucoreHasMimeType"),
            width: number("ebucoreWidth"),
            height: number("ebucoreHeight"),
            duration_ms: number("ebucoreDuration"),
            attribution_text: text("textAttributionSnippet"),
            rights_text: v
                .get("webResourceEdmRights")
                .map(LanguageMap::from_json)
                .and_then(|m| m.first_value().map(str::to_string)),
            service_id: text("svcsHasService"),
        })
    }
}

/// Every web resource declared in the record's aggregations, in record order.
pub fn web_resources(record: &SourceRecord) -> FolioResult<Vec<WebResource>> {
    Ok(record
        .select("aggregations[*].webResources[*]")?
        .into_iter()
        .filter_map(WebResource::from_json)
        .collect())
}

/// An entry of the record's service table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub id: String,
    pub conforms_to: Option<String>,
    pub profile: Option<String>,
}

/// Look up `service_id` in the record's `services` table.
pub fn find_service(record: &SourceRecord, service_id: &str) -> FolioResult<Option<ServiceEntry>> {
    let hits = record.select("services[*]")?;
    Ok(hits
        .into_iter()
        .find(|s| s.get("about").and_then(Value::as_str).map(str::trim) == Some(service_id))
        .map(|s| ServiceEntry {
            id: service_id.to_string(),
            conforms_to: s
                .get("dctermsConformsTo")
                .and_then(query::as_first_str)
                .map(str::to_string),
            profile: s
                .get("doapImplements")
                .and_then(query::as_first_str)
                .map(str::to_string),
        }))
}
