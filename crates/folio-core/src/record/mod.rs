//! Read-only access to the parsed source record.
//!
//! The record is an opaque JSON document owned by the caller. Every other
//! component reads it through the path queries in [`query`].

use itertools::Itertools;
use serde_json::Value;

use crate::errors::{FolioError, FolioResult};
use crate::model::language::LanguageMap;

pub mod query;

/// Entity tables consulted when enriching URL-valued metadata.
pub const ENTITY_TABLES: [&str; 4] = ["timespans", "agents", "concepts", "places"];

/// A parsed source record.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    root: Value,
    id: String,
}

impl SourceRecord {
    /// Wrap a parsed record document.
    ///
    /// Accepts either the record object itself or an API envelope with the
    /// record under `object`. The record must carry a non-empty `about` id.
    pub fn from_json(doc: Value) -> FolioResult<Self> {
        let root = match doc {
            Value::Object(mut map) if map.contains_key("object") => map
                .remove("object")
                .unwrap_or(Value::Null),
            other => other,
        };

        if !root.is_object() {
            return Err(FolioError::invalid_argument("record must be a JSON object"));
        }

        let id = query::first_str(&root, "about")?
            .ok_or_else(|| FolioError::invalid_argument("record has no `about` id"))?
            .to_string();

        Ok(Self { root, id })
    }

    /// Parse a record from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> FolioResult<Self> {
        let doc: Value = serde_json::from_slice(bytes)
            .map_err(|e| FolioError::invalid_argument(format!("failed to parse record JSON: {e}")))?;
        Self::from_json(doc)
    }

    /// Record id, e.g. `/9200397/BibliographicResource_3000126284212`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn json(&self) -> &Value {
        &self.root
    }

    /// Upper-case record type (`IMAGE`, `VIDEO`, ...), if declared.
    pub fn record_type(&self) -> Option<String> {
        query::first_str(&self.root, "type")
            .ok()
            .flatten()
            .map(|s| s.trim().to_ascii_uppercase())
    }

    pub fn select(&self, path: &str) -> FolioResult<Vec<&Value>> {
        query::select(&self.root, path)
    }

    pub fn strings(&self, path: &str) -> FolioResult<Vec<&str>> {
        query::strings(&self.root, path)
    }

    pub fn first_str(&self, path: &str) -> FolioResult<Option<&str>> {
        query::first_str(&self.root, path)
    }

    /// Distinct non-empty string candidates for `path`, in document order.
    pub fn candidates(&self, path: &str) -> FolioResult<Vec<String>> {
        Ok(self
            .strings(path)?
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unique()
            .collect())
    }

    /// The language map stored at `field` on every proxy, in proxy order.
    /// Proxies without the field are skipped.
    pub fn proxy_language_maps(&self, field: &str) -> FolioResult<Vec<LanguageMap>> {
        Ok(self
            .select(&format!("proxies[*].{field}"))?
            .into_iter()
            .map(LanguageMap::from_json)
            .filter(|m| !m.is_empty())
            .collect())
    }

    /// Preferred label of the contextual entity whose `about` equals `about`.
    pub fn entity_label(&self, about: &str) -> Option<LanguageMap> {
        ENTITY_TABLES.iter().find_map(|table| {
            let hits = query::select_where(&self.root, &format!("{table}[*]"), |v| {
                v.get("about").and_then(Value::as_str) == Some(about)
            })
            .ok()?;
            hits.first()
                .and_then(|e| e.get("prefLabel"))
                .map(LanguageMap::from_json)
                .filter(|m| !m.is_empty())
        })
    }
}
