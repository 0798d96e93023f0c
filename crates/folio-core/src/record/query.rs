//! Declarative path queries over the source record.
//!
//! Path syntax:
//! - `name` selects an object member
//! - `[*]` selects every element of an array (a non-array value selects itself)
//! - `[n]` selects the n-th element of an array
//! - segments are joined with `.`, e.g. `aggregations[*].webResources[*].about`
//!
//! Missing members and `null` values produce no matches. Results are returned
//! in document order.

use serde_json::Value;

use crate::errors::{FolioError, FolioResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Each,
    Index(usize),
}

/// A parsed query path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPath {
    segments: Vec<Segment>,
}

impl QueryPath {
    pub fn parse(path: &str) -> FolioResult<Self> {
        if path.trim().is_empty() {
            return Err(FolioError::invalid_argument("empty query path"));
        }

        let mut segments = Vec::new();
        for part in path.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(i) => (&part[..i], &part[i..]),
                None => (part, ""),
            };

            if name.is_empty() && rest.is_empty() {
                return Err(FolioError::invalid_argument(format!(
                    "empty segment in query path: {path}"
                )));
            }
            if !name.is_empty() {
                segments.push(Segment::Field(name.to_string()));
            }

            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(|| {
                    FolioError::invalid_argument(format!("unclosed bracket in query path: {path}"))
                })?;
                let inner = &rest[1..close];
                if inner == "*" {
                    segments.push(Segment::Each);
                } else {
                    let idx = inner.parse::<usize>().map_err(|_| {
                        FolioError::invalid_argument(format!(
                            "invalid index `{inner}` in query path: {path}"
                        ))
                    })?;
                    segments.push(Segment::Index(idx));
                }
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(FolioError::invalid_argument(format!(
                        "unexpected characters after bracket in query path: {path}"
                    )));
                }
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Evaluate the path against `root`.
    pub fn select<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        let mut current: Vec<&'a Value> = vec![root];
        for seg in &self.segments {
            let mut next = Vec::new();
            for v in current {
                match seg {
                    Segment::Field(name) => {
                        if let Some(child) = v.get(name.as_str()) {
                            if !child.is_null() {
                                next.push(child);
                            }
                        }
                    }
                    Segment::Each => match v {
                        Value::Array(items) => next.extend(items.iter().filter(|i| !i.is_null())),
                        other => next.push(other),
                    },
                    Segment::Index(i) => {
                        if let Some(child) = v.as_array().and_then(|a| a.get(*i)) {
                            if !child.is_null() {
                                next.push(child);
                            }
                        }
                    }
                }
            }
            current = next;
        }
        current
    }
}

/// Select every value matching `path`.
pub fn select<'a>(root: &'a Value, path: &str) -> FolioResult<Vec<&'a Value>> {
    Ok(QueryPath::parse(path)?.select(root))
}

/// Select values matching `path` that satisfy `pred`.
pub fn select_where<'a, F>(root: &'a Value, path: &str, pred: F) -> FolioResult<Vec<&'a Value>>
where
    F: Fn(&Value) -> bool,
{
    Ok(select(root, path)?.into_iter().filter(|v| pred(v)).collect())
}

/// Collect string values matching `path`. Arrays of strings are flattened;
/// numbers and other scalars are ignored.
pub fn strings<'a>(root: &'a Value, path: &str) -> FolioResult<Vec<&'a str>> {
    let mut out = Vec::new();
    for v in select(root, path)? {
        push_strings(v, &mut out);
    }
    Ok(out)
}

/// First non-empty string matching `path`.
pub fn first_str<'a>(root: &'a Value, path: &str) -> FolioResult<Option<&'a str>> {
    Ok(strings(root, path)?.into_iter().find(|s| !s.trim().is_empty()))
}

/// Read a value as a string, or the first string of an array.
pub fn as_first_str(v: &Value) -> Option<&str> {
    let mut out = Vec::new();
    push_strings(v, &mut out);
    out.into_iter().find(|s| !s.trim().is_empty())
}

/// Read a value as an unsigned integer, accepting numeric strings.
pub fn as_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Array(items) => items.first().and_then(as_u64),
        _ => None,
    }
}

fn push_strings<'a>(v: &'a Value, out: &mut Vec<&'a str>) {
    match v {
        Value::String(s) => out.push(s.as_str()),
        Value::Array(items) => {
            for i in items {
                if let Value::String(s) = i {
                    out.push(s.as_str());
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "about": "/1/a",
            "aggregations": [
                {
                    "edmIsShownBy": "http://x/1.jpg",
                    "hasView": ["http://x/2.jpg", "http://x/3.jpg"],
                    "webResources": [
                        {"about": "http://x/1.jpg", "ebucoreWidth": 10},
                        {"about": "http://x/2.jpg", "ebucoreWidth": "20"},
                        null
                    ]
                }
            ]
        })
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        assert!(QueryPath::parse("").is_err());
        assert!(QueryPath::parse("a..b").is_err());
        assert!(QueryPath::parse("a[*").is_err());
        assert!(QueryPath::parse("a[x]").is_err());
        assert!(QueryPath::parse("a[0]b").is_err());
    }

    #[test]
    fn parse_segments() {
        let p = QueryPath::parse("a[*].b[2][*]").unwrap();
        assert_eq!(
            p.segments(),
            &[
                Segment::Field("a".into()),
                Segment::Each,
                Segment::Field("b".into()),
                Segment::Index(2),
                Segment::Each,
            ]
        );
    }

    #[test]
    fn select_walks_arrays_and_skips_nulls() {
        let d = doc();
        let ids = strings(&d, "aggregations[*].webResources[*].about").unwrap();
        assert_eq!(ids, vec!["http://x/1.jpg", "http://x/2.jpg"]);
    }

    #[test]
    fn strings_flatten_arrays() {
        let d = doc();
        let views = strings(&d, "aggregations[*].hasView").unwrap();
        assert_eq!(views, vec!["http://x/2.jpg", "http://x/3.jpg"]);
    }

    #[test]
    fn select_where_filters() {
        let d = doc();
        let hits = select_where(&d, "aggregations[*].webResources[*]", |v| {
            v.get("about").and_then(Value::as_str) == Some("http://x/2.jpg")
        })
        .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(as_u64(&hits[0]["ebucoreWidth"]), Some(20));
    }

    #[test]
    fn missing_members_yield_nothing() {
        let d = doc();
        assert!(select(&d, "proxies[*].dcTitle").unwrap().is_empty());
        assert_eq!(first_str(&d, "europeanaAggregation.edmPreview").unwrap(), None);
    }

    #[test]
    fn index_segment() {
        let d = doc();
        assert_eq!(
            first_str(&d, "aggregations[0].hasView[1]").unwrap(),
            Some("http://x/3.jpg")
        );
        assert!(select(&d, "aggregations[3]").unwrap().is_empty());
    }
}
