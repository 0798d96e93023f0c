use std::fs;
use std::path::PathBuf;

use folio_core::record::SourceRecord;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("fixtures")
        .join("records")
}

pub fn record(name: &str) -> SourceRecord {
    let path = fixtures_dir().join(name);
    let bytes = fs::read(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    SourceRecord::from_slice(&bytes).unwrap_or_else(|e| panic!("invalid fixture {name}: {e}"))
}
