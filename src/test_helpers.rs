//! Shared test utilities for the folio test suite.
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = config_dir("[site]\nowner_name = \"Ada\"\n");
//! let config = load_config(tmp.path()).unwrap();
//!
//! assert_tags(&sink, &[(MetaTag::Description, "D"), (MetaTag::Keywords, "k")]);
//! ```

use crate::metadata::{MapSink, MetaTag};
use tempfile::TempDir;

/// A temp directory holding `config.toml` with `content`.
pub fn config_dir(content: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(crate::config::CONFIG_FILE), content).unwrap();
    tmp
}

/// Assert the sink's tag contents. Panics listing every mismatch.
pub fn assert_tags(sink: &MapSink, expected: &[(MetaTag, &str)]) {
    let mismatches: Vec<String> = expected
        .iter()
        .filter(|(tag, want)| sink.get(*tag) != Some(*want))
        .map(|(tag, want)| format!("{tag}: expected {want:?}, got {:?}", sink.get(*tag)))
        .collect();
    assert!(mismatches.is_empty(), "tag mismatch:\n{}", mismatches.join("\n"));
}
