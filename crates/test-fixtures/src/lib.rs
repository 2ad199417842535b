//! Shared fixtures for integration tests: JSON element catalogs and stub
//! collaborators (embedders, indexes, detectors).

pub mod stubs;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use heval_core::models::DetectedElement;

pub use stubs::{
    exemplar, EmptyIndex, FailingDetector, FailingIndex, FixedDetector, SlowIndex, StubEmbedder,
};

/// Root directory of the bundled fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load an element catalog by fixture name, e.g. `"login_form"`.
pub fn catalog(name: &str) -> Vec<DetectedElement> {
    load_fixture(&format!("{name}.json"))
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}
