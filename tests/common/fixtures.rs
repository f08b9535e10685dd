use bindmeta::ast::Program;
use std::fs;
use std::path::{Path, PathBuf};

/// Path of a model fixture under tests/fixtures/
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load and deserialize a model fixture
pub fn load_model(name: &str) -> Program {
    let text = fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Invalid model in {}: {}", name, e))
}
