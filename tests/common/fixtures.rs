use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Discover all .peggy files in tests/fixtures/
pub fn discover_fixtures() -> Vec<PathBuf> {
    let mut fixtures: Vec<_> = fs::read_dir(fixtures_dir())
        .expect("Failed to read fixtures directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("peggy"))
        .collect();
    fixtures.sort();
    fixtures
}

/// Load a grammar from tests/fixtures/, e.g. `load_fixture("json")`
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(format!("{}.peggy", name));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}
