//! Fixture loading from YAML files

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// A single test case from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub html: String,
    pub events: Vec<ExpectedEvent>,
    /// Whether surrounding markup may be added without changing the events
    #[serde(default = "default_true")]
    pub variations: bool,
}

fn default_true() -> bool {
    true
}

/// Expected event - either [Kind, value] or a detailed mapping
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExpectedEvent {
    /// [Kind, "link or content"]
    WithValue(String, String),
    /// Kind, value, and optionally attributes, span and comment length
    Detailed {
        kind: String,
        value: String,
        attributes: Option<IndexMap<String, String>>,
        span: Option<[u32; 4]>,
        length: Option<usize>,
    },
}

impl ExpectedEvent {
    pub fn kind(&self) -> &str {
        match self {
            ExpectedEvent::WithValue(kind, _) => kind,
            ExpectedEvent::Detailed { kind, .. } => kind,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ExpectedEvent::WithValue(_, value) => value,
            ExpectedEvent::Detailed { value, .. } => value,
        }
    }
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}
