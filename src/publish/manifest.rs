use serde::{Deserialize, Serialize};

/// Update metadata polled by feed consumers
///
/// Field names are fixed by the consumer, hence the camelCase renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateManifest {
    pub version: String,
    #[serde(rename = "versionCode")]
    pub version_code: u64,
    #[serde(rename = "zipUrl")]
    pub zip_url: String,
    /// Public URL of the published changelog
    pub changelog: String,
}

impl UpdateManifest {
    /// Serialize as pretty JSON with two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
