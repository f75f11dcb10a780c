//! Snapshot and blob storage location configuration.

use serde::{Deserialize, Serialize};

/// Where the CLI host keeps its working data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the JSON snapshot holding stages and items.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Root directory for locally stored file payloads.
    #[serde(default = "default_blob_root")]
    pub blob_root: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            blob_root: default_blob_root(),
        }
    }
}

fn default_snapshot_path() -> String {
    "data/workhub.json".to_string()
}

fn default_blob_root() -> String {
    "data/blobs".to_string()
}
