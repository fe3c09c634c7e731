//! CSV export download
//!
//! Pulls the server's export attachment and writes it to disk verbatim.
//! An empty dataset or transport failure reports through the banner and
//! writes nothing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::api::GoldApi;
use crate::error_reporter::ErrorReporter;

/// Fallback file name when the server sends no attachment disposition
const DEFAULT_EXPORT_NAME: &str = "gold_purchases.csv";

pub struct ExportFlow {
    api: Arc<dyn GoldApi>,
    errors: Arc<ErrorReporter>,
}

impl ExportFlow {
    pub fn new(api: Arc<dyn GoldApi>, errors: Arc<ErrorReporter>) -> Self {
        Self { api, errors }
    }

    /// Download the export and save it. `dest` overrides the server's
    /// suggested file name. Returns the written path on success.
    pub async fn export(&self, dest: Option<&Path>) -> Option<PathBuf> {
        let payload = match self.api.export_csv().await {
            Ok(payload) => payload,
            Err(e) => {
                self.errors.show(&format!("Export failed: {}", e));
                return None;
            }
        };

        let path = choose_destination(dest, payload.file_name.as_deref());
        if let Err(e) = tokio::fs::write(&path, &payload.bytes).await {
            self.errors
                .show(&format!("Failed to write {}: {}", path.display(), e));
            return None;
        }

        info!("Exported {} bytes to {}", payload.bytes.len(), path.display());
        Some(path)
    }
}

fn choose_destination(dest: Option<&Path>, server_name: Option<&str>) -> PathBuf {
    match dest {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(server_name.unwrap_or(DEFAULT_EXPORT_NAME)),
    }
}
