//! CSV import flow
//!
//! State machine `Idle → FileSelected → Uploading → {ResultsShown, Idle}`.
//! The selected file is explicit component state passed to the upload
//! operation, never process-wide. There is no cancel: an upload either
//! completes (HTTP 200, results shown) or fails back to Idle with all
//! transient state cleared.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::api::GoldApi;
use crate::error_reporter::ErrorReporter;
use crate::view::Screen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportState {
    Idle,
    FileSelected(PathBuf),
    Uploading,
    ResultsShown,
}

/// How the results surface was dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// "OK": also reloads the ledger with cached price data
    Ok,
    /// "X": close without touching the ledger
    Close,
}

pub struct ImportFlow {
    api: Arc<dyn GoldApi>,
    screen: Arc<dyn Screen>,
    errors: Arc<ErrorReporter>,
    state: ImportState,
}

impl ImportFlow {
    pub fn new(api: Arc<dyn GoldApi>, screen: Arc<dyn Screen>, errors: Arc<ErrorReporter>) -> Self {
        Self {
            api,
            screen,
            errors,
            state: ImportState::Idle,
        }
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    /// Whether the confirm action is currently available
    pub fn can_upload(&self) -> bool {
        matches!(self.state, ImportState::FileSelected(_))
    }

    /// Handle a file selection. Anything not named `*.csv` is rejected
    /// and the flow returns to Idle.
    pub fn select_file(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !name.ends_with(".csv") {
            self.errors.show("Please select a CSV file");
            self.screen.reset_import();
            self.state = ImportState::Idle;
            return;
        }

        self.screen.import_file_selected(&name);
        self.state = ImportState::FileSelected(path.to_path_buf());
    }

    /// Confirm the upload of the held file. Progress is reported
    /// proportionally as the body streams out.
    pub async fn upload(&mut self) {
        let ImportState::FileSelected(path) = std::mem::replace(&mut self.state, ImportState::Uploading)
        else {
            self.state = ImportState::Idle;
            self.errors.show("No file selected");
            return;
        };

        let progress_screen = Arc::clone(&self.screen);
        let progress: crate::api::ProgressFn =
            Box::new(move |loaded, total| progress_screen.upload_progress(loaded, total));

        match self.api.import_csv(&path, progress).await {
            Ok(resp) => {
                let mut lines = Vec::new();
                if resp.success {
                    lines.push(format!(
                        "✓ Successfully imported {} purchases",
                        resp.imported_count
                    ));
                    if resp.error_count > 0 {
                        lines.push(format!(
                            "⚠ {} rows had errors and were skipped",
                            resp.error_count
                        ));
                    }
                } else {
                    lines.push(format!(
                        "✗ Import failed: {}",
                        resp.message.as_deref().unwrap_or("unknown error")
                    ));
                }

                self.screen.show_import_results(&lines);
                self.screen.reset_import();
                self.state = ImportState::ResultsShown;
            }
            Err(e) => {
                debug!("upload failed: {:#}", e);
                self.errors.show(&format!("Error uploading file: {}", e));
                self.screen.reset_import();
                self.state = ImportState::Idle;
            }
        }
    }

    /// Dismiss the results surface. Returns true when the caller should
    /// reload the ledger (cached), which only the OK affordance requests.
    pub fn dismiss(&mut self, dismissal: Dismissal) -> bool {
        if self.state != ImportState::ResultsShown {
            return false;
        }
        self.state = ImportState::Idle;
        matches!(dismissal, Dismissal::Ok)
    }
}
