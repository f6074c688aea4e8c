use serde::Serialize;
use std::path::PathBuf;

/// Where the import flow currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPhase {
    #[default]
    Idle,
    Picking,
    Reading,
    Submitting,
    Succeeded,
    Failed,
}

impl ImportPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportPhase::Succeeded | ImportPhase::Failed)
    }
}

/// Display state of the import/export panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelState {
    /// Success message of the latest import
    pub import_result: Option<String>,
    /// Failure message of the latest import
    pub error_message: Option<String>,
    /// Most recent import time reported by the server
    pub last_import: Option<String>,
    /// An import or export request is outstanding
    pub loading: bool,
    pub import_phase: ImportPhase,
}

impl PanelState {
    /// Action buttons are disabled while a request is outstanding
    pub fn actions_enabled(&self) -> bool {
        !self.loading
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Chooser closed without a new selection
    Cancelled,
    Succeeded { message: String },
    Failed { message: String },
}

impl ImportOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ImportOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { filename: String, path: PathBuf },
    Failed { message: String },
}

impl ExportOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExportOutcome::Failed { .. })
    }
}
