use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions offered by the chooser, compared case-insensitively
pub const ACCEPTED_EXTENSIONS: &[&str] = &["yaml", "yml"];

#[derive(Error, Debug)]
pub enum PickError {
    #[error("Unsupported file type: {0:?} (expected .yaml or .yml)")]
    UnsupportedExtension(PathBuf),
}

/// Source of the file to import.
///
/// `choose` behaves like a file input's change event: it yields a path only
/// when the selection changed, so callers clear the selection before every
/// invocation to have an unchanged file picked up again.
pub trait FilePicker: Send {
    /// Forget the current selection
    fn clear(&mut self);

    /// Open the chooser; `Ok(None)` means cancelled or unchanged
    fn choose(&mut self) -> Result<Option<PathBuf>, PickError>;
}

pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| e.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

/// Picker answering every invocation with a preset path
#[derive(Debug, Default)]
pub struct PathPicker {
    candidate: Option<PathBuf>,
    selected: Option<PathBuf>,
    selection_events: u64,
}

impl PathPicker {
    pub fn new(candidate: Option<PathBuf>) -> Self {
        Self {
            candidate,
            ..Default::default()
        }
    }

    /// Change what the next invocation returns; `None` simulates cancel
    pub fn set_candidate(&mut self, candidate: Option<PathBuf>) {
        self.candidate = candidate;
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// Number of change events delivered so far
    pub fn selection_events(&self) -> u64 {
        self.selection_events
    }
}

impl FilePicker for PathPicker {
    fn clear(&mut self) {
        self.selected = None;
    }

    fn choose(&mut self) -> Result<Option<PathBuf>, PickError> {
        let Some(path) = self.candidate.clone() else {
            return Ok(None);
        };
        if !is_accepted(&path) {
            return Err(PickError::UnsupportedExtension(path));
        }
        if self.selected.as_ref() == Some(&path) {
            return Ok(None);
        }
        self.selected = Some(path.clone());
        self.selection_events += 1;
        Ok(Some(path))
    }
}
