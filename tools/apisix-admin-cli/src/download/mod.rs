//! Saving exported configuration to disk.
//!
//! A [`Download`] owns a temporary file next to its destination. Bytes are
//! written to the temporary file and only become visible under the final
//! name on [`Download::commit`]; dropping an uncommitted download removes
//! the temporary file. A name that is already taken gets a ` (n)` suffix
//! before the extension, the way browsers number repeated downloads.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Upper bound on ` (n)` suffixes tried before giving up
const MAX_DEDUP_ATTEMPTS: u32 = 1000;

/// `name (n).ext` for `n > 0`, `name` itself for `n == 0`
pub fn numbered_name(filename: &str, n: u32) -> String {
    if n == 0 {
        return filename.to_string();
    }
    match filename.rfind('.') {
        Some(dot) if dot > 0 => {
            format!("{} ({}){}", &filename[..dot], n, &filename[dot..])
        }
        _ => format!("{filename} ({n})"),
    }
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to prepare download in {dir:?}: {source}")]
    Prepare {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {filename}: {source}")]
    Write {
        filename: String,
        source: std::io::Error,
    },
    #[error("Failed to save {path:?}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid download file name: {0:?}")]
    InvalidName(String),
}

/// Destination for downloaded files
pub trait DownloadSink: Send + Sync {
    /// Store `bytes` under `filename`, returning where it ended up
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SinkError>;
}

/// Writes downloads into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Acquire a scoped handle for `filename`
    pub fn begin(&self, filename: &str) -> Result<Download, SinkError> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename == "."
            || filename == ".."
        {
            return Err(SinkError::InvalidName(filename.to_string()));
        }
        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::Prepare {
            dir: self.dir.clone(),
            source,
        })?;
        let temp = NamedTempFile::new_in(&self.dir).map_err(|source| {
            SinkError::Prepare {
                dir: self.dir.clone(),
                source,
            }
        })?;
        debug!("download {filename} staged at {:?}", temp.path());
        Ok(Download {
            temp,
            filename: filename.to_string(),
            target: self.dir.join(filename),
        })
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SinkError> {
        let mut download = self.begin(filename)?;
        download.write_all(bytes)?;
        download.commit()
    }
}

/// In-flight download; the temporary file is released on drop
pub struct Download {
    temp: NamedTempFile,
    filename: String,
    target: PathBuf,
}

impl Download {
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.temp
            .write_all(bytes)
            .and_then(|_| self.temp.flush())
            .map_err(|source| SinkError::Write {
                filename: self.filename.clone(),
                source,
            })
    }

    /// Move the data to its final name, numbering it if the name is taken.
    /// Existing files are never overwritten.
    pub fn commit(self) -> Result<PathBuf, SinkError> {
        let dir = self
            .target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut temp = self.temp;
        let mut target = self.target;
        for n in 1..=MAX_DEDUP_ATTEMPTS {
            match temp.persist_noclobber(&target) {
                Ok(_) => return Ok(target),
                Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                    debug!("{:?} exists, trying the next number", target);
                    temp = e.file;
                    target = dir.join(numbered_name(&self.filename, n));
                }
                Err(e) => {
                    return Err(SinkError::Persist {
                        path: target,
                        source: e.error,
                    });
                }
            }
        }
        match temp.persist_noclobber(&target) {
            Ok(_) => Ok(target),
            Err(e) => Err(SinkError::Persist {
                path: target,
                source: e.error,
            }),
        }
    }
}
