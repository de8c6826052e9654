//! # Document Files
//!
//! Connects a [`SplitBuffer`] to the file it was loaded from.
//!
//! ## What it does
//!
//! - Opens a file, creating it when missing, and loads it into a buffer
//! - Refuses protected paths (the log file and anything configured)
//! - Checks read/write permission before loading an existing file
//! - Writes the buffer back, prefix then suffix, straight into the file
//!
//! Only one file is active at a time. All path and permission checks happen
//! before the buffer is asked to write anything.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::buffer::{BufferError, SplitBuffer};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("refusing to touch protected file {0}")]
    Protected(PathBuf),

    #[error("missing read/write permission for {0}")]
    PermissionDenied(PathBuf),

    #[error("no file is open")]
    NoActiveFile,

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

impl DocumentError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            DocumentError::PermissionDenied(path.to_path_buf())
        } else {
            DocumentError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// The file behind the buffer being edited
#[derive(Debug, Default)]
pub struct Document {
    path: Option<PathBuf>,
    protected: Vec<PathBuf>,
    truncated: bool,
}

impl Document {
    /// Create a document manager that never opens or deletes `protected`
    pub fn new(protected: Vec<PathBuf>) -> Self {
        Self {
            path: None,
            protected,
            truncated: false,
        }
    }

    /// Open `path` and load it into a new buffer.
    ///
    /// A missing file is created empty. Content beyond the buffer's capacity
    /// is left out, see [`Document::was_truncated`]. On failure the
    /// previously active file stays open.
    pub fn open<const CAP: usize>(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<SplitBuffer<CAP>, DocumentError> {
        let path = path.as_ref();

        if self.is_protected(path) {
            return Err(DocumentError::Protected(path.to_path_buf()));
        }

        let file = if path.exists() {
            OpenOptions::new().read(true).write(true).open(path)
        } else {
            tracing::info!("creating {}", path.display());
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
        }
        .map_err(|e| DocumentError::io(path, e))?;

        let limit = SplitBuffer::<CAP>::MAX_LEN;
        let mut bytes = Vec::with_capacity(limit);
        // One extra byte tells us whether anything was cut off.
        file.take(limit as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| DocumentError::io(path, e))?;

        // The previous file stays active until the new one has loaded
        if self.path.is_some() {
            tracing::warn!("opening {} without closing the previous file", path.display());
            self.close();
        }

        self.truncated = bytes.len() > limit;
        if self.truncated {
            tracing::warn!(
                "{} is larger than {} bytes, the rest was not loaded",
                path.display(),
                limit
            );
        }

        self.path = Some(path.to_path_buf());
        tracing::debug!("opened {} ({} bytes)", path.display(), bytes.len().min(limit));
        Ok(SplitBuffer::create(bytes))
    }

    /// Replace the file's content with the buffer's.
    pub fn save<const CAP: usize>(&self, buffer: &SplitBuffer<CAP>) -> Result<(), DocumentError> {
        let path = self.path.as_deref().ok_or(DocumentError::NoActiveFile)?;

        let file = File::create(path).map_err(|e| DocumentError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        buffer.save(&mut writer)?;
        writer.flush().map_err(|e| DocumentError::io(path, e))?;

        tracing::debug!("saved {} ({} bytes)", path.display(), buffer.len());
        Ok(())
    }

    /// Save asynchronously, materializing the content first
    pub async fn save_async<const CAP: usize>(
        &self,
        buffer: &SplitBuffer<CAP>,
    ) -> Result<(), DocumentError> {
        let path = self.path.as_deref().ok_or(DocumentError::NoActiveFile)?;

        let content = buffer.to_bytes();
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| DocumentError::io(path, e))?;
        file.write_all(&content)
            .await
            .map_err(|e| DocumentError::io(path, e))?;
        file.sync_all()
            .await
            .map_err(|e| DocumentError::io(path, e))?;

        Ok(())
    }

    /// Forget the active file
    pub fn close(&mut self) {
        if self.path.take().is_none() {
            tracing::warn!("attempting to close an unopened file");
        }
        self.truncated = false;
    }

    /// Delete a file from disk. Deleting the active file also closes it.
    pub fn delete(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        if self.is_protected(path) {
            return Err(DocumentError::Protected(path.to_path_buf()));
        }

        tracing::debug!("deleting {}", path.display());
        fs::remove_file(path).map_err(|e| DocumentError::io(path, e))?;

        if self.path.as_deref() == Some(path) {
            self.close();
        }
        Ok(())
    }

    /// Whether `path` names one of the protected files
    pub fn is_protected(&self, path: &Path) -> bool {
        let candidate = normalize(path);
        self.protected.iter().any(|p| normalize(p) == candidate)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.path.is_some()
    }

    /// Whether the last open left part of the file out
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// File name for display
    pub fn name(&self) -> String {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("untitled")
            .to_string()
    }
}

fn normalize(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
