use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use tempfile::NamedTempFile;

/// Whole-file access. There is no partial write path: `replace` swaps the
/// entire contents or leaves them as they were.
pub trait FileHandler: Send + Sync {
    fn read_all(&mut self) -> Result<Vec<u8>>;
    fn replace(&mut self, data: &[u8]) -> Result<()>;
}

pub struct FileHandlerImpl {
    path: PathBuf,
}

impl FileHandlerImpl {
    pub fn new(filename: &str) -> Result<Self> {
        if filename.trim().is_empty() {
            return Err(anyhow!("storage file name must not be empty"));
        }

        Ok(Self {
            path: PathBuf::from(filename),
        })
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl FileHandler for FileHandlerImpl {
    fn read_all(&mut self) -> Result<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(buffer) => Ok(buffer),
            // not a read failure: a directory file that was never written is
            // empty, and the first replace creates it
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", self.path.display())),
        }
    }

    fn replace(&mut self, data: &[u8]) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(self.parent_dir())
            .with_context(|| format!("failed to create temporary file next to {}", self.path.display()))?;
        tmp.write_all(data)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        // the temporary file is created owner-only; keep the mode of the file it replaces
        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .with_context(|| format!("failed to copy permissions of {}", self.path.display()))?;
        }
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        log::debug!("replaced {} with {} bytes", self.path.display(), data.len());
        Ok(())
    }
}

/// Keeps the file contents in a shared buffer. Clones share the buffer, so a
/// test can hand one clone to a store and inspect the bytes through another.
#[derive(Clone, Default)]
pub struct InMemoryFileHandler {
    contents: Arc<Mutex<Vec<u8>>>,
}

impl InMemoryFileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(data: &[u8]) -> Self {
        Self {
            contents: Arc::new(Mutex::new(data.to_vec())),
        }
    }

    pub fn contents(&self) -> Result<Vec<u8>> {
        let guard = self.contents.lock().map_err(|_| anyhow!("in-memory file lock poisoned"))?;
        Ok(guard.clone())
    }
}

impl FileHandler for InMemoryFileHandler {
    fn read_all(&mut self) -> Result<Vec<u8>> {
        self.contents()
    }

    fn replace(&mut self, data: &[u8]) -> Result<()> {
        let mut guard = self.contents.lock().map_err(|_| anyhow!("in-memory file lock poisoned"))?;
        *guard = data.to_vec();
        Ok(())
    }
}
