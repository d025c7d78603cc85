//! Byte sources a reader can be constructed over

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Error, Result};

/// Where a reader takes its bytes from
#[derive(Debug, Clone)]
pub enum Source {
    /// A file on disk, opened on load
    Path(PathBuf),

    /// An in-memory byte buffer
    Buffer(Arc<[u8]>),
}

impl Source {
    /// Create a file source
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    /// Create an in-memory source
    pub fn buffer(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Buffer(bytes.into())
    }

    /// Open a fresh byte stream over the source
    pub(crate) fn open(&self) -> Result<Box<dyn Read>> {
        match self {
            Source::Path(path) => {
                let file = File::open(path).map_err(|e| {
                    Error::io(format!("Failed to open file {}", path.display()), e)
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            Source::Buffer(bytes) => Ok(Box::new(Cursor::new(Arc::clone(bytes)))),
        }
    }

    /// Drop the buffer backing an in-memory source
    pub(crate) fn release(&mut self) {
        if let Source::Buffer(bytes) = self {
            if !bytes.is_empty() {
                *bytes = Arc::from(Vec::new());
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "file {}", path.display()),
            Source::Buffer(bytes) => write!(f, "buffer of {} bytes", bytes.len()),
        }
    }
}
