//! Files discovered under the validation root.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A file picked up by discovery.
///
/// Name and extension are captured once at discovery time; content is only
/// read when a check asks for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateFile {
    path: PathBuf,
    file_name: String,
    extension: String,
}

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            extension,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, including the extension.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Extension as found on disk, without the leading dot. Empty when the
    /// file has none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn open(&self) -> io::Result<File> {
        File::open(&self.path)
    }

    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

impl std::fmt::Display for CandidateFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
