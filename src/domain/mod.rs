//! Strongly-typed domain structures for uploads and printers.
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Name of a system printer as reported by enumeration.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PrinterName(String);

impl PrinterName {
    pub fn try_new(value: String) -> Result<Self, TypeConstraintError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyPrinterName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn try_from_str(value: &str) -> Result<Self, TypeConstraintError> {
        Self::try_new(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PrinterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Directory holding uploaded documents (e.g. `./uploads`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UploadRoot(PathBuf);

impl UploadRoot {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Create the root and its incoming directory if they do not exist yet.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(self.incoming_dir())
    }

    /// Directory receiving multipart bodies before they are validated.
    pub fn incoming_dir(&self) -> PathBuf {
        self.0.join(".incoming")
    }

    pub fn resolve(&self, name: &StoredFileName) -> PathBuf {
        self.0.join(name.as_str())
    }

    /// Whether `path` is a regular file stored directly in this root.
    ///
    /// Both sides are canonicalized, so symlinks and `..` segments cannot
    /// escape the root. Files still in [`Self::incoming_dir`] are excluded.
    pub fn contains(&self, path: &Path) -> bool {
        let root = match fs::canonicalize(&self.0) {
            Ok(root) => root,
            Err(_) => return false,
        };
        match fs::canonicalize(path) {
            Ok(candidate) => candidate.parent() == Some(root.as_path()) && candidate.is_file(),
            Err(_) => false,
        }
    }
}

impl From<PathBuf> for UploadRoot {
    fn from(value: PathBuf) -> Self {
        Self::new(value)
    }
}

/// Generated on-disk name of a persisted upload.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StoredFileName(String);

impl StoredFileName {
    pub fn generate() -> Self {
        Self(format!("upload-{}.pdf", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoredFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A PDF accepted by the upload endpoint and stored under the upload root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UploadedPdf {
    path: PathBuf,
    original_name: Option<String>,
    size: usize,
}

impl UploadedPdf {
    pub fn new(path: PathBuf, original_name: Option<String>, size: usize) -> Self {
        Self {
            path,
            original_name,
            size,
        }
    }

    /// Absolute, canonical location of the stored file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Operating system family selecting the print mechanism.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Unsupported(String),
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => f.write_str("windows"),
            Self::MacOs => f.write_str("macos"),
            Self::Linux => f.write_str("linux"),
            Self::Unsupported(os) => f.write_str(os),
        }
    }
}


#[derive(Debug, Error)]
pub enum TypeConstraintError {
    #[error("printer name must not be empty")]
    EmptyPrinterName,
}
