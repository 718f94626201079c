//! Release artifacts: archive classification and directory scanning.

use crate::error::{ReleaseError, Result};
use std::path::{Path, PathBuf};

/// Directory the build leaves its archives in
pub const DEFAULT_ARTIFACT_DIR: &str = "./bin";

/// Archive formats accepted as release assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// `.zip`
    Zip,
    /// `.tar.gz`
    TarGz,
}

impl ArchiveKind {
    /// Classify a file name by suffix; `None` for anything that is not an archive
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".tar.gz") {
            Some(Self::TarGz)
        } else {
            None
        }
    }

    /// MIME type sent as the upload's `Content-Type`
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Zip => "application/zip",
            Self::TarGz => "application/gzip",
        }
    }
}

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// Path to the file on disk
    pub path: PathBuf,
    /// Base name, used as the asset name
    pub name: String,
    /// Archive format
    pub kind: ArchiveKind,
}

impl UploadTarget {
    /// Content type for this asset
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }
}

/// List archive files directly inside `dir`, ordered by file name.
///
/// Subdirectories and files that are not archives are skipped.
pub fn scan_dir(dir: &Path) -> Result<Vec<UploadTarget>> {
    let scan_err = |source: std::io::Error| ReleaseError::Scan {
        path: dir.to_path_buf(),
        source,
    };

    let mut targets = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        if entry.file_type().map_err(scan_err)?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(kind) = ArchiveKind::from_file_name(&name) else {
            log::debug!("Skipping non-archive {}", name);
            continue;
        };

        targets.push(UploadTarget {
            path: dir.join(&name),
            name,
            kind,
        });
    }

    targets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(targets)
}
