//! Gzip sidecar generation for a single asset.
//!
//! Reads the entire file into memory, compresses at maximum effort and writes
//! the result next to the original as `<path>.gz`, overwriting any previous
//! artifact.

use anyhow::{Context, Result};
use flate2::{Compression, GzBuilder};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Size accounting for one compressed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub path: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
}

impl FileStats {
    /// Percent reduction. Empty inputs report 0.0 instead of dividing by zero.
    pub fn ratio(&self) -> f64 {
        reduction(self.original_size, self.compressed_size)
    }

    /// Bytes saved; negative when gzip overhead exceeds the gain.
    pub fn saved(&self) -> i64 {
        self.original_size as i64 - self.compressed_size as i64
    }

    /// File name for display, falling back to the full path.
    pub fn name(&self) -> String {
        display_name(&self.path)
    }
}

/// `(1 - compressed / original) * 100`, or 0.0 for a zero-length original.
pub fn reduction(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Sibling artifact path: the literal `.gz` appended to the full file name.
pub fn artifact_path(path: &Path) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(".gz");
    PathBuf::from(s)
}

/// Gzip `data` at level 9.
///
/// The header carries no file name and a zero mtime, so identical input
/// always yields identical output.
pub fn gzip_bytes(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzBuilder::new()
        .mtime(0)
        .write(Vec::with_capacity(data.len() / 2 + 32), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Compress `path` into its `.gz` sibling and report the sizes.
pub fn compress_file(path: &Path) -> Result<FileStats> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    let compressed =
        gzip_bytes(&data).with_context(|| format!("failed to gzip file: {}", path.display()))?;
    let out = artifact_path(path);
    std::fs::write(&out, &compressed)
        .with_context(|| format!("failed to write artifact: {}", out.display()))?;
    Ok(FileStats {
        path: path.to_path_buf(),
        original_size: data.len() as u64,
        compressed_size: compressed.len() as u64,
    })
}
