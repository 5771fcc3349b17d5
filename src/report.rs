//! Run statistics and console rendering.
//!
//! Everything is written straight to a `Write` sink so the binary can hand
//! in stdout and tests can hand in a `Vec<u8>`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::compress::{FileStats, display_name, reduction};

/// Result of processing one candidate.
#[derive(Debug)]
pub enum FileOutcome {
    Compressed(FileStats),
    /// Read or write failed; `error` holds the rendered cause chain.
    Failed { path: PathBuf, error: String },
}

/// Running totals across a whole walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub files_compressed: usize,
    pub total_original: u64,
    pub total_compressed: u64,
    pub failed: Vec<PathBuf>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the totals.
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Compressed(stats) => self.add(stats),
            FileOutcome::Failed { path, .. } => self.failed.push(path.clone()),
        }
    }

    pub fn add(&mut self, stats: &FileStats) {
        self.files_compressed += 1;
        self.total_original += stats.original_size;
        self.total_compressed += stats.compressed_size;
    }

    /// Overall percent reduction; `None` when nothing was compressed.
    pub fn ratio(&self) -> Option<f64> {
        (self.files_compressed > 0).then(|| reduction(self.total_original, self.total_compressed))
    }

    pub fn saved(&self) -> i64 {
        self.total_original as i64 - self.total_compressed as i64
    }
}

pub fn write_banner<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "=== Compressing Web Files ===")
}

pub fn write_missing_root<W: Write>(w: &mut W, root: &Path) -> io::Result<()> {
    writeln!(w, "Data directory not found: {}", root.display())
}

/// Progress block for a single compressed file.
pub fn write_file_line<W: Write>(w: &mut W, stats: &FileStats) -> io::Result<()> {
    writeln!(w, "Compressed: {}", stats.name())?;
    writeln!(w, "  Original: {} bytes", stats.original_size)?;
    writeln!(
        w,
        "  Compressed: {} bytes ({:.1}% reduction)",
        stats.compressed_size,
        stats.ratio()
    )
}

/// Failures go to the same stream as progress, marked with `error:`.
pub fn write_failure_line<W: Write>(w: &mut W, path: &Path, error: &str) -> io::Result<()> {
    writeln!(w, "error: failed to compress {}: {error}", display_name(path))
}

pub fn write_outcome<W: Write>(w: &mut W, outcome: &FileOutcome) -> io::Result<()> {
    match outcome {
        FileOutcome::Compressed(stats) => write_file_line(w, stats),
        FileOutcome::Failed { path, error } => write_failure_line(w, path, error),
    }
}

/// Final summary, or the "nothing to do" line when no file was compressed.
pub fn write_summary<W: Write>(w: &mut W, report: &RunReport) -> io::Result<()> {
    let Some(ratio) = report.ratio() else {
        if !report.failed.is_empty() {
            writeln!(w, "Failed: {}", report.failed.len())?;
        }
        writeln!(w, "No files to compress")?;
        return writeln!(w);
    };
    writeln!(w)?;
    writeln!(w, "=== Compression Summary ===")?;
    writeln!(w, "Files compressed: {}", report.files_compressed)?;
    if !report.failed.is_empty() {
        writeln!(w, "Failed: {}", report.failed.len())?;
    }
    writeln!(w, "Total original size: {} bytes", report.total_original)?;
    writeln!(w, "Total compressed size: {} bytes", report.total_compressed)?;
    writeln!(w, "Total savings: {ratio:.1}%")?;
    writeln!(w, "Saved: {} bytes", report.saved())?;
    writeln!(w)
}
