use anyhow::Result;
use std::path::{Path, PathBuf};

pub mod compress;
pub mod discover;
pub mod report;
pub mod root;

pub use compress::{FileStats, compress_file};
pub use discover::ExtensionSet;
pub use report::{FileOutcome, RunReport};
pub use root::RootSource;

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The asset directory does not exist; nothing was touched.
    MissingRoot(PathBuf),
    Finished(RunReport),
}

/// Compress every candidate under `root`, calling `on_file` after each one.
///
/// Per-file failures are reported through `on_file` and folded into the
/// report; only a failing directory walk returns `Err`.
pub fn compress_tree(
    root: &Path,
    exts: &ExtensionSet,
    on_file: &mut dyn FnMut(&FileOutcome),
) -> Result<RunOutcome> {
    if !root.is_dir() {
        log::warn!("asset directory missing: {}", root.display());
        return Ok(RunOutcome::MissingRoot(root.to_path_buf()));
    }

    let mut report = RunReport::new();
    for path in discover::candidates(root, exts)? {
        let outcome = match compress_file(&path) {
            Ok(stats) => FileOutcome::Compressed(stats),
            Err(e) => {
                log::debug!("{e:#}");
                FileOutcome::Failed {
                    path,
                    error: format!("{e:#}"),
                }
            }
        };
        on_file(&outcome);
        report.record(&outcome);
    }
    Ok(RunOutcome::Finished(report))
}

/// Resolve, compress and print: the whole run as the binary performs it.
pub fn run<W: std::io::Write>(source: &RootSource, out: &mut W) -> Result<RunOutcome> {
    let root = source.resolve()?;
    log::debug!("asset root: {}", root.display());

    if !root.is_dir() {
        report::write_missing_root(out, &root)?;
        return Ok(RunOutcome::MissingRoot(root));
    }

    report::write_banner(out)?;
    let mut write_err = None;
    let outcome = compress_tree(&root, &ExtensionSet::web(), &mut |outcome| {
        if write_err.is_none() {
            write_err = report::write_outcome(out, outcome).err();
        }
    })?;
    if let Some(e) = write_err {
        return Err(e.into());
    }
    if let RunOutcome::Finished(report) = &outcome {
        report::write_summary(out, report)?;
    }
    Ok(outcome)
}
