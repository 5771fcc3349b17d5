//! Candidate discovery: recursive walk plus extension filtering.
//!
//! Walk order comes straight from the filesystem and is not sorted.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of artifacts we produce. Never recompressed.
pub const GZ_EXTENSION: &str = "gz";

/// Lowercase file extensions (no leading dot) eligible for compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    exts: Vec<String>,
}

impl ExtensionSet {
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            exts: exts
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// The fixed web asset allowlist: html, css, js, json, svg.
    pub fn web() -> Self {
        Self::new(["html", "css", "js", "json", "svg"])
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.exts.iter().any(|e| *e == ext)
    }
}

/// Returns true if `path` names a file we should compress.
///
/// `.gz` is rejected before the allowlist is consulted, whatever its case.
pub fn is_candidate(path: &Path, exts: &ExtensionSet) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if ext.eq_ignore_ascii_case(GZ_EXTENSION) {
        return false;
    }
    exts.contains(ext)
}

/// Recursively collect every candidate file at or below `root`.
///
/// Symlinked directories are traversed. An unreadable root or a symlink loop
/// aborts the scan. Other broken entries below the root (dangling links,
/// unreadable subdirectories) are not: if the name looks like a candidate it
/// is returned anyway so compressing it fails for that file alone, otherwise
/// it is skipped with a warning.
pub fn candidates(root: &Path, exts: &ExtensionSet) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => match e.path() {
                Some(path) if e.depth() > 0 && e.loop_ancestor().is_none() => {
                    if is_candidate(path, exts) {
                        log::debug!("candidate (unreadable): {}", path.display());
                        files.push(path.to_path_buf());
                    } else {
                        log::warn!("skipping unreadable entry: {e}");
                    }
                    continue;
                }
                _ => {
                    return Err(e)
                        .with_context(|| format!("failed to walk directory: {}", root.display()));
                }
            },
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_candidate(path, exts) {
            log::debug!("candidate: {}", path.display());
            files.push(path.to_path_buf());
        } else {
            log::debug!("skipping: {}", path.display());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    #[test]
    fn allowlist_is_case_insensitive() {
        let web = ExtensionSet::web();
        assert!(is_candidate(Path::new("index.html"), &web));
        assert!(is_candidate(Path::new("DATA.JSON"), &web));
        assert!(is_candidate(Path::new("icons/logo.Svg"), &web));
        assert!(!is_candidate(Path::new("photo.png"), &web));
        assert!(!is_candidate(Path::new("README"), &web));
    }

    #[test]
    fn gz_always_excluded() {
        let web = ExtensionSet::web();
        assert!(!is_candidate(Path::new("archive.json.gz"), &web));
        assert!(!is_candidate(Path::new("data.GZ"), &web));
        // even if someone puts gz in the allowlist
        let with_gz = ExtensionSet::new(["gz", "js"]);
        assert!(!is_candidate(Path::new("app.js.gz"), &with_gz));
    }

    #[test]
    fn new_normalizes_leading_dot() {
        let set = ExtensionSet::new([".CSS"]);
        assert!(set.contains("css"));
        assert!(!set.contains("js"));
    }

    #[test]
    fn scans_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("css/vendor")).unwrap();
        fs::write(root.join("index.html"), "<p>hi</p>").unwrap();
        fs::write(root.join("css/vendor/reset.CSS"), "*{}").unwrap();
        fs::write(root.join("app.js.gz"), [0x1f, 0x8b]).unwrap();
        fs::write(root.join("logo.png"), [0x89, b'P']).unwrap();

        let found: HashSet<PathBuf> = candidates(root, &ExtensionSet::web())
            .unwrap()
            .into_iter()
            .collect();
        let expected: HashSet<PathBuf> = [
            root.join("index.html"),
            root.join("css/vendor/reset.CSS"),
        ]
        .into_iter()
        .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn directory_named_like_asset_is_not_a_candidate() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("bundle.js")).unwrap();
        let found = candidates(dir.path(), &ExtensionSet::web()).unwrap();
        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_traversed() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        let root = dir.path().join("data");
        fs::create_dir(&assets).unwrap();
        fs::create_dir(&root).unwrap();
        fs::write(assets.join("vendor.js"), "var v;").unwrap();
        std::os::unix::fs::symlink(&assets, root.join("linked")).unwrap();

        let found = candidates(&root, &ExtensionSet::web()).unwrap();
        assert_eq!(found, vec![root.join("linked/vendor.js")]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_does_not_abort_scan() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.js"), "let a;").unwrap();
        std::os::unix::fs::symlink(root.join("gone.js"), root.join("stale.js")).unwrap();
        std::os::unix::fs::symlink(root.join("gone.png"), root.join("stale.png")).unwrap();

        let found: HashSet<PathBuf> = candidates(root, &ExtensionSet::web())
            .unwrap()
            .into_iter()
            .collect();
        let expected: HashSet<PathBuf> = [root.join("a.js"), root.join("stale.js")]
            .into_iter()
            .collect();
        assert_eq!(found, expected);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        std::os::unix::fs::symlink(root, root.join("sub/back")).unwrap();

        let err = candidates(root, &ExtensionSet::web()).unwrap_err();
        assert!(err.to_string().contains("failed to walk directory"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = candidates(&dir.path().join("nope"), &ExtensionSet::web()).unwrap_err();
        assert!(err.to_string().contains("failed to walk directory"));
    }
}
