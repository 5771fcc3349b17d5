//! Asset directory resolution for the two ways the tool is launched.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Name of the asset directory under the project root.
pub const DATA_DIR: &str = "data";

/// Where the asset root comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSource {
    /// Build hook: the orchestrator hands us the project directory.
    Project(PathBuf),
    /// Standalone: the tool lives in `<project>/<bin dir>/`, assets in `<project>/data`.
    ToolLocation(PathBuf),
}

impl RootSource {
    /// Standalone mode anchored at the running executable.
    pub fn current_exe() -> Result<Self> {
        let exe = std::env::current_exe().context("failed to locate running executable")?;
        Ok(Self::ToolLocation(exe))
    }

    /// The absolute asset directory. Existence is not checked here.
    pub fn resolve(&self) -> Result<PathBuf> {
        let dir = match self {
            Self::Project(project) => project.join(DATA_DIR),
            Self::ToolLocation(tool) => {
                let tool_dir = tool
                    .parent()
                    .with_context(|| format!("tool path has no parent: {}", tool.display()))?;
                tool_dir.join("..").join(DATA_DIR)
            }
        };
        absolute(&dir)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("failed to resolve {}", path.display()))
}
