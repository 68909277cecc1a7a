use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use wta_core::list_apps;

/// Print the package listing for `packages_dir` as pretty JSON.
pub fn list(packages_dir: &Path) -> Result<()> {
    let apps = list_apps(packages_dir)
        .with_context(|| format!("failed to list packages in {}", packages_dir.display()))?;
    let json = serde_json::to_string_pretty(&apps).context("failed to encode package listing")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write package listing")?;
    Ok(())
}
