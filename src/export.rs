use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::codegen::{Artifact, Bundle};
use crate::gradient::GradientConfig;

/// Write every available artifact for `config` into `dir`.
///
/// Creates the directory if it does not exist. The script file is only
/// written when interaction is enabled; a stale `gradient.js` from an
/// earlier interactive export is removed so the directory always matches
/// the configuration. Returns the paths written, in display order.
pub fn export_all(config: &GradientConfig, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let bundle = Bundle::new(config);
    let mut written = Vec::new();
    for artifact in Artifact::ALL {
        let path = dir.join(artifact.file_name());
        match bundle.text(artifact) {
            Some(text) => {
                fs::write(&path, text)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                written.push(path);
            }
            None if path.exists() => {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove stale {}", path.display()))?;
            }
            None => {}
        }
    }

    info!("exported {} files to {}", written.len(), dir.display());
    Ok(written)
}

/// One-line summary for the status bar.
pub fn summary(paths: &[PathBuf], dir: &Path) -> String {
    format!("Wrote {} files to {}", paths.len(), dir.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn writes_all_files_when_interactive() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_all(&GradientConfig::default(), dir.path()).unwrap();
        assert_eq!(
            names(&written),
            vec!["prompt.md", "gradient.html", "gradient.css", "gradient.js", "index.html"]
        );
        let css = fs::read_to_string(dir.path().join("gradient.css")).unwrap();
        assert!(css.contains("--circle-size: 80%;"));
    }

    #[test]
    fn omits_script_without_interaction() {
        let dir = tempfile::tempdir().unwrap();
        let config = GradientConfig {
            enable_interaction: false,
            ..GradientConfig::default()
        };
        let written = export_all(&config, dir.path()).unwrap();
        assert_eq!(written.len(), 4);
        assert!(!dir.path().join("gradient.js").exists());
        let page = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn removes_stale_script() {
        let dir = tempfile::tempdir().unwrap();
        export_all(&GradientConfig::default(), dir.path()).unwrap();
        assert!(dir.path().join("gradient.js").exists());

        let config = GradientConfig {
            enable_interaction: false,
            ..GradientConfig::default()
        };
        export_all(&config, dir.path()).unwrap();
        assert!(!dir.path().join("gradient.js").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b");
        export_all(&GradientConfig::default(), &target).unwrap();
        assert!(target.join("gradient.html").is_file());
    }

    #[test]
    fn summary_counts_files() {
        let paths = vec![PathBuf::from("x"), PathBuf::from("y")];
        assert_eq!(summary(&paths, Path::new("/out")), "Wrote 2 files to /out");
    }
}
