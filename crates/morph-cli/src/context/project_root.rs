use std::path::{Path, PathBuf};

use anyhow::Context;
use morph_config::PROJECT_DIR;

/// Walk upwards from `start` until a `.morph` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolve the project root from `--project` or the current directory.
///
/// An explicit path may name the project itself or its `.morph` directory.
/// Without one, the nearest ancestor holding `.morph` wins, and a directory
/// that has never been annotated becomes its own root.
pub fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(Path::to_path_buf)
                .context("invalid --project path: '.morph' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    Ok(find_project_root(&start).unwrap_or(start))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{find_project_root, resolve_project_root};

    #[test]
    fn finds_project_root_in_parent_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".morph")).expect(".morph should create");
        std::fs::create_dir_all(temp.path().join("raw/night1")).expect("nested dirs should create");

        let found = find_project_root(&temp.path().join("raw/night1"));
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn returns_none_without_marker() {
        let temp = TempDir::new().expect("tempdir should create");
        assert!(find_project_root(temp.path()).is_none());
    }

    #[test]
    fn explicit_morph_dir_resolves_to_parent() {
        let temp = TempDir::new().expect("tempdir should create");
        let marker = temp.path().join(".morph");
        std::fs::create_dir(&marker).expect(".morph should create");

        let root = resolve_project_root(marker.to_str()).expect("root should resolve");
        assert_eq!(root, temp.path());
    }

    #[test]
    fn explicit_missing_directory_is_an_error() {
        let temp = TempDir::new().expect("tempdir should create");
        let missing = temp.path().join("nope");
        let err = resolve_project_root(missing.to_str()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
