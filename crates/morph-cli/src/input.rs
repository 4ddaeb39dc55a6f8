//! Turn command-line paths into `RawInput`s.
//!
//! Directories expand to their matching image files in name order. File reads
//! run concurrently, but the returned inputs keep the order the paths were
//! given in.

use std::path::{Path, PathBuf};

use anyhow::Context;
use futures::future::try_join_all;
use morph_config::AnnotateConfig;
use morph_core::entities::RawInput;

/// Read (or reference) every image named by `paths`.
pub async fn collect_inputs(
    paths: &[PathBuf],
    reference: bool,
    filter: &AnnotateConfig,
) -> anyhow::Result<Vec<RawInput>> {
    let files = expand_paths(paths, filter).await?;
    if reference {
        return files.iter().map(|path| reference_input(path)).collect();
    }
    try_join_all(files.iter().map(|path| read_input(path))).await
}

async fn expand_paths(paths: &[PathBuf], filter: &AnnotateConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("cannot read '{}'", path.display()))?;

        if !metadata.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut entries = tokio::fs::read_dir(path)
            .await
            .with_context(|| format!("cannot list '{}'", path.display()))?;
        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let accepted = entry
                .file_name()
                .to_str()
                .is_some_and(|name| filter.accepts(name));
            if accepted && entry.file_type().await?.is_file() {
                found.push(entry.path());
            }
        }
        found.sort();
        tracing::debug!(dir = %path.display(), count = found.len(), "expanded directory");
        files.extend(found);
    }
    Ok(files)
}

async fn read_input(path: &Path) -> anyhow::Result<RawInput> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image '{}'", path.display()))?;
    Ok(RawInput::from_bytes(display_name(path), &bytes))
}

fn reference_input(path: &Path) -> anyhow::Result<RawInput> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("cannot resolve '{}'", path.display()))?;
    Ok(RawInput::external(
        display_name(path),
        format!("file://{}", absolute.display()),
    ))
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
