use std::path::{Path, PathBuf};

use anyhow::Context;
use morph_config::MorphConfig;
use morph_session::{FileStore, Persistence, SessionStore};

/// Shared application resources initialized once per invocation.
pub struct AppContext {
    pub store: SessionStore,
    pub config: MorphConfig,
    pub project_root: PathBuf,
}

impl AppContext {
    /// Open the file-backed session under the project's storage directory.
    #[must_use]
    pub fn init(project_root: PathBuf, config: MorphConfig) -> Self {
        let files = FileStore::new(config.storage_dir(&project_root));
        let persistence = Persistence::new(files, config.storage.key.clone());
        let store = SessionStore::open(persistence);
        tracing::debug!(
            root = %project_root.display(),
            items = store.session().len(),
            "session restored"
        );

        Self {
            store,
            config,
            project_root,
        }
    }

    /// Default export destination for a file extension.
    #[must_use]
    pub fn export_path(&self, extension: &str) -> PathBuf {
        self.project_root
            .join(&self.config.export.dir)
            .join(self.config.export.file_name(extension))
    }

    /// Fail with a readable message when a store operation found no item.
    pub fn require_item(found: bool, id: &str) -> anyhow::Result<()> {
        if found {
            Ok(())
        } else {
            anyhow::bail!("no item with id '{id}' in this session")
        }
    }
}

/// Load `.env` from the project root (if present), then the layered config.
pub fn load_config(project_root: &Path) -> anyhow::Result<MorphConfig> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    MorphConfig::load_from(project_root).context("failed to load morph configuration")
}

#[cfg(test)]
mod tests {
    use morph_core::entities::RawInput;
    use tempfile::TempDir;

    use super::{AppContext, load_config};

    #[test]
    fn init_restores_previous_invocation() {
        let temp = TempDir::new().expect("tempdir should create");
        let config = load_config(temp.path()).expect("config should load");

        let mut first = AppContext::init(temp.path().to_path_buf(), config.clone());
        let ids = first
            .store
            .add_items([RawInput::from_bytes("m51.png", b"pixels")]);

        let second = AppContext::init(temp.path().to_path_buf(), config);
        assert_eq!(second.store.session().len(), 1);
        assert_eq!(second.store.session().selected_id(), Some(ids[0].as_str()));
        assert!(temp.path().join(".morph/hubble-annotations.json").is_file());
    }

    #[test]
    fn export_path_uses_config() {
        let temp = TempDir::new().expect("tempdir should create");
        let config = load_config(temp.path()).expect("config should load");
        let ctx = AppContext::init(temp.path().to_path_buf(), config);

        assert_eq!(
            ctx.export_path("csv"),
            temp.path().join("exports/hubble_labels.csv")
        );
    }

    #[test]
    fn require_item_names_the_id() {
        assert!(AppContext::require_item(true, "img-1").is_ok());
        let err = AppContext::require_item(false, "img-1").unwrap_err();
        assert!(err.to_string().contains("img-1"));
    }
}
