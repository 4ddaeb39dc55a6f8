use std::path::Path;

use anyhow::Context;
use morph_session::export::{import_structured, to_structured, to_tabular};
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ExportArgs, ImportArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExportResponse {
    path: String,
    format: &'static str,
    items: usize,
}

/// Handle `morph export`.
pub async fn export(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.store.session();
    let (bytes, format, extension) = if args.tabular {
        (to_tabular(session), "tabular", "csv")
    } else {
        (to_structured(session)?, "structured", "json")
    };

    if args.out.as_deref() == Some(Path::new("-")) {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&bytes).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        return Ok(());
    }

    let path = args
        .out
        .clone()
        .unwrap_or_else(|| ctx.export_path(extension));
    write_export(&path, &bytes).await?;
    tracing::debug!(path = %path.display(), format, "export written");

    output(
        &ExportResponse {
            path: path.display().to_string(),
            format,
            items: session.len(),
        },
        flags.format,
    )
}

async fn write_export(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write export to '{}'", path.display()))
}

/// Handle `morph import`: replace the session with a structured export.
pub async fn import(args: &ImportArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read '{}'", args.file.display()))?;
    let items = import_structured(&bytes)
        .with_context(|| format!("'{}' is not a structured export", args.file.display()))?;

    let replaced = ctx.store.session().len();
    let imported = items.len();
    ctx.store.replace_all(items);

    output(
        &serde_json::json!({ "imported": imported, "replaced": replaced }),
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use morph_config::MorphConfig;
    use morph_core::entities::RawInput;
    use morph_session::updates::ItemPatch;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            quiet: true,
            project: None,
        }
    }

    #[tokio::test]
    async fn export_then_import_into_fresh_project() {
        let source = TempDir::new().expect("tempdir should create");
        let mut ctx = AppContext::init(source.path().to_path_buf(), MorphConfig::default());
        let ids = ctx.store.add_items([
            RawInput::from_bytes("m51.png", b"a"),
            RawInput::from_bytes("m87.png", b"b"),
        ]);
        ctx.store.patch_item(
            &ids[1],
            ItemPatch::builder().final_label("E0").notes("giant").build(),
        );

        let args = ExportArgs {
            tabular: false,
            out: None,
        };
        export(&args, &ctx, &flags()).await.expect("export should write");
        let written = source.path().join("exports/hubble_labels.json");
        assert!(written.is_file());

        let target = TempDir::new().expect("tempdir should create");
        let mut fresh = AppContext::init(target.path().to_path_buf(), MorphConfig::default());
        import(&ImportArgs { file: written }, &mut fresh, &flags())
            .await
            .expect("import should succeed");

        assert_eq!(fresh.store.session().items(), ctx.store.session().items());
        assert_eq!(fresh.store.session().selected_id(), Some(ids[0].as_str()));
    }

    #[tokio::test]
    async fn tabular_export_to_explicit_path() {
        let temp = TempDir::new().expect("tempdir should create");
        let mut ctx = AppContext::init(temp.path().to_path_buf(), MorphConfig::default());
        ctx.store.add_items([RawInput::from_bytes("a.png", b"a")]);

        let out = temp.path().join("out/labels.csv");
        let args = ExportArgs {
            tabular: true,
            out: Some(out.clone()),
        };
        export(&args, &ctx, &flags()).await.expect("export should write");

        let text = std::fs::read_to_string(out).expect("csv should read");
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("id,name,label,suggestion"));
    }

    #[tokio::test]
    async fn import_rejects_garbage_and_keeps_session() {
        let temp = TempDir::new().expect("tempdir should create");
        let mut ctx = AppContext::init(temp.path().to_path_buf(), MorphConfig::default());
        ctx.store.add_items([RawInput::from_bytes("a.png", b"a")]);

        let bogus = temp.path().join("bogus.json");
        std::fs::write(&bogus, b"{\"not\": \"a list\"}").expect("file should write");
        assert!(import(&ImportArgs { file: bogus }, &mut ctx, &flags()).await.is_err());
        assert_eq!(ctx.store.session().len(), 1);
    }
}
