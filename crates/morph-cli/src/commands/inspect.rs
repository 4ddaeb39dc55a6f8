use anyhow::Context;
use morph_core::presets::catalog;
use morph_core::{FeatureVector, classify};
use morph_session::summary::summarize;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::{ItemRow, ItemView};

/// Handle `morph list`.
pub fn list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.store.session();
    let rows: Vec<ItemRow> = session
        .items()
        .iter()
        .map(|item| ItemRow::new(item, session.selected_id()))
        .collect();
    output(&rows, flags.format)
}

/// Handle `morph show`.
pub fn show(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let item = ctx
        .store
        .session()
        .get(id)
        .with_context(|| format!("no item with id '{id}' in this session"))?;
    output(&ItemView::from(item), flags.format)
}

/// Handle `morph summary`.
pub fn summary(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&summarize(ctx.store.session()), flags.format)
}

#[derive(Debug, Serialize)]
struct PresetRow {
    name: &'static str,
    pins: Option<&'static str>,
    /// Suggestion the preset produces from default features.
    from_defaults: String,
}

/// Handle `morph presets`. Needs no session.
pub fn presets(flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<PresetRow> = catalog()
        .iter()
        .map(|preset| PresetRow {
            name: preset.name,
            pins: preset.final_label,
            from_defaults: classify(&FeatureVector::default().patched(&preset.patch)).to_string(),
        })
        .collect();
    output(&rows, flags.format)
}
