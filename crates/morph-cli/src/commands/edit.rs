use morph_core::keys::KeyCommand;
use morph_core::{FeaturePatch, HubbleLabel};
use morph_session::updates::ItemPatch;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{KeyArgs, LabelArgs, PresetArgs, SetArgs};
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::ItemView;

/// Echo the edited item unless `--quiet`.
fn show_item(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if flags.quiet {
        return Ok(());
    }
    match ctx.store.session().get(id) {
        Some(item) => output(&ItemView::from(item), flags.format),
        None => AppContext::require_item(false, id),
    }
}

fn feature_patch(args: &SetArgs) -> FeaturePatch {
    FeaturePatch {
        bulge_prominence: args.bulge,
        arm_tightness: args.arms,
        bar_strength: args.bar,
        has_ring: args.ring,
        is_irregular: args.irregular,
        elliptical_index: args.ellipticity,
        lenticular_likelihood: args.s0,
    }
}

/// Handle `morph set`.
pub fn set(args: &SetArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let patch = feature_patch(args);
    if patch.is_empty() {
        anyhow::bail!("nothing to change: pass at least one feature flag");
    }
    AppContext::require_item(ctx.store.patch_features(&args.id, &patch), &args.id)?;
    show_item(&args.id, ctx, flags)
}

/// Handle `morph label`.
pub fn label(args: LabelArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let final_label = if args.clear {
        Some(String::new())
    } else {
        args.final_label.map(|label| label.trim().to_string())
    };
    if args.strict {
        if let Some(label) = final_label.as_deref().filter(|label| !label.is_empty()) {
            label.parse::<HubbleLabel>()?;
        }
    }

    let patch = ItemPatch {
        final_label,
        confidence: args.confidence,
        notes: args.notes,
    };
    if patch.is_empty() {
        anyhow::bail!("nothing to change: pass --final, --clear, --confidence or --notes");
    }
    AppContext::require_item(ctx.store.patch_item(&args.id, patch), &args.id)?;
    show_item(&args.id, ctx, flags)
}

/// Handle `morph preset`.
pub fn preset(args: &PresetArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let found = ctx.store.apply_preset(&args.id, &args.name)?;
    AppContext::require_item(found, &args.id)?;
    show_item(&args.id, ctx, flags)
}

/// Handle `morph key`: replay shortcuts against one item, in order.
pub fn keys(args: &KeyArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(unbound) = args.keys.chars().find(|key| KeyCommand::from_key(*key).is_none()) {
        anyhow::bail!("key '{unbound}' is not bound (use 0-7, b, r, i, s)");
    }
    if let Some(id) = &args.id {
        ctx.store.select(Some(id.as_str()))?;
    }
    let Some(target) = ctx.store.session().selected_id().map(str::to_string) else {
        anyhow::bail!("no item to act on: the session is empty");
    };

    for key in args.keys.chars() {
        ctx.store.apply_key(key, false);
    }
    show_item(&target, ctx, flags)
}

/// Handle `morph remove`.
pub fn remove(id: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    AppContext::require_item(ctx.store.remove_item(id), id)?;
    output(
        &json!({ "removed": id, "remaining": ctx.store.session().len() }),
        flags.format,
    )
}
