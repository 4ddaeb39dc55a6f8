use crate::cli::GlobalFlags;
use crate::cli::root_commands::AddArgs;
use crate::context::AppContext;
use crate::input::collect_inputs;
use crate::output::output;
use crate::output::views::ItemRow;

/// Handle `morph add`.
pub async fn handle(args: &AddArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let inputs = collect_inputs(&args.paths, args.reference, &ctx.config.annotate).await?;
    if inputs.is_empty() {
        anyhow::bail!("no matching images found");
    }

    let ids = ctx.store.add_items(inputs);
    let session = ctx.store.session();
    let rows: Vec<ItemRow> = ids
        .iter()
        .filter_map(|id| session.get(id))
        .map(|item| ItemRow::new(item, session.selected_id()))
        .collect();
    output(&rows, flags.format)
}
