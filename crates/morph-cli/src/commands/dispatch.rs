use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Add(args) => commands::add::handle(&args, ctx, flags).await,
        Commands::List => commands::inspect::list(ctx, flags),
        Commands::Show(args) => commands::inspect::show(&args.id, ctx, flags),
        Commands::Summary => commands::inspect::summary(ctx, flags),
        Commands::Set(args) => commands::edit::set(&args, ctx, flags),
        Commands::Label(args) => commands::edit::label(args, ctx, flags),
        Commands::Preset(args) => commands::edit::preset(&args, ctx, flags),
        Commands::Key(args) => commands::edit::keys(&args, ctx, flags),
        Commands::Remove(args) => commands::edit::remove(&args.id, ctx, flags),
        Commands::Export(args) => commands::transfer::export(&args, ctx, flags).await,
        Commands::Import(args) => commands::transfer::import(&args, ctx, flags).await,
        Commands::Presets => unreachable!("presets is pre-dispatched in main"),
    }
}
