use clap::Parser;

mod cli;
mod commands;
mod context;
mod input;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("morph error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if let cli::Commands::Presets = &cli.command {
        return commands::inspect::presets(&flags);
    }

    let project_root = context::resolve_project_root(flags.project.as_deref())?;
    let config = context::load_config(&project_root)?;
    let mut ctx = context::AppContext::init(project_root, config);

    commands::dispatch::dispatch(cli.command, &mut ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("MORPH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
