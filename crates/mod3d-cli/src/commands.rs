use anyhow::Context;
use colored::Colorize;
use mod3d_server::{CatalogServer, ServerConfig};
use tracing::Level;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    init_tracing(&config, cli.verbose)?;
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args).await,
        Command::Config => cmd_config(&config),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    match &cli.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn init_tracing(config: &ServerConfig, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        config
            .log_level
            .parse::<Level>()
            .with_context(|| format!("invalid log level {:?}", config.log_level))?
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    Ok(())
}

async fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;
    }
    if args.enforce_ownership_on_edit {
        config.gate.enforce_ownership_on_edit = true;
    }

    println!(
        "{} Mod3d catalog on {} (in-memory stores)",
        "✓".green().bold(),
        config.bind_addr.to_string().bold()
    );
    if config.gate.enforce_ownership_on_edit {
        println!("  Edits: {}", "owner only".yellow());
    }

    CatalogServer::in_memory(config).serve().await?;
    Ok(())
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
