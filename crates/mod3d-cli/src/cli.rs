use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mod3d",
    about = "Mod3d: 3D model catalog server",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the catalog server
    Serve(ServeArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind, overriding the configuration
    #[arg(long)]
    pub bind: Option<String>,

    /// Require record ownership for edits as well as deletes
    #[arg(long)]
    pub enforce_ownership_on_edit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "mod3d",
            "--config",
            "mod3d.toml",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--enforce-ownership-on-edit",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("mod3d.toml")));
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind.as_deref(), Some("0.0.0.0:9000"));
                assert!(args.enforce_ownership_on_edit);
            }
            Command::Config => panic!("expected serve"),
        }
    }
}
