use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "goalgrid-cli", version, about = "GoalGrid scoring CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/goalgrid/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calendar keys for an instant
    Keys(commands::keys::KeysArgs),
    /// Streaks, points and consistency for one goal
    Report(commands::report::ReportArgs),
    /// Display name of a group rank level
    Rank {
        /// Rank level (1 = Bronze)
        level: u32,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Keys(args) => commands::keys::run(args, config_path),
        Commands::Report(args) => commands::report::run(args, config_path),
        Commands::Rank { level } => commands::rank::run(level),
        Commands::Config { action } => commands::config::run(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
