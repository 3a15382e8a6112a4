pub mod config;
pub mod init;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure thresholds, alert hours and Telegram")]
    Init(init::InitArgs),
    #[command(about = "Watch user activity and remind about breaks")]
    Watch(watch::WatchArgs),
    #[command(about = "Show the effective configuration")]
    Config,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
            Commands::Config => config::cmd(),
        }
    }
}
