use crate::config::AppConfig;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "costos-sync")]
#[command(about = "Syncs materials and labor costs into Google Sheets")]
pub struct Cli {
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    #[command(about = "Start the HTTP server (/health, /sync)")]
    Serve,
    #[command(about = "Run both sync jobs once and print the JSON report")]
    Sync,
    #[command(about = "Check access to the remitos API and the labor CSV folder")]
    Verify,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
