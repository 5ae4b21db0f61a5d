pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sitewatch")]
#[command(about = "Watch a web page and send an email when it changes", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (default: ~/.config/sitewatch/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Port for the HTTP server, overriding config and PORT
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the watcher: scheduled checks, HTTP surface and companion pings (default)
    Serve,
    /// Fetch the target page once and print its size and digest
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::parse_from(["sitewatch"]);
        assert_eq!(cli.command.unwrap_or(Commands::Serve), Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sitewatch", "check", "--config", "watch.toml", "-p", "8080"]);
        assert_eq!(cli.command, Some(Commands::Check));
        assert_eq!(cli.config, Some(PathBuf::from("watch.toml")));
        assert_eq!(cli.port, Some(8080));
    }
}
