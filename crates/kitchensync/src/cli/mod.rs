//! Command-line interface for kitchensync.
//!
//! This module defines the CLI structure using clap's derive API.

mod commands;

pub use commands::{
    AddCommand, CategoryArg, ConfigCommand, ListCommand, OutputFormat, ProfileCommand,
    RemoveCommand, ShowCommand,
};

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

/// Recipe record synchronization CLI.
#[derive(Debug, Parser)]
#[command(name = "ksync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List recipe records for the signed-in user
    List(ListCommand),

    /// Add a new recipe record
    Add(AddCommand),

    /// Remove a recipe record by id
    Remove(RemoveCommand),

    /// Show a single recipe record
    Show(ShowCommand),

    /// Show the signed-in user profile
    Profile(ProfileCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Determines the effective verbosity level from CLI flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "ksync");
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli::try_parse_from(["ksync", "--quiet", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let cli = Cli::try_parse_from(["ksync", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let cli = Cli::try_parse_from(["ksync", "-v", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_trace() {
        let cli = Cli::try_parse_from(["ksync", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(["ksync", "list", "--format", "json"]).unwrap();
        match cli.command {
            Command::List(args) => assert_eq!(args.format, OutputFormat::Json),
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_parse_list_category_filter() {
        let cli = Cli::try_parse_from(["ksync", "list", "--category", "lunch"]).unwrap();
        match cli.command {
            Command::List(args) => assert_eq!(args.category, Some(CategoryArg::Lunch)),
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "ksync",
            "add",
            "Lentil Soup",
            "--category",
            "dinner",
            "-i",
            "Lentils",
            "-i",
            "Stock",
            "-s",
            "Simmer for an hour",
        ])
        .unwrap();
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.name, "Lentil Soup");
                assert_eq!(args.category, Some(CategoryArg::Dinner));
                assert_eq!(args.ingredients, vec!["Lentils", "Stock"]);
                assert_eq!(args.steps, vec!["Simmer for an hour"]);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_parse_remove() {
        let id = "b6e9b25e-9a53-4adf-8f1f-0d5e8ec04c0f";
        let cli = Cli::try_parse_from(["ksync", "remove", id]).unwrap();
        match cli.command {
            Command::Remove(args) => assert_eq!(args.id.to_string(), id),
            _ => panic!("expected remove command"),
        }
    }

    #[test]
    fn test_parse_remove_rejects_garbage_id() {
        let result = Cli::try_parse_from(["ksync", "remove", "not-an-id"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["ksync", "config", "path"]).unwrap();
        match cli.command {
            Command::Config(ConfigCommand::Path) => {}
            _ => panic!("expected config path command"),
        }
    }

    #[test]
    fn test_parse_global_config_flag() {
        let cli = Cli::try_parse_from(["ksync", "-c", "/tmp/ksync.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ksync.toml")));
    }

    #[test]
    fn test_parse_profile_json() {
        let cli = Cli::try_parse_from(["ksync", "profile", "--json"]).unwrap();
        match cli.command {
            Command::Profile(args) => assert!(args.json),
            _ => panic!("expected profile command"),
        }
    }
}
