//! CLI argument parsing for the route-suggester-worker binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::defaults::DEFAULT_MAX_JOBS_PER_TRUCK;
use crate::types::SuggestRoutesRequest;

#[derive(Parser)]
#[command(name = "route-suggester-worker", about = "2GoStorage route suggestion worker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the worker server (default if no subcommand given)
    Serve,
    /// Compute route suggestions once and print them as JSON
    Suggest {
        /// Include jobs that already have a driver
        #[arg(long)]
        all_jobs: bool,

        /// Maximum stops per truck
        #[arg(long, default_value_t = DEFAULT_MAX_JOBS_PER_TRUCK, value_parser = parse_max_jobs)]
        max_jobs_per_truck: usize,

        /// Read tables from a JSON file instead of Airtable
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
}

/// At least one stop per truck
fn parse_max_jobs(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Command {
    /// Request parameters for the `suggest` subcommand
    pub fn suggest_request(&self) -> Option<SuggestRoutesRequest> {
        match self {
            Command::Suggest { all_jobs, max_jobs_per_truck, .. } => Some(SuggestRoutesRequest {
                only_unassigned: !all_jobs,
                max_jobs_per_truck: *max_jobs_per_truck,
            }),
            Command::Serve => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_command_defaults_to_none() {
        let cli = Cli::parse_from(["route-suggester-worker"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_serve_command_parses() {
        let cli = Cli::parse_from(["route-suggester-worker", "serve"]);
        assert!(matches!(cli.command, Some(Command::Serve)));
        assert!(Command::Serve.suggest_request().is_none());
    }

    #[test]
    fn test_cli_suggest_defaults() {
        let cli = Cli::parse_from(["route-suggester-worker", "suggest"]);
        let command = cli.command.unwrap();
        assert!(matches!(command, Command::Suggest { fixture: None, .. }));

        let request = command.suggest_request().unwrap();
        assert!(request.only_unassigned);
        assert_eq!(request.max_jobs_per_truck, DEFAULT_MAX_JOBS_PER_TRUCK);
    }

    #[test]
    fn test_cli_suggest_flags() {
        let cli = Cli::parse_from([
            "route-suggester-worker",
            "suggest",
            "--all-jobs",
            "--max-jobs-per-truck",
            "8",
            "--fixture",
            "tables.json",
        ]);
        let command = cli.command.unwrap();

        match &command {
            Command::Suggest { fixture, .. } => {
                assert_eq!(fixture.as_deref(), Some(std::path::Path::new("tables.json")));
            }
            Command::Serve => panic!("expected suggest"),
        }

        let request = command.suggest_request().unwrap();
        assert!(!request.only_unassigned);
        assert_eq!(request.max_jobs_per_truck, 8);
    }

    #[test]
    fn test_cli_rejects_zero_max_jobs() {
        let result = Cli::try_parse_from([
            "route-suggester-worker",
            "suggest",
            "--max-jobs-per-truck",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_negative_max_jobs() {
        let result = Cli::try_parse_from([
            "route-suggester-worker",
            "suggest",
            "--max-jobs-per-truck",
            "-1",
        ]);
        assert!(result.is_err());
    }
}
