//! Command table for the binary
//!
//! Names and descriptions are declared statically here; the binary
//! dispatches on [`Command`] and `help` renders this table.

use crate::{client::DhcpClient, error::Result, model::DEFAULT_SCOPE};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    GetLeases,
    ReserveLeases,
    CleanupExcludedLeases,
}

pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub command: Command,
}

/// `help` first, then alphabetical.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        description: "List available commands.",
        command: Command::Help,
    },
    CommandSpec {
        name: "cleanup_excluded_leases",
        description: "Remove leases that are in excluded ranges.",
        command: Command::CleanupExcludedLeases,
    },
    CommandSpec {
        name: "get_leases",
        description: "Get the current leases from the DHCP server.",
        command: Command::GetLeases,
    },
    CommandSpec {
        name: "reserve_leases",
        description: "Reserve leases from a JSON file.",
        command: Command::ReserveLeases,
    },
];

impl Command {
    pub fn lookup(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.command)
    }

    pub async fn run(self, client: &DhcpClient, args: &[String]) -> Result<()> {
        match self {
            Self::Help => print!("{}", help_text()),
            Self::GetLeases => {
                client.get_leases().await?;
            }
            Self::ReserveLeases => {
                let path = args.first().map(Path::new);
                client.reserve_leases(path).await?;
            }
            Self::CleanupExcludedLeases => {
                let scope = args.first().map(String::as_str).unwrap_or(DEFAULT_SCOPE);
                client.cleanup_excluded_leases(scope).await?;
            }
        }
        Ok(())
    }
}

pub fn help_text() -> String {
    let mut out = String::from("Available commands:\n");
    for spec in COMMANDS {
        out.push_str(&format!("  {:25} {}\n", spec.name, spec.description));
    }
    out
}
