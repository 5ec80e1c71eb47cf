//! Command line interface definitions

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::models::Role;

#[derive(Parser)]
#[command(name = "khelo-admin")]
#[command(about = "Terminal admin console for the Election Khelo quiz API")]
#[command(version)]
pub struct Cli {
    /// Defaults to the interactive console when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store an admin token for subsequent commands
    Login {
        /// Bearer token issued by the API
        #[arg(long)]
        token: String,
    },
    /// Remove the stored token
    Logout,
    /// Print the Chief Minister records
    Cm,
    /// Print questions, optionally filtered
    Questions {
        /// Search text applied server-side
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Print one page of users with optional filters
    Users {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// user or admin
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        verified: Option<bool>,
    },
    /// Launch the interactive console
    Tui,
}

impl Commands {
    pub fn parse_role(value: &str) -> Result<Role> {
        Role::parse(value)
            .ok_or_else(|| anyhow::anyhow!("Unknown role: {} (expected user or admin)", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(Commands::parse_role("admin").unwrap(), Role::Admin);
        assert!(Commands::parse_role("superuser").is_err());
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::parse_from(["khelo-admin"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_users_flags_parse() {
        let cli = Cli::parse_from([
            "khelo-admin",
            "users",
            "--page",
            "2",
            "--role",
            "admin",
            "--verified",
            "true",
        ]);
        match cli.command {
            Some(Commands::Users {
                page,
                role,
                verified,
                ..
            }) => {
                assert_eq!(page, 2);
                assert_eq!(role.as_deref(), Some("admin"));
                assert_eq!(verified, Some(true));
            }
            _ => panic!("expected users command"),
        }
    }
}
