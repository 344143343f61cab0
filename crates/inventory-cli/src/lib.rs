//! Inventory CLI Library
//!
//! Command-line tool for a small shop: products, staff, and an audit trail
//! of every change, backed by a single SQLite file.
//!
//! # Overview
//!
//! - **Bootstrap**: create the tables and the first manager (`inventory init`)
//! - **Session**: sign in and work through a role-specific menu (`inventory session`)
//! - **Configuration**: show the effective settings (`inventory config show`)
//!
//! The [`store::InventoryStore`] is usable on its own; every mutation and
//! every successful name search is recorded in the audit trail, which only
//! managers may read.

pub mod audit;
pub mod auth;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod menu;
pub mod prompt;
pub mod store;

// Re-export commonly used types
pub use auth::AuthScheme;
pub use config::Config;
pub use error::{CliError, Result};
pub use store::{AuditAccess, InventoryStore};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Inventory - products, staff and audit trail
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `session`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// SQLite datastore file
    #[arg(long, env = "INVENTORY_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Authentication scheme
    #[arg(long, value_enum, env = "INVENTORY_AUTH_SCHEME", ignore_case = true, global = true)]
    pub auth: Option<AuthScheme>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and open the menu
    Session,

    /// Create the tables and the first employee
    Init(InitArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Fields of the first employee; anything left out is prompted for
#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub surname: Option<String>,

    /// Job title; a manager title grants full access
    #[arg(long, default_value = "Gerente")]
    pub role: String,

    #[arg(long)]
    pub salary: Option<f64>,

    /// Ignored by the legacy scheme
    #[arg(long)]
    pub password: Option<String>,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show all configuration
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
