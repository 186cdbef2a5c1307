//! CLI command definitions for the `lconn` binary.

pub mod admin;
pub mod chat;
pub mod providers;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Run and administer the LegalConnect marketplace.
#[derive(Parser)]
#[command(name = "lconn", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on. Defaults to `[server] port`.
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind. Defaults to `[server] host`.
        #[arg(long)]
        host: Option<String>,
    },

    /// Show marketplace counts and configuration.
    Status,

    /// List verified providers.
    #[command(alias = "ls")]
    Providers {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        city: Option<String>,

        /// advocate, broker or paralegal.
        #[arg(long = "type")]
        provider_type: Option<String>,

        #[arg(long)]
        specialization: Option<String>,
    },

    /// Ask the legal assistant. Without a question, starts an interactive session.
    Chat {
        question: Option<String>,
    },

    /// Moderate providers and inspect the audit log.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Mark a provider as verified.
    Verify {
        provider_id: String,
        /// Email of the acting admin.
        #[arg(long)]
        admin: String,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Reject a provider's verification.
    Reject {
        provider_id: String,
        #[arg(long)]
        admin: String,
        #[arg(long)]
        reason: String,
    },

    /// Hide a provider's listing.
    Suspend {
        provider_id: String,
        #[arg(long)]
        admin: String,
    },

    /// Make a suspended provider visible again.
    Activate {
        provider_id: String,
        #[arg(long)]
        admin: String,
    },

    /// Show the most recent audit log entries.
    Audit {
        #[arg(long)]
        admin: String,
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
}
