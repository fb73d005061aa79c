//! CLI command definitions and dispatch for the `mentor` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod session;

use clap::{Parser, Subcommand};

/// Strategic startup advisor chat service.
#[derive(Parser)]
#[command(name = "mentor", version, about, long_about = None)]
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

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on.
        #[arg(long, default_value_t = 3001)]
        port: u16,
    },

    /// List stored conversation sessions.
    #[command(alias = "ls")]
    Sessions,
}
