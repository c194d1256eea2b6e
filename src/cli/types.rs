//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level command line
#[derive(Parser, Debug)]
#[command(name = "vertex-creds")]
#[command(about = "Provision per-session Vertex AI credentials", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .vertex-creds/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the session's credentials and write the credential file
    Install(SessionArgs),

    /// Install credentials, then print shell exports for a downstream process
    Env(SessionArgs),
}

/// How to find the session and its backend
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Session transport URL (.../projects/{project}/sessions/{session}/...)
    #[arg(long, env = "SESSION_CONNECTION_URL")]
    pub connection_url: Option<String>,

    /// Project id; takes precedence over the connection URL
    #[arg(long, requires = "session")]
    pub project: Option<String>,

    /// Session id; takes precedence over the connection URL
    #[arg(long, requires = "project")]
    pub session: Option<String>,

    /// Backend base URL (required with --project/--session unless configured)
    #[arg(long, env = "BACKEND_API_URL")]
    pub backend_url: Option<String>,
}
