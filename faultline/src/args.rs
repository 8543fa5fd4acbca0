use std::path::PathBuf;

use clap::Parser;

/// Faultline error normalizer
#[derive(Debug, Parser)]
#[command(name = "faultline", about = "Normalize raw failure documents into typed errors")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "FAULTLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Treat each document as a schema validator error or error list
    #[arg(long)]
    pub schema: bool,

    /// Print the client-safe view instead of the full envelope
    #[arg(long)]
    pub client: bool,

    /// File holding a stream of JSON documents; stdin when omitted
    pub input: Option<PathBuf>,
}
