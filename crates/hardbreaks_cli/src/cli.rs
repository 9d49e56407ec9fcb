//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// hardbreaks - Turn soft line breaks in markdown into hard breaks
#[derive(Parser)]
#[command(name = "hardbreaks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transform a document and print the resulting tree as JSON
    Transform {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Treat the input as a JSON tree instead of markdown
        #[arg(long)]
        json: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}
