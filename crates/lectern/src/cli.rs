use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use quire_core::SearchScope;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Scope {
    /// Match against stored questions only
    Questions,
    /// Match against stored answers only
    Answers,
    /// Match questions, answers, and filenames
    Both,
}

impl From<Scope> for SearchScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Questions => SearchScope::Questions,
            Scope::Answers => SearchScope::Answers,
            Scope::Both => SearchScope::Both,
        }
    }
}

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Quire - document question-answering service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new config file
    Init {
        /// Path for new config file
        #[arg(default_value = "lectern.toml")]
        path: PathBuf,
    },
    /// Start the HTTP gateway server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Extract text and questions from a PDF and store the document
    Ingest {
        /// Path to the PDF file
        file: PathBuf,
    },
    /// Search stored documents by keyword
    Search {
        /// Search term
        term: String,
        /// Which fields to scan
        #[arg(long, default_value = "both", value_enum)]
        scope: Scope,
    },
}
