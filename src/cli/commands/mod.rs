//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod check;
mod extract;
mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use echosift::{Config, Pipelines};

#[derive(Parser)]
#[command(name = "echosift")]
#[command(about = "Extract, summarize, and question text from web pages and PDFs")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// What to do with extracted text besides printing it.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Tokenize and chunk the extracted text
    #[arg(short, long)]
    preprocess: bool,
    /// Also summarize the extracted text
    #[arg(short, long)]
    summarize: bool,
    /// Also extract keywords
    #[arg(short, long)]
    keywords: bool,
    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract paragraph text from a web page
    Web {
        /// Page URL
        url: String,
        #[command(flatten)]
        options: ExtractOptions,
    },

    /// Extract text from a PDF (OCR for scanned documents)
    Pdf {
        /// PDF file
        file: PathBuf,
        #[command(flatten)]
        options: ExtractOptions,
    },

    /// Summarize text from a file or stdin
    Summarize {
        /// Text file (stdin if omitted or "-")
        file: Option<PathBuf>,
        /// Strip known boilerplate phrases first
        #[arg(short, long)]
        preprocess: bool,
    },

    /// Extract keywords from a file or stdin
    Keywords {
        /// Text file (stdin if omitted or "-")
        file: Option<PathBuf>,
    },

    /// Answer a question from a context
    Ask {
        /// Question to answer
        question: String,
        /// Context file (stdin if omitted or "-")
        #[arg(short = 'f', long)]
        context_file: Option<PathBuf>,
        /// Context text (instead of a file)
        #[arg(short = 't', long, conflicts_with = "context_file")]
        context: Option<String>,
    },

    /// List the images on a web page
    Images {
        /// Page URL
        url: String,
        /// Maximum number of images to list (0 = unlimited)
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Check a URL's redirect chain and rate-limit status
    Check {
        /// URL to check
        url: String,
    },

    /// Show availability of external tools and the LLM service
    Tools,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;

    match &cli.command {
        Commands::Tools => return check::cmd_tools(&config).await,
        Commands::Check { url } => return check::cmd_check(&config, url).await,
        _ => {}
    }

    let pipelines = Arc::new(
        Pipelines::from_config(&config).context("Failed to initialize pipelines")?,
    );

    match cli.command {
        Commands::Web { url, options } => extract::cmd_web(&pipelines, &url, options).await,
        Commands::Pdf { file, options } => extract::cmd_pdf(&pipelines, &file, options).await,
        Commands::Summarize { file, preprocess } => {
            analyze::cmd_summarize(&pipelines, file.as_deref(), preprocess).await
        }
        Commands::Keywords { file } => analyze::cmd_keywords(&pipelines, file.as_deref()).await,
        Commands::Ask {
            question,
            context_file,
            context,
        } => analyze::cmd_ask(&pipelines, &question, context_file.as_deref(), context).await,
        Commands::Images { url, limit } => extract::cmd_images(&pipelines, &url, limit).await,
        Commands::Tools | Commands::Check { .. } => Ok(()),
    }
}
