use anyhow::Result;
use clap::{Parser, Subcommand};
use labeled_tree::app::engine::TreeEngine;
use labeled_tree::cli;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Inspect labeled N-ary trees and node graphs stored as JSON
#[derive(Parser, Debug)]
#[command(name = "treetool")]
#[command(version)]
struct Cli {
    /// Tree or graph document (JSON)
    file: PathBuf,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize node, edge and root counts plus tree measurements
    Stats,

    /// Find nodes whose label matches a regex (case-insensitive)
    Search {
        pattern: String,

        /// Maximum number of results to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Draw the structure below a root
    Show {
        /// Node id to start from (defaults to the primary root)
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Write the structure below a root as a nested tree document
    Export {
        /// Node id to start from (defaults to the primary root)
        #[arg(short, long)]
        root: Option<String>,
    },
}

fn init_logging() {
    // stderr keeps stdout clean for --json and export output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Cli::parse();

    let engine = TreeEngine::load_from_json(&args.file)?;

    match &args.command {
        Commands::Stats => cli::display_stats(&engine, args.json),
        Commands::Search { pattern, limit } => {
            cli::search_names(&engine, pattern, *limit, args.json)
        }
        Commands::Show { root } => cli::display_tree(&engine, root.as_deref()),
        Commands::Export { root } => cli::export_tree(&engine, root.as_deref()),
    }
}
