use std::path::PathBuf;

use clap::{Parser, Subcommand};
use folio_core::version::PresentationVersion;

#[derive(Parser, Debug, Clone)]
#[command(name = "folio", version, about = "Folio manifest mapper")]
pub struct Cli {
    /// Emit JSON output on stdout and JSON log lines on stderr.
    #[arg(long, global = true)]
    pub json: bool,

    /// Core configuration file (JSON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Record API key.
    #[arg(long, global = true, env = "FOLIO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Media-type table (JSON list of `{"mimeType", "category"}`).
    #[arg(long, global = true)]
    pub media_types: Option<PathBuf>,

    /// Fail on inconsistent page sequences instead of emitting no canvases.
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Map a record into a presentation manifest.
    Manifest {
        /// Record file path, http(s) URL, or record id (`/collection/item`).
        input: String,

        /// Output encoding: 2 or 3.
        #[arg(long = "version", id = "presentation", default_value = "2", value_parser = parse_version)]
        presentation: PresentationVersion,

        /// Probe for full text and reference it from every canvas.
        #[arg(long)]
        fulltext: bool,

        /// Write the manifest to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the page order reconstructed from a record's web resources.
    Sequence {
        /// Record file path, http(s) URL, or record id.
        input: String,
    },

    /// Check configuration and media-type table.
    Doctor,
}

fn parse_version(s: &str) -> Result<PresentationVersion, String> {
    PresentationVersion::parse(s).map_err(|e| e.to_string())
}
