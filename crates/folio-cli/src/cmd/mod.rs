use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use folio_core::config::{validate_config, CoreConfig, SequencePolicy};
use folio_core::media::MediaTypes;
use thiserror::Error;

use crate::args::{Cli, Command};

mod doctor;
mod manifest;
mod sequence;

/// Failures loading host-side inputs (configuration, media table).
#[derive(Debug, Error)]
pub enum HostError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigSyntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Everything a command needs: validated configuration, the media table, and
/// one shared HTTP client.
#[derive(Debug, Clone)]
pub struct Host {
    pub config: CoreConfig,
    pub media: MediaTypes,
    pub client: reqwest::Client,
    pub api_key: Option<String>,
}

impl Host {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => load_config(path)?,
            None => CoreConfig::default(),
        };
        if cli.strict {
            config.sequence_policy = SequencePolicy::Strict;
        }
        validate_config(&config)?;

        let media = match &cli.media_types {
            Some(path) => MediaTypes::from_json_slice(&read(path)?)?,
            None => MediaTypes::builtin(),
        };

        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(HostError::Client)?;

        Ok(Self {
            config,
            media,
            client,
            api_key: cli.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }
}

fn read(path: &Path) -> Result<Vec<u8>, HostError> {
    fs::read(path).map_err(|source| HostError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config(path: &Path) -> Result<CoreConfig, HostError> {
    let bytes = read(path)?;
    serde_json::from_slice(&bytes).map_err(|source| HostError::ConfigSyntax {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Manifest {
            input,
            presentation,
            fulltext,
            out,
        } => {
            let host = Host::from_cli(&cli)?;
            manifest::run(&host, input, *presentation, *fulltext, out.as_deref()).await
        }
        Command::Sequence { input } => {
            let host = Host::from_cli(&cli)?;
            sequence::run(&host, input).await
        }
        Command::Doctor => doctor::run(&cli).await,
    }
}
