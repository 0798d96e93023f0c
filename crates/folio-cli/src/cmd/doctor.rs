use anyhow::Result;
use folio_core::config::{validate_config, CoreConfig};
use folio_core::media::MediaTypes;
use serde::Serialize;

use crate::args::Cli;
use crate::cmd::load_config;
use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

fn check(name: &str, res: Result<String, String>) -> Check {
    let (ok, detail) = match res {
        Ok(d) => (true, d),
        Err(d) => (false, d),
    };
    Check {
        name: name.to_string(),
        ok,
        detail,
    }
}

pub async fn run(cli: &Cli) -> Result<()> {
    let mut checks = Vec::new();

    let config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| e.to_string()),
        None => Ok(CoreConfig::default()),
    };
    let source = cli
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    checks.push(check(
        "config",
        config
            .as_ref()
            .map_err(Clone::clone)
            .and_then(|cfg| {
                validate_config(cfg)
                    .map(|_| format!("{source}, sequence policy {}", cfg.sequence_policy.as_str()))
                    .map_err(|e| e.to_string())
            }),
    ));

    let media = match &cli.media_types {
        Some(path) => std::fs::read(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))
            .and_then(|b| MediaTypes::from_json_slice(&b).map_err(|e| e.to_string())),
        None => Ok(MediaTypes::builtin()),
    };
    checks.push(check(
        "media-types",
        media.map(|m| format!("{} entries", m.len())),
    ));

    checks.push(check(
        "api-key",
        Ok(match &cli.api_key {
            Some(_) => "set".to_string(),
            None => "not set (record ids cannot be fetched)".to_string(),
        }),
    ));

    let ok = checks.iter().all(|c| c.ok);
    if output::is_json() {
        output::print(&DoctorOut { ok, checks })?;
    } else {
        for c in &checks {
            output::status_line(&c.name, c.ok, &c.detail)?;
        }
    }
    if !ok {
        anyhow::bail!("doctor found problems");
    }
    Ok(())
}
