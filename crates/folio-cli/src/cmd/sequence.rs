use anyhow::Result;
use folio_core::model::web_resource::web_resources;
use folio_core::model::WebResource;
use folio_core::pipeline::{canvas_order, eligibility, MappingContext};
use folio_core::sequence::reconstruct;
use serde::Serialize;

use crate::cmd::manifest::DiagnosticOut;
use crate::cmd::Host;
use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceOut {
    pub record_id: String,
    pub web_resources: usize,
    /// Resources that become canvases.
    pub eligible: usize,
    /// Page order as canvases are emitted.
    pub forward: Vec<String>,
    /// Order as reconstructed from the links, last page first.
    pub reconstructed: Vec<String>,
    pub diagnostics: Vec<DiagnosticOut>,
}

fn ids(v: Vec<WebResource>) -> Vec<String> {
    v.into_iter().map(|w| w.id).collect()
}

pub async fn run(host: &Host, input_arg: &str) -> Result<()> {
    let record = input::load_record(host, input_arg).await?;
    let mut ctx = MappingContext::new(&host.config, &host.media);

    let target = eligibility::display_target(&record, &mut ctx)?;
    let all = web_resources(&record)?;
    let total = all.len();
    let candidates = eligibility::eligible(all, &target);
    let eligible = candidates.len();

    let forward = canvas_order(candidates.clone(), &mut ctx)?;
    // Empty when the policy tolerated an inconsistency.
    let reconstructed = if forward.is_empty() {
        Vec::new()
    } else {
        reconstruct(candidates)?
    };

    output::print(&SequenceOut {
        record_id: record.id().to_string(),
        web_resources: total,
        eligible,
        forward: ids(forward),
        reconstructed: ids(reconstructed),
        diagnostics: ctx.diagnostics.iter().map(DiagnosticOut::from).collect(),
    })?;
    Ok(())
}
