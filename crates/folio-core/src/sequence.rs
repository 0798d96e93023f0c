//! Page-order reconstruction from "next" pointers.
//!
//! Web resources only say which resource follows them. This module rebuilds a
//! linear order from those pointers and rejects graphs that are not a disjoint
//! union of simple paths.
//!
//! Two views of the result are exposed:
//! - [`reconstruct`] returns the raw order: chains are collected by prepending
//!   while walking, so each chain comes out last page first. Isolated resources
//!   follow all chain members.
//! - [`forward_order`] returns reading order: every chain first page first,
//!   chains in the record order of their first page, isolated resources last.
//!
//! Canvas assembly uses [`forward_order`].

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::errors::{FolioError, FolioResult};
use crate::model::web_resource::WebResource;

/// Chains (each in walking order) plus isolated resources, both in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstruction {
    pub chains: Vec<Vec<WebResource>>,
    pub isolated: Vec<WebResource>,
}

impl Reconstruction {
    /// Total number of resources.
    pub fn len(&self) -> usize {
        self.chains.iter().map(Vec::len).sum::<usize>() + self.isolated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw order: every visited resource prepended, isolated resources appended.
    pub fn into_reversed(self) -> Vec<WebResource> {
        let mut out: VecDeque<WebResource> = VecDeque::with_capacity(self.len());
        for chain in self.chains {
            for wr in chain {
                out.push_front(wr);
            }
        }
        out.extend(self.isolated);
        out.into()
    }

    /// Reading order.
    pub fn into_forward(self) -> Vec<WebResource> {
        let mut out = Vec::with_capacity(self.len());
        for chain in self.chains {
            out.extend(chain);
        }
        out.extend(self.isolated);
        out
    }
}

/// Split `resources` into chains and isolated resources.
///
/// Fails with `DataInconsistent` on a duplicate id, a dangling next reference,
/// two chains merging into one resource, or a cycle.
pub fn split_chains(resources: Vec<WebResource>) -> FolioResult<Reconstruction> {
    let mut order: Vec<String> = Vec::with_capacity(resources.len());
    let mut by_id: HashMap<String, WebResource> = HashMap::with_capacity(resources.len());
    let mut next: HashMap<String, Option<String>> = HashMap::with_capacity(resources.len());

    for wr in resources {
        if by_id.contains_key(&wr.id) {
            return Err(FolioError::data_inconsistent(format!(
                "duplicate web resource id: {}",
                wr.id
            )));
        }
        order.push(wr.id.clone());
        next.insert(wr.id.clone(), wr.next_in_sequence.clone());
        by_id.insert(wr.id.clone(), wr);
    }

    let targets: HashSet<&str> = next.values().flatten().map(String::as_str).collect();

    for id in &order {
        if let Some(Some(n)) = next.get(id) {
            if !by_id.contains_key(n) {
                return Err(FolioError::data_inconsistent(format!(
                    "web resource {id} points to unknown next resource {n}"
                )));
            }
        }
    }

    let starts: Vec<String> = order
        .iter()
        .filter(|id| matches!(next.get(*id), Some(Some(_))) && !targets.contains(id.as_str()))
        .cloned()
        .collect();
    drop(targets);

    let mut chains = Vec::with_capacity(starts.len());
    for start in starts {
        let mut chain = Vec::new();
        let mut cur = start;
        loop {
            let wr = by_id.remove(&cur).ok_or_else(|| {
                FolioError::data_inconsistent(format!(
                    "intertwined sequences: web resource {cur} is reached by more than one chain"
                ))
            })?;
            let following = next.remove(&cur).flatten();
            chain.push(wr);
            match following {
                Some(n) => cur = n,
                None => break,
            }
        }
        debug!(start = %chain[0].id, length = chain.len(), "sequence chain reconstructed");
        chains.push(chain);
    }

    let mut isolated = Vec::new();
    for id in order {
        let Some(wr) = by_id.remove(&id) else {
            continue;
        };
        if let Some(Some(n)) = next.get(&id) {
            return Err(FolioError::data_inconsistent(format!(
                "cyclic sequence: web resource {id} points to {n} but no chain reaches it"
            )));
        }
        isolated.push(wr);
    }

    Ok(Reconstruction { chains, isolated })
}

/// Raw reconstructed order: chains last page first, isolated resources after.
pub fn reconstruct(resources: Vec<WebResource>) -> FolioResult<Vec<WebResource>> {
    Ok(split_chains(resources)?.into_reversed())
}

/// Reading order: chains first page first, isolated resources after.
pub fn forward_order(resources: Vec<WebResource>) -> FolioResult<Vec<WebResource>> {
    Ok(split_chains(resources)?.into_forward())
}
