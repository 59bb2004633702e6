//! Concise test-set selection.
//!
//! Greedy hitting set: repeatedly take the case that catches the most
//! implementations not yet caught, until every implementation in the wrong
//! set is caught by some chosen case.

use std::collections::BTreeSet;

use argus_ir::TestCase;
use tracing::debug;

use crate::results::TestResults;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("No test case catches implementations {ids:?}")]
    Uncoverable { ids: BTreeSet<usize> },
}

/// Indices of the chosen cases, in the order they were picked.
///
/// Ties go to the earliest case. An empty wrong set selects nothing.
pub fn concise_indices(results: &TestResults) -> Result<Vec<usize>, SelectError> {
    let mut uncovered = results.wrong_set().clone();
    let mut remaining: Vec<BTreeSet<usize>> = results
        .catch_sets()
        .iter()
        .map(|catches| catches.intersection(&uncovered).copied().collect())
        .collect();
    let mut picked = Vec::new();

    while !uncovered.is_empty() {
        let mut best: Option<(usize, usize)> = None;
        for (index, catches) in remaining.iter().enumerate() {
            let gain = catches.len();
            if gain > best.map_or(0, |(_, g)| g) {
                best = Some((index, gain));
            }
        }
        let Some((index, gain)) = best else {
            return Err(SelectError::Uncoverable { ids: uncovered });
        };

        let caught = std::mem::take(&mut remaining[index]);
        for id in &caught {
            uncovered.remove(id);
        }
        for catches in &mut remaining {
            catches.retain(|id| !caught.contains(id));
        }
        debug!(
            index,
            gain,
            uncovered = uncovered.len(),
            "picked test case"
        );
        picked.push(index);
    }

    Ok(picked)
}

/// The chosen cases themselves, in pick order.
pub fn concise_set(results: &TestResults) -> Result<Vec<TestCase>, SelectError> {
    Ok(concise_indices(results)?
        .into_iter()
        .map(|index| results.cases()[index].clone())
        .collect())
}
