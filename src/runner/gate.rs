//! Runtime gate evaluation.

use crate::steps::{DependencyCondition, Outcome, StepDirectory};

/// Whether a step (or substep) with `condition` may run given the current results.
///
/// `OnPass` needs every named step to have passed; `OnFail` needs every named
/// step to have failed. Skipped and not-yet-run steps satisfy neither, so a
/// skip propagates down a gate chain. Unknown names never satisfy a gate.
pub fn eligible(directory: &StepDirectory, condition: &DependencyCondition) -> bool {
    match condition {
        DependencyCondition::None => true,
        DependencyCondition::OnPass(names) => all_have(directory, names, Outcome::Passed),
        DependencyCondition::OnFail(names) => all_have(directory, names, Outcome::Failed),
        // Resolved at build time; an unresolved wildcard never opens.
        DependencyCondition::OnAllOthers(_) => false,
    }
}

fn all_have(directory: &StepDirectory, names: &[String], wanted: Outcome) -> bool {
    names.iter().all(|name| {
        directory
            .get(name)
            .is_ok_and(|entry| entry.result.outcome == wanted)
    })
}
