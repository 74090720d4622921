//! The step directory: registration bookkeeping and per-run result state.
//!
//! The directory owns every step's metadata and its mutable result. Iteration
//! order is registration order, which the resolver relies on for
//! deterministic tie-breaking.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, StaircaseError};

use super::condition::DependencyCondition;
use super::definition::DefinitionParts;
use super::outcome::StepResult;
use super::phase::Phase;

/// A substep declared on a step, before any invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstepSpec {
    pub name: String,
    pub description: String,
    pub condition: DependencyCondition,
}

/// One invocation of a substep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstepRecord {
    /// Qualified name, `parent.substep`.
    pub name: String,
    pub description: String,
    pub result: StepResult,
}

/// A registered step and its state for the current run.
#[derive(Debug, Clone, Serialize)]
pub struct StepEntry {
    pub name: String,
    pub phase: Phase,
    pub description: String,
    pub condition: DependencyCondition,
    /// 1-based ordinal in the execution order; assigned once after ordering.
    pub position: Option<usize>,
    pub result: StepResult,
    /// Every substep invocation in the current run, in call order.
    pub substeps: Vec<SubstepRecord>,
    #[serde(skip)]
    declared_substeps: IndexMap<String, SubstepSpec>,
}

impl StepEntry {
    /// Look up a substep declared on this step.
    pub fn substep_spec(&self, substep: &str) -> Option<&SubstepSpec> {
        self.declared_substeps.get(substep)
    }

    /// Substeps declared on this step, in declaration order.
    pub fn declared_substeps(&self) -> impl Iterator<Item = &SubstepSpec> {
        self.declared_substeps.values()
    }
}

/// Holds every step of a suite, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct StepDirectory {
    steps: IndexMap<String, StepEntry>,
}

impl StepDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validated definition.
    pub(crate) fn register(&mut self, parts: DefinitionParts) -> Result<()> {
        if self.steps.contains_key(&parts.name) {
            return Err(StaircaseError::DuplicateStep { name: parts.name });
        }

        let mut declared_substeps = IndexMap::new();
        for (name, description, condition) in parts.substeps {
            if declared_substeps.contains_key(&name) {
                return Err(StaircaseError::DuplicateStep {
                    name: format!("{}.{}", parts.name, name),
                });
            }
            declared_substeps.insert(
                name.clone(),
                SubstepSpec {
                    name,
                    description,
                    condition,
                },
            );
        }

        self.steps.insert(
            parts.name.clone(),
            StepEntry {
                name: parts.name,
                phase: parts.phase,
                description: parts.description,
                condition: parts.condition,
                position: None,
                result: StepResult::not_yet_run(),
                substeps: Vec::new(),
                declared_substeps,
            },
        );
        Ok(())
    }

    /// Replace every `OnAllOthers` with the concrete set of other step names.
    ///
    /// Idempotent: once resolved, no wildcard remains to expand.
    pub fn resolve_wildcards(&mut self) {
        let names: Vec<String> = self.steps.keys().cloned().collect();
        for entry in self.steps.values_mut() {
            if entry.condition.is_wildcard() {
                let others = names.iter().filter(|n| **n != entry.name).cloned().collect();
                entry.condition = entry.condition.resolved(others);
            }
        }
    }

    /// Check that every gate names a known step and every substep gate is a
    /// subset of its parent's.
    pub fn validate(&self) -> Result<()> {
        for entry in self.steps.values() {
            for dep in entry.condition.dependencies() {
                if !self.steps.contains_key(dep) {
                    return Err(StaircaseError::config(format!(
                        "Step '{}' depends on unknown step '{}'",
                        entry.name, dep
                    )));
                }
            }
            for substep in entry.declared_substeps.values() {
                if !substep.condition.is_subset_of(&entry.condition) {
                    return Err(StaircaseError::config(format!(
                        "Substep '{}.{}' gates on steps outside its parent's condition",
                        entry.name, substep.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Assign 1-based positions following `order`.
    pub(crate) fn assign_positions(&mut self, order: &[String]) -> Result<()> {
        for (index, name) in order.iter().enumerate() {
            self.entry_mut(name)?.position = Some(index + 1);
        }
        Ok(())
    }

    /// Clear every result and substep history.
    pub fn reset(&mut self) {
        for entry in self.steps.values_mut() {
            entry.result = StepResult::not_yet_run();
            entry.substeps.clear();
        }
    }

    pub fn get(&self, name: &str) -> Result<&StepEntry> {
        self.steps.get(name).ok_or_else(|| StaircaseError::StepNotFound {
            name: name.to_string(),
        })
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut StepEntry> {
        self.steps
            .get_mut(name)
            .ok_or_else(|| StaircaseError::StepNotFound {
                name: name.to_string(),
            })
    }

    pub(crate) fn set_result(&mut self, name: &str, result: StepResult) -> Result<()> {
        self.entry_mut(name)?.result = result;
        Ok(())
    }

    pub(crate) fn append_substep(&mut self, parent: &str, record: SubstepRecord) -> Result<()> {
        self.entry_mut(parent)?.substeps.push(record);
        Ok(())
    }

    /// The last completed result of `name`.
    ///
    /// Fails with [`StaircaseError::NotYetRun`] while the step holds the sentinel.
    pub fn result(&self, name: &str) -> Result<&StepResult> {
        let result = &self.get(name)?.result;
        if !result.has_run() {
            return Err(StaircaseError::NotYetRun {
                name: name.to_string(),
            });
        }
        Ok(result)
    }

    /// The value recorded by `name`, if any.
    pub fn value(&self, name: &str) -> Result<Option<&Value>> {
        Ok(self.result(name)?.value.as_ref())
    }

    pub fn has_passed(&self, name: &str) -> Result<bool> {
        Ok(self.result(name)?.is_passed())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Steps in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &StepEntry> {
        self.steps.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::definition::{StepDefinition, SubstepDefinition};
    use crate::steps::outcome::Outcome;

    fn directory(defs: Vec<StepDefinition>) -> Result<StepDirectory> {
        let mut dir = StepDirectory::new();
        for def in defs {
            dir.register(def.into_parts()?)?;
        }
        Ok(dir)
    }

    #[test]
    fn register_keeps_declaration_order() {
        let dir = directory(vec![
            StepDefinition::test("b"),
            StepDefinition::setup("a"),
            StepDefinition::task("c"),
        ])
        .unwrap();
        assert_eq!(dir.names().collect::<Vec<_>>(), ["b", "a", "c"]);
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = directory(vec![StepDefinition::task("a"), StepDefinition::test("a")]).unwrap_err();
        assert!(matches!(err, StaircaseError::DuplicateStep { ref name } if name == "a"));
    }

    #[test]
    fn duplicate_substep_is_rejected() {
        let err = directory(vec![StepDefinition::test("t")
            .substep(SubstepDefinition::new("s"))
            .substep(SubstepDefinition::new("s"))])
        .unwrap_err();
        assert!(matches!(err, StaircaseError::DuplicateStep { ref name } if name == "t.s"));
    }

    #[test]
    fn wildcard_expands_to_every_other_step() {
        let mut dir = directory(vec![
            StepDefinition::task("a"),
            StepDefinition::test("b"),
            StepDefinition::teardown("s").on_pass_all_others(),
        ])
        .unwrap();
        dir.resolve_wildcards();
        assert_eq!(
            dir.get("s").unwrap().condition,
            DependencyCondition::OnPass(vec!["a".to_string(), "b".to_string()])
        );

        dir.resolve_wildcards();
        assert_eq!(dir.get("s").unwrap().condition.dependencies().len(), 2);
    }

    #[test]
    fn unknown_dependency_fails_validation() {
        let dir = directory(vec![StepDefinition::task("a").on_pass("ghost")]).unwrap();
        let err = dir.validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn substep_outside_parent_gate_fails_validation() {
        let dir = directory(vec![
            StepDefinition::task("x"),
            StepDefinition::task("y"),
            StepDefinition::test("t")
                .on_pass("x")
                .substep(SubstepDefinition::new("s").on_pass(["x", "y"])),
        ])
        .unwrap();
        let err = dir.validate().unwrap_err();
        assert!(err.to_string().contains("t.s"));
    }

    #[test]
    fn substep_inside_wildcard_parent_is_valid_after_resolution() {
        let mut dir = directory(vec![
            StepDefinition::task("x"),
            StepDefinition::test("t")
                .on_pass_all_others()
                .substep(SubstepDefinition::new("s").on_pass("x")),
        ])
        .unwrap();
        assert!(dir.validate().is_err());
        dir.resolve_wildcards();
        dir.validate().unwrap();
    }

    #[test]
    fn reset_clears_results_and_substeps() {
        let mut dir = directory(vec![StepDefinition::test("t")]).unwrap();
        dir.set_result("t", StepResult::passed(None)).unwrap();
        dir.append_substep(
            "t",
            SubstepRecord {
                name: "t.s".into(),
                description: String::new(),
                result: StepResult::failed(None),
            },
        )
        .unwrap();
        assert_eq!(dir.get("t").unwrap().substeps.len(), 1);

        dir.reset();
        let entry = dir.get("t").unwrap();
        assert_eq!(entry.result.outcome, Outcome::NotYetRun);
        assert!(entry.substeps.is_empty());
    }

    #[test]
    fn queries_refuse_the_sentinel() {
        let mut dir = directory(vec![StepDefinition::test("t")]).unwrap();
        assert!(matches!(
            dir.result("t").unwrap_err(),
            StaircaseError::NotYetRun { .. }
        ));
        assert!(dir.has_passed("t").is_err());

        dir.set_result("t", StepResult::passed(Some(Value::from(7)))).unwrap();
        assert!(dir.has_passed("t").unwrap());
        assert_eq!(dir.value("t").unwrap(), Some(&Value::from(7)));
    }

    #[test]
    fn unknown_names_are_not_found() {
        let mut dir = StepDirectory::new();
        assert!(matches!(
            dir.get("nope").unwrap_err(),
            StaircaseError::StepNotFound { .. }
        ));
        assert!(dir.set_result("nope", StepResult::passed(None)).is_err());
    }

    #[test]
    fn positions_follow_the_given_order() {
        let mut dir = directory(vec![StepDefinition::task("a"), StepDefinition::setup("b")]).unwrap();
        dir.assign_positions(&["b".to_string(), "a".to_string()]).unwrap();
        assert_eq!(dir.get("b").unwrap().position, Some(1));
        assert_eq!(dir.get("a").unwrap().position, Some(2));
    }
}
