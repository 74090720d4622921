//! Declarative step and substep definitions.
//!
//! Definitions carry everything the directory needs about a unit of work
//! except its body: phase, name, description, and the gate. Gate conflicts
//! (both `on_pass` and `on_fail`) are detected when the definition is turned
//! into a directory entry, not when the builder methods are called.

use crate::error::{Result, StaircaseError};

use super::condition::{DependencyCondition, GateKind, IntoStepNames};
use super::phase::Phase;

/// Either a concrete list of names or "every other step".
#[derive(Debug, Clone, PartialEq, Eq)]
enum Targets {
    Names(Vec<String>),
    AllOthers,
}

/// Raw gate declarations, validated into a [`DependencyCondition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct GateDeclaration {
    on_pass: Option<Targets>,
    on_fail: Option<Targets>,
}

impl GateDeclaration {
    fn into_condition(self, name: &str) -> Result<DependencyCondition> {
        match (self.on_pass, self.on_fail) {
            (Some(_), Some(_)) => Err(StaircaseError::config(format!(
                "Step '{}' cannot have both on_pass and on_fail",
                name
            ))),
            (Some(Targets::Names(names)), None) => Ok(DependencyCondition::on_pass(names)),
            (None, Some(Targets::Names(names))) => Ok(DependencyCondition::on_fail(names)),
            (Some(Targets::AllOthers), None) => Ok(DependencyCondition::OnAllOthers(GateKind::Pass)),
            (None, Some(Targets::AllOthers)) => Ok(DependencyCondition::OnAllOthers(GateKind::Fail)),
            (None, None) => Ok(DependencyCondition::None),
        }
    }
}

/// A substep declared on its parent step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstepDefinition {
    name: String,
    description: String,
    gate: GateDeclaration,
}

impl SubstepDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            gate: GateDeclaration::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Only run when all of `names` passed. Must be a subset of the parent's `on_pass`.
    pub fn on_pass(mut self, names: impl IntoStepNames) -> Self {
        self.gate.on_pass = Some(Targets::Names(names.into_step_names()));
        self
    }

    /// Only run when all of `names` failed. Must be a subset of the parent's `on_fail`.
    pub fn on_fail(mut self, names: impl IntoStepNames) -> Self {
        self.gate.on_fail = Some(Targets::Names(names.into_step_names()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self, parent: &str) -> Result<(String, String, DependencyCondition)> {
        let qualified = format!("{}.{}", parent, self.name);
        let condition = self.gate.into_condition(&qualified)?;
        Ok((self.name, self.description, condition))
    }
}

/// A step as declared by the suite author.
///
/// # Example
///
/// ```
/// use staircase::steps::{Phase, StepDefinition, SubstepDefinition};
///
/// let def = StepDefinition::task("final_processing")
///     .description("runs after every processing step")
///     .on_pass(["process_1", "process_2"])
///     .substep(SubstepDefinition::new("check").on_pass("process_1"));
/// assert_eq!(def.phase(), Phase::Task);
/// assert_eq!(def.name(), "final_processing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    phase: Phase,
    name: String,
    description: String,
    gate: GateDeclaration,
    substeps: Vec<SubstepDefinition>,
}

impl StepDefinition {
    pub fn new(phase: Phase, name: impl Into<String>) -> Self {
        Self {
            phase,
            name: name.into(),
            description: String::new(),
            gate: GateDeclaration::default(),
            substeps: Vec::new(),
        }
    }

    pub fn setup(name: impl Into<String>) -> Self {
        Self::new(Phase::Setup, name)
    }

    pub fn task(name: impl Into<String>) -> Self {
        Self::new(Phase::Task, name)
    }

    pub fn test(name: impl Into<String>) -> Self {
        Self::new(Phase::Test, name)
    }

    pub fn teardown(name: impl Into<String>) -> Self {
        Self::new(Phase::Teardown, name)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Only run when every named step passed.
    pub fn on_pass(mut self, names: impl IntoStepNames) -> Self {
        self.gate.on_pass = Some(Targets::Names(names.into_step_names()));
        self
    }

    /// Only run when every named step failed.
    pub fn on_fail(mut self, names: impl IntoStepNames) -> Self {
        self.gate.on_fail = Some(Targets::Names(names.into_step_names()));
        self
    }

    /// Only run when every other registered step passed.
    pub fn on_pass_all_others(mut self) -> Self {
        self.gate.on_pass = Some(Targets::AllOthers);
        self
    }

    /// Only run when every other registered step failed.
    pub fn on_fail_all_others(mut self) -> Self {
        self.gate.on_fail = Some(Targets::AllOthers);
        self
    }

    /// Declare a substep this step's body may invoke.
    pub fn substep(mut self, substep: SubstepDefinition) -> Self {
        self.substeps.push(substep);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> Result<DefinitionParts> {
        let condition = self.gate.into_condition(&self.name)?;
        let mut substeps = Vec::with_capacity(self.substeps.len());
        for substep in self.substeps {
            substeps.push(substep.into_parts(&self.name)?);
        }
        Ok(DefinitionParts {
            phase: self.phase,
            name: self.name,
            description: self.description,
            condition,
            substeps,
        })
    }
}

/// A validated definition, ready for the directory.
#[derive(Debug, Clone)]
pub(crate) struct DefinitionParts {
    pub phase: Phase,
    pub name: String,
    pub description: String,
    pub condition: DependencyCondition,
    /// `(name, description, condition)` for each declared substep.
    pub substeps: Vec<(String, String, DependencyCondition)>,
}
