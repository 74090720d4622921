//! Dependency conditions that gate a step's execution.

use serde::Serialize;

/// Which outcome a gate waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// Every referenced step must have passed.
    Pass,
    /// Every referenced step must have failed.
    Fail,
}

/// The gating condition declared for a step or substep.
///
/// Name lists keep declaration order and never contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyCondition {
    /// Always eligible.
    #[default]
    None,
    /// Eligible when every named step passed.
    OnPass(Vec<String>),
    /// Eligible when every named step failed.
    OnFail(Vec<String>),
    /// Gate on every other registered step. Replaced by a concrete
    /// [`OnPass`](Self::OnPass) or [`OnFail`](Self::OnFail) once registration completes.
    OnAllOthers(GateKind),
}

impl DependencyCondition {
    /// Build an on-pass gate; an empty list means no gate.
    pub fn on_pass(names: impl IntoStepNames) -> Self {
        let names = names.into_step_names();
        if names.is_empty() {
            Self::None
        } else {
            Self::OnPass(names)
        }
    }

    /// Build an on-fail gate; an empty list means no gate.
    pub fn on_fail(names: impl IntoStepNames) -> Self {
        let names = names.into_step_names();
        if names.is_empty() {
            Self::None
        } else {
            Self::OnFail(names)
        }
    }

    /// Names this condition references (the dependency edges).
    pub fn dependencies(&self) -> &[String] {
        match self {
            Self::OnPass(names) | Self::OnFail(names) => names,
            Self::None | Self::OnAllOthers(_) => &[],
        }
    }

    /// Whether this condition still holds an unresolved wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::OnAllOthers(_))
    }

    /// Replace a wildcard with the concrete set of `others`.
    pub(crate) fn resolved(&self, others: Vec<String>) -> Self {
        match self {
            Self::OnAllOthers(GateKind::Pass) => Self::OnPass(others),
            Self::OnAllOthers(GateKind::Fail) => Self::OnFail(others),
            other => other.clone(),
        }
    }

    /// Whether every reference in `self` appears in the same kind of gate on `parent`.
    pub fn is_subset_of(&self, parent: &DependencyCondition) -> bool {
        match (self, parent) {
            (Self::None, _) => true,
            (Self::OnPass(child), Self::OnPass(parent)) | (Self::OnFail(child), Self::OnFail(parent)) => {
                child.iter().all(|name| parent.contains(name))
            }
            _ => false,
        }
    }
}

/// Anything that names one or more steps: a single name or a collection.
pub trait IntoStepNames {
    /// Convert into a de-duplicated list, preserving first occurrence order.
    fn into_step_names(self) -> Vec<String>;
}

fn dedup(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

impl IntoStepNames for &str {
    fn into_step_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoStepNames for String {
    fn into_step_names(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoStepNames for &String {
    fn into_step_names(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<const N: usize> IntoStepNames for [&str; N] {
    fn into_step_names(self) -> Vec<String> {
        dedup(self.into_iter().map(str::to_string))
    }
}

impl IntoStepNames for &[&str] {
    fn into_step_names(self) -> Vec<String> {
        dedup(self.iter().map(|s| s.to_string()))
    }
}

impl IntoStepNames for Vec<&str> {
    fn into_step_names(self) -> Vec<String> {
        dedup(self.into_iter().map(str::to_string))
    }
}

impl IntoStepNames for Vec<String> {
    fn into_step_names(self) -> Vec<String> {
        dedup(self)
    }
}
