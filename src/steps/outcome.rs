//! Step outcomes, recorded results, and return-value normalization.
//!
//! A step body may hand back several shapes of value; [`normalize`] turns
//! each of them into a [`StepResult`]:
//!
//! | returned                 | recorded                 |
//! |--------------------------|--------------------------|
//! | `()`                     | `(Passed, None)`         |
//! | `bool`                   | `(bool, None)`           |
//! | `(bool,)`                | `(bool, None)`           |
//! | `(bool, value)`          | `(bool, value)`          |
//! | any other single value   | `(Passed, value)`        |
//! | sequence of 0 or 3+      | `ResultFormat` error     |

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::{Result, StaircaseError};

/// Diagnostic recorded for steps whose gate was not satisfied.
pub const GATE_SKIPPED: &str = "did not run: dependency gate failed";

/// Diagnostic recorded when `restart()` is called with no budget left.
pub const MAX_RETRIES_EXCEEDED: &str = "max retries exceeded";

/// Outcome of a single step or substep attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed,
    /// The gate was not satisfied; the body was never invoked.
    Skipped,
    /// Sentinel for "never attempted in the current run".
    NotYetRun,
}

impl Outcome {
    /// Whether the step was attempted (including gate skips).
    pub fn has_run(&self) -> bool {
        !matches!(self, Outcome::NotYetRun)
    }
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed {
            Outcome::Passed
        } else {
            Outcome::Failed
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
            Outcome::NotYetRun => "not yet run",
        };
        write!(f, "{}", s)
    }
}

/// The `(outcome, value)` pair stored for every step and substep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub outcome: Outcome,
    pub value: Option<Value>,
}

impl Default for StepResult {
    fn default() -> Self {
        Self::not_yet_run()
    }
}

impl StepResult {
    pub fn not_yet_run() -> Self {
        Self {
            outcome: Outcome::NotYetRun,
            value: None,
        }
    }

    pub fn passed(value: Option<Value>) -> Self {
        Self {
            outcome: Outcome::Passed,
            value,
        }
    }

    pub fn failed(value: Option<Value>) -> Self {
        Self {
            outcome: Outcome::Failed,
            value,
        }
    }

    /// A gate skip, carrying the standard diagnostic.
    pub fn gate_skipped() -> Self {
        Self {
            outcome: Outcome::Skipped,
            value: Some(Value::from(GATE_SKIPPED)),
        }
    }

    /// The synthesized failure for an exhausted restart budget.
    pub fn max_retries_exceeded() -> Self {
        Self::failed(Some(Value::from(MAX_RETRIES_EXCEEDED)))
    }

    pub fn is_passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    pub fn has_run(&self) -> bool {
        self.outcome.has_run()
    }
}

/// Proof that the restart controller granted a restart.
///
/// Only the crate can construct one, so a body can only request a restart
/// through [`StepContext::restart`](crate::runner::StepContext::restart).
/// The engine restarts only when the restart was granted during the same
/// invocation, so a signal kept from an earlier attempt is rejected.
#[derive(Debug, PartialEq, Eq)]
pub struct RestartSignal {
    _granted: (),
}

impl RestartSignal {
    pub(crate) fn granted() -> Self {
        Self { _granted: () }
    }
}

/// What a step body handed back.
#[derive(Debug, PartialEq)]
pub enum StepReturn {
    /// Nothing returned.
    Unit,
    /// A bare pass/fail flag.
    Bool(bool),
    /// An explicit `(passed)` or `(passed, value)` sequence.
    Sequence(Vec<Value>),
    /// Any other single value; recorded as a pass.
    Value(Value),
    /// Abort this attempt and restart the whole run.
    Restart(RestartSignal),
}

impl StepReturn {
    /// Build an explicit sequence return of arbitrary length.
    pub fn sequence<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<()> for StepReturn {
    fn from(_: ()) -> Self {
        StepReturn::Unit
    }
}

impl From<bool> for StepReturn {
    fn from(passed: bool) -> Self {
        StepReturn::Bool(passed)
    }
}

impl From<(bool,)> for StepReturn {
    fn from((passed,): (bool,)) -> Self {
        StepReturn::Sequence(vec![Value::Bool(passed)])
    }
}

impl<T: Into<Value>> From<(bool, T)> for StepReturn {
    fn from((passed, value): (bool, T)) -> Self {
        StepReturn::Sequence(vec![Value::Bool(passed), value.into()])
    }
}

impl From<Value> for StepReturn {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => StepReturn::Bool(b),
            other => StepReturn::Value(other),
        }
    }
}

macro_rules! value_returns {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StepReturn {
                fn from(value: $ty) -> Self {
                    StepReturn::Value(Value::from(value))
                }
            }
        )*
    };
}

value_returns!(i32, i64, u32, u64, usize, f64, &str, String);

/// Truthiness of a sequence's first element.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn non_null(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        other => Some(other),
    }
}

/// Result of normalizing a body's return.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Normalized {
    Recorded(StepResult),
    Restart,
}

/// Turn a body's return into a result, or report a malformed sequence.
pub(crate) fn normalize(step: &str, returned: StepReturn) -> Result<Normalized> {
    let result = match returned {
        StepReturn::Unit => StepResult::passed(None),
        StepReturn::Bool(passed) => StepResult {
            outcome: passed.into(),
            value: None,
        },
        StepReturn::Value(value) => StepResult::passed(non_null(value)),
        StepReturn::Sequence(items) => {
            let len = items.len();
            let mut items = items.into_iter();
            match (items.next(), items.next(), items.next()) {
                (Some(flag), None, None) => StepResult {
                    outcome: truthy(&flag).into(),
                    value: None,
                },
                (Some(flag), Some(value), None) => StepResult {
                    outcome: truthy(&flag).into(),
                    value: non_null(value),
                },
                _ => {
                    return Err(StaircaseError::ResultFormat {
                        step: step.to_string(),
                        len,
                    })
                }
            }
        }
        StepReturn::Restart(_) => return Ok(Normalized::Restart),
    };
    Ok(Normalized::Recorded(result))
}
