//! Suite construction and execution orchestration.

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::StaircaseConfig;
use crate::error::{Result, StaircaseError};
use crate::steps::outcome::{normalize, Normalized};
use crate::steps::{Flight, StepDefinition, StepDirectory, StepResult, StepReturn};
use crate::ui::{ConsoleLogger, PrintMode, Reporter, StaircaseLogger, StaircaseTheme};

use super::context::StepContext;
use super::dependency::ExecutionPlan;
use super::gate;
use super::restart::RestartController;

/// A boxed step body.
pub type StepFn<S> = Box<dyn FnMut(&mut S, &mut StepContext<'_>) -> anyhow::Result<StepReturn>>;

/// Where the engine is in its run cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    SettingUp,
    RunningMain,
    TearingDown,
    Completed,
    /// A step body errored or returned a malformed result.
    Aborted,
}

impl EngineState {
    fn for_flight(flight: Flight) -> Self {
        match flight {
            Flight::Setup => EngineState::SettingUp,
            Flight::Main => EngineState::RunningMain,
            Flight::Teardown => EngineState::TearingDown,
        }
    }
}

/// Options for a single `run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// First main-flight position to execute (1-based, inclusive).
    pub first_step: usize,
    /// Last main-flight position to execute; defaults to the final step.
    pub last_step: Option<usize>,
    /// Full summary when true, results-only when false. Defaults to the suite setting.
    pub verbose: Option<bool>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            first_step: 1,
            last_step: None,
            verbose: None,
        }
    }
}

impl RunOptions {
    /// Only run main-flight steps at positions `first..=last`.
    pub fn window(first: usize, last: usize) -> Self {
        Self {
            first_step: first,
            last_step: Some(last),
            verbose: None,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }
}

/// How a single step invocation ended.
enum Invocation {
    Recorded,
    Restart,
}

/// How a whole attempt ended.
enum Attempt {
    Completed,
    Restart,
}

/// A registered, ordered suite of steps over a fixture of type `S`.
///
/// # Example
///
/// ```
/// use staircase::{Staircase, RunOptions};
/// use staircase::steps::{Outcome, StepDefinition};
/// use staircase::ui::MockLogger;
///
/// let mut suite = Staircase::builder(Vec::<String>::new())
///     .logger(MockLogger::new())
///     .step(StepDefinition::setup("open"), |log, _| {
///         log.push("open".into());
///         Ok(true)
///     })
///     .step(StepDefinition::test("check").on_pass("open"), |log, _| {
///         log.push("check".into());
///         Ok((true, 42))
///     })
///     .build()
///     .unwrap();
///
/// suite.run(&RunOptions::default()).unwrap();
/// assert_eq!(suite.fixture(), &["open", "check"]);
/// assert_eq!(suite.get_value("check").unwrap(), Some(&serde_json::json!(42)));
/// ```
pub struct Staircase<S = ()> {
    fixture: S,
    directory: StepDirectory,
    bodies: HashMap<String, StepFn<S>>,
    plan: ExecutionPlan,
    ordered: Vec<String>,
    restarts: RestartController,
    logger: Box<dyn StaircaseLogger>,
    theme: StaircaseTheme,
    verbose: bool,
    state: EngineState,
}

impl<S> fmt::Debug for Staircase<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Staircase")
            .field("ordered", &self.ordered)
            .field("state", &self.state)
            .field("restarts", &self.restarts)
            .finish_non_exhaustive()
    }
}

impl<S> Staircase<S> {
    /// Start declaring a suite around `fixture`.
    pub fn builder(fixture: S) -> StaircaseBuilder<S> {
        StaircaseBuilder::new(fixture)
    }

    /// Execute the suite.
    ///
    /// Setup and teardown steps always run (subject to their gates). Main
    /// steps run only when their position is inside the requested window;
    /// the rest stay not-yet-run. A granted restart resets every result and
    /// starts over with the same options.
    pub fn run(&mut self, options: &RunOptions) -> Result<()> {
        let window = self.window(options)?;

        loop {
            match self.attempt(&window) {
                Ok(Attempt::Completed) => break,
                Ok(Attempt::Restart) => {
                    info!("Restarting suite (restart {})", self.restarts.count());
                }
                Err(e) => {
                    self.transition(EngineState::Aborted);
                    return Err(e);
                }
            }
        }
        self.transition(EngineState::Completed);

        let mode = if options.verbose.unwrap_or(self.verbose) {
            PrintMode::Summary
        } else {
            PrintMode::Results
        };
        self.print(mode)
    }

    /// Run every step with default options.
    pub fn run_default(&mut self) -> Result<()> {
        self.run(&RunOptions::default())
    }

    /// Show the planned order without running anything.
    pub fn display(&mut self) -> Result<()> {
        self.print(PrintMode::Preview)
    }

    /// Show the planned order through `logger` instead of the suite's own sink.
    pub fn display_to(&self, logger: &mut dyn StaircaseLogger) -> Result<()> {
        Reporter::new(&self.ordered, &self.directory, &self.theme).print(PrintMode::Preview, logger)
    }

    fn print(&mut self, mode: PrintMode) -> Result<()> {
        Reporter::new(&self.ordered, &self.directory, &self.theme).print(mode, self.logger.as_mut())
    }

    fn window(&self, options: &RunOptions) -> Result<RangeInclusive<usize>> {
        let total = self.ordered.len();
        let first = options.first_step;
        let last = options.last_step.unwrap_or(total);
        if first < 1 || first > last || last > total {
            return Err(StaircaseError::InvalidRange { first, last, total });
        }
        Ok(first..=last)
    }

    fn transition(&mut self, next: EngineState) {
        debug!("Engine {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn attempt(&mut self, window: &RangeInclusive<usize>) -> Result<Attempt> {
        self.directory.reset();

        for flight in [Flight::Setup, Flight::Main, Flight::Teardown] {
            self.transition(EngineState::for_flight(flight));
            let steps = self.plan.flight(flight).to_vec();
            for name in steps {
                let entry = self.directory.get(&name)?;
                let in_window = entry.position.is_some_and(|p| window.contains(&p));
                if !entry.phase.is_structural() && !in_window {
                    debug!(step = %name, "Outside run window");
                    continue;
                }
                if let Invocation::Restart = self.invoke(&name)? {
                    return Ok(Attempt::Restart);
                }
            }
        }

        Ok(Attempt::Completed)
    }

    fn invoke(&mut self, name: &str) -> Result<Invocation> {
        let entry = self.directory.get(name)?;
        if !gate::eligible(&self.directory, &entry.condition) {
            debug!(step = %name, "Gate closed");
            self.directory.set_result(name, StepResult::gate_skipped())?;
            return Ok(Invocation::Recorded);
        }

        let body = self
            .bodies
            .get_mut(name)
            .ok_or_else(|| StaircaseError::StepNotFound {
                name: name.to_string(),
            })?;
        let mut ctx = StepContext::new(
            name,
            &mut self.directory,
            &mut self.restarts,
            self.logger.as_mut(),
        );
        debug!(step = %name, "Invoking step");
        let returned = body(&mut self.fixture, &mut ctx);
        let granted = ctx.restart_granted();
        let refused = ctx.restart_refused();

        let returned = match returned {
            Ok(returned) => returned,
            Err(source) => {
                self.logger.error(&format!(
                    "An exception occurred while executing step {}. {}",
                    name, source
                ));
                return Err(StaircaseError::StepFailed {
                    step: name.to_string(),
                    source,
                });
            }
        };

        if granted {
            return Ok(Invocation::Restart);
        }
        let result = if refused {
            StepResult::max_retries_exceeded()
        } else {
            match normalize(name, returned)? {
                Normalized::Recorded(result) => result,
                Normalized::Restart => {
                    return Err(StaircaseError::InvariantViolation {
                        step: name.to_string(),
                        message: "returned a restart signal not granted in this invocation".to_string(),
                    })
                }
            }
        };
        self.directory.set_result(name, result)?;

        if !self.directory.get(name)?.result.has_run() {
            return Err(StaircaseError::InvariantViolation {
                step: name.to_string(),
                message: "result still holds the not-yet-run sentinel after invocation".to_string(),
            });
        }
        Ok(Invocation::Recorded)
    }

    /// The last result of `name`; fails if it has not run.
    pub fn get_result(&self, name: &str) -> Result<&StepResult> {
        self.directory.result(name)
    }

    /// The value recorded by `name`; fails if it has not run.
    pub fn get_value(&self, name: &str) -> Result<Option<&Value>> {
        self.directory.value(name)
    }

    /// Whether `name` passed; fails if it has not run.
    pub fn has_passed(&self, name: &str) -> Result<bool> {
        self.directory.has_passed(name)
    }

    /// Step names in execution order; position `n` is element `n - 1`.
    pub fn ordered_steps(&self) -> &[String] {
        &self.ordered
    }

    pub fn plan(&self) -> &ExecutionPlan {
        &self.plan
    }

    pub fn directory(&self) -> &StepDirectory {
        &self.directory
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Restarts granted over the lifetime of this suite.
    pub fn restart_count(&self) -> u32 {
        self.restarts.count()
    }

    pub fn fixture(&self) -> &S {
        &self.fixture
    }

    pub fn fixture_mut(&mut self) -> &mut S {
        &mut self.fixture
    }

    pub fn into_fixture(self) -> S {
        self.fixture
    }

    pub fn logger(&mut self) -> &mut dyn StaircaseLogger {
        self.logger.as_mut()
    }

    /// Ordered results as JSON, for tooling.
    pub fn report_json(&self) -> Result<Value> {
        let entries = self
            .ordered
            .iter()
            .map(|name| self.directory.get(name))
            .collect::<Result<Vec<_>>>()?;
        serde_json::to_value(entries).map_err(|e| StaircaseError::Other(e.into()))
    }
}

/// Collects step definitions and suite settings, then validates and orders them.
pub struct StaircaseBuilder<S> {
    fixture: S,
    steps: Vec<(StepDefinition, StepFn<S>)>,
    config: StaircaseConfig,
    logger: Option<Box<dyn StaircaseLogger>>,
    theme: Option<StaircaseTheme>,
    restart_retries: Option<u32>,
    verbose: Option<bool>,
}

impl<S> fmt::Debug for StaircaseBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaircaseBuilder")
            .field("steps", &self.steps.len())
            .finish_non_exhaustive()
    }
}

impl<S> StaircaseBuilder<S> {
    pub fn new(fixture: S) -> Self {
        Self {
            fixture,
            steps: Vec::new(),
            config: StaircaseConfig::default(),
            logger: None,
            theme: None,
            restart_retries: None,
            verbose: None,
        }
    }

    /// Defaults from a loaded config file. Explicit builder calls take precedence.
    pub fn config(mut self, config: &StaircaseConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Sink for reports and step errors. Defaults to [`ConsoleLogger`].
    pub fn logger(mut self, logger: impl StaircaseLogger + 'static) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    pub fn theme(mut self, theme: StaircaseTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Restart budget for the suite's lifetime.
    pub fn restart_retries(mut self, retries: u32) -> Self {
        self.restart_retries = Some(retries);
        self
    }

    /// Default report view: full summary (true) or results only (false).
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Register a step and its body.
    pub fn step<F, R>(mut self, definition: StepDefinition, mut body: F) -> Self
    where
        F: FnMut(&mut S, &mut StepContext<'_>) -> anyhow::Result<R> + 'static,
        R: Into<StepReturn>,
    {
        let boxed: StepFn<S> =
            Box::new(move |fixture: &mut S, ctx: &mut StepContext<'_>| body(fixture, ctx).map(Into::into));
        self.steps.push((definition, boxed));
        self
    }

    /// Validate registrations, resolve wildcards, order the steps, and assign positions.
    pub fn build(self) -> Result<Staircase<S>> {
        let mut directory = StepDirectory::new();
        let mut bodies = HashMap::with_capacity(self.steps.len());

        for (definition, body) in self.steps {
            let parts = definition.into_parts()?;
            let name = parts.name.clone();
            directory.register(parts)?;
            bodies.insert(name, body);
        }

        directory.resolve_wildcards();
        directory.validate()?;

        let plan = ExecutionPlan::resolve(&directory)?;
        let ordered = plan.ordered();
        directory.assign_positions(&ordered)?;
        debug!("Resolved order: {}", ordered.join(", "));

        Ok(Staircase {
            fixture: self.fixture,
            directory,
            bodies,
            plan,
            ordered,
            restarts: RestartController::new(
                self.restart_retries.unwrap_or(self.config.restart_retries),
            ),
            logger: self
                .logger
                .unwrap_or_else(|| Box::new(ConsoleLogger::new())),
            theme: self.theme.unwrap_or_else(|| self.config.color.theme()),
            verbose: self.verbose.unwrap_or(self.config.verbose),
            state: EngineState::Idle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::{Outcome, SubstepDefinition, GATE_SKIPPED, MAX_RETRIES_EXCEEDED};
    use crate::ui::MockLogger;
    use serde_json::json;

    type Calls = Vec<&'static str>;

    fn record(calls: &mut Calls, name: &'static str) {
        calls.push(name);
    }

    #[test]
    fn gate_on_passed_dependency_runs() {
        let mut suite = Staircase::builder(Calls::new())
            .logger(MockLogger::new())
            .step(StepDefinition::task("x"), |c, _| {
                record(c, "x");
                Ok(true)
            })
            .step(StepDefinition::task("y").on_pass("x"), |c, _| {
                record(c, "y");
                Ok(())
            })
            .build()
            .unwrap();

        suite.run_default().unwrap();
        assert_eq!(suite.fixture(), &["x", "y"]);
        assert!(suite.has_passed("y").unwrap());
        assert_eq!(suite.state(), EngineState::Completed);
    }

    #[test]
    fn gate_on_failed_dependency_skips() {
        let mut suite = Staircase::builder(Calls::new())
            .logger(MockLogger::new())
            .step(StepDefinition::task("x"), |c, _| {
                record(c, "x");
                Ok(false)
            })
            .step(StepDefinition::task("y").on_pass("x"), |c, _| {
                record(c, "y");
                Ok(())
            })
            .step(StepDefinition::test("z").on_pass("y"), |c, _| {
                record(c, "z");
                Ok(())
            })
            .build()
            .unwrap();

        suite.run_default().unwrap();
        assert_eq!(suite.fixture(), &["x"]);
        assert_eq!(suite.get_result("y").unwrap().outcome, Outcome::Skipped);
        assert_eq!(suite.get_value("y").unwrap(), Some(&json!(GATE_SKIPPED)));
        assert_eq!(suite.get_result("z").unwrap().outcome, Outcome::Skipped);
    }

    #[test]
    fn on_fail_step_runs_after_failure() {
        let mut suite = Staircase::builder(())
            .logger(MockLogger::new())
            .step(StepDefinition::task("process"), |_, _| Ok(false))
            .step(StepDefinition::task("cleanup").on_fail("process"), |_, _| Ok(true))
            .build()
            .unwrap();
        suite.run_default().unwrap();
        assert!(suite.has_passed("cleanup").unwrap());
    }

    #[test]
    fn invalid_windows_are_rejected() {
        let mut suite = Staircase::builder(())
            .logger(MockLogger::new())
            .step(StepDefinition::task("a"), |_, _| Ok(()))
            .step(StepDefinition::task("b"), |_, _| Ok(()))
            .build()
            .unwrap();

        for options in [
            RunOptions::window(0, 1),
            RunOptions::window(2, 1),
            RunOptions::window(1, 3),
        ] {
            assert!(matches!(
                suite.run(&options).unwrap_err(),
                StaircaseError::InvalidRange { total: 2, .. }
            ));
        }
        assert_eq!(suite.state(), EngineState::Idle);
    }

    #[test]
    fn empty_suite_has_no_valid_window() {
        let mut suite = Staircase::builder(()).logger(MockLogger::new()).build().unwrap();
        assert!(suite.run_default().is_err());
    }

    #[test]
    fn body_error_is_logged_once_and_aborts() {
        let logger = MockLogger::new();
        let mut suite = Staircase::builder(Calls::new())
            .logger(logger.clone())
            .step(StepDefinition::task("boom"), |_, _| -> anyhow::Result<()> {
                anyhow::bail!("disk on fire")
            })
            .step(StepDefinition::teardown("close"), |c, _| {
                record(c, "close");
                Ok(())
            })
            .build()
            .unwrap();

        let err = suite.run_default().unwrap_err();
        assert!(matches!(err, StaircaseError::StepFailed { ref step, .. } if step == "boom"));
        assert_eq!(logger.errors().len(), 1);
        assert!(logger.errors()[0].contains("boom"));
        assert!(logger.errors()[0].contains("disk on fire"));
        assert!(suite.fixture().is_empty());
        assert_eq!(suite.state(), EngineState::Aborted);
        assert!(!logger.contains("Staircase Execution Summary"));
    }

    #[test]
    fn malformed_return_aborts_the_run() {
        let mut suite = Staircase::builder(())
            .logger(MockLogger::new())
            .step(StepDefinition::test("bad"), |_, _| {
                Ok(StepReturn::sequence([true, false, true]))
            })
            .build()
            .unwrap();
        let err = suite.run_default().unwrap_err();
        assert!(matches!(err, StaircaseError::ResultFormat { len: 3, .. }));
        assert_eq!(suite.state(), EngineState::Aborted);
    }

    #[test]
    fn restart_reruns_with_same_window() {
        let mut suite = Staircase::builder(Calls::new())
            .logger(MockLogger::new())
            .restart_retries(0)
            .step(StepDefinition::setup("open"), |c, _| {
                record(c, "open");
                Ok(())
            })
            .step(StepDefinition::task("a"), |c, _| {
                record(c, "a");
                Ok(())
            })
            .step(StepDefinition::task("flaky"), |c, ctx| {
                record(c, "flaky");
                Ok(ctx.restart())
            })
            .step(StepDefinition::task("never"), |c, _| {
                record(c, "never");
                Ok(())
            })
            .build()
            .unwrap();

        suite.run(&RunOptions::window(3, 3)).unwrap();
        assert_eq!(suite.fixture(), &["open", "flaky", "open", "flaky"]);
        assert_eq!(suite.restart_count(), 1);
        assert_eq!(
            suite.get_result("flaky").unwrap(),
            &StepResult::failed(Some(json!(MAX_RETRIES_EXCEEDED)))
        );
        assert!(suite.get_result("a").is_err());
    }

    #[test]
    fn granted_restart_applies_whatever_the_body_returns() {
        let mut suite = Staircase::builder(Calls::new())
            .logger(MockLogger::new())
            .restart_retries(0)
            .step(StepDefinition::task("flaky"), |c, ctx| {
                record(c, "flaky");
                let _ = ctx.restart();
                Ok(true)
            })
            .step(StepDefinition::task("after"), |c, _| {
                record(c, "after");
                Ok(())
            })
            .build()
            .unwrap();

        suite.run(&RunOptions::default()).unwrap();
        assert_eq!(suite.fixture(), &["flaky", "flaky", "after"]);
        assert_eq!(suite.restart_count(), 1);
        assert_eq!(
            suite.get_result("flaky").unwrap(),
            &StepResult::failed(Some(json!(MAX_RETRIES_EXCEEDED)))
        );
    }

    #[test]
    fn kept_restart_signal_is_rejected_on_a_later_attempt() {
        let mut suite = Staircase::builder(None::<StepReturn>)
            .logger(MockLogger::new())
            .restart_retries(5)
            .step(StepDefinition::task("hoard"), |kept, ctx| match kept.take() {
                Some(signal) => Ok(signal),
                None => {
                    *kept = Some(ctx.restart());
                    Ok(StepReturn::Unit)
                }
            })
            .build()
            .unwrap();

        let err = suite.run(&RunOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            StaircaseError::InvariantViolation { ref step, .. } if step == "hoard"
        ));
        assert_eq!(suite.restart_count(), 1);
    }

    #[test]
    fn substeps_are_recorded_under_parent() {
        let mut suite = Staircase::builder(())
            .logger(MockLogger::new())
            .step(
                StepDefinition::test("loop")
                    .substep(SubstepDefinition::new("item").description("each item")),
                |_, ctx| {
                    for i in 0..3 {
                        ctx.substep("item", || Ok(i % 2 == 0))?;
                    }
                    Ok((true, "done"))
                },
            )
            .build()
            .unwrap();

        suite.run_default().unwrap();
        let entry = suite.directory().get("loop").unwrap();
        let outcomes: Vec<_> = entry.substeps.iter().map(|s| s.result.outcome).collect();
        assert_eq!(outcomes, [Outcome::Passed, Outcome::Failed, Outcome::Passed]);

        suite.run_default().unwrap();
        assert_eq!(suite.directory().get("loop").unwrap().substeps.len(), 3);
    }

    #[test]
    fn explicit_settings_override_config() {
        let config = StaircaseConfig {
            restart_retries: 5,
            verbose: false,
            ..StaircaseConfig::default()
        };
        let logger = MockLogger::new();
        let mut suite = Staircase::builder(())
            .config(&config)
            .restart_retries(0)
            .logger(logger.clone())
            .theme(StaircaseTheme::plain())
            .step(StepDefinition::test("t"), |_, _| Ok(()))
            .build()
            .unwrap();
        suite.run_default().unwrap();
        assert!(logger.contains("Staircase Test Results"));
        assert_eq!(suite.restarts.max_retries(), 0);
    }

    #[test]
    fn report_json_follows_execution_order() {
        let mut suite = Staircase::builder(())
            .logger(MockLogger::new())
            .step(StepDefinition::teardown("close"), |_, _| Ok(()))
            .step(StepDefinition::setup("open"), |_, _| Ok(7))
            .build()
            .unwrap();
        suite.run_default().unwrap();
        let json = suite.report_json().unwrap();
        assert_eq!(json[0]["name"], "open");
        assert_eq!(json[0]["position"], 1);
        assert_eq!(json[0]["result"]["outcome"], "passed");
        assert_eq!(json[0]["result"]["value"], 7);
        assert_eq!(json[1]["name"], "close");
    }
}
