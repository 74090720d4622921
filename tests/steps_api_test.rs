//! Integration tests for step declaration and build-time validation.

use staircase::steps::{DependencyCondition, GateKind, StepDefinition, SubstepDefinition};
use staircase::ui::MockLogger;
use staircase::{Staircase, StaircaseBuilder, StaircaseError};

fn builder() -> StaircaseBuilder<()> {
    Staircase::builder(()).logger(MockLogger::new())
}

#[test]
fn mutual_dependency_is_a_cycle_naming_both() {
    let err = builder()
        .step(StepDefinition::task("a").on_pass("b"), |_, _| Ok(()))
        .step(StepDefinition::task("b").on_pass("a"), |_, _| Ok(()))
        .build()
        .unwrap_err();
    match err {
        StaircaseError::DependencyCycle { cycle } => {
            assert!(cycle.contains(&"a".to_string()));
            assert!(cycle.contains(&"b".to_string()));
        }
        other => panic!("expected cycle, got {other:?}"),
    }
}

#[test]
fn all_others_expands_to_every_other_step() {
    let suite = builder()
        .step(StepDefinition::task("a"), |_, _| Ok(()))
        .step(StepDefinition::task("b"), |_, _| Ok(()))
        .step(StepDefinition::teardown("s").on_pass_all_others(), |_, _| Ok(()))
        .build()
        .unwrap();
    let condition = &suite.directory().get("s").unwrap().condition;
    assert_eq!(
        condition,
        &DependencyCondition::OnPass(vec!["a".to_string(), "b".to_string()])
    );
    assert!(!condition.is_wildcard());
}

#[test]
fn every_step_orders_after_its_dependencies() {
    let suite = builder()
        .step(StepDefinition::test("report").on_pass(["load", "check"]), |_, _| Ok(()))
        .step(StepDefinition::task("check").on_pass("load"), |_, _| Ok(()))
        .step(StepDefinition::task("load"), |_, _| Ok(()))
        .build()
        .unwrap();
    let order = suite.ordered_steps();
    for entry in suite.directory().iter() {
        let at = order.iter().position(|s| *s == entry.name).unwrap();
        for dep in entry.condition.dependencies() {
            let dep_at = order.iter().position(|s| s == dep).unwrap();
            assert!(dep_at < at, "{dep} must precede {}", entry.name);
        }
    }
}

#[test]
fn duplicate_names_are_rejected() {
    let err = builder()
        .step(StepDefinition::task("same"), |_, _| Ok(()))
        .step(StepDefinition::test("same"), |_, _| Ok(()))
        .build()
        .unwrap_err();
    assert!(matches!(err, StaircaseError::DuplicateStep { ref name } if name == "same"));
}

#[test]
fn unknown_dependency_is_a_configuration_error() {
    let err = builder()
        .step(StepDefinition::task("a").on_fail("ghost"), |_, _| Ok(()))
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn substep_gate_must_stay_within_parent() {
    let err = builder()
        .step(StepDefinition::task("x"), |_, _| Ok(()))
        .step(StepDefinition::task("y"), |_, _| Ok(()))
        .step(
            StepDefinition::test("t")
                .on_pass("x")
                .substep(SubstepDefinition::new("s").on_pass("y")),
            |_, _| Ok(()),
        )
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("t.s"));
}

#[test]
fn fail_wildcard_resolves_to_on_fail() {
    let suite = builder()
        .step(StepDefinition::task("a"), |_, _| Ok(false))
        .step(StepDefinition::teardown("rescue").on_fail_all_others(), |_, _| Ok(()))
        .build()
        .unwrap();
    assert_eq!(
        suite.directory().get("rescue").unwrap().condition,
        DependencyCondition::OnFail(vec!["a".to_string()])
    );
    assert_ne!(
        suite.directory().get("rescue").unwrap().condition,
        DependencyCondition::OnAllOthers(GateKind::Fail)
    );
}
