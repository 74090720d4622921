//! Library integration tests.

use staircase::StaircaseError;

#[test]
fn error_types_are_public() {
    let err = StaircaseError::StepNotFound {
        name: "missing".into(),
    };
    assert!(err.to_string().contains("missing"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> staircase::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use staircase::cli::{Cli, Commands};

    let cli = Cli::parse_from(["staircase", "run", "--json"]);
    if let Some(Commands::Run(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Run command");
    }
}

#[test]
fn builder_is_reachable_from_root() {
    use staircase::steps::StepDefinition;
    use staircase::ui::MockLogger;

    let suite = staircase::Staircase::builder(())
        .logger(MockLogger::new())
        .step(StepDefinition::task("only"), |_, _| Ok(()))
        .build()
        .unwrap();
    assert_eq!(suite.ordered_steps(), ["only"]);
    assert_eq!(suite.state(), staircase::EngineState::Idle);
}
