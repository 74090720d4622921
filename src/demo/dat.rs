use serde_json::Value;

use crate::runner::StaircaseBuilder;
use crate::steps::{StepDefinition, SubstepDefinition};

pub(super) fn suite() -> StaircaseBuilder<()> {
    StaircaseBuilder::new(())
        .step(
            StepDefinition::setup("open_files").description("Open files"),
            |_, _| Ok((true, "files opened")),
        )
        .step(
            StepDefinition::setup("read_dat")
                .description("Read dat file")
                .on_pass("open_files"),
            |_, _| Ok((true, 3)),
        )
        .step(
            StepDefinition::task("loop_dat2")
                .description("Process dat file")
                .on_pass("threshold"),
            |_, _| Ok((true, vec!["lines"])),
        )
        .step(
            StepDefinition::test("loop_dat")
                .description("Process dat file")
                .on_pass("loop_dat2")
                .substep(
                    SubstepDefinition::new("do_some_substep")
                        .description("Test for things in a for loop"),
                )
                .substep(
                    SubstepDefinition::new("second_substep").description("This is a second substep"),
                ),
            |_, ctx| {
                for item in 0..5 {
                    ctx.substep("do_some_substep", || {
                        Ok(if item != 0 {
                            (true, "Looks good to me")
                        } else {
                            (false, "What the hell")
                        })
                    })?;
                }
                ctx.logger().info("SECOND");
                ctx.substep("second_substep", || Ok((true, "Wowza")))?;
                Ok((true, "Passed with flying colors."))
            },
        )
        .step(
            StepDefinition::test("all_have_int")
                .description("Make sure that each record has integers.")
                .on_pass(["threshold", "loop_dat"]),
            |_, ctx| {
                let all_ints = match ctx.value("loop_dat")? {
                    Some(Value::Array(records)) => records.iter().all(Value::is_i64),
                    _ => false,
                };
                if all_ints {
                    Ok((true, "Passed"))
                } else {
                    Ok((false, "Found a non-integer value on line 34."))
                }
            },
        )
        .step(
            StepDefinition::test("threshold").description("Dat errors for NULLs are < 30%"),
            |_, _| {
                Ok((
                    true,
                    "The threshold of dat errors of 30% was exceeded. Got 34%.",
                ))
            },
        )
        .step(
            StepDefinition::teardown("close_files").description("Closing files."),
            |_, _| Ok((true, true)),
        )
}
