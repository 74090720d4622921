use crate::runner::StaircaseBuilder;
use crate::steps::{StepDefinition, SubstepDefinition};

pub(super) fn suite() -> StaircaseBuilder<()> {
    StaircaseBuilder::new(())
        .step(
            StepDefinition::setup("open_and_store")
                .description("opens a data file and stores its contents"),
            |_, _| Ok(true),
        )
        .step(
            StepDefinition::setup("connect_to_db").description("connects to a database"),
            |_, _| Ok(true),
        )
        .step(
            StepDefinition::setup("read_and_open_file")
                .description("reads expected filename and opens file for write"),
            |_, _| Ok(true),
        )
        .step(
            StepDefinition::task("process_1").description("processing..."),
            |_, _| Ok(true),
        )
        .step(
            StepDefinition::task("process_2").description("processing again..."),
            |_, _| Ok(false),
        )
        .step(
            StepDefinition::task("cleanup_process_fail")
                .description("cleanup of processing failure")
                .on_fail("process_2"),
            |_, _| Ok(true),
        )
        .step(
            StepDefinition::task("process_files")
                .description("even more processing")
                .on_pass("process_2"),
            |_, _| Ok((false, "Yeah this messed up")),
        )
        .step(
            StepDefinition::task("final_processing")
                .on_pass(["process_files", "process_1", "process_2"])
                .substep(
                    SubstepDefinition::new("process_a")
                        .description("substep for success of process_files")
                        .on_pass("process_files"),
                )
                .substep(
                    SubstepDefinition::new("process_b")
                        .description("substep for success of process_1 and process_2")
                        .on_pass(["process_1", "process_2"]),
                ),
            |_, ctx| {
                ctx.substep("process_a", || Ok(true))?;
                ctx.substep("process_b", || Ok(true))?;
                Ok(true)
            },
        )
        .step(
            StepDefinition::teardown("close_db_conn")
                .description("close the db connection")
                .on_pass_all_others(),
            |_, _| Ok(true),
        )
        .step(
            StepDefinition::teardown("generate_report")
                .description("generate a report if all steps pass"),
            |_, _| Ok(true),
        )
}
