//! Report rendering: summary, preview, and results-only views.
//!
//! Reports are a table written line by line through a [`StaircaseLogger`]:
//!
//! ```text
//! ****************************************************************************************************
//! *                                 Staircase Execution Summary                                      *
//! ****************************************************************************************************
//!
//! STEP #    TYPE      STATUS   NAME                          DESCRIPTION
//! ----------------------------------------------------------------------------------------------------
//! 1         Setup     PASS     open_files                    Open files
//! ```

use serde_json::Value;

use crate::error::Result;
use crate::steps::{Outcome, Phase, StepDirectory, StepResult};

use super::theme::StaircaseTheme;
use super::StaircaseLogger;

const HEADER_WIDTH: usize = 100;
const STEP_NO_WIDTH: usize = 10;
const TYPE_WIDTH: usize = 10;
const NAME_WIDTH: usize = 30;

/// Which view to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// Every step with its outcome, plus substeps.
    Summary,
    /// Order and phase only; no outcomes, no substeps.
    Preview,
    /// Test steps and their substeps only.
    Results,
}

impl PrintMode {
    pub fn title(&self) -> &'static str {
        match self {
            PrintMode::Summary => "Staircase Execution Summary",
            PrintMode::Preview => "Staircase Execution Preview",
            PrintMode::Results => "Staircase Test Results",
        }
    }
}

/// Renders a directory in execution order.
pub struct Reporter<'a> {
    order: &'a [String],
    directory: &'a StepDirectory,
    theme: &'a StaircaseTheme,
}

impl<'a> Reporter<'a> {
    pub fn new(order: &'a [String], directory: &'a StepDirectory, theme: &'a StaircaseTheme) -> Self {
        Self {
            order,
            directory,
            theme,
        }
    }

    /// Write the report through `logger`.
    pub fn print(&self, mode: PrintMode, logger: &mut dyn StaircaseLogger) -> Result<()> {
        for line in self.render(mode)? {
            logger.info(&line);
        }
        Ok(())
    }

    /// Render the report as lines.
    pub fn render(&self, mode: PrintMode) -> Result<Vec<String>> {
        let mut lines = self.header(mode.title());
        lines.push(String::new());
        lines.push(format!(
            "{:<no$}{:<kind$}STATUS   {:<name$}DESCRIPTION",
            "STEP #",
            "TYPE",
            "NAME",
            no = STEP_NO_WIDTH,
            kind = TYPE_WIDTH,
            name = NAME_WIDTH
        ));
        lines.push("-".repeat(HEADER_WIDTH));

        for (index, name) in self.order.iter().enumerate() {
            let entry = self.directory.get(name)?;
            if mode == PrintMode::Results && entry.phase != Phase::Test {
                continue;
            }
            let step_no = entry.position.unwrap_or(index + 1);
            let preview = mode == PrintMode::Preview;

            lines.push(self.row(
                &step_no.to_string(),
                &entry.phase.to_string(),
                &entry.name,
                &entry.description,
                &entry.result,
                preview,
            ));
            if !preview {
                lines.extend(self.detail(&entry.result));
                for (i, substep) in entry.substeps.iter().enumerate() {
                    lines.push(self.row(
                        &format!(" └{}.{}", step_no, i + 1),
                        "Substep",
                        &substep.name,
                        &substep.description,
                        &substep.result,
                        false,
                    ));
                    lines.extend(self.detail(&substep.result));
                }
            }
        }

        Ok(lines)
    }

    fn header(&self, title: &str) -> Vec<String> {
        let cap = "*".repeat(HEADER_WIDTH);
        let inner = HEADER_WIDTH - 2;
        let left = inner.saturating_sub(title.len()) / 2;
        let right = inner.saturating_sub(title.len() + left);
        let mid = format!(
            "*{}{}{}*",
            " ".repeat(left),
            self.theme.header.apply_to(title),
            " ".repeat(right)
        );
        vec![cap.clone(), mid, cap]
    }

    fn status(&self, result: &StepResult, preview: bool) -> String {
        if preview {
            return self.theme.pending.apply_to("----").to_string();
        }
        match result.outcome {
            Outcome::Passed => self.theme.passed.apply_to("PASS").to_string(),
            Outcome::Failed => self.theme.failed.apply_to("FAIL").to_string(),
            Outcome::Skipped => self.theme.skipped.apply_to("SKIP").to_string(),
            Outcome::NotYetRun => self.theme.pending.apply_to("----").to_string(),
        }
    }

    fn row(
        &self,
        step_no: &str,
        kind: &str,
        name: &str,
        description: &str,
        result: &StepResult,
        preview: bool,
    ) -> String {
        format!(
            "{:<no_w$}{:<kind_w$}{}     {:<name_w$}{}",
            step_no,
            kind,
            self.status(result, preview),
            name,
            description,
            no_w = STEP_NO_WIDTH,
            kind_w = TYPE_WIDTH,
            name_w = NAME_WIDTH
        )
        .trim_end()
        .to_string()
    }

    /// Failure and skip reasons, shown under the row.
    fn detail(&self, result: &StepResult) -> Option<String> {
        let value = result.value.as_ref()?;
        let indent = " ".repeat(STEP_NO_WIDTH + TYPE_WIDTH);
        match result.outcome {
            Outcome::Failed => Some(format!(
                "{}{}",
                indent,
                self.theme.failed.apply_to(format!("└x {}", display_value(value)))
            )),
            Outcome::Skipped => Some(format!(
                "{}{}",
                indent,
                self.theme.dim.apply_to(format!("└ {}", display_value(value)))
            )),
            Outcome::Passed | Outcome::NotYetRun => None,
        }
    }
}

/// Strings print bare; everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
