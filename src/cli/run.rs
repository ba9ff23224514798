//! The preflight run.
//!
//! Gathers and evaluates every applicable check, writes the report and
//! prints a short summary.

use std::time::Duration;

use chrono::Utc;

use crate::checks::OverallResult;
use crate::config::{ExitCodePolicy, PreflightConfig};
use crate::engine::{run_checks, Evaluation, RunOptions};
use crate::error::Result;
use crate::report::write_report;
use crate::system::{Host, LocalHost};
use crate::ui::UserInterface;

use super::command::{Command, CommandResult};

/// Runs the checks against the local host.
pub struct RunCommand {
    config: PreflightConfig,
    interface: Option<String>,
}

impl RunCommand {
    pub fn new(config: PreflightConfig, interface: Option<String>) -> Self {
        Self { config, interface }
    }

    /// Run against an arbitrary host.
    pub fn execute_on(
        &self,
        host: &dyn Host,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        ui.show_header(&format!("ae-preflight {}", env!("CARGO_PKG_VERSION")));

        let mut spinner = ui.start_spinner("Checking system requirements...");
        let options = RunOptions {
            interface: self.interface.as_deref(),
        };
        let evaluation = run_checks(host, &self.config, options);
        spinner.finish_success("System checks complete");

        let path = &self.config.report_path;
        write_report(path, &evaluation, Utc::now())?;

        self.show_summary(&evaluation, ui);

        let exit_code = exit_code(self.config.exit_code, evaluation.overall);
        Ok(CommandResult {
            success: exit_code == 0,
            exit_code,
        })
    }

    fn show_summary(&self, evaluation: &Evaluation, ui: &mut dyn UserInterface) {
        for verdict in evaluation
            .verdicts
            .iter()
            .filter(|v| evaluation.escalated(v))
        {
            ui.message(&format!("  {}: {}", verdict.check, verdict.status));
        }

        let line = format!("Overall Result: {}", evaluation.overall);
        match evaluation.overall {
            OverallResult::Pass => ui.success(&line),
            OverallResult::Warn => ui.warning(&line),
            OverallResult::Fail => ui.error(&line),
        }
        ui.message(&format!(
            "To view details about the results see {}",
            self.config.report_path.display()
        ));
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let host = LocalHost::new(Duration::from_secs(self.config.command_timeout_secs));
        self.execute_on(&host, ui)
    }
}

/// Process exit code for an overall result.
pub fn exit_code(policy: ExitCodePolicy, overall: OverallResult) -> i32 {
    match policy {
        ExitCodePolicy::AlwaysZero => 0,
        ExitCodePolicy::ByResult => match overall {
            OverallResult::Pass => 0,
            OverallResult::Warn => 1,
            OverallResult::Fail => 2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures;
    use crate::error::PreflightError;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn command(temp: &TempDir, policy: ExitCodePolicy) -> RunCommand {
        let config = PreflightConfig {
            report_path: temp.path().join("results.txt"),
            exit_code: policy,
            ..PreflightConfig::default()
        };
        RunCommand::new(config, None)
    }

    #[test]
    fn healthy_host_passes_and_writes_report() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp, ExitCodePolicy::AlwaysZero);
        let mut ui = MockUI::new();

        let result = cmd.execute_on(&fixtures::healthy_rhel(), &mut ui).unwrap();

        assert_eq!(result, CommandResult::success());
        assert!(ui.has_success("Overall Result: PASS"));
        assert!(ui.has_message("results.txt"));
        assert_eq!(ui.spinners(), &["Checking system requirements..."]);
        assert!(ui.has_header("ae-preflight"));
        let report = std::fs::read_to_string(temp.path().join("results.txt")).unwrap();
        assert!(report.contains("Overall Result: PASS"));
    }

    #[test]
    fn failing_host_exits_zero_by_default() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp, ExitCodePolicy::AlwaysZero);
        let host = fixtures::healthy_debian().with_command("getconf _NPROCESSORS_ONLN", "2\n");
        let mut ui = MockUI::new();

        let result = cmd.execute_on(&host, &mut ui).unwrap();

        assert_eq!(result.exit_code, 0);
        assert!(ui.has_error("Overall Result: FAIL"));
        assert!(ui.has_message("CPU Cores: FAIL"));
    }

    #[test]
    fn by_result_policy_maps_overall_to_exit_code() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp, ExitCodePolicy::ByResult);
        let host = fixtures::healthy_debian().with_process(9, "puppet");
        let mut ui = MockUI::new();

        let result = cmd.execute_on(&host, &mut ui).unwrap();

        assert_eq!(result, CommandResult::failure(1));
        assert!(ui.has_warning("Overall Result: WARN"));
        assert!(ui.has_message("Agents: WARN"));
    }

    #[test]
    fn unwritable_report_is_fatal() {
        let temp = TempDir::new().unwrap();
        let config = PreflightConfig {
            report_path: temp.path().join("no-such-dir").join("results.txt"),
            ..PreflightConfig::default()
        };
        let cmd = RunCommand::new(config, None);
        let mut ui = MockUI::new();

        let err = cmd
            .execute_on(&fixtures::healthy_debian(), &mut ui)
            .unwrap_err();
        assert!(matches!(err, PreflightError::ReportWriteFailed { .. }));
    }

    #[test]
    fn exit_code_policies() {
        assert_eq!(exit_code(ExitCodePolicy::AlwaysZero, OverallResult::Fail), 0);
        assert_eq!(exit_code(ExitCodePolicy::ByResult, OverallResult::Pass), 0);
        assert_eq!(exit_code(ExitCodePolicy::ByResult, OverallResult::Warn), 1);
        assert_eq!(exit_code(ExitCodePolicy::ByResult, OverallResult::Fail), 2);
    }
}
