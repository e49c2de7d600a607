//! Command execution primitives with consistent error handling.

use std::path::Path;
use std::process::{Command, Output};

use serde::Serialize;

/// Captured output from command execution.
///
/// Only the exit status is ever interpreted; stdout/stderr are carried for
/// reporting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

impl CommandOutput {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    fn spawn_failure(program: &str, err: std::io::Error) -> Self {
        Self {
            success: false,
            exit_code: -1,
            stdout: String::new(),
            stderr: format!("Failed to run {}: {}", program, err),
        }
    }
}

/// Run a command in a directory, capturing stdout/stderr.
///
/// Spawn failures (missing binary, bad directory) are folded into a failed
/// `CommandOutput` rather than an error, so callers handle exactly one shape.
pub fn run_in(dir: &Path, program: &str, args: &[&str]) -> CommandOutput {
    match Command::new(program).args(args).current_dir(dir).output() {
        Ok(output) => CommandOutput::from_output(output),
        Err(e) => CommandOutput::spawn_failure(program, e),
    }
}

/// Extract error text from a captured command.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &CommandOutput) -> String {
    if !output.stderr.trim().is_empty() {
        output.stderr.trim().to_string()
    } else {
        output.stdout.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_in_captures_stdout() {
        let out = run_in(Path::new("/tmp"), "echo", &["hello"]);
        assert!(out.success);
        assert_eq!(out.exit_code, 0);
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn run_in_reports_failure_exit_code() {
        let out = run_in(Path::new("/tmp"), "false", &[]);
        assert!(!out.success);
        assert_eq!(out.exit_code, 1);
    }

    #[test]
    fn run_in_folds_spawn_failure_into_output() {
        let out = run_in(Path::new("/tmp"), "nonexistent_command_xyz", &[]);
        assert!(!out.success);
        assert_eq!(out.exit_code, -1);
        assert!(out.stderr.contains("nonexistent_command_xyz"));
    }

    #[test]
    fn error_text_prefers_stderr() {
        let out = CommandOutput {
            success: false,
            exit_code: 1,
            stdout: "stdout content".to_string(),
            stderr: "stderr content".to_string(),
        };
        assert_eq!(error_text(&out), "stderr content");
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let out = CommandOutput {
            success: false,
            exit_code: 1,
            stdout: "stdout content".to_string(),
            stderr: String::new(),
        };
        assert_eq!(error_text(&out), "stdout content");
    }
}
