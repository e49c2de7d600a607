//! Project scaffolding steps for bootstrapping a template checkout.
//!
//! Each step is idempotent and independently skippable. Steps run strictly in
//! sequence because later steps depend on earlier ones (hooks need the
//! virtualenv, the virtualenv installs against customized metadata). There is
//! no rollback; an interrupted run simply leaves the remaining steps undone.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::log_status;
use crate::utils::command::{self, CommandOutput};
use crate::utils::{io, template};

/// Directory the isolated environment is created in.
pub const VENV_DIR: &str = ".venv";

/// Whether a step's failure aborts the whole initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// Failure aborts the process with a non-zero status.
    Fatal,
    /// Failure is logged and the remaining steps still run.
    NonFatal,
}

/// Result of running a single external command within a step.
#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub success: bool,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

/// Result of one scaffolding step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: String,
    pub success: bool,
    pub skipped: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandReport>,
}

impl StepOutcome {
    pub fn skipped(step: &str) -> Self {
        Self {
            step: step.to_string(),
            success: true,
            skipped: true,
            commands: Vec::new(),
        }
    }
}

/// Require a step to have succeeded when its mode is fatal.
pub fn require(outcome: &StepOutcome, mode: StepMode) -> Result<()> {
    if outcome.success || mode == StepMode::NonFatal {
        Ok(())
    } else {
        Err(Error::CommandFailed(format!(
            "step '{}' failed",
            outcome.step
        )))
    }
}

/// Parameters for one initialization run.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub project_name: String,
    pub author_name: String,
    pub author_email: String,
    pub skip_git: bool,
    pub skip_venv: bool,
    pub skip_pre_commit: bool,
}

/// Everything one initialization run produced.
#[derive(Debug, Clone)]
pub struct InitRun {
    pub customized_files: Vec<String>,
    pub steps: Vec<StepOutcome>,
    pub warnings: Vec<String>,
}

/// Run the full initialization sequence against a target directory.
///
/// Metadata customization and virtualenv setup are fatal; git, pre-commit
/// and smoke checks degrade to warnings. Pre-commit and smoke both need the
/// virtualenv, so `skip_venv` implies skipping them.
pub fn run(project_path: &Path, opts: &InitOptions) -> Result<InitRun> {
    let mut steps: Vec<StepOutcome> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let customized_files = customize_project(project_path, opts)?;

    let git = if opts.skip_git {
        StepOutcome::skipped("git")
    } else {
        init_git_repo(project_path)
    };
    if !git.success {
        warnings.push("Git initialization failed, continuing".to_string());
    }
    steps.push(git);

    let venv = if opts.skip_venv {
        StepOutcome::skipped("venv")
    } else {
        setup_virtual_environment(project_path)
    };
    steps.push(venv.clone());
    require(&venv, StepMode::Fatal)?;

    let pre_commit = if opts.skip_pre_commit || opts.skip_venv {
        StepOutcome::skipped("pre-commit")
    } else {
        setup_pre_commit(project_path)
    };
    if !pre_commit.success {
        warnings.push("Pre-commit setup failed, continuing".to_string());
    }
    steps.push(pre_commit);

    let smoke = if opts.skip_venv {
        StepOutcome::skipped("smoke")
    } else {
        run_smoke_checks(project_path)
    };
    for report in smoke.commands.iter().filter(|c| !c.success) {
        warnings.push(format!("Smoke check failed: {}", report.command));
    }
    steps.push(smoke);

    Ok(InitRun {
        customized_files,
        steps,
        warnings,
    })
}

/// Customize template files with project and author metadata.
///
/// Performs literal replacements in the template manifest and package init
/// file, writing back only files that exist. Returns the paths rewritten.
/// Failure is fatal: every later step depends on correct metadata.
pub fn customize_project(project_path: &Path, opts: &InitOptions) -> Result<Vec<String>> {
    let github_slug = format!(
        "{}/{}",
        opts.author_name.to_lowercase().replace(' ', ""),
        opts.project_name
    );

    let manifest_pairs = vec![
        (
            "name = \"python-project-template\"".to_string(),
            format!("name = \"{}\"", opts.project_name),
        ),
        (
            "name = \"Your Name\"".to_string(),
            format!("name = \"{}\"", opts.author_name),
        ),
        (
            "email = \"your.email@example.com\"".to_string(),
            format!("email = \"{}\"", opts.author_email),
        ),
        (
            "yourusername/python-project-template".to_string(),
            github_slug,
        ),
    ];

    let init_pairs = vec![(
        "\"Python project template package.\"".to_string(),
        format!("\"{} package.\"", opts.project_name),
    )];

    let targets: [(PathBuf, Vec<(String, String)>); 2] = [
        (project_path.join("pyproject.toml"), manifest_pairs),
        (project_path.join("src").join("__init__.py"), init_pairs),
    ];

    let mut customized = Vec::new();
    for (path, pairs) in targets {
        if !path.exists() {
            continue;
        }
        let content = io::read_file(&path, "customize template")?;
        if !template::any_present(&content, &pairs) {
            // Already customized (or not a template file): leave it alone.
            continue;
        }
        let replaced = template::replace_pairs(&content, &pairs);
        io::write_file(&path, &replaced, "customize template")?;
        customized.push(path.to_string_lossy().to_string());
    }

    log_status!("init", "Customized {} file(s)", customized.len());
    Ok(customized)
}

/// Initialize a git repository with an initial commit. Non-fatal.
pub fn init_git_repo(project_path: &Path) -> StepOutcome {
    log_status!("init", "Initializing git repository");
    let commands = vec![
        vec!["git", "init"],
        vec!["git", "add", "."],
        vec![
            "git",
            "commit",
            "-m",
            "Initial commit: Python project template setup",
        ],
    ];
    run_sequence(project_path, "git", to_owned(commands), true)
}

/// Create the virtualenv and install the project in editable mode with dev
/// extras. Fatal: hooks and smoke checks need the environment.
pub fn setup_virtual_environment(project_path: &Path) -> StepOutcome {
    log_status!("init", "Setting up virtual environment");
    let pip = venv_tool(project_path, "pip");
    let commands = vec![
        vec![
            python_program().to_string(),
            "-m".to_string(),
            "venv".to_string(),
            VENV_DIR.to_string(),
        ],
        vec![
            pip,
            "install".to_string(),
            "-e".to_string(),
            ".[dev,docs,test]".to_string(),
        ],
    ];
    run_sequence(project_path, "venv", commands, true)
}

/// Install and exercise the pre-commit hook suite. Non-fatal.
pub fn setup_pre_commit(project_path: &Path) -> StepOutcome {
    log_status!("init", "Setting up pre-commit hooks");
    let pre_commit = venv_tool(project_path, "pre-commit");
    let commands = vec![
        vec![pre_commit.clone(), "install".to_string()],
        vec![pre_commit, "run".to_string(), "--all-files".to_string()],
    ];
    run_sequence(project_path, "pre-commit", commands, true)
}

/// Smoke-verify the environment: format check, type check, test-runner
/// probe. Every check is attempted; failures are warnings only.
pub fn run_smoke_checks(project_path: &Path) -> StepOutcome {
    log_status!("init", "Running smoke checks");
    let commands = vec![
        vec![
            venv_tool(project_path, "black"),
            "--check".to_string(),
            ".".to_string(),
        ],
        vec![venv_tool(project_path, "mypy"), "src".to_string()],
        vec![
            venv_tool(project_path, "pytest"),
            "--version".to_string(),
        ],
    ];
    run_sequence(project_path, "smoke", commands, false)
}

/// Path to a tool inside the project virtualenv.
fn venv_tool(project_path: &Path, tool: &str) -> String {
    #[cfg(windows)]
    let bin_dir = "Scripts";
    #[cfg(not(windows))]
    let bin_dir = "bin";

    project_path
        .join(VENV_DIR)
        .join(bin_dir)
        .join(tool)
        .to_string_lossy()
        .to_string()
}

fn python_program() -> &'static str {
    #[cfg(windows)]
    {
        "python"
    }
    #[cfg(not(windows))]
    {
        "python3"
    }
}

fn to_owned(commands: Vec<Vec<&str>>) -> Vec<Vec<String>> {
    commands
        .into_iter()
        .map(|c| c.into_iter().map(str::to_string).collect())
        .collect()
}

/// Run commands in order, capturing each one. With `halt_on_failure`, the
/// first failure ends the step; otherwise every command is attempted.
fn run_sequence(
    dir: &Path,
    step: &str,
    commands: Vec<Vec<String>>,
    halt_on_failure: bool,
) -> StepOutcome {
    let mut reports = Vec::new();
    let mut all_succeeded = true;

    for parts in commands {
        let Some((program, args)) = parts.split_first() else {
            continue;
        };
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = command::run_in(dir, program, &arg_refs);
        let display = parts.join(" ");

        if output.success {
            log_status!("init", "ok: {}", display);
        } else {
            log_status!(
                "init",
                "failed: {} ({})",
                display,
                command::error_text(&output)
            );
        }

        let success = output.success;
        reports.push(to_report(display, output));

        if !success {
            all_succeeded = false;
            if halt_on_failure {
                break;
            }
        }
    }

    StepOutcome {
        step: step.to_string(),
        success: all_succeeded,
        skipped: false,
        commands: reports,
    }
}

fn to_report(display: String, output: CommandOutput) -> CommandReport {
    CommandReport {
        command: display,
        success: output.success,
        exit_code: output.exit_code,
        stdout: output.stdout,
        stderr: output.stderr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> InitOptions {
        InitOptions {
            project_name: "acme-tool".to_string(),
            author_name: "Ada Lovelace".to_string(),
            author_email: "ada@acme.dev".to_string(),
            skip_git: false,
            skip_venv: false,
            skip_pre_commit: false,
        }
    }

    const MANIFEST: &str = concat!(
        "[project]\n",
        "name = \"python-project-template\"\n",
        "authors = [{ name = \"Your Name\", email = \"your.email@example.com\" }]\n",
        "urls = { repository = \"https://github.com/yourusername/python-project-template\" }\n",
    );

    #[test]
    fn customize_rewrites_manifest_and_package_init() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), MANIFEST).unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(
            dir.path().join("src").join("__init__.py"),
            "\"Python project template package.\"\n",
        )
        .unwrap();

        let customized = customize_project(dir.path(), &options()).unwrap();
        assert_eq!(customized.len(), 2);

        let manifest = std::fs::read_to_string(dir.path().join("pyproject.toml")).unwrap();
        assert!(manifest.contains("name = \"acme-tool\""));
        assert!(manifest.contains("name = \"Ada Lovelace\""));
        assert!(manifest.contains("email = \"ada@acme.dev\""));
        assert!(manifest.contains("adalovelace/acme-tool"));
        assert!(!manifest.contains("python-project-template"));

        let init = std::fs::read_to_string(dir.path().join("src").join("__init__.py")).unwrap();
        assert_eq!(init, "\"acme-tool package.\"\n");
    }

    #[test]
    fn customize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), MANIFEST).unwrap();

        let first = customize_project(dir.path(), &options()).unwrap();
        assert_eq!(first.len(), 1);

        let second = customize_project(dir.path(), &options()).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn customize_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let customized = customize_project(dir.path(), &options()).unwrap();
        assert!(customized.is_empty());
    }

    #[test]
    fn run_sequence_halts_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let commands = vec![
            vec!["false".to_string()],
            vec!["echo".to_string(), "never".to_string()],
        ];
        let outcome = run_sequence(dir.path(), "test", commands, true);
        assert!(!outcome.success);
        assert_eq!(outcome.commands.len(), 1);
    }

    #[test]
    fn run_sequence_without_halt_attempts_everything() {
        let dir = tempfile::tempdir().unwrap();
        let commands = vec![
            vec!["false".to_string()],
            vec!["echo".to_string(), "still-runs".to_string()],
        ];
        let outcome = run_sequence(dir.path(), "test", commands, false);
        assert!(!outcome.success);
        assert_eq!(outcome.commands.len(), 2);
        assert!(outcome.commands[1].success);
        assert_eq!(outcome.commands[1].stdout.trim(), "still-runs");
    }

    #[test]
    fn require_gates_only_fatal_failures() {
        let failed = StepOutcome {
            step: "venv".to_string(),
            success: false,
            skipped: false,
            commands: Vec::new(),
        };
        assert!(require(&failed, StepMode::Fatal).is_err());
        assert!(require(&failed, StepMode::NonFatal).is_ok());
        assert!(require(&StepOutcome::skipped("git"), StepMode::Fatal).is_ok());
    }

    #[test]
    fn skip_venv_implies_skipping_pre_commit_and_smoke() {
        let dir = tempfile::tempdir().unwrap();
        let opts = InitOptions {
            skip_git: true,
            skip_venv: true,
            ..options()
        };

        let run = run(dir.path(), &opts).unwrap();
        assert!(run.customized_files.is_empty());
        assert!(run.warnings.is_empty());

        let by_name: Vec<(&str, bool)> = run
            .steps
            .iter()
            .map(|s| (s.step.as_str(), s.skipped))
            .collect();
        assert_eq!(
            by_name,
            vec![
                ("git", true),
                ("venv", true),
                ("pre-commit", true),
                ("smoke", true),
            ]
        );
    }

    #[test]
    fn skip_venv_leaves_git_step_active() {
        let dir = tempfile::tempdir().unwrap();
        let opts = InitOptions {
            skip_venv: true,
            ..options()
        };

        let run = run(dir.path(), &opts).unwrap();

        let git = run.steps.iter().find(|s| s.step == "git").unwrap();
        assert!(!git.skipped);
        assert!(!git.commands.is_empty());

        let venv = run.steps.iter().find(|s| s.step == "venv").unwrap();
        assert!(venv.skipped);
    }

    #[test]
    fn venv_tool_lives_under_the_venv_dir() {
        let path = venv_tool(Path::new("/proj"), "pip");
        assert!(path.starts_with("/proj/.venv"));
        assert!(path.ends_with("pip"));
    }
}
