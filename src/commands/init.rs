//! Project initializer: sequential, best-effort setup of a freshly cloned
//! template checkout in the current working directory.

use clap::Args;
use serde::Serialize;

use groundwork::log_status;
use groundwork::scaffold::{self, InitOptions, StepOutcome};

use super::CmdResult;

#[derive(Args)]
pub struct InitArgs {
    /// Name of the project
    #[arg(long)]
    pub project_name: String,

    /// Author name
    #[arg(long)]
    pub author_name: String,

    /// Author email
    #[arg(long)]
    pub author_email: String,

    /// Skip git initialization
    #[arg(long)]
    pub skip_git: bool,

    /// Skip virtual environment setup
    #[arg(long)]
    pub skip_venv: bool,

    /// Skip pre-commit setup
    #[arg(long)]
    pub skip_pre_commit: bool,
}

#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub command: &'static str,
    pub project_name: String,
    pub project_path: String,
    pub customized_files: Vec<String>,
    pub steps: Vec<StepOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub fn run_json(args: InitArgs) -> CmdResult<InitOutput> {
    let project_path = std::env::current_dir()?;
    let opts = InitOptions {
        project_name: args.project_name,
        author_name: args.author_name,
        author_email: args.author_email,
        skip_git: args.skip_git,
        skip_venv: args.skip_venv,
        skip_pre_commit: args.skip_pre_commit,
    };

    log_status!(
        "init",
        "Initializing project '{}' in {}",
        opts.project_name,
        project_path.display()
    );

    let run = scaffold::run(&project_path, &opts)?;

    log_status!("init", "Project initialization complete");

    Ok((
        InitOutput {
            command: "init",
            project_name: opts.project_name,
            project_path: project_path.to_string_lossy().to_string(),
            customized_files: run.customized_files,
            steps: run.steps,
            warnings: run.warnings,
        },
        0,
    ))
}
