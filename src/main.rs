use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{hook, init};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "groundwork")]
#[command(version = VERSION)]
#[command(about = "Project-template utility kit: pre-write YAML validation and project bootstrap")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pending file write from a tool-invocation record on stdin
    Hook(hook::HookArgs),
    /// Initialize a project template checkout in the current directory
    Init(init::InitArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        // Raw protocol mode: stdout belongs to the corrected record.
        Commands::Hook(args) => hook::run(args),
        Commands::Init(args) => output::print_result(init::run_json(args)),
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
