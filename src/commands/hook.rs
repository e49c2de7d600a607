//! Pre-write validation hook.
//!
//! Reads a tool-invocation record from stdin, validates YAML write payloads,
//! and communicates purely through stdio: the corrected record goes to
//! stdout (only when content changed), the issue list to stderr, and the
//! allow/block decision rides on the exit code.

use std::io::Read;

use clap::Args;

use groundwork::invocation::ToolInvocation;
use groundwork::validator::{self, ValidatorConfig};

#[derive(Args)]
pub struct HookArgs {
    /// Override the maximum accepted line count
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Override the tab expansion width
    #[arg(long)]
    pub tab_width: Option<usize>,

    /// Override the marker that suppresses hardcoded-secret warnings
    #[arg(long)]
    pub placeholder_marker: Option<String>,
}

impl HookArgs {
    fn config(&self) -> ValidatorConfig {
        let mut config = ValidatorConfig::default();
        if let Some(max_lines) = self.max_lines {
            config.max_lines = max_lines;
        }
        if let Some(tab_width) = self.tab_width {
            config.tab_width = tab_width;
        }
        if let Some(marker) = &self.placeholder_marker {
            config.placeholder_marker = marker.clone();
        }
        config
    }
}

/// Exit codes: 0 = allowed (clean or auto-fixed), 2 = blocked (an issue
/// could not be auto-fixed), 1 = internal error (malformed input).
pub fn run(args: HookArgs) -> i32 {
    match run_protocol(&args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("YAML validator error: {}", e);
            1
        }
    }
}

fn run_protocol(args: &HookArgs) -> groundwork::Result<i32> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let mut record = ToolInvocation::from_json(&input)?;
    let Some(kind) = record.payload_kind() else {
        // Not a write-kind operation: nothing to inspect.
        return Ok(0);
    };

    let file_path = record.file_path().to_string();
    let original = record.content(kind).to_string();
    let report = validator::validate_path(&file_path, &original, &args.config());

    if report.content != original {
        // The caller picks up the fix from stdout; the file itself is
        // never touched here.
        record.set_content(kind, &report.content);
        println!("{}", record.to_json()?);
    }

    if !report.is_clean() {
        eprintln!("YAML validation issues (some may be auto-fixed):");
        for issue in &report.issues {
            eprintln!("- {}", issue.message);
        }
    }

    Ok(if report.has_blocking() { 2 } else { 0 })
}
