//! YAML content validation and best-effort auto-fixing.
//!
//! The engine is a pure function of the input text, the file extension, and a
//! [`ValidatorConfig`]: parse, repair once on failure, re-parse, then a
//! line-level heuristic scan plus document-wide secret and Docker-Compose
//! checks. Repair is intentionally lossy (quoting a bare `yes` turns it into
//! a string); an unrepairable document is always returned byte-identical.

use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::utils::io;

/// YAML literal tokens the repair pass considers boolean/null-like.
const YAML_LITERALS: [&str; 7] = ["true", "false", "null", "yes", "no", "on", "off"];

/// Tunable heuristics for a validation call.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Maximum accepted line count before the file is flagged.
    pub max_lines: usize,
    /// Column width used when expanding tabs.
    pub tab_width: usize,
    /// Substring whose presence anywhere in the document suppresses the
    /// hardcoded-secret warnings.
    pub placeholder_marker: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_lines: 500,
            tab_width: 2,
            placeholder_marker: "example".to_string(),
        }
    }
}

/// A single reported problem.
///
/// `blocking` marks issues the auto-fixer could not resolve; the hook maps
/// any blocking issue to exit code 2.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub message: String,
    pub blocking: bool,
}

impl Issue {
    fn advisory(message: String) -> Self {
        Self {
            message,
            blocking: false,
        }
    }

    fn blocking(message: String) -> Self {
        Self {
            message,
            blocking: true,
        }
    }
}

/// Outcome of one validation call: ordered issues plus the (possibly
/// corrected) text.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
    pub content: String,
}

impl ValidationReport {
    fn clean(content: &str) -> Self {
        Self {
            issues: Vec::new(),
            content: content.to_string(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_blocking(&self) -> bool {
        self.issues.iter().any(|i| i.blocking)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.message.as_str()).collect()
    }
}

/// Validate content based on file type.
///
/// Only the YAML family is inspected; every other extension passes through
/// unchanged with no issues.
pub fn validate_path(file_path: &str, content: &str, config: &ValidatorConfig) -> ValidationReport {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("yml") | Some("yaml") => validate_yaml(content, config),
        _ => ValidationReport::clean(content),
    }
}

/// Validate YAML content and automatically fix common issues.
pub fn validate_yaml(content: &str, config: &ValidatorConfig) -> ValidationReport {
    let mut issues: Vec<Issue> = Vec::new();
    let mut fixed = content.to_string();

    if content.lines().count() > config.max_lines {
        issues.push(Issue::advisory(format!(
            "File exceeds {} lines maximum length",
            config.max_lines
        )));
    }

    if let Err(first_err) = serde_yml::from_str::<serde_yml::Value>(content) {
        fixed = repair(content, config.tab_width);

        match serde_yml::from_str::<serde_yml::Value>(&fixed) {
            Ok(_) => issues.push(Issue::advisory(format!(
                "Auto-fixed YAML syntax issues: {}",
                first_err
            ))),
            Err(second_err) => {
                issues.push(Issue::blocking(format!(
                    "YAML syntax error that couldn't be auto-fixed: {}",
                    second_err
                )));
                // Never emit content that is syntactically worse than the input.
                return ValidationReport {
                    issues,
                    content: content.to_string(),
                };
            }
        }
    }

    let mut lines: Vec<String> = fixed.lines().map(|l| l.to_string()).collect();
    let mut line_fix_applied = false;

    for (index, line) in lines.iter_mut().enumerate() {
        let number = index + 1;

        if line.ends_with(' ') || line.ends_with('\t') {
            issues.push(Issue::advisory(format!(
                "Line {}: Remove trailing whitespace",
                number
            )));
            *line = line.trim_end().to_string();
            line_fix_applied = true;
        }

        if line.contains('\t') {
            issues.push(Issue::advisory(format!(
                "Line {}: Use spaces instead of tabs for indentation",
                number
            )));
            *line = expand_tabs(line, config.tab_width);
            line_fix_applied = true;
        }

        // Flag-only: re-indenting a document is too destructive to automate.
        if !line.trim().is_empty() && line.starts_with(' ') {
            let indent = line.len() - line.trim_start().len();
            if indent % 2 != 0 {
                issues.push(Issue::advisory(format!(
                    "Line {}: Use consistent 2-space indentation",
                    number
                )));
            }
        }
    }

    if line_fix_applied {
        fixed = lines.join("\n");
    }

    // Secret and Compose gates read the original input, pre-fix.
    let lowered = content.to_lowercase();
    if !lowered.contains(&config.placeholder_marker.to_lowercase()) {
        if lowered.contains("password:") {
            issues.push(Issue::advisory(
                "Avoid hardcoding passwords in YAML files".to_string(),
            ));
        }
        if lowered.contains("api_key:") {
            issues.push(Issue::advisory(
                "Avoid hardcoding API keys in YAML files".to_string(),
            ));
        }
    }

    if content.contains("version:") && content.contains("services:") {
        if let Ok(re) = Regex::new(r#"version:\s*["']?3\.\d+["']?"#) {
            if !re.is_match(content) {
                issues.push(Issue::advisory(
                    "Consider using Docker Compose version 3.x format".to_string(),
                ));
            }
        }
    }

    ValidationReport {
        issues,
        content: fixed,
    }
}

/// One-shot textual repair applied when the initial parse fails.
///
/// Per line: strip trailing whitespace, expand tabs, and quote bare
/// `key: value` values that would confuse the parser.
fn repair(content: &str, tab_width: usize) -> String {
    let mut fixed_lines: Vec<String> = Vec::new();

    for raw in content.lines() {
        let mut line = raw.trim_end().to_string();
        line = expand_tabs(&line, tab_width);

        if line.contains(':') && !line.trim_start().starts_with('#') {
            if let Some((key, rest)) = line.split_once(':') {
                let value = rest.trim();
                if needs_quoting(value) {
                    line = format!("{}: \"{}\"", key, value);
                }
            }
        }

        fixed_lines.push(line);
    }

    fixed_lines.join("\n")
}

fn needs_quoting(value: &str) -> bool {
    if value.is_empty()
        || value.starts_with(['\'', '"', '[', '{', '|', '>'])
        || is_bare_number(value)
    {
        return false;
    }

    if value.contains(' ') || YAML_LITERALS.contains(&value) {
        // Canonical lowercase literals are left for the parser to handle.
        return !YAML_LITERALS.contains(&value.to_lowercase().as_str());
    }

    false
}

/// Digits only once `.` and `-` are stripped (version-ish and negative
/// numbers stay unquoted).
fn is_bare_number(value: &str) -> bool {
    let stripped: String = value.chars().filter(|c| *c != '.' && *c != '-').collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit())
}

/// Column-aware tab expansion.
fn expand_tabs(line: &str, tab_width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0usize;

    for ch in line.chars() {
        if ch == '\t' {
            let width = tab_width.max(1);
            let spaces = width - (column % width);
            out.extend(std::iter::repeat(' ').take(spaces));
            column += spaces;
        } else {
            out.push(ch);
            column += 1;
        }
    }

    out
}

/// Write the fixed content back to the file if changes were made.
///
/// The hook protocol never calls this (it communicates purely through
/// stdio); it exists for direct-write integrations.
pub fn apply_fix(file_path: &Path, original: &str, fixed: &str) -> Result<bool> {
    if original == fixed {
        return Ok(false);
    }
    io::write_file(file_path, fixed, "write fixed content")?;
    Ok(true)
}
