//! Rendering lint results for humans and machines

use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use crate::{Diagnostic, LintResult};

/// Diagnostics for one linted file
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub path: String,
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> FileReport<'a> {
    pub fn new(path: &Path, result: &'a LintResult) -> Self {
        Self {
            path: path.display().to_string(),
            diagnostics: &result.diagnostics,
        }
    }
}

/// Render one file's diagnostics, one `path:line:` entry per finding
pub fn render_text(report: &FileReport) -> String {
    let mut out = String::new();
    for diagnostic in report.diagnostics {
        let _ = writeln!(
            out,
            "{}:{}: {} {} [{}] {} ({})",
            report.path,
            diagnostic.line,
            diagnostic.severity.as_str(),
            diagnostic.code,
            diagnostic.kind,
            diagnostic.message,
            diagnostic.rule
        );
        if let Some(help) = &diagnostic.help {
            let _ = writeln!(out, "    help: {}", help);
        }
    }
    out
}

/// Render all reports as a JSON array
pub fn render_json(reports: &[FileReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

/// One-line summary of a run
pub fn summary(files: usize, errors: usize, warnings: usize, failures: usize) -> String {
    let mut line = format!(
        "{} error{}, {} warning{} in {} file{}",
        errors,
        plural(errors),
        warnings,
        plural(warnings),
        files,
        plural(files)
    );
    if failures > 0 {
        let _ = write!(line, " ({} file{} could not be linted)", failures, plural(failures));
    }
    line
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
