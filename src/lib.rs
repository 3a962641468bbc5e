//! Conan recipe linter
//!
//! Parses `conanfile.py` recipes with `rustpython-parser` and runs the
//! `conan-linter` rules over them.
//!
//! ## Usage
//!
//! ```rust
//! use std::path::Path;
//! use conan_lint::{lint_source, RulesConfig};
//!
//! let source = "class FooConan(ConanFile):\n    name = \"FooBar\"\n";
//! let path = Path::new("recipes/foo/all/conanfile.py");
//! let result = lint_source(path, source, &RulesConfig::default()).unwrap();
//! assert_eq!(result.diagnostics[0].kind, "bad-name");
//! ```

pub mod discover;
pub mod report;
mod error;

use std::path::Path;

use rustpython_parser::{ast, Parse};
use tracing::debug;

pub use conan_linter::{Diagnostic, DiagnosticSeverity, Fix, LintResult, RulesConfig};
pub use discover::collect_recipe_files;
pub use error::LintError;

/// Lint already-loaded source text.
///
/// Relative paths are resolved against the current directory first, so a
/// recipe linted from inside its `test_package` still counts as a test
/// recipe.
pub fn lint_source(path: &Path, source: &str, config: &RulesConfig) -> Result<LintResult, LintError> {
    let suite = ast::Suite::parse(source, &path.to_string_lossy()).map_err(|err| {
        let offset = u32::from(err.offset) as usize;
        let line = source.get(..offset).unwrap_or(source).matches('\n').count() + 1;
        LintError::Parse {
            path: path.to_path_buf(),
            line,
            message: err.error.to_string(),
        }
    })?;
    let resolved = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    debug!(path = %resolved.display(), statements = suite.len(), "parsed recipe");
    Ok(conan_linter::lint_with_config(&resolved, source, &suite, config.clone()))
}

/// Read and lint a single file
pub fn lint_path(path: &Path, config: &RulesConfig) -> Result<LintResult, LintError> {
    let source = read_source(path)?;
    lint_source(path, &source, config)
}

/// Load a JSON rules configuration file
pub fn load_config(path: &Path) -> Result<RulesConfig, LintError> {
    let text = read_source(path)?;
    RulesConfig::from_json_str(&text).map_err(|err| LintError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Apply every fix attached to `diagnostics`, skipping fixes that overlap an
/// already applied one. Returns `None` when nothing changed.
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> Option<String> {
    let mut fixes: Vec<&Fix> = diagnostics.iter().flat_map(|d| d.fixes.iter()).collect();
    if fixes.is_empty() {
        return None;
    }
    // Apply back to front so earlier offsets stay valid
    fixes.sort_by(|a, b| b.start.cmp(&a.start));

    let mut fixed = source.to_string();
    let mut limit = u32::MAX;
    for fix in fixes {
        if fix.end > limit {
            continue;
        }
        if let Some(next) = fix.apply(&fixed) {
            fixed = next;
            limit = fix.start;
        }
    }
    (fixed != source).then_some(fixed)
}

/// Lint a file and rewrite it with all available fixes applied.
///
/// Returns the diagnostics that remain after fixing.
pub fn fix_path(path: &Path, config: &RulesConfig) -> Result<LintResult, LintError> {
    let source = read_source(path)?;
    let result = lint_source(path, &source, config)?;
    let Some(fixed) = apply_fixes(&source, &result.diagnostics) else {
        return Ok(result);
    };
    std::fs::write(path, &fixed).map_err(|source| LintError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "applied fixes");
    lint_source(path, &fixed, config)
}

fn read_source(path: &Path) -> Result<String, LintError> {
    std::fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })
}
