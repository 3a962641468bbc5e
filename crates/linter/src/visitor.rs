//! Single-pass runner for all enabled lint rules
//!
//! `LintRunner` walks a parsed module once, descending into every compound
//! statement, and hands each class definition to the enabled rules in
//! document order.

use std::path::Path;

use rustc_hash::FxHashMap;
use rustpython_parser::ast::{self, ExceptHandler, Stmt};
use serde::Deserialize;

use crate::context::LintContext;
use crate::diagnostic::{Diagnostic, DiagnosticSeverity};
use crate::rules::PackageName;
use crate::RuleMeta;

/// Configuration for which rules are enabled
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub package_name: Option<PackageName>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            package_name: Some(PackageName::new()),
        }
    }
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none() -> Self {
        Self { package_name: None }
    }

    pub fn with_package_name(mut self, rule: PackageName) -> Self {
        self.package_name = Some(rule);
        self
    }

    /// Parse a JSON rules configuration. Missing rules keep their defaults;
    /// a rule set to `null` is disabled.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Walks a module and runs all enabled rules
pub struct LintRunner<'a> {
    ctx: LintContext<'a>,
    config: RulesConfig,
}

impl<'a> LintRunner<'a> {
    pub fn new(ctx: LintContext<'a>, config: RulesConfig) -> Self {
        Self { ctx, config }
    }

    /// Run all enabled rules on the given module body
    pub fn run(mut self, suite: &[Stmt]) -> LintResult {
        self.walk_body(suite);
        LintResult {
            diagnostics: self.ctx.into_diagnostics(),
        }
    }

    fn walk_body(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.walk_stmt(stmt);
        }
    }

    fn walk_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::ClassDef(class_def) => {
                self.check_class_def(class_def);
                self.walk_body(&class_def.body);
            }
            Stmt::FunctionDef(ast::StmtFunctionDef { body, .. })
            | Stmt::AsyncFunctionDef(ast::StmtAsyncFunctionDef { body, .. })
            | Stmt::With(ast::StmtWith { body, .. })
            | Stmt::AsyncWith(ast::StmtAsyncWith { body, .. }) => self.walk_body(body),
            Stmt::For(ast::StmtFor { body, orelse, .. })
            | Stmt::AsyncFor(ast::StmtAsyncFor { body, orelse, .. })
            | Stmt::While(ast::StmtWhile { body, orelse, .. })
            | Stmt::If(ast::StmtIf { body, orelse, .. }) => {
                self.walk_body(body);
                self.walk_body(orelse);
            }
            Stmt::Try(ast::StmtTry {
                body,
                handlers,
                orelse,
                finalbody,
                ..
            })
            | Stmt::TryStar(ast::StmtTryStar {
                body,
                handlers,
                orelse,
                finalbody,
                ..
            }) => {
                self.walk_body(body);
                for ExceptHandler::ExceptHandler(handler) in handlers {
                    self.walk_body(&handler.body);
                }
                self.walk_body(orelse);
                self.walk_body(finalbody);
            }
            Stmt::Match(ast::StmtMatch { cases, .. }) => {
                for case in cases {
                    self.walk_body(&case.body);
                }
            }
            _ => {}
        }
    }

    fn check_class_def(&mut self, class_def: &ast::StmtClassDef) {
        if let Some(rule) = &self.config.package_name {
            if let Some(diagnostic) = rule.check(class_def, &self.ctx) {
                tracing::debug!(
                    rule = PackageName::NAME,
                    kind = %diagnostic.kind,
                    line = diagnostic.line,
                    class_name = class_def.name.as_str(),
                    "rule reported"
                );
                self.ctx.report(diagnostic);
            }
        }
    }
}

/// Result of running the linter
#[derive(Debug, Default)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d.severity, DiagnosticSeverity::Error))
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Warning))
            .count()
    }

    /// Number of diagnostics per message kind
    pub fn counts_by_kind(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for diagnostic in &self.diagnostics {
            *counts.entry(diagnostic.kind.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Convenience function to lint a module with default configuration
pub fn lint(path: &Path, source_text: &str, suite: &[Stmt]) -> LintResult {
    lint_with_config(path, source_text, suite, RulesConfig::default())
}

/// Convenience function to lint a module with custom configuration
pub fn lint_with_config(
    path: &Path,
    source_text: &str,
    suite: &[Stmt],
    config: RulesConfig,
) -> LintResult {
    let ctx = LintContext::new(source_text, path);
    LintRunner::new(ctx, config).run(suite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustpython_parser::Parse;

    const RECIPE: &str = "recipes/foo/all/conanfile.py";

    fn parse_and_lint(path: &str, source: &str) -> LintResult {
        let suite = ast::Suite::parse(source, path).expect("should parse");
        lint(Path::new(path), source, &suite)
    }

    fn parse_and_lint_with_config(path: &str, source: &str, config: RulesConfig) -> LintResult {
        let suite = ast::Suite::parse(source, path).expect("should parse");
        lint_with_config(Path::new(path), source, &suite, config)
    }

    #[test]
    fn test_lint_clean_recipe() {
        let result = parse_and_lint(RECIPE, "class FooConan(ConanFile):\n    name = \"foo\"\n");
        assert!(result.is_clean());
    }

    #[test]
    fn test_lint_bad_name() {
        let result = parse_and_lint(RECIPE, "class FooConan(ConanFile):\n    name = \"FooBar\"\n");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, "bad-name");
        assert_eq!(result.diagnostics[0].line, 2);
    }

    #[test]
    fn test_lint_nested_classes() {
        let source = "\
if True:
    class A(ConanFile):
        pass
def make():
    class B(ConanFile):
        name = 'Bee'
    return B
";
        let result = parse_and_lint(RECIPE, source);
        let kinds: Vec<_> = result.diagnostics.iter().map(|d| d.kind.as_str()).collect();
        assert_eq!(kinds, ["missing-name", "bad-name"]);
        assert_eq!(result.diagnostics[0].line, 2);
        assert_eq!(result.diagnostics[1].line, 6);
    }

    #[test]
    fn test_lint_inside_try_and_match() {
        let source = "\
try:
    class A(ConanFile):
        pass
except ImportError:
    class B(ConanFile):
        pass
match x:
    case 1:
        class C(ConanFile):
            pass
";
        let result = parse_and_lint(RECIPE, source);
        let lines: Vec<_> = result.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, [2, 5, 9]);
    }

    #[test]
    fn test_lint_with_disabled_rules() {
        let result =
            parse_and_lint_with_config(RECIPE, "class A(ConanFile):\n    pass\n", RulesConfig::none());
        assert!(result.is_clean());
    }

    #[test]
    fn test_lint_with_custom_base() {
        let config = RulesConfig::none()
            .with_package_name(PackageName::new().with_required_base("conan.ConanFile"));
        let result =
            parse_and_lint_with_config(RECIPE, "class A(conan.ConanFile):\n    pass\n", config);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, "missing-name");
    }

    #[test]
    fn test_config_from_json() {
        let config = RulesConfig::from_json_str(r#"{"package_name": null}"#).unwrap();
        assert!(config.package_name.is_none());

        let config = RulesConfig::from_json_str("{}").unwrap();
        assert_eq!(config.package_name.unwrap().required_base, "ConanFile");

        let config =
            RulesConfig::from_json_str(r#"{"package_name": {"attribute": "pkg"}}"#).unwrap();
        let rule = config.package_name.unwrap();
        assert_eq!(rule.attribute, "pkg");
        assert_eq!(rule.required_base, "ConanFile");

        assert!(RulesConfig::from_json_str(r#"{"unknown": true}"#).is_err());
    }

    #[test]
    fn test_result_counts() {
        let source = "\
class A(ConanFile):
    name = 'A'
class B(ConanFile):
    pass
class C(ConanFile):
    name = 'Cee'
";
        let result = parse_and_lint(RECIPE, source);
        assert!(result.has_errors());
        assert_eq!(result.error_count(), 3);
        assert_eq!(result.warning_count(), 0);
        let counts = result.counts_by_kind();
        assert_eq!(counts.get("bad-name"), Some(&2));
        assert_eq!(counts.get("missing-name"), Some(&1));
    }
}
