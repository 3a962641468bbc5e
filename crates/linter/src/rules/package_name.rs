//! conan-package-name
//!
//! Every recipe class deriving from `ConanFile` must declare a lower-case
//! `name` attribute. Test package recipes must not declare one at all.

use rustpython_parser::ast::{Constant, StmtClassDef};
use serde::Deserialize;

use crate::context::LintContext;
use crate::diagnostic::{Diagnostic, Fix};
use crate::utils::{
    class_header_offset, has_single_base, is_test_package_path, literal_assignment,
    render_constant, span_of,
};
use crate::{RuleCategory, RuleMeta};

/// The three messages this rule can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMessage {
    /// `name` is declared but not all lower-case
    BadName,
    /// `name` is not declared in a package recipe
    MissingName,
    /// `name` is declared in a test package recipe
    TestPackageHasName,
}

impl NameMessage {
    pub const ALL: [NameMessage; 3] = [Self::BadName, Self::MissingName, Self::TestPackageHasName];

    pub fn kind(self) -> &'static str {
        match self {
            Self::BadName => "bad-name",
            Self::MissingName => "missing-name",
            Self::TestPackageHasName => "test-package-has-name",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::BadName => "E9004",
            Self::MissingName => "E9005",
            Self::TestPackageHasName => "E9007",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::BadName => "Reference name should be all lowercase",
            Self::MissingName => "Missing name attribute",
            Self::TestPackageHasName => "No 'name' attribute in test_package conanfile",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::BadName => "Use only lower-case on the package name: `name = 'foobar'`.",
            Self::MissingName => {
                "The member attribute `name` must be declared: `name = 'foobar'`."
            }
            Self::TestPackageHasName => "No 'name' attribute in test_package conanfile.",
        }
    }
}

/// conan-package-name rule
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackageName {
    /// The only base class that makes a class a recipe
    pub required_base: String,
    /// The attribute holding the package name
    pub attribute: String,
}

impl Default for PackageName {
    fn default() -> Self {
        Self {
            required_base: "ConanFile".to_string(),
            attribute: "name".to_string(),
        }
    }
}

impl RuleMeta for PackageName {
    const NAME: &'static str = "conan-package-name";
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
}

impl PackageName {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required_base(mut self, base: impl Into<String>) -> Self {
        self.required_base = base.into();
        self
    }

    fn diagnostic(message: NameMessage, ctx: &LintContext, start: u32, end: u32) -> Diagnostic {
        let span = span_of(start, end);
        Diagnostic::error(Self::NAME, message.kind(), span, ctx.line_of(start), message.message())
            .with_code(message.code())
            .with_help(message.help())
    }

    /// Check a class definition, returning at most one diagnostic
    pub fn check(&self, class_def: &StmtClassDef, ctx: &LintContext) -> Option<Diagnostic> {
        if !has_single_base(class_def, &self.required_base) {
            return None;
        }

        let is_test = is_test_package_path(&ctx.path().to_string_lossy());

        // Only the first literal assignment counts
        let first = class_def
            .body
            .iter()
            .find_map(|stmt| literal_assignment(stmt, &self.attribute));

        let Some((assign, constant)) = first else {
            if is_test {
                return None;
            }
            let start = class_header_offset(class_def, ctx.source_text());
            let end = u32::from(class_def.range.end());
            return Some(Self::diagnostic(NameMessage::MissingName, ctx, start, end));
        };

        let start = u32::from(assign.range.start());
        let end = u32::from(assign.range.end());

        if is_test {
            return Some(Self::diagnostic(NameMessage::TestPackageHasName, ctx, start, end));
        }

        let literal_span = span_of(constant.range.start(), constant.range.end());
        let rendered = render_constant(&constant.value, ctx.span_text(literal_span));
        if rendered.to_lowercase() == rendered {
            return None;
        }

        let mut diagnostic = Self::diagnostic(NameMessage::BadName, ctx, start, end);
        if let Constant::Str(value) = &constant.value {
            // The replacement is written unescaped
            if value.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
                return Some(diagnostic);
            }
            let lowered = value.to_lowercase();
            diagnostic = diagnostic.with_fix(
                Fix::new(literal_span, format!("\"{}\"", lowered))
                    .with_message(format!("Rename package to `{}`", lowered)),
            );
        }
        Some(diagnostic)
    }
}
