//! Conan recipe lint rules
//!
//! This crate provides lint rules for Conan `conanfile.py` recipes, run over
//! a Python AST produced by `rustpython-parser`.
//! Rules can be used:
//! 1. Standalone, one rule at a time, on individual class definitions
//! 2. Through `LintRunner`, which walks a whole module in a single pass

pub mod rules;
pub mod utils;
pub mod visitor;
mod context;
mod diagnostic;

pub use context::LintContext;
pub use diagnostic::{Diagnostic, DiagnosticSeverity, Fix, Span};
pub use rules::*;
pub use visitor::{lint, lint_with_config, LintResult, LintRunner, RulesConfig};

/// Rule category for recipe rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Rules that detect recipes the index will reject
    Correctness,
    /// Rules that enforce naming and layout conventions
    Style,
}

/// Rule metadata
pub trait RuleMeta {
    const NAME: &'static str;
    const CATEGORY: RuleCategory;
}
