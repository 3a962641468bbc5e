//! Diagnostic types for lint results

use serde::Serialize;

/// Byte range into the linted source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl DiagnosticSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A suggested fix for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    /// Start position of the span to replace
    pub start: u32,
    /// End position of the span to replace
    pub end: u32,
    /// The replacement text
    pub replacement: String,
    /// Description of what the fix does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Fix {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            start: span.start,
            end: span.end,
            replacement: replacement.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Apply the fix to `source`, returning the rewritten text
    pub fn apply(&self, source: &str) -> Option<String> {
        let start = self.start as usize;
        let end = self.end as usize;
        if start > end || !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            return None;
        }
        let mut out = String::with_capacity(source.len() + self.replacement.len());
        out.push_str(&source[..start]);
        out.push_str(&self.replacement);
        out.push_str(&source[end..]);
        Some(out)
    }
}

/// A lint diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The rule that produced this diagnostic
    pub rule: String,
    /// Short machine-readable message kind, e.g. `bad-name`
    pub kind: String,
    /// Stable message code, e.g. `E9004`
    pub code: String,
    /// Start position of the span
    pub start: u32,
    /// End position of the span
    pub end: u32,
    /// 1-based line of the reported node
    pub line: usize,
    /// Primary message
    pub message: String,
    /// Optional help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Suggested fixes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<Fix>,
}

impl Diagnostic {
    pub fn new(
        rule: impl Into<String>,
        kind: impl Into<String>,
        span: Span,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            kind: kind.into(),
            code: String::new(),
            start: span.start,
            end: span.end,
            line,
            message: message.into(),
            help: None,
            severity: DiagnosticSeverity::Warning,
            fixes: Vec::new(),
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }

    pub fn error(
        rule: impl Into<String>,
        kind: impl Into<String>,
        span: Span,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::new(rule, kind, span, line, message).with_severity(DiagnosticSeverity::Error)
    }
}
