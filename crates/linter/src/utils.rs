//! Utility functions for recipe lint rules

use rustpython_parser::ast::{self, Constant, Expr, Ranged, Stmt};

use crate::Span;

/// Directories whose recipes are test consumers rather than packages
pub const TEST_PACKAGE_DIRS: &[&str] = &["test_package", "test_v1_package"];

/// Check if a path names a Python file directly inside a test package directory.
///
/// Equivalent to matching `test_package/*.py` or `test_v1_package/*.py` against
/// the tail of the path. Both `/` and `\` separate components; `.` components
/// are ignored. Relative paths only match when the directory is spelled out,
/// so callers resolve them first.
pub fn is_test_package_path(path: &str) -> bool {
    let mut components = path
        .rsplit(['/', '\\'])
        .filter(|c| !c.is_empty() && *c != ".");
    let Some(file_name) = components.next() else {
        return false;
    };
    let Some(parent) = components.next() else {
        return false;
    };
    file_name.ends_with(".py") && TEST_PACKAGE_DIRS.contains(&parent)
}

/// Build a `Span` from the start and end offsets of a parser range
pub fn span_of(start: impl Into<u32>, end: impl Into<u32>) -> Span {
    Span::new(start.into(), end.into())
}

/// Render a base-class expression the way it appears in a class header.
///
/// Returns `None` for anything other than a plain or dotted name.
pub fn base_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Name(name) => Some(name.id.as_str().to_string()),
        Expr::Attribute(attr) => {
            base_name(&attr.value).map(|prefix| format!("{}.{}", prefix, attr.attr.as_str()))
        }
        _ => None,
    }
}

/// Check if a class derives from exactly one base, named `required`
pub fn has_single_base(class_def: &ast::StmtClassDef, required: &str) -> bool {
    match class_def.bases.as_slice() {
        [base] => base_name(base).as_deref() == Some(required),
        _ => false,
    }
}

/// Offset of the `class` keyword that starts the class header.
///
/// The class range may include its decorators, so the search starts after
/// the last decorator expression ends.
pub fn class_header_offset(class_def: &ast::StmtClassDef, source_text: &str) -> u32 {
    let start = u32::from(class_def.range.start());
    let end = u32::from(class_def.range.end());
    let search_from = class_def
        .decorator_list
        .last()
        .map(|decorator| u32::from(decorator.range().end()))
        .map_or(start, |decorator_end| decorator_end.max(start))
        .min(end);
    let tail = source_text
        .get(search_from as usize..end as usize)
        .unwrap_or_default();
    search_from + class_keyword_offset(tail)
}

/// Offset of the first line-leading `class` keyword in `text`
fn class_keyword_offset(text: &str) -> u32 {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let rest = &line[indent..];
        if rest.starts_with("class") && !rest[5..].starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            return (offset + indent) as u32;
        }
        offset += line.len();
    }
    0
}

/// Find a plain `<target> = <literal>` assignment.
///
/// Only single-target assignments whose target is a bare name and whose value
/// is a constant qualify. Chained and annotated assignments do not.
pub fn literal_assignment<'s>(
    stmt: &'s Stmt,
    target: &str,
) -> Option<(&'s ast::StmtAssign, &'s ast::ExprConstant)> {
    let Stmt::Assign(assign) = stmt else {
        return None;
    };
    let [Expr::Name(name)] = assign.targets.as_slice() else {
        return None;
    };
    if name.id.as_str() != target {
        return None;
    }
    match assign.value.as_ref() {
        Expr::Constant(constant) => Some((assign, constant)),
        _ => None,
    }
}

/// Render a literal constant the way Python's `repr` does.
///
/// Strings render as their value in single quotes and the keyword constants
/// render as their keyword, so `None` keeps its capital. Numbers render in
/// canonical form (`0XFF` is `255`, `1E5` is `100000.0`, `1J` is `1j`) and
/// bytes as `b'...'`. `...` stays `...`. Anything else falls back to
/// `source_text`.
pub fn render_constant(constant: &Constant, source_text: &str) -> String {
    match constant {
        Constant::Str(value) => format!("'{}'", value),
        Constant::Bytes(value) => render_bytes(value),
        Constant::Int(value) => value.to_string(),
        Constant::Float(value) => render_float(*value),
        Constant::Complex { real, imag } => render_complex(*real, *imag),
        Constant::Bool(true) => "True".to_string(),
        Constant::Bool(false) => "False".to_string(),
        Constant::None => "None".to_string(),
        Constant::Ellipsis => "...".to_string(),
        _ => source_text.to_string(),
    }
}

fn render_bytes(value: &[u8]) -> String {
    let quote = if value.contains(&b'\'') && !value.contains(&b'"') { '"' } else { '\'' };
    let mut out = format!("b{}", quote);
    for &byte in value {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\'' if quote == '\'' => out.push_str("\\'"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out.push(quote);
    out
}

/// Python float repr: shortest round-trip digits, decimal notation for
/// magnitudes in `[1e-4, 1e16)`, otherwise `<mantissa>e<sign><2+ digits>`.
fn render_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        let text = value.to_string();
        return if text.contains('.') { text } else { format!("{}.0", text) };
    }
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => format!(
                "{}e{}{:02}",
                mantissa,
                if exponent < 0 { '-' } else { '+' },
                exponent.abs()
            ),
            Err(_) => text.clone(),
        },
        None => text.clone(),
    }
}

/// Complex parts drop a trailing `.0`, as in `repr(1j) == '1j'`
fn render_complex_part(value: f64) -> String {
    let text = render_float(value);
    match text.strip_suffix(".0") {
        Some(integral) => integral.to_string(),
        None => text,
    }
}

fn render_complex(real: f64, imag: f64) -> String {
    if real == 0.0 && real.is_sign_positive() {
        return format!("{}j", render_complex_part(imag));
    }
    let sign = if imag < 0.0 || (imag == 0.0 && imag.is_sign_negative()) { '-' } else { '+' };
    format!(
        "({}{}{}j)",
        render_complex_part(real),
        sign,
        render_complex_part(imag.abs())
    )
}
