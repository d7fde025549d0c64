//! Diagnostics collected while parsing a dictionary.
//!
//! A rejected line never aborts the parse. Each rejection is recorded here and also logged
//! through the `log` facade so callers that ignore the returned list still see it.

use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The line was rejected and its directive skipped.
    Error,
    /// The line was ignored (unknown directive).
    Warning,
}

/// Which class of problem produced the diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// First token is not a known directive.
    UnknownDirective,
    /// Too few fields or a malformed number.
    Syntax,
    /// Name, code or vendor collision with an earlier definition.
    Duplicate,
    /// VALUE or VENDORATTR naming an undefined attribute or vendor.
    UnresolvedReference,
}

/// A single diagnostic with its location. `line` is zero-based within the file that contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub text: String,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, line='{}', line: {}", self.message, self.text, self.line)
    }
}

/// Accumulates diagnostics in line order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!(target: "raddict", "{}", diagnostic);
        self.messages.push(diagnostic);
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.messages
    }
}
