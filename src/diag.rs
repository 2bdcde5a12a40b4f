//! Error taxonomy for the Glossa core.
//!
//! Three kinds of error cross the core's boundary, matching the three
//! phases of a run: scanning, parsing, and execution. None is recovered
//! internally — the first error aborts the run and is handed to the
//! embedder, carrying a source line when one is known so a host editor
//! can highlight it. Messages are the user-facing Greek strings the
//! language's learners see, using the `γραμμή N` phrasing throughout.

use miette::Diagnostic;
use thiserror::Error;

/// An error raised by any phase of the Glossa core.
#[derive(Debug, Error, Diagnostic, PartialEq, Clone)]
pub enum GlossaError {
    /// An unrecognised character or an unterminated string literal.
    #[error("{}", render_runtime(.message, &Some(*.line)))]
    #[diagnostic(code(glossa::scan))]
    Scan { line: u32, message: String },

    /// A malformed program: unexpected token, duplicate declaration,
    /// invalid array dimension, unsupported dimensionality, malformed
    /// parameter list.
    #[error("{}", render_runtime(.message, &Some(*.line)))]
    #[diagnostic(code(glossa::parse))]
    Parse { line: u32, message: String },

    /// A failure raised while executing a well-formed program: unknown
    /// identifier, wrong scalar/array usage, out-of-range index, division
    /// or modulus by zero, arity mismatch, unknown routine, a procedure
    /// returning a value, a function failing to return one, an input
    /// parse failure, a coercion failure, or `ΕΠΙΣΤΡΕΨΕ` outside a
    /// function.
    #[error("{}", render_runtime(.message, .line))]
    #[diagnostic(code(glossa::runtime))]
    Runtime {
        message: String,
        line: Option<u32>,
    },
}

fn render_runtime(message: &str, line: &Option<u32>) -> String {
    match line {
        Some(line) => format!("{message} (γραμμή {line})"),
        None => message.clone(),
    }
}

impl GlossaError {
    pub fn runtime(message: impl Into<String>) -> Self {
        GlossaError::Runtime {
            message: message.into(),
            line: None,
        }
    }

    pub fn runtime_at(message: impl Into<String>, line: u32) -> Self {
        GlossaError::Runtime {
            message: message.into(),
            line: Some(line),
        }
    }

    /// The source line this error is attributed to, if any.
    pub fn line(&self) -> Option<u32> {
        match self {
            GlossaError::Scan { line, .. } | GlossaError::Parse { line, .. } => Some(*line),
            GlossaError::Runtime { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_appends_its_line_like_runtime_does() {
        let err = GlossaError::Scan {
            line: 3,
            message: "Μη κλεισμένο αλφαριθμητικό".into(),
        };
        assert_eq!(err.to_string(), "Μη κλεισμένο αλφαριθμητικό (γραμμή 3)");
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn parse_error_appends_its_line_like_runtime_does() {
        let err = GlossaError::Parse {
            line: 5,
            message: "Αναμενόταν 'ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ'".into(),
        };
        assert_eq!(err.to_string(), "Αναμενόταν 'ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ' (γραμμή 5)");
    }

    #[test]
    fn runtime_error_renders_line_when_known() {
        let err = GlossaError::runtime_at("Διαίρεση με το μηδέν", 7);
        assert_eq!(err.to_string(), "Διαίρεση με το μηδέν (γραμμή 7)");
    }

    #[test]
    fn runtime_error_without_line_renders_bare_message() {
        let err = GlossaError::runtime("Άγνωστη μεταβλητή 'x'");
        assert_eq!(err.to_string(), "Άγνωστη μεταβλητή 'x'");
    }
}
