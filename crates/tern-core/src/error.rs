//! Error types and result aliases for the Tern compiler.

use crate::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main error type for the Tern compiler.
///
/// Checking stops at the first violation: every error propagates out of the
/// semantic pass immediately, and the driver renders it and exits.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("Semantic error: {0}")]
    Semantic(String),

    #[error("{0}")]
    #[diagnostic(code(tern::semantic))]
    SemanticWithSpan(String, #[label("here")] Span),

    #[error("{0}")]
    #[diagnostic(code(tern::eval))]
    Eval(String, #[label("not a compile-time constant")] Span),
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start.offset..span.end.offset)
    }
}

/// Result type alias using the Tern Error type.
pub type Result<T> = std::result::Result<T, Error>;
