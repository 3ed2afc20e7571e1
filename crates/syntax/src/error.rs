use thiserror::Error;

use crate::ast::Span;

/// Which stage of the external loader reported a problem.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiagKind {
    #[error("syntax error")]
    Syntax,
    #[error("type error")]
    Type,
}

/// Problem reported for a file by the parser or type checker.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at {}..{}: {message}", span.start, span.end)]
pub struct Diag {
    pub kind: DiagKind,
    pub span: Span,
    pub message: String,
}

impl Diag {
    pub fn syntax(span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: DiagKind::Syntax,
            span,
            message: message.into(),
        }
    }

    pub fn type_error(span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: DiagKind::Type,
            span,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_span() {
        let d = Diag::syntax(Span::new(3, 7), "expected ';'");
        assert_eq!(d.to_string(), "syntax error at 3..7: expected ';'");
        let d = Diag::type_error(Span::default(), "undefined: x");
        assert_eq!(d.kind, DiagKind::Type);
    }
}
