use arcana_util::Span;
use thiserror::Error;

/// Lexical errors, each carrying a stable `P00xx` code and the offending
/// byte offset.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unterminated f-string literal")]
    UnterminatedFString { span: Span },

    #[error("unrecognized character '{ch}'")]
    UnrecognizedChar { ch: char, span: Span },

    #[error("malformed numeric literal")]
    MalformedNumber { span: Span },

    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },
}

impl LexError {
    /// There are no lexer-specific `P00xx` codes; lexical failures share
    /// the parser's two generic codes — `P0001` when the lexer was
    /// looking for a specific closing character (quote, comment end, digit)
    /// and hit EOF or a bad one, `P0002` when an outright unrecognized
    /// character appears.
    pub fn code(&self) -> &'static str {
        match self {
            LexError::UnrecognizedChar { .. } => "P0002",
            LexError::UnterminatedString { .. }
            | LexError::UnterminatedFString { .. }
            | LexError::MalformedNumber { .. }
            | LexError::UnterminatedComment { .. } => "P0001",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::UnterminatedFString { span }
            | LexError::UnrecognizedChar { span, .. }
            | LexError::MalformedNumber { span }
            | LexError::UnterminatedComment { span } => *span,
        }
    }
}
