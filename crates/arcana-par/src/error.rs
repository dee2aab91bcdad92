use arcana_util::Span;
use thiserror::Error;

/// Parse-phase diagnostics, each carrying a stable `P00xx` code plus the
/// token index the parser was looking at.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    ExpectedToken { expected: String, found: String, span: Span, token_index: usize },

    #[error("unexpected token {found}")]
    UnexpectedToken { found: String, span: Span, token_index: usize },

    #[error("main function `subjecto` is required in <DOCTRINA>")]
    MainSubjectoRequired { span: Span, token_index: usize },

    #[error("main function `subjecto` must return `nihil` and take no parameters")]
    MainNihilRequired { span: Span, token_index: usize },

    #[error("unsupported syntax: compound assignment is not allowed")]
    UnsupportedSyntax { span: Span, token_index: usize },

    #[error("invalid move: right-hand side of `<-` must be an identifier")]
    InvalidMove { span: Span, token_index: usize },

    #[error("unknown loop header clause `{label}`")]
    UnknownLoopHeader { label: String, span: Span, token_index: usize },

    #[error("loop header requires a `propositio` clause")]
    LoopPropositioRequired { span: Span, token_index: usize },

    #[error("`nihil` is not a value expression")]
    NihilNotExpr { span: Span, token_index: usize },
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::ExpectedToken { .. } => "P0001",
            ParseError::UnexpectedToken { .. } => "P0002",
            ParseError::MainSubjectoRequired { .. } => "P0010",
            ParseError::MainNihilRequired { .. } => "P0011",
            ParseError::UnsupportedSyntax { .. } => "P0020",
            ParseError::InvalidMove { .. } => "P0021",
            ParseError::UnknownLoopHeader { .. } => "P0030",
            ParseError::LoopPropositioRequired { .. } => "P0031",
            ParseError::NihilNotExpr { .. } => "P0040",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::ExpectedToken { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::MainSubjectoRequired { span, .. }
            | ParseError::MainNihilRequired { span, .. }
            | ParseError::UnsupportedSyntax { span, .. }
            | ParseError::InvalidMove { span, .. }
            | ParseError::UnknownLoopHeader { span, .. }
            | ParseError::LoopPropositioRequired { span, .. }
            | ParseError::NihilNotExpr { span, .. } => *span,
        }
    }

    pub fn token_index(&self) -> usize {
        match self {
            ParseError::ExpectedToken { token_index, .. }
            | ParseError::UnexpectedToken { token_index, .. }
            | ParseError::MainSubjectoRequired { token_index, .. }
            | ParseError::MainNihilRequired { token_index, .. }
            | ParseError::UnsupportedSyntax { token_index, .. }
            | ParseError::InvalidMove { token_index, .. }
            | ParseError::UnknownLoopHeader { token_index, .. }
            | ParseError::LoopPropositioRequired { token_index, .. }
            | ParseError::NihilNotExpr { token_index, .. } => *token_index,
        }
    }
}
