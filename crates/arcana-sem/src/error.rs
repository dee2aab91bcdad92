use arcana_util::Span;
use thiserror::Error;

/// Semantic diagnostics, carrying the stable `E01xx`/`E02xx` code assigned
/// to each check.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SemError {
    #[error("`effigium` used outside any loop")]
    BreakOutsideLoop { span: Span },

    #[error("`proximum` used outside any loop")]
    ContinueOutsideLoop { span: Span },

    #[error("loop nesting depth exceeds 3")]
    LoopNestTooDeep { span: Span },

    #[error("loop step must be strictly positive")]
    LoopStepNotPositive { span: Span },

    #[error("loop quota must be a positive integer")]
    LoopQuotaInvalid { span: Span },

    #[error("`nihil` is not a value expression")]
    NihilNotExpr { span: Span },

    #[error("expected {expected} argument(s), found {found}")]
    ArgCountMismatch { expected: String, found: usize, span: Span },

    #[error("type mismatch: expected {expected:?}, found {found:?}")]
    TypeMismatch { expected: crate::Type, found: crate::Type, span: Span },

    #[error("use of undeclared name")]
    UndeclaredName { span: Span },
}

impl SemError {
    pub fn code(&self) -> &'static str {
        match self {
            SemError::BreakOutsideLoop { .. } => "E0101",
            SemError::ContinueOutsideLoop { .. } => "E0102",
            SemError::LoopNestTooDeep { .. } => "E0103",
            SemError::LoopStepNotPositive { .. } => "E0110",
            SemError::LoopQuotaInvalid { .. } => "E0111",
            SemError::NihilNotExpr { .. } => "E0202",
            SemError::ArgCountMismatch { .. } => "E0203",
            SemError::TypeMismatch { .. } => "E0204",
            // Undeclared-name use is not itself separately enumerated; it
            // shares E0204's envelope since both are "the expression's
            // meaning disagrees with its declared context."
            SemError::UndeclaredName { .. } => "E0204",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SemError::BreakOutsideLoop { span }
            | SemError::ContinueOutsideLoop { span }
            | SemError::LoopNestTooDeep { span }
            | SemError::LoopStepNotPositive { span }
            | SemError::LoopQuotaInvalid { span }
            | SemError::NihilNotExpr { span }
            | SemError::ArgCountMismatch { span, .. }
            | SemError::TypeMismatch { span, .. }
            | SemError::UndeclaredName { span } => *span,
        }
    }
}
