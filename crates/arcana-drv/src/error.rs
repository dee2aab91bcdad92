use arcana_util::Span;
use std::path::PathBuf;
use thiserror::Error;

/// Driver-level errors: either a file couldn't be read, or one of the
/// pipeline phases reported a diagnostic. Grounded on `faxc_drv::CompileError`,
/// folded into one `thiserror` enum so `arcana-drv` has a single error type
/// to render ("the driver renders that envelope").
#[derive(Debug, Error)]
pub enum DrvError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Program(#[from] arcana_par::ProgramError),
    #[error(transparent)]
    Semantic(#[from] arcana_sem::SemError),
}

impl DrvError {
    pub fn code(&self) -> &'static str {
        match self {
            // Reuses the parser's generic "internal" code; a file the
            // driver can't even read never reaches a phase that has its
            // own diagnostic vocabulary.
            DrvError::Io { .. } => "P0099",
            DrvError::Program(e) => e.code(),
            DrvError::Semantic(e) => e.code(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            DrvError::Io { .. } => None,
            DrvError::Program(e) => Some(e.span()),
            DrvError::Semantic(e) => Some(e.span()),
        }
    }
}
