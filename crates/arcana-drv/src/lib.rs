//! Pipeline orchestration for the Arcana toolchain: lex → parse → validate
//! → emit, plus the three driver modes the `arcana` binary exposes.
//!
//! Grounded on `faxc_drv::Session::compile`'s phase-by-phase structure, cut
//! down to this front end's single-file, single-pass pipeline: no
//! incremental cache, no multi-file `SourceMap`, since the front end runs
//! synchronously and stateless across invocations.

mod error;

pub use error::DrvError;

use std::path::{Path, PathBuf};
use std::process::Command;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Reads a source file, wrapping any I/O failure as a `DrvError` the same
/// `render_diagnostic` path can print.
pub fn read_source(path: &Path) -> Result<String, DrvError> {
    std::fs::read_to_string(path).map_err(|source| DrvError::Io { path: path.to_path_buf(), source })
}

/// The result of a successful compile: the emitted host source text.
#[derive(Debug)]
pub struct CompiledProgram {
    pub host_text: String,
}

/// Runs the full pipeline over `source`, stopping at the first phase that
/// reports a problem ("first error aborts that phase").
pub fn compile(source: &str) -> Result<CompiledProgram, DrvError> {
    let (program, mut symbols) = arcana_par::parse_source(source)?;
    arcana_sem::validate_program(&program, &mut symbols)?;
    let host_text = arcana_emit::emit_program(&program, &symbols);
    Ok(CompiledProgram { host_text })
}

/// Renders a diagnostic as code, message, and position when one is
/// available (driver-level I/O failures carry no span).
pub fn render_diagnostic(err: &DrvError) -> String {
    match err.span() {
        Some(span) => format!("{}: {err} (line {}, column {})", err.code(), span.line, span.column),
        None => format!("{}: {err}", err.code()),
    }
}

/// `exsecutio <file> [--perscribere]`: compile, then either print the
/// transpiled host text (`--perscribere`) or hand it to a `python3` on
/// `PATH`. Never fabricates a host runtime if `python3` is absent; the
/// host interpreter is an external collaborator, not this crate's concern.
pub fn run_exsecutio(source: &str, perscribere: bool) -> i32 {
    let compiled = match compile(source) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", render_diagnostic(&e));
            return EXIT_FAILURE;
        }
    };

    if perscribere {
        println!("=== [arcana perscribere] transpiled python ===");
        println!("{}", compiled.host_text);
        println!("=== [arcana perscribere] end ===");
        return EXIT_SUCCESS;
    }

    match find_python() {
        Some(python) => {
            tracing::debug!(python = %python.display(), "invoking host interpreter");
            match Command::new(&python).arg("-c").arg(&compiled.host_text).status() {
                Ok(status) if status.success() => EXIT_SUCCESS,
                Ok(_) => EXIT_FAILURE,
                Err(e) => {
                    eprintln!("failed to launch host interpreter: {e}");
                    EXIT_FAILURE
                }
            }
        }
        None => {
            println!("emission succeeded; no python3 on PATH, execution skipped");
            EXIT_SUCCESS
        }
    }
}

/// `inspectio <file>`: validate only. Reserved for future lint checks.
pub fn run_inspectio(source: &str) -> i32 {
    match compile(source) {
        Ok(_) => {
            println!("inspectio: validation succeeded (reserved mode, no further action taken)");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("{}", render_diagnostic(&e));
            EXIT_FAILURE
        }
    }
}

/// `aedificatio <file>`: reserved, accepted as a no-op.
pub fn run_aedificatio(_source: &str) -> i32 {
    println!("aedificatio: reserved, accepted as a no-op");
    EXIT_SUCCESS
}

fn find_python() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).map(|dir| dir.join("python3")).find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(doctrina: &str) -> String {
        format!("<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>{doctrina}</DOCTRINA>")
    }

    #[test]
    fn well_formed_program_compiles() {
        let s = src("FCON subjecto: nihil () -> { };");
        let compiled = compile(&s).expect("compile ok");
        assert!(compiled.host_text.contains("def subjecto():"));
    }

    #[test]
    fn missing_main_is_p0010() {
        let s = src("");
        let err = compile(&s).unwrap_err();
        assert_eq!(err.code(), "P0010");
    }

    #[test]
    fn break_outside_loop_reaches_e0101() {
        let s = src("FCON subjecto: nihil () -> { effigium; };");
        let err = compile(&s).unwrap_err();
        assert_eq!(err.code(), "E0101");
    }

    #[test]
    fn perscribere_mode_prints_banners_without_executing() {
        let s = src("FCON subjecto: nihil () -> { };");
        let code = run_exsecutio(&s, true);
        assert_eq!(code, EXIT_SUCCESS);
    }

    #[test]
    fn aedificatio_is_always_a_no_op_success() {
        assert_eq!(run_aedificatio(""), EXIT_SUCCESS);
    }
}
