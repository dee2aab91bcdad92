//! Recursive-descent parser for Arcana, turning a token stream into an AST.

pub mod ast;
mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;

use arcana_lex::lex as lex_source;
use arcana_util::StringTable;

/// Lexes and parses a complete program in one call, for callers (the
/// driver, tests) that don't need to inspect the token stream directly.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse_source(source: &str) -> Result<(ast::Program, StringTable), ProgramError> {
    let (tokens, mut symbols) = lex_source(source).map_err(ProgramError::Lex)?;
    tracing::debug!(tokens = tokens.len(), "tokenized");
    let program = Parser::new(&tokens, &mut symbols)
        .parse_program()
        .map_err(ProgramError::Parse)?;
    tracing::debug!(
        imports = program.imports.len(),
        items = program.defines.len(),
        "parsed"
    );
    Ok((program, symbols))
}

/// Either phase can fail before a validated AST exists; the driver renders
/// both through the same diagnostic envelope.
#[derive(Debug)]
pub enum ProgramError {
    Lex(arcana_lex::LexError),
    Parse(ParseError),
}

impl ProgramError {
    pub fn code(&self) -> &'static str {
        match self {
            ProgramError::Lex(e) => e.code(),
            ProgramError::Parse(e) => e.code(),
        }
    }

    pub fn span(&self) -> arcana_util::Span {
        match self {
            ProgramError::Lex(e) => e.span(),
            ProgramError::Parse(e) => e.span(),
        }
    }
}

impl std::fmt::Display for ProgramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramError::Lex(e) => write!(f, "{e}"),
            ProgramError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ProgramError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn program(intro_and_doctrina: &str) -> Program {
        let src = format!(
            "<FONS></FONS><INTRODUCTIO>{intro_and_doctrina}</INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {{ }};</DOCTRINA>"
        );
        parse_source(&src).unwrap_or_else(|e| panic!("parse failed: {e} ({})", e.code())).0
    }

    #[test]
    fn minimal_program_parses() {
        let p = program("");
        assert!(p.imports.is_empty());
        assert!(p.defines.is_empty());
    }

    #[test]
    fn missing_main_is_p0010() {
        let src = "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA></DOCTRINA>";
        let err = parse_source(src).unwrap_err();
        assert_eq!(err.code(), "P0010");
    }

    #[test]
    fn main_with_wrong_return_type_is_p0011() {
        let src = "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: inte () -> { REDITUS 0; };</DOCTRINA>";
        let err = parse_source(src).unwrap_err();
        assert_eq!(err.code(), "P0011");
    }

    #[test]
    fn additive_binds_looser_than_multiplicative() {
        let p = program("VCON x: inte = 1 + 2 * 3;");
        let Item::Decl(Decl::Var(v)) = &p.defines[0] else { panic!("expected var decl") };
        let Some(Expr::BinOp { op: BinOp::Add, rhs, .. }) = &v.init else {
            panic!("expected top-level Add")
        };
        assert!(matches!(**rhs, Expr::BinOp { op: BinOp::Mul, .. }));
    }

    #[test]
    fn power_is_right_associative() {
        let p = program("VCON x: inte = 2 ** 3 ** 2;");
        let Item::Decl(Decl::Var(v)) = &p.defines[0] else { panic!("expected var decl") };
        let Some(Expr::BinOp { op: BinOp::Pow, rhs, .. }) = &v.init else {
            panic!("expected top-level Pow")
        };
        assert!(matches!(**rhs, Expr::BinOp { op: BinOp::Pow, .. }));
    }

    #[test]
    fn chained_comparison_is_rejected() {
        let src = format!(
            "<FONS></FONS><INTRODUCTIO>VCON x: verum = a < b == c;</INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {{ }};</DOCTRINA>"
        );
        let err = parse_source(&src).unwrap_err();
        assert_eq!(err.code(), "P0002");
    }

    #[test]
    fn compound_assignment_is_rejected() {
        let src = "<FONS></FONS><INTRODUCTIO>x += 1;</INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { };</DOCTRINA>";
        let err = parse_source(src).unwrap_err();
        assert_eq!(err.code(), "P0020");
    }

    #[test]
    fn move_with_non_identifier_rhs_is_rejected() {
        let src = "<FONS></FONS><INTRODUCTIO>x <- 1;</INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { };</DOCTRINA>";
        let err = parse_source(src).unwrap_err();
        assert_eq!(err.code(), "P0021");
    }

    #[test]
    fn effgium_misspelling_parses_as_plain_identifier_not_break() {
        let src = "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { effgium; };</DOCTRINA>";
        let p = parse_source(src).unwrap().0;
        match &p.main.body[0] {
            Stmt::ExprStmt { expr: Expr::Ident { .. }, .. } => {}
            other => panic!("expected a bare-identifier expression statement, got {other:?}"),
        }
    }

    #[test]
    fn inequality_token_parses_as_not_eq() {
        let src = "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { SI propositio:(a >< b) VERUM { } };</DOCTRINA>";
        let p = parse_source(src).unwrap().0;
        let Stmt::If { cond, .. } = &p.main.body[0] else { panic!("expected if") };
        assert!(matches!(cond, Expr::BinOp { op: BinOp::NotEq, .. }));
    }

    #[test]
    fn fstring_interpolation_is_parsed_not_left_raw() {
        let src = "<FONS></FONS><INTRODUCTIO>VCON s: filum = cantus'x=${a+b}';</INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { };</DOCTRINA>";
        let p = parse_source(src).unwrap().0;
        let Item::Decl(Decl::Var(v)) = &p.defines[0] else { panic!("expected var decl") };
        let Some(Expr::FStrLit { parts, .. }) = &v.init else { panic!("expected fstring") };
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[1], FStrPart::Expr(Expr::BinOp { op: BinOp::Add, .. })));
    }

    #[test]
    fn loop_header_requires_propositio_first() {
        let src = "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { RECURSIO(quota: 3) { } };</DOCTRINA>";
        let err = parse_source(src).unwrap_err();
        assert_eq!(err.code(), "P0031");
    }
}
