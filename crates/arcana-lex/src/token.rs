//! Token kinds recognized by the Arcana lexer.
//!
//! One variant per terminal the grammar needs; doc comments are attached
//! where the spelling isn't self-evident from the variant name (mirrors
//! `faxc_lex::Token`'s per-keyword doc comments).

use arcana_util::{Span, Symbol};

/// A single fragment of an f-string literal: either literal text or the
/// source text of an interpolated `${...}` expression, not yet parsed.
/// The parser re-lexes and re-parses each `Expr` fragment through the same
/// expression grammar ("F-string as pre-parsed parts").
#[derive(Clone, Debug, PartialEq)]
pub enum FStrPart {
    Text(String),
    Expr(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    Vcon,
    Fcon,
    Ccon,
    Principium,
    Reditus,
    Recursio,
    Si,
    /// `VERUM` — introduces an if-statement's true branch block.
    VerumBranch,
    /// `FALSUM` — introduces an if-statement's false branch block.
    FalsumBranch,
    Propositio,
    Quota,
    Acceleratio,
    Effigium,
    Proximum,
    Non,
    Et,
    Aut,
    Nihil,
    Cantus,
    Subjecto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeName {
    Inte,
    Real,
    Filum,
    /// `verum` — the boolean type, distinct from the `VERUM` branch keyword.
    Verum,
    Ordinata,
    Catalogus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionTag {
    FonsOpen,
    FonsClose,
    IntroductioOpen,
    IntroductioClose,
    DoctrinaOpen,
    DoctrinaClose,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Type(TypeName),
    Section(SectionTag),
    Ident(Symbol),
    IntLit(i64),
    RealLit(f64),
    StrLit(Symbol),
    FStrLit(Vec<FStrPart>),

    // Punctuation
    Semicolon,
    Colon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Power,
    EqEq,
    /// `><` — inequality.
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Assign,
    /// `<-` — move statement / call-argument separator.
    ArrowLeft,
    /// `->` — function-signature arrow before a body block.
    ArrowRight,

    /// `+=`, `-=`, `*=`, `/=`, `%=` — lexed only so the parser can reject
    /// them with `P0020 UNSUPPORTED_SYNTAX` instead of failing with a
    /// confusing "unexpected token" further down the expression.
    CompoundAssign(CompoundOp),

    Eof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompoundOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Exact-match keyword table, consulted before an identifier is accepted
/// as a plain `Ident`: keyword tokens are recognized by this table before
/// falling back to a plain identifier.
pub fn keyword_lookup(text: &str) -> Option<Keyword> {
    use Keyword::*;
    Some(match text {
        "VCON" => Vcon,
        "FCON" => Fcon,
        "CCON" => Ccon,
        "PRINCIPIUM" => Principium,
        "REDITUS" => Reditus,
        "RECURSIO" => Recursio,
        "SI" => Si,
        "VERUM" => VerumBranch,
        "FALSUM" => FalsumBranch,
        "propositio" => Propositio,
        "quota" => Quota,
        "acceleratio" => Acceleratio,
        "effigium" => Effigium,
        "proximum" => Proximum,
        "non" => Non,
        "et" => Et,
        "aut" => Aut,
        "nihil" => Nihil,
        "cantus" => Cantus,
        "subjecto" => Subjecto,
        _ => return None,
    })
}

pub fn type_lookup(text: &str) -> Option<TypeName> {
    use TypeName::*;
    Some(match text {
        "inte" => Inte,
        "real" => Real,
        "filum" => Filum,
        "verum" => Verum,
        "ordinata" => Ordinata,
        "catalogus" => Catalogus,
        _ => return None,
    })
}
