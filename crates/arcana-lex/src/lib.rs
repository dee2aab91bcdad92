//! Lexical analysis: turns Arcana source text into a token stream.

mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::{lex, Lexer};
pub use token::{
    keyword_lookup, type_lookup, CompoundOp, FStrPart, Keyword, SectionTag, Token, TokenKind,
    TypeName,
};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Two identifiers separated by whitespace always lex as two
        /// `Ident` tokens, never merged or split further (longest-match is
        /// bounded by the separating whitespace).
        #[test]
        fn idents_separated_by_space_stay_distinct(
            a in "[a-z][a-z0-9_]{0,8}",
            b in "[a-z][a-z0-9_]{0,8}",
        ) {
            // avoid accidental keyword/type collisions skewing the assertion
            prop_assume!(keyword_lookup(&a).is_none() && type_lookup(&a).is_none());
            prop_assume!(keyword_lookup(&b).is_none() && type_lookup(&b).is_none());
            let src = format!("{a} {b}");
            let (tokens, symbols) = lex(&src).expect("lex ok");
            let idents: Vec<_> = tokens
                .iter()
                .filter_map(|t| match &t.kind {
                    TokenKind::Ident(sym) => Some(symbols.get(*sym).to_string()),
                    _ => None,
                })
                .collect();
            prop_assert_eq!(idents, vec![a, b]);
        }
    }
}
