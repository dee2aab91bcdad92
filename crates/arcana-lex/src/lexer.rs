//! Cursor-based scanner, producing one token at a time over a `Vec<(byte
//! offset, char)>` snapshot of the source. Grounded on `faxc_lex`'s
//! cursor/peek/advance primitives, adapted from a pure-ASCII fast path to
//! Arcana's simpler (but still Unicode-text-carrying, inside strings and
//! comments) grammar.

use crate::error::LexError;
use crate::token::{
    keyword_lookup, type_lookup, CompoundOp, FStrPart, Keyword, SectionTag, Token, TokenKind,
};
use arcana_util::{line_col, Span, StringTable};

const SECTION_TAGS: &[(&str, SectionTag)] = &[
    ("<FONS>", SectionTag::FonsOpen),
    ("</FONS>", SectionTag::FonsClose),
    ("<INTRODUCTIO>", SectionTag::IntroductioOpen),
    ("</INTRODUCTIO>", SectionTag::IntroductioClose),
    ("<DOCTRINA>", SectionTag::DoctrinaOpen),
    ("</DOCTRINA>", SectionTag::DoctrinaClose),
];

/// Scans one source buffer, interning identifiers and literal text into a
/// caller-supplied `StringTable`. The table is borrowed rather than owned
/// so the parser can re-lex f-string expression fragments into the same
/// symbol space as the enclosing program ("F-string as
/// pre-parsed parts").
pub struct Lexer<'src, 'sym> {
    source: &'src str,
    chars: Vec<(usize, char)>,
    pos: usize,
    symbols: &'sym mut StringTable,
}

impl<'src, 'sym> Lexer<'src, 'sym> {
    pub fn new(source: &'src str, symbols: &'sym mut StringTable) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
            symbols,
        }
    }

    /// Scan the whole source into a token vector terminated by `Eof`,
    /// stopping at the first lexical error: the lexer never panics the
    /// pipeline, it returns a diagnostic instead.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let done = tok.is_eof();
            tokens.push(tok);
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    fn byte_offset(&self, idx: usize) -> usize {
        self.chars.get(idx).map(|&(b, _)| b).unwrap_or(self.source.len())
    }

    fn span_from(&self, start_idx: usize) -> Span {
        let start = self.byte_offset(start_idx);
        let end = self.byte_offset(self.pos);
        let (line, column) = line_col(self.source, start);
        Span::new(start, end, line, column)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn rest_from(&self, idx: usize) -> &'src str {
        let start = self.byte_offset(idx);
        &self.source[start..]
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, self.span_from(start)));
        };

        if c == '<' {
            if let Some(tag) = self.try_match_section_tag(start) {
                return Ok(tag);
            }
        }

        if c.is_ascii_digit() {
            return self.scan_number(start);
        }
        if c == '\'' || c == '"' {
            return self.scan_string(start, c);
        }
        if is_ident_start(c) {
            return self.scan_ident_or_keyword(start);
        }

        self.scan_operator(start, c)
    }

    /// Skip whitespace, `///` line comments, and `<cmt>...</cmt>` block
    /// comments. Runs to a fixed point before the next
    /// token is scanned.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_at(1) == Some('/') && self.peek_at(2) == Some('/') => {
                    self.bump();
                    self.bump();
                    self.bump();
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('<') if self.rest_from(self.pos).starts_with("<cmt>") => {
                    let start = self.pos;
                    for _ in 0.."<cmt>".chars().count() {
                        self.bump();
                    }
                    loop {
                        if self.rest_from(self.pos).starts_with("</cmt>") {
                            for _ in 0.."</cmt>".chars().count() {
                                self.bump();
                            }
                            break;
                        }
                        if self.bump().is_none() {
                            return Err(LexError::UnterminatedComment {
                                span: self.span_from(start),
                            });
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn try_match_section_tag(&mut self, start: usize) -> Option<Token> {
        let rest = self.rest_from(start);
        for (text, tag) in SECTION_TAGS {
            if rest.starts_with(text) {
                for _ in 0..text.chars().count() {
                    self.bump();
                }
                return Some(Token::new(TokenKind::Section(*tag), self.span_from(start)));
            }
        }
        None
    }

    fn scan_number(&mut self, start: usize) -> Result<Token, LexError> {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        let is_real = self.peek() == Some('.') && matches!(self.peek_at(1), Some(d) if d.is_ascii_digit());
        if is_real {
            self.bump(); // '.'
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
            let text: String = self.slice(start, self.pos);
            let value: f64 = text
                .parse()
                .map_err(|_| LexError::MalformedNumber { span: self.span_from(start) })?;
            return Ok(Token::new(TokenKind::RealLit(value), self.span_from(start)));
        }
        let text: String = self.slice(start, self.pos);
        let value: i64 = text
            .parse()
            .map_err(|_| LexError::MalformedNumber { span: self.span_from(start) })?;
        Ok(Token::new(TokenKind::IntLit(value), self.span_from(start)))
    }

    fn slice(&self, start_idx: usize, end_idx: usize) -> String {
        let s = self.byte_offset(start_idx);
        let e = self.byte_offset(end_idx);
        self.source[s..e].to_string()
    }

    fn scan_ident_or_keyword(&mut self, start: usize) -> Result<Token, LexError> {
        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            self.bump();
        }
        let text = self.slice(start, self.pos);

        if text == "cantus" && matches!(self.peek(), Some('\'') | Some('"')) {
            return self.scan_fstring(start);
        }

        if let Some(kw) = keyword_lookup(&text) {
            return Ok(Token::new(TokenKind::Keyword(kw), self.span_from(start)));
        }
        if let Some(ty) = type_lookup(&text) {
            return Ok(Token::new(TokenKind::Type(ty), self.span_from(start)));
        }
        let sym = self.symbols.intern(&text);
        Ok(Token::new(TokenKind::Ident(sym), self.span_from(start)))
    }

    fn scan_string(&mut self, start: usize, quote: char) -> Result<Token, LexError> {
        self.bump(); // opening quote
        let mut text = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(LexError::UnterminatedString { span: self.span_from(start) });
                }
                Some(c) if c == quote => break,
                Some('\\') => text.push(self.scan_escape(start)?),
                Some(c) => text.push(c),
            }
        }
        let sym = self.symbols.intern(&text);
        Ok(Token::new(TokenKind::StrLit(sym), self.span_from(start)))
    }

    fn scan_escape(&mut self, start: usize) -> Result<char, LexError> {
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('\\') => Ok('\\'),
            Some('\'') => Ok('\''),
            Some('"') => Ok('"'),
            _ => Err(LexError::UnterminatedString { span: self.span_from(start) }),
        }
    }

    /// Scans `cantus'...${expr}...'`, splitting into alternating `Text`
    /// and raw `Expr` source fragments. The expression fragments are kept
    /// as unparsed text; `arcana-par` re-lexes and re-parses them.
    fn scan_fstring(&mut self, start: usize) -> Result<Token, LexError> {
        let quote = self.bump().expect("caller checked quote follows");
        let mut parts = Vec::new();
        let mut text = String::new();

        loop {
            match self.peek() {
                None => return Err(LexError::UnterminatedFString { span: self.span_from(start) }),
                Some(c) if c == quote => {
                    self.bump();
                    break;
                }
                Some('$') if self.peek_at(1) == Some('{') => {
                    if !text.is_empty() {
                        parts.push(FStrPart::Text(std::mem::take(&mut text)));
                    }
                    self.bump(); // '$'
                    self.bump(); // '{'
                    let expr_start = self.pos;
                    let mut depth = 1usize;
                    loop {
                        match self.bump() {
                            None => {
                                return Err(LexError::UnterminatedFString {
                                    span: self.span_from(start),
                                })
                            }
                            Some('{') => depth += 1,
                            Some('}') => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                    let expr_end = self.pos - 1; // exclude closing '}'
                    let expr_text = self.slice(expr_start, expr_end);
                    parts.push(FStrPart::Expr(expr_text));
                }
                Some('\\') => {
                    self.bump();
                    text.push(self.scan_escape(start)?);
                }
                Some(c) => {
                    self.bump();
                    text.push(c);
                }
            }
        }
        if !text.is_empty() {
            parts.push(FStrPart::Text(text));
        }
        Ok(Token::new(TokenKind::FStrLit(parts), self.span_from(start)))
    }

    fn scan_operator(&mut self, start: usize, c: char) -> Result<Token, LexError> {
        use TokenKind::*;

        let kind = match c {
            '+' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    CompoundAssign(CompoundOp::Add)
                } else {
                    Plus
                }
            }
            '-' => {
                self.bump();
                match self.peek() {
                    Some('>') => {
                        self.bump();
                        ArrowRight
                    }
                    Some('=') => {
                        self.bump();
                        CompoundAssign(CompoundOp::Sub)
                    }
                    _ => Minus,
                }
            }
            '*' => {
                self.bump();
                match self.peek() {
                    Some('*') => {
                        self.bump();
                        Power
                    }
                    Some('=') => {
                        self.bump();
                        CompoundAssign(CompoundOp::Mul)
                    }
                    _ => Star,
                }
            }
            '/' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    CompoundAssign(CompoundOp::Div)
                } else {
                    Slash
                }
            }
            '%' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    CompoundAssign(CompoundOp::Mod)
                } else {
                    Percent
                }
            }
            '=' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    EqEq
                } else {
                    Assign
                }
            }
            '>' => {
                self.bump();
                match self.peek() {
                    Some('=') => {
                        self.bump();
                        GtEq
                    }
                    Some('<') => {
                        self.bump();
                        NotEq
                    }
                    _ => Gt,
                }
            }
            '<' => {
                self.bump();
                match self.peek() {
                    Some('=') => {
                        self.bump();
                        LtEq
                    }
                    Some('-') => {
                        self.bump();
                        ArrowLeft
                    }
                    _ => Lt,
                }
            }
            ';' => {
                self.bump();
                Semicolon
            }
            ':' => {
                self.bump();
                Colon
            }
            ',' => {
                self.bump();
                Comma
            }
            '(' => {
                self.bump();
                LParen
            }
            ')' => {
                self.bump();
                RParen
            }
            '{' => {
                self.bump();
                LBrace
            }
            '}' => {
                self.bump();
                RBrace
            }
            '[' => {
                self.bump();
                LBracket
            }
            ']' => {
                self.bump();
                RBracket
            }
            other => {
                self.bump();
                return Err(LexError::UnrecognizedChar { ch: other, span: self.span_from(start) });
            }
        };
        Ok(Token::new(kind, self.span_from(start)))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lexes a whole, self-contained source buffer with a fresh symbol table.
/// Top-level entry point for the driver; `arcana-par` instead calls
/// `Lexer::new` directly with its own table when re-lexing f-string
/// expression fragments.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn lex(source: &str) -> Result<(Vec<Token>, StringTable), LexError> {
    let mut symbols = StringTable::new();
    let tokens = Lexer::new(source, &mut symbols).tokenize()?;
    tracing::debug!(tokens = tokens.len(), "lex complete");
    Ok((tokens, symbols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, _) = lex(src).expect("lex ok");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn longest_match_not_eq() {
        let ks = kinds("a><b");
        assert_eq!(ks.len(), 4); // ident, ><, ident, eof
        assert!(matches!(ks[1], NotEq));
    }

    #[test]
    fn longest_match_move_arrow() {
        let ks = kinds("x<-y");
        assert!(matches!(ks[1], ArrowLeft));
    }

    #[test]
    fn section_tags_lex_as_single_tokens() {
        let ks = kinds("<FONS></FONS>");
        assert_eq!(ks.len(), 3); // open, close, eof
    }

    #[test]
    fn compound_assign_is_lexed_for_rejection() {
        let ks = kinds("x += 1");
        assert!(matches!(ks[1], CompoundAssign(CompoundOp::Add)));
    }

    #[test]
    fn fstring_splits_text_and_expr_parts() {
        let (tokens, _) = lex("cantus'x=${a+b}'").expect("lex ok");
        match &tokens[0].kind {
            FStrLit(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0], FStrPart::Text("x=".into()));
                assert_eq!(parts[1], FStrPart::Expr("a+b".into()));
            }
            other => panic!("expected FStrLit, got {other:?}"),
        }
    }

    #[test]
    fn effgium_misspelling_lexes_as_plain_identifier() {
        let (tokens, symbols) = lex("effgium;").expect("lex ok");
        match &tokens[0].kind {
            Ident(sym) => assert_eq!(symbols.get(*sym), "effgium"),
            other => panic!("expected Ident, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut symbols = StringTable::new();
        let err = Lexer::new("'abc", &mut symbols).tokenize().unwrap_err();
        assert_eq!(err.code(), "P0001");
    }

    #[test]
    fn real_requires_digit_after_dot() {
        let ks = kinds("3.14");
        assert!(matches!(ks[0], RealLit(v) if (v - 3.14).abs() < 1e-9));
    }
}
