//! Recursive-descent parser: a single pass over the token stream with
//! one-token lookahead. Grounded on `faxc_par`'s
//! `Parser<'a>` cursor (`peek`/`consume`/`at`) and its precedence-climbing
//! expression parser, adapted to Arcana's fixed eight-level grammar.

use crate::ast::*;
use crate::error::ParseError;
use arcana_lex::{Keyword, SectionTag, Token, TokenKind, TypeName};
use arcana_util::{Span, StringTable, Symbol};

pub struct Parser<'a> {
    tokens: &'a [Token],
    symbols: &'a mut StringTable,
    pos: usize,
}

type PResult<T> = Result<T, ParseError>;

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], symbols: &'a mut StringTable) -> Self {
        Self { tokens, symbols, pos: 0 }
    }

    // ---- cursor primitives -------------------------------------------------

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn peek_at(&self, offset: usize) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn bump(&mut self) -> Token {
        let tok = self.peek().clone();
        if !tok.is_eof() {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn describe(kind: &TokenKind) -> String {
        format!("{kind:?}")
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            found: Self::describe(self.peek_kind()),
            span: self.span(),
            token_index: self.pos,
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        if self.at(&kind) {
            Ok(self.bump())
        } else {
            Err(ParseError::ExpectedToken {
                expected: what.to_string(),
                found: Self::describe(self.peek_kind()),
                span: self.span(),
                token_index: self.pos,
            })
        }
    }

    fn expect_section(&mut self, tag: SectionTag, what: &str) -> PResult<Token> {
        self.expect(TokenKind::Section(tag), what)
    }

    fn expect_keyword(&mut self, kw: Keyword, what: &str) -> PResult<Token> {
        self.expect(TokenKind::Keyword(kw), what)
    }

    fn expect_ident(&mut self, what: &str) -> PResult<(Symbol, Span)> {
        match self.peek_kind().clone() {
            TokenKind::Ident(sym) => {
                let span = self.span();
                self.bump();
                Ok((sym, span))
            }
            _ => Err(ParseError::ExpectedToken {
                expected: what.to_string(),
                found: Self::describe(self.peek_kind()),
                span: self.span(),
                token_index: self.pos,
            }),
        }
    }

    // ---- program structure --------------------------------------------------

    pub fn parse_program(&mut self) -> PResult<Program> {
        self.expect_section(SectionTag::FonsOpen, "<FONS>")?;
        let mut imports = Vec::new();
        while !self.at(&TokenKind::Section(SectionTag::FonsClose)) {
            imports.push(self.parse_import_entry()?);
        }
        self.expect_section(SectionTag::FonsClose, "</FONS>")?;

        self.expect_section(SectionTag::IntroductioOpen, "<INTRODUCTIO>")?;
        let mut defines = Vec::new();
        while !self.at(&TokenKind::Section(SectionTag::IntroductioClose)) {
            defines.push(self.parse_item()?);
        }
        self.expect_section(SectionTag::IntroductioClose, "</INTRODUCTIO>")?;

        self.expect_section(SectionTag::DoctrinaOpen, "<DOCTRINA>")?;
        if self.at(&TokenKind::Section(SectionTag::DoctrinaClose)) {
            return Err(ParseError::MainSubjectoRequired {
                span: self.span(),
                token_index: self.pos,
            });
        }
        let main_span_start = self.pos;
        let main = self.parse_func_decl()?;
        let main_name = self.symbols.get(main.name);
        if main_name != "subjecto" {
            return Err(ParseError::MainSubjectoRequired {
                span: main.span,
                token_index: main_span_start,
            });
        }
        if main.return_type != Type::Nihil || !main.params.is_empty() {
            return Err(ParseError::MainNihilRequired {
                span: main.span,
                token_index: main_span_start,
            });
        }
        self.expect_section(SectionTag::DoctrinaClose, "</DOCTRINA>")?;
        self.expect(TokenKind::Eof, "end of input")?;

        Ok(Program { imports, defines, main })
    }

    fn parse_import_entry(&mut self) -> PResult<ImportEntry> {
        let start = self.span();
        let text = match self.peek_kind().clone() {
            TokenKind::StrLit(sym) => {
                self.bump();
                self.symbols.get(sym).to_string()
            }
            _ => return Err(self.unexpected()),
        };
        self.expect(TokenKind::Semicolon, ";")?;
        Ok(ImportEntry { text, span: start.to(self.span()) })
    }

    fn parse_item(&mut self) -> PResult<Item> {
        match self.peek_kind() {
            TokenKind::Keyword(Keyword::Vcon)
            | TokenKind::Keyword(Keyword::Fcon)
            | TokenKind::Keyword(Keyword::Ccon)
            | TokenKind::Keyword(Keyword::Principium) => Ok(Item::Decl(self.parse_decl()?)),
            _ => Ok(Item::Stmt(self.parse_stmt()?)),
        }
    }

    fn parse_decl(&mut self) -> PResult<Decl> {
        match self.peek_kind() {
            TokenKind::Keyword(Keyword::Vcon) => Ok(Decl::Var(self.parse_var_decl()?)),
            TokenKind::Keyword(Keyword::Fcon) => Ok(Decl::Func(self.parse_func_decl()?)),
            TokenKind::Keyword(Keyword::Ccon) => Ok(Decl::Class(self.parse_class_decl()?)),
            TokenKind::Keyword(Keyword::Principium) => Ok(Decl::Const(self.parse_const_decl()?)),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_type(&mut self) -> PResult<Type> {
        match self.peek_kind().clone() {
            TokenKind::Type(ty) => {
                self.bump();
                Ok(match ty {
                    TypeName::Inte => Type::Inte,
                    TypeName::Real => Type::Real,
                    TypeName::Filum => Type::Filum,
                    TypeName::Verum => Type::Verum,
                    TypeName::Ordinata => Type::Ordinata,
                    TypeName::Catalogus => Type::Catalogus,
                })
            }
            _ => Err(ParseError::ExpectedToken {
                expected: "a type name".to_string(),
                found: Self::describe(self.peek_kind()),
                span: self.span(),
                token_index: self.pos,
            }),
        }
    }

    /// Return-type position, where the `nihil` keyword is additionally
    /// accepted as the "no value" sentinel.
    fn parse_return_type(&mut self) -> PResult<Type> {
        if self.at(&TokenKind::Keyword(Keyword::Nihil)) {
            self.bump();
            return Ok(Type::Nihil);
        }
        self.parse_type()
    }

    fn parse_var_decl(&mut self) -> PResult<VarDecl> {
        let start = self.span();
        self.expect_keyword(Keyword::Vcon, "VCON")?;
        let (name, _) = self.expect_ident("a variable name")?;
        self.expect(TokenKind::Colon, ":")?;
        let ty = self.parse_type()?;
        let init = if self.at(&TokenKind::Assign) {
            self.bump();
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, ";")?;
        Ok(VarDecl { name, ty, init, span: start.to(self.span()) })
    }

    fn parse_const_decl(&mut self) -> PResult<ConstDecl> {
        let start = self.span();
        self.expect_keyword(Keyword::Principium, "PRINCIPIUM")?;
        let (name, _) = self.expect_ident("a constant name")?;
        self.expect(TokenKind::Colon, ":")?;
        let ty = self.parse_type()?;
        self.expect(TokenKind::Assign, "=")?;
        let init = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, ";")?;
        Ok(ConstDecl { name, ty, init, span: start.to(self.span()) })
    }

    fn parse_func_decl(&mut self) -> PResult<FuncDecl> {
        let start = self.span();
        self.expect_keyword(Keyword::Fcon, "FCON")?;
        let (name, _) = self.expect_ident("a function name")?;
        self.expect(TokenKind::Colon, ":")?;
        let return_type = self.parse_return_type()?;
        self.expect(TokenKind::LParen, "(")?;
        let mut params = Vec::new();
        if !self.at(&TokenKind::RParen) {
            loop {
                let (pname, _) = self.expect_ident("a parameter name")?;
                self.expect(TokenKind::Colon, ":")?;
                let pty = self.parse_type()?;
                params.push((pname, pty));
                if self.at(&TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, ")")?;
        self.expect(TokenKind::ArrowRight, "->")?;
        self.expect(TokenKind::LBrace, "{")?;
        let body = self.parse_stmt_block()?;
        self.expect(TokenKind::RBrace, "}")?;
        self.expect(TokenKind::Semicolon, ";")?;
        Ok(FuncDecl { name, return_type, params, body, span: start.to(self.span()) })
    }

    fn parse_class_decl(&mut self) -> PResult<ClassDecl> {
        let start = self.span();
        self.expect_keyword(Keyword::Ccon, "CCON")?;
        let (name, _) = self.expect_ident("a class name")?;
        self.expect(TokenKind::LBrace, "{")?;
        let mut members = Vec::new();
        while !self.at(&TokenKind::RBrace) {
            members.push(self.parse_decl()?);
        }
        self.expect(TokenKind::RBrace, "}")?;
        self.expect(TokenKind::Semicolon, ";")?;
        Ok(ClassDecl { name, members, span: start.to(self.span()) })
    }

    fn parse_stmt_block(&mut self) -> PResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.at(&TokenKind::RBrace) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    // ---- statements -----------------------------------------------------

    fn parse_stmt(&mut self) -> PResult<Stmt> {
        match self.peek_kind().clone() {
            TokenKind::Keyword(Keyword::Nihil) => {
                let start = self.span();
                self.bump();
                if self.at(&TokenKind::Semicolon) {
                    self.bump();
                    Ok(Stmt::NihilStmt { span: start.to(self.span()) })
                } else {
                    Err(ParseError::NihilNotExpr { span: start, token_index: self.pos - 1 })
                }
            }
            TokenKind::Keyword(Keyword::Si) => self.parse_if(),
            TokenKind::Keyword(Keyword::Recursio) => self.parse_loop(),
            TokenKind::Keyword(Keyword::Effigium) => {
                let start = self.span();
                self.bump();
                self.expect(TokenKind::Semicolon, ";")?;
                Ok(Stmt::Break { span: start.to(self.span()) })
            }
            TokenKind::Keyword(Keyword::Proximum) => {
                let start = self.span();
                self.bump();
                self.expect(TokenKind::Semicolon, ";")?;
                Ok(Stmt::Continue { span: start.to(self.span()) })
            }
            TokenKind::Keyword(Keyword::Reditus) => {
                let start = self.span();
                self.bump();
                let expr = if self.at(&TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.expect(TokenKind::Semicolon, ";")?;
                Ok(Stmt::Return { expr, span: start.to(self.span()) })
            }
            TokenKind::Ident(sym) => self.parse_ident_led_stmt(sym),
            _ => {
                let start = self.span();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Semicolon, ";")?;
                Ok(Stmt::ExprStmt { expr, span: start.to(self.span()) })
            }
        }
    }

    fn parse_ident_led_stmt(&mut self, sym: Symbol) -> PResult<Stmt> {
        let start = self.span();
        match self.peek_at(1) {
            TokenKind::Assign => {
                self.bump(); // ident
                self.bump(); // '='
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Semicolon, ";")?;
                Ok(Stmt::Assign { target: sym, expr, span: start.to(self.span()) })
            }
            TokenKind::ArrowLeft => {
                self.bump(); // ident
                self.bump(); // '<-'
                match self.peek_kind().clone() {
                    TokenKind::Ident(source) => {
                        self.bump();
                        self.expect(TokenKind::Semicolon, ";")?;
                        Ok(Stmt::Move { target: sym, source, span: start.to(self.span()) })
                    }
                    _ => Err(ParseError::InvalidMove { span: self.span(), token_index: self.pos }),
                }
            }
            TokenKind::LParen => {
                self.bump(); // ident
                let args = self.parse_call_tail()?;
                self.expect(TokenKind::Semicolon, ";")?;
                Ok(Stmt::Call { callee: sym, args, span: start.to(self.span()) })
            }
            TokenKind::CompoundAssign(_) => {
                Err(ParseError::UnsupportedSyntax { span: self.peek().span, token_index: self.pos + 1 })
            }
            _ => {
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Semicolon, ";")?;
                Ok(Stmt::ExprStmt { expr, span: start.to(self.span()) })
            }
        }
    }

    fn parse_if(&mut self) -> PResult<Stmt> {
        let start = self.span();
        self.expect_keyword(Keyword::Si, "SI")?;
        self.expect_keyword(Keyword::Propositio, "propositio")?;
        self.expect(TokenKind::Colon, ":")?;
        self.expect(TokenKind::LParen, "(")?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen, ")")?;
        self.expect_keyword(Keyword::VerumBranch, "VERUM")?;
        self.expect(TokenKind::LBrace, "{")?;
        let verum = self.parse_stmt_block()?;
        self.expect(TokenKind::RBrace, "}")?;
        let falsum = if self.at(&TokenKind::Keyword(Keyword::FalsumBranch)) {
            self.bump();
            self.expect(TokenKind::LBrace, "{")?;
            let stmts = self.parse_stmt_block()?;
            self.expect(TokenKind::RBrace, "}")?;
            stmts
        } else {
            Vec::new()
        };
        Ok(Stmt::If { cond, verum, falsum, span: start.to(self.span()) })
    }

    fn parse_loop(&mut self) -> PResult<Stmt> {
        let start = self.span();
        self.expect_keyword(Keyword::Recursio, "RECURSIO")?;
        self.expect(TokenKind::LParen, "(")?;

        if !self.at(&TokenKind::Keyword(Keyword::Propositio)) {
            return Err(match self.peek_kind().clone() {
                TokenKind::Keyword(Keyword::Quota) | TokenKind::Keyword(Keyword::Acceleratio) => {
                    ParseError::LoopPropositioRequired { span: self.span(), token_index: self.pos }
                }
                _ => ParseError::UnknownLoopHeader {
                    label: Self::describe(self.peek_kind()),
                    span: self.span(),
                    token_index: self.pos,
                },
            });
        }
        self.bump();
        self.expect(TokenKind::Colon, ":")?;
        self.expect(TokenKind::LParen, "(")?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen, ")")?;

        let mut quota = None;
        let mut step = None;
        if self.at(&TokenKind::Comma) {
            self.bump();
            if self.at(&TokenKind::Keyword(Keyword::Quota)) {
                self.bump();
                self.expect(TokenKind::Colon, ":")?;
                quota = Some(self.parse_quota_clause()?);
                if self.at(&TokenKind::Comma) {
                    self.bump();
                    self.expect_keyword(Keyword::Acceleratio, "acceleratio")?;
                    self.expect(TokenKind::Colon, ":")?;
                    step = Some(self.parse_expression()?);
                }
            } else if self.at(&TokenKind::Keyword(Keyword::Acceleratio)) {
                self.bump();
                self.expect(TokenKind::Colon, ":")?;
                step = Some(self.parse_expression()?);
            } else {
                return Err(ParseError::UnknownLoopHeader {
                    label: Self::describe(self.peek_kind()),
                    span: self.span(),
                    token_index: self.pos,
                });
            }
        }
        self.expect(TokenKind::RParen, ")")?;
        self.expect(TokenKind::LBrace, "{")?;
        let body = self.parse_stmt_block()?;
        self.expect(TokenKind::RBrace, "}")?;
        Ok(Stmt::Loop { cond, quota, step, body, span: start.to(self.span()) })
    }

    fn parse_quota_clause(&mut self) -> PResult<QuotaClause> {
        if let TokenKind::Ident(name) = self.peek_kind().clone() {
            if matches!(self.peek_at(1), TokenKind::Assign) {
                self.bump(); // ident
                self.bump(); // '='
                let init = self.parse_expression()?;
                return Ok(QuotaClause::Binding { name, init });
            }
        }
        Ok(QuotaClause::Value(self.parse_expression()?))
    }

    /// Parses the `() <- (args)` tail of a call once the callee identifier
    /// has already been consumed ("Call-expression form").
    fn parse_call_tail(&mut self) -> PResult<Vec<Expr>> {
        self.expect(TokenKind::LParen, "(")?;
        self.expect(TokenKind::RParen, ")")?;
        self.expect(TokenKind::ArrowLeft, "<-")?;
        self.expect(TokenKind::LParen, "(")?;
        let mut args = Vec::new();
        if !self.at(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.at(&TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, ")")?;
        Ok(args)
    }

    // ---- expressions: one function per precedence level ------------------

    pub fn parse_expression(&mut self) -> PResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_and()?;
        while self.at(&TokenKind::Keyword(Keyword::Aut)) {
            self.bump();
            let rhs = self.parse_and()?;
            let span = lhs.span().to(rhs.span());
            lhs = Expr::BinOp { op: BinOp::Or, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_not()?;
        while self.at(&TokenKind::Keyword(Keyword::Et)) {
            self.bump();
            let rhs = self.parse_not()?;
            let span = lhs.span().to(rhs.span());
            lhs = Expr::BinOp { op: BinOp::And, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
        }
        Ok(lhs)
    }

    /// `non` (stackable, right-associative) and unary minus share this
    /// level; the grammar names only `non` explicitly but gives numeric
    /// negation nowhere else to bind.
    fn parse_not(&mut self) -> PResult<Expr> {
        if self.at(&TokenKind::Keyword(Keyword::Non)) {
            let start = self.span();
            self.bump();
            let operand = self.parse_not()?;
            let span = start.to(operand.span());
            return Ok(Expr::Unary { op: UnOp::Not, operand: Box::new(operand), span });
        }
        if self.at(&TokenKind::Minus) {
            let start = self.span();
            self.bump();
            let operand = self.parse_not()?;
            let span = start.to(operand.span());
            return Ok(Expr::Unary { op: UnOp::Neg, operand: Box::new(operand), span });
        }
        self.parse_comparison()
    }

    /// Non-chaining: at most one comparison operator per expression
    /// ("exactly one operator").
    fn parse_comparison(&mut self) -> PResult<Expr> {
        let lhs = self.parse_additive()?;
        let op = match self.peek_kind() {
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::NotEq,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::LtEq => BinOp::LtEq,
            TokenKind::GtEq => BinOp::GtEq,
            _ => return Ok(lhs),
        };
        self.bump();
        let rhs = self.parse_additive()?;
        let span = lhs.span().to(rhs.span());
        let result = Expr::BinOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs), span };

        if matches!(
            self.peek_kind(),
            TokenKind::EqEq | TokenKind::NotEq | TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq
        ) {
            return Err(self.unexpected());
        }
        Ok(result)
    }

    fn parse_additive(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_multiplicative()?;
            let span = lhs.span().to(rhs.span());
            lhs = Expr::BinOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_power()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_power()?;
            let span = lhs.span().to(rhs.span());
            lhs = Expr::BinOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
        }
        Ok(lhs)
    }

    fn parse_power(&mut self) -> PResult<Expr> {
        let lhs = self.parse_primary()?;
        if self.at(&TokenKind::Power) {
            self.bump();
            let rhs = self.parse_power()?; // right-associative
            let span = lhs.span().to(rhs.span());
            return Ok(Expr::BinOp { op: BinOp::Pow, lhs: Box::new(lhs), rhs: Box::new(rhs), span });
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let start = self.span();
        match self.peek_kind().clone() {
            TokenKind::LBrace => self.parse_dict_lit(),
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen, ")")?;
                Ok(inner)
            }
            TokenKind::Ident(sym) => {
                self.bump();
                if self.at(&TokenKind::LParen) {
                    let args = self.parse_call_tail()?;
                    Ok(Expr::Call { callee: sym, args, span: start.to(self.span()) })
                } else {
                    Ok(Expr::Ident { name: sym, span: start })
                }
            }
            TokenKind::IntLit(v) => {
                self.bump();
                Ok(Expr::IntLit { value: v, span: start })
            }
            TokenKind::RealLit(v) => {
                self.bump();
                Ok(Expr::RealLit { value: v, span: start })
            }
            TokenKind::StrLit(sym) => {
                self.bump();
                Ok(Expr::StrLit { value: sym, span: start })
            }
            TokenKind::FStrLit(parts) => {
                self.bump();
                let parsed = parts
                    .into_iter()
                    .map(|p| self.parse_fstring_part(p))
                    .collect::<PResult<Vec<_>>>()?;
                Ok(Expr::FStrLit { parts: parsed, span: start })
            }
            TokenKind::Keyword(Keyword::Nihil) => {
                Err(ParseError::NihilNotExpr { span: start, token_index: self.pos })
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_fstring_part(&mut self, part: arcana_lex::FStrPart) -> PResult<FStrPart> {
        match part {
            arcana_lex::FStrPart::Text(t) => Ok(FStrPart::Text(t)),
            arcana_lex::FStrPart::Expr(src) => {
                let tokens = arcana_lex::Lexer::new(&src, self.symbols)
                    .tokenize()
                    .map_err(|e| ParseError::UnexpectedToken {
                        found: e.to_string(),
                        span: e.span(),
                        token_index: self.pos,
                    })?;
                let mut sub = Parser::new(&tokens, self.symbols);
                let expr = sub.parse_expression()?;
                sub.expect(TokenKind::Eof, "end of interpolated expression")?;
                Ok(FStrPart::Expr(expr))
            }
        }
    }

    fn parse_dict_lit(&mut self) -> PResult<Expr> {
        let start = self.span();
        self.expect(TokenKind::LBrace, "{")?;
        let mut pairs = Vec::new();
        if !self.at(&TokenKind::RBrace) {
            loop {
                let key = self.parse_expression()?;
                self.expect(TokenKind::Colon, ":")?;
                let value = self.parse_expression()?;
                pairs.push((key, value));
                if self.at(&TokenKind::Comma) {
                    self.bump();
                    if self.at(&TokenKind::RBrace) {
                        break; // trailing comma
                    }
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBrace, "}")?;
        Ok(Expr::DictLit { pairs, span: start.to(self.span()) })
    }
}
