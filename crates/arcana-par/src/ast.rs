//! AST node definitions produced by the parser.
//!
//! A closed sum type with exhaustive matching, in place of the node-class
//! hierarchy a dynamically-typed front-end would use ("Sum-typed AST").

use arcana_util::{Span, Symbol};

/// A fully parsed program: the three sections in source order.
#[derive(Debug, Clone)]
pub struct Program {
    pub imports: Vec<ImportEntry>,
    pub defines: Vec<Item>,
    pub main: FuncDecl,
}

/// A free-form import descriptor; resolution is out of scope.
#[derive(Debug, Clone)]
pub struct ImportEntry {
    pub text: String,
    pub span: Span,
}

/// The `<INTRODUCTIO>` section holds a mix of declarations and statements.
#[derive(Debug, Clone)]
pub enum Item {
    Decl(Decl),
    Stmt(Stmt),
}

#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Func(FuncDecl),
    Class(ClassDecl),
    Const(ConstDecl),
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: Symbol,
    pub ty: Type,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub name: Symbol,
    pub ty: Type,
    pub init: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: Symbol,
    pub return_type: Type,
    pub params: Vec<(Symbol, Type)>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Parsed and stored but not semantically analyzed beyond structure
/// ("user-defined classes... reserved, not implemented").
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: Symbol,
    pub members: Vec<Decl>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Inte,
    Real,
    Filum,
    Verum,
    Ordinata,
    Catalogus,
    /// Sentinel return type; never valid as a value type.
    Nihil,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Assign { target: Symbol, expr: Expr, span: Span },
    Move { target: Symbol, source: Symbol, span: Span },
    Call { callee: Symbol, args: Vec<Expr>, span: Span },
    If { cond: Expr, verum: Vec<Stmt>, falsum: Vec<Stmt>, span: Span },
    Loop {
        cond: Expr,
        quota: Option<QuotaClause>,
        step: Option<Expr>,
        body: Vec<Stmt>,
        span: Span,
    },
    ExprStmt { expr: Expr, span: Span },
    NihilStmt { span: Span },
    Break { span: Span },
    Continue { span: Span },
    Return { expr: Option<Expr>, span: Span },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign { span, .. }
            | Stmt::Move { span, .. }
            | Stmt::Call { span, .. }
            | Stmt::If { span, .. }
            | Stmt::Loop { span, .. }
            | Stmt::ExprStmt { span, .. }
            | Stmt::NihilStmt { span }
            | Stmt::Break { span }
            | Stmt::Continue { span }
            | Stmt::Return { span, .. } => *span,
        }
    }
}

/// The loop header's `quota` clause: a bare budget expression, or an
/// assignment binding a counter name to its initial value.
#[derive(Debug, Clone)]
pub enum QuotaClause {
    Value(Expr),
    Binding { name: Symbol, init: Expr },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
    Neg,
}

/// One fragment of an interpolated f-string, with the expression fragments
/// now fully parsed (unlike `arcana_lex::FStrPart`, which keeps them as raw
/// source text).
#[derive(Debug, Clone)]
pub enum FStrPart {
    Text(String),
    Expr(Expr),
}

#[derive(Debug, Clone)]
pub enum Expr {
    BinOp { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr>, span: Span },
    Unary { op: UnOp, operand: Box<Expr>, span: Span },
    Ident { name: Symbol, span: Span },
    IntLit { value: i64, span: Span },
    RealLit { value: f64, span: Span },
    StrLit { value: Symbol, span: Span },
    FStrLit { parts: Vec<FStrPart>, span: Span },
    Call { callee: Symbol, args: Vec<Expr>, span: Span },
    DictLit { pairs: Vec<(Expr, Expr)>, span: Span },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::BinOp { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Ident { span, .. }
            | Expr::IntLit { span, .. }
            | Expr::RealLit { span, .. }
            | Expr::StrLit { span, .. }
            | Expr::FStrLit { span, .. }
            | Expr::Call { span, .. }
            | Expr::DictLit { span, .. } => *span,
        }
    }
}
