//! Semantic validation: a single pre-order walk enforcing the name,
//! type, and loop-control checks over the parsed AST. Grounded on
//! `faxc_sem::SemanticAnalyzer`'s
//! scope-stack shape (`ScopeTree`/`RibKind`), rebuilt around Arcana's much
//! smaller, closed type system instead of full unification.

use crate::error::SemError;
use arcana_par::ast::*;
use arcana_util::{Span, Symbol};
use indexmap::IndexMap;

const DEFAULT_QUOTA: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

#[derive(Debug, Clone)]
enum Binding {
    Var(Type),
    Const(Type),
    Func { params: Vec<Type>, return_type: Type },
    Builtin { arity: Arity, return_type: Type },
}

enum ConstVal {
    Int(i64),
    Real(f64),
}

pub struct Validator {
    scopes: Vec<IndexMap<Symbol, Binding>>,
    loop_depth: u32,
    current_return_type: Type,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self { scopes: vec![IndexMap::new()], loop_depth: 0, current_return_type: Type::Nihil }
    }

    /// Interns the six built-in names into the symbol table shared with the
    /// parsed program, then walks the program validating every name, type,
    /// and loop-control rule.
    pub fn validate(
        &mut self,
        program: &Program,
        symbols: &mut arcana_util::StringTable,
    ) -> Result<(), SemError> {
        for (name, arity, return_type) in [
            ("indicant", Arity::Variadic, Type::Nihil),
            ("accipere", Arity::Exact(0), Type::Filum),
            ("longitudo", Arity::Exact(1), Type::Inte),
            ("figura", Arity::Exact(1), Type::Filum),
            ("tempus", Arity::Exact(0), Type::Real),
            ("chronos", Arity::Exact(1), Type::Inte),
        ] {
            let sym = symbols.intern(name);
            self.scopes[0].insert(sym, Binding::Builtin { arity, return_type });
        }

        for item in &program.defines {
            if let Item::Decl(decl) = item {
                self.register_decl(decl);
            }
        }

        for item in &program.defines {
            match item {
                Item::Decl(decl) => self.validate_decl(decl)?,
                Item::Stmt(stmt) => self.validate_stmt(stmt)?,
            }
        }

        self.current_return_type = program.main.return_type;
        self.push_scope();
        for stmt in &program.main.body {
            self.validate_stmt(stmt)?;
        }
        self.pop_scope();
        Ok(())
    }

    fn push_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: Symbol, binding: Binding) {
        self.scopes.last_mut().expect("scope stack is never empty").insert(name, binding);
    }

    fn lookup(&self, name: Symbol) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name))
    }

    fn register_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Var(v) => self.declare(v.name, Binding::Var(v.ty)),
            Decl::Const(c) => self.declare(c.name, Binding::Const(c.ty)),
            Decl::Func(f) => {
                let params = f.params.iter().map(|(_, ty)| *ty).collect();
                self.declare(f.name, Binding::Func { params, return_type: f.return_type });
            }
            // Class members are parsed but not semantically processed
            // ("reserved, not implemented").
            Decl::Class(_) => {}
        }
    }

    fn validate_decl(&mut self, decl: &Decl) -> Result<(), SemError> {
        match decl {
            Decl::Var(v) => {
                if let Some(init) = &v.init {
                    let found = self.infer_type(init)?;
                    check_assignable(v.ty, found, init.span())?;
                }
                Ok(())
            }
            Decl::Const(c) => {
                let found = self.infer_type(&c.init)?;
                check_assignable(c.ty, found, c.init.span())
            }
            Decl::Func(f) => {
                let saved_return = self.current_return_type;
                self.current_return_type = f.return_type;
                self.push_scope();
                for (name, ty) in &f.params {
                    self.declare(*name, Binding::Var(*ty));
                }
                for stmt in &f.body {
                    self.validate_stmt(stmt)?;
                }
                self.pop_scope();
                self.current_return_type = saved_return;
                Ok(())
            }
            Decl::Class(_) => Ok(()),
        }
    }

    fn validate_stmt(&mut self, stmt: &Stmt) -> Result<(), SemError> {
        match stmt {
            Stmt::Assign { target, expr, span } => {
                let found = self.infer_type(expr)?;
                let declared = self.lookup_value_type(*target, *span)?;
                check_assignable(declared, found, *span)
            }
            Stmt::Move { target, source, span } => {
                self.lookup_value_type(*target, *span)?;
                self.lookup_value_type(*source, *span)?;
                Ok(())
            }
            Stmt::Call { callee, args, span } => {
                self.check_call(*callee, args, *span)?;
                Ok(())
            }
            Stmt::If { cond, verum, falsum, span } => {
                let cond_ty = self.infer_type(cond)?;
                check_assignable(Type::Verum, cond_ty, *span)?;
                for s in verum {
                    self.validate_stmt(s)?;
                }
                for s in falsum {
                    self.validate_stmt(s)?;
                }
                Ok(())
            }
            Stmt::Loop { cond, quota, step, body, span } => self.validate_loop(cond, quota, step, body, *span),
            Stmt::ExprStmt { expr, .. } => {
                self.infer_type(expr)?;
                Ok(())
            }
            Stmt::NihilStmt { .. } => Ok(()),
            Stmt::Break { span } => {
                if self.loop_depth == 0 {
                    Err(SemError::BreakOutsideLoop { span: *span })
                } else {
                    Ok(())
                }
            }
            Stmt::Continue { span } => {
                if self.loop_depth == 0 {
                    Err(SemError::ContinueOutsideLoop { span: *span })
                } else {
                    Ok(())
                }
            }
            Stmt::Return { expr, span } => {
                match expr {
                    Some(e) => {
                        let found = self.infer_type(e)?;
                        check_assignable(self.current_return_type, found, *span)
                    }
                    None => check_assignable(self.current_return_type, Type::Nihil, *span),
                }
            }
        }
    }

    fn validate_loop(
        &mut self,
        cond: &Expr,
        quota: &Option<QuotaClause>,
        step: &Option<Expr>,
        body: &[Stmt],
        span: Span,
    ) -> Result<(), SemError> {
        self.loop_depth += 1;
        if self.loop_depth > 3 {
            self.loop_depth -= 1;
            return Err(SemError::LoopNestTooDeep { span });
        }

        self.push_scope();
        let result = (|| {
            if let Some(clause) = quota {
                match clause {
                    QuotaClause::Value(expr) => {
                        let found = self.infer_type(expr)?;
                        check_assignable(Type::Inte, found, expr.span())?;
                        check_quota_value(expr)?;
                    }
                    // `name = expr` seeds a counter the body can read, not a
                    // budget — unlike the bare-expression form, an initial
                    // value of zero (or any integer) is ordinary.
                    QuotaClause::Binding { name, init } => {
                        let found = self.infer_type(init)?;
                        check_assignable(Type::Inte, found, init.span())?;
                        self.declare(*name, Binding::Var(Type::Inte));
                    }
                }
            }
            if let Some(step_expr) = step {
                self.infer_type(step_expr)?;
                check_step_value(step_expr)?;
            }
            let cond_ty = self.infer_type(cond)?;
            check_assignable(Type::Verum, cond_ty, cond.span())?;
            for stmt in body {
                self.validate_stmt(stmt)?;
            }
            Ok(())
        })();
        self.pop_scope();
        self.loop_depth -= 1;
        result
    }

    fn check_call(&mut self, callee: Symbol, args: &[Expr], span: Span) -> Result<Type, SemError> {
        let (arity, return_type) = match self.lookup(callee) {
            Some(Binding::Func { params, return_type }) => (Arity::Exact(params.len()), *return_type),
            Some(Binding::Builtin { arity, return_type }) => (*arity, *return_type),
            _ => return Err(SemError::UndeclaredName { span }),
        };
        match arity {
            Arity::Exact(n) if n != args.len() => {
                return Err(SemError::ArgCountMismatch { expected: n.to_string(), found: args.len(), span })
            }
            _ => {}
        }
        for arg in args {
            self.infer_type(arg)?;
        }
        Ok(return_type)
    }

    fn lookup_value_type(&self, name: Symbol, span: Span) -> Result<Type, SemError> {
        match self.lookup(name) {
            Some(Binding::Var(ty)) | Some(Binding::Const(ty)) => Ok(*ty),
            Some(Binding::Func { .. }) | Some(Binding::Builtin { .. }) | None => {
                Err(SemError::UndeclaredName { span })
            }
        }
    }

    fn infer_type(&mut self, expr: &Expr) -> Result<Type, SemError> {
        match expr {
            Expr::IntLit { .. } => Ok(Type::Inte),
            Expr::RealLit { .. } => Ok(Type::Real),
            Expr::StrLit { .. } => Ok(Type::Filum),
            Expr::FStrLit { parts, .. } => {
                for part in parts {
                    if let FStrPart::Expr(e) = part {
                        self.infer_type(e)?;
                    }
                }
                Ok(Type::Filum)
            }
            Expr::DictLit { pairs, .. } => {
                for (k, v) in pairs {
                    self.infer_type(k)?;
                    self.infer_type(v)?;
                }
                Ok(Type::Catalogus)
            }
            Expr::Ident { name, span } => self.lookup_value_type(*name, *span),
            Expr::Unary { op, operand, span } => {
                let ty = self.infer_type(operand)?;
                match op {
                    UnOp::Not => Ok(Type::Verum),
                    UnOp::Neg if ty == Type::Inte || ty == Type::Real => Ok(ty),
                    UnOp::Neg => Err(SemError::TypeMismatch { expected: Type::Inte, found: ty, span: *span }),
                }
            }
            Expr::Call { callee, args, span } => {
                let return_type = self.check_call(*callee, args, *span)?;
                if return_type == Type::Nihil {
                    Err(SemError::NihilNotExpr { span: *span })
                } else {
                    Ok(return_type)
                }
            }
            Expr::BinOp { op, lhs, rhs, span } => self.infer_binop(*op, lhs, rhs, *span),
        }
    }

    fn infer_binop(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr, span: Span) -> Result<Type, SemError> {
        let lt = self.infer_type(lhs)?;
        let rt = self.infer_type(rhs)?;
        match op {
            BinOp::Add if lt == Type::Filum && rt == Type::Filum => Ok(Type::Filum),
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => {
                numeric_broaden(lt, rt, span)
            }
            BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq => Ok(Type::Verum),
            BinOp::And | BinOp::Or => {
                if lt == Type::Verum && rt == Type::Verum {
                    Ok(Type::Verum)
                } else {
                    let bad = if lt != Type::Verum { lt } else { rt };
                    Err(SemError::TypeMismatch { expected: Type::Verum, found: bad, span })
                }
            }
        }
    }
}

fn numeric_broaden(lt: Type, rt: Type, span: Span) -> Result<Type, SemError> {
    match (lt, rt) {
        (Type::Real, Type::Real) | (Type::Real, Type::Inte) | (Type::Inte, Type::Real) => Ok(Type::Real),
        (Type::Inte, Type::Inte) => Ok(Type::Inte),
        _ => {
            let bad = if lt != Type::Inte && lt != Type::Real { lt } else { rt };
            Err(SemError::TypeMismatch { expected: Type::Inte, found: bad, span })
        }
    }
}

/// Declarations accept an exact type match, plus the common widening of an
/// integer literal/expression into a `real`-typed slot.
fn check_assignable(declared: Type, found: Type, span: Span) -> Result<(), SemError> {
    if declared == found || (declared == Type::Real && found == Type::Inte) {
        Ok(())
    } else {
        Err(SemError::TypeMismatch { expected: declared, found, span })
    }
}

fn const_eval(expr: &Expr) -> Option<ConstVal> {
    match expr {
        Expr::IntLit { value, .. } => Some(ConstVal::Int(*value)),
        Expr::RealLit { value, .. } => Some(ConstVal::Real(*value)),
        Expr::Unary { op: UnOp::Neg, operand, .. } => match const_eval(operand)? {
            ConstVal::Int(v) => v.checked_neg().map(ConstVal::Int),
            ConstVal::Real(v) => Some(ConstVal::Real(-v)),
        },
        Expr::BinOp { op, lhs, rhs, .. }
            if matches!(op, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow) =>
        {
            fold(*op, const_eval(lhs)?, const_eval(rhs)?)
        }
        _ => None,
    }
}

fn fold(op: BinOp, l: ConstVal, r: ConstVal) -> Option<ConstVal> {
    if let (ConstVal::Int(a), ConstVal::Int(b)) = (&l, &r) {
        let (a, b) = (*a, *b);
        return match op {
            BinOp::Add => a.checked_add(b).map(ConstVal::Int),
            BinOp::Sub => a.checked_sub(b).map(ConstVal::Int),
            BinOp::Mul => a.checked_mul(b).map(ConstVal::Int),
            BinOp::Div if b != 0 => a.checked_div(b).map(ConstVal::Int),
            BinOp::Mod if b != 0 => a.checked_rem(b).map(ConstVal::Int),
            BinOp::Pow if b >= 0 => u32::try_from(b).ok().and_then(|e| a.checked_pow(e)).map(ConstVal::Int),
            _ => None,
        };
    }
    let a = match l {
        ConstVal::Int(v) => v as f64,
        ConstVal::Real(v) => v,
    };
    let b = match r {
        ConstVal::Int(v) => v as f64,
        ConstVal::Real(v) => v,
    };
    match op {
        BinOp::Add => Some(ConstVal::Real(a + b)),
        BinOp::Sub => Some(ConstVal::Real(a - b)),
        BinOp::Mul => Some(ConstVal::Real(a * b)),
        BinOp::Div if b != 0.0 => Some(ConstVal::Real(a / b)),
        BinOp::Pow => Some(ConstVal::Real(a.powf(b))),
        _ => None,
    }
}

/// `E0111`: a statically-known quota must be a positive integer. Non-const
/// quotas are accepted; the runtime still enforces the budget.
fn check_quota_value(expr: &Expr) -> Result<(), SemError> {
    match const_eval(expr) {
        Some(ConstVal::Int(v)) if v > 0 => Ok(()),
        Some(_) => Err(SemError::LoopQuotaInvalid { span: expr.span() }),
        None => Ok(()),
    }
}

/// `E0110`: a statically-known step must be strictly positive.
fn check_step_value(expr: &Expr) -> Result<(), SemError> {
    match const_eval(expr) {
        Some(ConstVal::Int(v)) if v <= 0 => Err(SemError::LoopStepNotPositive { span: expr.span() }),
        Some(ConstVal::Real(v)) if v <= 0.0 => Err(SemError::LoopStepNotPositive { span: expr.span() }),
        _ => Ok(()),
    }
}

/// The quota default when no clause is present at all. Unused by static
/// validation but kept alongside the checks it governs so the emitter's
/// default and this module's stay in one place.
pub const fn default_quota() -> i64 {
    DEFAULT_QUOTA
}
