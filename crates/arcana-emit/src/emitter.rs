//! Lowers a validated `Program` to Python 3 source text. Grounded on
//! `faxc_gen::llvm::LlvmBackend`'s shape — a struct holding emission state
//! plus one method per node kind — retargeted from an `inkwell` IR builder
//! to a plain `String` buffer, since the chosen host is dynamic source text
//! rather than machine code (DESIGN.md, "Host target decision").
//!
//! The emitter assumes its input already passed `arcana_sem::validate_program`;
//! it performs no further checking and cannot fail.

use arcana_par::ast::*;
use arcana_util::{StringTable, Symbol};
use std::fmt::Write as _;

const DEFAULT_QUOTA: i64 = 100;
const INDENT: &str = "    ";

pub struct Emitter<'a> {
    symbols: &'a StringTable,
    out: String,
    indent: usize,
    loop_seq: u32,
}

/// Emits a complete program, preamble included.
#[tracing::instrument(level = "debug", skip_all, fields(items = program.defines.len()))]
pub fn emit_program(program: &Program, symbols: &StringTable) -> String {
    let mut emitter = Emitter { symbols, out: String::new(), indent: 0, loop_seq: 0 };
    emitter.emit(program);
    tracing::debug!(host_bytes = emitter.out.len(), "emission complete");
    emitter.out
}

impl<'a> Emitter<'a> {
    fn name(&self, sym: Symbol) -> &'a str {
        self.symbols.get(sym)
    }

    fn write_line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn preamble(&mut self) {
        self.write_line("import time");
        self.write_line("");
        self.write_line("");
        self.write_line("class ArcanaQuotaExceeded(Exception):");
        self.indent += 1;
        self.write_line("pass");
        self.indent -= 1;
        self.write_line("");
        self.write_line("");
        self.write_line("_arcana_chronos = 0");
        self.write_line("");
        self.write_line("");
        self.write_line("def _arcana_chronos_next(_label):");
        self.indent += 1;
        self.write_line("global _arcana_chronos");
        self.write_line("_arcana_chronos += 1");
        self.write_line("return _arcana_chronos");
        self.indent -= 1;
        self.write_line("");
        self.write_line("");
    }

    fn emit(&mut self, program: &Program) {
        self.preamble();
        for item in &program.defines {
            self.emit_item(item);
        }
        self.emit_func_decl(&program.main);
        self.write_line("");
        self.write_line(&format!("{}()", self.name(program.main.name)));
    }

    fn emit_item(&mut self, item: &Item) {
        match item {
            Item::Decl(decl) => self.emit_decl(decl),
            Item::Stmt(stmt) => self.emit_stmt(stmt),
        }
    }

    fn emit_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Var(v) => self.emit_var_decl(v),
            Decl::Const(c) => self.emit_const_decl(c),
            Decl::Func(f) => self.emit_func_decl(f),
            // Classes are parsed but never semantically processed
            // ; nothing meaningful to lower.
            Decl::Class(_) => {}
        }
    }

    fn emit_var_decl(&mut self, v: &VarDecl) {
        let value = match &v.init {
            Some(e) => self.emit_expr(e),
            None => zero_value(v.ty).to_string(),
        };
        self.write_line(&format!("{} = {value}", self.name(v.name)));
    }

    fn emit_const_decl(&mut self, c: &ConstDecl) {
        let value = self.emit_expr(&c.init);
        self.write_line(&format!("{} = {value}", self.name(c.name)));
    }

    fn emit_func_decl(&mut self, f: &FuncDecl) {
        let params = f.params.iter().map(|(n, _)| self.name(*n)).collect::<Vec<_>>().join(", ");
        self.write_line(&format!("def {}({params}):", self.name(f.name)));
        self.indent += 1;
        self.emit_block(&f.body);
        self.indent -= 1;
        self.write_line("");
    }

    fn emit_block(&mut self, stmts: &[Stmt]) {
        if stmts.is_empty() {
            self.write_line("pass");
            return;
        }
        for stmt in stmts {
            self.emit_stmt(stmt);
        }
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { target, expr, .. } => {
                let value = self.emit_expr(expr);
                self.write_line(&format!("{} = {value}", self.name(*target)));
            }
            Stmt::Move { target, source, .. } => {
                self.write_line(&format!("{} = {}", self.name(*target), self.name(*source)));
            }
            Stmt::Call { callee, args, .. } => {
                let call = self.emit_call(*callee, args);
                self.write_line(&call);
            }
            Stmt::If { cond, verum, falsum, .. } => self.emit_if(cond, verum, falsum),
            Stmt::Loop { cond, quota, step, body, .. } => self.emit_loop(cond, quota, step, body),
            Stmt::ExprStmt { expr, .. } => {
                let value = self.emit_expr(expr);
                self.write_line(&value);
            }
            Stmt::NihilStmt { .. } => self.write_line("pass"),
            Stmt::Break { .. } => self.write_line("break"),
            Stmt::Continue { .. } => self.write_line("continue"),
            Stmt::Return { expr, .. } => match expr {
                Some(e) => {
                    let value = self.emit_expr(e);
                    self.write_line(&format!("return {value}"));
                }
                None => self.write_line("return"),
            },
        }
    }

    fn emit_if(&mut self, cond: &Expr, verum: &[Stmt], falsum: &[Stmt]) {
        let cond_text = self.emit_expr(cond);
        self.write_line(&format!("if {cond_text}:"));
        self.indent += 1;
        self.emit_block(verum);
        self.indent -= 1;
        if !falsum.is_empty() {
            self.write_line("else:");
            self.indent += 1;
            self.emit_block(falsum);
            self.indent -= 1;
        }
    }

    /// Lowers a `Loop` to a quota-guarded `while`: a counter (named by the
    /// `quota` binding, or synthetic at 0) advances by
    /// `step` (default 1, re-checked positive every iteration) each pass,
    /// alongside an independent iteration tally compared against the quota
    /// budget (the `quota` clause's plain-expression form, else the default
    /// of 100) that raises `ArcanaQuotaExceeded` on overrun (`R0100`).
    fn emit_loop(&mut self, cond: &Expr, quota: &Option<QuotaClause>, step: &Option<Expr>, body: &[Stmt]) {
        let seq = self.loop_seq;
        self.loop_seq += 1;

        let budget_expr = match quota {
            Some(QuotaClause::Value(e)) => self.emit_expr(e),
            _ => DEFAULT_QUOTA.to_string(),
        };
        let (counter_name, counter_init) = match quota {
            Some(QuotaClause::Binding { name, init }) => (self.name(*name).to_string(), self.emit_expr(init)),
            _ => (format!("_arcana_counter_{seq}"), "0".to_string()),
        };
        let budget_var = format!("_arcana_budget_{seq}");
        let iter_var = format!("_arcana_iter_{seq}");
        let step_var = format!("_arcana_step_{seq}");
        let step_text = step.as_ref().map(|e| self.emit_expr(e)).unwrap_or_else(|| "1".to_string());

        self.write_line(&format!("{budget_var} = {budget_expr}"));
        self.write_line(&format!("{iter_var} = 0"));
        self.write_line(&format!("{counter_name} = {counter_init}"));

        let cond_text = self.emit_expr(cond);
        self.write_line(&format!("while {cond_text}:"));
        self.indent += 1;
        self.write_line(&format!("if {iter_var} >= {budget_var}:"));
        self.indent += 1;
        self.write_line(&format!(
            "raise ArcanaQuotaExceeded('R0100: loop exceeded quota of ' + str({budget_var}))"
        ));
        self.indent -= 1;
        self.write_line(&format!("{iter_var} += 1"));
        self.emit_block(body);
        self.write_line(&format!("{step_var} = {step_text}"));
        self.write_line(&format!("if {step_var} <= 0:"));
        self.indent += 1;
        self.write_line("raise ValueError('E0110: loop step must be strictly positive')");
        self.indent -= 1;
        self.write_line(&format!("{counter_name} = {counter_name} + {step_var}"));
        self.indent -= 1;
    }

    fn emit_call(&mut self, callee: Symbol, args: &[Expr]) -> String {
        let arg_texts: Vec<String> = args.iter().map(|a| self.emit_expr(a)).collect();
        match self.name(callee) {
            "indicant" => format!("print({})", arg_texts.join(", ")),
            "accipere" => "input()".to_string(),
            "longitudo" => format!("len({})", arg_texts.first().cloned().unwrap_or_default()),
            "figura" => format!("type({}).__name__", arg_texts.first().cloned().unwrap_or_default()),
            "tempus" => "time.time()".to_string(),
            "chronos" => format!("_arcana_chronos_next({})", arg_texts.first().cloned().unwrap_or_default()),
            other => format!("{other}({})", arg_texts.join(", ")),
        }
    }

    fn emit_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::IntLit { value, .. } => value.to_string(),
            Expr::RealLit { value, .. } => format!("{value:?}"),
            Expr::StrLit { value, .. } => python_str_literal(self.name(*value)),
            Expr::Ident { name, .. } => self.name(*name).to_string(),
            Expr::FStrLit { parts, .. } => self.emit_fstring(parts),
            Expr::Call { callee, args, .. } => self.emit_call(*callee, args),
            Expr::DictLit { pairs, .. } => {
                let entries: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| {
                        let k = self.emit_expr(k);
                        let v = self.emit_expr(v);
                        format!("{k}: {v}")
                    })
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            Expr::Unary { op, operand, .. } => {
                let operand = self.emit_expr(operand);
                match op {
                    UnOp::Not => format!("(not {operand})"),
                    UnOp::Neg => format!("(-{operand})"),
                }
            }
            Expr::BinOp { op, lhs, rhs, .. } => {
                let lhs = self.emit_expr(lhs);
                let rhs = self.emit_expr(rhs);
                format!("({lhs} {} {rhs})", python_operator(*op))
            }
        }
    }

    fn emit_fstring(&mut self, parts: &[FStrPart]) -> String {
        if parts.is_empty() {
            return "''".to_string();
        }
        let pieces: Vec<String> = parts
            .iter()
            .map(|part| match part {
                FStrPart::Text(t) => python_str_literal(t),
                FStrPart::Expr(e) => {
                    let value = self.emit_expr(e);
                    format!("str({value})")
                }
            })
            .collect();
        format!("({})", pieces.join(" + "))
    }
}

fn zero_value(ty: Type) -> &'static str {
    match ty {
        Type::Inte => "0",
        Type::Real => "0.0",
        Type::Filum => "''",
        Type::Verum => "False",
        Type::Ordinata => "[]",
        Type::Catalogus => "{}",
        // Never a variable's declared type ; the
        // parser's `parse_type` has no production for it outside return
        // position, so this arm is unreachable from validated input.
        Type::Nihil => "None",
    }
}

/// Python division is always true division here; Arcana's type lattice
/// tracks `inte`/`real` for static compatibility only; it does not claim a
/// rounding mode, which the dynamic host is free to define for itself.
fn python_operator(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Pow => "**",
        BinOp::Eq => "==",
        BinOp::NotEq => "!=",
        BinOp::Lt => "<",
        BinOp::Gt => ">",
        BinOp::LtEq => "<=",
        BinOp::GtEq => ">=",
        BinOp::And => "and",
        BinOp::Or => "or",
    }
}

fn python_str_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}
