//! Semantic validation for Arcana: scope-tracked name resolution, type
//! inference over the closed type lattice, and the loop/break/quota
//! invariants a program must satisfy before it may be emitted.

mod error;
mod validator;

pub use arcana_par::ast::Type;
pub use error::SemError;
pub use validator::{Arity, Validator};

use arcana_par::ast::Program;
use arcana_util::StringTable;

/// Runs a `Validator` over an already-parsed program, returning the first
/// violation encountered (validation stops at the first error, matching the
/// parser's own fail-fast behavior).
#[tracing::instrument(level = "debug", skip_all, fields(items = program.defines.len()))]
pub fn validate_program(program: &Program, symbols: &mut StringTable) -> Result<(), SemError> {
    let result = Validator::new().validate(program, symbols);
    tracing::debug!(ok = result.is_ok(), "validation complete");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_par::parse_source;

    fn check(intro_and_doctrina: &str) -> Result<(), SemError> {
        let src = format!(
            "<FONS></FONS><INTRODUCTIO>{intro_and_doctrina}</INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {{ }};</DOCTRINA>"
        );
        let (program, mut symbols) = parse_source(&src).unwrap_or_else(|e| panic!("parse failed: {e}"));
        validate_program(&program, &mut symbols)
    }

    fn check_main(body: &str) -> Result<(), SemError> {
        let src = format!(
            "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {{ {body} }};</DOCTRINA>"
        );
        let (program, mut symbols) = parse_source(&src).unwrap_or_else(|e| panic!("parse failed: {e}"));
        validate_program(&program, &mut symbols)
    }

    fn check_with_intro(intro: &str, main_body: &str) -> Result<(), SemError> {
        let src = format!(
            "<FONS></FONS><INTRODUCTIO>{intro}</INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {{ {main_body} }};</DOCTRINA>"
        );
        let (program, mut symbols) = parse_source(&src).unwrap_or_else(|e| panic!("parse failed: {e}"));
        validate_program(&program, &mut symbols)
    }

    #[test]
    fn well_formed_program_validates() {
        assert!(check("").is_ok());
    }

    #[test]
    fn break_outside_loop_is_e0101() {
        let err = check_main("effigium;").unwrap_err();
        assert_eq!(err.code(), "E0101");
    }

    #[test]
    fn continue_outside_loop_is_e0102() {
        let err = check_main("proximum;").unwrap_err();
        assert_eq!(err.code(), "E0102");
    }

    #[test]
    fn break_inside_loop_is_fine() {
        let body = "RECURSIO(propositio:(1 < 2)) { effigium; }";
        assert!(check_main(body).is_ok());
    }

    #[test]
    fn four_deep_nested_loops_is_e0103() {
        let inner = "RECURSIO(propositio:(1 < 2)) { effigium; }";
        let l3 = format!("RECURSIO(propositio:(1 < 2)) {{ {inner} }}");
        let l2 = format!("RECURSIO(propositio:(1 < 2)) {{ {l3} }}");
        let l1 = format!("RECURSIO(propositio:(1 < 2)) {{ {l2} }}");
        let err = check_main(&l1).unwrap_err();
        assert_eq!(err.code(), "E0103");
    }

    #[test]
    fn three_deep_nested_loops_is_fine() {
        let inner = "RECURSIO(propositio:(1 < 2)) { effigium; }";
        let l2 = format!("RECURSIO(propositio:(1 < 2)) {{ {inner} }}");
        let l1 = format!("RECURSIO(propositio:(1 < 2)) {{ {l2} }}");
        assert!(check_main(&l1).is_ok());
    }

    #[test]
    fn nonpositive_literal_step_is_e0110() {
        let body = "RECURSIO(propositio:(1 < 2), acceleratio:(0 - 1)) { effigium; }";
        let err = check_main(body).unwrap_err();
        assert_eq!(err.code(), "E0110");
    }

    #[test]
    fn nonpositive_literal_quota_is_e0111() {
        let body = "RECURSIO(propositio:(1 < 2), quota:(0)) { effigium; }";
        let err = check_main(body).unwrap_err();
        assert_eq!(err.code(), "E0111");
    }

    #[test]
    fn call_arity_mismatch_is_e0203() {
        assert!(check_main("indicant() <- ();").is_ok(), "indicant is variadic and accepts zero args");
        let e = check_main("longitudo() <- ();").unwrap_err();
        assert_eq!(e.code(), "E0203");
    }

    #[test]
    fn declaring_string_into_integer_slot_is_e0204() {
        let err = check("VCON x: inte = 'not a number';").unwrap_err();
        assert_eq!(err.code(), "E0204");
    }

    #[test]
    fn integer_literal_widens_into_real_slot() {
        assert!(check("VCON x: real = 1;").is_ok());
    }

    #[test]
    fn nihil_call_used_as_value_is_e0202() {
        let err = check("VCON x: inte = indicant() <- ();").unwrap_err();
        assert_eq!(err.code(), "E0202");
    }

    #[test]
    fn undeclared_name_use_is_e0204() {
        let err = check_with_intro("VCON y: inte = 1;", "y <- z;").unwrap_err();
        assert_eq!(err.code(), "E0204");
    }

    #[test]
    fn undeclared_name_in_quota_value_is_e0204() {
        let body = "RECURSIO(propositio:(1 < 2), quota:(undeclared_var)) { effigium; }";
        let err = check_main(body).unwrap_err();
        assert_eq!(err.code(), "E0204");
    }

    #[test]
    fn undeclared_name_in_step_is_e0204() {
        let body = "RECURSIO(propositio:(1 < 2), acceleratio:(undeclared_var)) { effigium; }";
        let err = check_main(body).unwrap_err();
        assert_eq!(err.code(), "E0204");
    }
}
