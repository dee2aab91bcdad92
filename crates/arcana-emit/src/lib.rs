mod emitter;

pub use emitter::{emit_program, Emitter};

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_par::parse_source;

    fn emit(src: &str) -> String {
        let (program, symbols) = parse_source(src).unwrap_or_else(|e| panic!("parse failed: {e}"));
        emit_program(&program, &symbols)
    }

    #[test]
    fn preamble_is_present_and_subjecto_is_invoked_last() {
        let out = emit("<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> { };</DOCTRINA>");
        assert!(out.contains("import time"));
        assert!(out.contains("class ArcanaQuotaExceeded(Exception):"));
        assert!(out.contains("_arcana_chronos = 0"));
        assert!(out.contains("def _arcana_chronos_next(_label):"));
        assert!(out.trim_end().ends_with("subjecto()"));
    }

    #[test]
    fn var_decl_without_init_lowers_to_its_type_zero_value() {
        let out = emit(
            "<FONS></FONS><INTRODUCTIO>VCON n: inte; VCON s: filum; VCON d: catalogus;</INTRODUCTIO>\
             <DOCTRINA>FCON subjecto: nihil () -> { };</DOCTRINA>",
        );
        assert!(out.contains("n = 0"));
        assert!(out.contains("s = ''"));
        assert!(out.contains("d = {}"));
    }

    #[test]
    fn builtin_calls_route_to_host_equivalents() {
        let out = emit(
            "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {\
             indicant() <- ('salve');\
             VCON n: inte = longitudo() <- ('salve');\
             VCON t: filum = figura() <- (n);\
             };</DOCTRINA>",
        );
        assert!(out.contains("print('salve')"));
        assert!(out.contains("n = len('salve')"));
        assert!(out.contains("t = type(n).__name__"));
    }

    #[test]
    fn move_and_assign_lower_to_python_assignment() {
        let out = emit(
            "<FONS></FONS><INTRODUCTIO>VCON x: inte = 1; VCON y: inte = 2;</INTRODUCTIO>\
             <DOCTRINA>FCON subjecto: nihil () -> { x = 3; x <- y; };</DOCTRINA>",
        );
        assert!(out.contains("x = 3"));
        assert!(out.contains("x = y"));
    }

    #[test]
    fn if_without_falsum_omits_else() {
        let out = emit(
            "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {\
             SI propositio:(1 < 2) VERUM { effigium; } };</DOCTRINA>",
        );
        assert!(out.contains("if (1 < 2):"));
        assert!(!out.contains("else:"));
    }

    #[test]
    fn if_with_falsum_emits_else() {
        let out = emit(
            "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {\
             RECURSIO(propositio:(1 < 2)) {\
             SI propositio:(1 < 2) VERUM { effigium; } FALSUM { proximum; } };};</DOCTRINA>",
        );
        assert!(out.contains("else:"));
    }

    #[test]
    fn quota_guarded_loop_emits_budget_and_step_checks() {
        let out = emit(
            "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {\
             RECURSIO(propositio:(1 < 2), quota:(10), acceleratio:(1)) { effigium; } };</DOCTRINA>",
        );
        assert!(out.contains("_arcana_budget_0 = 10"));
        assert!(out.contains("_arcana_iter_0 = 0"));
        assert!(out.contains("raise ArcanaQuotaExceeded('R0100: loop exceeded quota of ' + str(_arcana_budget_0))"));
        assert!(out.contains("raise ValueError('E0110: loop step must be strictly positive')"));
    }

    #[test]
    fn quota_binding_form_names_the_loop_counter() {
        let out = emit(
            "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {\
             RECURSIO(propositio:(1 < 2), quota:(i = 0)) { effigium; } };</DOCTRINA>",
        );
        assert!(out.contains("i = 0"));
        assert!(out.contains("_arcana_budget_0 = 100"));
    }

    #[test]
    fn fstring_lowers_to_concatenated_str_coercions() {
        let out = emit(
            "<FONS></FONS><INTRODUCTIO>VCON n: inte = 1;</INTRODUCTIO>\
             <DOCTRINA>FCON subjecto: nihil () -> { indicant() <- (cantus'n=${n}'); };</DOCTRINA>",
        );
        assert!(out.contains("'n=' + str(n)"));
    }
}
