use lidrup_check::{
    checker::Checker,
    config::Config,
    types::err::{CheckErrorKind, ErrorKind, LineErrorKind},
};

fn check_pair(icnf: &str, lidrup: &str) -> Result<(), ErrorKind> {
    let mut checker = Checker::new(Config::default());
    checker.check(Some(icnf.as_bytes()), lidrup.as_bytes())
}

fn check_error_kind(result: Result<(), ErrorKind>) -> CheckErrorKind {
    match result {
        Err(ErrorKind::Check(e)) => e.kind,
        other => panic!("expected a check error, found {other:?}"),
    }
}

mod cores {
    use super::*;

    #[test]
    fn a_core_outside_the_query() {
        let icnf = "p icnf
i 1 2 0
i -1 0
q 2 0
s UNSATISFIABLE
u 1 0
";
        let lidrup = "p lidrup
i 1 1 2 0
i 2 -1 0
q 2 0
s UNSATISFIABLE
u 1 0 1 2 0
";
        assert_eq!(
            check_error_kind(check_pair(icnf, lidrup)),
            CheckErrorKind::CoreNotInQuery(1)
        );
    }

    #[test]
    fn a_proof_core_outside_the_query() {
        // The interaction reports failed assumptions, so only the proof's core is off.
        let icnf = "p icnf
i -1 0
q 2 0
s UNSATISFIABLE
f 2 0
";
        let lidrup = "p lidrup
i 1 -1 0
q 2 0
s UNSATISFIABLE
u 1 0 1 0
";
        assert_eq!(
            check_error_kind(check_pair(icnf, lidrup)),
            CheckErrorKind::CoreNotInQuery(1)
        );
    }

    #[test]
    fn matching_cores_verify() {
        let icnf = "p icnf
i -1 -2 0
q 1 2 0
s UNSATISFIABLE
u 1 2 0
";
        let lidrup = "p lidrup
i 1 -1 -2 0
q 1 2 0
s UNSATISFIABLE
u 1 2 0 1 0
";
        assert!(check_pair(icnf, lidrup).is_ok());
    }

    #[test]
    fn cores_unequal_to_the_interaction_core() {
        let icnf = "p icnf
i -1 -2 0
q 1 2 0
s UNSATISFIABLE
u 1 2 0
";
        let lidrup = "p lidrup
i 1 -1 -2 0
q 1 2 0
s UNSATISFIABLE
u 1 0 1 0
";
        assert!(matches!(
            check_error_kind(check_pair(icnf, lidrup)),
            CheckErrorKind::LineMismatch { .. }
        ));
    }

    #[test]
    fn cores_clashing_with_failed_assumptions() {
        // The failed set lists -1, so a core containing 1 is rejected.
        let icnf = "p icnf
i -1 0
i 1 2 0
q 1 -2 0
s UNSATISFIABLE
f -2 1 0
";
        let lidrup = "p lidrup
i 1 -1 0
i 2 1 2 0
q 1 -2 0
s UNSATISFIABLE
u 1 0 1 0
";
        let icnf_clash = icnf.replace("f -2 1 0", "f -1 0");
        assert_eq!(
            check_error_kind(check_pair(&icnf_clash, lidrup)),
            CheckErrorKind::CoreClashesWithFailed(1)
        );
    }

    #[test]
    fn failed_assumptions_may_be_a_strict_subset() {
        let icnf = "p icnf
i -1 0
i 1 2 0
q 1 3 0
s UNSATISFIABLE
f 1 0
";
        let lidrup = "p lidrup
i 1 -1 0
i 2 1 2 0
q 1 3 0
s UNSATISFIABLE
u 1 0 1 0
";
        assert!(check_pair(icnf, lidrup).is_ok());
    }

    #[test]
    fn failed_assumptions_outside_the_query() {
        let icnf = "p icnf
i -1 0
q 1 0
s UNSATISFIABLE
f 1 2 0
";
        let lidrup = "p lidrup
i 1 -1 0
q 1 0
s UNSATISFIABLE
u 1 0 1 0
";
        assert_eq!(
            check_error_kind(check_pair(icnf, lidrup)),
            CheckErrorKind::FailedNotInQuery(2)
        );
    }

    #[test]
    fn failed_assumptions_may_flip_polarity() {
        // The variable of each failed literal must be in the query, with either polarity.
        let icnf = "p icnf
i -1 0
q 1 3 0
s UNSATISFIABLE
f 1 -3 0
";
        let lidrup = "p lidrup
i 1 -1 0
q 1 3 0
s UNSATISFIABLE
u 1 0 1 0
";
        assert!(check_pair(icnf, lidrup).is_ok());
    }

    #[test]
    fn inconsistent_conclusions_are_rejected() {
        let icnf = "p icnf
i -1 0
q 1 0
s UNSATISFIABLE
u 1 1 0
";
        let lidrup = "p lidrup
i 1 -1 0
q 1 0
s UNSATISFIABLE
u 1 0 1 0
";
        let icnf_bad = icnf.replace("u 1 1 0", "u 1 -1 0");
        assert_eq!(
            check_error_kind(check_pair(&icnf_bad, lidrup)),
            CheckErrorKind::InconsistentLine
        );
    }

    #[test]
    fn cores_must_be_refuted_by_resolution() {
        // The listed antecedent propagates without reaching a conflict.
        let icnf = "p icnf
i -1 2 0
q 1 0
s UNSATISFIABLE
u 1 0
";
        let lidrup = "p lidrup
i 1 -1 2 0
q 1 0
s UNSATISFIABLE
u 1 0 1 0
";
        match check_pair(icnf, lidrup) {
            Err(ErrorKind::Line(e)) => {
                assert_eq!(e.kind, LineErrorKind::ResolutionFailed);
                assert_eq!(e.text, "u 1 0 1 0");
            }
            other => panic!("expected a line error, found {other:?}"),
        }
    }
}
