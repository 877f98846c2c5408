use lidrup_check::{
    checker::Checker,
    config::{Config, Mode},
    types::err::{ErrorKind, LineErrorKind},
};

fn check_alone(lidrup: &str) -> (Checker, Result<(), ErrorKind>) {
    let mut checker = Checker::new(Config::default());
    let result = checker.check(None::<&[u8]>, lidrup.as_bytes());
    (checker, result)
}

fn check_alone_with(config: Config, lidrup: &str) -> Result<(), ErrorKind> {
    Checker::new(config).check(None::<&[u8]>, lidrup.as_bytes())
}

fn line_error_kind(result: Result<(), ErrorKind>) -> LineErrorKind {
    match result {
        Err(ErrorKind::Line(e)) => e.kind,
        other => panic!("expected a line error, found {other:?}"),
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn weaken_then_restore_is_inert() {
        let lidrup = "p lidrup
i 1 1 0
i 2 -1 2 0
w 2 0
r 2 0
q 0
l 3 2 0 1 2 0
s SATISFIABLE
m 1 2 0
";
        let (checker, result) = check_alone(lidrup);
        assert!(result.is_ok());
        assert_eq!(checker.counters().weakenings, 1);
        assert_eq!(checker.counters().restorations, 1);
    }

    #[test]
    fn weakened_clauses_may_not_resolve() {
        let lidrup = "p lidrup
i 1 1 0
i 2 -1 2 0
w 2 0
l 3 2 0 1 2 0
";
        let (_, result) = check_alone(lidrup);
        assert_eq!(line_error_kind(result), LineErrorKind::WeakenedAntecedent(2));
    }

    #[test]
    fn missing_antecedents_are_reported() {
        let lidrup = "p lidrup
i 1 1 0
l 3 2 0 1 9 0
";
        let (_, result) = check_alone(lidrup);
        assert_eq!(line_error_kind(result), LineErrorKind::UnknownAntecedent(9));
    }

    #[test]
    fn unresolvable_antecedents_are_reported() {
        // Under no assumptions the antecedent keeps two unfalsified literals.
        let lidrup = "p lidrup
i 1 1 2 0
l 2 0 1 0
";
        let (_, result) = check_alone(lidrup);
        assert_eq!(
            line_error_kind(result),
            LineErrorKind::UnresolvableAntecedent(1)
        );
    }

    #[test]
    fn negative_antecedents_are_reserved() {
        let lidrup = "p lidrup
i 1 1 0
l 2 1 0 -1 0
";
        let (_, result) = check_alone(lidrup);
        assert_eq!(line_error_kind(result), LineErrorKind::NegativeAntecedent(-1));
    }

    #[test]
    fn deleting_the_missing_and_the_weakened() {
        let lidrup = "p lidrup
i 1 1 0
d 2 0
";
        let (_, result) = check_alone(lidrup);
        assert_eq!(line_error_kind(result), LineErrorKind::UnknownClause(2));

        let lidrup = "p lidrup
i 1 1 0
w 1 0
d 1 0
";
        let (_, result) = check_alone(lidrup);
        assert_eq!(line_error_kind(result), LineErrorKind::WeakenedClause(1));
    }

    #[test]
    fn restoring_the_unweakened() {
        let lidrup = "p lidrup
i 1 1 0
r 1 0
";
        let (_, result) = check_alone(lidrup);
        assert_eq!(line_error_kind(result), LineErrorKind::NotWeakened(1));
    }

    #[test]
    fn identifier_reuse_follows_the_configuration() {
        let reuse = "p lidrup
i 1 1 0
d 1 0
i 1 2 0
";
        let (_, result) = check_alone(reuse);
        assert!(result.is_ok());

        assert_eq!(
            line_error_kind(check_alone_with(
                Config {
                    no_reuse: true,
                    ..Config::default()
                },
                reuse,
            )),
            LineErrorKind::UsedIdentifier(1)
        );
    }

    #[test]
    fn live_identifiers_are_never_reusable() {
        let lidrup = "p lidrup
i 7 1 0
i 7 2 0
";
        let (_, result) = check_alone(lidrup);
        assert_eq!(line_error_kind(result), LineErrorKind::ActiveIdentifier(7));

        let weakened = "p lidrup
i 7 1 0
w 7 0
i 7 2 0
";
        let (_, result) = check_alone(weakened);
        assert_eq!(line_error_kind(result), LineErrorKind::ActiveIdentifier(7));
    }
}

mod boundaries {
    use super::*;

    #[test]
    fn tautological_lemmas_need_no_antecedents() {
        let lidrup = "p lidrup
i 1 1 0
l 2 2 -2 0 0
";
        let (checker, result) = check_alone(lidrup);
        assert!(result.is_ok());
        assert_eq!(checker.counters().lemmas, 1);
    }

    #[test]
    fn empty_lemmas_require_inconsistency() {
        let consistent = "p lidrup
i 1 1 0
l 2 0 0
";
        let (_, result) = check_alone(consistent);
        assert_eq!(line_error_kind(result), LineErrorKind::ResolutionFailed);

        let inconsistent = "p lidrup
i 1 0
l 2 0 0
";
        let (_, result) = check_alone(inconsistent);
        assert!(result.is_ok());
    }

    #[test]
    fn everything_is_implied_once_inconsistent() {
        let lidrup = "p lidrup
i 1 0
l 2 1 0 0
l 3 -1 0 0
";
        let (checker, result) = check_alone(lidrup);
        assert!(result.is_ok());
        assert_eq!(checker.counters().lemmas, 2);
    }

    #[test]
    fn duplicate_literals_collapse() {
        // The stored clause drops repeats, which the model check then traverses.
        let lidrup = "p lidrup
i 1 1 1 2 2 0
q 0
s SATISFIABLE
m 1 2 0
";
        let (_, result) = check_alone(lidrup);
        assert!(result.is_ok());
    }

    #[test]
    fn pedantic_mode_requires_headers() {
        let headerless = "i 1 1 0\n";

        let (_, result) = check_alone(headerless);
        assert!(result.is_ok());

        let result = check_alone_with(
            Config {
                mode: Mode::Pedantic,
                ..Config::default()
            },
            headerless,
        );
        assert!(matches!(result, Err(ErrorKind::Parse(_))));
    }
}
