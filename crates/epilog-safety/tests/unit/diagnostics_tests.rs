    use super::*;
    use epilog_parser::read_data;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn messages(text: &str) -> Vec<String> {
        let data = read_data(text).unwrap();
        find_errors(&data).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_clean_program_has_no_diagnostics() {
        init_logging();
        let errors = messages(
            "parent(a, b). parent(b, c).
             grandparent(X, Z) :- parent(X, Y) & parent(Y, Z).",
        );
        assert!(errors.is_empty(), "unexpected {:?}", errors);
    }

    #[test]
    fn test_unsafe_rule_message() {
        assert_eq!(messages("p(X) :- q(Y)."), vec!["Unsafe rule: p(X) :- q(Y)".to_string()]);
    }

    #[test]
    fn test_mixed_arity() {
        let errors = messages("p(a). p(a, b). q(c).");
        assert_eq!(errors, vec!["Mixed arity: p".to_string()]);
    }

    #[test]
    fn test_mutual_negation_is_unstratified() {
        let data = read_data("p(X) :- item(X) & ~q(X). q(X) :- item(X) & ~p(X).").unwrap();
        let errors = find_errors(&data);
        let negation: Vec<_> = errors
            .iter()
            .filter(|e| matches!(e, Diagnostic::UnstratifiedNegation(_)))
            .collect();
        assert_eq!(negation.len(), 2);
        assert_eq!(negation[0].sentence(), Some(&data[0]));
        assert_eq!(negation[1].sentence(), Some(&data[1]));
    }

    #[test]
    fn test_negation_of_lower_stratum_is_fine() {
        let errors = messages("item(a). item(b). q(a). p(X) :- item(X) & ~q(X).");
        assert!(errors.is_empty(), "unexpected {:?}", errors);
    }

    #[test]
    fn test_aggregate_over_own_stratum() {
        let errors = messages("p(N) :- countofall(X, p(X), N).");
        assert!(errors.iter().any(|e| e.starts_with("Unstratified Negation: ")));
    }

    #[test]
    fn test_unstratified_recursion() {
        let errors = messages("r(X, Y) :- r(Y, X).");
        assert!(errors.contains(&"Unstratified Recursion: r(X,Y) :- r(Y,X)".to_string()));
        let errors = messages("e(a, b). r(X, Y) :- e(X, Y) & r(Y, X).");
        assert!(errors.is_empty(), "unexpected {:?}", errors);
    }

    #[test]
    fn test_check_program_safety() {
        let rules = read_data("p(X) :- q(X). r(X) :- s(Y).").unwrap();
        let err = check_program_safety(&rules).unwrap_err();
        assert_eq!(err, Diagnostic::UnsafeRule(rules[1].clone()));
        assert!(check_rule_safety(&rules[0]).is_ok());
    }
