    use super::*;
    use epilog_parser::read;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const FAMILY: &str = "
        % a small family
        parent(art, bob). parent(bob, cal). parent(bob, cat).
        grandparent(X, Z) :- parent(X, Y) & parent(Y, Z).
        sibling(X, Y) :- parent(P, X) & parent(P, Y) & distinct(X, Y).
    ";

    fn term(text: &str) -> Term {
        read(text).expect("term should parse")
    }

    fn family() -> Session {
        let mut session = Session::new();
        session.load_str(FAMILY).expect("program should load");
        session
    }

    fn shown(answers: &Answers) -> Vec<String> {
        answers.answers.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_load_summary() {
        init_logging();
        let mut session = Session::new();
        let summary = session.load_str(FAMILY).expect("program should load");
        assert_eq!(summary, LoadSummary { facts: 3, rules: 2 });
        let again = session.load_str("parent(art, bob).").expect("fact should load");
        assert_eq!(again, LoadSummary::default());
    }

    #[test]
    fn test_ask_reports_bindings() {
        let session = family();
        let answers = session.ask(&term("grandparent(X, Z)"), None);
        assert_eq!(shown(&answers), vec!["X = art, Z = cal", "X = art, Z = cat"]);
        assert!(!answers.limit_reached);
        assert_eq!(answers.answers[0].get("Z"), Some(&term("cal")));
    }

    #[test]
    fn test_ask_with_limit_and_ground_queries() {
        let session = family();
        let answers = session.ask(&term("sibling(X, Y)"), Some(1));
        assert_eq!(shown(&answers), vec!["X = cal, Y = cat"]);

        let yes = session.ask(&term("parent(art, bob)"), None);
        assert_eq!(shown(&yes), vec!["true."]);
        assert!(session.ask(&term("parent(bob, art)"), None).answers.is_empty());
    }

    #[test]
    fn test_anonymous_variables_are_not_reported() {
        let session = family();
        let answers = session.ask(&term("parent(X, _)"), None);
        assert_eq!(shown(&answers), vec!["X = art", "X = bob"]);
    }

    #[test]
    fn test_facts_of_views_are_answered() {
        let mut session = family();
        session
            .load_str("grandparent(zed, amy).")
            .expect("fact should load");
        assert!(session.find_p(&term("grandparent(zed, amy)")));
        assert!(session.find_p(&term("grandparent(art, cal)")));
        assert!(session.remove_fact(&term("grandparent(zed, amy)")));
        assert!(!session.find_p(&term("grandparent(zed, amy)")));
    }

    #[test]
    fn test_unindexed_session_agrees() {
        let mut plain = Session::with_config(EngineConfig::default(), false);
        plain.load_str(FAMILY).expect("program should load");
        let indexed = family();
        for query in ["grandparent(X, Z)", "sibling(X, Y)", "parent(bob, X)"] {
            let query = term(query);
            assert_eq!(shown(&plain.ask(&query, None)), shown(&indexed.ask(&query, None)));
        }
    }

    #[test]
    fn test_check_reports_diagnostics() {
        let mut session = family();
        assert!(session.check().is_empty());
        session.load_str("p(X) :- q(Y).").expect("rule should load");
        let messages: Vec<String> = session.check().iter().map(ToString::to_string).collect();
        assert_eq!(messages, vec!["Unsafe rule: p(X) :- q(Y)"]);
    }

    #[test]
    fn test_stratification_scenarios() {
        let mut session = Session::new();
        session
            .load_str("item(a). item(b). p(X) :- item(X) & ~q(X). q(X) :- item(X) & ~p(X).")
            .expect("program should load");
        let negation = session
            .check()
            .into_iter()
            .filter(|d| matches!(d, Diagnostic::UnstratifiedNegation(_)))
            .count();
        assert_eq!(negation, 2);
    }

    #[test]
    fn test_read_errors_add_nothing() {
        let mut session = family();
        let before = session.sentences().len();
        let err = session
            .load_str("ok(a). broken(")
            .expect_err("text should not read");
        assert!(err.read_error().is_some());
        assert_eq!(session.sentences().len(), before);
    }

    #[test]
    fn test_missing_file() {
        let mut session = Session::new();
        let err = session
            .load_file(Path::new("/definitely/not/here.epl"))
            .expect_err("file should be missing");
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().starts_with("failed to read '/definitely/not/here.epl'"));
    }

    #[test]
    fn test_updates() {
        let mut session = Session::new();
        session
            .load_str(
                "at(home).
                 go(X) :: at(Y) ==> -at(Y) & +at(X) & *moved(X).
                 at(work) ==> +busy.",
            )
            .expect("program should load");
        let outputs = session.execute(&term("go(work)"));
        assert_eq!(outputs, vec![term("moved(work)")]);
        assert!(session.find_p(&term("at(work)")));
        assert!(!session.find_p(&term("at(home)")));

        session.update();
        assert!(session.find_p(&term("busy")));
    }
