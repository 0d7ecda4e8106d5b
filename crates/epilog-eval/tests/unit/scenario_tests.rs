    use super::*;
    use epilog_core::IndexMode;
    use epilog_parser::{grind, read, read_data};

    fn term(text: &str) -> Term {
        read(text).expect("term should parse")
    }

    fn theory(mode: IndexMode, text: &str) -> Theory {
        Theory::from_terms(mode, read_data(text).expect("data should parse"))
    }

    #[test]
    fn test_grandparent() {
        let facts = theory(IndexMode::Full, "parent(a,b). parent(b,c).");
        let rules = theory(IndexMode::Rule, "grandparent(X,Z) :- parent(X,Y) & parent(Y,Z).");
        let answers = find_all(&term("answer(X,Z)"), &term("grandparent(X,Z)"), &facts, &rules);
        assert_eq!(answers, vec![term("answer(a,c)")]);
    }

    #[test]
    fn test_negation_over_generator() {
        let facts = theory(IndexMode::Full, "item(a). item(b). q(a).");
        let rules = theory(IndexMode::Rule, "p(X) :- item(X) & ~q(X).");
        let answers = find_all(&term("X"), &term("p(X)"), &facts, &rules);
        assert_eq!(answers, vec![term("b")]);
    }

    #[test]
    fn test_hypothetical_move() {
        let facts = theory(IndexMode::Full, "on(block1,table).");
        let adds = theory(IndexMode::Full, "on(block1,block2).");
        let dels = theory(IndexMode::Full, "on(block1,table).");
        let rules = Theory::rules();

        let answers = hypo_find_all(&term("W"), &term("on(block1,W)"), &adds, &dels, &facts, &rules);
        assert_eq!(answers, vec![term("block2")]);
        assert!(!hypo_find_p(&term("on(block1,table)"), &adds, &dels, &facts, &rules));

        // the facts themselves are untouched
        let answers = find_all(&term("W"), &term("on(block1,W)"), &facts, &rules);
        assert_eq!(answers, vec![term("table")]);
    }

    #[test]
    fn test_hypothetical_through_rules() {
        let facts = theory(IndexMode::Full, "on(a,table). on(b,table).");
        let rules = theory(IndexMode::Rule, "clear(X) :- on(X,table) & ~on(Y,X).");
        let adds = theory(IndexMode::Full, "on(b,a).");
        let dels = theory(IndexMode::Full, "on(b,table).");
        let answers = hypo_find_all(&term("X"), &term("clear(X)"), &adds, &dels, &facts, &rules);
        assert!(answers.is_empty());
        let answers = find_all(&term("X"), &term("clear(X)"), &facts, &rules);
        assert_eq!(answers.iter().map(grind).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_value_and_find_n() {
        let facts = theory(IndexMode::Full, "n(1). n(2). n(3).");
        let rules = Theory::rules();
        assert_eq!(value(&term("countofall(X, n(X))"), &facts, &rules), Some(term("3")));
        assert_eq!(find_n(2, &term("X"), &term("n(X)"), &facts, &rules).len(), 2);
        assert_eq!(find_any(&term("X"), &term("n(X) & distinct(X, 1)"), &facts, &rules), Some(term("2")));
        assert!(find_p(&term("n(3)"), &facts, &rules));
    }
