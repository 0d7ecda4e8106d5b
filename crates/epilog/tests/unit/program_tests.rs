    use super::*;
    use epilog_parser::{read, read_data};

    fn term(text: &str) -> Term {
        read(text).expect("term should parse")
    }

    fn names(symbols: Vec<Symbol>) -> Vec<String> {
        symbols.iter().map(|s| s.as_str().to_string()).collect()
    }

    #[test]
    fn test_split_program() {
        let data = read_data(
            "parent(a,b). anc(z,z).
             anc(X,Y) :- parent(X,Y).
             move(X) :: +at(X).
             double(X) := times(X,2).",
        )
        .expect("data should parse");
        let (facts, rules) = split_program(data, IndexMode::Full, IndexMode::Rule);
        assert_eq!(facts.to_vec(), vec![term("parent(a,b)")]);
        assert_eq!(rules.len(), 4);
        assert!(rules.contains(&term("anc(z,z)")));
    }

    #[test]
    fn test_rule_sentences() {
        assert!(is_rule_sentence(&term("p(X) :- q(X)")));
        assert!(is_rule_sentence(&term("p ==> +q")));
        assert!(is_rule_sentence(&term("go :: +went")));
        assert!(is_rule_sentence(&term("f(X) := X")));
        assert!(!is_rule_sentence(&term("p(a)")));
    }

    #[test]
    fn test_insert_rule_moves_facts() {
        let mut facts = Theory::facts();
        let mut rules = Theory::rules();
        assert!(insert_fact(term("p(a)"), &mut facts, &mut rules));
        assert!(insert_fact(term("q(b)"), &mut facts, &mut rules));
        assert!(insert_rule(term("p(X) :- q(X)"), &mut facts, &mut rules));
        assert_eq!(facts.to_vec(), vec![term("q(b)")]);
        assert!(rules.contains(&term("p(a)")));

        // later facts of a view go to the rules as well
        assert!(insert_fact(term("p(c)"), &mut facts, &mut rules));
        assert!(rules.contains(&term("p(c)")));
        assert!(!insert_fact(term("p(c)"), &mut facts, &mut rules));

        assert!(uninsert_fact(&term("p(c)"), &mut facts, &mut rules));
        assert!(!rules.contains(&term("p(c)")));
        assert!(uninsert_rule(&term("p(X) :- q(X)"), &mut rules));
        assert!(!uninsert_rule(&term("p(X) :- q(X)"), &mut rules));
    }

    #[test]
    fn test_bases_and_views() {
        let data = read_data(
            "e(a,b). e(b,c). label(a). path(z,z).
             path(X,Y) :- e(X,Y).
             path(X,Z) :- e(X,Y) & path(Y,Z).
             tick ==> +ticked.",
        )
        .expect("data should parse");
        let (facts, rules) = split_program(data, IndexMode::Full, IndexMode::Rule);
        assert_eq!(names(get_bases(&facts, &rules)), vec!["e", "label"]);
        assert_eq!(names(get_views(&rules)), vec!["path"]);
        let path = term("path").as_symbol().expect("symbol");
        assert!(is_view(path, &rules));
    }

    #[test]
    fn test_define() {
        let mut facts = Theory::facts();
        define_facts(read_data("a. b.").expect("data should parse"), &mut facts);
        define_more_facts(vec![term("c")], &mut facts);
        assert_eq!(facts.len(), 3);
        define_facts(vec![term("d")], &mut facts);
        assert_eq!(facts.to_vec(), vec![term("d")]);

        let mut rules = Theory::rules();
        define_rules(vec![term("p :- q")], &mut rules);
        define_more_rules(vec![term("r :- q")], &mut rules);
        assert_eq!(names(get_views(&rules)), vec!["p", "r"]);
    }
