    use super::*;
    use epilog_ast::cons;
    use internment::Intern;

    fn v(name: &str) -> Symbol {
        Intern::new(name.to_string())
    }

    fn parent(a: Term, b: Term) -> Term {
        Term::compound("parent", vec![a, b])
    }

    #[test]
    fn test_matcher_binds_pattern_variables() {
        let pattern = parent(Term::var("X"), Term::sym("bob"));
        let term = parent(Term::sym("art"), Term::sym("bob"));
        let bl = matcher(&pattern, &term).unwrap();
        assert_eq!(bl.get(&v("X")), Some(&Term::sym("art")));
        assert_eq!(bl.len(), 1);
    }

    #[test]
    fn test_matcher_is_one_directional() {
        let pattern = parent(Term::sym("art"), Term::sym("bob"));
        let term = parent(Term::var("X"), Term::sym("bob"));
        assert!(matcher(&pattern, &term).is_none());
    }

    #[test]
    fn test_matcher_repeated_variable_must_agree() {
        let pattern = Term::compound("p", vec![Term::var("X"), Term::var("X")]);
        assert!(matcher(&pattern, &Term::compound("p", vec![Term::sym("a"), Term::sym("a")])).is_some());
        assert!(matcher(&pattern, &Term::compound("p", vec![Term::sym("a"), Term::sym("b")])).is_none());
    }

    #[test]
    fn test_functor_or_arity_mismatch_fails() {
        let p = Term::compound("p", vec![Term::var("X")]);
        assert!(unifier(&p, &Term::compound("q", vec![Term::sym("a")])).is_none());
        assert!(unifier(&p, &Term::compound("p", vec![Term::sym("a"), Term::sym("b")])).is_none());
        assert!(unifier(&Term::sym("a"), &Term::sym("b")).is_none());
    }

    #[test]
    fn test_unify_is_symmetric_on_plugged_result() {
        let x = parent(Term::var("X"), Term::compound("f", vec![Term::sym("c")]));
        let y = parent(Term::sym("a"), Term::var("Y"));
        let forward = unifier(&x, &y).unwrap();
        let backward = unifier(&y, &x).unwrap();
        assert_eq!(plug(&x, &forward), plug(&y, &forward));
        assert_eq!(plug(&x, &backward), plug(&y, &backward));
        assert_eq!(plug(&x, &forward), plug(&x, &backward));
    }

    #[test]
    fn test_unify_through_bound_variable() {
        let bl = Bindings::new().with(v("X"), Term::sym("a"));
        assert!(unify(&Term::var("X"), &Term::sym("a"), bl.clone()).is_some());
        assert!(unify(&Term::var("X"), &Term::sym("b"), bl).is_none());
    }

    #[test]
    fn test_unify_occurs_check() {
        let x = Term::var("X");
        let fx = Term::compound("f", vec![Term::var("X")]);
        assert!(unifier(&x, &fx).is_none());
    }

    #[test]
    fn test_failed_unify_leaves_input_untouched() {
        let bl = Bindings::new().with(v("Z"), Term::sym("z"));
        let x = Term::compound("p", vec![Term::var("X"), Term::sym("a")]);
        let y = Term::compound("p", vec![Term::sym("b"), Term::sym("c")]);
        assert!(unify(&x, &y, bl.clone()).is_none());
        assert_eq!(bl.len(), 1);
        assert!(!bl.contains(&v("X")));
    }

    #[test]
    fn test_plug_chains_and_leaves_unbound() {
        let bl = Bindings::new()
            .with(v("X"), Term::var("Y"))
            .with(v("Y"), Term::sym("b"));
        let t = Term::compound("p", vec![Term::var("X"), Term::var("Z")]);
        assert_eq!(plug(&t, &bl), Term::compound("p", vec![Term::sym("b"), Term::var("Z")]));
        assert_eq!(bl.to_map().get(&v("X")), Some(&Term::sym("b")));
    }

    #[test]
    fn test_standardize_renames_consistently() {
        let mut names = NameGenerator::new();
        let t = Term::compound("p", vec![Term::var("X"), Term::var("Y"), Term::var("X")]);
        let s = standardize(&t, &mut names);
        assert_eq!(
            s,
            Term::compound("p", vec![Term::var("V1"), Term::var("V2"), Term::var("V1")])
        );
        assert!(matcher(&s, &t).is_some());
    }

    #[test]
    fn test_lists_unify_elementwise() {
        let pattern = cons(Term::var("H"), Term::var("T"));
        let list = Term::list(vec![Term::sym("a"), Term::sym("b")]);
        let bl = unifier(&pattern, &list).unwrap();
        assert_eq!(bl.get(&v("H")), Some(&Term::sym("a")));
        assert_eq!(plug(&Term::var("T"), &bl), Term::list(vec![Term::sym("b")]));
    }
