    use super::*;
    use epilog_parser::read;
    use internment::Intern;

    fn rel(name: &str) -> Symbol {
        Intern::new(name.to_string())
    }

    fn rules(texts: &[&str]) -> Vec<Term> {
        texts.iter().map(|t| read(t).unwrap()).collect()
    }

    #[test]
    fn test_stratify_empty_program() {
        let result = stratify(&[]);
        assert_eq!(result.num_strata(), 0);
        assert!(result.strata.is_empty());
    }

    #[test]
    fn test_stratify_single_rule() {
        // p(X) :- q(X).
        let result = stratify(&rules(&["p(X) :- q(X)"]));
        assert_eq!(result.stratum(rel("q")), Some(0));
        assert_eq!(result.stratum(rel("p")), Some(1));
    }

    #[test]
    fn test_stratify_recursive_relation_is_one_component() {
        let result = stratify(&rules(&[
            "parent(a, b)",
            "ancestor(X, Y) :- parent(X, Y)",
            "ancestor(X, Z) :- parent(X, Y) & ancestor(Y, Z)",
        ]));
        assert_eq!(result.stratum(rel("parent")), Some(0));
        assert_eq!(result.stratum(rel("ancestor")), Some(1));
        assert_eq!(result.num_strata(), 2);
    }

    #[test]
    fn test_stratify_mutual_recursion_shares_stratum() {
        let result = stratify(&rules(&["p(X) :- q(X)", "q(X) :- p(X)", "q(X) :- r(X)"]));
        assert_eq!(result.stratum(rel("p")), result.stratum(rel("q")));
        assert!(result.stratum(rel("r")) < result.stratum(rel("p")));
    }

    #[test]
    fn test_stratify_negation_places_dependency_below() {
        // p(X) :- q(X) & ~r(X).
        let result = stratify(&rules(&["p(X) :- q(X) & ~r(X)"]));
        let p = result.stratum(rel("p")).unwrap();
        assert!(result.stratum(rel("q")).unwrap() < p);
        assert!(result.stratum(rel("r")).unwrap() < p);
    }

    #[test]
    fn test_stratify_chain() {
        let result = stratify(&rules(&["a(X) :- b(X)", "b(X) :- c(X)"]));
        let (a, b, c) = (
            result.stratum(rel("a")).unwrap(),
            result.stratum(rel("b")).unwrap(),
            result.stratum(rel("c")).unwrap(),
        );
        assert!(c < b && b < a);
    }

    #[test]
    fn test_update_markers_are_not_relations() {
        let result = stratify(&rules(&["pos(a(X)) :- q(X)"]));
        assert!(result.stratum(rel("pos")).is_none());
        assert!(result.stratum(rel("a")).is_some());
    }

    #[test]
    fn test_builtins_are_not_relations() {
        let data = rules(&["p(X, Y) :- q(X) & plus(X, 1, Y) & distinct(X, Y)"]);
        assert_eq!(all_relations(&data), vec![rel("p"), rel("q")]);
    }

    #[test]
    fn test_aggregates_are_looked_through() {
        let data = rules(&["n(N) :- countofall(X, q(X), N)"]);
        assert_eq!(all_relations(&data), vec![rel("n"), rel("q")]);
    }
