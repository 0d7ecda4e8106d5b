    use super::*;
    use epilog_parser::read;

    fn safe(text: &str) -> bool {
        is_safe(&read(text).unwrap())
    }

    #[test]
    fn test_safe_rule() {
        assert!(safe("p(X) :- q(X)"));
        assert!(safe("grandparent(X, Z) :- parent(X, Y) & parent(Y, Z)"));
    }

    #[test]
    fn test_unsafe_head_variable() {
        assert!(!safe("p(X) :- q(Y)"));
    }

    #[test]
    fn test_negation_only_requires_bound_arguments() {
        assert!(safe("p(X) :- q(X) & ~r(X)"));
        assert!(!safe("p(X) :- ~r(X)"));
        assert!(!safe("p(X) :- ~r(X) & q(X)"));
    }

    #[test]
    fn test_distinct_and_same_bind_nothing() {
        assert!(!safe("p(X, Y) :- q(X) & distinct(X, Y)"));
        assert!(safe("p(X, Y) :- q(X) & q(Y) & distinct(X, Y)"));
        assert!(!safe("p(X) :- same(X, a)"));
    }

    #[test]
    fn test_builtin_binds_last_argument() {
        assert!(safe("p(Y) :- q(X) & plus(X, 1, Y)"));
        assert!(!safe("p(Y) :- plus(X, 1, Y)"));
        assert!(safe("p(Y) :- q(X) & sqrt(X, Y)"));
        assert!(safe("p(S) :- q(L) & sum(L, S)"));
    }

    #[test]
    fn test_aggregate_binds_result() {
        assert!(safe("p(N) :- countofall(X, q(X), N)"));
        assert!(safe("p(L) :- setofall(X, q(X, Y), L)"));
        assert!(!safe("p(N) :- countofall(X, q(Y), N)"));
    }

    #[test]
    fn test_facts_must_be_ground() {
        assert!(safe("p(a, b)"));
        assert!(safe("go"));
        assert!(!safe("p(X)"));
    }

    #[test]
    fn test_transitions_and_definitions() {
        assert!(safe("q(X) ==> r(X)"));
        assert!(!safe("q(X) ==> r(Y)"));
        assert!(safe("f(X) := g(X)"));
        assert!(!safe("f(X) := g(Y)"));
    }
