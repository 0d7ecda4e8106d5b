    use super::*;
    use crate::error::ReadStage;
    use crate::printer::grind;
    use epilog_ast::nil;

    fn c(functor: &str, args: Vec<Term>) -> Term {
        Term::compound(functor, args)
    }

    fn s(name: &str) -> Term {
        Term::sym(name)
    }

    fn v(name: &str) -> Term {
        Term::var(name)
    }

    #[test]
    fn test_read_atoms_and_variables() {
        assert_eq!(read("parent(art, bob)").unwrap(), c("parent", vec![s("art"), s("bob")]));
        assert_eq!(read("X").unwrap(), v("X"));
        assert_eq!(read("go").unwrap(), s("go"));
        assert_eq!(read("go.").unwrap(), s("go"));
        assert_eq!(read("3.14").unwrap(), s("3.14"));
        assert_eq!(read("a-b").unwrap(), s("a-b"));
        assert_eq!(read("\"hello world\"").unwrap(), s("\"hello world\""));
    }

    #[test]
    fn test_anonymous_variables_are_distinct() {
        assert_eq!(read("p(_, _)").unwrap(), c("p", vec![v("_1"), v("_2")]));
        let mut names = NameGenerator::starting_at(5);
        assert_eq!(read_with("q(_)", &mut names).unwrap(), c("q", vec![v("_6")]));
    }

    #[test]
    fn test_read_rule_spreads_conjunctive_body() {
        let rule = read("p(X) :- q(X) & ~r(X)").unwrap();
        assert_eq!(
            rule,
            Term::rule(
                c("p", vec![v("X")]),
                vec![c("q", vec![v("X")]), Term::negation(c("r", vec![v("X")]))]
            )
        );
        assert_eq!(
            read("p :- q").unwrap(),
            Term::rule(s("p"), vec![s("q")])
        );
    }

    #[test]
    fn test_precedence_and_flattening() {
        assert_eq!(
            read("a & b | c").unwrap(),
            c("or", vec![c("and", vec![s("a"), s("b")]), s("c")])
        );
        assert_eq!(
            read("a | b & c").unwrap(),
            c("or", vec![s("a"), c("and", vec![s("b"), s("c")])])
        );
        assert_eq!(read("a & b & c").unwrap(), c("and", vec![s("a"), s("b"), s("c")]));
        assert_eq!(
            read("(a | b) & c").unwrap(),
            c("and", vec![c("or", vec![s("a"), s("b")]), s("c")])
        );
    }

    #[test]
    fn test_prefix_operators() {
        assert_eq!(read("+p(a)").unwrap(), c("insert", vec![c("p", vec![s("a")])]));
        assert_eq!(read("-p(a)").unwrap(), c("delete", vec![c("p", vec![s("a")])]));
        assert_eq!(read("*msg(a)").unwrap(), c("enqueue", vec![c("msg", vec![s("a")])]));
        assert_eq!(read("-3").unwrap(), s("-3"));
        assert_eq!(read("p(-2.5)").unwrap(), c("p", vec![s("-2.5")]));
        assert_eq!(
            read("~p & q").unwrap(),
            c("and", vec![Term::negation(s("p")), s("q")])
        );
    }

    #[test]
    fn test_lists_and_cons() {
        assert_eq!(
            read("[a,b]").unwrap(),
            Term::list(vec![s("a"), s("b")])
        );
        assert_eq!(read("[]").unwrap(), nil());
        assert_eq!(read("H!T").unwrap(), epilog_ast::cons(v("H"), v("T")));
    }

    #[test]
    fn test_sentence_forms() {
        assert_eq!(
            read("p(X) ==> +q(X)").unwrap(),
            Term::transition(c("p", vec![v("X")]), c("insert", vec![c("q", vec![v("X")])]))
        );
        assert_eq!(
            read("double(X) := times(X,2)").unwrap(),
            Term::definition(c("double", vec![v("X")]), c("times", vec![v("X"), s("2")]))
        );
        assert_eq!(
            read("click(X) :: -on(X) & +off(X)").unwrap(),
            Term::handler(
                c("click", vec![v("X")]),
                c(
                    "and",
                    vec![
                        c("delete", vec![c("on", vec![v("X")])]),
                        c("insert", vec![c("off", vec![v("X")])]),
                    ]
                )
            )
        );
    }

    #[test]
    fn test_read_data_with_comments() {
        let data = read_data("p(a). p(b).\n% a comment\nq(c).\n").unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[2], c("q", vec![s("c")]));
        assert!(read_data("").unwrap().is_empty());
        assert!(read_data("% nothing here").unwrap().is_empty());
    }

    #[test]
    fn test_read_items() {
        let items = read_items("p(a), q(X)").unwrap();
        assert_eq!(items, vec![c("p", vec![s("a")]), c("q", vec![v("X")])]);
    }

    #[test]
    fn test_read_errors() {
        let err = read("p(a").unwrap_err();
        assert_eq!(err.stage, ReadStage::Parse);
        assert!(read("p(a) q").is_err());
        let err = read("p : q").unwrap_err();
        assert_eq!(err.stage, ReadStage::Lex);
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "grandparent(X,Z) :- parent(X,Y) & parent(Y,Z)",
            "p(X) :- item(X) & ~q(X)",
            "p :- (a | b) & c",
            "a & b | c",
            "~(a & b)",
            "[a,[b,c],\"s t\"]",
            "H!T",
            "(a!b)!c",
            "p(X) ==> +q(X) & -r(X)",
            "f(X) := if(X,1,0)",
            "p(_,_) :: *out(\"x\")",
            "-3",
            "(p :- q) & r",
        ];
        for sample in samples {
            let first = read(sample).unwrap();
            let again = read(&grind(&first)).unwrap();
            assert_eq!(first, again, "round trip of {}", sample);
        }
    }
