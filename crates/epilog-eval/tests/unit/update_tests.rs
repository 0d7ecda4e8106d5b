    use super::*;
    use crate::EngineConfig;
    use epilog_core::IndexMode;
    use epilog_parser::{grind, read, read_data};

    fn term(text: &str) -> Term {
        read(text).expect("term should parse")
    }

    fn facts(text: &str) -> Theory {
        Theory::from_terms(IndexMode::Full, read_data(text).expect("data should parse"))
    }

    fn rules(text: &str) -> Theory {
        Theory::from_terms(IndexMode::Rule, read_data(text).expect("data should parse"))
    }

    fn contents(theory: &Theory) -> Vec<String> {
        let mut items: Vec<String> = theory.iter().map(grind).collect();
        items.sort();
        items
    }

    #[test]
    fn test_insert_and_delete() {
        let mut engine = Engine::new();
        let mut data = facts("p(a). p(b).");
        let program = Theory::rules();
        let outputs = engine.execute(&term("-p(a) & +p(c)"), &mut data, &program);
        assert!(outputs.is_empty());
        assert_eq!(contents(&data), vec!["p(b)", "p(c)"]);
    }

    #[test]
    fn test_bare_atoms_are_inserted() {
        let mut engine = Engine::new();
        let mut data = Theory::facts();
        engine.execute(&term("ready"), &mut data, &Theory::rules());
        engine.execute(&term("ready"), &mut data, &Theory::rules());
        assert_eq!(contents(&data), vec!["ready"]);
    }

    #[test]
    fn test_negated_atoms_are_deleted() {
        let mut engine = Engine::new();
        let mut data = facts("on(a,b).");
        engine.execute(&term("~on(a,b)"), &mut data, &Theory::rules());
        assert!(data.is_empty());
    }

    #[test]
    fn test_deletions_apply_before_insertions() {
        let mut engine = Engine::new();
        let mut data = Theory::facts();
        engine.execute(&term("+p(a) & -p(a)"), &mut data, &Theory::rules());
        assert_eq!(contents(&data), vec!["p(a)"]);
    }

    #[test]
    fn test_enqueue_returns_outputs() {
        let mut engine = Engine::new();
        let mut data = Theory::facts();
        let outputs = engine.execute(&term("*alert(fire) & +log(fire)"), &mut data, &Theory::rules());
        assert_eq!(outputs, vec![term("alert(fire)")]);
        assert_eq!(contents(&data), vec!["log(fire)"]);
    }

    #[test]
    fn test_handlers_rewrite_actions() {
        let mut engine = Engine::new();
        let mut data = facts("at(home).");
        let program = rules("move(X,Y) :: -at(X) & +at(Y)");
        engine.execute(&term("move(home,work)"), &mut data, &program);
        assert_eq!(contents(&data), vec!["at(work)"]);
    }

    #[test]
    fn test_handlers_with_conditions() {
        let mut engine = Engine::new();
        let mut data = facts("item(a). item(b).");
        let program = rules("clear :: item(X) ==> -item(X)");
        engine.execute(&term("clear"), &mut data, &program);
        assert!(data.is_empty());
    }

    #[test]
    fn test_cyclic_handlers_are_bounded() {
        let mut engine = Engine::with_config(EngineConfig::new().with_expand_depth(5));
        let program = rules("ping :: pong. pong :: ping.");
        let data = Theory::facts();
        assert!(engine.expand(&term("ping"), &data, &program).is_empty());

        let mut data = Theory::facts();
        engine.execute(&term("ping"), &mut data, &program);
        assert!(data.is_empty());
    }

    #[test]
    fn test_transform() {
        let mut engine = Engine::new();
        let mut data = facts("p(a). p(b). q(b).");
        let program = Theory::rules();
        engine.transform(&term("p(X) & ~q(X)"), &term("+r(X)"), &mut data, &program);
        assert_eq!(contents(&data), vec!["p(a)", "p(b)", "q(b)", "r(a)"]);
    }

    #[test]
    fn test_update_fires_transitions_against_one_state() {
        let mut engine = Engine::new();
        let mut data = facts("light(red).");
        let program = rules(
            "light(red) ==> -light(red) & +light(green).
             light(green) ==> -light(green) & +light(yellow).",
        );
        engine.update(&mut data, &program);
        assert_eq!(contents(&data), vec!["light(green)"]);
        engine.update(&mut data, &program);
        assert_eq!(contents(&data), vec!["light(yellow)"]);
    }

    #[test]
    fn test_update_with_rules() {
        let mut engine = Engine::new();
        let mut data = facts("p(a). p(b).");
        let program = rules("p(X) ==> +q(X)");
        engine.update(&mut data, &program);
        assert_eq!(contents(&data), vec!["p(a)", "p(b)", "q(a)", "q(b)"]);
    }

    #[test]
    fn test_hypothetical_execute() {
        let mut engine = Engine::new();
        let mut data = facts("p(a).");
        let adds = facts("p(b).");
        let dels = facts("p(a).");
        let program = rules("copy :: p(X) ==> +q(X)");
        engine.hypo_execute(&term("copy"), Overlay::new(&adds, &dels), &mut data, &program);
        assert_eq!(contents(&data), vec!["p(a)", "q(b)"]);
    }

    #[test]
    fn test_dataset_changes() {
        let mut engine = Engine::new();
        engine.add_dataset("palette", facts("color(red)."));
        let mut data = Theory::facts();
        engine.execute(
            &term("+true(color(green), palette) & -true(color(red), palette)"),
            &mut data,
            &Theory::rules(),
        );
        assert!(data.is_empty());
        let palette = engine.dataset("palette").expect("dataset should exist");
        assert_eq!(contents(palette), vec!["color(green)"]);

        engine.execute(&term("+true(shape(round), shapes)"), &mut data, &Theory::rules());
        let shapes = engine.dataset("shapes").expect("dataset should be created");
        assert_eq!(contents(shapes), vec!["shape(round)"]);
    }

    #[test]
    fn test_expand_deduplicates() {
        let engine = Engine::new();
        let data = facts("p(a,1). p(a,2).");
        let changes = engine.expand(&term("p(X,Y) ==> +q(X)"), &data, &Theory::rules());
        assert_eq!(changes, vec![term("+q(a)")]);
    }
