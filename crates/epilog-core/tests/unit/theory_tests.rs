    use super::*;
    use crate::store::Store;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn s(name: &str) -> Symbol {
        Intern::new(name.to_string())
    }

    fn fact(rel: &str, args: &[&str]) -> Term {
        Term::compound(rel, args.iter().map(|a| Term::atom(a)).collect())
    }

    fn family() -> Theory {
        Theory::from_terms(
            IndexMode::Full,
            vec![
                fact("parent", &["art", "bob"]),
                fact("parent", &["bob", "cal"]),
                fact("parent", &["art", "bea"]),
                fact("age", &["art", "52"]),
            ],
        )
    }

    #[test]
    fn test_insertion_order_is_kept() {
        init_logging();
        let theory = family();
        assert_eq!(theory.len(), 4);
        assert_eq!(theory.iter().next(), Some(&fact("parent", &["art", "bob"])));
    }

    #[test]
    fn test_full_lookup_picks_smallest_bucket() {
        let theory = family();
        let hits = theory.lookup(&fact("parent", &["X", "cal"]));
        assert_eq!(hits, vec![&fact("parent", &["bob", "cal"])]);
        // unknown symbol: nothing can match
        assert!(theory.lookup(&fact("parent", &["X", "zed"])).is_empty());
        // variable query: everything
        assert_eq!(theory.lookup(&Term::var("P")).len(), 4);
    }

    #[test]
    fn test_numeric_keys_fall_back_to_whole_theory() {
        let theory = Theory::from_terms(IndexMode::Full, vec![fact("age", &["art", "52"])]);
        let hits = theory.lookup(&Term::sym("52"));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_lookup_in_resolves_bindings() {
        let theory = family();
        let mut store = Store::new();
        let env = store.new_env();
        assert!(store.unify(&Term::var("Y"), env, &Term::sym("cal"), env));
        let ids = theory.lookup_in(&fact("parent", &["X", "Y"]), env, &store);
        assert_eq!(ids.len(), 1);
        assert_eq!(theory.get(ids[0]), Some(&fact("parent", &["bob", "cal"])));
    }

    #[test]
    fn test_index_and_scan_agree() {
        let terms = family().to_vec();
        let indexed = Theory::from_terms(IndexMode::Full, terms.clone());
        let scanned = Theory::from_terms(IndexMode::None, terms);
        let query = fact("parent", &["art", "X"]);
        let matching = |t: &Theory| {
            t.lookup(&query)
                .into_iter()
                .filter(|c| crate::bindings::matcher(&query, c).is_some())
                .cloned()
                .collect::<Vec<_>>()
        };
        assert_eq!(matching(&indexed), matching(&scanned));
        assert_eq!(matching(&indexed).len(), 2);
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut theory = family();
        assert!(!theory.save(fact("parent", &["art", "bob"])));
        assert_eq!(theory.len(), 4);
        assert!(theory.save(fact("parent", &["cal", "dee"])));
        assert!(!theory.save(fact("parent", &["cal", "dee"])));
        assert_eq!(theory.len(), 5);
    }

    #[test]
    fn test_drop_removes_first_equal_entry_and_index() {
        let mut theory = family();
        theory.insert(fact("parent", &["art", "bob"]));
        assert!(theory.drop(&fact("parent", &["art", "bob"])).is_some());
        let target = fact("parent", &["art", "bob"]);
        assert_eq!(theory.iter().filter(|t| **t == target).count(), 1);
        assert!(theory.drop(&fact("parent", &["art", "bob"])).is_some());
        assert!(theory.drop(&fact("parent", &["art", "bob"])).is_none());
        assert!(!theory.contains(&fact("parent", &["art", "bob"])));
        assert_eq!(theory.len(), 3);
    }

    #[test]
    fn test_uninsert_after_insert_restores_lookup() {
        let mut theory = family();
        let before = theory.lookup(&fact("parent", &["X", "Y"])).len();
        theory.insert(fact("parent", &["dee", "eve"]));
        assert!(theory.uninsert(&fact("parent", &["dee", "eve"])).is_some());
        assert_eq!(theory.lookup(&fact("parent", &["X", "Y"])).len(), before);
        assert!(theory.lookup(&Term::sym("dee")).is_empty());
    }

    #[test]
    fn test_removed_slots_are_reclaimed() {
        let mut theory = family();
        for round in 0..50 {
            let extra = fact("parent", &["dee", &round.to_string()]);
            theory.insert(extra.clone());
            assert!(theory.uninsert(&extra).is_some());
        }
        assert_eq!(theory.entries.len(), 4);

        let temp: Vec<EntryId> = (0..3)
            .map(|i| theory.insert(fact("likes", &["eve", &i.to_string()])))
            .collect();
        for id in temp {
            assert!(theory.remove(id).is_some());
        }
        assert_eq!(theory.entries.len(), 4);
        assert_eq!(theory.lookup(&Term::sym("eve")).len(), 0);
    }

    #[test]
    fn test_compaction_keeps_order_and_index() {
        let mut theory = family();
        for name in ["a", "b", "c", "d", "e", "f"] {
            theory.insert(fact("age", &[name, "1"]));
        }
        theory.insert(fact("parent", &["cal", "dee"]));
        for name in ["a", "b", "c", "d", "e", "f"] {
            assert!(theory.drop(&fact("age", &[name, "1"])).is_some());
        }
        assert_eq!(theory.entries.len(), 5);
        assert_eq!(
            theory.to_vec(),
            vec![
                fact("parent", &["art", "bob"]),
                fact("parent", &["bob", "cal"]),
                fact("parent", &["art", "bea"]),
                fact("age", &["art", "52"]),
                fact("parent", &["cal", "dee"]),
            ]
        );
        assert_eq!(theory.lookup(&fact("parent", &["X", "Y"])).len(), 4);
        assert_eq!(theory.lookup(&Term::sym("dee")), vec![&fact("parent", &["cal", "dee"])]);
        assert_eq!(theory.ids().len(), 5);
    }

    #[test]
    fn test_eliminate_by_first_argument() {
        let mut theory = family();
        assert_eq!(theory.eliminate(s("art")), 3);
        assert_eq!(theory.to_vec(), vec![fact("parent", &["bob", "cal"])]);
    }

    #[test]
    fn test_rule_index_uses_head_relation() {
        let rule = Term::rule(
            fact("grandparent", &["X", "Z"]),
            vec![fact("parent", &["X", "Y"]), fact("parent", &["Y", "Z"])],
        );
        let definition = Term::definition(fact("double", &["X"]), fact("times", &["X", "2"]));
        let rules = Theory::from_terms(IndexMode::Rule, vec![rule.clone(), definition.clone()]);
        assert!(rules.defines(s("grandparent")));
        assert!(!rules.defines(s("parent")));
        assert_eq!(rules.lookup(&fact("grandparent", &["a", "W"])), vec![&rule]);
        assert_eq!(rules.lookup(&fact("definition", &["Q", "R"])), vec![&definition]);
        assert_eq!(rules.rule_arity(s("grandparent")), 2);
        assert!(rules.contains(&rule));
    }

    #[test]
    fn test_define_replaces_contents() {
        let mut theory = family();
        theory.define(vec![fact("p", &["a"])]);
        assert_eq!(theory.len(), 1);
        assert!(theory.lookup(&fact("parent", &["X", "Y"])).is_empty());
        theory.define_more(vec![fact("p", &["b"])]);
        assert_eq!(theory.len(), 2);
    }

    #[test]
    fn test_relations_and_arities() {
        let theory = family();
        assert_eq!(theory.relations(), vec![s("parent"), s("age")]);
        assert_eq!(theory.fact_arity(s("parent")), 2);
        assert_eq!(theory.fact_arity(s("missing")), 0);
        assert_eq!(theory.sentences(s("age")).len(), 1);
    }

    #[test]
    fn test_make_pattern() {
        assert_eq!(make_pattern(s("p"), 2), fact("p", &["X1", "X2"]));
        assert_eq!(make_pattern(s("go"), 0), Term::sym("go"));
    }
