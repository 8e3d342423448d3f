use regular_sets::prelude::*;

/// S1 -> aA | aB | aC | bB | bC | cC | a | b | c | &
/// A -> aA | aB | aC | a
/// B -> bB | bC | b
/// C -> cC | c
fn abc_grammar() -> RegularGrammar {
    use regular_sets::grammar::Production::Epsilon;
    let step = Production::step::<&str>;
    let terminal = Production::terminal;

    RegularGrammar::new(
        ["S1", "A", "B", "C"],
        ['a', 'b', 'c'],
        "S1",
        [
            (
                "S1",
                vec![
                    step('a', "A"),
                    step('a', "B"),
                    step('a', "C"),
                    step('b', "B"),
                    step('b', "C"),
                    step('c', "C"),
                    terminal('a'),
                    terminal('b'),
                    terminal('c'),
                    Epsilon,
                ],
            ),
            (
                "A",
                vec![step('a', "A"), step('a', "B"), step('a', "C"), terminal('a')],
            ),
            ("B", vec![step('b', "B"), step('b', "C"), terminal('b')]),
            ("C", vec![step('c', "C"), terminal('c')]),
        ],
    )
    .unwrap()
}

#[test_log::test]
fn grammar_to_dfa_and_back() {
    let grammar = abc_grammar();
    let nfa = NFA::from_grammar(&grammar);
    assert!(nfa.is_epsilon_free());
    assert!(nfa.validate("aabbbbcc"));
    assert!(!nfa.validate("aaccbb"));
    assert!(nfa.validate(""));

    let dfa = nfa.determinization();
    assert!(dfa.validate("aabbbbcc"));
    assert!(!dfa.validate("aaccbb"));
    assert!(dfa.validate(""));

    let regular = RegularGrammar::from_dfa(&dfa);
    assert_eq!(regular.start(), dfa.initial());
    assert_eq!(regular.terminals(), &OrderedSet::from(['a', 'b', 'c']));
    assert!(regular.derives_epsilon(regular.start()));

    let back = regular.to_nfa();
    for word in ["", "a", "abc", "aabbbbcc", "ccc", "bc", "aaccbb", "ba", "cb", "abca"] {
        assert_eq!(back.validate(word), nfa.validate(word), "{word}");
        assert_eq!(dfa.validate(word), nfa.validate(word), "{word}");
    }
}

#[test_log::test]
fn determinization_of_determinization() {
    let nfa = abc_grammar().to_nfa();
    let dfa = nfa.determinization();
    let again = NFA::from(dfa.clone()).determinization();

    assert_eq!(again.states().len(), dfa.states().len());
    for word in ["", "abc", "aabbbbcc", "aaccbb", "cba"] {
        assert_eq!(again.validate(word), dfa.validate(word), "{word}");
    }
}
