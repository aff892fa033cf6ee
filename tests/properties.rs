use quickcheck::{quickcheck, TestResult};

use thompson_nfa::{compile, Compiler, Matcher};

fn to_ab(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { 'a' } else { 'b' }).collect()
}

#[test]
fn star_accepts_only_repeated_symbol() {
    fn prop(bits: Vec<bool>) -> bool {
        let input = to_ab(&bits);
        let nfa = compile("a*").unwrap();
        Matcher::new(&nfa).is_match(&input) == input.chars().all(|c| c == 'a')
    }
    quickcheck(prop as fn(Vec<bool>) -> bool);
}

#[test]
fn plus_rejects_empty_input() {
    fn prop(bits: Vec<bool>) -> bool {
        let input = to_ab(&bits);
        let nfa = compile("a+").unwrap();
        let expected =
            !input.is_empty() && input.chars().all(|c| c == 'a');
        Matcher::new(&nfa).is_match(&input) == expected
    }
    quickcheck(prop as fn(Vec<bool>) -> bool);
}

#[test]
fn alternation_star_accepts_everything() {
    fn prop(bits: Vec<bool>) -> bool {
        let nfa = compile("(a|b)*").unwrap();
        Matcher::new(&nfa).is_match(&to_ab(&bits))
    }
    quickcheck(prop as fn(Vec<bool>) -> bool);
}

#[test]
fn labeled_states_have_one_edge() {
    // Random postfix sequences over two literals and all five operators.
    // Malformed sequences are discarded.
    fn prop(ops: Vec<u8>) -> TestResult {
        let postfix: String = ops
            .iter()
            .map(|op| ['a', 'b', '.', '|', '?', '+', '*'][*op as usize % 7])
            .collect();
        let nfa = match Compiler::new().compile_postfix(&postfix) {
            Ok(nfa) => nfa,
            Err(_) => return TestResult::discard(),
        };
        let labeled_ok = nfa
            .states()
            .iter()
            .all(|s| s.label.is_none() || s.edges.len() == 1);
        TestResult::from_bool(
            labeled_ok && nfa.state(nfa.accept()).edges.is_empty(),
        )
    }
    quickcheck(prop as fn(Vec<u8>) -> TestResult);
}
