use std::collections::HashSet;

use log::trace;

use crate::nfa::{StateId, NFA};

/// A matcher that simulates a Thompson NFA against input, tracking every
/// active state in parallel.
pub struct Matcher<'a> {
    nfa: &'a NFA,
}

/// The location of a match, in `char` offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given NFA
    pub fn new(nfa: &'a NFA) -> Self {
        Self { nfa }
    }

    /// Check if the entire input matches
    pub fn is_match(&self, input: &str) -> bool {
        let mut current = self.start_states();

        for (position, c) in input.chars().enumerate() {
            current = self.step(&current, c);
            trace!(
                "after '{}' at {}: {} active state(s)",
                c,
                position,
                current.len()
            );
            if current.is_empty() {
                return false;
            }
        }

        current.contains(&self.nfa.accept())
    }

    /// Find the leftmost match in the input. Among matches starting at the
    /// same position the shortest one is reported.
    pub fn find(&self, input: &str) -> Option<Match> {
        let chars: Vec<char> = input.chars().collect();
        (0..=chars.len()).find_map(|start| {
            self.shortest_at(&chars, start).map(|end| Match { start, end })
        })
    }

    /// Returns the end of the shortest match starting at `start`.
    fn shortest_at(&self, chars: &[char], start: usize) -> Option<usize> {
        let mut current = self.start_states();
        let mut position = start;

        loop {
            if current.contains(&self.nfa.accept()) {
                return Some(position);
            }
            if position == chars.len() || current.is_empty() {
                return None;
            }
            current = self.step(&current, chars[position]);
            position += 1;
        }
    }

    fn start_states(&self) -> HashSet<StateId> {
        self.nfa.epsilon_closure(&HashSet::from([self.nfa.start()]))
    }

    /// Consume `c` from every state in `current` that is labeled with it,
    /// and return the epsilon closure of the states reached.
    fn step(&self, current: &HashSet<StateId>, c: char) -> HashSet<StateId> {
        let next: HashSet<StateId> = current
            .iter()
            .map(|&id| self.nfa.state(id))
            .filter(|state| state.label == Some(c))
            .flat_map(|state| state.edges.iter().copied())
            .collect();

        self.nfa.epsilon_closure(&next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Compiler;

    fn postfix(p: &str) -> NFA {
        Compiler::new().compile_postfix(p).unwrap()
    }

    #[test]
    fn test_simple_char_match() {
        let nfa = postfix("a");
        let matcher = Matcher::new(&nfa);

        assert!(matcher.is_match("a"));
        assert!(!matcher.is_match("b"));
        assert!(!matcher.is_match(""));
        assert!(!matcher.is_match("aa"));
    }

    #[test]
    fn test_concat_with_star() {
        let nfa = postfix("ab*.");
        let matcher = Matcher::new(&nfa);

        for input in ["a", "ab", "abb", "abbbbb"] {
            assert!(matcher.is_match(input), "{}", input);
        }
        for input in ["", "b", "ba", "aab"] {
            assert!(!matcher.is_match(input), "{}", input);
        }
    }

    #[test]
    fn test_optional_plus_star() {
        let question = postfix("a?");
        let plus = postfix("a+");
        let star = postfix("a*");

        for (input, q, p, s) in [
            ("", true, false, true),
            ("a", true, true, true),
            ("aa", false, true, true),
            ("aaaa", false, true, true),
            ("b", false, false, false),
        ] {
            let is_match = |nfa: &NFA| Matcher::new(nfa).is_match(input);
            assert_eq!(is_match(&question), q, "{}?", input);
            assert_eq!(is_match(&plus), p, "{}+", input);
            assert_eq!(is_match(&star), s, "{}*", input);
        }
    }

    #[test]
    fn test_nested_star_terminates() {
        let nfa = postfix("a**");
        let matcher = Matcher::new(&nfa);
        assert!(matcher.is_match(""));
        assert!(matcher.is_match("aaa"));
    }

    #[test]
    fn test_find() {
        let nfa = postfix("ab+.");
        let matcher = Matcher::new(&nfa);

        assert_eq!(matcher.find("xxabbb"), Some(Match { start: 2, end: 4 }));
        assert_eq!(matcher.find("ba"), None);
    }

    #[test]
    fn test_find_empty_match() {
        let nfa = postfix("a*");
        let matcher = Matcher::new(&nfa);

        assert_eq!(matcher.find("bbb"), Some(Match { start: 0, end: 0 }));
    }
}
