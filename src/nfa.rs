use std::collections::HashSet;
use std::fmt;
use std::io;

/// A state ID in the NFA. States refer to each other by index into the
/// owning [`NFA`], which lets `+` and `*` build cycles without any shared
/// ownership between states.
pub type StateId = usize;

/// A single state of a Thompson NFA.
///
/// A state with a `label` consumes exactly that symbol and always has exactly
/// one outgoing edge. A state without a label is an epsilon state: each of its
/// edges is followed without consuming input. An epsilon state with no edges
/// is an exit that has not been wired yet (or, in a finished automaton, the
/// accepting state).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// The symbol consumed when leaving this state, if any.
    pub label: Option<char>,
    /// Successor states, in priority order.
    pub edges: Vec<StateId>,
}

impl State {
    /// Create an epsilon state with the given successors.
    pub fn epsilon(edges: Vec<StateId>) -> Self {
        State { label: None, edges }
    }

    /// Create a state that consumes `symbol` and moves to `next`.
    pub fn symbol(symbol: char, next: StateId) -> Self {
        State { label: Some(symbol), edges: vec![next] }
    }

    /// Returns true when this state has no outgoing edges.
    pub fn is_open(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Fragment of an NFA with one entry state and one not-yet-wired exit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub entry: StateId,
    pub exit: StateId,
}

/// A Thompson NFA.
///
/// All states live in one arena. The automaton is entered through `start` and
/// accepts when a simulation reaches `accept` having consumed the whole input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFA {
    states: Vec<State>,
    start: StateId,
    accept: StateId,
}

impl NFA {
    pub(crate) fn new(states: Vec<State>, fragment: Fragment) -> Self {
        NFA { states, start: fragment.entry, accept: fragment.exit }
    }

    /// The initial state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The unique accepting state. It never has outgoing edges.
    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// The automaton as a single fragment.
    pub fn fragment(&self) -> Fragment {
        Fragment { entry: self.start, exit: self.accept }
    }

    /// Returns the state with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this NFA.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// All states, indexed by [`StateId`].
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The number of states in the automaton.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: a compiled automaton has at least two states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(
        &self,
        states: &HashSet<StateId>,
    ) -> HashSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(id) = stack.pop() {
            let state = &self.states[id];
            if state.label.is_some() {
                continue;
            }
            for &next in &state.edges {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// Write a Graphviz DOT representation of the NFA.
    pub fn to_dot<W: io::Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "digraph nfa {{")?;
        writeln!(w, "\trankdir=LR;")?;
        writeln!(w, "\t{} [shape=box];", self.start)?;
        writeln!(w, "\t{} [shape=doublecircle];", self.accept)?;
        for (id, state) in self.states.iter().enumerate() {
            for &next in &state.edges {
                match state.label {
                    Some(c) => writeln!(
                        w,
                        "\t{} -> {} [label=\"{}\"];",
                        id,
                        next,
                        c.escape_default()
                    )?,
                    None => {
                        writeln!(w, "\t{} -> {} [label=\"ε\"];", id, next)?
                    }
                }
            }
        }
        writeln!(w, "}}")
    }
}

impl fmt::Display for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start state: {}", self.start)?;
        writeln!(f, "Accepting state: {}", self.accept)?;
        writeln!(f, "States:")?;
        for (id, state) in self.states.iter().enumerate() {
            write!(f, "  {}: ", id)?;
            match state.label {
                Some(c) => writeln!(f, "{:?} -> {:?}", c, state.edges)?,
                None if id == self.accept => writeln!(f, "MATCH")?,
                None => writeln!(f, "ε -> {:?}", state.edges)?,
            }
        }
        Ok(())
    }
}
