use log::{debug, trace};

use crate::nfa::{Fragment, State, StateId, NFA};
use crate::token::{tokenize, Token};
use crate::{parser, CompileError, CompileResult};

/// Configuration for a [`Compiler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    state_limit: Option<usize>,
}

impl Config {
    /// Create a new default configuration. No limits are enforced.
    pub fn new() -> Config {
        Config::default()
    }

    /// Set the maximum number of states the compiled automaton may have.
    ///
    /// Concatenation adds no states. Every other token adds two, so `ab.c|`
    /// compiles to eight. Compilation fails with
    /// [`CompileError::TooComplex`] as soon as the limit would be exceeded.
    pub fn state_limit(mut self, limit: Option<usize>) -> Config {
        self.state_limit = limit;
        self
    }

    /// Returns the state limit, if one was set with
    /// [`Config::state_limit`].
    pub fn get_state_limit(&self) -> Option<usize> {
        self.state_limit
    }
}

/// Compiler that folds a postfix token sequence into a Thompson NFA.
///
/// Every token produces exactly one [`Fragment`]. Operators pop the fragments
/// they apply to, wire their open exits into new states, and push the result.
/// When the tokens run out, the single remaining fragment is the automaton.
#[derive(Debug, Default)]
pub struct Compiler {
    config: Config,
    states: Vec<State>,
    stack: Vec<Fragment>,
}

impl Compiler {
    /// Create a new compiler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new compiler with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config, ..Self::default() }
    }

    /// Compile an infix expression such as `a.(b|c)*`.
    pub fn compile_infix(self, infix: &str) -> CompileResult<NFA> {
        let tokens = parser::to_postfix(infix)?;
        self.compile(&tokens)
    }

    /// Compile a postfix expression such as `abc|*.`, one token per
    /// character.
    pub fn compile_postfix(self, postfix: &str) -> CompileResult<NFA> {
        let tokens = tokenize(postfix)?;
        self.compile(&tokens)
    }

    /// Compile a postfix token sequence to a Thompson NFA.
    pub fn compile(mut self, tokens: &[Token]) -> CompileResult<NFA> {
        debug!("compiling {} postfix tokens", tokens.len());

        for (position, &token) in tokens.iter().enumerate() {
            trace!(
                "token {} '{}', {} fragment(s) on the stack",
                position,
                token,
                self.stack.len()
            );
            let fragment = match token {
                Token::Literal(c) => self.compile_literal(c)?,
                Token::Concat => {
                    let (left, right) = self.pop_pair(token, position)?;
                    self.compile_concat(left, right)
                }
                Token::Alternate => {
                    let (left, right) = self.pop_pair(token, position)?;
                    self.compile_alternation(left, right)?
                }
                Token::Optional => {
                    let frag = self.pop_one(token, position)?;
                    self.compile_question(frag)?
                }
                Token::Plus => {
                    let frag = self.pop_one(token, position)?;
                    self.compile_plus(frag)?
                }
                Token::Star => {
                    let frag = self.pop_one(token, position)?;
                    self.compile_star(frag)?
                }
            };
            debug_assert!(self.states[fragment.exit].is_open());
            self.stack.push(fragment);
        }

        let fragment = match self.stack.len() {
            0 => return Err(CompileError::EmptyExpression),
            1 => self.stack[0],
            count => return Err(CompileError::LeftoverOperands { count }),
        };

        debug!(
            "compiled NFA with {} states, start {}, accept {}",
            self.states.len(),
            fragment.entry,
            fragment.exit
        );

        Ok(NFA::new(self.states, fragment))
    }

    /// Compile a single literal symbol: `entry --c--> exit`.
    fn compile_literal(&mut self, c: char) -> CompileResult<Fragment> {
        let exit = self.add_state(State::epsilon(vec![]))?;
        let entry = self.add_state(State::symbol(c, exit))?;
        Ok(Fragment { entry, exit })
    }

    /// Compile concatenation by wiring the end of `left` into the start of
    /// `right`. No new states are needed.
    fn compile_concat(&mut self, left: Fragment, right: Fragment) -> Fragment {
        self.push_edge(left.exit, right.entry);
        Fragment { entry: left.entry, exit: right.exit }
    }

    /// Compile alternation. The branch state lists `left` before `right`,
    /// which matters to simulators that try edges in order.
    fn compile_alternation(
        &mut self,
        left: Fragment,
        right: Fragment,
    ) -> CompileResult<Fragment> {
        let exit = self.add_state(State::epsilon(vec![]))?;
        let entry =
            self.add_state(State::epsilon(vec![left.entry, right.entry]))?;

        self.push_edge(left.exit, exit);
        self.push_edge(right.exit, exit);

        Ok(Fragment { entry, exit })
    }

    /// Compile `?`: either go through `frag` once or skip straight to the
    /// exit.
    fn compile_question(&mut self, frag: Fragment) -> CompileResult<Fragment> {
        let exit = self.add_state(State::epsilon(vec![]))?;
        let entry = self.add_state(State::epsilon(vec![frag.entry, exit]))?;

        self.push_edge(frag.exit, exit);

        Ok(Fragment { entry, exit })
    }

    /// Compile `+`: go through `frag` at least once, then either loop back
    /// into it or leave.
    fn compile_plus(&mut self, frag: Fragment) -> CompileResult<Fragment> {
        let exit = self.add_state(State::epsilon(vec![]))?;
        let entry = self.add_state(State::epsilon(vec![frag.entry]))?;

        self.set_edges(frag.exit, vec![frag.entry, exit]);

        Ok(Fragment { entry, exit })
    }

    /// Compile `*`: skip `frag` entirely, or go through it and then either
    /// loop back or leave.
    fn compile_star(&mut self, frag: Fragment) -> CompileResult<Fragment> {
        let exit = self.add_state(State::epsilon(vec![]))?;
        let entry = self.add_state(State::epsilon(vec![frag.entry, exit]))?;

        self.push_edge(frag.exit, frag.entry);
        self.push_edge(frag.exit, exit);

        Ok(Fragment { entry, exit })
    }

    /// Add a new state and return its ID.
    fn add_state(&mut self, state: State) -> CompileResult<StateId> {
        if let Some(limit) = self.config.state_limit {
            if self.states.len() >= limit {
                return Err(CompileError::TooComplex { limit });
            }
        }
        let id = self.states.len();
        self.states.push(state);
        Ok(id)
    }

    /// Add an epsilon transition from `from` to `to`.
    fn push_edge(&mut self, from: StateId, to: StateId) {
        let state = &mut self.states[from];
        debug_assert!(state.label.is_none(), "labeled states have one edge");
        state.edges.push(to);
    }

    /// Replace the edges of an open exit state.
    fn set_edges(&mut self, from: StateId, edges: Vec<StateId>) {
        let state = &mut self.states[from];
        debug_assert!(
            state.is_open(),
            "state {} was already wired to {:?}",
            from,
            state.edges
        );
        state.edges = edges;
    }

    /// Pop the single operand of a unary operator.
    fn pop_one(
        &mut self,
        op: Token,
        position: usize,
    ) -> CompileResult<Fragment> {
        let found = self.stack.len();
        self.stack.pop().ok_or(CompileError::OperandUnderflow {
            op,
            position,
            needed: op.arity(),
            found,
        })
    }

    /// Pop both operands of a binary operator, returned as `(left, right)`.
    /// The right operand is on top of the stack.
    fn pop_pair(
        &mut self,
        op: Token,
        position: usize,
    ) -> CompileResult<(Fragment, Fragment)> {
        let found = self.stack.len();
        if found < 2 {
            return Err(CompileError::OperandUnderflow {
                op,
                position,
                needed: op.arity(),
                found,
            });
        }
        let operands = self.stack.split_off(found - 2);
        Ok((operands[0], operands[1]))
    }
}
