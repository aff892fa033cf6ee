//! Thompson NFA Compiler
//!
//! This library compiles regular expressions over a literal alphabet into
//! nondeterministic finite automata using Thompson's construction. The
//! supported operators are concatenation (`.`, always written explicitly),
//! alternation (`|`), optional (`?`), one-or-more (`+`) and zero-or-more
//! (`*`).
//!
//! The core of the crate is [`Compiler`], which folds a postfix token
//! sequence into [`Fragment`]s, one per sub-expression, until a single
//! fragment is left: the finished [`NFA`]. Two small collaborators sit on
//! either side of it:
//!
//! - [`parser`] converts infix text such as `a.(b|c)*` into postfix tokens.
//! - [`Matcher`] simulates a compiled automaton against an input string.
//!
//! ```
//! use thompson_nfa::{compile, Matcher};
//!
//! let nfa = compile("a.b*").unwrap();
//! let matcher = Matcher::new(&nfa);
//!
//! assert!(matcher.is_match("abb"));
//! assert!(!matcher.is_match("ba"));
//! ```
//!
//! # Crate features
//!
//! * **cli** (enabled by default) - Builds the `thompson-nfa` command line
//!   tool. The library does not depend on anything this feature pulls in.

pub mod compiler;
pub mod matcher;
pub mod nfa;
pub mod parser;
pub mod token;

pub use compiler::{Compiler, Config};
pub use matcher::Matcher;
pub use nfa::{Fragment, State, StateId, NFA};
pub use token::Token;

/// The result of compiling a regex to a Thompson NFA
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur during compilation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// An operator was applied with fewer fragments on the stack than it
    /// takes.
    #[error(
        "operator '{op}' at position {position} needs {needed} operand(s) \
         but only {found} available"
    )]
    OperandUnderflow {
        op: Token,
        position: usize,
        needed: usize,
        found: usize,
    },
    /// An infix operator appeared where an operand was expected, so it has
    /// nothing on its left to apply to.
    #[error("operator '{op}' at position {position} has no left operand")]
    MissingOperand { op: Token, position: usize },
    /// More than one fragment was left once all tokens were consumed.
    #[error("{count} fragments left after the last token, expected 1")]
    LeftoverOperands { count: usize },
    /// There was nothing to compile.
    #[error("empty expression")]
    EmptyExpression,
    /// A character that is neither an operator nor a valid literal.
    #[error("unrecognized token '{token}' at position {position}")]
    UnrecognizedToken { token: char, position: usize },
    /// A parenthesis without its counterpart in an infix expression.
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParen { position: usize },
    /// The automaton would have more states than the configured limit.
    #[error("regex pattern is too complex: exceeds {limit} states")]
    TooComplex { limit: usize },
}

/// Compile an infix expression with the default configuration.
pub fn compile(infix: &str) -> CompileResult<NFA> {
    Compiler::new().compile_infix(infix)
}
