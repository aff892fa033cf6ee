use std::fmt;

use crate::{CompileError, CompileResult};

/// A single token of a postfix regular expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A literal alphabet symbol.
    Literal(char),
    /// `.`
    Concat,
    /// `|`
    Alternate,
    /// `?`
    Optional,
    /// `+`
    Plus,
    /// `*`
    Star,
}

impl Token {
    /// Classify a single character.
    ///
    /// Operator characters map to their operators and every other character
    /// is a literal, except for parentheses, which can never appear in a
    /// postfix sequence.
    pub fn from_char(c: char, position: usize) -> CompileResult<Token> {
        Ok(match c {
            '.' => Token::Concat,
            '|' => Token::Alternate,
            '?' => Token::Optional,
            '+' => Token::Plus,
            '*' => Token::Star,
            '(' | ')' => {
                return Err(CompileError::UnrecognizedToken {
                    token: c,
                    position,
                })
            }
            c => Token::Literal(c),
        })
    }

    /// The number of fragments this token pops off the compilation stack.
    pub fn arity(&self) -> usize {
        match self {
            Token::Literal(_) => 0,
            Token::Optional | Token::Plus | Token::Star => 1,
            Token::Concat | Token::Alternate => 2,
        }
    }

    /// Binding strength used when converting infix to postfix. Literals
    /// have none.
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Token::Literal(_) => 0,
            Token::Optional | Token::Plus | Token::Star => 50,
            Token::Concat => 40,
            Token::Alternate => 30,
        }
    }

    pub fn is_operator(&self) -> bool {
        !matches!(self, Token::Literal(_))
    }

    /// The character this token is written as.
    pub fn as_char(&self) -> char {
        match *self {
            Token::Literal(c) => c,
            Token::Concat => '.',
            Token::Alternate => '|',
            Token::Optional => '?',
            Token::Plus => '+',
            Token::Star => '*',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Split a postfix expression into tokens, one per character.
pub fn tokenize(postfix: &str) -> CompileResult<Vec<Token>> {
    postfix
        .chars()
        .enumerate()
        .map(|(position, c)| Token::from_char(c, position))
        .collect()
}
