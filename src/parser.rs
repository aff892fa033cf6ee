/*! Conversion of infix regular expressions to postfix token order.

This is the shunting-yard algorithm over the operator set understood by the
[`Compiler`](crate::Compiler). Precedence, from tightest to loosest:

| operator      | precedence |
|---------------|------------|
| `*`, `+`, `?` | 50         |
| `.`           | 40         |
| `|`           | 30         |

All operators are left-associative and parentheses group. Concatenation must
be written explicitly, so `ab` is two separate operands and not `a.b`.

Every operator is written after its left operand. An operator found where an
operand is expected (at the start, right after `(`, or right after a binary
operator) is rejected with [`CompileError::MissingOperand`], since
reordering would otherwise turn `*a` into the valid postfix `a*`. Anything
else the reordering preserves, such as a missing right operand in `a|`, is
left for the compiler to report.
*/

use crate::token::Token;
use crate::{CompileError, CompileResult};

/// An entry of the operator stack.
enum Pending {
    /// An open parenthesis and where it was found.
    Open(usize),
    Op(Token),
}

/// Convert an infix expression into postfix tokens.
pub fn to_postfix(infix: &str) -> CompileResult<Vec<Token>> {
    let mut output = Vec::with_capacity(infix.len());
    let mut stack: Vec<Pending> = Vec::new();
    // True where the next token must start an operand.
    let mut expect_operand = true;

    for (position, c) in infix.chars().enumerate() {
        match c {
            '(' => {
                stack.push(Pending::Open(position));
                expect_operand = true;
            }
            ')' => {
                loop {
                    match stack.pop() {
                        Some(Pending::Open(_)) => break,
                        Some(Pending::Op(op)) => output.push(op),
                        None => {
                            return Err(CompileError::UnbalancedParen {
                                position,
                            })
                        }
                    }
                }
                expect_operand = false;
            }
            c => {
                let token = Token::from_char(c, position)?;
                if !token.is_operator() {
                    output.push(token);
                    expect_operand = false;
                    continue;
                }
                if expect_operand {
                    return Err(CompileError::MissingOperand {
                        op: token,
                        position,
                    });
                }
                expect_operand = token.arity() == 2;
                while let Some(Pending::Op(top)) = stack.last() {
                    if top.precedence() < token.precedence() {
                        break;
                    }
                    output.push(*top);
                    stack.pop();
                }
                stack.push(Pending::Op(token));
            }
        }
    }

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Op(op) => output.push(op),
            Pending::Open(position) => {
                return Err(CompileError::UnbalancedParen { position })
            }
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix(infix: &str) -> String {
        to_postfix(infix).unwrap().iter().map(Token::as_char).collect()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(postfix("a.b*"), "ab*.");
        assert_eq!(postfix("a*.b"), "a*b.");
        assert_eq!(postfix("a|b.c"), "abc.|");
        assert_eq!(postfix("a.b|c"), "ab.c|");
        assert_eq!(postfix("a?|b+"), "a?b+|");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(postfix("a.b.c"), "ab.c.");
        assert_eq!(postfix("a|b|c"), "ab|c|");
    }

    #[test]
    fn test_parens() {
        assert_eq!(postfix("(a|b)*"), "ab|*");
        assert_eq!(postfix("a.(b.c)"), "abc..");
        assert_eq!(postfix("((a))"), "a");
        assert_eq!(postfix("(a.b)+.c"), "ab.+c.");
    }

    #[test]
    fn test_empty() {
        assert_eq!(postfix(""), "");
        assert_eq!(postfix("()"), "");
    }

    #[test]
    fn test_operator_without_left_operand() {
        let missing = |op, position| -> CompileResult<Vec<Token>> {
            Err(CompileError::MissingOperand { op, position })
        };

        assert_eq!(to_postfix("*a"), missing(Token::Star, 0));
        assert_eq!(to_postfix("|ab"), missing(Token::Alternate, 0));
        assert_eq!(to_postfix("(+b)"), missing(Token::Plus, 1));
        assert_eq!(to_postfix("(*a)"), missing(Token::Star, 1));
        assert_eq!(to_postfix("a.(+b)"), missing(Token::Plus, 3));
        assert_eq!(to_postfix("a|?b"), missing(Token::Optional, 2));
        assert_eq!(to_postfix("a..b"), missing(Token::Concat, 2));
    }

    #[test]
    fn test_operator_after_group() {
        assert_eq!(postfix("(a)*"), "a*");
        assert_eq!(postfix("(a).(b)"), "ab.");
        assert_eq!(postfix("a**"), "a**");
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(
            to_postfix("(a|b").unwrap_err(),
            CompileError::UnbalancedParen { position: 0 }
        );
        assert_eq!(
            to_postfix("a|b)").unwrap_err(),
            CompileError::UnbalancedParen { position: 3 }
        );
    }
}
