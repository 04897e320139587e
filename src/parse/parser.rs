use super::ast::{Ast, Operator};
use super::error::SyntaxError;
use super::token::{Token, TokenKind};

/// Parse a token sequence into a single [`Ast`].
///
/// Grammar (all operators infix and left-associative):
///
/// ```text
/// start        := op_expr END_OF_INPUT
/// op_expr      := command_atom ( OPERATOR command_atom )*
/// command_atom := (WORD | QUOTED)+
/// ```
///
/// Operators bind by [`Operator::precedence`]; mixed chains are resolved by
/// precedence climbing. A trailing `EndOfInput` token is optional.
pub fn parse(tokens: &[Token]) -> Result<Ast, SyntaxError> {
    let mut parser = Parser { tokens, pos: 0 };
    if parser.peek().is_none() {
        parser.finish()?;
        return Err(SyntaxError::Empty);
    }

    let lhs = parser.parse_command_atom()?;
    let tree = parser.parse_op_expr(lhs, 0)?;
    parser.finish()?;

    log::debug!("parsed {} command(s): {tree}", tree.command_count());
    Ok(tree)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    /// Next token, or `None` at the end of the stream or an `EndOfInput` marker.
    fn peek(&self) -> Option<&Token> {
        self.tokens
            .get(self.pos)
            .filter(|t| t.kind != TokenKind::EndOfInput)
    }

    fn peek_operator(&self) -> Option<Operator> {
        self.peek().and_then(|t| t.kind.operator())
    }

    /// `command_atom := (WORD | QUOTED)+`; the first token is the name,
    /// the rest up to the next operator are arguments.
    fn parse_command_atom(&mut self) -> Result<Ast, SyntaxError> {
        let name = match self.peek() {
            None => {
                let after = self
                    .pos
                    .checked_sub(1)
                    .and_then(|i| self.tokens.get(i))
                    .map(|t| t.text.clone())
                    .unwrap_or_default();
                return Err(SyntaxError::UnexpectedEnd(after));
            }
            Some(tok) if tok.is_operator() => {
                return Err(SyntaxError::ExpectedCommand(tok.text.clone()));
            }
            Some(tok) => tok.text.clone(),
        };
        self.pos += 1;

        let mut args = Vec::new();
        while let Some(tok) = self.peek() {
            if tok.is_operator() {
                break;
            }
            args.push(tok.text.clone());
            self.pos += 1;
        }

        Ok(Ast::command(name, args))
    }

    /// Precedence climbing over `( OPERATOR command_atom )*`.
    ///
    /// Consumes operators of at least `min_prec`. After each right-hand atom,
    /// any following operator that binds strictly tighter than the one just
    /// consumed is folded into the right-hand side first.
    fn parse_op_expr(&mut self, mut lhs: Ast, min_prec: u8) -> Result<Ast, SyntaxError> {
        while let Some(op) = self.peek_operator() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.pos += 1;

            let mut rhs = self.parse_command_atom()?;
            while let Some(next) = self.peek_operator() {
                let next_prec = next.precedence();
                if next_prec <= prec {
                    break;
                }
                rhs = self.parse_op_expr(rhs, next_prec)?;
            }

            log::trace!("combine '{op}' at precedence {prec}");
            lhs = Ast::operator(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Only `EndOfInput` markers may remain once the expression is complete.
    fn finish(&self) -> Result<(), SyntaxError> {
        match self.tokens[self.pos..]
            .iter()
            .find(|t| t.kind != TokenKind::EndOfInput)
        {
            Some(tok) => Err(SyntaxError::TrailingInput(tok.text.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::tokenize;

    fn cmd(name: &str, args: &[&str]) -> Ast {
        Ast::command(name, args.iter().map(|s| s.to_string()).collect())
    }

    fn parse_str(line: &str) -> Result<Ast, SyntaxError> {
        parse(&tokenize(line))
    }

    fn grouped(line: &str) -> String {
        parse_str(line).unwrap().to_string()
    }

    #[test]
    fn single_command() {
        assert_eq!(parse_str("ls -la /tmp").unwrap(), cmd("ls", &["-la", "/tmp"]));
    }

    #[test]
    fn quoted_tokens_are_arguments() {
        assert_eq!(
            parse_str("echo \"a b\" 'c'").unwrap(),
            cmd("echo", &["a b", "c"])
        );
    }

    #[test]
    fn quoted_name() {
        assert_eq!(parse_str("'my cmd' x").unwrap(), cmd("my cmd", &["x"]));
    }

    #[test]
    fn quoted_operator_text_is_not_an_operator() {
        assert_eq!(parse_str("echo '|' b").unwrap(), cmd("echo", &["|", "b"]));
    }

    #[test]
    fn left_associative_pipe() {
        let expected = Ast::operator(
            Operator::Pipe,
            Ast::operator(Operator::Pipe, cmd("a", &[]), cmd("b", &[])),
            cmd("c", &[]),
        );
        assert_eq!(parse_str("a | b | c").unwrap(), expected);
    }

    #[test]
    fn lower_precedence_to_the_right_wraps_left() {
        let expected = Ast::operator(
            Operator::And,
            Ast::operator(Operator::Pipe, cmd("a", &[]), cmd("b", &[])),
            cmd("c", &[]),
        );
        assert_eq!(parse_str("a | b && c").unwrap(), expected);
    }

    #[test]
    fn higher_precedence_to_the_right_is_absorbed() {
        let expected = Ast::operator(
            Operator::And,
            cmd("a", &[]),
            Ast::operator(Operator::Pipe, cmd("b", &[]), cmd("c", &[])),
        );
        assert_eq!(parse_str("a && b | c").unwrap(), expected);
    }

    #[test]
    fn mixed_chains() {
        assert_eq!(grouped("a ; b && c || d"), "a ; ((b && c) || d)");
        assert_eq!(grouped("a || b && c | d > f"), "a || (b && (c | (d > f)))");
        assert_eq!(grouped("a > f | b"), "(a > f) | b");
        assert_eq!(grouped("a | b > f | c"), "(a | (b > f)) | c");
        assert_eq!(grouped("a && b ; c & d"), "((a && b) ; c) & d");
        assert_eq!(grouped("a < in > out"), "(a < in) > out");
        assert_eq!(grouped("a | b && c | d"), "(a | b) && (c | d)");
    }

    #[test]
    fn arguments_between_operators() {
        assert_eq!(
            grouped("grep -r foo src | wc -l >> counts.txt"),
            "grep -r foo src | (wc -l >> counts.txt)"
        );
    }

    #[test]
    fn empty_tokens() {
        assert_eq!(parse(&[]), Err(SyntaxError::Empty));
        assert_eq!(parse(&[Token::end_of_input()]), Err(SyntaxError::Empty));
    }

    #[test]
    fn operator_first() {
        assert_eq!(
            parse_str("| a"),
            Err(SyntaxError::ExpectedCommand("|".into()))
        );
    }

    #[test]
    fn consecutive_operators() {
        assert_eq!(
            parse_str("a && || b"),
            Err(SyntaxError::ExpectedCommand("||".into()))
        );
    }

    #[test]
    fn trailing_operator() {
        assert_eq!(
            parse_str("a |"),
            Err(SyntaxError::UnexpectedEnd("|".into()))
        );
        assert_eq!(
            parse_str("sleep 1 &"),
            Err(SyntaxError::UnexpectedEnd("&".into()))
        );
    }

    #[test]
    fn explicit_end_of_input() {
        let mut tokens = tokenize("a && b");
        tokens.push(Token::end_of_input());
        assert_eq!(parse(&tokens).unwrap().to_string(), "a && b");
    }

    #[test]
    fn operator_then_end_marker() {
        let tokens = vec![Token::word("a"), Token::new(TokenKind::Pipe, "|"), Token::end_of_input()];
        assert_eq!(parse(&tokens), Err(SyntaxError::UnexpectedEnd("|".into())));
    }

    #[test]
    fn tokens_after_end_marker() {
        let tokens = vec![Token::word("a"), Token::end_of_input(), Token::word("b")];
        assert_eq!(parse(&tokens), Err(SyntaxError::TrailingInput("b".into())));
    }

    #[test]
    fn leading_end_marker_with_tokens_after() {
        let tokens = vec![Token::end_of_input(), Token::word("b")];
        assert_eq!(parse(&tokens), Err(SyntaxError::TrailingInput("b".into())));
        let tokens = vec![Token::end_of_input(), Token::end_of_input()];
        assert_eq!(parse(&tokens), Err(SyntaxError::Empty));
    }

    #[test]
    fn long_chain_stays_left_associative() {
        let line = vec!["x"; 200].join(" ; ");
        let tree = parse_str(&line).unwrap();
        assert_eq!(tree.command_count(), 200);
        match tree {
            Ast::Operator { right, .. } => assert_eq!(*right, cmd("x", &[])),
            other => panic!("expected operator, got {other:?}"),
        }
    }

    #[test]
    fn render_after_parse_is_deterministic() {
        let line = "cat log | grep err && echo found || echo none ; pwd";
        assert_eq!(parse_str(line).unwrap().render(), parse_str(line).unwrap().render());
    }
}
