//! Lexical units produced by the tokenizer and consumed by the parser.

use serde::Serialize;

use super::ast::Operator;

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Unquoted run of ordinary characters
    Word,
    /// Single- or double-quoted payload, quotes stripped
    Quoted,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `>>`
    Append,
    /// `|`
    Pipe,
    /// `>`
    RedirOut,
    /// `<`
    RedirIn,
    /// `;`
    Semicolon,
    /// `&`
    Ampersand,
    /// Explicit end-of-stream marker. Never produced by `tokenize`.
    EndOfInput,
}

/// Operator symbols, two-character entries first.
///
/// The tokenizer tries a two-character slice before a one-character one,
/// so `&&` never comes out as two `&`.
pub const OPERATORS: &[(&str, TokenKind)] = &[
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
    (">>", TokenKind::Append),
    ("|", TokenKind::Pipe),
    (">", TokenKind::RedirOut),
    ("<", TokenKind::RedirIn),
    (";", TokenKind::Semicolon),
    ("&", TokenKind::Ampersand),
];

/// Look up an operator symbol in [`OPERATORS`].
pub fn operator_kind(symbol: &str) -> Option<TokenKind> {
    OPERATORS
        .iter()
        .find(|(sym, _)| *sym == symbol)
        .map(|(_, kind)| *kind)
}

impl TokenKind {
    /// The AST operator this token stands for, if any.
    pub fn operator(self) -> Option<Operator> {
        match self {
            TokenKind::And => Some(Operator::And),
            TokenKind::Or => Some(Operator::Or),
            TokenKind::Append => Some(Operator::Append),
            TokenKind::Pipe => Some(Operator::Pipe),
            TokenKind::RedirOut => Some(Operator::RedirOut),
            TokenKind::RedirIn => Some(Operator::RedirIn),
            TokenKind::Semicolon => Some(Operator::Semi),
            TokenKind::Ampersand => Some(Operator::Background),
            TokenKind::Word | TokenKind::Quoted | TokenKind::EndOfInput => None,
        }
    }

    pub fn is_operator(self) -> bool {
        self.operator().is_some()
    }
}

/// A token: its kind plus the literal text that produced it.
///
/// Operators keep their symbol; words and quoted values keep their
/// content with the quote characters removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Word, text)
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Quoted, text)
    }

    /// Build an operator token from its symbol. `None` for unknown symbols.
    pub fn operator(symbol: &str) -> Option<Self> {
        operator_kind(symbol).map(|kind| Self::new(kind, symbol))
    }

    pub fn end_of_input() -> Self {
        Self::new(TokenKind::EndOfInput, "")
    }

    pub fn is_operator(&self) -> bool {
        self.kind.is_operator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_table_lookup() {
        assert_eq!(operator_kind("&&"), Some(TokenKind::And));
        assert_eq!(operator_kind(">>"), Some(TokenKind::Append));
        assert_eq!(operator_kind("&"), Some(TokenKind::Ampersand));
        assert_eq!(operator_kind("|&"), None);
        assert_eq!(operator_kind("a"), None);
    }

    #[test]
    fn two_char_symbols_listed_first() {
        let first_single = OPERATORS.iter().position(|(s, _)| s.len() == 1).unwrap();
        assert!(OPERATORS[first_single..].iter().all(|(s, _)| s.len() == 1));
    }

    #[test]
    fn every_operator_kind_maps_to_ast_operator() {
        for (sym, kind) in OPERATORS {
            let op = kind.operator().unwrap();
            assert_eq!(op.as_str(), *sym);
        }
    }

    #[test]
    fn words_are_not_operators() {
        assert!(!TokenKind::Word.is_operator());
        assert!(!TokenKind::Quoted.is_operator());
        assert!(!TokenKind::EndOfInput.is_operator());
        assert!(!Token::quoted("|").is_operator());
    }

    #[test]
    fn equality_by_kind_and_text() {
        assert_eq!(Token::word("ls"), Token::new(TokenKind::Word, "ls"));
        assert_ne!(Token::word("ls"), Token::quoted("ls"));
        assert_eq!(Token::operator("|"), Some(Token::new(TokenKind::Pipe, "|")));
        assert_eq!(Token::operator("|&"), None);
    }
}
