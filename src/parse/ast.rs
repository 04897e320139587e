//! Syntax tree produced by the parser and consumed by the exec layer.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

use super::token::operator_kind;

/// Infix operator joining two command subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `&&`: run right only if left succeeded
    And,
    /// `||`: run right only if left failed
    Or,
    /// `|`: pipe stdout
    Pipe,
    /// `>`: redirect stdout to a file
    RedirOut,
    /// `>>`: append stdout to a file
    Append,
    /// `<`: read stdin from a file
    RedirIn,
    /// `;`: run right unconditionally
    Semi,
    /// `&`: run left in the background
    Background,
}

impl Operator {
    /// The operator's shell syntax.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Pipe => "|",
            Operator::RedirOut => ">",
            Operator::Append => ">>",
            Operator::RedirIn => "<",
            Operator::Semi => ";",
            Operator::Background => "&",
        }
    }

    /// Binding strength; higher binds tighter. All levels are left-associative.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::RedirOut | Operator::Append | Operator::RedirIn => 4,
            Operator::Pipe => 3,
            Operator::And => 2,
            Operator::Or => 1,
            Operator::Semi | Operator::Background => 0,
        }
    }

    /// Human-readable name, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Operator::And => "conditional and",
            Operator::Or => "conditional or",
            Operator::Pipe => "pipe",
            Operator::RedirOut => "output redirection",
            Operator::Append => "append redirection",
            Operator::RedirIn => "input redirection",
            Operator::Semi => "sequence",
            Operator::Background => "background execution",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A parsed command line.
///
/// Either a command leaf or an operator node that owns both of its
/// subtrees. Built bottom-up by the parser and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Ast {
    Command {
        name: String,
        args: Vec<String>,
    },
    Operator {
        op: Operator,
        left: Box<Ast>,
        right: Box<Ast>,
    },
}

impl Ast {
    /// Build a command leaf. No validation: an empty name is accepted here.
    pub fn command(name: impl Into<String>, args: Vec<String>) -> Self {
        Ast::Command {
            name: name.into(),
            args,
        }
    }

    /// Build an operator node taking ownership of both subtrees.
    pub fn operator(op: Operator, left: Ast, right: Ast) -> Self {
        Ast::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Indented debug dump, one entry per line.
    ///
    /// ```text
    /// Operator: '&&'
    ///   Command: make [all]
    ///   Command: echo [ok]
    /// ```
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.render_into(0, &mut lines);
        lines
    }

    fn render_into(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match self {
            Ast::Command { name, args } => {
                let mut line = format!("{indent}Command: {name}");
                for arg in args {
                    line.push_str(&format!(" [{arg}]"));
                }
                lines.push(line);
            }
            Ast::Operator { op, left, right } => {
                lines.push(format!("{indent}Operator: '{op}'"));
                left.render_into(depth + 1, lines);
                right.render_into(depth + 1, lines);
            }
        }
    }

    /// Number of command leaves in the tree.
    pub fn command_count(&self) -> usize {
        match self {
            Ast::Command { .. } => 1,
            Ast::Operator { left, right, .. } => left.command_count() + right.command_count(),
        }
    }

    fn fmt_grouped(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Ast::Command { name, args } => {
                f.write_str(&quote_word(name))?;
                for arg in args {
                    write!(f, " {}", quote_word(arg))?;
                }
                Ok(())
            }
            Ast::Operator { op, left, right } => {
                if nested {
                    f.write_str("(")?;
                }
                left.fmt_grouped(f, true)?;
                write!(f, " {op} ")?;
                right.fmt_grouped(f, true)?;
                if nested {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

/// Quote a word so the tokenizer reads it back as exactly one word.
///
/// Quotes are literal and never escaped, so a word is wrapped whole in
/// whichever quote character it does not contain. A tokenized word never
/// holds both.
fn quote_word(word: &str) -> Cow<'_, str> {
    if !word.is_empty() && !word.chars().any(needs_quoting) {
        Cow::Borrowed(word)
    } else if !word.contains('\'') {
        Cow::Owned(format!("'{word}'"))
    } else {
        Cow::Owned(format!("\"{word}\""))
    }
}

fn needs_quoting(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, '\'' | '"' | '(' | ')')
        || operator_kind(c.encode_utf8(&mut [0; 4])).is_some()
}

/// Single-line form with every nested operator node parenthesized,
/// e.g. `(a | b) && c`.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_grouped(f, false)
    }
}
