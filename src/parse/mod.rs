//! Line parsing: tokenizer, syntax tree, precedence-climbing parser.

pub mod ast;
pub mod error;
pub mod parser;
pub mod token;
pub mod tokenize;

pub use ast::{Ast, Operator};
pub use error::SyntaxError;
pub use parser::parse;
pub use token::{Token, TokenKind};
pub use tokenize::tokenize;
