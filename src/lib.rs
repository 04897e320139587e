//! opsh: a line-oriented shell front end.
//!
//! Each input line is split into tokens, parsed into an [`parse::Ast`] by
//! precedence climbing, and handed to an executor that runs built-in
//! commands. Operators are infix and left-associative; from tightest to
//! loosest: `>` `>>` `<`, then `|`, `&&`, `||`, and finally `;` `&`.
//!
//! # Architecture
//!
//! - **[`parse`]**: Tokenizer, syntax tree, precedence-climbing parser.
//! - **[`exec`]**: Executor: builtin registry, control flow over the tree.
//! - **[`builtins`]**: In-process commands (`echo`, `cd`, `ls`, `cat`, `rm`, ...).
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: Terminal and file logging setup.
//! - **[`shell`]**: The per-line front end used by the binary.

/// Built-in command trait and implementations.
pub mod builtins;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Execution layer: builtin registry and tree walker.
pub mod exec;
/// Logger setup on top of `simplelog`.
pub mod logging;
/// Tokenizer, AST types and parser.
pub mod parse;
/// Line-at-a-time front end.
pub mod shell;

/// Tokenize and parse one line.
///
/// This is the main entry point for tests and simple usage.
pub fn parse_line(line: &str) -> Result<parse::Ast, parse::SyntaxError> {
    parse::parse(&parse::tokenize(line))
}
