use thiserror::Error;

/// Reasons a token sequence does not form a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// No tokens at all (or only an end-of-input marker).
    #[error("cannot parse empty token list")]
    Empty,
    /// An operator sits where a command name is required.
    #[error("expected command, found operator '{0}'")]
    ExpectedCommand(String),
    /// The line ends right after an operator.
    #[error("unexpected end of input after '{0}'")]
    UnexpectedEnd(String),
    /// Tokens follow an explicit end-of-input marker.
    #[error("unexpected token '{0}' after end of input")]
    TrailingInput(String),
}
