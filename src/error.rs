/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors are always fatal: no partial program is ever produced.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Every
/// runtime error can be intercepted by a `try`/`catch` expression; uncaught
/// ones terminate evaluation and surface to the host.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure produced while turning source text into a value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source could not be tokenized or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation raised an error that no `try`/`catch` intercepted.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
