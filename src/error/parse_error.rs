use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries the line and column of the token that caused the
/// failure. Newlines are skipped by lookahead, so the position always points
/// at a significant token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer met a character that starts no token.
    #[error("Error on line {line}, column {column}: Unrecognized character '{character}'.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}, column {column}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// Description of what the grammar required at this point.
        expected: String,
        /// The token that was found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}, column {column}: Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// Description of what the grammar required at this point.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// A `const` declaration without an initializer.
    #[error("Error on line {line}, column {column}: Constant '{name}' must be given a value.")]
    ConstantWithoutValue {
        /// The name of the constant.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The right-hand side of `.` was not an identifier.
    #[error("Error on line {line}, column {column}: The right-hand side of '.' must be an identifier.")]
    InvalidMemberProperty {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The left-hand side of `=` was neither an identifier nor a member path.
    #[error("Error on line {line}, column {column}: Invalid left-hand side in assignment.")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A function parameter was not a plain identifier.
    #[error("Error on line {line}, column {column}: Function parameters must be identifiers.")]
    InvalidParameter {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A match body declared `default` more than once.
    #[error("Error on line {line}, column {column}: A match body can only have one default case.")]
    DuplicateDefault {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The right-hand side of `->` was not a `left | right` expression.
    #[error("Error on line {line}, column {column}: Expected 'left | right' after '->'.")]
    InvalidTernary {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The test before `->` was neither a name nor a binary expression.
    #[error("Error on line {line}, column {column}: Expected a name or binary expression before \
             '->'.")]
    InvalidTernaryTest {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl ParseError {
    /// Returns the `(line, column)` position the error refers to.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        match self {
            Self::UnexpectedCharacter { line, column, .. }
            | Self::UnexpectedToken { line, column, .. }
            | Self::UnexpectedEndOfInput { line, column, .. }
            | Self::ConstantWithoutValue { line, column, .. }
            | Self::InvalidMemberProperty { line, column }
            | Self::InvalidAssignmentTarget { line, column }
            | Self::InvalidParameter { line, column }
            | Self::DuplicateDefault { line, column }
            | Self::InvalidTernary { line, column }
            | Self::InvalidTernaryTest { line, column } => (*line, *column),
        }
    }
}
