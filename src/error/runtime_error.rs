use thiserror::Error;

use crate::interpreter::value::core::Value;

/// Represents all errors that can occur during evaluation.
///
/// Runtime errors unwind the evaluator until a `try`/`catch` intercepts them.
/// A `throw` statement produces [`RuntimeError::Thrown`] carrying the thrown
/// value; every other variant describes a failed operation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A value raised by a `throw` statement.
    #[error("Error on line {line}: Uncaught exception: {value}.")]
    Thrown {
        /// The thrown value.
        value: Value,
        /// The source line of the `throw` statement.
        line:  usize,
    },
    /// Tried to use an undefined variable.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to reassign a `const` binding.
    #[error("Error on line {line}: Cannot reassign constant '{name}'.")]
    ConstantReassignment {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a value that is neither a function nor an enum member.
    #[error("Error on line {line}: Cannot call a value of type {found}.")]
    NotCallable {
        /// Type name of the callee.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `new` was applied to something other than a class.
    #[error("Error on line {line}: Can only instantiate classes, found {found}.")]
    NotAClass {
        /// Type name of the `new` target.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to read an element outside the bounds of an array or string.
    #[error("Error on line {line}: Index {index} is out of bounds for length {len}.")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the indexed value.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An index was not a non-negative integer.
    #[error("Error on line {line}: Invalid index {index}.")]
    InvalidIndex {
        /// Display form of the rejected index.
        index: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A member does not exist on a class, instance or enum.
    #[error("Error on line {line}: '{target}' has no member '{member}'.")]
    UnknownMember {
        /// The requested member name.
        member: String,
        /// Display form of the accessed value.
        target: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division or modulo by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `break` or `continue` outside of a loop body.
    #[error("Error on line {line}: Can only {keyword} inside while and for loops.")]
    LoopControlOutsideLoop {
        /// Either `break` or `continue`.
        keyword: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An enum member was called with other than exactly one argument.
    #[error("Error on line {line}: Tagging an enum requires one argument, got {count}.")]
    TagArity {
        /// The number of arguments supplied.
        count: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Nested calls exceeded the configured call depth.
    #[error("Error on line {line}: Maximum call depth of {limit} exceeded.")]
    RecursionLimit {
        /// The configured limit.
        limit: usize,
        /// The source line of the call that exceeded it.
        line:  usize,
    },
    /// A native function rejected its arguments.
    #[error("Native function '{function}' failed: {message}.")]
    Native {
        /// The name of the native function.
        function: String,
        /// Description of the failure.
        message:  String,
    },
}

impl RuntimeError {
    /// Creates a native-function failure.
    pub fn native(function: &str, message: impl Into<String>) -> Self {
        Self::Native { function: function.to_string(),
                       message:  message.into(), }
    }

    /// Converts the error into the value observed through `error` in a catch
    /// body.
    ///
    /// Thrown values pass through unchanged; any other error becomes its
    /// message as a string.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Thrown { value, .. } => value,
            other => Value::String(other.to_string()),
        }
    }
}
