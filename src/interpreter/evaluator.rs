/// Unwraps a [`core::Flow::Normal`] value, returning any other flow (a
/// `return`, `break` or `continue` in progress) from the enclosing function.
macro_rules! normal {
    ($flow:expr) => {
        match $flow? {
            $crate::interpreter::evaluator::core::Flow::Normal(value) => value,
            other => return Ok(other),
        }
    };
}

/// Binary operator evaluation.
///
/// Implements arithmetic, comparisons, string concatenation, structural
/// equality and the boolean operators.
pub mod binary;

/// Core evaluation logic and context management.
///
/// Contains the control-flow result type, the evaluation context with its
/// call-depth limit, the expression and statement dispatchers and the block
/// discipline shared by every construct that runs a body.
pub mod core;

/// Evaluation of `for` loops.
pub mod for_loop;

/// Function calls and class instantiation.
///
/// Implements the call protocol for closures, bound methods, natives and
/// enum tagging, and `new` with its optional constructor.
pub mod function;

/// Evaluation of `match` expressions, including tagged-enum destructuring.
pub mod match_expr;

/// Member access and assignment.
///
/// Resolves dot and computed access against arrays, strings, objects,
/// classes, instances and enums, and performs mutation on the terminal
/// container.
pub mod member;

/// Statement evaluation.
///
/// Declarations, conditionals, `while` loops, `return`, `break`, `continue`
/// and `throw`.
pub mod statement;

/// Evaluation of `try`/`catch`.
pub mod try_catch;
