/// Numeric conversion helpers.
///
/// Converts between the language's `f64` numbers and Rust indices without
/// silent truncation. Fractional, negative or out-of-range numbers are
/// rejected with an error instead of being rounded.
pub mod num;
/// Stack growth for deep recursion.
///
/// The interpreter recurses once per nested expression and per user call;
/// this keeps that recursion off the end of the host stack.
pub mod stack;
