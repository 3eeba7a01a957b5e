/// Binary-operator precedence levels.
///
/// Covers the ternary sugar, the `try`/`catch` expression, the logical
/// operators with their chaining rule, and the additive and multiplicative
/// levels.
pub mod binary;

/// Blocks and function bodies.
pub mod block;

/// Entry points for programs and expressions, and assignment.
pub mod core;

/// Class and enum declarations.
pub mod declaration;

/// Call and member-access chains, and `new` targets.
pub mod postfix;

/// Primary expressions.
///
/// Literals, identifiers, function expressions, grouping, `match`, `new`,
/// object literals and array literals.
pub mod primary;

/// Statement parsing.
///
/// Dispatches on the leading keyword to declarations, control flow and
/// expression statements.
pub mod statement;

/// Token-stream helpers shared by every parsing level.
pub mod utils;
