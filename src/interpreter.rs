/// Lexical scopes.
///
/// An environment maps names to values and constness, and chains to its
/// parent so lookups walk outward. It also records whether `break` and
/// `continue` are permitted in the scope.
///
/// # Responsibilities
/// - Declares, assigns and looks up bindings along the scope chain.
/// - Rejects reassignment of constants and use of undeclared names.
/// - Builds the global scope with the prelude installed.
pub mod environment;
/// The evaluator walks the syntax tree and computes values.
///
/// Every statement and expression is dispatched on its node kind. Control
/// flow (`return`, `break`, `continue`) travels back up the recursion as a
/// [`evaluator::core::Flow`], while thrown values and failed operations
/// travel as errors until a `try`/`catch` intercepts them.
///
/// # Responsibilities
/// - Evaluates every node kind, including closures, classes and enums.
/// - Implements the call protocol, instantiation and pattern matching.
/// - Bounds user-function recursion depth.
pub mod evaluator;
/// The lexer turns source text into tokens.
///
/// Keywords, identifiers, number and string literals, operators and
/// newlines each become a token carrying its line and column. The stream
/// always ends with an end-of-input token.
pub mod lexer;
/// The parser builds the syntax tree from tokens.
///
/// A single-lookahead recursive descent parser. Newlines are skipped by
/// lookahead and act as optional separators; semicolons are optional too.
/// The first error aborts parsing.
pub mod parser;
/// Native functions bound in the global scope.
pub mod prelude;
/// Runtime values.
///
/// Declares the dynamically typed [`value::core::Value`] and the shared
/// structures behind it: property maps, closures, native functions,
/// classes, instances and enums.
pub mod value;
