use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates both operands left to right, then applies the operator.
    ///
    /// Operands are always both evaluated; `&&` and `|` do not
    /// short-circuit.
    pub(in crate::interpreter::evaluator) fn eval_binary(&mut self,
                                                          left: &Expr,
                                                          op: BinaryOperator,
                                                          right: &Expr,
                                                          line: usize,
                                                          env: &Environment)
                                                          -> EvalResult<Flow> {
        let lhs = normal!(self.eval_expr(left, env));
        let rhs = normal!(self.eval_expr(right, env));

        apply_binary(op, &lhs, &rhs, line).map(Flow::Normal)
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// - `==`/`!=` compare structurally and accept any operands.
/// - `+` concatenates display forms when either side is a string.
/// - `&&` and `|` on anything but two booleans yield `false`.
/// - `+`, `-`, `*`, `/`, `%`, `<` and `>` on anything but two numbers yield
///   `false`.
///
/// # Errors
/// `RuntimeError::DivisionByZero` for `/` or `%` with a zero divisor.
///
/// # Example
/// ```
/// use tessera::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::apply_binary, value::core::Value},
/// };
///
/// let sum = apply_binary(BinaryOperator::Add, &Value::from("n = "), &Value::Number(3.0), 1);
/// assert_eq!(sum.unwrap(), Value::from("n = 3"));
///
/// let same = apply_binary(BinaryOperator::Equal,
///                         &Value::from(vec![Value::Number(1.0)]),
///                         &Value::from(vec![Value::Number(1.0)]),
///                         1);
/// assert_eq!(same.unwrap(), Value::Bool(true));
///
/// let mixed = apply_binary(BinaryOperator::Sub, &Value::Null, &Value::Number(1.0), 1);
/// assert_eq!(mixed.unwrap(), Value::Bool(false));
/// ```
pub fn apply_binary(op: BinaryOperator, lhs: &Value, rhs: &Value, line: usize) -> EvalResult<Value> {
    match (op, lhs, rhs) {
        (BinaryOperator::Equal, ..) => Ok(Value::Bool(lhs == rhs)),
        (BinaryOperator::NotEqual, ..) => Ok(Value::Bool(lhs != rhs)),
        (BinaryOperator::And, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
        (BinaryOperator::Bar, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
        (BinaryOperator::Add, Value::String(_), _) | (BinaryOperator::Add, _, Value::String(_)) => {
            Ok(Value::String(format!("{lhs}{rhs}")))
        },
        (_, Value::Number(a), Value::Number(b)) => arithmetic(op, *a, *b, line),
        _ => Ok(Value::Bool(false)),
    }
}

fn arithmetic(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<Value> {
    let value = match op {
        BinaryOperator::Add => Value::Number(a + b),
        BinaryOperator::Sub => Value::Number(a - b),
        BinaryOperator::Mul => Value::Number(a * b),
        BinaryOperator::Div | BinaryOperator::Mod if b == 0.0 => {
            return Err(RuntimeError::DivisionByZero { line });
        },
        BinaryOperator::Div => Value::Number(a / b),
        BinaryOperator::Mod => Value::Number(a % b),
        BinaryOperator::Less => Value::Bool(a < b),
        BinaryOperator::Greater => Value::Bool(a > b),
        // Equality is handled before dispatch; logic on numbers is a mismatch.
        BinaryOperator::Equal
        | BinaryOperator::NotEqual
        | BinaryOperator::And
        | BinaryOperator::Bar => Value::Bool(false),
    };
    Ok(value)
}
