use crate::{
    ast::{Expr, Statement},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a `for (init test update) { body }` loop.
    ///
    /// The initialiser runs once in a scope wrapping the whole loop, so the
    /// loop variable is visible to the test, the update and every iteration
    /// but not after the loop. Each iteration gets its own loop scope.
    ///
    /// - A false initial test skips the body entirely.
    /// - `continue` still runs the update before the next test.
    /// - `break` ends the loop; `return` leaves it with the enclosing
    ///   function.
    ///
    /// A `for` loop always yields null.
    pub(in crate::interpreter::evaluator) fn exec_for(&mut self,
                                                       init: &Statement,
                                                       test: &Expr,
                                                       update: &Expr,
                                                       body: &[Statement],
                                                       env: &Environment)
                                                       -> EvalResult<Flow> {
        let loop_env = env.child();
        normal!(self.exec_statement(init, &loop_env));

        loop {
            let condition = normal!(self.eval_expr(test, &loop_env));
            if !condition.is_true() {
                break;
            }

            match self.exec_block(body, &loop_env.loop_scope())? {
                Flow::Normal(_) | Flow::Continue => {},
                Flow::Break => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }

            normal!(self.eval_expr(update, &loop_env));
        }

        Ok(Flow::Normal(Value::Null))
    }
}
