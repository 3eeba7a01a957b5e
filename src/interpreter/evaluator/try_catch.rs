use tracing::debug;

use crate::{
    ast::Statement,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
    },
};

impl Context {
    /// Evaluates `try { body } catch { handler }`.
    ///
    /// The body runs in its own scope. Any runtime error it raises, thrown or
    /// not, is intercepted: the error's value is bound to `error` in the
    /// enclosing scope and the handler runs in its own scope. A `return`,
    /// `break` or `continue` in either block is not an error and keeps
    /// propagating outward.
    pub(in crate::interpreter::evaluator) fn eval_try_catch(&mut self,
                                                             body: &[Statement],
                                                             handler: &[Statement],
                                                             env: &Environment)
                                                             -> EvalResult<Flow> {
        match self.exec_block(body, &env.child()) {
            Ok(flow) => Ok(flow),
            Err(error) => {
                debug!(%error, "caught runtime error");
                env.declare("error", error.into_value(), false);
                self.exec_block(handler, &env.child())
            },
        }
    }
}
