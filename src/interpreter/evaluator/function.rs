use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
        value::{class::Instance, core::Value, function::FunctionValue},
    },
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// Arguments are evaluated left to right in the caller's environment
    /// before the callee itself.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                        callee: &Expr,
                                                        arguments: &[Expr],
                                                        line: usize,
                                                        env: &Environment)
                                                        -> EvalResult<Flow> {
        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(normal!(self.eval_expr(argument, env)));
        }
        let callee = normal!(self.eval_expr(callee, env));

        self.call_value(&callee, args, env, line).map(Flow::Normal)
    }

    /// Calls an evaluated value with evaluated arguments.
    ///
    /// - Natives receive the arguments and the calling environment.
    /// - User functions run under [`Context::call_function`].
    /// - An enum member called with exactly one argument yields a tagged
    ///   copy of the member.
    ///
    /// # Errors
    /// - `RuntimeError::TagArity` for an enum member called with other than
    ///   one argument.
    /// - `RuntimeError::NotCallable` for every other kind of value.
    /// - Any error raised by the callee.
    pub fn call_value(&mut self,
                      callee: &Value,
                      args: Vec<Value>,
                      env: &Environment,
                      line: usize)
                      -> EvalResult<Value> {
        match callee {
            Value::NativeFunction(native) => native.call(&args, env),
            Value::Function(function) => self.call_function(function, args, line),
            Value::Enum(member) => {
                let count = args.len();
                let mut args = args.into_iter();
                match (args.next(), args.next()) {
                    (Some(payload), None) => Ok(Value::Enum(Rc::new(member.tag(payload)))),
                    _ => Err(RuntimeError::TagArity { count, line }),
                }
            },
            other => Err(RuntimeError::NotCallable { found: other.type_name(),
                                                     line }),
        }
    }

    /// Runs a user function.
    ///
    /// The body runs in a fresh scope whose parent is the function's
    /// declaration environment. A bound method first gets `this`; then
    /// parameters are bound positionally. Missing arguments leave their
    /// parameters unbound and extra arguments are dropped.
    ///
    /// The result is the returned value, or the value of the last statement
    /// when the body finishes without `return`.
    ///
    /// # Errors
    /// - `RuntimeError::RecursionLimit` when the call depth limit is hit.
    /// - Any error raised while running the body.
    pub fn call_function(&mut self,
                         function: &FunctionValue,
                         args: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        self.enter_call(line)?;
        trace!(name = function.name(), args = args.len(), depth = self.depth(), "call");

        let scope = function.closure.function_scope();
        if let Some(this) = &function.this {
            scope.declare("this", this.clone(), false);
        }
        for (param, arg) in function.def.params.iter().zip(args) {
            scope.declare(param.clone(), arg, false);
        }

        let result = self.exec_block(&function.def.body, &scope);
        self.exit_call();

        match result? {
            Flow::Normal(value) | Flow::Return(value) => Ok(value),
            Flow::Break | Flow::Continue => Ok(Value::Null),
        }
    }

    /// Evaluates `new Target(args)`.
    ///
    /// Every declared field starts as null. When the class declares a
    /// `constructor` method it is called on the new instance with the
    /// arguments and its result is discarded.
    ///
    /// # Errors
    /// `RuntimeError::NotAClass` when the target is not a class.
    pub(in crate::interpreter::evaluator) fn eval_new(&mut self,
                                                       target: &Expr,
                                                       arguments: &[Expr],
                                                       line: usize,
                                                       env: &Environment)
                                                       -> EvalResult<Flow> {
        let class = match normal!(self.eval_expr(target, env)) {
            Value::StaticClass(class) => class,
            other => {
                return Err(RuntimeError::NotAClass { found: other.type_name(),
                                                     line });
            },
        };

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(normal!(self.eval_expr(argument, env)));
        }

        let instance = Value::Instance(Rc::new(Instance::new(&class)));
        if let Some(constructor) = class.method("constructor", instance.clone()) {
            self.call_function(&constructor, args, line)?;
        }

        Ok(Flow::Normal(instance))
    }
}
