use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{Expr, FunctionDef, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        value::{core::Value, function::FunctionValue, properties::Properties},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested user-function calls.
///
/// The evaluator grows its stack on demand, so this bounds runaway
/// recursion rather than guarding the host stack.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// The outcome of evaluating a statement, block or expression.
///
/// `Return`, `Break` and `Continue` travel outward through enclosing blocks
/// until a function call, a loop or the program root consumes them.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Evaluation completed with a value.
    Normal(Value),
    /// A `return` is unwinding to the enclosing function.
    Return(Value),
    /// A `break` is unwinding to the innermost loop.
    Break,
    /// A `continue` is unwinding to the innermost loop.
    Continue,
}

/// Stores the runtime evaluation context.
///
/// Bindings live in [`Environment`]s; the context only tracks how deeply
/// user functions are nested so runaway recursion fails with
/// `RuntimeError::RecursionLimit` instead of exhausting the host stack.
#[derive(Debug, Clone)]
pub struct Context {
    depth:     usize,
    max_depth: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates a program in the given root environment with default limits.
///
/// The host pre-populates `env` with whatever globals it exposes; see
/// [`Environment::global`] for the standard set.
///
/// # Errors
/// Returns the first runtime error that no `try`/`catch` intercepted.
///
/// # Example
/// ```
/// use tessera::{
///     interpreter::{environment::Environment, evaluator::core::evaluate, value::core::Value},
///     parse,
/// };
///
/// let program = parse("let x = 2; x * 21").unwrap();
/// let value = evaluate(&program, &Environment::global()).unwrap();
///
/// assert_eq!(value, Value::Number(42.0));
/// ```
pub fn evaluate(program: &Program, env: &Environment) -> EvalResult<Value> {
    Context::new().evaluate_program(program, env)
}

impl Context {
    /// Creates a context with [`DEFAULT_MAX_CALL_DEPTH`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_CALL_DEPTH)
    }

    /// Creates a context allowing at most `max_depth` nested calls.
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { depth: 0,
               max_depth }
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluates every top-level statement of `program` directly in `env`.
    ///
    /// The result is the value of the last statement, or the value of a
    /// top-level `return`, which also stops the program.
    pub fn evaluate_program(&mut self, program: &Program, env: &Environment) -> EvalResult<Value> {
        debug!(statements = program.body.len(), "evaluating program");

        match self.exec_block(&program.body, env)? {
            Flow::Normal(value) | Flow::Return(value) => Ok(value),
            Flow::Break | Flow::Continue => Ok(Value::Null),
        }
    }

    /// Runs statements in order inside `env`.
    ///
    /// The first flow other than [`Flow::Normal`] stops the block and is
    /// handed to the caller; otherwise the block's value is the value of its
    /// last statement, or null when it is empty. Callers create the scope.
    pub fn exec_block(&mut self, statements: &[Statement], env: &Environment) -> EvalResult<Flow> {
        let mut last = Value::Null;
        for statement in statements {
            match self.exec_statement(statement, env)? {
                Flow::Normal(value) => last = value,
                other => return Ok(other),
            }
        }
        Ok(Flow::Normal(last))
    }

    /// Evaluates a single statement.
    pub fn exec_statement(&mut self, statement: &Statement, env: &Environment) -> EvalResult<Flow> {
        match statement {
            Statement::VarDeclaration { identifier,
                                        constant,
                                        value,
                                        .. } => {
                self.exec_var_declaration(identifier, *constant, value.as_ref(), env)
            },
            Statement::Function(def) => {
                let function = Value::Function(Rc::new(FunctionValue::new(Rc::clone(def),
                                                                          env.clone())));
                Ok(Flow::Normal(env.declare(def.name.clone(), function, true)))
            },
            Statement::If { test,
                            body,
                            alternate,
                            .. } => self.exec_if(test, body, alternate.as_deref(), env),
            Statement::For { init,
                             test,
                             update,
                             body,
                             .. } => self.exec_for(init, test, update, body, env),
            Statement::While { test, body, .. } => self.exec_while(test, body, env),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => normal!(self.eval_expr(expr, env)),
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },
            Statement::Break { line } => Self::loop_control(env, "break", *line, Flow::Break),
            Statement::Continue { line } => {
                Self::loop_control(env, "continue", *line, Flow::Continue)
            },
            Statement::Throw { value, line } => {
                let value = normal!(self.eval_expr(value, env));
                Err(RuntimeError::Thrown { value,
                                           line: *line })
            },
            Statement::Class(def) => self.exec_class_declaration(def, env),
            Statement::Enum { name, members, .. } => Ok(Self::exec_enum_declaration(name,
                                                                                     members,
                                                                                     env)),
            Statement::Expression { expr, .. } => self.eval_expr(expr, env),
        }
    }

    /// Evaluates an expression.
    ///
    /// Expressions can contain bodies (`match` arms, `try`/`catch` blocks)
    /// whose `return`, `break` or `continue` must reach an enclosing function
    /// or loop, so they produce a [`Flow`] like statements do.
    pub fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Flow> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Flow> {
        match expr {
            Expr::Number { value, .. } => Ok(Flow::Normal(Value::Number(*value))),
            Expr::String { value, .. } => Ok(Flow::Normal(Value::String(value.clone()))),
            Expr::Identifier { name, line } => env.lookup(name, *line).map(Flow::Normal),
            Expr::Object { properties, .. } => {
                let mut object = Properties::new();
                for property in properties {
                    let value = normal!(self.eval_expr(&property.value, env));
                    object.insert(property.key.clone(), value);
                }
                Ok(Flow::Normal(object.into()))
            },
            Expr::Array { elements, .. } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(normal!(self.eval_expr(element, env)));
                }
                Ok(Flow::Normal(items.into()))
            },
            Expr::Binary { left,
                           op,
                           right,
                           line, } => self.eval_binary(left, *op, right, *line, env),
            Expr::Assignment { target,
                               value,
                               line, } => self.eval_assignment(target, value, *line, env),
            Expr::Member { object,
                           property,
                           computed,
                           line, } => self.eval_member(object, property, *computed, *line, env),
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line, env),
            Expr::New { target,
                        arguments,
                        line, } => self.eval_new(target, arguments, *line, env),
            Expr::Match { value,
                          cases,
                          default,
                          .. } => self.eval_match(value, cases, default.as_deref(), env),
            Expr::Function(def) => {
                let function = Value::Function(Rc::new(FunctionValue::new(Rc::clone(def),
                                                                           env.clone())));
                if def.name != FunctionDef::ANONYMOUS {
                    env.declare(def.name.clone(), function.clone(), true);
                }
                Ok(Flow::Normal(function))
            },
            Expr::TryCatch { body, handler, .. } => self.eval_try_catch(body, handler, env),
        }
    }

    /// Records entry into a user function.
    ///
    /// # Errors
    /// `RuntimeError::RecursionLimit` when the call would exceed the limit.
    pub(in crate::interpreter::evaluator) fn enter_call(&mut self, line: usize) -> EvalResult<()> {
        if self.depth >= self.max_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.max_depth,
                                                      line });
        }
        self.depth += 1;
        Ok(())
    }

    pub(in crate::interpreter::evaluator) fn exit_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    fn loop_control(env: &Environment,
                    keyword: &'static str,
                    line: usize,
                    flow: Flow)
                    -> EvalResult<Flow> {
        if env.loop_permitted() {
            Ok(flow)
        } else {
            Err(RuntimeError::LoopControlOutsideLoop { keyword, line })
        }
    }
}
