use std::{fmt, rc::Rc};

use crate::{
    ast::FunctionDef,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::core::Value},
};

/// A user-defined function paired with the environment it was declared in.
///
/// Class methods are the same closures with a receiver attached; the
/// receiver is bound to `this` when the function is called.
pub struct FunctionValue {
    /// The shared declaration.
    pub def:     Rc<FunctionDef>,
    /// Environment captured at the declaration site.
    pub closure: Environment,
    /// Receiver for class methods.
    pub this:    Option<Value>,
}

impl FunctionValue {
    /// Creates a plain closure.
    #[must_use]
    pub const fn new(def: Rc<FunctionDef>, closure: Environment) -> Self {
        Self { def,
               closure,
               this: None }
    }

    /// Creates a method bound to `this`.
    #[must_use]
    pub const fn bound(def: Rc<FunctionDef>, closure: Environment, this: Value) -> Self {
        Self { def,
               closure,
               this: Some(this) }
    }

    /// Name of the function as declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
         .field("name", &self.def.name)
         .field("params", &self.def.params)
         .field("bound", &self.this.is_some())
         .finish_non_exhaustive()
    }
}

/// Signature shared by every native function.
pub type NativeFn = dyn Fn(&[Value], &Environment) -> EvalResult<Value>;

/// A host function callable from the language.
///
/// Natives receive the evaluated arguments and the calling environment and
/// return a single value. Errors they raise are catchable like a `throw`.
///
/// # Example
/// ```
/// use tessera::interpreter::{
///     environment::Environment,
///     value::{core::Value, function::NativeFunction},
/// };
///
/// let twice = NativeFunction::new("twice", |args, _env| {
///     Ok(args.first().cloned().unwrap_or(Value::Null))
/// });
///
/// let env = Environment::new();
/// assert_eq!(twice.call(&[Value::Number(2.0)], &env).unwrap(), Value::Number(2.0));
/// ```
#[derive(Clone)]
pub struct NativeFunction {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl NativeFunction {
    /// Wraps a host closure under the given name.
    pub fn new(name: &str,
               func: impl Fn(&[Value], &Environment) -> EvalResult<Value> + 'static)
               -> Self {
        Self { name: Rc::from(name),
               func: Rc::new(func), }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the native with evaluated arguments.
    pub fn call(&self, args: &[Value], env: &Environment) -> EvalResult<Value> {
        (self.func)(args, env)
    }

    /// Whether both handles wrap the same host closure.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeFunction").field(&self.name).finish()
    }
}
