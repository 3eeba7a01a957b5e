use std::{cell::RefCell, fmt, rc::Rc};

use rustc_hash::FxHashMap;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, prelude, value::core::Value},
};

struct Binding {
    value:    Value,
    constant: bool,
}

struct Scope {
    parent:         Option<Environment>,
    bindings:       RefCell<FxHashMap<String, Binding>>,
    loop_permitted: bool,
}

/// A lexical scope and, through its parent, the whole scope chain.
///
/// Cloning an `Environment` clones the handle: both clones see the same
/// bindings. Closures keep a handle to the scope they were declared in, so a
/// scope lives as long as anything that can still resolve names through it.
///
/// Each scope also records whether `break` and `continue` are permitted in
/// it. Loop bodies permit them, function bodies reset the flag, and every
/// other child scope inherits it from its parent.
///
/// # Example
/// ```
/// use tessera::interpreter::{environment::Environment, value::core::Value};
///
/// let root = Environment::new();
/// root.declare("x", Value::Number(1.0), false);
///
/// let inner = root.child();
/// inner.assign("x", Value::Number(2.0), 1).unwrap();
///
/// assert_eq!(root.lookup("x", 1).unwrap(), Value::Number(2.0));
/// ```
#[derive(Clone)]
pub struct Environment(Rc<Scope>);

impl Environment {
    /// Creates an empty root scope with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parent(None, false)
    }

    /// Creates a root scope populated with the global constants `true`,
    /// `false` and `null` and the prelude natives.
    #[must_use]
    pub fn global() -> Self {
        let env = Self::new();
        env.declare("true", Value::Bool(true), true);
        env.declare("false", Value::Bool(false), true);
        env.declare("null", Value::Null, true);
        prelude::install(&env);
        env
    }

    fn with_parent(parent: Option<Self>, loop_permitted: bool) -> Self {
        Self(Rc::new(Scope { parent,
                             bindings: RefCell::new(FxHashMap::default()),
                             loop_permitted }))
    }

    /// Creates a nested block scope that inherits loop permission.
    #[must_use]
    pub fn child(&self) -> Self {
        Self::with_parent(Some(self.clone()), self.0.loop_permitted)
    }

    /// Creates the scope for one loop iteration.
    #[must_use]
    pub fn loop_scope(&self) -> Self {
        Self::with_parent(Some(self.clone()), true)
    }

    /// Creates the scope for a function body; loop control does not cross
    /// function boundaries.
    #[must_use]
    pub fn function_scope(&self) -> Self {
        Self::with_parent(Some(self.clone()), false)
    }

    /// Whether `break` and `continue` may run in this scope.
    #[must_use]
    pub fn loop_permitted(&self) -> bool {
        self.0.loop_permitted
    }

    /// Defines `name` in this scope, overwriting any binding of the same name
    /// in this scope only. Returns the bound value.
    pub fn declare(&self, name: impl Into<String>, value: Value, constant: bool) -> Value {
        self.0
            .bindings
            .borrow_mut()
            .insert(name.into(), Binding { value: value.clone(),
                                           constant });
        value
    }

    /// Rebinds the nearest visible `name` and returns the new value.
    ///
    /// # Errors
    /// - `RuntimeError::UnknownVariable` if no scope in the chain binds
    ///   `name`.
    /// - `RuntimeError::ConstantReassignment` if the binding is constant.
    pub fn assign(&self, name: &str, value: Value, line: usize) -> EvalResult<Value> {
        let scope = self.resolve(name)
                        .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                                       line })?;
        let mut bindings = scope.0.bindings.borrow_mut();
        let Some(binding) = bindings.get_mut(name) else {
            return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                       line });
        };
        if binding.constant {
            return Err(RuntimeError::ConstantReassignment { name: name.to_string(),
                                                            line });
        }
        binding.value = value.clone();
        Ok(value)
    }

    /// Returns the value of the nearest visible `name`.
    ///
    /// # Errors
    /// `RuntimeError::UnknownVariable` if no scope in the chain binds `name`.
    pub fn lookup(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.resolve(name)
            .and_then(|scope| {
                scope.0
                     .bindings
                     .borrow()
                     .get(name)
                     .map(|binding| binding.value.clone())
            })
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Whether `name` is bound in this scope itself, ignoring parents.
    #[must_use]
    pub fn is_declared_locally(&self, name: &str) -> bool {
        self.0.bindings.borrow().contains_key(name)
    }

    /// Finds the innermost scope binding `name`.
    fn resolve(&self, name: &str) -> Option<Self> {
        let mut current = Some(self.clone());
        while let Some(env) = current {
            if env.is_declared_locally(name) {
                return Some(env);
            }
            current = env.0.parent.clone();
        }
        None
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.0.bindings.borrow().keys().cloned().collect();
        names.sort_unstable();
        f.debug_struct("Environment")
         .field("bindings", &names)
         .field("loop_permitted", &self.0.loop_permitted)
         .field("has_parent", &self.0.parent.is_some())
         .finish()
    }
}
