use std::{cell::RefCell, fmt, rc::Rc};

use rustc_hash::FxHashMap;

use crate::{
    ast::FunctionDef,
    interpreter::{
        environment::Environment,
        value::{core::Value, function::FunctionValue, properties::Properties},
    },
};

/// The value bound to a class name by its declaration.
///
/// Holds the declared instance field names, the evaluated static fields and
/// both method tables. There is exactly one per evaluated declaration.
pub struct StaticClass {
    pub name:           String,
    /// Instance field names in declaration order.
    pub fields:         Vec<String>,
    /// Static fields; assignments may add new ones.
    pub static_fields:  RefCell<Properties>,
    pub methods:        FxHashMap<String, Rc<FunctionDef>>,
    pub static_methods: FxHashMap<String, Rc<FunctionDef>>,
    /// Environment of the declaration, captured by every method.
    pub closure:        Environment,
}

impl StaticClass {
    /// Returns the instance method `name` bound to `receiver`.
    #[must_use]
    pub fn method(&self, name: &str, receiver: Value) -> Option<FunctionValue> {
        self.methods
            .get(name)
            .map(|def| FunctionValue::bound(Rc::clone(def), self.closure.clone(), receiver))
    }

    /// Returns the static method `name` bound to the class itself.
    #[must_use]
    pub fn static_method(self: &Rc<Self>, name: &str) -> Option<FunctionValue> {
        self.static_methods.get(name).map(|def| {
                                         FunctionValue::bound(Rc::clone(def),
                                                              self.closure.clone(),
                                                              Value::StaticClass(Rc::clone(self)))
                                     })
    }
}

impl fmt::Debug for StaticClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticClass")
         .field("name", &self.name)
         .field("fields", &self.fields)
         .field("static_fields", &self.static_fields)
         .finish_non_exhaustive()
    }
}

/// An object produced by `new`.
#[derive(Debug)]
pub struct Instance {
    /// The class this instance was built from.
    pub class:  Rc<StaticClass>,
    /// Field values; the key set is fixed at construction.
    pub fields: RefCell<Properties>,
}

impl Instance {
    /// Builds an instance with every declared field set to null.
    #[must_use]
    pub fn new(class: &Rc<StaticClass>) -> Self {
        Self { class:  Rc::clone(class),
               fields: RefCell::new(Properties::with_null_fields(&class.fields)), }
    }
}
