use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    interpreter::value::{
        class::{Instance, StaticClass},
        enumeration::{EnumValue, StaticEnum},
        function::{FunctionValue, NativeFunction},
        properties::Properties,
    },
    util::stack::ensure_sufficient_stack,
};

/// Address of a shared container, used to detect cycles.
pub(in crate::interpreter::value) type ContainerId = *const ();

/// Pairs of containers currently being compared.
pub(in crate::interpreter::value) type ComparedPairs = Vec<(ContainerId, ContainerId)>;

/// Represents a runtime value in the interpreter.
///
/// Null, booleans, numbers and strings are plain values. Arrays, objects,
/// functions, classes, instances and enums live behind reference-counted
/// handles, so copying a `Value` copies the reference and every alias
/// observes mutations made through another.
#[derive(Clone)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A double-precision number; the language has no separate integer type.
    Number(f64),
    /// An immutable string.
    String(String),
    /// A shared, growable array.
    Array(Rc<RefCell<Vec<Self>>>),
    /// A shared map from keys to values, keeping insertion order.
    Object(Rc<RefCell<Properties>>),
    /// A user function or bound method.
    Function(Rc<FunctionValue>),
    /// A host function.
    NativeFunction(NativeFunction),
    /// A class declaration.
    StaticClass(Rc<StaticClass>),
    /// An instance created by `new`.
    Instance(Rc<Instance>),
    /// An enum declaration.
    StaticEnum(Rc<StaticEnum>),
    /// An enum member, possibly tagged with a payload.
    Enum(Rc<EnumValue>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl From<Properties> for Value {
    fn from(v: Properties) -> Self {
        Self::Object(Rc::new(RefCell::new(v)))
    }
}

impl Value {
    /// Returns the name of the value's type as reported by `typeof`.
    ///
    /// # Example
    /// ```
    /// use tessera::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(1.0).type_name(), "number");
    /// assert_eq!(Value::from(vec![]).type_name(), "array");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
            Self::NativeFunction(_) => "native-function",
            Self::StaticClass(_) => "class",
            Self::Instance(_) => "instance",
            Self::StaticEnum(_) => "enum",
            Self::Enum(_) => "enum-member",
        }
    }

    /// Whether the value satisfies a condition.
    ///
    /// Only the boolean `true` does; every other value, including non-zero
    /// numbers and non-empty strings, counts as not satisfied.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Identity of the shared container behind an array, object or
    /// instance. Only these can hold a reference back to themselves.
    fn container_id(&self) -> Option<ContainerId> {
        match self {
            Self::Array(items) => Some(Rc::as_ptr(items).cast()),
            Self::Object(properties) => Some(Rc::as_ptr(properties).cast()),
            Self::Instance(instance) => Some(Rc::as_ptr(instance).cast()),
            _ => None,
        }
    }

    /// Structural equality that terminates on cyclic values.
    ///
    /// A pair of containers already under comparison further up is assumed
    /// equal; any real difference shows up elsewhere in the walk.
    pub(in crate::interpreter::value) fn eq_in(&self,
                                               other: &Self,
                                               compared: &mut ComparedPairs)
                                               -> bool {
        if let (Some(a), Some(b)) = (self.container_id(), other.container_id()) {
            if a == b || compared.contains(&(a, b)) {
                return true;
            }
            compared.push((a, b));
            let equal = ensure_sufficient_stack(|| self.eq_containers(other, compared));
            compared.pop();
            return equal;
        }

        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(&a.def, &b.def),
            (Self::NativeFunction(a), Self::NativeFunction(b)) => a.same_as(b),
            (Self::StaticClass(a), Self::StaticClass(b)) => Rc::ptr_eq(a, b),
            (Self::StaticEnum(a), Self::StaticEnum(b)) => Rc::ptr_eq(a, b),
            (Self::Enum(a), Self::Enum(b)) => {
                a.same_member(b)
                && match (&a.tagged, &b.tagged) {
                    (Some(x), Some(y)) => x.eq_in(y, compared),
                    (None, None) => true,
                    _ => false,
                }
            },
            _ => false,
        }
    }

    fn eq_containers(&self, other: &Self, compared: &mut ComparedPairs) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.eq_in(y, compared))
            },
            (Self::Object(a), Self::Object(b)) => a.borrow().eq_in(&b.borrow(), compared),
            (Self::Instance(a), Self::Instance(b)) => {
                Rc::ptr_eq(&a.class, &b.class)
                && a.fields.borrow().eq_in(&b.fields.borrow(), compared)
            },
            _ => false,
        }
    }

    /// Writes the display form, quoting strings when `nested` inside an
    /// array, object or payload.
    ///
    /// `open` holds the containers being written further up; meeting one of
    /// them again prints `[...]` or `{...}` instead of recursing.
    fn write(&self,
             f: &mut fmt::Formatter<'_>,
             open: &mut Vec<ContainerId>,
             nested: bool)
             -> fmt::Result {
        if let Some(id) = self.container_id() {
            if open.contains(&id) {
                let elided = if matches!(self, Self::Array(_)) { "[...]" } else { "{...}" };
                return write!(f, "{elided}");
            }
            open.push(id);
            let result = ensure_sufficient_stack(|| self.write_container(f, open));
            open.pop();
            return result;
        }

        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) if nested => write!(f, "\"{s}\""),
            Self::String(s) => write!(f, "{s}"),
            Self::Function(function) => write!(f, "fn {}", function.name()),
            Self::NativeFunction(native) => write!(f, "native fn {}", native.name()),
            Self::StaticClass(class) => write!(f, "class {}", class.name),
            Self::StaticEnum(enumeration) => write!(f, "enum {}", enumeration.name),
            Self::Enum(member) => {
                write!(f, "{}.{}", member.parent.name, member.name)?;
                if let Some(payload) = &member.tagged {
                    write!(f, "(")?;
                    payload.write(f, open, true)?;
                    write!(f, ")")?;
                }
                Ok(())
            },
            Self::Array(_) | Self::Object(_) | Self::Instance(_) => Ok(()),
        }
    }

    fn write_container(&self,
                       f: &mut fmt::Formatter<'_>,
                       open: &mut Vec<ContainerId>)
                       -> fmt::Result {
        match self {
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.write(f, open, true)?;
                }
                write!(f, "]")
            },
            Self::Object(properties) => write_properties(f, &properties.borrow(), open),
            Self::Instance(instance) => {
                write!(f, "{} ", instance.class.name)?;
                write_properties(f, &instance.fields.borrow(), open)
            },
            _ => Ok(()),
        }
    }
}

/// Structural equality.
///
/// Arrays compare element-wise and objects key/value-wise. Functions compare
/// by the identity of their declaration, natives by identity of the host
/// closure, classes and enums by identity of their declaration. Instances
/// need the same class and equal fields; enum members need the same
/// declaration, name and payload. Values that contain themselves compare
/// without looping.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut Vec::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, &mut Vec::new(), false)
    }
}

/// Containers print through their display form so cyclic values stay finite.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            other => write!(f, "Value({other})"),
        }
    }
}

fn write_properties(f: &mut fmt::Formatter<'_>,
                    properties: &Properties,
                    open: &mut Vec<ContainerId>)
                    -> fmt::Result {
    if properties.is_empty() {
        return write!(f, "{{}}");
    }
    write!(f, "{{ ")?;
    for (i, (key, value)) in properties.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{key}: ")?;
        value.write(f, open, true)?;
    }
    write!(f, " }}")
}
