use std::rc::Rc;

use crate::interpreter::value::core::Value;

/// The value bound to an enum name by its declaration.
#[derive(Debug)]
pub struct StaticEnum {
    pub name:    String,
    /// Member names in declaration order.
    pub members: Vec<String>,
}

impl StaticEnum {
    /// Returns the untagged member `name`, if declared.
    #[must_use]
    pub fn member(self: &Rc<Self>, name: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .any(|member| member == name)
            .then(|| EnumValue { name:   name.to_string(),
                                 parent: Rc::clone(self),
                                 tagged: None, })
    }
}

/// A member of a static enum, optionally carrying a payload.
#[derive(Debug)]
pub struct EnumValue {
    /// Member name.
    pub name:   String,
    /// The declaring enum.
    pub parent: Rc<StaticEnum>,
    /// Payload attached by calling the member with one argument.
    pub tagged: Option<Value>,
}

impl EnumValue {
    /// Returns a copy of this member carrying `payload`.
    ///
    /// The receiver and the declaring enum are left untouched.
    #[must_use]
    pub fn tag(&self, payload: Value) -> Self {
        Self { name:   self.name.clone(),
               parent: Rc::clone(&self.parent),
               tagged: Some(payload), }
    }

    /// Whether `other` is the same member of the same declaration,
    /// ignoring payloads.
    #[must_use]
    pub fn same_member(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.parent, &other.parent) && self.name == other.name
    }
}
