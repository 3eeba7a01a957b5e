use crate::interpreter::value::core::{ComparedPairs, Value};

/// An insertion-ordered map from property names to values.
///
/// Objects are small in practice, so a vector with linear lookup keeps the
/// declaration order without a second index.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: Vec<(String, Value)>,
}

impl Properties {
    /// Creates an empty property map.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Creates a map where every key is bound to null, in the given order.
    pub fn with_null_fields<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        names.into_iter()
             .map(|name| (name.clone(), Value::Null))
             .collect()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find_map(|(name, value)| (name == key).then_some(value))
    }

    /// Stores `value` under `key`, replacing an existing entry in place or
    /// appending a new one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.get_mut(&key) {
            *slot = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Properties {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

/// Two property maps are equal when they hold the same keys with
/// structurally equal values, regardless of insertion order.
impl PartialEq for Properties {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut Vec::new())
    }
}

impl Properties {
    pub(in crate::interpreter::value) fn eq_in(&self,
                                               other: &Self,
                                               compared: &mut ComparedPairs)
                                               -> bool {
        self.len() == other.len()
        && self.iter().all(|(key, value)| {
                          other.get(key).is_some_and(|theirs| value.eq_in(theirs, compared))
                      })
    }
}
