use std::rc::Rc;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
    util::num::f64_to_index,
};

impl Context {
    /// Evaluates `object.property` or `object[property]`.
    pub(in crate::interpreter::evaluator) fn eval_member(&mut self,
                                                          object: &Expr,
                                                          property: &Expr,
                                                          computed: bool,
                                                          line: usize,
                                                          env: &Environment)
                                                          -> EvalResult<Flow> {
        self.resolve_or_mutate_member(object, property, computed, None, line, env)
    }

    /// Evaluates `target = value` and yields the assigned value.
    ///
    /// The right-hand side is evaluated first. Identifiers are rebound
    /// through the scope chain; member targets mutate their container.
    pub(in crate::interpreter::evaluator) fn eval_assignment(&mut self,
                                                              target: &Expr,
                                                              value: &Expr,
                                                              line: usize,
                                                              env: &Environment)
                                                              -> EvalResult<Flow> {
        let value = normal!(self.eval_expr(value, env));

        match target {
            Expr::Identifier { name, .. } => env.assign(name, value, line).map(Flow::Normal),
            Expr::Member { object,
                           property,
                           computed,
                           .. } => {
                self.resolve_or_mutate_member(object, property, *computed, Some(value), line, env)
            },
            other => Err(RuntimeError::TypeError { details: format!("cannot assign to {other:?}"),
                                                   line }),
        }
    }

    /// Walks a member path against the live value graph.
    ///
    /// With no `new_value` the member is read. Otherwise the terminal
    /// container (object entry, array element, instance field or static
    /// field) is mutated and the assigned value returned. Nested paths such
    /// as `a.b[0].c` resolve their prefix by ordinary evaluation, so every
    /// intermediate container is read, never copied.
    pub fn resolve_or_mutate_member(&mut self,
                                    object: &Expr,
                                    property: &Expr,
                                    computed: bool,
                                    new_value: Option<Value>,
                                    line: usize,
                                    env: &Environment)
                                    -> EvalResult<Flow> {
        let container = normal!(self.eval_expr(object, env));
        let key = match property {
            Expr::Identifier { name, .. } if !computed => Value::String(name.clone()),
            expr => normal!(self.eval_expr(expr, env)),
        };

        let value = match new_value {
            Some(value) => set_member(&container, &key, value, line)?,
            None => get_member(&container, &key, line)?,
        };
        Ok(Flow::Normal(value))
    }
}

/// Reads member `key` of `target`.
///
/// - Arrays and strings take a numeric index; reading past the end fails.
/// - Objects yield null for a missing key.
/// - Instances resolve fields first, then methods bound to the instance.
/// - Classes resolve static fields, then static methods bound to the class.
/// - Enums resolve their declared members.
///
/// # Errors
/// - `RuntimeError::IndexOutOfBounds` or `RuntimeError::InvalidIndex` for a
///   bad array or string index.
/// - `RuntimeError::UnknownMember` for an undeclared class, instance or enum
///   member.
/// - `RuntimeError::TypeError` for values that have no members.
pub fn get_member(target: &Value, key: &Value, line: usize) -> EvalResult<Value> {
    match target {
        Value::Array(items) => {
            let items = items.borrow();
            let index = index_of(key, line)?;
            items.get(index)
                 .cloned()
                 .ok_or(RuntimeError::IndexOutOfBounds { index,
                                                         len: items.len(),
                                                         line })
        },
        Value::String(s) => {
            let index = index_of(key, line)?;
            s.chars()
             .nth(index)
             .map(|c| Value::String(c.to_string()))
             .ok_or_else(|| RuntimeError::IndexOutOfBounds { index,
                                                             len: s.chars().count(),
                                                             line })
        },
        Value::Object(properties) => {
            Ok(properties.borrow().get(&key_name(key)).cloned().unwrap_or(Value::Null))
        },
        Value::Instance(instance) => {
            let name = key_name(key);
            if let Some(value) = instance.fields.borrow().get(&name) {
                return Ok(value.clone());
            }
            instance.class
                    .method(&name, target.clone())
                    .map(|method| Value::Function(Rc::new(method)))
                    .ok_or_else(|| unknown_member(name, target, line))
        },
        Value::StaticClass(class) => {
            let name = key_name(key);
            if let Some(value) = class.static_fields.borrow().get(&name) {
                return Ok(value.clone());
            }
            class.static_method(&name)
                 .map(|method| Value::Function(Rc::new(method)))
                 .ok_or_else(|| unknown_member(name, target, line))
        },
        Value::StaticEnum(enumeration) => {
            let name = key_name(key);
            enumeration.member(&name)
                       .map(|member| Value::Enum(Rc::new(member)))
                       .ok_or_else(|| unknown_member(name, target, line))
        },
        other => Err(RuntimeError::TypeError { details: format!("cannot read member '{}' of {}",
                                                                key_name(key),
                                                                other.type_name()),
                                               line }),
    }
}

/// Arrays never grow to this many elements or beyond.
pub const MAX_ARRAY_LEN: usize = 1 << 24;

/// Writes `value` to member `key` of `target` and returns it.
///
/// Writing past the end of an array pads the gap with null, up to
/// [`MAX_ARRAY_LEN`] elements. Instance fields must already exist; static
/// fields may be added.
///
/// # Errors
/// - `RuntimeError::InvalidIndex` for a bad array index.
/// - `RuntimeError::IndexOutOfBounds` when the write would grow an array to
///   [`MAX_ARRAY_LEN`] elements or more, or the memory cannot be reserved.
/// - `RuntimeError::UnknownMember` for an undeclared instance field.
/// - `RuntimeError::TypeError` for values that cannot be mutated.
pub fn set_member(target: &Value, key: &Value, value: Value, line: usize) -> EvalResult<Value> {
    match target {
        Value::Array(items) => {
            let index = index_of(key, line)?;
            let mut items = items.borrow_mut();
            if index >= items.len() {
                let len = items.len();
                let out_of_bounds = RuntimeError::IndexOutOfBounds { index, len, line };
                if index >= MAX_ARRAY_LEN {
                    return Err(out_of_bounds);
                }
                items.try_reserve(index + 1 - len).map_err(|_| out_of_bounds)?;
                items.resize(index + 1, Value::Null);
            }
            items[index] = value.clone();
        },
        Value::Object(properties) => {
            properties.borrow_mut().insert(key_name(key), value.clone());
        },
        Value::Instance(instance) => {
            let name = key_name(key);
            let updated = instance.fields
                                  .borrow_mut()
                                  .get_mut(&name)
                                  .map(|slot| *slot = value.clone())
                                  .is_some();
            if !updated {
                return Err(unknown_member(name, target, line));
            }
        },
        Value::StaticClass(class) => {
            class.static_fields.borrow_mut().insert(key_name(key), value.clone());
        },
        other => {
            return Err(RuntimeError::TypeError { details: format!("cannot assign member '{}' of \
                                                                   {}",
                                                                  key_name(key),
                                                                  other.type_name()),
                                                 line });
        },
    }
    Ok(value)
}

fn index_of(key: &Value, line: usize) -> EvalResult<usize> {
    match key {
        Value::Number(n) => f64_to_index(*n, line),
        other => Err(RuntimeError::InvalidIndex { index: other.to_string(),
                                                  line }),
    }
}

/// Object keys are strings; any other key value uses its display form.
fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn unknown_member(member: String, target: &Value, line: usize) -> RuntimeError {
    RuntimeError::UnknownMember { member,
                                  target: target.to_string(),
                                  line }
}
