use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::EvalResult,
        value::{core::Value, function::NativeFunction},
    },
    util::num::usize_to_f64_checked,
};

/// Binds every prelude native into `env` as a constant.
pub fn install(env: &Environment) {
    let natives: [(&str, fn(&[Value], &Environment) -> EvalResult<Value>); 6] =
        [("print", print),
         ("len", len),
         ("push", push),
         ("typeof", type_of),
         ("str", str),
         ("assert", assert)];

    for (name, func) in natives {
        env.declare(name, Value::NativeFunction(NativeFunction::new(name, func)), true);
    }
}

/// Checks that a native received exactly `expected` arguments.
fn check_arity(name: &str, args: &[Value], expected: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::native(name,
                                 format!("expected {expected} argument(s), got {}", args.len())))
    }
}

/// Writes its arguments to standard output separated by spaces and returns
/// null.
///
/// # Example
/// ```
/// use tessera::interpreter::{environment::Environment, prelude::print, value::core::Value};
///
/// let result = print(&[Value::from("hello"), Value::Number(1.0)], &Environment::new()).unwrap();
///
/// assert_eq!(result, Value::Null);
/// ```
pub fn print(args: &[Value], _env: &Environment) -> EvalResult<Value> {
    let line = args.iter()
                   .map(ToString::to_string)
                   .collect::<Vec<_>>()
                   .join(" ");
    println!("{line}");
    Ok(Value::Null)
}

/// Returns the number of elements of an array, characters of a string or
/// entries of an object.
pub fn len(args: &[Value], _env: &Environment) -> EvalResult<Value> {
    check_arity("len", args, 1)?;

    let count = match &args[0] {
        Value::Array(items) => items.borrow().len(),
        Value::String(s) => s.chars().count(),
        Value::Object(properties) => properties.borrow().len(),
        other => {
            return Err(RuntimeError::native("len",
                                            format!("cannot take the length of {}",
                                                    other.type_name())));
        },
    };

    usize_to_f64_checked(count, RuntimeError::native("len", "length is too large")).map(Value::Number)
}

/// Appends a value to an array in place and returns the array.
pub fn push(args: &[Value], _env: &Environment) -> EvalResult<Value> {
    check_arity("push", args, 2)?;

    let Value::Array(items) = &args[0] else {
        return Err(RuntimeError::native("push",
                                        format!("expected an array, found {}",
                                                args[0].type_name())));
    };
    items.borrow_mut().push(args[1].clone());
    Ok(args[0].clone())
}

/// Returns the type name of its argument as a string.
pub fn type_of(args: &[Value], _env: &Environment) -> EvalResult<Value> {
    check_arity("typeof", args, 1)?;

    Ok(Value::from(args[0].type_name()))
}

/// Returns the display form of its argument.
pub fn str(args: &[Value], _env: &Environment) -> EvalResult<Value> {
    check_arity("str", args, 1)?;

    Ok(Value::String(args[0].to_string()))
}

/// Fails unless its argument is exactly `true`. Returns null.
///
/// # Example
/// ```
/// use tessera::interpreter::{environment::Environment, prelude::assert, value::core::Value};
///
/// let env = Environment::new();
///
/// assert!(assert(&[Value::Bool(true)], &env).is_ok());
/// assert!(assert(&[Value::Number(1.0)], &env).is_err());
/// ```
pub fn assert(args: &[Value], _env: &Environment) -> EvalResult<Value> {
    check_arity("assert", args, 1)?;

    if args[0].is_true() {
        Ok(Value::Null)
    } else {
        Err(RuntimeError::native("assert", format!("assertion failed, got {}", args[0])))
    }
}
