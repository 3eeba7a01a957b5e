use pretty_assertions::assert_eq;
use tessera::{
    error::RuntimeError,
    interpreter::{environment::Environment, value::core::Value},
};

#[test]
fn declare_overwrites_in_the_same_scope() {
    let env = Environment::new();
    env.declare("x", Value::Number(1.0), false);
    let returned = env.declare("x", Value::from("two"), false);

    assert_eq!(returned, Value::from("two"));
    assert_eq!(env.lookup("x", 1).unwrap(), Value::from("two"));
}

#[test]
fn inner_declaration_shadows_without_touching_the_parent() {
    let root = Environment::new();
    root.declare("x", Value::Number(1.0), false);

    let inner = root.child();
    inner.declare("x", Value::Number(2.0), false);

    assert_eq!(inner.lookup("x", 1).unwrap(), Value::Number(2.0));
    assert_eq!(root.lookup("x", 1).unwrap(), Value::Number(1.0));
}

#[test]
fn assign_updates_the_nearest_binding() {
    let root = Environment::new();
    root.declare("x", Value::Number(1.0), false);
    let inner = root.child().child();

    assert_eq!(inner.assign("x", Value::Number(5.0), 1).unwrap(), Value::Number(5.0));
    assert_eq!(root.lookup("x", 1).unwrap(), Value::Number(5.0));
    assert!(!inner.is_declared_locally("x"));
}

#[test]
fn constants_cannot_be_reassigned() {
    let env = Environment::new();
    env.declare("k", Value::Number(1.0), true);

    let err = env.child().assign("k", Value::Number(2.0), 4).unwrap_err();

    assert!(matches!(err, RuntimeError::ConstantReassignment { ref name, line: 4 } if name == "k"));
    assert_eq!(env.lookup("k", 1).unwrap(), Value::Number(1.0));
}

#[test]
fn constants_can_be_shadowed_by_an_inner_declaration() {
    let env = Environment::new();
    env.declare("k", Value::Number(1.0), true);

    let inner = env.child();
    inner.declare("k", Value::Number(2.0), false);
    inner.assign("k", Value::Number(3.0), 1).unwrap();

    assert_eq!(inner.lookup("k", 1).unwrap(), Value::Number(3.0));
}

#[test]
fn unknown_names_fail_lookup_and_assignment() {
    let env = Environment::new().child();

    assert!(matches!(env.lookup("missing", 2),
                     Err(RuntimeError::UnknownVariable { line: 2, .. })));
    assert!(matches!(env.assign("missing", Value::Null, 3),
                     Err(RuntimeError::UnknownVariable { line: 3, .. })));
}

#[test]
fn loop_permission_follows_the_scope_kind() {
    let root = Environment::new();
    assert!(!root.loop_permitted());

    let iteration = root.loop_scope();
    assert!(iteration.loop_permitted());
    assert!(iteration.child().child().loop_permitted());

    let function = iteration.child().function_scope();
    assert!(!function.loop_permitted());
    assert!(!function.child().loop_permitted());
}

#[test]
fn global_scope_has_constants_and_prelude() {
    let env = Environment::global();

    assert_eq!(env.lookup("true", 1).unwrap(), Value::Bool(true));
    assert_eq!(env.lookup("false", 1).unwrap(), Value::Bool(false));
    assert_eq!(env.lookup("null", 1).unwrap(), Value::Null);
    for name in ["print", "len", "push", "typeof", "str", "assert"] {
        assert_eq!(env.lookup(name, 1).unwrap().type_name(), "native-function");
    }
    assert!(env.assign("true", Value::Bool(false), 1).is_err());
}

#[test]
fn clones_share_bindings() {
    let env = Environment::new();
    let alias = env.clone();
    alias.declare("x", Value::Number(1.0), false);

    assert_eq!(env.lookup("x", 1).unwrap(), Value::Number(1.0));
}
