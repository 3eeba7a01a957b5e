/// The `Value` enum and its structural equality and display rules.
pub mod core;

/// Class values.
///
/// Defines the static class created by a class declaration and the
/// instances produced from it by `new`. Methods are stored once per class and
/// bound to their receiver when accessed.
pub mod class;

/// Enum values.
///
/// Defines the static enum created by an enum declaration and the member
/// values read from it, including members tagged with a payload.
pub mod enumeration;

/// Function values.
///
/// User functions are closures over their declaration environment; native
/// functions wrap host closures that follow the native calling contract.
pub mod function;

/// Insertion-ordered property storage for objects, instance fields and
/// static fields.
pub mod properties;
