//! Read-only services the renderer consumes from upstream.

use cinder_ast::{FieldReference, MethodReference};

/// Maps tree-level entities to stable emitted identifiers. Implementations
/// are read-only for the duration of a render and may be shared between
/// renderer instances.
pub trait NamingStrategy {
    /// Name of a local variable slot.
    fn variable_name(&self, index: usize) -> String;

    /// Fully qualified name used for static and special calls.
    fn full_method_name(&self, method: &MethodReference) -> String;

    /// Member name used for virtual dispatch (`receiver.name(...)`).
    fn instance_method_name(&self, method: &MethodReference) -> String;

    /// Name of the allocating initializer for constructor calls.
    fn initializer_name(&self, method: &MethodReference) -> String;

    /// Emitted name of a class reference.
    fn class_name(&self, class_name: &str) -> String;

    /// Name of a class's static-initializer thunk.
    fn class_init_name(&self, class_name: &str) -> String;

    /// Member name of an instance field.
    fn field_name(&self, field: &FieldReference) -> String;

    /// Emitted name of a static field.
    fn static_field_name(&self, field: &FieldReference) -> String;

    /// Name of a runtime support function (`$rt_*`, `Long_*`). The default
    /// keeps the well-known name; minifying strategies may shorten it.
    fn function_name(&self, name: &str) -> String {
        name.to_owned()
    }
}

/// Answers the two class-shape questions the renderer needs: cast-guard
/// selection and static-initializer elision.
pub trait ClassSource {
    /// Whether the named type is a known concrete class (not an interface).
    fn is_concrete_class(&self, class_name: &str) -> bool;

    /// Whether the named class exists and declares a static initializer.
    fn has_static_initializer(&self, class_name: &str) -> bool;
}
