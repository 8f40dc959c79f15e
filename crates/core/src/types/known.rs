//! Well-known constructors and descriptors, established once per process.

use std::sync::{Arc, LazyLock};

use super::{Constructor, CtorId, TypeDescriptor, TypeKind};

static OBJECT_CTOR: LazyLock<Arc<Constructor>> =
    LazyLock::new(|| Arc::new(Constructor::with_id(CtorId::OBJECT, "Object", None)));
static BOOLEAN_CTOR: LazyLock<Arc<Constructor>> = LazyLock::new(|| object_child(CtorId::BOOLEAN, "Boolean"));
static NUMBER_CTOR: LazyLock<Arc<Constructor>> = LazyLock::new(|| object_child(CtorId::NUMBER, "Number"));
static STRING_CTOR: LazyLock<Arc<Constructor>> = LazyLock::new(|| object_child(CtorId::STRING, "String"));
static FUNCTION_CTOR: LazyLock<Arc<Constructor>> = LazyLock::new(|| object_child(CtorId::FUNCTION, "Function"));
static ARRAY_CTOR: LazyLock<Arc<Constructor>> = LazyLock::new(|| object_child(CtorId::ARRAY, "Array"));

fn object_child(id: CtorId, name: &str) -> Arc<Constructor> {
    Arc::new(Constructor::with_id(id, name, Some(Arc::clone(&OBJECT_CTOR))))
}

pub(crate) fn object_ctor() -> &'static Arc<Constructor> {
    &OBJECT_CTOR
}

pub(crate) fn boolean_ctor() -> &'static Arc<Constructor> {
    &BOOLEAN_CTOR
}

pub(crate) fn number_ctor() -> &'static Arc<Constructor> {
    &NUMBER_CTOR
}

pub(crate) fn string_ctor() -> &'static Arc<Constructor> {
    &STRING_CTOR
}

pub(crate) fn function_ctor() -> &'static Arc<Constructor> {
    &FUNCTION_CTOR
}

pub(crate) fn array_ctor() -> &'static Arc<Constructor> {
    &ARRAY_CTOR
}

fn descriptor(name: &str, kind: TypeKind, ctor: &Arc<Constructor>) -> TypeDescriptor {
    TypeDescriptor::new(name, kind, Arc::clone(ctor))
}

/// Descriptors for the built-in types.
///
/// Lower-case names describe the unwrapped primitive form; capitalised names
/// describe the reference form sharing the same constructor.
pub mod type_of {
    use std::sync::LazyLock;

    use super::*;

    pub static BOOLEAN: LazyLock<TypeDescriptor> =
        LazyLock::new(|| descriptor("boolean", TypeKind::Primitive, &BOOLEAN_CTOR));
    pub static NUMBER: LazyLock<TypeDescriptor> =
        LazyLock::new(|| descriptor("number", TypeKind::Primitive, &NUMBER_CTOR));
    pub static STRING: LazyLock<TypeDescriptor> =
        LazyLock::new(|| descriptor("string", TypeKind::Primitive, &STRING_CTOR));

    pub static BOOLEAN_OBJECT: LazyLock<TypeDescriptor> =
        LazyLock::new(|| descriptor("Boolean", TypeKind::Reference, &BOOLEAN_CTOR));
    pub static NUMBER_OBJECT: LazyLock<TypeDescriptor> =
        LazyLock::new(|| descriptor("Number", TypeKind::Reference, &NUMBER_CTOR));
    pub static STRING_OBJECT: LazyLock<TypeDescriptor> =
        LazyLock::new(|| descriptor("String", TypeKind::Reference, &STRING_CTOR));
    pub static FUNCTION: LazyLock<TypeDescriptor> =
        LazyLock::new(|| descriptor("Function", TypeKind::Special, &FUNCTION_CTOR));
    pub static ARRAY: LazyLock<TypeDescriptor> =
        LazyLock::new(|| descriptor("Array", TypeKind::Reference, &ARRAY_CTOR));
    pub static OBJECT: LazyLock<TypeDescriptor> =
        LazyLock::new(|| descriptor("Object", TypeKind::Reference, &OBJECT_CTOR));

    /// Every well-known descriptor, primitives first.
    pub fn all() -> [&'static TypeDescriptor; 9] {
        [
            &*BOOLEAN,
            &*NUMBER,
            &*STRING,
            &*BOOLEAN_OBJECT,
            &*NUMBER_OBJECT,
            &*STRING_OBJECT,
            &*FUNCTION,
            &*ARRAY,
            &*OBJECT,
        ]
    }
}
