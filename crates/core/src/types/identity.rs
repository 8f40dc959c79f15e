//! `is_of_type` / `cast_to`: membership checks and primitive/boxed coercion.

use crate::error::{Error, Result};
use crate::value::Value;

use super::TypeDescriptor;

/// How a value's form is taken into account by [`is_of_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeMode {
    /// Only unwrapped primitives whose natural constructor is the type's.
    PrimitiveOnly,
    /// Only reference values whose constructor is, or descends from, the type's.
    BoxedOnly,
    /// Either form, or an exact constructor match.
    #[default]
    Either,
}

/// Form produced by [`cast_to`] once membership has been established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CastMode {
    /// Unwrap boxed primitives; non-primitive values are rejected.
    ToPrimitive,
    /// Wrap primitives; reference values pass through.
    ToBoxed,
    /// Keep whichever form the value already has.
    #[default]
    Inherit,
}

/// Decides whether `value` belongs to `ty` under `mode`. Null never does.
pub fn is_of_type(value: &Value, ty: &TypeDescriptor, mode: TypeMode) -> bool {
    let Some(ctor) = value.constructor() else {
        return false;
    };
    match mode {
        TypeMode::PrimitiveOnly => is_primitive_instance(value, ty),
        TypeMode::BoxedOnly => is_reference_instance(value, ty),
        // Union of all checks: a value accepted by any of them matches.
        TypeMode::Either => {
            is_primitive_instance(value, ty)
                || is_reference_instance(value, ty)
                || ctor.id() == ty.constructor().id()
        }
    }
}

/// [`is_of_type`] using the mode implied by the descriptor's kind.
pub fn is_of_type_strict(value: &Value, ty: &TypeDescriptor) -> bool {
    is_of_type(value, ty, ty.kind().strict_mode())
}

fn is_primitive_instance(value: &Value, ty: &TypeDescriptor) -> bool {
    match value {
        Value::Primitive(p) => p.constructor().id() == ty.constructor().id(),
        _ => false,
    }
}

fn is_reference_instance(value: &Value, ty: &TypeDescriptor) -> bool {
    value.is_reference() && value.constructor().is_some_and(|ctor| ctor.descends_from(ty.constructor()))
}

/// Coerces `value` into `ty`, failing with [`Error::InvalidCast`] when the
/// value is not of the type under [`TypeMode::Either`].
pub fn cast_to(value: Value, ty: &TypeDescriptor, mode: CastMode) -> Result<Value> {
    if !is_of_type(&value, ty, TypeMode::Either) {
        return Err(Error::invalid_cast(&value, ty));
    }
    match mode {
        CastMode::ToPrimitive => match value {
            Value::Primitive(p) | Value::Boxed(p) => Ok(Value::Primitive(p)),
            other => Err(Error::invalid_cast(&other, ty)),
        },
        CastMode::ToBoxed => match value {
            Value::Primitive(p) => Ok(Value::Boxed(p)),
            other => Ok(other),
        },
        CastMode::Inherit => Ok(value),
    }
}

/// [`cast_to`] into the descriptor's own form: unwrapped for primitive
/// descriptors, boxed for everything else.
pub fn cast_natural(value: Value, ty: &TypeDescriptor) -> Result<Value> {
    let mode = match ty.kind() {
        super::TypeKind::Primitive => CastMode::ToPrimitive,
        super::TypeKind::Reference | super::TypeKind::Special => CastMode::ToBoxed,
    };
    cast_to(value, ty, mode)
}
