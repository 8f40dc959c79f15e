//! Shared building blocks for seqlinq: the error kinds raised by cursors and
//! operators, the dynamic [`Value`] model, and the type identity helpers
//! [`is_of_type`] and [`cast_to`].

pub mod error;
pub mod types;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use types::{
    CastMode, Constructor, CtorId, TypeDescriptor, TypeKind, TypeMode, TypeRegistry, cast_natural, cast_to,
    is_of_type, is_of_type_strict, type_of,
};
pub use value::{Function, Object, Primitive, Value};
