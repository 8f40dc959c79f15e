//! Type identity: descriptors, the registry and the `is`/`cast` rules.

mod descriptor;
mod identity;
pub(crate) mod known;
mod registry;

pub use descriptor::{Constructor, CtorId, TypeDescriptor, TypeKind};
pub use identity::{CastMode, TypeMode, cast_natural, cast_to, is_of_type, is_of_type_strict};
pub use known::type_of;
pub use registry::TypeRegistry;
