use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::known::{self, type_of};
use super::{Constructor, CtorId, TypeDescriptor, TypeKind};
use crate::error::{Error, Result};
use crate::value::{Primitive, Value};

/// Name-keyed table of type descriptors.
///
/// A fresh registry already knows every descriptor in [`type_of`]. User types
/// are registered once through [`TypeRegistry::define`]; there is no
/// reflection, a value's type is whatever constructor it was built with.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    by_name: HashMap<Arc<str>, TypeDescriptor>,
    by_ctor: HashMap<CtorId, TypeDescriptor>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut by_name = HashMap::new();
        let mut by_ctor = HashMap::new();
        for descriptor in type_of::all() {
            by_name.insert(Arc::from(descriptor.name()), descriptor.clone());
            // Reference descriptors win the constructor slot; primitives are
            // resolved by form in `descriptor_of`.
            if descriptor.kind() != TypeKind::Primitive {
                by_ctor.insert(descriptor.constructor().id(), descriptor.clone());
            }
        }
        Self { by_name, by_ctor }
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user type deriving from `parent` (or `Object` when `None`).
    ///
    /// Defining an existing name again with the same parent returns the
    /// cached descriptor; any other redefinition is a [`Error::TypeConflict`].
    pub fn define(&mut self, name: &str, parent: Option<&TypeDescriptor>) -> Result<TypeDescriptor> {
        let parent_ctor = parent.map_or_else(|| Arc::clone(known::object_ctor()), |p| Arc::clone(p.constructor()));

        if let Some(existing) = self.by_name.get(name) {
            let ctor = existing.constructor();
            let same_parent = ctor.parent().is_some_and(|p| p.id() == parent_ctor.id());
            if !ctor.id().is_well_known() && same_parent {
                return Ok(existing.clone());
            }
            return Err(Error::TypeConflict { name: name.to_owned() });
        }

        let ctor = Constructor::new(name, Some(parent_ctor));
        let descriptor = TypeDescriptor::new(name, TypeKind::Reference, ctor);
        debug!(
            name,
            id = descriptor.constructor().id().as_u32(),
            parent = descriptor.constructor().parent().map(|p| p.name()),
            "registered type"
        );
        self.by_name.insert(Arc::from(name), descriptor.clone());
        self.by_ctor.insert(descriptor.constructor().id(), descriptor.clone());
        Ok(descriptor)
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Descriptor describing `value` in its current form. Objects built from
    /// constructors this registry never saw get a synthesized descriptor.
    pub fn descriptor_of(&self, value: &Value) -> Option<TypeDescriptor> {
        let descriptor = match value {
            Value::Null => return None,
            Value::Primitive(p) => match p {
                Primitive::Boolean(_) => type_of::BOOLEAN.clone(),
                Primitive::Number(_) => type_of::NUMBER.clone(),
                Primitive::String(_) => type_of::STRING.clone(),
            },
            other => {
                let ctor = other.constructor()?;
                self.by_ctor.get(&ctor.id()).cloned().unwrap_or_else(|| TypeDescriptor::from_constructor(ctor))
            }
        };
        Some(descriptor)
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(|name| &**name).collect();
        names.sort_unstable();
        names
    }
}
