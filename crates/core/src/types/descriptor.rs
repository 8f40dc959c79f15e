use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::TypeMode;

/// Stable identifier of a constructor. Well-known constructors use fixed
/// ids below [`CtorId::FIRST_USER`]; user constructors draw from a
/// process-wide counter so ids never collide across registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CtorId(u32);

impl CtorId {
    pub const OBJECT: CtorId = CtorId(1);
    pub const BOOLEAN: CtorId = CtorId(2);
    pub const NUMBER: CtorId = CtorId(3);
    pub const STRING: CtorId = CtorId(4);
    pub const FUNCTION: CtorId = CtorId(5);
    pub const ARRAY: CtorId = CtorId(6);

    const FIRST_USER: u32 = 64;

    fn next_user() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(CtorId::FIRST_USER);
        CtorId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn is_well_known(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

/// Constructor identity plus its single-parent ancestry chain.
#[derive(Debug)]
pub struct Constructor {
    id: CtorId,
    name: Arc<str>,
    parent: Option<Arc<Constructor>>,
}

impl Constructor {
    pub(crate) fn with_id(id: CtorId, name: &str, parent: Option<Arc<Constructor>>) -> Self {
        Self { id, name: name.into(), parent }
    }

    /// Allocates a constructor with a fresh user id.
    pub fn new(name: &str, parent: Option<Arc<Constructor>>) -> Arc<Self> {
        Arc::new(Self::with_id(CtorId::next_user(), name, parent))
    }

    pub fn id(&self) -> CtorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<Constructor>> {
        self.parent.as_ref()
    }

    /// Walks the chain starting at `self` (inclusive).
    pub fn ancestry(&self) -> impl Iterator<Item = &Constructor> {
        core::iter::successors(Some(self), |ctor| ctor.parent.as_deref())
    }

    /// True if `ancestor` is `self` or appears on its parent chain.
    pub fn descends_from(&self, ancestor: &Constructor) -> bool {
        self.ancestry().any(|ctor| ctor.id == ancestor.id)
    }
}

impl PartialEq for Constructor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Constructor {}

impl Hash for Constructor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Reference,
    Special,
}

impl TypeKind {
    /// Mode that matches only the descriptor's own form: unwrapped values for
    /// primitive descriptors, reference values for everything else.
    pub fn strict_mode(self) -> TypeMode {
        match self {
            TypeKind::Primitive => TypeMode::PrimitiveOnly,
            TypeKind::Reference | TypeKind::Special => TypeMode::BoxedOnly,
        }
    }
}

/// Metadata used by `is_of_type` and `cast_to`. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: Arc<str>,
    kind: TypeKind,
    ctor: Arc<Constructor>,
}

impl TypeDescriptor {
    pub fn new(name: &str, kind: TypeKind, ctor: Arc<Constructor>) -> Self {
        Self { name: name.into(), kind, ctor }
    }

    /// Reference descriptor synthesized from a constructor identity.
    pub fn from_constructor(ctor: &Arc<Constructor>) -> Self {
        Self { name: ctor.name.clone(), kind: TypeKind::Reference, ctor: Arc::clone(ctor) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn constructor(&self) -> &Arc<Constructor> {
        &self.ctor
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
