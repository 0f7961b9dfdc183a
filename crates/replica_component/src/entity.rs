//! Entity identity and the networked entity.
//!
//! An [`EntityId`] is a 128-bit UUID, stable for the lifetime of the entity
//! across all participants. IDs are generated where the entity is spawned —
//! there is no central allocator, which is why they are UUIDs rather than
//! sequence numbers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::component::{ComponentKind, NetworkComponent, Replicated};

/// A globally unique entity identifier.
///
/// The nil UUID is the invalid sentinel: an entity whose identity is nil has
/// not finished spawn registration and must not be replicated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// The nil / invalid entity identity sentinel.
    pub const NIL: EntityId = EntityId(Uuid::nil());

    /// Generate a fresh random (v4) entity identity.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entity identity from an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn uuid(self) -> Uuid {
        self.0
    }

    /// Returns `true` if this is a valid (non-nil) identity.
    #[must_use]
    pub fn is_valid(self) -> bool {
        !self.0.is_nil()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// A networked entity: a stable identity plus the ordered list of replicable
/// components attached to it.
///
/// The attachment list *is* the capability registry — which components an
/// entity replicates is declared by attaching them, and the attachment order
/// is the stable enumeration order seen by full snapshots.
pub struct NetworkEntity {
    /// The entity's stable identity.
    id: EntityId,
    /// Attached components, in attachment order.
    components: Vec<Box<dyn Replicated>>,
}

impl NetworkEntity {
    /// Create a new entity with the given identity and no components.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            components: Vec::new(),
        }
    }

    /// Create a new entity with a freshly generated identity.
    #[must_use]
    pub fn with_generated_id() -> Self {
        Self::new(EntityId::generate())
    }

    /// Returns the entity's identity.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Attach a replicable component to this entity.
    ///
    /// Attachment order is preserved. A second component of an already
    /// attached kind is rejected and `false` is returned, keeping the
    /// enumeration duplicate-free.
    pub fn attach<C: NetworkComponent>(&mut self, component: C) -> bool {
        self.attach_boxed(Box::new(component))
    }

    /// Attach an already type-erased component.
    ///
    /// Returns `false` if a component of the same kind is already attached.
    pub fn attach_boxed(&mut self, component: Box<dyn Replicated>) -> bool {
        if self.has_kind(component.kind()) {
            return false;
        }
        self.components.push(component);
        true
    }

    /// Detach the component of the given kind, if attached.
    ///
    /// Returns `true` if a component was removed. Later attachments keep
    /// their relative order.
    pub fn detach(&mut self, kind: ComponentKind) -> bool {
        if let Some(pos) = self.components.iter().position(|c| c.kind() == kind) {
            self.components.remove(pos);
            return true;
        }
        false
    }

    /// Returns `true` if a component of the given kind is attached.
    #[must_use]
    pub fn has_kind(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.kind() == kind)
    }

    /// Returns the attached component of the given kind, if any.
    #[must_use]
    pub fn component_by_kind(&self, kind: ComponentKind) -> Option<&dyn Replicated> {
        self.components
            .iter()
            .find(|c| c.kind() == kind)
            .map(AsRef::as_ref)
    }

    /// Returns a typed reference to the attached component of type `C`.
    #[must_use]
    pub fn component<C: NetworkComponent>(&self) -> Option<&C> {
        self.component_by_kind(C::kind())
            .and_then(|c| c.as_any().downcast_ref::<C>())
    }

    /// Returns a typed mutable reference to the attached component of type
    /// `C`.
    ///
    /// Mutating a component does not mark it dirty; that is the caller's
    /// (or a dirty tracker's) job.
    #[must_use]
    pub fn component_mut<C: NetworkComponent>(&mut self) -> Option<&mut C> {
        let kind = C::kind();
        self.components
            .iter_mut()
            .find(|c| c.kind() == kind)
            .and_then(|c| c.as_any_mut().downcast_mut::<C>())
    }

    /// Enumerate the attached components in attachment order.
    pub fn components(&self) -> impl Iterator<Item = &dyn Replicated> {
        self.components.iter().map(AsRef::as_ref)
    }

    /// Returns the number of attached components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl std::fmt::Debug for NetworkEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkEntity")
            .field("id", &self.id)
            .field(
                "components",
                &self
                    .components
                    .iter()
                    .map(|c| c.type_name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
