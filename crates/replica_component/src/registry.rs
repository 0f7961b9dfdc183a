//! Entity registry — the scene-graph stand-in owning all networked entities.
//!
//! The registry is the single source of truth for which entities exist and
//! which components they replicate. It lives inside the single-threaded
//! per-frame construction window, so plain `HashMap` storage is sufficient.

use std::collections::HashMap;

use crate::entity::{EntityId, NetworkEntity};
use crate::snapshot::SnapshotError;

/// Registry of all networked entities, keyed by identity.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    /// Entities keyed by their stable identity.
    entities: HashMap<EntityId, NetworkEntity>,
}

impl EntityRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    /// Register an entity, taking ownership of it.
    ///
    /// Returns the entity's identity on success.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidEntity`] if the entity's identity is
    /// nil (spawn registration has not completed), and
    /// [`SnapshotError::InvalidArgument`] if the identity is already
    /// registered.
    pub fn register(&mut self, entity: NetworkEntity) -> Result<EntityId, SnapshotError> {
        let id = entity.id();
        if !id.is_valid() {
            return Err(SnapshotError::InvalidEntity);
        }
        if self.entities.contains_key(&id) {
            return Err(SnapshotError::InvalidArgument(
                "entity identity already registered",
            ));
        }
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Remove an entity from the registry.
    ///
    /// Returns the entity if it was registered.
    pub fn unregister(&mut self, id: EntityId) -> Option<NetworkEntity> {
        self.entities.remove(&id)
    }

    /// Returns a reference to the entity with the given identity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&NetworkEntity> {
        self.entities.get(&id)
    }

    /// Returns a mutable reference to the entity with the given identity.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut NetworkEntity> {
        self.entities.get_mut(&id)
    }

    /// Returns `true` if the identity is registered.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Returns an iterator over all registered entities.
    ///
    /// Iteration order across entities is unspecified; within one entity the
    /// component order is always attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkEntity> {
        self.entities.values()
    }

    /// Returns the number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entities are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
