//! Point-in-time snapshots of an entity's replicable state.
//!
//! An [`EntitySnapshot`] pairs an entity's identity with references to the
//! component instances relevant to one replication event. It is a transient,
//! non-owning value: built immediately before encoding, handed to the
//! serialisation boundary, and dropped. The borrow ties it to the entity, so
//! it cannot outlive the frame that built it.
//!
//! Two construction paths exist because spawn replication and steady-state
//! delta replication have different costs: [`EntitySnapshot::build_full`]
//! enumerates every attached component, while
//! [`EntitySnapshot::build_partial`] trusts the caller's list and skips the
//! scan entirely.

use serde::{Deserialize, Serialize};

use crate::component::{ComponentKind, Replicated};
use crate::entity::{EntityId, NetworkEntity};

/// Errors surfaced while constructing or encoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The entity has no valid (non-nil) identity. The caller must not
    /// replicate this entity until spawn registration has completed.
    #[error("entity has no valid identity")]
    InvalidEntity,

    /// Malformed caller input, e.g. parallel sequences of unequal length.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A component's state failed to encode.
    #[error("failed to encode component state: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
}

/// An immutable, non-owning view of an entity's identity and selected
/// components, built for handoff to the serialisation boundary.
///
/// The component sequence is either the full attachment list (spawn
/// replication) or a caller-supplied subset (delta replication); the two
/// paths are mutually exclusive per instance. The snapshot never copies or
/// mutates component state.
#[derive(Clone)]
pub struct EntitySnapshot<'a> {
    /// The source entity's identity.
    id: EntityId,
    /// References into the entity's attached components (or the caller's
    /// hand-picked subset), in deterministic order.
    components: Vec<&'a dyn Replicated>,
}

impl<'a> EntitySnapshot<'a> {
    /// Build a full snapshot: the complete, unfiltered enumeration of the
    /// entity's attached components at call time, in attachment order.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidEntity`] if the entity's identity is
    /// nil.
    pub fn build_full(entity: &'a NetworkEntity) -> Result<Self, SnapshotError> {
        if !entity.id().is_valid() {
            return Err(SnapshotError::InvalidEntity);
        }
        Ok(Self {
            id: entity.id(),
            components: entity.components().collect(),
        })
    }

    /// Build a partial snapshot: the entity's identity paired verbatim with
    /// the supplied component references — no re-enumeration, and no check
    /// that the components actually belong to the entity (that is the
    /// caller's responsibility, typically a dirty tracker's).
    ///
    /// An empty sequence is valid and represents an identity-only heartbeat.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidEntity`] if the entity's identity is
    /// nil.
    pub fn build_partial(
        entity: &NetworkEntity,
        components: Vec<&'a dyn Replicated>,
    ) -> Result<Self, SnapshotError> {
        if !entity.id().is_valid() {
            return Err(SnapshotError::InvalidEntity);
        }
        Ok(Self {
            id: entity.id(),
            components,
        })
    }

    /// Returns the snapshotted entity's identity.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the component references in this snapshot.
    #[must_use]
    pub fn components(&self) -> &[&'a dyn Replicated] {
        &self.components
    }

    /// Returns the kind tags of the snapshotted components, in sequence
    /// order.
    #[must_use]
    pub fn kinds(&self) -> Vec<ComponentKind> {
        self.components.iter().map(|c| c.kind()).collect()
    }

    /// Returns the number of components in this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if this is an identity-only (heartbeat) snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Encode every referenced component's state and return the wire-ready
    /// [`EntityState`].
    ///
    /// Encoding fails atomically: if any component fails to serialise, no
    /// state value is produced.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Encode`] if a component's state cannot be
    /// serialised.
    pub fn encode(&self) -> Result<EntityState, SnapshotError> {
        let mut kinds = Vec::with_capacity(self.components.len());
        let mut payloads = Vec::with_capacity(self.components.len());
        for component in &self.components {
            kinds.push(component.kind());
            payloads.push(component.state_bytes()?);
        }
        Ok(EntityState {
            id: self.id,
            kinds,
            payloads,
        })
    }
}

impl std::fmt::Debug for EntitySnapshot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitySnapshot")
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

/// The wire-ready encoded form of a snapshot: an identity plus parallel
/// sequences of component kinds and MessagePack payload bytes.
///
/// A state with no kinds and no payloads is an identity-only heartbeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityState {
    /// The entity's identity.
    pub id: EntityId,
    /// Kind tags, parallel with `payloads`.
    pub kinds: Vec<ComponentKind>,
    /// Encoded component state, one entry per kind.
    pub payloads: Vec<Vec<u8>>,
}

impl EntityState {
    /// Construct a state from already-encoded parts.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidEntity`] for a nil identity and
    /// [`SnapshotError::InvalidArgument`] when `kinds` and `payloads`
    /// disagree in length.
    pub fn from_parts(
        id: EntityId,
        kinds: Vec<ComponentKind>,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Self, SnapshotError> {
        if !id.is_valid() {
            return Err(SnapshotError::InvalidEntity);
        }
        if kinds.len() != payloads.len() {
            return Err(SnapshotError::InvalidArgument(
                "kinds and payloads must have equal length",
            ));
        }
        Ok(Self {
            id,
            kinds,
            payloads,
        })
    }

    /// Construct an identity-only heartbeat state.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidEntity`] for a nil identity.
    pub fn heartbeat(id: EntityId) -> Result<Self, SnapshotError> {
        Self::from_parts(id, Vec::new(), Vec::new())
    }

    /// Returns `true` if this state carries no component payloads.
    #[must_use]
    pub fn is_heartbeat(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Returns the payload bytes for the given kind, if present.
    #[must_use]
    pub fn payload_for(&self, kind: ComponentKind) -> Option<&[u8]> {
        self.kinds
            .iter()
            .position(|&k| k == kind)
            .map(|i| self.payloads[i].as_slice())
    }
}
