//! Wire message types handed to the transport layer.
//!
//! All message types derive `Serialize` and `Deserialize` for MessagePack
//! transport. The transport itself (sockets, framing, retries) is an
//! external collaborator — this crate stops at encoded bytes.

use serde::{Deserialize, Serialize};

use replica_component::{EntityId, EntityState};

/// Everything one replication tick produced, ready for transmission.
///
/// Spawned entities carry full states (every attached component); changed
/// entities carry partial states (only the components the dirty tracker
/// flagged, or none at all for an identity-only heartbeat).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationBatch {
    /// Monotonically increasing tick counter.
    pub tick_id: u64,
    /// Full states for entities spawned since the last tick.
    pub spawns: Vec<EntityState>,
    /// Partial states for entities whose components changed.
    pub updates: Vec<EntityState>,
    /// Identities of entities despawned since the last tick.
    pub despawns: Vec<EntityId>,
}

impl ReplicationBatch {
    /// Create an empty batch for the given tick.
    #[must_use]
    pub fn new(tick_id: u64) -> Self {
        Self {
            tick_id,
            spawns: Vec::new(),
            updates: Vec::new(),
            despawns: Vec::new(),
        }
    }

    /// Returns `true` if the batch carries nothing worth transmitting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty() && self.updates.is_empty() && self.despawns.is_empty()
    }

    /// Total number of entity records in the batch.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.spawns.len() + self.updates.len() + self.despawns.len()
    }
}
