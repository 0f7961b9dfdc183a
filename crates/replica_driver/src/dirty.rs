//! Dirty tracking — which entities need replication work on the next tick.
//!
//! The tracker accumulates marks between ticks and is drained whole when the
//! driver ticks. Marks made after a drain belong to the next tick.

use std::collections::{BTreeSet, HashMap};

use replica_component::{ComponentKind, EntityId};

/// Accumulates replication work between ticks.
///
/// Spawn marks request a full snapshot; change marks request a partial
/// snapshot covering the flagged kinds; heartbeat marks request an
/// identity-only state. Despawn marks announce removal and cancel any other
/// pending work for the identity.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    /// Entities spawned since the last tick, in spawn order.
    spawned: Vec<EntityId>,
    /// Changed component kinds per entity.
    changed: HashMap<EntityId, BTreeSet<ComponentKind>>,
    /// Entities due an identity-only heartbeat, in mark order.
    heartbeats: Vec<EntityId>,
    /// Entities despawned since the last tick, in despawn order.
    despawned: Vec<EntityId>,
}

impl DirtyTracker {
    /// Create a new empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an entity as newly spawned (full snapshot due).
    pub fn mark_spawned(&mut self, id: EntityId) {
        if !self.spawned.contains(&id) {
            self.spawned.push(id);
        }
    }

    /// Mark one component kind of an entity as changed (partial snapshot
    /// due).
    pub fn mark_changed(&mut self, id: EntityId, kind: ComponentKind) {
        self.changed.entry(id).or_default().insert(kind);
    }

    /// Mark an entity as due an identity-only heartbeat.
    pub fn mark_heartbeat(&mut self, id: EntityId) {
        if !self.heartbeats.contains(&id) {
            self.heartbeats.push(id);
        }
    }

    /// Mark an entity as despawned.
    ///
    /// Pending change and heartbeat marks for the identity are dropped. If
    /// the entity was spawn-marked in the same window, the spawn is
    /// cancelled too and no despawn is recorded — the entity was never
    /// announced, so there is nothing to retract.
    pub fn mark_despawned(&mut self, id: EntityId) {
        self.changed.remove(&id);
        self.heartbeats.retain(|&h| h != id);

        if let Some(pos) = self.spawned.iter().position(|&s| s == id) {
            self.spawned.remove(pos);
            return;
        }
        if !self.despawned.contains(&id) {
            self.despawned.push(id);
        }
    }

    /// Entities spawned since the last drain, in spawn order.
    #[must_use]
    pub fn spawned(&self) -> &[EntityId] {
        &self.spawned
    }

    /// Changed component kinds per entity.
    #[must_use]
    pub fn changed(&self) -> &HashMap<EntityId, BTreeSet<ComponentKind>> {
        &self.changed
    }

    /// Entities due a heartbeat, in mark order.
    #[must_use]
    pub fn heartbeats(&self) -> &[EntityId] {
        &self.heartbeats
    }

    /// Entities despawned since the last drain, in despawn order.
    #[must_use]
    pub fn despawned(&self) -> &[EntityId] {
        &self.despawned
    }

    /// Returns `true` if no work is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
            && self.changed.is_empty()
            && self.heartbeats.is_empty()
            && self.despawned.is_empty()
    }

    /// Drain all pending work, leaving the tracker empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(name: &str) -> ComponentKind {
        ComponentKind::from_name(name)
    }

    #[test]
    fn test_marks_accumulate() {
        let mut tracker = DirtyTracker::new();
        let a = EntityId::generate();
        let b = EntityId::generate();

        tracker.mark_spawned(a);
        tracker.mark_changed(b, kind("Health"));
        tracker.mark_changed(b, kind("Position"));
        tracker.mark_heartbeat(a);

        assert_eq!(tracker.spawned(), &[a]);
        assert_eq!(tracker.changed()[&b].len(), 2);
        assert_eq!(tracker.heartbeats(), &[a]);
        assert!(!tracker.is_empty());
    }

    #[test]
    fn test_duplicate_marks_collapse() {
        let mut tracker = DirtyTracker::new();
        let a = EntityId::generate();

        tracker.mark_spawned(a);
        tracker.mark_spawned(a);
        tracker.mark_changed(a, kind("Health"));
        tracker.mark_changed(a, kind("Health"));
        tracker.mark_heartbeat(a);
        tracker.mark_heartbeat(a);

        assert_eq!(tracker.spawned().len(), 1);
        assert_eq!(tracker.changed()[&a].len(), 1);
        assert_eq!(tracker.heartbeats().len(), 1);
    }

    #[test]
    fn test_despawn_cancels_pending_work() {
        let mut tracker = DirtyTracker::new();
        let a = EntityId::generate();

        tracker.mark_changed(a, kind("Health"));
        tracker.mark_heartbeat(a);
        tracker.mark_despawned(a);

        assert!(tracker.changed().is_empty());
        assert!(tracker.heartbeats().is_empty());
        assert_eq!(tracker.despawned(), &[a]);
    }

    #[test]
    fn test_despawn_of_unannounced_spawn_is_silent() {
        let mut tracker = DirtyTracker::new();
        let a = EntityId::generate();

        tracker.mark_spawned(a);
        tracker.mark_despawned(a);

        // Never announced, nothing to retract.
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_take_drains() {
        let mut tracker = DirtyTracker::new();
        let a = EntityId::generate();
        tracker.mark_spawned(a);

        let drained = tracker.take();
        assert_eq!(drained.spawned(), &[a]);
        assert!(tracker.is_empty());
    }
}
