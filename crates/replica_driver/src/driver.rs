//! The replication tick driver.
//!
//! Owns the entity registry and the dirty tracker, and turns them into one
//! [`ReplicationBatch`] per tick: full snapshots for newly spawned entities,
//! partial snapshots for changed ones, identity-only heartbeats, and despawn
//! notices. An entity that fails to snapshot or encode is skipped for the
//! tick and logged; retries belong to the transport layer.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use replica_component::{
    ComponentKind, EntityId, EntityRegistry, EntitySnapshot, EntityState, NetworkEntity,
    Replicated, SnapshotError,
};
use replica_net::ReplicationBatch;

use crate::config::ReplicationConfig;
use crate::dirty::DirtyTracker;

/// Drives replication: accumulates dirty state between ticks and emits one
/// batch of encoded entity states per tick.
#[derive(Debug)]
pub struct ReplicationDriver {
    /// Tick configuration.
    config: ReplicationConfig,
    /// Current tick counter.
    tick_id: u64,
    /// The entities being replicated.
    registry: EntityRegistry,
    /// Pending work for the next tick.
    dirty: DirtyTracker,
}

impl ReplicationDriver {
    /// Create a new driver with the given configuration.
    #[must_use]
    pub fn new(config: ReplicationConfig) -> Self {
        Self {
            config,
            tick_id: 0,
            registry: EntityRegistry::new(),
            dirty: DirtyTracker::new(),
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Returns a reference to the entity registry.
    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Returns a mutable reference to the entity registry.
    ///
    /// Mutating an entity through this reference does not mark it dirty;
    /// call [`mark_changed`](Self::mark_changed) for state that should
    /// replicate.
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    /// Register an entity and schedule its full spawn snapshot for the next
    /// tick.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidEntity`] for a nil identity and
    /// [`SnapshotError::InvalidArgument`] for an already registered one.
    pub fn spawn(&mut self, entity: NetworkEntity) -> Result<EntityId, SnapshotError> {
        let id = self.registry.register(entity)?;
        self.dirty.mark_spawned(id);
        debug!(%id, "entity scheduled for spawn replication");
        Ok(id)
    }

    /// Unregister an entity and schedule its despawn notice.
    ///
    /// Returns `true` if the entity was registered.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if self.registry.unregister(id).is_some() {
            self.dirty.mark_despawned(id);
            debug!(%id, "entity scheduled for despawn replication");
            return true;
        }
        false
    }

    /// Mark one component kind of an entity as changed, scheduling a partial
    /// snapshot for the next tick.
    pub fn mark_changed(&mut self, id: EntityId, kind: ComponentKind) {
        self.dirty.mark_changed(id, kind);
    }

    /// Schedule an identity-only heartbeat for an entity.
    pub fn mark_heartbeat(&mut self, id: EntityId) {
        self.dirty.mark_heartbeat(id);
    }

    /// Run one replication tick, draining all pending work into a batch.
    ///
    /// Entities that cannot be snapshotted or encoded are skipped for this
    /// tick with a warning; the tick itself never fails.
    pub fn tick(&mut self) -> ReplicationBatch {
        self.tick_id += 1;
        let work = self.dirty.take();
        let mut batch = ReplicationBatch::new(self.tick_id);

        // Spawns: full snapshots, in spawn order.
        for &id in work.spawned() {
            let Some(entity) = self.registry.get(id) else {
                warn!(%id, "spawned entity vanished before replication, skipping");
                continue;
            };
            match EntitySnapshot::build_full(entity).and_then(|s| s.encode()) {
                Ok(state) => batch.spawns.push(state),
                Err(error) => warn!(%id, %error, "skipping spawn replication this tick"),
            }
        }

        // Updates: partial snapshots covering only the flagged kinds, in
        // attachment order. A spawn already carries the full state.
        for (&id, kinds) in work.changed() {
            if work.spawned().contains(&id) {
                continue;
            }
            let Some(entity) = self.registry.get(id) else {
                warn!(%id, "changed entity is not registered, skipping");
                continue;
            };
            let components: Vec<&dyn Replicated> = entity
                .components()
                .filter(|c| kinds.contains(&c.kind()))
                .collect();
            match EntitySnapshot::build_partial(entity, components).and_then(|s| s.encode()) {
                Ok(state) => batch.updates.push(state),
                Err(error) => warn!(%id, %error, "skipping update replication this tick"),
            }
        }

        // Heartbeats: identity-only states, unless the entity already has a
        // record in this batch.
        for &id in work.heartbeats() {
            if work.spawned().contains(&id) || work.changed().contains_key(&id) {
                continue;
            }
            if !self.registry.contains(id) {
                warn!(%id, "heartbeat for unregistered entity, skipping");
                continue;
            }
            match EntityState::heartbeat(id) {
                Ok(state) => batch.updates.push(state),
                Err(error) => warn!(%id, %error, "skipping heartbeat this tick"),
            }
        }

        batch.despawns.extend_from_slice(work.despawned());

        debug!(
            tick_id = self.tick_id,
            spawns = batch.spawns.len(),
            updates = batch.updates.len(),
            despawns = batch.despawns.len(),
            "replication tick complete"
        );

        batch
    }

    /// Run the tick loop at the configured rate, handing each non-empty
    /// batch to `sink`.
    ///
    /// This is a blocking loop for local runs and tests; in a game it is
    /// replaced by calling [`tick`](Self::tick) from the host's frame
    /// callback. Stops after `max_ticks` when configured.
    pub fn run<F>(&mut self, mut sink: F)
    where
        F: FnMut(ReplicationBatch),
    {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting replication loop"
        );

        loop {
            let start = Instant::now();

            let batch = self.tick();
            if !batch.is_empty() {
                sink(batch);
            }

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "replication loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "replication tick exceeded time budget"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use replica_component::NetworkComponent;

    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Position {
        x: f32,
        y: f32,
    }

    impl NetworkComponent for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Health {
        current: f32,
    }

    impl NetworkComponent for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    fn driver() -> ReplicationDriver {
        ReplicationDriver::new(ReplicationConfig::default())
    }

    fn spawn_sample(driver: &mut ReplicationDriver) -> EntityId {
        let mut entity = NetworkEntity::with_generated_id();
        entity.attach(Position { x: 1.0, y: 2.0 });
        entity.attach(Health { current: 100.0 });
        driver.spawn(entity).unwrap()
    }

    #[test]
    fn test_spawn_produces_full_state() {
        let mut driver = driver();
        let id = spawn_sample(&mut driver);

        let batch = driver.tick();
        assert_eq!(batch.tick_id, 1);
        assert_eq!(batch.spawns.len(), 1);
        assert!(batch.updates.is_empty());

        let state = &batch.spawns[0];
        assert_eq!(state.id, id);
        assert_eq!(state.kinds, vec![<Position as NetworkComponent>::kind(), <Health as NetworkComponent>::kind()]);
    }

    #[test]
    fn test_change_produces_partial_state() {
        let mut driver = driver();
        let id = spawn_sample(&mut driver);
        let _ = driver.tick();

        driver.mark_changed(id, <Health as NetworkComponent>::kind());
        let batch = driver.tick();

        assert!(batch.spawns.is_empty());
        assert_eq!(batch.updates.len(), 1);
        let state = &batch.updates[0];
        assert_eq!(state.id, id);
        assert_eq!(state.kinds, vec![<Health as NetworkComponent>::kind()]);
    }

    #[test]
    fn test_spawn_and_change_same_tick_emit_only_spawn() {
        let mut driver = driver();
        let id = spawn_sample(&mut driver);
        driver.mark_changed(id, <Health as NetworkComponent>::kind());

        let batch = driver.tick();
        assert_eq!(batch.spawns.len(), 1);
        assert!(batch.updates.is_empty());
    }

    #[test]
    fn test_heartbeat_produces_identity_only_state() {
        let mut driver = driver();
        let id = spawn_sample(&mut driver);
        let _ = driver.tick();

        driver.mark_heartbeat(id);
        let batch = driver.tick();

        assert_eq!(batch.updates.len(), 1);
        assert!(batch.updates[0].is_heartbeat());
        assert_eq!(batch.updates[0].id, id);
    }

    #[test]
    fn test_heartbeat_suppressed_by_update() {
        let mut driver = driver();
        let id = spawn_sample(&mut driver);
        let _ = driver.tick();

        driver.mark_changed(id, <Health as NetworkComponent>::kind());
        driver.mark_heartbeat(id);
        let batch = driver.tick();

        // The update already proves liveness.
        assert_eq!(batch.updates.len(), 1);
        assert!(!batch.updates[0].is_heartbeat());
    }

    #[test]
    fn test_despawn_listed_in_batch() {
        let mut driver = driver();
        let id = spawn_sample(&mut driver);
        let _ = driver.tick();

        assert!(driver.despawn(id));
        let batch = driver.tick();
        assert_eq!(batch.despawns, vec![id]);
        assert!(!driver.despawn(id));
    }

    #[test]
    fn test_mark_for_unknown_entity_skipped() {
        let mut driver = driver();
        driver.mark_changed(EntityId::generate(), <Health as NetworkComponent>::kind());
        driver.mark_heartbeat(EntityId::generate());

        let batch = driver.tick();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_tracker_drained_each_tick() {
        let mut driver = driver();
        let id = spawn_sample(&mut driver);
        driver.mark_changed(id, <Health as NetworkComponent>::kind());

        let first = driver.tick();
        assert!(!first.is_empty());

        let second = driver.tick();
        assert!(second.is_empty());
        assert_eq!(second.tick_id, 2);
    }

    #[test]
    fn test_changed_kind_not_attached_yields_empty_update() {
        let mut driver = driver();
        let mut entity = NetworkEntity::with_generated_id();
        entity.attach(Position { x: 0.0, y: 0.0 });
        let id = driver.spawn(entity).unwrap();
        let _ = driver.tick();

        // Dirty mark for a kind the entity does not carry: the partial
        // snapshot simply selects nothing.
        driver.mark_changed(id, <Health as NetworkComponent>::kind());
        let batch = driver.tick();
        assert_eq!(batch.updates.len(), 1);
        assert!(batch.updates[0].is_heartbeat());
    }

    #[test]
    fn test_run_bounded_ticks() {
        let config = ReplicationConfig::default()
            .with_tick_rate(1000.0)
            .with_max_ticks(3);
        let mut driver = ReplicationDriver::new(config);
        spawn_sample(&mut driver);

        let mut batches = Vec::new();
        driver.run(|batch| batches.push(batch));

        assert_eq!(driver.tick_id(), 3);
        // Only the first tick had work; empty batches are not forwarded.
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].spawns.len(), 1);
    }
}
