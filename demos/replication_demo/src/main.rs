//! Replication demo — spawn entities, mutate state, and watch batches flow.
//!
//! Walks the full outbound path: entities are registered with the driver,
//! gameplay mutates their components and marks them dirty, and each tick
//! produces a [`ReplicationBatch`](replica_net::ReplicationBatch) that gets
//! encoded to MessagePack exactly as a transport would receive it.

use anyhow::Result;
use glam::Vec3;
use tracing::info;
use tracing_subscriber::EnvFilter;

use components::{Health, Name, Transform3D, Velocity};
use replica_component::{NetworkComponent, NetworkEntity};
use replica_driver::{ReplicationConfig, ReplicationDriver};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("replication_demo=info".parse()?),
        )
        .init();

    info!("replication demo starting");

    let mut driver = ReplicationDriver::new(ReplicationConfig::default());

    // A player with the full component roster.
    let mut player = NetworkEntity::with_generated_id();
    player.attach(Transform3D::from_position(Vec3::new(0.0, 1.0, 0.0)));
    player.attach(Velocity::ZERO);
    player.attach(Health::full(100.0));
    player.attach(Name::new("Player"));
    let player_id = driver.spawn(player)?;

    // A projectile with only spatial state.
    let mut projectile = NetworkEntity::with_generated_id();
    projectile.attach(Transform3D::from_position(Vec3::new(0.0, 1.5, 0.5)));
    projectile.attach(Velocity::new(0.0, 0.0, 40.0));
    let projectile_id = driver.spawn(projectile)?;

    // Tick 1: both entities go out as full spawn states.
    emit(&mut driver)?;

    // Gameplay: the player takes a hit. Mutate the component, then tell the
    // driver which kind changed so the next tick ships a partial state.
    if let Some(entity) = driver.registry_mut().get_mut(player_id)
        && let Some(health) = entity.component_mut::<Health>()
    {
        health.damage(35.0);
    }
    driver.mark_changed(player_id, Health::kind());
    driver.mark_heartbeat(projectile_id);

    // Tick 2: one partial update (Health only) plus a projectile heartbeat.
    emit(&mut driver)?;

    // The projectile hits something and is removed.
    driver.despawn(projectile_id);

    // Tick 3: the despawn notice goes out.
    emit(&mut driver)?;

    info!("replication demo complete");
    Ok(())
}

/// Tick the driver once and log what a transport would see.
fn emit(driver: &mut ReplicationDriver) -> Result<()> {
    let batch = driver.tick();
    let bytes = replica_net::encode(&batch)?;
    info!(
        tick_id = batch.tick_id,
        spawns = batch.spawns.len(),
        updates = batch.updates.len(),
        despawns = batch.despawns.len(),
        encoded_bytes = bytes.len(),
        "batch ready for transport"
    );
    Ok(())
}
