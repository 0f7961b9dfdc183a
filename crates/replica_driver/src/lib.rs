//! # replica_driver
//!
//! The replication tick driver.
//!
//! The driver owns the entity registry and a dirty tracker. Gameplay code
//! registers entities, marks changed components, and calls
//! [`ReplicationDriver::tick`] from the host's frame callback; each tick
//! drains the pending work into one [`replica_net::ReplicationBatch`] of
//! encoded snapshots for the transport.
//!
//! ## Usage
//!
//! ```rust
//! use replica_component::NetworkEntity;
//! use replica_driver::{ReplicationConfig, ReplicationDriver};
//!
//! let mut driver = ReplicationDriver::new(ReplicationConfig::default());
//! let id = driver.spawn(NetworkEntity::with_generated_id()).unwrap();
//!
//! let batch = driver.tick();
//! assert_eq!(batch.spawns.len(), 1);
//! assert_eq!(batch.spawns[0].id, id);
//! ```

pub mod config;
pub mod dirty;
pub mod driver;

pub use config::ReplicationConfig;
pub use dirty::DirtyTracker;
pub use driver::ReplicationDriver;
