//! # replica_component
//!
//! The data model of the replication layer — defines what a replicable
//! component is, how entities carry their identity and attachments, and how
//! point-in-time snapshots of that state are built for serialisation.
//!
//! This crate provides:
//!
//! - [`NetworkComponent`] trait — the contract replicable state must satisfy.
//! - [`ComponentKind`] — deterministic 64-bit type tags (FNV-1a of the name).
//! - [`EntityId`] / [`NetworkEntity`] — stable 128-bit identity plus the
//!   ordered component attachment list.
//! - [`EntityRegistry`] — ownership of all networked entities.
//! - [`EntitySnapshot`] / [`EntityState`] — non-owning snapshots and their
//!   wire-ready encoded form.

pub mod component;
pub mod entity;
pub mod registry;
pub mod snapshot;

pub use component::{ComponentKind, NetworkComponent, Replicated};
pub use entity::{EntityId, NetworkEntity};
pub use registry::EntityRegistry;
pub use snapshot::{EntitySnapshot, EntityState, SnapshotError};
