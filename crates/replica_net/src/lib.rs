//! # replica_net
//!
//! Serialisation boundary for the replication layer.
//!
//! This crate provides:
//!
//! - [`codec`] — MessagePack serialisation/deserialisation helpers.
//! - [`messages`] — Wire message types handed to the transport layer.
//! - [`error`] — Serialisation-layer error types.
//!
//! The transport itself is out of scope: callers take the encoded bytes and
//! ship them however they like.

pub mod codec;
pub mod error;
pub mod messages;

pub use codec::{decode, decode_component, encode};
pub use error::NetError;
pub use messages::ReplicationBatch;
