//! MessagePack codec helpers.
//!
//! Thin wrappers around `rmp-serde` for encoding and decoding messages. All
//! wire payloads use MessagePack for compact binary serialisation.

use serde::{Deserialize, Serialize};

use replica_component::{EntityState, NetworkComponent};

use crate::error::NetError;

/// Encode a value to MessagePack bytes.
///
/// # Errors
///
/// Returns [`NetError::Encode`] if serialisation fails.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, NetError> {
    rmp_serde::to_vec(value).map_err(NetError::Encode)
}

/// Decode a value from MessagePack bytes.
///
/// # Errors
///
/// Returns [`NetError::Decode`] if deserialisation fails.
pub fn decode<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, NetError> {
    rmp_serde::from_slice(bytes).map_err(NetError::Decode)
}

/// Decode the payload for component type `C` out of an entity state.
///
/// Returns `Ok(None)` if the state carries no payload of that kind — a
/// partial state legitimately omits unchanged components.
///
/// # Errors
///
/// Returns [`NetError::Decode`] if a payload of the right kind is present
/// but does not deserialise as `C`.
pub fn decode_component<C: NetworkComponent>(state: &EntityState) -> Result<Option<C>, NetError> {
    match state.payload_for(C::kind()) {
        Some(bytes) => {
            let component = rmp_serde::from_slice(bytes).map_err(NetError::Decode)?;
            Ok(Some(component))
        }
        None => Ok(None),
    }
}
