//! Serialisation-layer error types.

/// Errors that can occur at the serialisation boundary.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// Failed to encode a message to MessagePack.
    #[error("failed to encode message: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode a message from MessagePack.
    #[error("failed to decode message: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// A snapshot could not be produced or encoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] replica_component::SnapshotError),
}
