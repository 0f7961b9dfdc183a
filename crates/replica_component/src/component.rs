//! The replication contract for components.
//!
//! Every piece of entity state that is a candidate for replication must
//! implement [`NetworkComponent`]. The trait requires `Send + Sync + 'static`
//! plus serde bounds so component state can be encoded for transport.
//!
//! ## Polyglot Type Identity
//!
//! [`ComponentKind`] is derived from the component's **string name** using
//! the FNV-1a 64-bit hash algorithm. This is deterministic and
//! language-neutral — any participant can compute the same kind for a given
//! name, so the wire tag never depends on Rust type layout.

use serde::{Deserialize, Serialize};

/// A unique identifier for a replicable component type, derived from its
/// string name using the FNV-1a 64-bit hash algorithm.
///
/// The kind is deterministic and language-neutral: any implementation in any
/// language that applies FNV-1a to the same UTF-8 name bytes will produce
/// the same `ComponentKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentKind(pub u64);

impl ComponentKind {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentKind`] from a component's string name using
    /// the FNV-1a 64-bit hash algorithm.
    ///
    /// This is the **canonical** way to derive a `ComponentKind`.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentKind`] for a Rust component type `C`.
    ///
    /// Calls `C::type_name()` and hashes it with FNV-1a, producing the same
    /// result as [`ComponentKind::from_name`] with the same string.
    #[must_use]
    pub fn of<C: NetworkComponent>() -> Self {
        Self::from_name(C::type_name())
    }
}

/// The contract for replicable component types.
///
/// Implementing this trait declares, at compile time, that a type's state is
/// a candidate for replication. Which components an entity actually
/// replicates is resolved when they are attached at registration time —
/// there is no runtime type scanning.
///
/// # Examples
///
/// ```rust
/// use serde::{Serialize, Deserialize};
/// use replica_component::NetworkComponent;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl NetworkComponent for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait NetworkComponent:
    Send + Sync + 'static + Serialize + for<'de> Deserialize<'de>
{
    /// A human-readable name for this component type.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentKind`] for this component type.
    ///
    /// The default implementation hashes [`NetworkComponent::type_name()`]
    /// with FNV-1a 64-bit.
    fn kind() -> ComponentKind {
        ComponentKind::from_name(Self::type_name())
    }
}

/// An object-safe, read-only view of a replicable component instance.
///
/// Snapshots hold heterogeneous component references behind this trait. The
/// blanket impl below means every [`NetworkComponent`] is a `Replicated`
/// for free — attaching a component to an entity is all the registration a
/// type needs.
pub trait Replicated: Send + Sync {
    /// The kind tag of this component instance.
    fn kind(&self) -> ComponentKind;

    /// The human-readable type name of this component instance.
    fn type_name(&self) -> &'static str;

    /// Encode this component's current state to MessagePack bytes.
    ///
    /// # Errors
    ///
    /// Returns the underlying encoder error if serialisation fails.
    fn state_bytes(&self) -> Result<Vec<u8>, rmp_serde::encode::Error>;

    /// Downcast support for typed access to an attached component.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

impl<C: NetworkComponent> Replicated for C {
    fn kind(&self) -> ComponentKind {
        C::kind()
    }

    fn type_name(&self) -> &'static str {
        C::type_name()
    }

    fn state_bytes(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec_named(self)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
    struct Health {
        current: f32,
        max: f32,
    }

    impl NetworkComponent for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[test]
    fn test_kind_is_stable() {
        let k1 = <Health as NetworkComponent>::kind();
        let k2 = <Health as NetworkComponent>::kind();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_kind_matches_from_name() {
        // The trait method and the standalone function must produce the same kind.
        assert_eq!(<Health as NetworkComponent>::kind(), ComponentKind::from_name("Health"));
        assert_eq!(<Health as NetworkComponent>::kind(), ComponentKind::of::<Health>());
    }

    #[test]
    fn test_kind_differs_between_types() {
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        struct Velocity {
            x: f32,
            y: f32,
        }
        impl NetworkComponent for Velocity {
            fn type_name() -> &'static str {
                "Velocity"
            }
        }

        assert_ne!(<Health as NetworkComponent>::kind(), <Velocity as NetworkComponent>::kind());
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a 64-bit of empty string is the offset basis itself.
        assert_eq!(
            ComponentKind::from_name(""),
            ComponentKind(0xcbf2_9ce4_8422_2325)
        );
    }

    #[test]
    fn test_replicated_view_reports_type() {
        let health = Health {
            current: 80.0,
            max: 100.0,
        };
        let view: &dyn Replicated = &health;
        assert_eq!(view.kind(), <Health as NetworkComponent>::kind());
        assert_eq!(view.type_name(), "Health");
    }

    #[test]
    fn test_state_bytes_roundtrip() {
        let health = Health {
            current: 80.0,
            max: 100.0,
        };
        let view: &dyn Replicated = &health;
        let bytes = view.state_bytes().unwrap();
        let restored: Health = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(health, restored);
    }
}
