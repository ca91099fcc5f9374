//! Entity trait: identity that survives field updates.

/// Anything stored under a stable identifier.
pub trait Entity {
    /// Identifier type (integer stamp, string key, uuid, ...).
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
