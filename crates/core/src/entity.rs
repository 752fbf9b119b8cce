//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Persisted documents are entities: two records with equal field values but
/// different identifiers are distinct.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
