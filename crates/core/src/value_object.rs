//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. A
/// value object can only be obtained through its validating constructor, so
/// holding one is proof that the wrapped value satisfied its field rules.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Sku(String);
///
/// impl ValueObject for Sku {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
