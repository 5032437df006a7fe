//! Typed field access for stored entities

use crate::filter::FieldValue;

/// Field access used by stores to evaluate filters and sort keys without
/// reflection. Field names match the entity's serialized document fields,
/// so the same descriptors work against MongoDB and in-memory stores.
pub trait Document {
    /// The unique identifier of the entity within its collection.
    fn document_id(&self) -> &str;

    /// The typed value of a named field, or `None` for unknown fields.
    fn field(&self, name: &str) -> Option<FieldValue>;
}
