//! NotifyHub Shared Query Model
//!
//! Serializable filter and sort descriptors, the `Page` result wrapper, and
//! the `Document` field-access trait that lets any backing store evaluate
//! queries over notification entities.

pub mod document;
pub mod filter;
pub mod page;
pub mod sort;

pub use document::Document;
pub use filter::{Comparison, FieldValue, Filter};
pub use page::Page;
pub use sort::{Sort, SortDirection};
