//! Element records and the document store for the JTL engine.
//!
//! A page is an ordered list of element records produced by the markup
//! parser. The [`DocumentStore`] keeps that list, is the single source of
//! truth for document content, and is what scripts mutate. Everything drawn
//! on screen is derived from it.
//!
//! # Design
//!
//! Records are small attribute maps, so they are stored as insertion-ordered
//! vectors of `(name, value)` pairs rather than hash maps. Order matters twice:
//! attributes keep the order the markup declared them in, and records keep
//! their document order, which is the vertical stacking order and the address
//! used by index-based insertion.

/// Insertion-ordered element records and attribute values.
pub mod record;
/// Selector strings (`.class`, `#id`, tag name).
pub mod selector;
/// The ordered document store.
pub mod store;

pub use record::{AttrValue, ElementRecord, keys};
pub use selector::Selector;
pub use store::DocumentStore;

/// Tag used for records inserted without a `KEY`.
pub const PARAGRAPH_TAG: &str = "p";
