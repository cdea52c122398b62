//! Common utilities for the JTL document engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - deduplicated warnings routed through `tracing`
//! - **Page Paths** - resolving resources relative to the open page
//! - **Network** - blocking HTTP text fetch for loading remote pages

pub mod net;
pub mod path;
pub mod warning;
