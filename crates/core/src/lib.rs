//! Domain types and pure logic for the album publish service.
//!
//! Everything in this crate is free of network I/O: album metadata types,
//! branch-name derivation, and the template asset collector (local reads
//! only). The storage, hosting, and publisher crates build on these.

pub mod error;
pub mod naming;
pub mod template;
pub mod types;
