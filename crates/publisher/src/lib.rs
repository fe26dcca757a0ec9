//! End-to-end album publishing.
//!
//! [`Publisher`] composes the object store gateway, the template asset
//! collector, and the hosting control plane into the single idempotent
//! publish operation the HTTP layer exposes. The [`PublishService`] trait is
//! the injection seam for handler tests.

pub mod error;
pub mod publish;

pub use error::PublishError;
pub use publish::{
    PublishOutcome, PublishRequest, PublishService, Publisher, PublisherConfig,
    ALBUM_ID_PLACEHOLDER,
};
