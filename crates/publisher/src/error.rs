use albumpress_core::error::CoreError;
use albumpress_hosting::HostingError;
use albumpress_storage::StorageError;

/// Anything that can abort a publish.
///
/// A thin composition of the per-layer error enums; the HTTP layer matches
/// through this to pick status codes.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Hosting(#[from] HostingError),
}
