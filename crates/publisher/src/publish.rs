//! The publish orchestration sequence.
//!
//! One publish is a strict sequence: ensure the deployment branch, gather
//! album data and template assets, stage everything under the deploy prefix
//! in the publish bucket, trigger a deployment, then point the album's
//! subdomain at the branch. Every step is idempotent (or safely repeatable),
//! so a failed publish is retried by simply invoking it again.

use std::path::PathBuf;

use async_trait::async_trait;
use futures::future::try_join_all;

use albumpress_core::error::CoreError;
use albumpress_core::naming::derive_branch_name;
use albumpress_core::template::{collect_template_assets, template_dist_dir, TemplateAsset};
use albumpress_core::types::AlbumMeta;
use albumpress_hosting::{
    ensure_branch, ensure_domain_association, upsert_subdomain, ControlPlane,
};
use albumpress_storage::{join_key, ObjectStore, StorageError};

use crate::error::PublishError;

/// Token replaced with the real album identifier in the designated script
/// asset (see [`PublisherConfig::album_script`]).
pub const ALBUM_ID_PLACEHOLDER: &str = "PLACEHOLDER_ALBUM_ID";

/// Template used when a request does not name one.
pub const DEFAULT_TEMPLATE: &str = "Minimal";

/// Content-type applied to copied photos whose source object has none.
const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/webp";

/// Configuration injected into [`Publisher`]; loaded once at startup.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Bucket holding album metadata and photo sources.
    pub storage_bucket: String,
    /// Bucket deployments are staged in and served from.
    pub publish_bucket: String,
    /// Key prefix of album documents inside the owner scope.
    pub albums_prefix: String,
    /// Root of the pre-built template outputs.
    pub templates_dir: PathBuf,
    /// Root domain for subdomain mapping; `None` skips domain setup and
    /// omits the public URL.
    pub root_domain: Option<String>,
    /// Relative path or basename of the script asset that carries
    /// [`ALBUM_ID_PLACEHOLDER`]; `None` uploads all assets verbatim.
    pub album_script: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub album_id: String,
    pub template: Option<String>,
    pub owner_identity_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub branch: String,
    /// `https://<branch>.<root domain>/`, absent without a root domain.
    pub url: Option<String>,
}

/// Object-safe publish seam for the HTTP layer.
#[async_trait]
pub trait PublishService: Send + Sync {
    async fn publish(&self, request: PublishRequest) -> Result<PublishOutcome, PublishError>;
}

/// The publish orchestrator.
pub struct Publisher<S, P> {
    store: S,
    plane: P,
    config: PublisherConfig,
}

impl<S, P> Publisher<S, P>
where
    S: ObjectStore,
    P: ControlPlane,
{
    pub fn new(store: S, plane: P, config: PublisherConfig) -> Self {
        Self {
            store,
            plane,
            config,
        }
    }

    /// Publish one album end to end.
    ///
    /// Ordering is significant: the branch must exist before the deployment
    /// is triggered, every upload must complete before the deployment is
    /// triggered, and the domain association must exist before the
    /// subdomain upsert. A missing metadata object is non-fatal (the
    /// template must still publish); a missing template is fatal.
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome, PublishError> {
        let album_id = request.album_id.trim();
        if album_id.is_empty() {
            return Err(CoreError::Validation("albumId must not be empty".into()).into());
        }
        let owner = request.owner_identity_id.trim();
        if owner.is_empty() {
            return Err(CoreError::Validation("ownerIdentityId must not be empty".into()).into());
        }
        let template = request
            .template
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TEMPLATE);

        let branch = derive_branch_name(album_id);
        let branch_outcome = ensure_branch(&self.plane, &branch).await?;
        tracing::info!(branch = %branch, outcome = ?branch_outcome, "Ensured deployment branch");

        // Trailing separator required by the bucket-prefix deployment source.
        let deploy_prefix = format!("branches/{branch}/");

        let meta = self.load_album_meta(owner, album_id).await?;
        let assets =
            collect_template_assets(&template_dist_dir(&self.config.templates_dir, template))?;

        if let Some((raw, meta)) = &meta {
            self.copy_photos(owner, &deploy_prefix, meta).await?;
            self.store
                .put_object(
                    &self.config.publish_bucket,
                    &join_key(&deploy_prefix, "album.json"),
                    raw.clone(),
                    Some("application/json"),
                )
                .await?;
        }
        self.upload_assets(album_id, &deploy_prefix, assets).await?;

        self.plane.start_deployment(&branch, &deploy_prefix).await?;

        let url = match &self.config.root_domain {
            Some(domain) => {
                let domain_outcome = ensure_domain_association(&self.plane, domain).await?;
                tracing::info!(domain = %domain, outcome = ?domain_outcome, "Ensured domain association");
                upsert_subdomain(&self.plane, domain, &branch, &branch).await?;
                Some(format!("https://{branch}.{domain}/"))
            }
            None => None,
        };

        tracing::info!(branch = %branch, url = url.as_deref().unwrap_or(""), "Publish complete");
        Ok(PublishOutcome { branch, url })
    }

    /// Fetch and parse `album.json`, keeping the raw bytes for re-upload.
    ///
    /// Absence is non-fatal; a present-but-unparsable document aborts the
    /// publish (it means the editor wrote something this service cannot
    /// trust).
    async fn load_album_meta(
        &self,
        owner: &str,
        album_id: &str,
    ) -> Result<Option<(Vec<u8>, AlbumMeta)>, PublishError> {
        let key = format!(
            "private/{owner}/{}/{album_id}/album.json",
            self.config.albums_prefix
        );

        match self.store.get_object(&self.config.storage_bucket, &key).await {
            Ok(object) => {
                let meta: AlbumMeta =
                    serde_json::from_slice(&object.body).map_err(|source| {
                        StorageError::Decode {
                            key: key.clone(),
                            source,
                        }
                    })?;
                Ok(Some((object.body, meta)))
            }
            Err(StorageError::ObjectNotFound { .. }) => {
                tracing::warn!(key = %key, "Album metadata missing; publishing template only");
                Ok(None)
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Copy every referenced photo into `photos/` under the deploy prefix.
    ///
    /// Photos are independent, so the copies run concurrently; any single
    /// failure aborts the publish.
    async fn copy_photos(
        &self,
        owner: &str,
        deploy_prefix: &str,
        meta: &AlbumMeta,
    ) -> Result<(), PublishError> {
        let copies = meta.photos.iter().map(|photo| async move {
            // The editor stores keys without the owner scope.
            let source_key = format!("private/{owner}/{}", photo.key);
            let object = self
                .store
                .get_object(&self.config.storage_bucket, &source_key)
                .await?;

            let basename = photo.key.rsplit('/').next().unwrap_or(photo.key.as_str());
            let dest_key = join_key(deploy_prefix, &format!("photos/{basename}"));
            let content_type = object
                .content_type
                .as_deref()
                .unwrap_or(DEFAULT_PHOTO_CONTENT_TYPE);

            self.store
                .put_object(
                    &self.config.publish_bucket,
                    &dest_key,
                    object.body,
                    Some(content_type),
                )
                .await?;
            Ok::<(), PublishError>(())
        });

        try_join_all(copies).await?;
        if !meta.photos.is_empty() {
            tracing::info!(count = meta.photos.len(), "Copied album photos");
        }
        Ok(())
    }

    /// Upload the collected template assets under the deploy prefix.
    ///
    /// The designated script asset gets its placeholder token replaced with
    /// the album identifier; the on-disk template is never touched.
    async fn upload_assets(
        &self,
        album_id: &str,
        deploy_prefix: &str,
        assets: Vec<TemplateAsset>,
    ) -> Result<(), PublishError> {
        let count = assets.len();
        for asset in assets {
            let body = match &self.config.album_script {
                Some(target) if script_matches(&asset.path, target) => {
                    substitute_album_id(&asset.body, album_id).unwrap_or(asset.body)
                }
                _ => asset.body,
            };

            self.store
                .put_object(
                    &self.config.publish_bucket,
                    &join_key(deploy_prefix, &asset.path),
                    body,
                    asset.content_type,
                )
                .await?;
        }

        tracing::info!(count, "Uploaded template assets");
        Ok(())
    }
}

#[async_trait]
impl<S, P> PublishService for Publisher<S, P>
where
    S: ObjectStore,
    P: ControlPlane,
{
    async fn publish(&self, request: PublishRequest) -> Result<PublishOutcome, PublishError> {
        Publisher::publish(self, &request).await
    }
}

/// Does `asset_path` name the designated script asset?
///
/// Matches the exact relative path, or the basename when the configured
/// target is a bare file name.
fn script_matches(asset_path: &str, target: &str) -> bool {
    asset_path == target || asset_path.rsplit('/').next() == Some(target)
}

/// Replace every placeholder occurrence, or `None` when there is nothing to
/// substitute (non-UTF-8 body or no token).
fn substitute_album_id(body: &[u8], album_id: &str) -> Option<Vec<u8>> {
    let text = std::str::from_utf8(body).ok()?;
    if !text.contains(ALBUM_ID_PLACEHOLDER) {
        return None;
    }
    Some(text.replace(ALBUM_ID_PLACEHOLDER, album_id).into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_matches_exact_path_and_basename() {
        assert!(script_matches("assets/album.js", "assets/album.js"));
        assert!(script_matches("assets/album.js", "album.js"));
        assert!(!script_matches("assets/other.js", "album.js"));
        assert!(!script_matches("album.js.map", "album.js"));
    }

    #[test]
    fn substitute_replaces_every_occurrence() {
        let body = format!(
            "const a = '{ALBUM_ID_PLACEHOLDER}'; fetch('/{ALBUM_ID_PLACEHOLDER}/x?id={ALBUM_ID_PLACEHOLDER}')"
        );
        let out = substitute_album_id(body.as_bytes(), "42").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("42").count(), 3);
        assert!(!out.contains(ALBUM_ID_PLACEHOLDER));
    }

    #[test]
    fn substitute_skips_bodies_without_the_token() {
        assert!(substitute_album_id(b"no token here", "42").is_none());
    }

    #[test]
    fn substitute_skips_non_utf8_bodies() {
        assert!(substitute_album_id(&[0xff, 0xfe, 0x00], "42").is_none());
    }
}
