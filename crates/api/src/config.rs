use std::path::PathBuf;

use albumpress_publisher::PublisherConfig;

/// Server configuration loaded from environment variables.
///
/// Loaded once at startup and passed to constructors; no component reads
/// the process environment at call sites. Missing required variables fail
/// fast with a panic naming the variable.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// AWS region for both SDK clients.
    pub region: String,
    /// Hosting application identifier.
    pub amplify_app_id: String,
    /// Root domain for subdomain mapping; unset skips domain setup.
    pub root_domain: Option<String>,
    /// Bucket deployments are staged in and served from.
    pub publish_bucket: String,
    /// Bucket holding album metadata and photo sources.
    pub storage_bucket: String,
    /// Albums key prefix inside the owner scope (default: `albums`).
    pub albums_prefix: String,
    /// Root of pre-built template outputs (default: `templates`).
    pub templates_dir: PathBuf,
    /// Script asset receiving the album-id substitution; unset disables it.
    pub album_script: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default     |
    /// |------------------------|----------|-------------|
    /// | `HOST`                 | no       | `0.0.0.0`   |
    /// | `PORT`                 | no       | `8080`      |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`        |
    /// | `AWS_REGION`           | yes      | —           |
    /// | `AMPLIFY_APP_ID`       | yes      | —           |
    /// | `ROOT_DOMAIN`          | no       | unset       |
    /// | `PUBLISH_BUCKET`       | yes      | —           |
    /// | `STORAGE_BUCKET`       | yes      | —           |
    /// | `ALBUMS_PREFIX`        | no       | `albums`    |
    /// | `TEMPLATES_DIR`        | no       | `templates` |
    /// | `ALBUM_SCRIPT`         | no       | unset       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            request_timeout_secs,
            region: required("AWS_REGION"),
            amplify_app_id: required("AMPLIFY_APP_ID"),
            root_domain: optional("ROOT_DOMAIN"),
            publish_bucket: required("PUBLISH_BUCKET"),
            storage_bucket: required("STORAGE_BUCKET"),
            albums_prefix: optional("ALBUMS_PREFIX").unwrap_or_else(|| "albums".into()),
            templates_dir: optional("TEMPLATES_DIR")
                .unwrap_or_else(|| "templates".into())
                .into(),
            album_script: optional("ALBUM_SCRIPT"),
        }
    }

    /// The publisher's view of this configuration.
    pub fn publisher_config(&self) -> PublisherConfig {
        PublisherConfig {
            storage_bucket: self.storage_bucket.clone(),
            publish_bucket: self.publish_bucket.clone(),
            albums_prefix: self.albums_prefix.clone(),
            templates_dir: self.templates_dir.clone(),
            root_domain: self.root_domain.clone(),
            album_script: self.album_script.clone(),
        }
    }
}

fn required(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}

/// A set-but-blank variable counts as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
