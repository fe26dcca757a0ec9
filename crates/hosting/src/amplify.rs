//! Amplify-backed [`ControlPlane`] implementation.
//!
//! Holds the application id and publish bucket so callers deal only in
//! branch/domain names and deploy prefixes. The service's
//! `NotFoundException` is mapped to [`HostingError::NotFound`]; every other
//! SDK failure is rendered through `DisplayErrorContext` into an opaque
//! [`HostingError::Api`].

use async_trait::async_trait;
use aws_sdk_amplify::error::SdkError;
use aws_sdk_amplify::types::{SourceUrlType, Stage, SubDomainSetting};
use aws_smithy_types::error::display::DisplayErrorContext;

use crate::error::HostingError;
use crate::{ControlPlane, SubdomainMapping};

/// Hosting control plane over the Amplify API.
#[derive(Debug, Clone)]
pub struct AmplifyControlPlane {
    client: aws_sdk_amplify::Client,
    app_id: String,
    publish_bucket: String,
}

impl AmplifyControlPlane {
    /// * `app_id`         - Amplify application identifier.
    /// * `publish_bucket` - bucket deployments are sourced from.
    pub fn new(client: aws_sdk_amplify::Client, app_id: String, publish_bucket: String) -> Self {
        Self {
            client,
            app_id,
            publish_bucket,
        }
    }

    /// Build from an already-loaded shared SDK configuration.
    pub fn from_conf(
        config: &aws_config::SdkConfig,
        app_id: String,
        publish_bucket: String,
    ) -> Self {
        Self::new(aws_sdk_amplify::Client::new(config), app_id, publish_bucket)
    }
}

#[async_trait]
impl ControlPlane for AmplifyControlPlane {
    async fn get_branch(&self, branch_name: &str) -> Result<(), HostingError> {
        self.client
            .get_branch()
            .app_id(&self.app_id)
            .branch_name(branch_name)
            .send()
            .await
            .map_err(|err| match &err {
                SdkError::ServiceError(ctx) if ctx.err().is_not_found_exception() => {
                    HostingError::NotFound(format!("branch {branch_name}"))
                }
                _ => HostingError::Api(DisplayErrorContext(&err).to_string()),
            })?;
        Ok(())
    }

    async fn create_branch(&self, branch_name: &str) -> Result<(), HostingError> {
        self.client
            .create_branch()
            .app_id(&self.app_id)
            .branch_name(branch_name)
            .stage(Stage::Production)
            .enable_auto_build(false)
            .enable_performance_mode(true)
            .send()
            .await
            .map_err(|err| HostingError::Api(DisplayErrorContext(&err).to_string()))?;
        Ok(())
    }

    async fn get_domain_association(
        &self,
        domain_name: &str,
    ) -> Result<Vec<SubdomainMapping>, HostingError> {
        let output = self
            .client
            .get_domain_association()
            .app_id(&self.app_id)
            .domain_name(domain_name)
            .send()
            .await
            .map_err(|err| match &err {
                SdkError::ServiceError(ctx) if ctx.err().is_not_found_exception() => {
                    HostingError::NotFound(format!("domain association {domain_name}"))
                }
                _ => HostingError::Api(DisplayErrorContext(&err).to_string()),
            })?;

        // The response carries `sub_domains` (mapping + verification state);
        // only the settings half matters here.
        let mappings = output
            .domain_association()
            .map(|association| {
                association
                    .sub_domains()
                    .iter()
                    .filter_map(|sub| sub.sub_domain_setting())
                    .map(|setting| SubdomainMapping {
                        prefix: setting.prefix().to_owned(),
                        branch_name: setting.branch_name().to_owned(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(mappings)
    }

    async fn create_domain_association(&self, domain_name: &str) -> Result<(), HostingError> {
        self.client
            .create_domain_association()
            .app_id(&self.app_id)
            .domain_name(domain_name)
            .enable_auto_sub_domain(false)
            .set_sub_domain_settings(Some(Vec::new()))
            .send()
            .await
            .map_err(|err| HostingError::Api(DisplayErrorContext(&err).to_string()))?;
        Ok(())
    }

    async fn update_subdomains(
        &self,
        domain_name: &str,
        mappings: Vec<SubdomainMapping>,
    ) -> Result<(), HostingError> {
        let settings = mappings
            .into_iter()
            .map(|m| {
                SubDomainSetting::builder()
                    .prefix(m.prefix)
                    .branch_name(m.branch_name)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| HostingError::Api(err.to_string()))?;

        self.client
            .update_domain_association()
            .app_id(&self.app_id)
            .domain_name(domain_name)
            .set_sub_domain_settings(Some(settings))
            .send()
            .await
            .map_err(|err| HostingError::Api(DisplayErrorContext(&err).to_string()))?;
        Ok(())
    }

    async fn start_deployment(
        &self,
        branch_name: &str,
        source_prefix: &str,
    ) -> Result<(), HostingError> {
        self.client
            .start_deployment()
            .app_id(&self.app_id)
            .branch_name(branch_name)
            .source_url(format!("s3://{}/{}", self.publish_bucket, source_prefix))
            .source_url_type(SourceUrlType::BucketPrefix)
            .send()
            .await
            .map_err(|err| HostingError::Api(DisplayErrorContext(&err).to_string()))?;

        tracing::info!(branch = branch_name, prefix = source_prefix, "Started deployment");
        Ok(())
    }
}
