//! Hosting control-plane client.
//!
//! [`ControlPlane`] is the seam between the publish flow and the hosting
//! platform's branch/domain/deployment APIs. On top of it sit the
//! check-then-create `ensure_*` operations ([`branch`], [`domain`]) whose
//! "already exists" outcome is a first-class [`Ensure`] value rather than a
//! caught error. The Amplify-backed implementation lives in [`amplify`].

pub mod amplify;
pub mod branch;
pub mod domain;
pub mod error;

use async_trait::async_trait;

pub use amplify::AmplifyControlPlane;
pub use branch::ensure_branch;
pub use domain::{ensure_domain_association, upsert_subdomain};
pub use error::HostingError;

/// One subdomain→branch mapping inside a domain association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdomainMapping {
    pub prefix: String,
    pub branch_name: String,
}

/// Outcome of a check-then-create operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensure {
    /// The resource already existed; no create call was issued.
    Found,
    /// The resource was absent and has been created.
    Created,
}

/// Operations the publish flow needs from the hosting platform.
///
/// Implementations signal a missing resource with
/// [`HostingError::NotFound`]; every other failure is opaque to callers.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn get_branch(&self, branch_name: &str) -> Result<(), HostingError>;

    /// Create a deployment branch (production stage, auto-build disabled).
    async fn create_branch(&self, branch_name: &str) -> Result<(), HostingError>;

    /// Current subdomain mappings of a domain association, in stored order.
    async fn get_domain_association(
        &self,
        domain_name: &str,
    ) -> Result<Vec<SubdomainMapping>, HostingError>;

    /// Create a domain association with an empty mapping set.
    async fn create_domain_association(&self, domain_name: &str) -> Result<(), HostingError>;

    /// Replace the full subdomain mapping set of a domain association.
    async fn update_subdomains(
        &self,
        domain_name: &str,
        mappings: Vec<SubdomainMapping>,
    ) -> Result<(), HostingError>;

    /// Start a deployment of `branch_name` from the publish-bucket prefix.
    /// `source_prefix` must end with `/`.
    async fn start_deployment(
        &self,
        branch_name: &str,
        source_prefix: &str,
    ) -> Result<(), HostingError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory [`ControlPlane`] fake recording every call.

    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct FakeControlPlane {
        pub branches: Mutex<HashSet<String>>,
        pub domains: Mutex<HashMap<String, Vec<SubdomainMapping>>>,
        /// Call log, e.g. `"get_branch album-x"`.
        pub calls: Mutex<Vec<String>>,
        /// When set, `get_branch` fails with an opaque API error.
        pub fail_get_branch: bool,
    }

    impl FakeControlPlane {
        pub fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ControlPlane for FakeControlPlane {
        async fn get_branch(&self, branch_name: &str) -> Result<(), HostingError> {
            self.record(format!("get_branch {branch_name}"));
            if self.fail_get_branch {
                return Err(HostingError::Api("control plane unavailable".into()));
            }
            if self.branches.lock().unwrap().contains(branch_name) {
                Ok(())
            } else {
                Err(HostingError::NotFound(format!("branch {branch_name}")))
            }
        }

        async fn create_branch(&self, branch_name: &str) -> Result<(), HostingError> {
            self.record(format!("create_branch {branch_name}"));
            self.branches.lock().unwrap().insert(branch_name.to_owned());
            Ok(())
        }

        async fn get_domain_association(
            &self,
            domain_name: &str,
        ) -> Result<Vec<SubdomainMapping>, HostingError> {
            self.record(format!("get_domain_association {domain_name}"));
            self.domains
                .lock()
                .unwrap()
                .get(domain_name)
                .cloned()
                .ok_or_else(|| HostingError::NotFound(format!("domain {domain_name}")))
        }

        async fn create_domain_association(&self, domain_name: &str) -> Result<(), HostingError> {
            self.record(format!("create_domain_association {domain_name}"));
            self.domains
                .lock()
                .unwrap()
                .insert(domain_name.to_owned(), Vec::new());
            Ok(())
        }

        async fn update_subdomains(
            &self,
            domain_name: &str,
            mappings: Vec<SubdomainMapping>,
        ) -> Result<(), HostingError> {
            self.record(format!("update_subdomains {domain_name}"));
            self.domains
                .lock()
                .unwrap()
                .insert(domain_name.to_owned(), mappings);
            Ok(())
        }

        async fn start_deployment(
            &self,
            branch_name: &str,
            source_prefix: &str,
        ) -> Result<(), HostingError> {
            self.record(format!("start_deployment {branch_name} {source_prefix}"));
            Ok(())
        }
    }
}
