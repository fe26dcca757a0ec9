//! Idempotent branch management.

use crate::{ControlPlane, Ensure, HostingError};

/// Ensure a deployment branch exists.
///
/// Reads the branch first; only the control plane's not-found sentinel
/// triggers a create (production stage, auto-build disabled — see the
/// [`ControlPlane::create_branch`] contract). Any other read failure
/// propagates unchanged.
pub async fn ensure_branch<P>(plane: &P, branch_name: &str) -> Result<Ensure, HostingError>
where
    P: ControlPlane + ?Sized,
{
    match plane.get_branch(branch_name).await {
        Ok(()) => Ok(Ensure::Found),
        Err(HostingError::NotFound(_)) => {
            plane.create_branch(branch_name).await?;
            tracing::info!(branch = branch_name, "Created deployment branch");
            Ok(Ensure::Created)
        }
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeControlPlane;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn first_ensure_creates_the_branch() {
        let plane = FakeControlPlane::default();

        let outcome = ensure_branch(&plane, "album-x").await.unwrap();

        assert_eq!(outcome, Ensure::Created);
        assert_eq!(
            plane.calls(),
            vec!["get_branch album-x", "create_branch album-x"]
        );
    }

    #[tokio::test]
    async fn second_ensure_performs_no_create() {
        let plane = FakeControlPlane::default();

        ensure_branch(&plane, "album-x").await.unwrap();
        let outcome = ensure_branch(&plane, "album-x").await.unwrap();

        assert_eq!(outcome, Ensure::Found);
        let creates = plane
            .calls()
            .iter()
            .filter(|c| c.starts_with("create_branch"))
            .count();
        assert_eq!(creates, 1, "exactly one create across both ensures");
    }

    #[tokio::test]
    async fn non_sentinel_read_failures_propagate() {
        let plane = FakeControlPlane {
            fail_get_branch: true,
            ..Default::default()
        };

        let err = ensure_branch(&plane, "album-x").await.unwrap_err();

        assert_matches!(err, HostingError::Api(_));
        // No create attempt after an opaque failure.
        assert_eq!(plane.calls(), vec!["get_branch album-x"]);
    }
}
