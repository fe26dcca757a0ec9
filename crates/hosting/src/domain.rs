//! Domain association and subdomain mapping.

use crate::{ControlPlane, Ensure, HostingError, SubdomainMapping};

/// Ensure a domain association exists for `domain_name`.
///
/// Same check-then-create shape as [`crate::ensure_branch`]; a fresh
/// association starts with an empty mapping set.
pub async fn ensure_domain_association<P>(
    plane: &P,
    domain_name: &str,
) -> Result<Ensure, HostingError>
where
    P: ControlPlane + ?Sized,
{
    match plane.get_domain_association(domain_name).await {
        Ok(_) => Ok(Ensure::Found),
        Err(HostingError::NotFound(_)) => {
            plane.create_domain_association(domain_name).await?;
            tracing::info!(domain = domain_name, "Created domain association");
            Ok(Ensure::Created)
        }
        Err(other) => Err(other),
    }
}

/// Add or replace ONE subdomain mapping (prefix → branch).
///
/// Reads the current mapping set, drops any entry with the same prefix,
/// appends the new pair, and writes the full set back. This is a
/// read-modify-write without compare-and-swap: two concurrent upserts
/// against the same domain can both read the same set and the second write
/// wins, dropping the first mapping. Callers needing concurrent safety must
/// serialize per domain externally.
pub async fn upsert_subdomain<P>(
    plane: &P,
    domain_name: &str,
    prefix: &str,
    branch_name: &str,
) -> Result<(), HostingError>
where
    P: ControlPlane + ?Sized,
{
    let current = plane.get_domain_association(domain_name).await?;

    let mut next: Vec<SubdomainMapping> = current
        .into_iter()
        .filter(|m| m.prefix != prefix)
        .collect();
    next.push(SubdomainMapping {
        prefix: prefix.to_owned(),
        branch_name: branch_name.to_owned(),
    });

    plane.update_subdomains(domain_name, next).await?;
    tracing::info!(
        domain = domain_name,
        prefix,
        branch = branch_name,
        "Upserted subdomain mapping",
    );
    Ok(())
}
