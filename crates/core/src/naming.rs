//! Deployment branch naming.
//!
//! Every album publishes to one hosting branch whose name is derived from
//! the album identifier. The derivation is deterministic so repeated
//! publishes of the same album reuse the same branch.

/// Prefix carried by every album branch name.
pub const BRANCH_PREFIX: &str = "album-";

/// Maximum branch name length accepted by the hosting control plane.
pub const MAX_BRANCH_NAME_LEN: usize = 255;

/// Derive the deployment branch name for an album.
///
/// The identifier is trimmed, characters outside `[A-Za-z0-9._-]` are
/// replaced with `-`, the `album-` prefix is ensured exactly once, and the
/// result is capped at 255 characters. Re-applying the function to its own
/// output returns it unchanged.
///
/// # Examples
///
/// ```
/// use albumpress_core::naming::derive_branch_name;
///
/// assert_eq!(derive_branch_name("abc 123"), "album-abc-123");
/// assert_eq!(derive_branch_name("album-abc-123"), "album-abc-123");
/// ```
pub fn derive_branch_name(album_id: &str) -> String {
    let sanitized: String = album_id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    let slug = sanitized.strip_prefix(BRANCH_PREFIX).unwrap_or(&sanitized);
    let mut name = format!("{BRANCH_PREFIX}{slug}");
    // Sanitized output is pure ASCII, so byte truncation is char-safe.
    name.truncate(MAX_BRANCH_NAME_LEN);
    name
}
