//! Typed operations over the Upmind REST API.
//!
//! Each module adds an `impl` block on [`UpmindClient`](crate::UpmindClient)
//! for one resource. Every operation validates its input locally first
//! (a validation failure returns [`UpmindError::InvalidRequest`] listing
//! every offending field without touching the network) and normalizes
//! the remote response into the fixed shapes in [`crate::types`].

mod clients;
mod domains;
mod orders;
mod products;

use crate::error::UpmindError;

/// Build an `InvalidRequest` from collected field problems.
pub(crate) fn invalid_request(problems: Vec<String>) -> UpmindError {
    UpmindError::InvalidRequest {
        message: problems.join(", "),
    }
}

/// Basic structural email check: one `@`, non-empty local part, and a
/// dotted domain. Not RFC-complete on purpose; the platform does its own
/// verification.
pub(crate) fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}
