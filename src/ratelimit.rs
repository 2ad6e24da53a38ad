//! Request-quota bookkeeping for the metadata API.
//!
//! Purely observational: the remaining quota is read off response headers,
//! and a warning is logged when it drops below the low-water mark. Nothing
//! here blocks or throttles requests.

use crate::traits::Response;

/// Header carrying the remaining request quota.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Remaining-quota level below which a warning is logged.
pub const LOW_WATER_MARK: u32 = 10;

/// Parse the remaining quota from a response, if the header is present and
/// numeric.
pub fn remaining(response: &Response) -> Option<u32> {
    response.header(REMAINING_HEADER)?.trim().parse().ok()
}

/// Read the remaining quota from a response and warn when it is running low.
///
/// Returns the parsed value so callers can persist it.
pub fn observe(response: &Response) -> Option<u32> {
    let value = remaining(response)?;
    if value < LOW_WATER_MARK {
        tracing::warn!(remaining = value, "API request quota running low");
    } else {
        tracing::debug!(remaining = value, "API request quota");
    }
    Some(value)
}
