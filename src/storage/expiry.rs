// Expiry markers.
// Shadow keys and civil-day token comparison for lazily expiring entries.

use tracing::debug;

use crate::util::dates::{CivilDateTime, date_now, date_parse};

/// Prefix of the shadow key holding an entry's expiry token.
pub const EXPIRE_PREFIX: &str = "_e_";

/// Shadow key for `key`.
pub fn expire_key(key: &str) -> String {
    format!("{}{}", EXPIRE_PREFIX, key)
}

/// Whether `token` lies strictly before the current civil time.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, &date_now())
}

/// Whether `token` lies strictly before `now`.
///
/// Best effort: a token the date parser rejects never expires.
pub fn is_expired_at(token: &str, now: &CivilDateTime) -> bool {
    match date_parse(token) {
        Some(at) => at < *now,
        None => {
            debug!(token, "ignoring unparseable expiry token");
            false
        }
    }
}
