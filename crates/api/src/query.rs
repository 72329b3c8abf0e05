//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Upper bound for any `?limit=` value.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Listing parameters (`?limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// Clamp a user-supplied limit to `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_defaults_and_bounds() {
        assert_eq!(clamp_limit(None, 10, MAX_LIST_LIMIT), 10);
        assert_eq!(clamp_limit(Some(0), 10, MAX_LIST_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-5), 10, MAX_LIST_LIMIT), 1);
        assert_eq!(clamp_limit(Some(25), 10, MAX_LIST_LIMIT), 25);
        assert_eq!(clamp_limit(Some(1000), 10, MAX_LIST_LIMIT), MAX_LIST_LIMIT);
    }
}
