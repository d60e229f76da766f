//! Unique test-data helpers, ULID-backed so parallel tests never collide.

use ulid::Ulid;

/// A unique string in the form `{prefix}-{ulid}`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_str_produces_different_results() {
        assert_ne!(unique_str("test"), unique_str("test"));
    }

    #[test]
    fn unique_str_keeps_the_prefix() {
        assert!(unique_str("dataset").starts_with("dataset-"));
    }
}
