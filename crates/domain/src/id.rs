//! Run identifier generation.

use uuid::Uuid;

/// Generates a new run id.
///
/// UUID v7 embeds the creation time, so run ids sort chronologically.
#[must_use]
pub fn generate_run_id() -> Uuid {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_is_v7() {
        let id = generate_run_id();
        assert_eq!(id.get_version_num(), 7);
        assert_eq!(id.to_string().len(), 36);
    }

    #[test]
    fn test_run_ids_are_unique() {
        let first = generate_run_id();
        let second = generate_run_id();
        assert_ne!(first, second);
    }
}
