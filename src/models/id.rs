//! Identifiers for stations, sections and lines.
//!
//! Stations and sections carry random `u64` ids so equality survives renames
//! and moves. Lines use v4 UUIDs, which storage backends key on.
use rand::Rng;

/// Fresh random id for a station or section
///
/// Also used as the serde default when a persisted record has no id.
#[must_use]
pub fn generate_id() -> u64 {
    rand::thread_rng().gen()
}

#[must_use]
pub fn generate_line_id() -> uuid::Uuid {
    uuid::Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_station_and_section_ids_do_not_collide() {
        let ids: HashSet<u64> = (0..5_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 5_000);
    }

    #[test]
    fn test_line_ids_are_v4() {
        let first = generate_line_id();
        let second = generate_line_id();

        assert_eq!(first.get_version_num(), 4);
        assert_ne!(first, second);
    }
}
