//! Task ID generation utilities.
//!
//! Task IDs are 24 lowercase hex characters: a 64-bit hash and a 32-bit hash,
//! each from a freshly keyed `RandomState` over the current time.

use std::cell::Cell;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

/// Length of a generated task ID in characters.
pub const ID_LEN: usize = 24;

thread_local! {
    /// Counter for deterministic ID generation in tests; `None` means random IDs.
    ///
    /// Thread-local so parallel tests cannot reset each other's sequence.
    static TEST_COUNTER: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Enable deterministic ID generation on the current thread.
///
/// When enabled, IDs will use a counter instead of random hex.
pub fn enable_deterministic_ids() {
    TEST_COUNTER.with(|counter| counter.set(Some(0)));
}

/// Disable deterministic ID generation on the current thread.
pub fn disable_deterministic_ids() {
    TEST_COUNTER.with(|counter| counter.set(None));
}

/// Draw 64 bits of entropy from a freshly keyed hasher.
#[allow(clippy::cast_possible_truncation)]
fn random_u64(salt: u64) -> u64 {
    let mut hasher = RandomState::new().build_hasher();
    // Truncation is intentional - we only need entropy, not precision
    hasher.write_u64(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64),
    );
    hasher.write_u64(salt);
    hasher.finish()
}

/// Generate a new task ID.
#[must_use]
pub fn generate_task_id() -> String {
    let deterministic = TEST_COUNTER.with(|counter| {
        let current = counter.get()?;
        counter.set(Some(current + 1));
        Some(current)
    });
    if let Some(count) = deterministic {
        return format!("{count:024x}");
    }

    let high = random_u64(0);
    let low = random_u64(high) & 0xFFFF_FFFF;
    format!("{high:016x}{low:08x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_task_id_format() {
        let id = generate_task_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    #[test]
    fn test_deterministic_ids_increment() {
        enable_deterministic_ids();

        let id1 = generate_task_id();
        let id2 = generate_task_id();
        let id3 = generate_task_id();

        assert_eq!(id1, "000000000000000000000000");
        assert_eq!(id2, "000000000000000000000001");
        assert_eq!(id3, "000000000000000000000002");

        disable_deterministic_ids();
    }

    #[test]
    fn test_enable_resets_counter() {
        enable_deterministic_ids();
        let _ = generate_task_id();
        enable_deterministic_ids();
        assert_eq!(generate_task_id(), "000000000000000000000000");
        disable_deterministic_ids();
    }

    #[test]
    fn test_random_ids_unique() {
        let ids: std::collections::HashSet<String> = (0..100).map(|_| generate_task_id()).collect();
        assert_eq!(ids.len(), 100);
    }
}
