//! # `spaced_review`
//!
//! Spaced-repetition flashcard tracking: tasks climb a fixed ladder of review
//! intervals when remembered and restart when forgotten, served over a JSON API.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod tasks;
pub mod testing;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{Clock, SystemClock};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
