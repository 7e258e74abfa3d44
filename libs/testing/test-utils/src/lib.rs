//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with the boardroom migrations applied
//! - `TestDataBuilder`: deterministic test data derived from the test name
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let email = builder.email("ada");
//!     let board_id = db.create_board(&builder.name("board", "main"), &[]).await;
//! }
//! ```

use uuid::Uuid;

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// The same test name always yields the same ids, names and emails, while
/// different tests never collide on unique columns.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn user_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// `"test-{prefix}-{seed}-{suffix}"`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@example.com", local, self.seed)
    }

    /// Ten digit phone number derived from the seed
    pub fn phone_number(&self) -> String {
        format!("07{:08}", self.seed % 100_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.user_id(), builder2.user_id());
        assert_eq!(builder1.name("board", "test"), builder2.name("board", "test"));
        assert_eq!(builder1.email("ada"), builder2.email("ada"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.user_id(), builder2.user_id());
        assert_ne!(builder1.email("ada"), builder2.email("ada"));
    }

    #[test]
    fn test_phone_number_shape() {
        let phone = TestDataBuilder::from_test_name("phone").phone_number();
        assert_eq!(phone.len(), 10);
        assert!(phone.chars().all(|c| c.is_ascii_digit()));
    }
}
