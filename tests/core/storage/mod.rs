//! Storage layer tests
//!
//! Persisted snapshots, expiry and namespace isolation.

mod test_persistence;
