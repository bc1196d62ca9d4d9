// Common test utilities and fixtures

pub mod fixtures;

// Re-export commonly used items
// Note: These may appear unused in unit tests but are used in integration tests
#[allow(unused_imports)]
pub use fixtures::{TestDocs, Utf8TestData};
#[allow(unused_imports)]
pub use helpers::{assert_valid_report, build_test_index, create_test_services, entry, path_list};
