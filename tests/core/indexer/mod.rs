//! Indexer layer tests
//!
//! Document segmentation, sidebar-driven builds and fetch sources.

mod test_http;
