//! UTF-8 handling across the indexer and the query engine

mod test_indexing;
