//! Storage implementations for list data sources

pub mod in_memory;

pub use in_memory::InMemoryDataSource;
