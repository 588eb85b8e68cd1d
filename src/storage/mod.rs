//! Storage implementations for entity repositories

pub mod in_memory;

pub use in_memory::InMemoryRepository;
