//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `calview_core::storage`.

pub mod inmemory;

pub use inmemory::InMemoryRepository;
