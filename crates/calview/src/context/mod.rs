//! Request-scoped context module.
//!
//! Provides the `ResolvedContext` extractor, which runs the core context
//! resolver for each request and complements application-scoped `AppState`.

mod extractor;
mod types;

pub use types::{RequestId, ResolvedContext};
