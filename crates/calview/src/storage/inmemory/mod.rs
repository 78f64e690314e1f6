//! In-memory storage backend.
//!
//! Stores users, calendars, events and site configuration in collections
//! wrapped in `Arc<RwLock<_>>`. Nothing is persisted; the binary seeds it
//! with demo data at startup and tests build their own fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use calview::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! repo.insert_calendar(Calendar::new(CalendarId(1), "Main")).await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
