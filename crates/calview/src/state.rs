//! Shared application state.

use std::sync::Arc;

use calview_core::context::{ContextResolver, ResolverConfig};
use calview_core::storage::CalendarRepository;

use crate::config::Config;
use crate::mock_data::seed_demo_data;
use crate::storage::InMemoryRepository;

/// Shared application state, cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Resolves the request context for every page request.
    pub resolver: ContextResolver,
    /// Calendar repository for listing endpoints.
    pub calendar_repo: Arc<dyn CalendarRepository>,
    /// Lowercase name of the header carrying the session user ID.
    pub session_header: Arc<str>,
}

impl AppState {
    /// Creates an AppState backed by the given repository.
    pub fn new(repo: InMemoryRepository, config: &Config) -> Self {
        let repo = Arc::new(repo);
        let resolver = ContextResolver::new(
            repo.clone(),
            repo.clone(),
            repo.clone(),
            ResolverConfig {
                default_timezone: config.default_timezone,
            },
        );

        Self {
            resolver,
            calendar_repo: repo,
            session_header: Arc::from(config.session_header.as_str()),
        }
    }

    /// Creates an AppState with seeded demo data.
    pub async fn with_demo_data(config: &Config) -> anyhow::Result<Self> {
        let repo = InMemoryRepository::new();
        seed_demo_data(&repo, config.default_calendar_id.as_deref()).await?;
        Ok(Self::new(repo, config))
    }
}
