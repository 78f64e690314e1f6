use crate::calendar::{User, UserId};
use crate::storage::UserRepository;

use super::Result;

/// Maps the session-carried user ID to a stored user.
///
/// Without a session the anonymous user is returned. A session ID that is
/// malformed or no longer matches a stored user degrades to anonymous as
/// well; storage failures propagate.
pub async fn resolve_user(users: &dyn UserRepository, session_user: Option<&str>) -> Result<User> {
    let Some(raw) = session_user.filter(|s| !s.trim().is_empty()) else {
        return Ok(User::anonymous());
    };

    let id = match raw.parse::<UserId>() {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring malformed session user");
            return Ok(User::anonymous());
        }
    };

    match users.get_user(id).await? {
        Some(user) => {
            tracing::debug!(user_id = %id, username = %user.username, "Resolved session user");
            Ok(user)
        }
        None => {
            tracing::warn!(user_id = %id, "Session user no longer exists, continuing as anonymous");
            Ok(User::anonymous())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::FakeStore;
    use crate::context::ContextError;
    use crate::storage::RepositoryError;

    fn store() -> FakeStore {
        FakeStore::default().user(User::new(UserId(7), "sean").with_language("de"))
    }

    #[tokio::test]
    async fn test_no_session_is_anonymous() {
        let user = resolve_user(&store(), None).await.unwrap();
        assert!(user.is_anonymous());

        let user = resolve_user(&store(), Some("")).await.unwrap();
        assert!(user.is_anonymous());
    }

    #[tokio::test]
    async fn test_session_loads_stored_user() {
        let user = resolve_user(&store(), Some("7")).await.unwrap();

        assert_eq!(user.id, Some(UserId(7)));
        assert_eq!(user.username, "sean");
        assert_eq!(user.language.as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn test_stale_session_degrades_to_anonymous() {
        let user = resolve_user(&store(), Some("8")).await.unwrap();
        assert!(user.is_anonymous());
    }

    #[tokio::test]
    async fn test_malformed_session_degrades_to_anonymous() {
        let user = resolve_user(&store(), Some("not-a-number")).await.unwrap();
        assert!(user.is_anonymous());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let store = FakeStore {
            failure: Some(RepositoryError::ConnectionFailed("down".to_string())),
            ..store()
        };

        let err = resolve_user(&store, Some("7")).await.unwrap_err();
        assert!(matches!(err, ContextError::Storage(_)));
    }
}
