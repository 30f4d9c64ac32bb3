//! User business service: sign-up, lookup, update, listing, removal.

use std::sync::Arc;

use tracing::info;

use tradehub_core::error::{AppError, Resource};
use tradehub_core::result::AppResult;
use tradehub_core::types::filter::{Filter, FilteredResult};
use tradehub_database::repositories::UserRepository;
use tradehub_entity::user::{CreateUser, UpdateUser, User};

use crate::validate;

/// Handles user lifecycle operations.
#[derive(Debug, Clone)]
pub struct UserService {
    repo: Arc<UserRepository>,
}

impl UserService {
    /// Create a new user service.
    pub fn new(repo: Arc<UserRepository>) -> Self {
        Self { repo }
    }

    /// Register a new user.
    pub async fn sign_up(&self, data: CreateUser) -> AppResult<User> {
        validate(&data)?;

        let user = self.repo.create(&data).await?;
        info!(user_id = user.id, "User signed up");
        Ok(user)
    }

    /// Find a user by id.
    pub async fn find(&self, id: i64) -> AppResult<User> {
        if id <= 0 {
            return Err(AppError::not_found(
                Resource::User,
                format!("User {id} not found"),
            ));
        }
        self.repo.find_by_id(id).await
    }

    /// List users with pagination.
    pub async fn list(&self, filter: &Filter) -> AppResult<FilteredResult<User>> {
        self.repo.find_all(filter).await
    }

    /// Replace a user's business fields.
    pub async fn update(&self, id: i64, data: UpdateUser) -> AppResult<User> {
        validate(&data)?;

        let current = self.find(id).await?;
        let updated = self
            .repo
            .update(&User {
                first_name: data.first_name,
                last_name: data.last_name,
                email: data.email,
                password: data.password,
                ..current
            })
            .await?;

        info!(user_id = id, "User updated");
        Ok(updated)
    }

    /// Remove a user by id.
    pub async fn remove(&self, id: i64) -> AppResult<()> {
        if id <= 0 {
            return Err(AppError::not_found(
                Resource::User,
                format!("User {id} not found"),
            ));
        }
        self.repo.delete(id).await?;
        info!(user_id = id, "User removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPool;
    use tradehub_core::error::ErrorKind;

    // connect_lazy never touches the network; validation failures must
    // short-circuit before any query is issued.
    fn service() -> UserService {
        let pool = PgPool::connect_lazy("postgres://localhost/unreachable").unwrap();
        UserService::new(Arc::new(UserRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_sign_up_rejects_malformed_email_before_storage() {
        let err = service()
            .sign_up(CreateUser {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "not-an-email".to_string(),
                password: "analytical".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_empty_first_name_before_storage() {
        let err = service()
            .sign_up(CreateUser {
                first_name: String::new(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                password: "analytical".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_find_rejects_non_positive_id() {
        let err = service().find(0).await.unwrap_err();
        assert!(err.is_not_found(Resource::User));

        let err = service().find(-3).await.unwrap_err();
        assert!(err.is_not_found(Resource::User));
    }

    #[tokio::test]
    async fn test_remove_rejects_non_positive_id() {
        let err = service().remove(0).await.unwrap_err();
        assert!(err.is_not_found(Resource::User));
    }
}
