//! User repository implementation.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use tradehub_core::error::{AppError, Resource};
use tradehub_core::result::AppResult;
use tradehub_core::types::filter::{Filter, FilteredResult};
use tradehub_entity::user::{CreateUser, User};

use super::storage_err;

/// Columns callers may sort the user list by.
const SORTABLE_COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "email",
    "created_at",
    "updated_at",
];
/// Sort column applied when the filter does not name one.
const DEFAULT_SORT: &str = "created_at";

/// Fixed select list matching the positional decode order of `User`.
const USER_COLUMNS: &str =
    "id, uuid, first_name, last_name, email, password, created_at, updated_at, deleted_at";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user and return it with its storage-assigned id.
    ///
    /// The uuid and `created_at` are generated here, not by the database;
    /// `updated_at` starts out null.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let uuid = Uuid::new_v4();
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (uuid, first_name, last_name, email, password, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(uuid)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.password)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err("Failed to create user"))?;

        Ok(User {
            id,
            uuid,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            password: data.password.clone(),
            created_at,
            updated_at: None,
            deleted_at: None,
        })
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err("Failed to find user by id"))?
            .ok_or_else(|| AppError::not_found(Resource::User, format!("User {id} not found")))
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to find user by email"))?
        .ok_or_else(|| AppError::not_found(Resource::User, format!("User '{email}' not found")))
    }

    /// List users with pagination and sorting.
    ///
    /// The page and the total are read in two separate queries, so they
    /// can disagree under concurrent writes.
    pub async fn find_all(&self, filter: &Filter) -> AppResult<FilteredResult<User>> {
        let order = filter.order_by(SORTABLE_COLUMNS, DEFAULT_SORT)?;
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY {order} {} LIMIT $1 OFFSET $2",
            filter.direction.as_sql()
        );

        let users = sqlx::query_as::<_, User>(&query)
            .bind(filter.limit() as i64)
            .bind(filter.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err("Failed to list users"))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("Failed to count users"))?;

        Ok(filter.paginate(users, total as u64))
    }

    /// Overwrite a user's business fields and stamp `updated_at`.
    ///
    /// Zero affected rows means the id does not exist and is reported as
    /// not-found, never as a silent no-op.
    pub async fn update(&self, user: &User) -> AppResult<User> {
        let updated_at = Utc::now();

        let result = sqlx::query(
            "UPDATE users SET first_name = $2, last_name = $3, email = $4, password = $5, \
             updated_at = $6 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                Resource::User,
                format!("User {} not found", user.id),
            ));
        }

        Ok(User {
            updated_at: Some(updated_at),
            ..user.clone()
        })
    }

    /// Hard-delete a user by id.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                Resource::User,
                format!("User {id} not found"),
            ));
        }
        Ok(())
    }

    /// Count total users.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("Failed to count users"))?;
        Ok(count as u64)
    }
}
