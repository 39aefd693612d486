// Database repository for users, roles and their permission lists

use crate::auth::{
    error::AuthError,
    models::{Role, User, UserAccess},
    permissions::Permission,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, email, password_hash, display_name, phone, role_id, \
     is_email_verified, verification_code_hash, verification_expires_at, created_at";

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the default role assigned to new registrations
    pub async fn default_role(&self) -> Result<Role, AuthError> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT id, name, description, is_default FROM roles WHERE is_default = TRUE LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AuthError::ConfigError("no default role is seeded".to_string()))?;

        Ok(role)
    }

    /// Create a new user with pending email verification
    #[allow(clippy::too_many_arguments)]
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        display_name: &str,
        phone: Option<&str>,
        role_id: i32,
        verification_code_hash: &str,
        verification_expires_at: DateTime<Utc>,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users \
             (email, password_hash, display_name, phone, role_id, verification_code_hash, verification_expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(email)
        .bind(password_hash)
        .bind(display_name)
        .bind(phone)
        .bind(role_id)
        .bind(verification_code_hash)
        .bind(verification_expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyExists;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// Fetch a role's name
    pub async fn role_name(&self, role_id: i32) -> Result<String, AuthError> {
        let name: (String,) = sqlx::query_as("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(name.0)
    }

    /// Fetch the ordered permission list granted to a role
    pub async fn permissions_for_role(&self, role_id: i32) -> Result<Vec<Permission>, AuthError> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT p.resource, p.action \
             FROM permissions p \
             JOIN role_permissions rp ON rp.permission_id = p.id \
             WHERE rp.role_id = $1 \
             ORDER BY p.id",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(permissions)
    }

    /// Load a user by id with role name and permission list populated
    /// Returns None when the id is stale.
    pub async fn load_access(&self, user_id: i32) -> Result<Option<UserAccess>, AuthError> {
        let user = match self.find_by_id(user_id).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let role = self.role_name(user.role_id).await?;
        let permissions = self.permissions_for_role(user.role_id).await?;

        Ok(Some(UserAccess {
            user,
            role,
            permissions,
        }))
    }

    /// Mark a user's email as verified and clear OTP state
    pub async fn mark_verified(&self, user_id: i32) -> Result<(), AuthError> {
        sqlx::query(
            "UPDATE users \
             SET is_email_verified = TRUE, verification_code_hash = NULL, verification_expires_at = NULL \
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
