use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::auth::repo_types::User;
use crate::error::StoreError;

/// Storage for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether a user with this login exists.
    async fn login_taken(&self, login: &str) -> Result<bool, StoreError>;

    /// Create a new user from an already hashed password.
    async fn create(&self, login: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Find the user matching both login and password digest.
    async fn find_by_credentials(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Stamp the last catalog read. Returns false when no such login exists.
    async fn touch_last_request(&self, login: &str, at: OffsetDateTime) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn login_taken(&self, login: &str) -> Result<bool, StoreError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM users WHERE login = $1)"#,
        )
        .bind(login)
        .fetch_one(&self.db)
        .await?;
        Ok(taken)
    }

    async fn create(&self, login: &str, password_hash: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, password, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, login, password, created_at, last_request
            "#,
        )
        .bind(login)
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateLogin(login.to_string())
            }
            other => StoreError::Database(other),
        })
    }

    async fn find_by_credentials(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, password, created_at, last_request
            FROM users
            WHERE login = $1 AND password = $2
            "#,
        )
        .bind(login)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn touch_last_request(&self, login: &str, at: OffsetDateTime) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"UPDATE users SET last_request = $2 WHERE login = $1"#)
            .bind(login)
            .bind(at)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
