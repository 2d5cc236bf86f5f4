use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub password: String,                       // SHA-512 hex digest
    pub created_at: OffsetDateTime,
    pub last_request: Option<OffsetDateTime>,   // last authenticated catalog read
}
