//! Platform admin accounts

use sqlx::PgPool;

#[derive(sqlx::FromRow)]
pub struct Admin {
    pub id: String,
    pub email: String,
    pub hashed_password: String,
    pub nom: String,
    pub created_at: i64,
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admins WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}
