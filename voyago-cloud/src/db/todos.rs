//! Todo persistence
//!
//! All queries enforce agence_id isolation.

use shared::models::todo::{TodoCreate, TodoUpdate};
use sqlx::PgPool;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct Todo {
    pub id: i64,
    pub agence_id: String,
    pub titre: String,
    pub date_echeance: Option<i64>,
    pub fait: bool,
    pub created_at: i64,
}

pub async fn list(pool: &PgPool, agence_id: &str) -> Result<Vec<Todo>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM todos WHERE agence_id = $1
         ORDER BY fait ASC, date_echeance ASC NULLS LAST, created_at DESC",
    )
    .bind(agence_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    data: &TodoCreate,
    now: i64,
) -> Result<Todo, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO todos (agence_id, titre, date_echeance, fait, created_at)
         VALUES ($1, $2, $3, FALSE, $4)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(&data.titre)
    .bind(data.date_echeance)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    data: &TodoUpdate,
) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE todos SET
            titre = COALESCE($1, titre),
            date_echeance = COALESCE($2, date_echeance),
            fait = COALESCE($3, fait)
         WHERE id = $4 AND agence_id = $5
         RETURNING *",
    )
    .bind(data.titre.as_deref())
    .bind(data.date_echeance)
    .bind(data.fait)
    .bind(id)
    .bind(agence_id)
    .fetch_optional(pool)
    .await
}

pub async fn toggle(pool: &PgPool, agence_id: &str, id: i64) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE todos SET fait = NOT fait WHERE id = $1 AND agence_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(agence_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, agence_id: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
