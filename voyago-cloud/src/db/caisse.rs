//! Caisse (cash register) persistence
//!
//! All queries enforce agence_id isolation.

use rust_decimal::Decimal;
use shared::models::caisse::{OperationCreate, SoldeCaisse};
use sqlx::PgPool;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct Operation {
    pub id: i64,
    pub agence_id: String,
    pub type_operation: String,
    pub montant: Decimal,
    pub motif: String,
    pub date_operation: i64,
    pub created_at: i64,
}

pub async fn list(
    pool: &PgPool,
    agence_id: &str,
    from: Option<i64>,
    to: Option<i64>,
) -> Result<Vec<Operation>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM caisse_operations
         WHERE agence_id = $1
           AND ($2::BIGINT IS NULL OR date_operation >= $2)
           AND ($3::BIGINT IS NULL OR date_operation <= $3)
         ORDER BY date_operation DESC, id DESC",
    )
    .bind(agence_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    data: &OperationCreate,
    date_operation: i64,
    now: i64,
) -> Result<Operation, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO caisse_operations (agence_id, type_operation, montant, motif, date_operation, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(data.type_operation.as_db())
    .bind(data.montant)
    .bind(&data.motif)
    .bind(date_operation)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, agence_id: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM caisse_operations WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn solde(pool: &PgPool, agence_id: &str) -> Result<SoldeCaisse, sqlx::Error> {
    let (total_entrees, total_sorties): (Decimal, Decimal) = sqlx::query_as(
        "SELECT
            COALESCE(SUM(montant) FILTER (WHERE type_operation = 'entree'), 0),
            COALESCE(SUM(montant) FILTER (WHERE type_operation = 'sortie'), 0)
         FROM caisse_operations WHERE agence_id = $1",
    )
    .bind(agence_id)
    .fetch_one(pool)
    .await?;

    Ok(SoldeCaisse {
        solde: total_entrees - total_sorties,
        total_entrees,
        total_sorties,
    })
}

pub async fn recent(
    pool: &PgPool,
    agence_id: &str,
    limit: i64,
) -> Result<Vec<Operation>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM caisse_operations WHERE agence_id = $1
         ORDER BY date_operation DESC, id DESC LIMIT $2",
    )
    .bind(agence_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
