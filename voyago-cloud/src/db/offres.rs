//! Vitrine offres persistence
//!
//! All queries enforce agence_id isolation, except the published-list
//! query backing the public vitrine.

use rust_decimal::Decimal;
use shared::models::offre::{OffreCreate, OffreUpdate};
use sqlx::PgPool;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct Offre {
    pub id: i64,
    pub agence_id: String,
    pub titre: String,
    pub destination: String,
    pub description: Option<String>,
    pub prix: Decimal,
    pub duree_jours: Option<i32>,
    pub publie: bool,
    pub created_at: i64,
}

pub async fn list(pool: &PgPool, agence_id: &str) -> Result<Vec<Offre>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM offres WHERE agence_id = $1 ORDER BY created_at DESC")
        .bind(agence_id)
        .fetch_all(pool)
        .await
}

/// Published offres only, for the public vitrine
pub async fn list_publiees(pool: &PgPool, agence_id: &str) -> Result<Vec<Offre>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM offres WHERE agence_id = $1 AND publie ORDER BY created_at DESC",
    )
    .bind(agence_id)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &PgPool, agence_id: &str, id: i64) -> Result<Option<Offre>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM offres WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    data: &OffreCreate,
    now: i64,
) -> Result<Offre, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO offres (agence_id, titre, destination, description, prix, duree_jours, publie, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(&data.titre)
    .bind(&data.destination)
    .bind(data.description.as_deref())
    .bind(data.prix)
    .bind(data.duree_jours)
    .bind(data.publie.unwrap_or(false))
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    data: &OffreUpdate,
) -> Result<Option<Offre>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE offres SET
            titre = COALESCE($1, titre),
            destination = COALESCE($2, destination),
            description = COALESCE($3, description),
            prix = COALESCE($4, prix),
            duree_jours = COALESCE($5, duree_jours),
            publie = COALESCE($6, publie)
         WHERE id = $7 AND agence_id = $8
         RETURNING *",
    )
    .bind(data.titre.as_deref())
    .bind(data.destination.as_deref())
    .bind(data.description.as_deref())
    .bind(data.prix)
    .bind(data.duree_jours)
    .bind(data.publie)
    .bind(id)
    .bind(agence_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, agence_id: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM offres WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
