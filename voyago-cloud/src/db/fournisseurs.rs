//! Fournisseur persistence
//!
//! All queries enforce agence_id isolation.

use shared::models::fournisseur::{FournisseurCreate, FournisseurUpdate};
use sqlx::PgPool;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct Fournisseur {
    pub id: i64,
    pub agence_id: String,
    pub nom: String,
    pub categorie: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}

pub async fn list(
    pool: &PgPool,
    agence_id: &str,
    q: Option<&str>,
) -> Result<Vec<Fournisseur>, sqlx::Error> {
    if let Some(q) = q {
        let pattern = format!("%{q}%");
        sqlx::query_as(
            "SELECT * FROM fournisseurs
             WHERE agence_id = $1 AND (nom ILIKE $2 OR email ILIKE $2)
             ORDER BY created_at DESC",
        )
        .bind(agence_id)
        .bind(pattern)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as("SELECT * FROM fournisseurs WHERE agence_id = $1 ORDER BY created_at DESC")
            .bind(agence_id)
            .fetch_all(pool)
            .await
    }
}

pub async fn get(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
) -> Result<Option<Fournisseur>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM fournisseurs WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    data: &FournisseurCreate,
    now: i64,
) -> Result<Fournisseur, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO fournisseurs (agence_id, nom, categorie, email, telephone, notes, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(&data.nom)
    .bind(data.categorie.as_db())
    .bind(data.email.as_deref())
    .bind(data.telephone.as_deref())
    .bind(data.notes.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    data: &FournisseurUpdate,
) -> Result<Option<Fournisseur>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE fournisseurs SET
            nom = COALESCE($1, nom),
            categorie = COALESCE($2, categorie),
            email = COALESCE($3, email),
            telephone = COALESCE($4, telephone),
            notes = COALESCE($5, notes)
         WHERE id = $6 AND agence_id = $7
         RETURNING *",
    )
    .bind(data.nom.as_deref())
    .bind(data.categorie.map(|c| c.as_db()))
    .bind(data.email.as_deref())
    .bind(data.telephone.as_deref())
    .bind(data.notes.as_deref())
    .bind(id)
    .bind(agence_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, agence_id: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM fournisseurs WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
