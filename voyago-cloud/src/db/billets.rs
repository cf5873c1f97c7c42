//! Billet (flight ticket) persistence
//!
//! All queries enforce agence_id isolation.

use rust_decimal::Decimal;
use shared::models::billet::{BilletCreate, BilletStatut, BilletUpdate};
use sqlx::PgPool;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct Billet {
    pub id: i64,
    pub agence_id: String,
    pub numero_billet: String,
    pub client_id: i64,
    pub compagnie: String,
    pub ville_depart: String,
    pub ville_arrivee: String,
    pub date_depart: i64,
    pub prix: Decimal,
    pub statut: String,
    pub created_at: i64,
}

pub async fn list(
    pool: &PgPool,
    agence_id: &str,
    statut_filter: Option<&str>,
) -> Result<Vec<Billet>, sqlx::Error> {
    if let Some(statut) = statut_filter {
        sqlx::query_as(
            "SELECT * FROM billets WHERE agence_id = $1 AND statut = $2
             ORDER BY date_depart DESC, id DESC",
        )
        .bind(agence_id)
        .bind(statut)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as(
            "SELECT * FROM billets WHERE agence_id = $1 ORDER BY date_depart DESC, id DESC",
        )
        .bind(agence_id)
        .fetch_all(pool)
        .await
    }
}

pub async fn get(pool: &PgPool, agence_id: &str, id: i64) -> Result<Option<Billet>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM billets WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    data: &BilletCreate,
    now: i64,
) -> Result<Billet, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO billets
            (agence_id, numero_billet, client_id, compagnie, ville_depart, ville_arrivee,
             date_depart, prix, statut, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'reserve', $9)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(&data.numero_billet)
    .bind(data.client_id)
    .bind(&data.compagnie)
    .bind(&data.ville_depart)
    .bind(&data.ville_arrivee)
    .bind(data.date_depart)
    .bind(data.prix)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    data: &BilletUpdate,
) -> Result<Option<Billet>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE billets SET
            numero_billet = COALESCE($1, numero_billet),
            client_id = COALESCE($2, client_id),
            compagnie = COALESCE($3, compagnie),
            ville_depart = COALESCE($4, ville_depart),
            ville_arrivee = COALESCE($5, ville_arrivee),
            date_depart = COALESCE($6, date_depart),
            prix = COALESCE($7, prix)
         WHERE id = $8 AND agence_id = $9
         RETURNING *",
    )
    .bind(data.numero_billet.as_deref())
    .bind(data.client_id)
    .bind(data.compagnie.as_deref())
    .bind(data.ville_depart.as_deref())
    .bind(data.ville_arrivee.as_deref())
    .bind(data.date_depart)
    .bind(data.prix)
    .bind(id)
    .bind(agence_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_statut(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    statut: BilletStatut,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE billets SET statut = $1 WHERE id = $2 AND agence_id = $3")
        .bind(statut.as_db())
        .bind(id)
        .bind(agence_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, agence_id: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM billets WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
