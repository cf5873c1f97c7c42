//! Client persistence
//!
//! All queries enforce agence_id isolation.

use shared::models::client::{ClientCreate, ClientUpdate};
use sqlx::PgPool;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct Client {
    pub id: i64,
    pub agence_id: String,
    pub nom: String,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub numero_passeport: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}

pub async fn list(
    pool: &PgPool,
    agence_id: &str,
    q: Option<&str>,
) -> Result<Vec<Client>, sqlx::Error> {
    if let Some(q) = q {
        let pattern = format!("%{q}%");
        sqlx::query_as(
            "SELECT * FROM clients
             WHERE agence_id = $1 AND (nom ILIKE $2 OR prenom ILIKE $2 OR email ILIKE $2)
             ORDER BY created_at DESC",
        )
        .bind(agence_id)
        .bind(pattern)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as("SELECT * FROM clients WHERE agence_id = $1 ORDER BY created_at DESC")
            .bind(agence_id)
            .fetch_all(pool)
            .await
    }
}

pub async fn get(pool: &PgPool, agence_id: &str, id: i64) -> Result<Option<Client>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM clients WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    data: &ClientCreate,
    now: i64,
) -> Result<Client, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO clients (agence_id, nom, prenom, email, telephone, adresse, numero_passeport, notes, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(&data.nom)
    .bind(data.prenom.as_deref())
    .bind(data.email.as_deref())
    .bind(data.telephone.as_deref())
    .bind(data.adresse.as_deref())
    .bind(data.numero_passeport.as_deref())
    .bind(data.notes.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    data: &ClientUpdate,
) -> Result<Option<Client>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE clients SET
            nom = COALESCE($1, nom),
            prenom = COALESCE($2, prenom),
            email = COALESCE($3, email),
            telephone = COALESCE($4, telephone),
            adresse = COALESCE($5, adresse),
            numero_passeport = COALESCE($6, numero_passeport),
            notes = COALESCE($7, notes)
         WHERE id = $8 AND agence_id = $9
         RETURNING *",
    )
    .bind(data.nom.as_deref())
    .bind(data.prenom.as_deref())
    .bind(data.email.as_deref())
    .bind(data.telephone.as_deref())
    .bind(data.adresse.as_deref())
    .bind(data.numero_passeport.as_deref())
    .bind(data.notes.as_deref())
    .bind(id)
    .bind(agence_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, agence_id: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count(pool: &PgPool, agence_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE agence_id = $1")
        .bind(agence_id)
        .fetch_one(pool)
        .await
}
