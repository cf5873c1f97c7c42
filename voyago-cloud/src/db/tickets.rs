//! Support ticket persistence (agency → platform)

use shared::models::ticket::{TicketCreate, TicketPriorite, TicketStatut};
use sqlx::PgPool;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct Ticket {
    pub id: i64,
    pub agence_id: String,
    pub sujet: String,
    pub description: String,
    pub priorite: String,
    pub statut: String,
    pub created_at: i64,
    pub updated_at: i64,
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    data: &TicketCreate,
    now: i64,
) -> Result<Ticket, sqlx::Error> {
    let priorite = data.priorite.unwrap_or(TicketPriorite::Normale);
    sqlx::query_as(
        "INSERT INTO tickets (agence_id, sujet, description, priorite, statut, created_at, updated_at)
         VALUES ($1, $2, $3, $4, 'ouvert', $5, $5)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(&data.sujet)
    .bind(&data.description)
    .bind(priorite.as_db())
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list_for_agence(pool: &PgPool, agence_id: &str) -> Result<Vec<Ticket>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tickets WHERE agence_id = $1 ORDER BY created_at DESC")
        .bind(agence_id)
        .fetch_all(pool)
        .await
}

/// Admin view: all tickets, optional statut filter
pub async fn list_all(
    pool: &PgPool,
    statut_filter: Option<&str>,
) -> Result<Vec<Ticket>, sqlx::Error> {
    if let Some(statut) = statut_filter {
        sqlx::query_as("SELECT * FROM tickets WHERE statut = $1 ORDER BY created_at DESC")
            .bind(statut)
            .fetch_all(pool)
            .await
    } else {
        sqlx::query_as("SELECT * FROM tickets ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }
}

pub async fn get(pool: &PgPool, agence_id: &str, id: i64) -> Result<Option<Ticket>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tickets WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .fetch_optional(pool)
        .await
}

pub async fn set_statut(
    pool: &PgPool,
    id: i64,
    statut: TicketStatut,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE tickets SET statut = $1, updated_at = $2 WHERE id = $3")
        .bind(statut.as_db())
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Agency-scoped variant of [`set_statut`], for closing own tickets
pub async fn set_statut_for_agence(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    statut: TicketStatut,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tickets SET statut = $1, updated_at = $2 WHERE id = $3 AND agence_id = $4",
    )
    .bind(statut.as_db())
    .bind(now)
    .bind(id)
    .bind(agence_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
