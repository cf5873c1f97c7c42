//! Module activation requests and the permission-list merge
//!
//! An agency asks for a module; a platform admin approves or rejects.
//! Approval merges the module into the agency's active list inside one
//! transaction, so the request status and the permission list never
//! diverge.

use shared::error::ErrorCode;
use shared::types::{ModuleId, merge_modules};
use sqlx::PgPool;

use crate::error::ServiceResult;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct ModuleRequest {
    pub id: i64,
    pub agence_id: String,
    pub module: String,
    pub statut: String,
    pub created_at: i64,
    pub decided_at: Option<i64>,
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    module: ModuleId,
    now: i64,
) -> Result<ModuleRequest, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO module_requests (agence_id, module, statut, created_at)
         VALUES ($1, $2, 'en_attente', $3)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(module.as_db())
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn has_pending(
    pool: &PgPool,
    agence_id: &str,
    module: ModuleId,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM module_requests
         WHERE agence_id = $1 AND module = $2 AND statut = 'en_attente'",
    )
    .bind(agence_id)
    .bind(module.as_db())
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn list_for_agence(
    pool: &PgPool,
    agence_id: &str,
) -> Result<Vec<ModuleRequest>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM module_requests WHERE agence_id = $1 ORDER BY created_at DESC")
        .bind(agence_id)
        .fetch_all(pool)
        .await
}

/// Admin view: all requests, optional statut filter
pub async fn list_all(
    pool: &PgPool,
    statut_filter: Option<&str>,
) -> Result<Vec<ModuleRequest>, sqlx::Error> {
    if let Some(statut) = statut_filter {
        sqlx::query_as("SELECT * FROM module_requests WHERE statut = $1 ORDER BY created_at ASC")
            .bind(statut)
            .fetch_all(pool)
            .await
    } else {
        sqlx::query_as("SELECT * FROM module_requests ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }
}

/// Approve a pending request: mark it approved and merge the module into
/// the agency's `modules_actifs`, in one transaction.
pub async fn approve(pool: &PgPool, request_id: i64, now: i64) -> ServiceResult<ModuleRequest> {
    let mut tx = pool.begin().await?;

    let request: Option<ModuleRequest> =
        sqlx::query_as("SELECT * FROM module_requests WHERE id = $1 FOR UPDATE")
            .bind(request_id)
            .fetch_optional(&mut *tx)
            .await?;

    let Some(request) = request else {
        return Err(ErrorCode::NotFound.into());
    };
    if request.statut != "en_attente" {
        return Err(ErrorCode::InvalidRequest.into());
    }
    let Some(module) = ModuleId::from_db(&request.module) else {
        return Err(ErrorCode::InvalidRequest.into());
    };

    let actifs: Vec<String> =
        sqlx::query_scalar("SELECT modules_actifs FROM agences WHERE id = $1 FOR UPDATE")
            .bind(&request.agence_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ErrorCode::AgenceNotFound)?;

    let merged = merge_modules(&actifs, module);

    sqlx::query("UPDATE agences SET modules_actifs = $1 WHERE id = $2")
        .bind(&merged)
        .bind(&request.agence_id)
        .execute(&mut *tx)
        .await?;

    let request: ModuleRequest = sqlx::query_as(
        "UPDATE module_requests SET statut = 'approuvee', decided_at = $1
         WHERE id = $2 RETURNING *",
    )
    .bind(now)
    .bind(request_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(request)
}

/// Reject a pending request
pub async fn reject(pool: &PgPool, request_id: i64, now: i64) -> ServiceResult<ModuleRequest> {
    let request: Option<ModuleRequest> = sqlx::query_as(
        "UPDATE module_requests SET statut = 'rejetee', decided_at = $1
         WHERE id = $2 AND statut = 'en_attente'
         RETURNING *",
    )
    .bind(now)
    .bind(request_id)
    .fetch_optional(pool)
    .await?;

    request.ok_or_else(|| ErrorCode::NotFound.into())
}
