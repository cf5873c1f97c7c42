//! Audit log operations

use sqlx::PgPool;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Write an audit log entry
pub async fn log(
    pool: &PgPool,
    agence_id: &str,
    action: &str,
    detail: Option<&serde_json::Value>,
    now: i64,
) -> Result<(), BoxError> {
    sqlx::query(
        "INSERT INTO audit_logs (agence_id, action, detail, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(agence_id)
    .bind(action)
    .bind(detail)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Query audit log entries for an agency (paginated)
#[derive(sqlx::FromRow, serde::Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub action: String,
    pub detail: Option<serde_json::Value>,
    pub created_at: i64,
}

pub async fn query(
    pool: &PgPool,
    agence_id: &str,
    limit: i32,
    offset: i32,
) -> Result<Vec<AuditEntry>, BoxError> {
    let rows: Vec<AuditEntry> = sqlx::query_as(
        "SELECT id, action, detail, created_at FROM audit_logs
         WHERE agence_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(agence_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
