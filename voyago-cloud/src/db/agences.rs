//! Agence (tenant) persistence

use sqlx::PgPool;

#[derive(sqlx::FromRow)]
pub struct Agence {
    pub id: String,
    pub nom: String,
    pub email: String,
    pub hashed_password: String,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub statut: String,
    pub modules_actifs: Vec<String>,
    pub vitrine_active: bool,
    pub slug: Option<String>,
    pub description_publique: Option<String>,
    pub created_at: i64,
    pub approved_at: Option<i64>,
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    nom: &str,
    email: &str,
    hashed_password: &str,
    telephone: Option<&str>,
    adresse: Option<&str>,
    modules_actifs: &[String],
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO agences (id, nom, email, hashed_password, telephone, adresse, statut, modules_actifs, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, 'en_attente', $7, $8)",
    )
    .bind(id)
    .bind(nom)
    .bind(email)
    .bind(hashed_password)
    .bind(telephone)
    .bind(adresse)
    .bind(modules_actifs)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Agence>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM agences WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Agence>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM agences WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Agence>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM agences WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Agency summary for the admin console
#[derive(sqlx::FromRow, serde::Serialize)]
pub struct AgenceSummary {
    pub id: String,
    pub nom: String,
    pub email: String,
    pub statut: String,
    pub modules_actifs: Vec<String>,
    pub created_at: i64,
    pub approved_at: Option<i64>,
}

pub async fn list(
    pool: &PgPool,
    statut_filter: Option<&str>,
) -> Result<Vec<AgenceSummary>, sqlx::Error> {
    if let Some(statut) = statut_filter {
        sqlx::query_as(
            "SELECT id, nom, email, statut, modules_actifs, created_at, approved_at
             FROM agences WHERE statut = $1 ORDER BY created_at DESC",
        )
        .bind(statut)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as(
            "SELECT id, nom, email, statut, modules_actifs, created_at, approved_at
             FROM agences ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
    }
}

pub async fn update_statut(pool: &PgPool, id: &str, statut: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE agences SET statut = $1 WHERE id = $2")
        .bind(statut)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_approved(pool: &PgPool, id: &str, now: i64) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("UPDATE agences SET statut = 'approuvee', approved_at = $1 WHERE id = $2")
            .bind(now)
            .bind(id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}

pub async fn update_password(
    pool: &PgPool,
    id: &str,
    hashed_password: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE agences SET hashed_password = $1 WHERE id = $2")
        .bind(hashed_password)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_profile(
    pool: &PgPool,
    id: &str,
    data: &shared::models::agence::AgenceUpdate,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE agences SET
            nom = COALESCE($1, nom),
            telephone = COALESCE($2, telephone),
            adresse = COALESCE($3, adresse)
         WHERE id = $4",
    )
    .bind(data.nom.as_deref())
    .bind(data.telephone.as_deref())
    .bind(data.adresse.as_deref())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// `slug` and `description_publique` are nullable: the outer `Option` is
/// "was the field sent", the inner one the new value (`None` clears it).
pub async fn update_vitrine(
    pool: &PgPool,
    id: &str,
    vitrine_active: Option<bool>,
    slug: Option<Option<&str>>,
    description_publique: Option<Option<&str>>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE agences SET
            vitrine_active = COALESCE($1, vitrine_active),
            slug = CASE WHEN $2 THEN $3 ELSE slug END,
            description_publique = CASE WHEN $4 THEN $5 ELSE description_publique END
         WHERE id = $6",
    )
    .bind(vitrine_active)
    .bind(slug.is_some())
    .bind(slug.flatten())
    .bind(description_publique.is_some())
    .bind(description_publique.flatten())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn slug_taken_by_other(
    pool: &PgPool,
    slug: &str,
    agence_id: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM agences WHERE slug = $1 AND id <> $2")
            .bind(slug)
            .bind(agence_id)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}
