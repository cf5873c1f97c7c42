//! Facture persistence
//!
//! All queries enforce agence_id isolation. Facture numbers come from
//! [`crate::db::counters`] and are allocated in the same transaction as
//! the insert.

use rust_decimal::Decimal;
use shared::models::facture::FactureStatut;
use sqlx::PgPool;

use super::counters;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct Facture {
    pub id: i64,
    pub agence_id: String,
    pub numero: String,
    pub client_id: i64,
    pub designation: String,
    pub montant_ht: Decimal,
    pub tva: Decimal,
    pub montant_ttc: Decimal,
    pub date_emission: i64,
    pub date_echeance: i64,
    pub date_paiement: Option<i64>,
    pub statut: String,
    pub created_at: i64,
}

/// Fields of a facture to insert; numero and ids are allocated here
pub struct NewFacture<'a> {
    pub client_id: i64,
    pub designation: &'a str,
    pub montant_ht: Decimal,
    pub tva: Decimal,
    pub montant_ttc: Decimal,
    pub date_emission: i64,
    pub date_echeance: i64,
    pub statut: FactureStatut,
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    data: &NewFacture<'_>,
    now: i64,
) -> Result<Facture, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let annee = counters::annee_of(data.date_emission);
    let seq = counters::next_seq(&mut *tx, agence_id, counters::DOC_FACTURE, annee).await?;
    let numero = counters::format_numero("FAC", annee, seq);

    let facture = insert_in_tx(&mut tx, agence_id, &numero, data, now).await?;

    tx.commit().await?;
    Ok(facture)
}

/// Insert a facture inside an existing transaction (used by create and by
/// the bon de commande conversion).
pub(super) async fn insert_in_tx(
    tx: &mut sqlx::PgTransaction<'_>,
    agence_id: &str,
    numero: &str,
    data: &NewFacture<'_>,
    now: i64,
) -> Result<Facture, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO factures
            (agence_id, numero, client_id, designation, montant_ht, tva, montant_ttc,
             date_emission, date_echeance, statut, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(numero)
    .bind(data.client_id)
    .bind(data.designation)
    .bind(data.montant_ht)
    .bind(data.tva)
    .bind(data.montant_ttc)
    .bind(data.date_emission)
    .bind(data.date_echeance)
    .bind(data.statut.as_db())
    .bind(now)
    .fetch_one(&mut **tx)
    .await
}

pub async fn list(
    pool: &PgPool,
    agence_id: &str,
    statut_filter: Option<&str>,
) -> Result<Vec<Facture>, sqlx::Error> {
    if let Some(statut) = statut_filter {
        sqlx::query_as(
            "SELECT * FROM factures WHERE agence_id = $1 AND statut = $2
             ORDER BY date_emission DESC, id DESC",
        )
        .bind(agence_id)
        .bind(statut)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as(
            "SELECT * FROM factures WHERE agence_id = $1 ORDER BY date_emission DESC, id DESC",
        )
        .bind(agence_id)
        .fetch_all(pool)
        .await
    }
}

pub async fn get(pool: &PgPool, agence_id: &str, id: i64) -> Result<Option<Facture>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM factures WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_montants(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    client_id: i64,
    designation: &str,
    montant_ht: Decimal,
    tva: Decimal,
    montant_ttc: Decimal,
    date_emission: i64,
    date_echeance: i64,
) -> Result<Option<Facture>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE factures SET
            client_id = $1, designation = $2, montant_ht = $3, tva = $4,
            montant_ttc = $5, date_emission = $6, date_echeance = $7
         WHERE id = $8 AND agence_id = $9
         RETURNING *",
    )
    .bind(client_id)
    .bind(designation)
    .bind(montant_ht)
    .bind(tva)
    .bind(montant_ttc)
    .bind(date_emission)
    .bind(date_echeance)
    .bind(id)
    .bind(agence_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_statut(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    statut: FactureStatut,
    date_paiement: Option<i64>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE factures SET statut = $1, date_paiement = COALESCE($2, date_paiement)
         WHERE id = $3 AND agence_id = $4",
    )
    .bind(statut.as_db())
    .bind(date_paiement)
    .bind(id)
    .bind(agence_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, agence_id: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM factures WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Créances: sent invoices whose due date has passed
pub async fn list_creances(
    pool: &PgPool,
    agence_id: &str,
    now: i64,
) -> Result<Vec<Facture>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM factures
         WHERE agence_id = $1 AND statut = 'envoyee' AND date_echeance < $2
         ORDER BY date_echeance ASC",
    )
    .bind(agence_id)
    .bind(now)
    .fetch_all(pool)
    .await
}

pub async fn count_by_client(
    pool: &PgPool,
    agence_id: &str,
    client_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM factures WHERE agence_id = $1 AND client_id = $2")
        .bind(agence_id)
        .bind(client_id)
        .fetch_one(pool)
        .await
}
