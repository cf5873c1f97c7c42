//! Bon de commande persistence and conversion
//!
//! All queries enforce agence_id isolation. The conversion to facture is
//! the one multi-statement write in the system and runs in a single
//! transaction: row lock, precondition check, counter bump, facture
//! insert, bon update.

use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::bon_commande::{BonCommandeCreate, BonCommandeStatut, BonCommandeUpdate};
use shared::models::facture::{self, FactureStatut};
use sqlx::PgPool;

use super::counters;
use super::factures::{self, Facture, NewFacture};
use crate::error::ServiceResult;

#[derive(sqlx::FromRow, serde::Serialize)]
pub struct BonCommande {
    pub id: i64,
    pub agence_id: String,
    pub numero: String,
    pub client_id: i64,
    pub designation: String,
    pub montant_ht: Decimal,
    pub tva: Decimal,
    pub montant_ttc: Decimal,
    pub statut: String,
    pub facture_id: Option<i64>,
    pub created_at: i64,
}

pub async fn create(
    pool: &PgPool,
    agence_id: &str,
    data: &BonCommandeCreate,
    montant_ttc: Decimal,
    now: i64,
) -> Result<BonCommande, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let annee = counters::annee_of(now);
    let seq = counters::next_seq(&mut *tx, agence_id, counters::DOC_BON_COMMANDE, annee).await?;
    let numero = counters::format_numero("BC", annee, seq);

    let bon: BonCommande = sqlx::query_as(
        "INSERT INTO bons_commande
            (agence_id, numero, client_id, designation, montant_ht, tva, montant_ttc, statut, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'en_attente', $8)
         RETURNING *",
    )
    .bind(agence_id)
    .bind(&numero)
    .bind(data.client_id)
    .bind(&data.designation)
    .bind(data.montant_ht)
    .bind(data.tva)
    .bind(montant_ttc)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(bon)
}

pub async fn list(
    pool: &PgPool,
    agence_id: &str,
    statut_filter: Option<&str>,
) -> Result<Vec<BonCommande>, sqlx::Error> {
    if let Some(statut) = statut_filter {
        sqlx::query_as(
            "SELECT * FROM bons_commande WHERE agence_id = $1 AND statut = $2
             ORDER BY created_at DESC, id DESC",
        )
        .bind(agence_id)
        .bind(statut)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as(
            "SELECT * FROM bons_commande WHERE agence_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(agence_id)
        .fetch_all(pool)
        .await
    }
}

pub async fn get(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
) -> Result<Option<BonCommande>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM bons_commande WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    data: &BonCommandeUpdate,
    montant_ttc: Decimal,
) -> Result<Option<BonCommande>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE bons_commande SET
            client_id = COALESCE($1, client_id),
            designation = COALESCE($2, designation),
            montant_ht = COALESCE($3, montant_ht),
            tva = COALESCE($4, tva),
            montant_ttc = $5
         WHERE id = $6 AND agence_id = $7
         RETURNING *",
    )
    .bind(data.client_id)
    .bind(data.designation.as_deref())
    .bind(data.montant_ht)
    .bind(data.tva)
    .bind(montant_ttc)
    .bind(id)
    .bind(agence_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_statut(
    pool: &PgPool,
    agence_id: &str,
    id: i64,
    statut: BonCommandeStatut,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE bons_commande SET statut = $1 WHERE id = $2 AND agence_id = $3",
    )
    .bind(statut.as_db())
    .bind(id)
    .bind(agence_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, agence_id: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bons_commande WHERE id = $1 AND agence_id = $2")
        .bind(id)
        .bind(agence_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Result of a bon → facture conversion
#[derive(serde::Serialize)]
pub struct ConversionResult {
    pub facture: Facture,
    pub bon_commande: BonCommande,
}

/// Convert an accepted bon de commande into a facture.
///
/// Preconditions (checked under a row lock):
/// - the bon exists for this agency;
/// - its statut is `accepte` — an already converted bon is `facture`,
///   so double conversion fails the same check.
///
/// The new facture copies client, designation and montants, gets a fresh
/// FAC number, is emitted now and due 30 days later.
pub async fn convert_to_facture(
    pool: &PgPool,
    agence_id: &str,
    bon_id: i64,
    now: i64,
) -> ServiceResult<ConversionResult> {
    let mut tx = pool.begin().await?;

    let bon: Option<BonCommande> = sqlx::query_as(
        "SELECT * FROM bons_commande WHERE id = $1 AND agence_id = $2 FOR UPDATE",
    )
    .bind(bon_id)
    .bind(agence_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(bon) = bon else {
        return Err(ErrorCode::BonCommandeNotFound.into());
    };

    match BonCommandeStatut::from_db(&bon.statut) {
        Some(BonCommandeStatut::Facture) => {
            return Err(ErrorCode::BonCommandeDejaConverti.into());
        }
        Some(s) if s.can_convert() => {}
        _ => return Err(ErrorCode::BonCommandeNonAccepte.into()),
    }

    let annee = counters::annee_of(now);
    let seq = counters::next_seq(&mut *tx, agence_id, counters::DOC_FACTURE, annee).await?;
    let numero = counters::format_numero("FAC", annee, seq);

    let new_facture = NewFacture {
        client_id: bon.client_id,
        designation: &bon.designation,
        montant_ht: bon.montant_ht,
        tva: bon.tva,
        montant_ttc: facture::montant_ttc(bon.montant_ht, bon.tva),
        date_emission: now,
        date_echeance: facture::echeance_default(now),
        statut: FactureStatut::Envoyee,
    };
    let created = factures::insert_in_tx(&mut tx, agence_id, &numero, &new_facture, now).await?;

    let bon: BonCommande = sqlx::query_as(
        "UPDATE bons_commande SET statut = 'facture', facture_id = $1
         WHERE id = $2 AND agence_id = $3
         RETURNING *",
    )
    .bind(created.id)
    .bind(bon_id)
    .bind(agence_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(ConversionResult {
        facture: created,
        bon_commande: bon,
    })
}

// Conversion preconditions are pure statut checks; see
// shared::models::bon_commande tests for the statut transition table.
impl BonCommande {
    /// Parsed statut, defaulting to `en_attente` for unknown values
    pub fn statut_parsed(&self) -> BonCommandeStatut {
        BonCommandeStatut::from_db(&self.statut).unwrap_or(BonCommandeStatut::EnAttente)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bon(statut: &str) -> BonCommande {
        BonCommande {
            id: 1,
            agence_id: "a".into(),
            numero: "BC-2026-0001".into(),
            client_id: 7,
            designation: "Séjour Marrakech".into(),
            montant_ht: Decimal::new(100000, 2),
            tva: Decimal::new(20, 0),
            montant_ttc: Decimal::new(120000, 2),
            statut: statut.into(),
            facture_id: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_statut_parsed() {
        assert_eq!(bon("accepte").statut_parsed(), BonCommandeStatut::Accepte);
        assert_eq!(bon("facture").statut_parsed(), BonCommandeStatut::Facture);
        assert_eq!(bon("corrompu").statut_parsed(), BonCommandeStatut::EnAttente);
    }

    #[test]
    fn test_only_accepte_converts() {
        assert!(bon("accepte").statut_parsed().can_convert());
        assert!(!bon("en_attente").statut_parsed().can_convert());
        assert!(!bon("refuse").statut_parsed().can_convert());
        assert!(!bon("facture").statut_parsed().can_convert());
    }
}
