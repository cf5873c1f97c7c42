//! Dashboard aggregation
//!
//! One payload, several SQL aggregates. Everything is computed in the
//! database; nothing is loaded wholesale into memory.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::caisse;
use shared::models::caisse::SoldeCaisse;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(serde::Serialize)]
pub struct Dashboard {
    pub total_clients: i64,
    pub factures: FacturesStats,
    pub bons_en_attente: i64,
    pub billets: BilletsStats,
    pub caisse: SoldeCaisse,
    pub todos_ouverts: i64,
    pub dernieres_operations: Vec<caisse::Operation>,
}

#[derive(serde::Serialize)]
pub struct FacturesStats {
    pub total: i64,
    pub payees: i64,
    pub envoyees: i64,
    /// Sum of TTC amounts of paid invoices
    pub chiffre_affaires: Decimal,
    /// Sent invoices past their due date
    pub nb_creances: i64,
    pub montant_creances: Decimal,
}

#[derive(serde::Serialize)]
pub struct BilletsStats {
    pub reserves: i64,
    pub emis: i64,
    pub annules: i64,
}

pub async fn load(pool: &PgPool, agence_id: &str, now: i64) -> Result<Dashboard, BoxError> {
    let total_clients = super::clients::count(pool, agence_id).await?;

    let (total, payees, envoyees, chiffre_affaires): (i64, i64, i64, Decimal) = sqlx::query_as(
        "SELECT
            COUNT(*),
            COUNT(*) FILTER (WHERE statut = 'payee'),
            COUNT(*) FILTER (WHERE statut = 'envoyee'),
            COALESCE(SUM(montant_ttc) FILTER (WHERE statut = 'payee'), 0)
         FROM factures WHERE agence_id = $1",
    )
    .bind(agence_id)
    .fetch_one(pool)
    .await?;

    let (nb_creances, montant_creances): (i64, Decimal) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(montant_ttc), 0)
         FROM factures
         WHERE agence_id = $1 AND statut = 'envoyee' AND date_echeance < $2",
    )
    .bind(agence_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    let bons_en_attente: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bons_commande WHERE agence_id = $1 AND statut = 'en_attente'",
    )
    .bind(agence_id)
    .fetch_one(pool)
    .await?;

    let (reserves, emis, annules): (i64, i64, i64) = sqlx::query_as(
        "SELECT
            COUNT(*) FILTER (WHERE statut = 'reserve'),
            COUNT(*) FILTER (WHERE statut = 'emis'),
            COUNT(*) FILTER (WHERE statut = 'annule')
         FROM billets WHERE agence_id = $1",
    )
    .bind(agence_id)
    .fetch_one(pool)
    .await?;

    let todos_ouverts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE agence_id = $1 AND NOT fait")
            .bind(agence_id)
            .fetch_one(pool)
            .await?;

    let solde = caisse::solde(pool, agence_id).await?;
    let dernieres_operations = caisse::recent(pool, agence_id, 5).await?;

    Ok(Dashboard {
        total_clients,
        factures: FacturesStats {
            total,
            payees,
            envoyees,
            chiffre_affaires,
            nb_creances,
            montant_creances,
        },
        bons_en_attente,
        billets: BilletsStats {
            reserves,
            emis,
            annules,
        },
        caisse: solde,
        todos_ouverts,
        dernieres_operations,
    })
}
