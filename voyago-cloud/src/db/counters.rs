//! Per-agency document numbering
//!
//! Numbers like `FAC-2026-0042` are allocated from a counter table keyed by
//! (agence, document type, year). The counter is bumped with a single atomic
//! upsert, so numbers never collide and never reuse a value after a document
//! is deleted (a count-based scheme would).

use sqlx::PgExecutor;

pub const DOC_FACTURE: &str = "facture";
pub const DOC_BON_COMMANDE: &str = "bon_commande";

/// Allocate the next sequence value for (agence, doc_type, year).
///
/// Safe to call inside a transaction; the allocation then commits or rolls
/// back with the document insert.
pub async fn next_seq<'e, E>(
    exec: E,
    agence_id: &str,
    doc_type: &str,
    annee: i32,
) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar(
        "INSERT INTO document_counters (agence_id, doc_type, annee, seq)
         VALUES ($1, $2, $3, 1)
         ON CONFLICT (agence_id, doc_type, annee)
         DO UPDATE SET seq = document_counters.seq + 1
         RETURNING seq",
    )
    .bind(agence_id)
    .bind(doc_type)
    .bind(annee)
    .fetch_one(exec)
    .await
}

/// Format a document number: `FAC-2026-0042`
pub fn format_numero(prefix: &str, annee: i32, seq: i64) -> String {
    format!("{prefix}-{annee}-{seq:04}")
}

/// Year component used for numbering, from an epoch-millis timestamp
pub fn annee_of(millis: i64) -> i32 {
    use chrono::{DateTime, Datelike};
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.year())
        .unwrap_or(1970)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numero() {
        assert_eq!(format_numero("FAC", 2026, 42), "FAC-2026-0042");
        assert_eq!(format_numero("BC", 2026, 7), "BC-2026-0007");
        // Sequence wider than 4 digits keeps all digits
        assert_eq!(format_numero("FAC", 2026, 12345), "FAC-2026-12345");
    }

    #[test]
    fn test_annee_of() {
        // 2026-08-26T00:00:00Z
        assert_eq!(annee_of(1_787_961_600_000), 2026);
        assert_eq!(annee_of(0), 1970);
    }
}
