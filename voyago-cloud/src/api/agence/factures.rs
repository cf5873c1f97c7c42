//! Facture endpoints
//!
//! `montant_ttc` is always recomputed server-side from `montant_ht` and the
//! `tva` rate; client-provided TTC values are ignored.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::facture::{self, FactureCreate, FactureStatut, FactureUpdate};

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::factures::{Facture, NewFacture};
use crate::state::AppState;

use super::{ApiResult, internal};

fn check_montants(montant_ht: Decimal, tva: Decimal) -> Result<(), AppError> {
    if montant_ht < Decimal::ZERO {
        return Err(AppError::validation("montant_ht must not be negative"));
    }
    if tva < Decimal::ZERO {
        return Err(AppError::validation("tva must not be negative"));
    }
    Ok(())
}

// `payee` and `annulee` are only reachable through the payer/annuler
// transitions, never at creation.
fn check_statut_initial(statut: FactureStatut) -> Result<(), AppError> {
    if statut.is_open() {
        Ok(())
    } else {
        Err(
            AppError::validation("statut must be brouillon or envoyee")
                .with_detail("statut", statut.as_db()),
        )
    }
}

/// Error for a facture that can no longer be modified
fn closed_error(statut: FactureStatut) -> AppError {
    match statut {
        FactureStatut::Payee => AppError::new(ErrorCode::FactureAlreadyPayee),
        _ => AppError::new(ErrorCode::FactureAnnulee),
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub statut: Option<String>,
}

/// GET /api/agence/factures?statut=
pub async fn list_factures(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Facture>> {
    let factures = db::factures::list(&state.pool, &identity.agence_id, query.statut.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(factures))
}

/// GET /api/agence/factures/creances
///
/// Sent invoices past their due date.
pub async fn list_creances(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
) -> ApiResult<Vec<Facture>> {
    let now = shared::util::now_millis();
    let creances = db::factures::list_creances(&state.pool, &identity.agence_id, now)
        .await
        .map_err(internal)?;
    Ok(Json(creances))
}

/// GET /api/agence/factures/{id}
pub async fn get_facture(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Facture> {
    let facture = db::factures::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::FactureNotFound))?;
    Ok(Json(facture))
}

/// POST /api/agence/factures
pub async fn create_facture(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<FactureCreate>,
) -> ApiResult<Facture> {
    check_montants(payload.montant_ht, payload.tva)?;
    if payload.designation.trim().is_empty() {
        return Err(AppError::validation("designation is required"));
    }

    let statut = payload.statut.unwrap_or(FactureStatut::Brouillon);
    check_statut_initial(statut)?;

    let now = shared::util::now_millis();
    let date_emission = payload.date_emission.unwrap_or(now);
    let date_echeance = payload
        .date_echeance
        .unwrap_or_else(|| facture::echeance_default(date_emission));

    let new_facture = NewFacture {
        client_id: payload.client_id,
        designation: &payload.designation,
        montant_ht: payload.montant_ht,
        tva: payload.tva,
        montant_ttc: facture::montant_ttc(payload.montant_ht, payload.tva),
        date_emission,
        date_echeance,
        statut,
    };

    let created = db::factures::create(&state.pool, &identity.agence_id, &new_facture, now)
        .await
        .map_err(internal)?;
    Ok(Json(created))
}

/// PUT /api/agence/factures/{id}
///
/// Refused once the facture is payee or annulee.
pub async fn update_facture(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<FactureUpdate>,
) -> ApiResult<Facture> {
    let current = db::factures::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::FactureNotFound))?;

    if let Some(statut) = FactureStatut::from_db(&current.statut)
        && !statut.is_open()
    {
        return Err(closed_error(statut));
    }

    let montant_ht = payload.montant_ht.unwrap_or(current.montant_ht);
    let tva = payload.tva.unwrap_or(current.tva);
    check_montants(montant_ht, tva)?;

    let updated = db::factures::update_montants(
        &state.pool,
        &identity.agence_id,
        id,
        payload.client_id.unwrap_or(current.client_id),
        payload.designation.as_deref().unwrap_or(&current.designation),
        montant_ht,
        tva,
        facture::montant_ttc(montant_ht, tva),
        payload.date_emission.unwrap_or(current.date_emission),
        payload.date_echeance.unwrap_or(current.date_echeance),
    )
    .await
    .map_err(internal)?
    .ok_or_else(|| AppError::new(ErrorCode::FactureNotFound))?;

    Ok(Json(updated))
}

/// POST /api/agence/factures/{id}/payer
pub async fn payer(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Facture> {
    let current = db::factures::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::FactureNotFound))?;

    if let Some(statut) = FactureStatut::from_db(&current.statut)
        && !statut.is_open()
    {
        return Err(closed_error(statut));
    }

    let now = shared::util::now_millis();
    db::factures::set_statut(
        &state.pool,
        &identity.agence_id,
        id,
        FactureStatut::Payee,
        Some(now),
    )
    .await
    .map_err(internal)?;

    let _ = db::audit::log(
        &state.pool,
        &identity.agence_id,
        "facture_payee",
        Some(&serde_json::json!({ "facture_id": id, "numero": current.numero })),
        now,
    )
    .await;

    let facture = db::factures::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::FactureNotFound))?;
    Ok(Json(facture))
}

/// POST /api/agence/factures/{id}/annuler
pub async fn annuler(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Facture> {
    let current = db::factures::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::FactureNotFound))?;

    match FactureStatut::from_db(&current.statut) {
        Some(FactureStatut::Payee) => return Err(AppError::new(ErrorCode::FactureAlreadyPayee)),
        Some(FactureStatut::Annulee) => return Err(AppError::new(ErrorCode::FactureAnnulee)),
        _ => {}
    }

    db::factures::set_statut(
        &state.pool,
        &identity.agence_id,
        id,
        FactureStatut::Annulee,
        None,
    )
    .await
    .map_err(internal)?;

    let facture = db::factures::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::FactureNotFound))?;
    Ok(Json(facture))
}

/// DELETE /api/agence/factures/{id}
pub async fn delete_facture(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::factures::delete(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::FactureNotFound));
    }
    Ok(Json(serde_json::json!({ "message": "Facture deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_statut_open_only() {
        assert!(check_statut_initial(FactureStatut::Brouillon).is_ok());
        assert!(check_statut_initial(FactureStatut::Envoyee).is_ok());

        let err = check_statut_initial(FactureStatut::Payee).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let err = check_statut_initial(FactureStatut::Annulee).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_closed_error_codes() {
        assert_eq!(
            closed_error(FactureStatut::Payee).code,
            ErrorCode::FactureAlreadyPayee
        );
        assert_eq!(
            closed_error(FactureStatut::Annulee).code,
            ErrorCode::FactureAnnulee
        );
    }
}
