//! Bon de commande endpoints, including the conversion to facture

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::bon_commande::{BonCommandeCreate, BonCommandeStatut, BonCommandeUpdate};
use shared::models::facture;

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::bons_commande::{BonCommande, ConversionResult};
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

#[derive(Deserialize)]
pub struct ListQuery {
    pub statut: Option<String>,
}

/// GET /api/agence/bons-commande?statut=
pub async fn list_bons(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<BonCommande>> {
    let bons = db::bons_commande::list(&state.pool, &identity.agence_id, query.statut.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(bons))
}

/// GET /api/agence/bons-commande/{id}
pub async fn get_bon(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<BonCommande> {
    let bon = db::bons_commande::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BonCommandeNotFound))?;
    Ok(Json(bon))
}

/// POST /api/agence/bons-commande
pub async fn create_bon(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<BonCommandeCreate>,
) -> ApiResult<BonCommande> {
    check_montants(payload.montant_ht, payload.tva)?;
    if payload.designation.trim().is_empty() {
        return Err(AppError::validation("designation is required"));
    }

    let montant_ttc = facture::montant_ttc(payload.montant_ht, payload.tva);
    let now = shared::util::now_millis();
    let bon = db::bons_commande::create(&state.pool, &identity.agence_id, &payload, montant_ttc, now)
        .await
        .map_err(internal)?;
    Ok(Json(bon))
}

/// PUT /api/agence/bons-commande/{id}
///
/// Refused once the bon has been converted.
pub async fn update_bon(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<BonCommandeUpdate>,
) -> ApiResult<BonCommande> {
    let current = db::bons_commande::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BonCommandeNotFound))?;

    if current.statut_parsed() == BonCommandeStatut::Facture {
        return Err(AppError::new(ErrorCode::BonCommandeDejaConverti));
    }

    let montant_ht = payload.montant_ht.unwrap_or(current.montant_ht);
    let tva = payload.tva.unwrap_or(current.tva);
    check_montants(montant_ht, tva)?;
    let montant_ttc = facture::montant_ttc(montant_ht, tva);

    let bon = db::bons_commande::update(&state.pool, &identity.agence_id, id, &payload, montant_ttc)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BonCommandeNotFound))?;
    Ok(Json(bon))
}

async fn transition(
    state: &AppState,
    agence_id: &str,
    id: i64,
    target: BonCommandeStatut,
) -> Result<BonCommande, AppError> {
    let current = db::bons_commande::get(&state.pool, agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BonCommandeNotFound))?;

    match current.statut_parsed() {
        BonCommandeStatut::EnAttente => {}
        BonCommandeStatut::Facture => {
            return Err(AppError::new(ErrorCode::BonCommandeDejaConverti));
        }
        s => {
            return Err(AppError::new(ErrorCode::InvalidRequest)
                .with_detail("statut", s.as_db()));
        }
    }

    db::bons_commande::set_statut(&state.pool, agence_id, id, target)
        .await
        .map_err(internal)?;

    db::bons_commande::get(&state.pool, agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BonCommandeNotFound))
}

/// POST /api/agence/bons-commande/{id}/accepter
pub async fn accepter(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<BonCommande> {
    let bon = transition(&state, &identity.agence_id, id, BonCommandeStatut::Accepte).await?;
    Ok(Json(bon))
}

/// POST /api/agence/bons-commande/{id}/refuser
pub async fn refuser(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<BonCommande> {
    let bon = transition(&state, &identity.agence_id, id, BonCommandeStatut::Refuse).await?;
    Ok(Json(bon))
}

/// POST /api/agence/bons-commande/{id}/convert
///
/// Only an accepted bon converts; the resulting facture is `envoyee`,
/// emitted now and due in 30 days.
pub async fn convert(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<ConversionResult> {
    let now = shared::util::now_millis();
    let result = db::bons_commande::convert_to_facture(&state.pool, &identity.agence_id, id, now)
        .await
        .map_err(AppError::from)?;

    let _ = db::audit::log(
        &state.pool,
        &identity.agence_id,
        "bon_commande_converti",
        Some(&serde_json::json!({
            "bon_commande_id": id,
            "facture_id": result.facture.id,
            "numero": result.facture.numero,
        })),
        now,
    )
    .await;

    Ok(Json(result))
}

/// DELETE /api/agence/bons-commande/{id}
pub async fn delete_bon(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::bons_commande::delete(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::BonCommandeNotFound));
    }
    Ok(Json(serde_json::json!({ "message": "Bon de commande deleted" })))
}
