//! Claims handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ClaimId, Session};
use domain_access::{ClaimSortField, ClaimView};
use domain_claims::Claim;

use crate::dto::claims::{CompletePickupRequest, CreateClaimRequest, ReviewClaimRequest, UpdateClaimRequest};
use crate::dto::ListQuery;
use crate::{error::ApiError, AppState};

/// Lists all claims for staff, the caller's own claims for visitors
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ClaimView>>, ApiError> {
    let options = query.into_options::<ClaimSortField>()?;
    let claims = state.gateway.list_claims(&session, &options).await?;
    Ok(Json(claims))
}

pub async fn get_claim(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimView>, ApiError> {
    let claim = state
        .gateway
        .get_claim(&session, ClaimId::from_uuid(id))
        .await?;
    Ok(Json(claim))
}

/// Files a claim on a browsable item
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ClaimView>), ApiError> {
    request.validate()?;
    let claim = state.gateway.create_claim(&session, request.into()).await?;
    Ok((StatusCode::CREATED, Json(claim)))
}

/// Claimant edit while the claim is pending
pub async fn update_claim(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClaimRequest>,
) -> Result<Json<ClaimView>, ApiError> {
    request.validate()?;
    let claim = state
        .gateway
        .update_claim(&session, ClaimId::from_uuid(id), request.into())
        .await?;
    Ok(Json(claim))
}

pub async fn review_claim(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReviewClaimRequest>,
) -> Result<Json<ClaimView>, ApiError> {
    request.validate()?;
    let claim = state
        .gateway
        .review_claim(&session, ClaimId::from_uuid(id), request.into())
        .await?;
    Ok(Json(claim))
}

pub async fn complete_pickup(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompletePickupRequest>,
) -> Result<Json<ClaimView>, ApiError> {
    request.validate()?;
    let claim = state
        .gateway
        .complete_pickup(&session, ClaimId::from_uuid(id), request.into())
        .await?;
    Ok(Json(claim))
}

pub async fn delete_claim(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Claim>, ApiError> {
    let removed = state
        .gateway
        .delete_claim(&session, ClaimId::from_uuid(id))
        .await?;
    Ok(Json(removed))
}
