//! Found item handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ItemId, Session};
use domain_access::{ItemSortField, PublicItemDetail, PublicItemView, StaffItemSummary, StaffItemView};
use domain_items::FoundItem;

use crate::dto::items::{CreateItemRequest, UpdateItemRequest};
use crate::dto::ListQuery;
use crate::{error::ApiError, AppState};

/// Lists items open for browsing
pub async fn list_public_items(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PublicItemView>>, ApiError> {
    let options = query.into_options::<ItemSortField>()?;
    let items = state.gateway.list_public_items(&session, &options).await?;
    Ok(Json(items))
}

/// Gets one browsable item with the caller's affordances
pub async fn get_public_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicItemDetail>, ApiError> {
    let detail = state
        .gateway
        .get_public_item(&session, ItemId::from_uuid(id))
        .await?;
    Ok(Json(detail))
}

/// Staff dashboard listing
pub async fn list_staff_items(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<StaffItemSummary>>, ApiError> {
    let options = query.into_options::<ItemSortField>()?;
    let items = state.gateway.list_staff_items(&session, &options).await?;
    Ok(Json(items))
}

pub async fn get_staff_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffItemView>, ApiError> {
    let item = state
        .gateway
        .get_staff_item(&session, ItemId::from_uuid(id))
        .await?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<StaffItemView>), ApiError> {
    request.validate()?;
    let item = state.gateway.create_item(&session, request.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<StaffItemView>, ApiError> {
    request.validate()?;
    let item = state
        .gateway
        .update_item(&session, ItemId::from_uuid(id), request.into())
        .await?;
    Ok(Json(item))
}

/// Deletes an item and its claims, returning the removed item
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<FoundItem>, ApiError> {
    let removed = state
        .gateway
        .delete_item(&session, ItemId::from_uuid(id))
        .await?;
    Ok(Json(removed))
}
