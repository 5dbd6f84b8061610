//! Star endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::repos::{Star, StarRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{positive_id, ApiJson, ApiPath, ApiQuery, ValidId};
use crate::http::server::AppState;
use crate::models::{PaginationParams, StarDraft};

/// Create star request
#[derive(Debug, Deserialize)]
pub struct CreateStarRequest {
    pub name: String,
    pub birthdate: NaiveDate,
}

/// Update star request; name and birthdate are both overwritten
#[derive(Debug, Deserialize)]
pub struct UpdateStarRequest {
    pub id: i32,
    pub name: String,
    pub birthdate: NaiveDate,
}

/// `?n=<name>`
#[derive(Debug, Deserialize)]
pub struct StarNameQuery {
    pub n: String,
}

/// GET /stars - list stars with skip/limit
async fn list_stars(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<Vec<Star>>, ApiError> {
    let stars = StarRepo::new(&state.pool).list(params.into()).await?;
    Ok(Json(stars))
}

/// GET /stars/all
async fn list_all_stars(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Star>>, ApiError> {
    let stars = StarRepo::new(&state.pool).list_all().await?;
    Ok(Json(stars))
}

/// GET /stars/by_id/{id}
async fn get_star(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Star>, ApiError> {
    let star = StarRepo::new(&state.pool)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("star", id))?;
    Ok(Json(star))
}

/// GET /stars/by_name?n=
async fn stars_by_name(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<StarNameQuery>,
) -> Result<Json<Vec<Star>>, ApiError> {
    let stars = StarRepo::new(&state.pool).find_by_name(&query.n).await?;
    Ok(Json(stars))
}

/// GET /stars/by_part_name?n=
async fn stars_by_part_name(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<StarNameQuery>,
) -> Result<Json<Vec<Star>>, ApiError> {
    let stars = StarRepo::new(&state.pool)
        .find_by_name_part(&query.n)
        .await?;
    Ok(Json(stars))
}

/// GET /stars/by_birthyear/{year}
async fn stars_by_birthyear(
    State(state): State<Arc<AppState>>,
    ApiPath(year): ApiPath<i32>,
) -> Result<Json<Vec<Star>>, ApiError> {
    let stars = StarRepo::new(&state.pool).find_by_birthyear(year).await?;
    Ok(Json(stars))
}

/// POST /stars
async fn create_star(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateStarRequest>,
) -> Result<(StatusCode, Json<Star>), ApiError> {
    let draft = StarDraft::new(&req.name, req.birthdate)?;
    let star = StarRepo::new(&state.pool).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(star)))
}

/// PUT /stars
async fn update_star(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<UpdateStarRequest>,
) -> Result<Json<Star>, ApiError> {
    let id = positive_id(req.id, "id")?;
    let draft = StarDraft::new(&req.name, req.birthdate)?;
    let star = StarRepo::new(&state.pool)
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("star", id))?;
    Ok(Json(star))
}

/// DELETE /stars/{id} - returns the removed star
async fn delete_star(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Star>, ApiError> {
    let star = StarRepo::new(&state.pool)
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::not_found("star", id))?;
    Ok(Json(star))
}

/// Star routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/stars",
            get(list_stars).post(create_star).put(update_star),
        )
        .route("/stars/all", get(list_all_stars))
        .route("/stars/{id}", delete(delete_star))
        .route("/stars/by_id/{id}", get(get_star))
        .route("/stars/by_name", get(stars_by_name))
        .route("/stars/by_part_name", get(stars_by_part_name))
        .route("/stars/by_birthyear/{year}", get(stars_by_birthyear))
}
