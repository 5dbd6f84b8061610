//! Movie endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{Movie, MovieDetail, MovieRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{positive_id, ApiJson, ApiQuery, ValidId};
use crate::http::server::AppState;
use crate::models::{MovieDraft, PaginationParams, YearRange};

/// Create movie request
#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub year: i16,
    pub duration: Option<i16>,
}

/// Update movie request; every scalar field is overwritten
#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub id: i32,
    pub title: String,
    pub year: i16,
    pub duration: Option<i16>,
}

/// `?t=<title>`
#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub t: String,
}

/// `?t=<title>&y=<year>`
#[derive(Debug, Deserialize)]
pub struct TitleYearQuery {
    pub t: String,
    pub y: i16,
}

/// `?n=<name suffix>`
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub n: String,
}

/// GET /movies - list movies with skip/limit
async fn list_movies(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = MovieRepo::new(&state.pool).list(params.into()).await?;
    Ok(Json(movies))
}

/// GET /movies/all
async fn list_all_movies(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = MovieRepo::new(&state.pool).list_all().await?;
    Ok(Json(movies))
}

/// GET /movies/by_id/{id} - movie with director and actors
async fn get_movie(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MovieDetail>, ApiError> {
    let movie = MovieRepo::new(&state.pool)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("movie", id))?;
    Ok(Json(movie))
}

/// GET /movies/by_title?t=
async fn movies_by_title(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<TitleQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = MovieRepo::new(&state.pool).find_by_title(&query.t).await?;
    Ok(Json(movies))
}

/// GET /movies/by_part_title?t=
async fn movies_by_part_title(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<TitleQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = MovieRepo::new(&state.pool)
        .find_by_title_part(&query.t)
        .await?;
    Ok(Json(movies))
}

/// GET /movies/by_title_year?t=&y=
async fn movies_by_title_year(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<TitleYearQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = MovieRepo::new(&state.pool)
        .find_by_title_year(&query.t, query.y)
        .await?;
    Ok(Json(movies))
}

/// GET /movies/by_range_year?year_min=&year_max=
async fn movies_by_range_year(
    State(state): State<Arc<AppState>>,
    ApiQuery(range): ApiQuery<YearRange>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = MovieRepo::new(&state.pool)
        .find_by_year_range(range)
        .await?;
    Ok(Json(movies))
}

/// GET /movies/by_director?n= - director name suffix, newest first
async fn movies_by_director(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<NameQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = MovieRepo::new(&state.pool)
        .find_by_director_suffix(&query.n)
        .await?;
    Ok(Json(movies))
}

/// GET /movies/by_actor?n= - actor name suffix, newest first
async fn movies_by_actor(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<NameQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = MovieRepo::new(&state.pool)
        .find_by_actor_suffix(&query.n)
        .await?;
    Ok(Json(movies))
}

/// POST /movies
async fn create_movie(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateMovieRequest>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let draft = MovieDraft::new(&req.title, req.year, req.duration)?;
    let movie = MovieRepo::new(&state.pool).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// PUT /movies
async fn update_movie(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<UpdateMovieRequest>,
) -> Result<Json<Movie>, ApiError> {
    let id = positive_id(req.id, "id")?;
    let draft = MovieDraft::new(&req.title, req.year, req.duration)?;
    let movie = MovieRepo::new(&state.pool)
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("movie", id))?;
    Ok(Json(movie))
}

/// DELETE /movies/{id} - returns the removed movie
async fn delete_movie(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Movie>, ApiError> {
    let movie = MovieRepo::new(&state.pool)
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::not_found("movie", id))?;
    Ok(Json(movie))
}

/// Movie routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/movies",
            get(list_movies).post(create_movie).put(update_movie),
        )
        .route("/movies/all", get(list_all_movies))
        .route("/movies/{id}", delete(delete_movie))
        .route("/movies/by_id/{id}", get(get_movie))
        .route("/movies/by_title", get(movies_by_title))
        .route("/movies/by_part_title", get(movies_by_part_title))
        .route("/movies/by_title_year", get(movies_by_title_year))
        .route("/movies/by_range_year", get(movies_by_range_year))
        .route("/movies/by_director", get(movies_by_director))
        .route("/movies/by_actor", get(movies_by_actor))
}
