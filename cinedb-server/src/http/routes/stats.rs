//! Statistics endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::repos::{
    DurationStats, StarCareer, StarFirstYear, StarLastYear, StarMovieCount, StatsRepo, YearCount,
};
use crate::http::error::ApiError;
use crate::http::extractors::ApiQuery;
use crate::http::server::AppState;
use crate::models::{MinCount, ValidationError};

/// `?min_count=<n>`, defaults to 1
#[derive(Debug, Default, Deserialize)]
pub struct MinCountQuery {
    pub min_count: Option<i64>,
}

impl TryFrom<MinCountQuery> for MinCount {
    type Error = ValidationError;

    fn try_from(query: MinCountQuery) -> Result<Self, Self::Error> {
        query.min_count.map_or(Ok(MinCount::default()), MinCount::new)
    }
}

/// GET /stats/movies/count_by_year
async fn count_by_year(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<YearCount>>, ApiError> {
    Ok(Json(StatsRepo::new(&state.pool).movie_count_by_year().await?))
}

/// GET /stats/movies/duration_by_year
async fn duration_by_year(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DurationStats>>, ApiError> {
    Ok(Json(StatsRepo::new(&state.pool).duration_by_year().await?))
}

/// GET /stats/directors?min_count=
async fn directors(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MinCountQuery>,
) -> Result<Json<Vec<StarMovieCount>>, ApiError> {
    let min_count = MinCount::try_from(query)?;
    Ok(Json(StatsRepo::new(&state.pool).directors(min_count).await?))
}

/// GET /stats/actors?min_count=
async fn actors(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MinCountQuery>,
) -> Result<Json<Vec<StarMovieCount>>, ApiError> {
    let min_count = MinCount::try_from(query)?;
    Ok(Json(StatsRepo::new(&state.pool).actors(min_count).await?))
}

/// GET /stats/actors/first_year?min_count=
async fn actors_first_year(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MinCountQuery>,
) -> Result<Json<Vec<StarFirstYear>>, ApiError> {
    let min_count = MinCount::try_from(query)?;
    Ok(Json(
        StatsRepo::new(&state.pool)
            .actors_first_year(min_count)
            .await?,
    ))
}

/// GET /stats/actors/last_year?min_count=
async fn actors_last_year(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MinCountQuery>,
) -> Result<Json<Vec<StarLastYear>>, ApiError> {
    let min_count = MinCount::try_from(query)?;
    Ok(Json(
        StatsRepo::new(&state.pool)
            .actors_last_year(min_count)
            .await?,
    ))
}

/// GET /stats/actors/career?min_count=
async fn actors_career(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MinCountQuery>,
) -> Result<Json<Vec<StarCareer>>, ApiError> {
    let min_count = MinCount::try_from(query)?;
    Ok(Json(StatsRepo::new(&state.pool).actors_career(min_count).await?))
}

/// Statistics routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats/movies/count_by_year", get(count_by_year))
        .route("/stats/movies/duration_by_year", get(duration_by_year))
        .route("/stats/directors", get(directors))
        .route("/stats/actors", get(actors))
        .route("/stats/actors/first_year", get(actors_first_year))
        .route("/stats/actors/last_year", get(actors_last_year))
        .route("/stats/actors/career", get(actors_career))
}
