//! Director and actor endpoints
//!
//! Write endpoints answer 404 naming whichever reference failed: the movie,
//! or the unknown star ids.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{CastRepo, DirectorLookup, LinkOutcome, MovieDetail, Star};
use crate::http::error::ApiError;
use crate::http::extractors::{positive_id, ApiJson, ApiQuery, ValidId};
use crate::http::server::AppState;

/// `?mid=<movie id>&sid=<star id>`
#[derive(Debug, Deserialize)]
pub struct MovieStarQuery {
    pub mid: i32,
    pub sid: i32,
}

/// `?mid=<movie id>`
#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    pub mid: i32,
}

/// `?t=<part of title>`
#[derive(Debug, Deserialize)]
pub struct MovieTitleQuery {
    pub t: String,
}

fn into_response(
    outcome: LinkOutcome<MovieDetail>,
    movie_id: i32,
) -> Result<Json<MovieDetail>, ApiError> {
    match outcome {
        LinkOutcome::Linked(movie) => Ok(Json(movie)),
        LinkOutcome::MovieNotFound => Err(ApiError::not_found("movie", movie_id)),
        LinkOutcome::StarsNotFound(ids) => Err(ApiError::stars_not_found(&ids)),
    }
}

/// GET /director/by_movie/{id} - `null` when the movie has no director
async fn director_by_movie(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Option<Star>>, ApiError> {
    match CastRepo::new(&state.pool).director_of(id).await? {
        DirectorLookup::Found(star) => Ok(Json(Some(star))),
        DirectorLookup::NoDirector => Ok(Json(None)),
        DirectorLookup::MovieNotFound => Err(ApiError::not_found("movie", id)),
    }
}

/// GET /actors/by_movie_title?t= - one actor list per matching movie
async fn actors_by_movie_title(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MovieTitleQuery>,
) -> Result<Json<Vec<Vec<Star>>>, ApiError> {
    let casts = CastRepo::new(&state.pool)
        .actors_by_title_part(&query.t)
        .await?;
    Ok(Json(casts))
}

/// PUT /movies/director?mid=&sid=
async fn assign_director(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MovieStarQuery>,
) -> Result<Json<MovieDetail>, ApiError> {
    let movie_id = positive_id(query.mid, "mid")?;
    let star_id = positive_id(query.sid, "sid")?;
    let outcome = CastRepo::new(&state.pool)
        .assign_director(movie_id, star_id)
        .await?;
    into_response(outcome, movie_id)
}

/// POST /movies/actor?mid=&sid=
async fn append_actor(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MovieStarQuery>,
) -> Result<Json<MovieDetail>, ApiError> {
    let movie_id = positive_id(query.mid, "mid")?;
    let star_id = positive_id(query.sid, "sid")?;
    let outcome = CastRepo::new(&state.pool)
        .append_actor(movie_id, star_id)
        .await?;
    into_response(outcome, movie_id)
}

/// PUT /movies/actors?mid= with a JSON array of star ids as body
async fn replace_actors(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MovieQuery>,
    ApiJson(star_ids): ApiJson<Vec<i32>>,
) -> Result<Json<MovieDetail>, ApiError> {
    let movie_id = positive_id(query.mid, "mid")?;
    let outcome = CastRepo::new(&state.pool)
        .replace_actors(movie_id, &star_ids)
        .await?;
    into_response(outcome, movie_id)
}

/// Cast routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/director/by_movie/{id}", get(director_by_movie))
        .route("/actors/by_movie_title", get(actors_by_movie_title))
        .route("/movies/director", put(assign_director))
        .route("/movies/actor", post(append_actor))
        .route("/movies/actors", put(replace_actors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> MovieDetail {
        MovieDetail {
            id: 4,
            title: "Inception".into(),
            year: 2010,
            duration: Some(148),
            director: None,
            actors: Vec::new(),
        }
    }

    #[test]
    fn linked_outcome_returns_movie() {
        let Json(movie) = into_response(LinkOutcome::Linked(detail()), 4).unwrap();
        assert_eq!(movie, detail());
    }

    #[test]
    fn missing_movie_names_movie() {
        let err = into_response(LinkOutcome::MovieNotFound, 4).unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotFound { resource: "movie", ref id } if id == "4"
        ));
    }

    #[test]
    fn missing_stars_name_the_ids() {
        let err = into_response(LinkOutcome::StarsNotFound(vec![9]), 4).unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotFound { resource: "star", ref id } if id == "9"
        ));

        let err = into_response(LinkOutcome::StarsNotFound(vec![9, 12]), 4).unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotFound { resource: "stars", ref id } if id == "9, 12"
        ));
    }
}
