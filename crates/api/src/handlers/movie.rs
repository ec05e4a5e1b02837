//! Handlers for the `/movies` resource and the rating view.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cinema_core::types::DbId;
use cinema_core::validation::catalog::{validate_movie, MovieFields, Presence};
use cinema_db::models::director::Director;
use cinema_db::models::movie::{CreateMovie, Movie, MovieWithReviews, UpdateMovie};
use cinema_db::store::{Entity, Repository};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{narrow, present, require_parent, trim_field};
use crate::state::AppState;

/// Body of a movie create or update. `director` is the director's id.
#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub director: Option<DbId>,
}

impl MovieRequest {
    fn trim(&mut self) {
        trim_field(&mut self.title);
        trim_field(&mut self.description);
    }

    fn fields(&self) -> MovieFields<'_> {
        MovieFields {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            duration: self.duration,
            director: self.director,
        }
    }
}

/// GET /api/v1/movies/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = Repository::<Movie>::list(&*state.store).await?;
    Ok(Json(movies))
}

/// GET /api/v1/movies/reviews/
///
/// Every movie with its reviews and their average rating (`null` when it
/// has none).
pub async fn list_with_reviews(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovieWithReviews>>> {
    let movies = state.store.list_movies_with_reviews().await?;
    Ok(Json(movies))
}

/// POST /api/v1/movies/
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<MovieRequest>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    input.trim();
    validate_movie(&input.fields(), Presence::Required)?;
    let director_id = present("director", input.director)?;
    require_parent::<Director, _>(&*state.store, "director", director_id).await?;

    let create = CreateMovie {
        title: present("title", input.title)?,
        description: present("description", input.description)?,
        duration: narrow("duration", present("duration", input.duration)?)?,
        director_id,
    };
    let movie = Repository::<Movie>::create(&*state.store, &create).await?;
    tracing::info!(movie_id = movie.id, director_id = movie.director_id, "Movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/v1/movies/{id}/
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Movie>> {
    let movie = Repository::<Movie>::find_by_id(&*state.store, id)
        .await?
        .ok_or(AppError::not_found(Movie::NAME, id))?;
    Ok(Json(movie))
}

/// PUT /api/v1/movies/{id}/
///
/// An unknown id is a 404 whatever the body holds.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(mut input): AppJson<MovieRequest>,
) -> AppResult<Json<Movie>> {
    Repository::<Movie>::find_by_id(&*state.store, id)
        .await?
        .ok_or(AppError::not_found(Movie::NAME, id))?;

    input.trim();
    validate_movie(&input.fields(), Presence::Optional)?;
    if let Some(director_id) = input.director {
        require_parent::<Director, _>(&*state.store, "director", director_id).await?;
    }

    let update = UpdateMovie {
        title: input.title,
        description: input.description,
        duration: input.duration.map(|d| narrow("duration", d)).transpose()?,
        director_id: input.director,
    };
    let movie = Repository::<Movie>::update(&*state.store, id, &update)
        .await?
        .ok_or(AppError::not_found(Movie::NAME, id))?;
    Ok(Json(movie))
}

/// DELETE /api/v1/movies/{id}/
///
/// Also removes the movie's reviews.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if Repository::<Movie>::delete(&*state.store, id).await? {
        tracing::info!(movie_id = id, "Movie deleted with its reviews");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(Movie::NAME, id))
    }
}
