//! Handlers for the `/directors` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cinema_core::types::DbId;
use cinema_core::validation::catalog::{validate_director, Presence};
use cinema_db::models::director::{CreateDirector, Director, DirectorWithMovieCount, UpdateDirector};
use cinema_db::store::{Entity, Repository};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{present, trim_field};
use crate::state::AppState;

/// Body of a director create or update.
#[derive(Debug, Deserialize)]
pub struct DirectorRequest {
    pub name: Option<String>,
}

/// GET /api/v1/directors/
///
/// Every director annotated with its number of movies.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<DirectorWithMovieCount>>> {
    let directors = state.store.list_directors_with_movie_count().await?;
    Ok(Json(directors))
}

/// POST /api/v1/directors/
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<DirectorRequest>,
) -> AppResult<(StatusCode, Json<Director>)> {
    trim_field(&mut input.name);
    validate_director(input.name.as_deref(), Presence::Required)?;

    let create = CreateDirector {
        name: present("name", input.name)?,
    };
    let director = Repository::<Director>::create(&*state.store, &create).await?;
    tracing::info!(director_id = director.id, "Director created");
    Ok((StatusCode::CREATED, Json(director)))
}

/// GET /api/v1/directors/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Director>> {
    let director = Repository::<Director>::find_by_id(&*state.store, id)
        .await?
        .ok_or(AppError::not_found(Director::NAME, id))?;
    Ok(Json(director))
}

/// PUT /api/v1/directors/{id}/
///
/// An unknown id is a 404 whatever the body holds.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(mut input): AppJson<DirectorRequest>,
) -> AppResult<Json<Director>> {
    Repository::<Director>::find_by_id(&*state.store, id)
        .await?
        .ok_or(AppError::not_found(Director::NAME, id))?;

    trim_field(&mut input.name);
    validate_director(input.name.as_deref(), Presence::Optional)?;

    let update = UpdateDirector { name: input.name };
    let director = Repository::<Director>::update(&*state.store, id, &update)
        .await?
        .ok_or(AppError::not_found(Director::NAME, id))?;
    Ok(Json(director))
}

/// DELETE /api/v1/directors/{id}/
///
/// Also removes the director's movies and their reviews.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if Repository::<Director>::delete(&*state.store, id).await? {
        tracing::info!(director_id = id, "Director deleted with its movies");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(Director::NAME, id))
    }
}
