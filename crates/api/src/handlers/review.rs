//! Handlers for the `/reviews` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cinema_core::types::DbId;
use cinema_core::validation::catalog::{validate_review, Presence, ReviewFields};
use cinema_db::models::movie::Movie;
use cinema_db::models::review::{CreateReview, Review, UpdateReview, DEFAULT_STARS};
use cinema_db::store::{Entity, Repository};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{narrow, present, require_parent, trim_field};
use crate::state::AppState;

/// Body of a review create or update. `movie` is the movie's id.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub text: Option<String>,
    pub stars: Option<i64>,
    pub movie: Option<DbId>,
}

impl ReviewRequest {
    fn fields(&self) -> ReviewFields<'_> {
        ReviewFields {
            text: self.text.as_deref(),
            stars: self.stars,
            movie: self.movie,
        }
    }
}

/// GET /api/v1/reviews/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Review>>> {
    let reviews = Repository::<Review>::list(&*state.store).await?;
    Ok(Json(reviews))
}

/// POST /api/v1/reviews/
///
/// `stars` defaults to 1 when omitted.
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<ReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    trim_field(&mut input.text);
    validate_review(&input.fields(), Presence::Required)?;
    let movie_id = present("movie", input.movie)?;
    require_parent::<Movie, _>(&*state.store, "movie", movie_id).await?;

    let create = CreateReview {
        text: present("text", input.text)?,
        stars: narrow("stars", input.stars.unwrap_or(i64::from(DEFAULT_STARS)))?,
        movie_id,
    };
    let review = Repository::<Review>::create(&*state.store, &create).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/v1/reviews/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Review>> {
    let review = Repository::<Review>::find_by_id(&*state.store, id)
        .await?
        .ok_or(AppError::not_found(Review::NAME, id))?;
    Ok(Json(review))
}

/// PUT /api/v1/reviews/{id}/
///
/// An unknown id is a 404 whatever the body holds.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(mut input): AppJson<ReviewRequest>,
) -> AppResult<Json<Review>> {
    Repository::<Review>::find_by_id(&*state.store, id)
        .await?
        .ok_or(AppError::not_found(Review::NAME, id))?;

    trim_field(&mut input.text);
    validate_review(&input.fields(), Presence::Optional)?;
    if let Some(movie_id) = input.movie {
        require_parent::<Movie, _>(&*state.store, "movie", movie_id).await?;
    }

    let update = UpdateReview {
        text: input.text,
        stars: input.stars.map(|s| narrow("stars", s)).transpose()?,
        movie_id: input.movie,
    };
    let review = Repository::<Review>::update(&*state.store, id, &update)
        .await?
        .ok_or(AppError::not_found(Review::NAME, id))?;
    Ok(Json(review))
}

/// DELETE /api/v1/reviews/{id}/
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if Repository::<Review>::delete(&*state.store, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(Review::NAME, id))
    }
}
