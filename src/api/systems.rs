//! `/api/v1/systems` handlers.
//!
//! Each handler translates path, query and body into service calls. Extractor
//! rejections and service errors are both rendered by [`crate::api::error`].

use crate::api::AppState;
use crate::api::error::{json_rejection, path_rejection, query_rejection};
use crate::core::{SearchCriteria, SystemInput};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};

type PathId = Result<Path<String>, PathRejection>;
type InputBody = Result<Json<SystemInput>, JsonRejection>;

/// Routes for the systems resource, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/systems", get(list_systems).post(create_system))
        .route(
            "/systems/:id",
            get(get_system).put(update_system).delete(delete_system),
        )
}

/// GET /systems - all systems, or a search when any criterion is given.
async fn list_systems(
    State(state): State<AppState>,
    criteria: Result<Query<SearchCriteria>, QueryRejection>,
) -> Response {
    let Query(criteria) = match criteria {
        Ok(criteria) => criteria,
        Err(rejection) => return query_rejection(&rejection),
    };
    match state.service.search_systems(&criteria).await {
        Ok(systems) => Json(systems).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /systems/:id
async fn get_system(State(state): State<AppState>, id: PathId) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection(&rejection),
    };
    match state.service.get_system_by_id(&id).await {
        Ok(system) => Json(system).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /systems - 201 with the created record.
async fn create_system(State(state): State<AppState>, body: InputBody) -> Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(&rejection),
    };
    match state.service.create_system(input).await {
        Ok(system) => (StatusCode::CREATED, Json(system)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// PUT /systems/:id - full replace.
async fn update_system(State(state): State<AppState>, id: PathId, body: InputBody) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection(&rejection),
    };
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(&rejection),
    };
    match state.service.update_system(&id, input).await {
        Ok(system) => Json(system).into_response(),
        Err(e) => e.into_response(),
    }
}

/// DELETE /systems/:id - 204 with an empty body.
async fn delete_system(State(state): State<AppState>, id: PathId) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection(&rejection),
    };
    match state.service.delete_system(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
