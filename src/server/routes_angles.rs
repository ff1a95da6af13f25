//! Angle catalog API routes.

use angle_catalog_common::{AngleId, PageRequest};
use angle_catalog_db::queries::angles::AngleFilter;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::error::ApiError;
use super::upload::read_submission;
use super::AppContext;

const CREATE_FAILED: &str = "There was an error adding the angle!";
const LIST_FAILED: &str = "Error fetching angles";
const GET_FAILED: &str = "There was an error fetching the angle!";
const UPDATE_FAILED: &str = "There was an error updating the angle!";
const DELETE_FAILED: &str = "Internal server error.";

pub fn angle_routes() -> Router<AppContext> {
    Router::new()
        .route("/angles", get(list_angles).post(create_angle))
        .route("/angles/available", get(list_available_angles))
        .route(
            "/angles/:id",
            get(get_angle).put(update_angle).delete(delete_angle),
        )
}

/// Query parameters for the paginated listing.
///
/// `page` and `limit` are kept as text so that malformed values fall back to
/// their defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListAnglesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ListAnglesQuery {
    fn filter(&self) -> AngleFilter {
        AngleFilter {
            search: non_empty(&self.search),
            status: non_empty(&self.status),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Identifiers that are not valid ids cannot name a record.
fn parse_id(raw: &str) -> Result<AngleId, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found())
}

async fn create_angle(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let submission = read_submission(ctx.angles.files().as_ref(), multipart, CREATE_FAILED).await?;

    let angle = ctx
        .angles
        .create(submission.form, submission.upload)
        .map_err(|e| ApiError::internal(CREATE_FAILED, e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Angle Added Successfully",
            "Angle": angle,
        })),
    ))
}

async fn list_angles(
    State(ctx): State<AppContext>,
    Query(query): Query<ListAnglesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageRequest::from_query(
        query.page.as_deref(),
        query.limit.as_deref(),
        ctx.angles.settings().default_page_size,
    );

    let page = ctx
        .angles
        .list_page(&query.filter(), page)
        .map_err(|e| ApiError::internal(LIST_FAILED, e))?;

    Ok(Json(page))
}

async fn list_available_angles(
    State(ctx): State<AppContext>,
) -> Result<impl IntoResponse, ApiError> {
    let angles = ctx
        .angles
        .list_available()
        .map_err(|e| ApiError::internal(LIST_FAILED, e))?;

    Ok(Json(json!({ "angles": angles })))
}

async fn get_angle(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let angle = ctx
        .angles
        .get(id)
        .map_err(|e| ApiError::from_catalog(e, GET_FAILED))?;

    Ok(Json(json!({
        "message": "Angle fetched successfully",
        "angle": angle,
    })))
}

async fn update_angle(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    // Checked before intake so an unusable id never stores a file.
    let id = parse_id(&id)?;
    let submission = read_submission(ctx.angles.files().as_ref(), multipart, UPDATE_FAILED).await?;

    let angle = ctx
        .angles
        .update(id, submission.form, submission.upload)
        .map_err(|e| ApiError::from_catalog(e, UPDATE_FAILED))?;

    Ok(Json(json!({
        "message": "Angle updated successfully",
        "material": angle,
    })))
}

async fn delete_angle(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    ctx.angles
        .delete(id)
        .map_err(|e| ApiError::from_catalog(e, DELETE_FAILED).with_result(false))?;

    Ok(Json(json!({
        "message": "Angle deleted successfully",
        "result": true,
    })))
}
