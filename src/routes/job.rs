use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{
        CreateJobPayload, JobListItem, JobListQuery, JobListResponse, JobResponse,
        UpdateJobPayload,
    },
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/job/create",
    responses(
        (status = 201, description = "Job posting created"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not a recruiter")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let recruiter = state.profile_service.get(claims.user_id()?).await?;
    let job = state.job_service.create(&recruiter, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "job": JobResponse::from(job) })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/job/list",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Title search"),
        ("job_type" = Option<String>, Query, description = "Filter by job type"),
        ("location" = Option<String>, Query, description = "Filter by location"),
        ("include_closed" = Option<bool>, Query, description = "Include closed jobs")
    ),
    responses(
        (status = 200, description = "Paginated list of job postings")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let list = state.job_service.list(query).await?;
    Ok(Json(JobListResponse::from(list)))
}

#[utoipa::path(
    get,
    path = "/api/job/{id}",
    params(
        ("id" = String, Path, description = "Job id")
    ),
    responses(
        (status = 200, description = "Job posting with company"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_with_company(id).await?;
    Ok(Json(
        json!({ "success": true, "job": JobListItem::from(job) }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/job/update/{id}",
    params(
        ("id" = String, Path, description = "Job id")
    ),
    responses(
        (status = 200, description = "Job posting updated"),
        (status = 403, description = "Caller does not own the posting"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let recruiter = state.profile_service.get(claims.user_id()?).await?;
    let job = state.job_service.update(&recruiter, id, payload).await?;
    Ok(Json(
        json!({ "success": true, "job": JobResponse::from(job) }),
    ))
}
