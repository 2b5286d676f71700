use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{
        ApplicantListQuery, ApplicantsResponse, ApplicationResponse, AppliedJobsResponse,
        ApplyResponse, PageQuery, UpdateStatusPayload, UpdateStatusResponse,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    models::application::ApplicationStatus,
    services::application_service::ResumeUpload,
    AppState,
};

/// Pulls the optional cover letter and resume file out of the multipart
/// body. Empty fields are treated as absent.
async fn read_apply_form(
    mut multipart: Multipart,
) -> Result<(Option<String>, Option<ResumeUpload>)> {
    let mut cover_letter: Option<String> = None;
    let mut upload: Option<ResumeUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(Error::Multipart)? {
        let name = field.name().unwrap_or("").to_string();
        if name == "coverLetter" {
            let text = field.text().await.map_err(Error::Multipart)?;
            if !text.trim().is_empty() {
                cover_letter = Some(text);
            }
        } else if name == "resume" {
            let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
            let content_type = field.content_type().map(|ct| ct.to_string());
            let data = field.bytes().await.map_err(Error::Multipart)?;
            if !data.is_empty() {
                upload = Some(ResumeUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
        }
    }

    Ok((cover_letter, upload))
}

#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(job_id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let job_id = job_id.trim();
    if job_id.is_empty() {
        return Err(Error::MissingJobId);
    }
    let job_id = Uuid::parse_str(job_id)
        .map_err(|_| Error::BadRequest("Invalid job id".to_string()))?;

    let applicant = state.profile_service.get(claims.user_id()?).await?;
    let (cover_letter, upload) = read_apply_form(multipart).await?;

    let application = state
        .application_service
        .apply(&applicant, job_id, cover_letter, upload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            success: true,
            message: "Application submitted".to_string(),
            application: ApplicationResponse::from(application),
        }),
    ))
}

#[axum::debug_handler]
pub async fn get_applied_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .application_service
        .list_for_applicant(claims.user_id()?, query.page, query.limit)
        .await?;
    Ok(Json(AppliedJobsResponse::from(page)))
}

#[axum::debug_handler]
pub async fn get_applicants(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<ApplicantListQuery>,
) -> Result<impl IntoResponse> {
    let status = match query.status {
        Some(raw) => Some(
            ApplicationStatus::try_from(raw.clone()).map_err(|_| Error::InvalidStatus(raw))?,
        ),
        None => None,
    };

    let recruiter = state.profile_service.get(claims.user_id()?).await?;
    let page = state
        .application_service
        .list_for_job(&recruiter, job_id, status, query.page, query.limit)
        .await?;
    Ok(Json(ApplicantsResponse::from(page)))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(application_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let recruiter = state.profile_service.get(claims.user_id()?).await?;
    let application = state
        .application_service
        .update_status(&recruiter, application_id, payload.status)
        .await?;

    Ok(Json(UpdateStatusResponse {
        success: true,
        message: format!("Application {}", application.status),
        application: ApplicationResponse::from(application),
    }))
}
