use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Json},
    Extension,
};
use bytes::Bytes;
use validator::Validate;

use crate::{
    dto::profile_dto::{
        PhotoUploadResponse, ProfileEnvelope, ProfileResponse, ResumeUploadResponse,
        UpdateProfilePayload,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    utils::validation::{require_image, require_pdf},
    AppState,
};

#[axum::debug_handler]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.profile_service.get(claims.user_id()?).await?;
    Ok(Json(ProfileEnvelope {
        success: true,
        profile: ProfileResponse::from(user),
    }))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .profile_service
        .update(claims.user_id()?, payload)
        .await?;
    Ok(Json(ProfileEnvelope {
        success: true,
        profile: ProfileResponse::from(user),
    }))
}

async fn read_single_file(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<Option<(String, Option<String>, Bytes)>> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(Error::Multipart)? {
        if field.name() == Some(field_name) {
            let file_name = field.file_name().unwrap_or(field_name).to_string();
            let content_type = field.content_type().map(|ct| ct.to_string());
            let data = field.bytes().await.map_err(Error::Multipart)?;
            if !data.is_empty() {
                file = Some((file_name, content_type, data));
            }
        }
    }
    Ok(file)
}

#[axum::debug_handler]
pub async fn upload_resume(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let Some((file_name, content_type, data)) = read_single_file(multipart, "resume").await?
    else {
        return Err(Error::BadRequest("A resume file is required".to_string()));
    };
    require_pdf(content_type.as_deref(), &data)?;

    let stored = state
        .blobs
        .put(&file_name, data)
        .await
        .map_err(Error::UploadFailed)?;
    let user = state
        .profile_service
        .set_resume(claims.user_id()?, stored)
        .await?;

    Ok(Json(ResumeUploadResponse {
        success: true,
        message: "Resume saved to profile".to_string(),
        resume_name: user.resume_name.unwrap_or_default(),
        resume_url: user.resume_url.unwrap_or_default(),
    }))
}

#[axum::debug_handler]
pub async fn upload_photo(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let Some((file_name, _content_type, data)) = read_single_file(multipart, "photo").await?
    else {
        return Err(Error::BadRequest("A photo file is required".to_string()));
    };
    require_image(&data)?;

    let stored = state
        .blobs
        .put(&file_name, data)
        .await
        .map_err(Error::UploadFailed)?;
    let user = state
        .profile_service
        .set_photo(claims.user_id()?, stored)
        .await?;

    Ok(Json(PhotoUploadResponse {
        success: true,
        message: "Photo updated".to_string(),
        photo_url: user.photo_url.unwrap_or_default(),
    }))
}
