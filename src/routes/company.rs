use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::company_dto::{
        CompanyListQuery, CompanyListResponse, CompanyResponse, CreateCompanyPayload,
        UpdateCompanyPayload,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    utils::validation::require_image,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/company/create",
    responses(
        (status = 201, description = "Company created"),
        (status = 409, description = "Company name already taken")
    )
)]
#[axum::debug_handler]
pub async fn create_company(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let owner = state.profile_service.get(claims.user_id()?).await?;
    let company = state.company_service.create(&owner, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "company": CompanyResponse::from(company) })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/company/list",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Name search")
    ),
    responses(
        (status = 200, description = "Paginated list of companies")
    )
)]
#[axum::debug_handler]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<CompanyListQuery>,
) -> Result<impl IntoResponse> {
    let list = state.company_service.list(query).await?;
    Ok(Json(CompanyListResponse::from(list)))
}

#[utoipa::path(
    get,
    path = "/api/company/{id}",
    params(
        ("id" = String, Path, description = "Company id")
    ),
    responses(
        (status = 200, description = "Company profile"),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.get_by_id(id).await?;
    Ok(Json(
        json!({ "success": true, "company": CompanyResponse::from(company) }),
    ))
}

#[axum::debug_handler]
pub async fn update_company(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.profile_service.get(claims.user_id()?).await?;
    let company = state.company_service.update(&user, id, payload).await?;
    Ok(Json(
        json!({ "success": true, "company": CompanyResponse::from(company) }),
    ))
}

#[axum::debug_handler]
pub async fn delete_company(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.profile_service.get(claims.user_id()?).await?;
    state.company_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn upload_logo(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let user = state.profile_service.get(claims.user_id()?).await?;

    let mut file: Option<(String, bytes::Bytes)> = None;
    while let Some(field) = multipart.next_field().await.map_err(Error::Multipart)? {
        if field.name() == Some("logo") {
            let file_name = field.file_name().unwrap_or("logo.png").to_string();
            let data = field.bytes().await.map_err(Error::Multipart)?;
            if !data.is_empty() {
                file = Some((file_name, data));
            }
        }
    }
    let Some((file_name, data)) = file else {
        return Err(Error::BadRequest("A logo file is required".to_string()));
    };
    require_image(&data)?;

    let stored = state
        .blobs
        .put(&file_name, data)
        .await
        .map_err(Error::UploadFailed)?;
    let company = state.company_service.set_logo(&user, id, stored).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Logo updated",
        "company": CompanyResponse::from(company),
    })))
}
