use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("A job id is required")]
    MissingJobId,

    #[error("Job posting not found")]
    JobNotFound,

    #[error("This job is no longer accepting applications")]
    JobClosed,

    #[error("You have already applied to this job")]
    DuplicateApplication,

    #[error("Cover letter must be between 20 and 5000 characters")]
    InvalidCoverLetter,

    #[error("{0}")]
    InvalidFileType(String),

    #[error("Failed to store the uploaded file")]
    UploadFailed(anyhow::Error),

    #[error("No resume found. Upload a resume or add one to your profile")]
    MissingResume,

    #[error("Application not found")]
    ApplicationNotFound,

    #[error("A status value is required")]
    MissingStatus,

    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    #[error("Application has already been {0}")]
    InvalidStatusUpdate(String),

    #[error("Company not found")]
    CompanyNotFound,

    #[error("A company with this name already exists")]
    CompanyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::BadRequest(_) => "BAD_REQUEST",
            Error::Unauthorized(_) => "UNAUTHORIZED",
            Error::Forbidden(_) => "UNAUTHORIZED_ACCESS",
            Error::NotFound(_) => "NOT_FOUND",
            Error::MissingJobId => "MISSING_JOB_ID",
            Error::JobNotFound => "JOB_NOT_FOUND",
            Error::JobClosed => "JOB_CLOSED",
            Error::DuplicateApplication => "DUPLICATE_APPLICATION",
            Error::InvalidCoverLetter => "INVALID_COVER_LETTER",
            Error::InvalidFileType(_) => "INVALID_FILE_TYPE",
            Error::UploadFailed(_) => "UPLOAD_FAILED",
            Error::MissingResume => "MISSING_RESUME",
            Error::ApplicationNotFound => "APPLICATION_NOT_FOUND",
            Error::MissingStatus => "MISSING_STATUS",
            Error::InvalidStatus(_) => "INVALID_STATUS",
            Error::InvalidStatusUpdate(_) => "INVALID_STATUS_UPDATE",
            Error::CompanyNotFound => "COMPANY_NOT_FOUND",
            Error::CompanyExists => "COMPANY_EXISTS",
            Error::UserNotFound => "USER_NOT_FOUND",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Json(_) => "BAD_REQUEST",
            Error::Anyhow(_) => "INTERNAL_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
            Error::Io(_) => "INTERNAL_ERROR",
            Error::Multipart(_) => "BAD_REQUEST",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_)
            | Error::MissingJobId
            | Error::JobClosed
            | Error::DuplicateApplication
            | Error::InvalidCoverLetter
            | Error::InvalidFileType(_)
            | Error::MissingResume
            | Error::MissingStatus
            | Error::InvalidStatus(_)
            | Error::InvalidStatusUpdate(_)
            | Error::Validation(_)
            | Error::Json(_)
            | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_)
            | Error::JobNotFound
            | Error::ApplicationNotFound
            | Error::CompanyNotFound
            | Error::UserNotFound => StatusCode::NOT_FOUND,
            Error::CompanyExists => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        // 5xx details stay server-side; the client gets a generic message.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "request failed");
            match &self {
                Error::UploadFailed(_) => self.to_string(),
                _ => "An unexpected error occurred".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}

/// True when the underlying driver reported a unique-constraint violation.
/// Callers translate this into the domain conflict (duplicate application,
/// company name taken) instead of a generic database error.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(Error::DuplicateApplication.code(), "DUPLICATE_APPLICATION");
        assert_eq!(Error::MissingResume.code(), "MISSING_RESUME");
        assert_eq!(Error::JobClosed.code(), "JOB_CLOSED");
        assert_eq!(
            Error::InvalidStatusUpdate("accepted".into()).code(),
            "INVALID_STATUS_UPDATE"
        );
        assert_eq!(
            Error::Forbidden("nope".into()).code(),
            "UNAUTHORIZED_ACCESS"
        );
    }

    #[test]
    fn conflict_and_not_found_statuses() {
        assert_eq!(Error::CompanyExists.status(), StatusCode::CONFLICT);
        assert_eq!(Error::JobNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::DuplicateApplication.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::UploadFailed(anyhow::anyhow!("disk full")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn status_update_message_names_current_status() {
        let err = Error::InvalidStatusUpdate("accepted".into());
        assert_eq!(err.to_string(), "Application has already been accepted");
    }
}
