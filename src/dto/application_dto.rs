use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::application::{Application, ApplicationStatus};
use crate::models::job::JobType;
use crate::services::application_service::{ApplicantPage, AppliedPage};

#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicantListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub cover_letter: Option<String>,
    pub resume_name: String,
    pub resume_url: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(app: Application) -> Self {
        Self {
            id: app.id,
            job_id: app.job_id,
            applicant_id: app.applicant_id,
            cover_letter: app.cover_letter,
            resume_name: app.resume_name,
            resume_url: app.resume_url,
            status: app.status,
            created_at: app.created_at,
            updated_at: app.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyResponse {
    pub success: bool,
    pub message: String,
    pub application: ApplicationResponse,
}

/// Flat join row for a candidate's own applications, with the job and its
/// company alongside.
#[derive(Debug, Clone, FromRow)]
pub struct AppliedApplicationRow {
    pub id: Uuid,
    pub cover_letter: Option<String>,
    pub resume_name: String,
    pub resume_url: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub job_id: Uuid,
    pub job_title: String,
    pub job_location: String,
    #[sqlx(try_from = "String")]
    pub job_type: JobType,
    pub job_salary: Decimal,
    pub job_is_closed: bool,
    pub company_id: Uuid,
    pub company_name: String,
    pub company_logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedJobBrief {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub job_type: JobType,
    pub salary: Decimal,
    pub is_closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedCompanyBrief {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedApplicationItem {
    pub id: Uuid,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub resume_name: String,
    pub resume_url: String,
    pub created_at: DateTime<Utc>,
    pub job: AppliedJobBrief,
    pub company: AppliedCompanyBrief,
}

impl From<AppliedApplicationRow> for AppliedApplicationItem {
    fn from(row: AppliedApplicationRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            cover_letter: row.cover_letter,
            resume_name: row.resume_name,
            resume_url: row.resume_url,
            created_at: row.created_at,
            job: AppliedJobBrief {
                id: row.job_id,
                title: row.job_title,
                location: row.job_location,
                job_type: row.job_type,
                salary: row.job_salary,
                is_closed: row.job_is_closed,
            },
            company: AppliedCompanyBrief {
                id: row.company_id,
                name: row.company_name,
                logo_url: row.company_logo_url,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobsResponse {
    pub success: bool,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_applications: i64,
    pub applications: Vec<AppliedApplicationItem>,
}

impl From<AppliedPage> for AppliedJobsResponse {
    fn from(page: AppliedPage) -> Self {
        Self {
            success: true,
            current_page: page.page,
            total_pages: page.total_pages,
            total_applications: page.total,
            applications: page
                .items
                .into_iter()
                .map(AppliedApplicationItem::from)
                .collect(),
        }
    }
}

/// Flat join row for a recruiter's view of a job's applicants.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub cover_letter: Option<String>,
    pub resume_name: String,
    pub resume_url: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: Option<String>,
    pub applicant_location: Option<String>,
    pub applicant_skills: Option<Vec<String>>,
    pub applicant_photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantBrief {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicantItem {
    pub id: Uuid,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub resume_name: String,
    pub resume_url: String,
    pub created_at: DateTime<Utc>,
    pub applicant: ApplicantBrief,
}

impl From<ApplicantRow> for ApplicantItem {
    fn from(row: ApplicantRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            cover_letter: row.cover_letter,
            resume_name: row.resume_name,
            resume_url: row.resume_url,
            created_at: row.created_at,
            applicant: ApplicantBrief {
                id: row.applicant_id,
                name: row.applicant_name,
                email: row.applicant_email,
                phone: row.applicant_phone,
                location: row.applicant_location,
                skills: row.applicant_skills,
                photo_url: row.applicant_photo_url,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantsResponse {
    pub success: bool,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_applications: i64,
    pub applications: Vec<ApplicantItem>,
}

impl From<ApplicantPage> for ApplicantsResponse {
    fn from(page: ApplicantPage) -> Self {
        Self {
            success: true,
            current_page: page.page,
            total_pages: page.total_pages,
            total_applications: page.total,
            applications: page.items.into_iter().map(ApplicantItem::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub message: String,
    pub application: ApplicationResponse,
}
