use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::job::{Job, JobType};
use crate::services::job_service::JobList;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub skills: Vec<String>,
    pub salary: Decimal,
    #[validate(range(min = 0, max = 50))]
    pub experience_years: i32,
    #[validate(length(min = 1))]
    pub location: String,
    pub job_type: JobType,
    #[validate(range(min = 1))]
    pub position_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub skills: Option<Vec<String>>,
    pub salary: Option<Decimal>,
    #[validate(range(min = 0, max = 50))]
    pub experience_years: Option<i32>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    #[validate(range(min = 1))]
    pub position_count: Option<i32>,
    pub is_closed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub salary: Decimal,
    pub experience_years: i32,
    pub location: String,
    pub job_type: JobType,
    pub position_count: i32,
    pub is_closed: bool,
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            skills: job.skills,
            salary: job.salary,
            experience_years: job.experience_years,
            location: job.location,
            job_type: job.job_type,
            position_count: job.position_count,
            is_closed: job.is_closed,
            company_id: job.company_id,
            created_by: job.created_by,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyBrief {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub location: Option<String>,
}

/// Flat join row for job listings; reshaped into the nested response.
#[derive(Debug, Clone, FromRow)]
pub struct JobWithCompanyRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub salary: Decimal,
    pub experience_years: i32,
    pub location: String,
    #[sqlx(try_from = "String")]
    pub job_type: JobType,
    pub position_count: i32,
    pub is_closed: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company_id: Uuid,
    pub company_name: String,
    pub company_logo_url: Option<String>,
    pub company_location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub salary: Decimal,
    pub experience_years: i32,
    pub location: String,
    pub job_type: JobType,
    pub position_count: i32,
    pub is_closed: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company: CompanyBrief,
}

impl From<JobWithCompanyRow> for JobListItem {
    fn from(row: JobWithCompanyRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            skills: row.skills,
            salary: row.salary,
            experience_years: row.experience_years,
            location: row.location,
            job_type: row.job_type,
            position_count: row.position_count,
            is_closed: row.is_closed,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
            company: CompanyBrief {
                id: row.company_id,
                name: row.company_name,
                logo_url: row.company_logo_url,
                location: row.company_location,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub include_closed: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub success: bool,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_jobs: i64,
    pub jobs: Vec<JobListItem>,
}

impl From<JobList> for JobListResponse {
    fn from(list: JobList) -> Self {
        Self {
            success: true,
            current_page: list.page,
            total_pages: list.total_pages,
            total_jobs: list.total,
            jobs: list.items.into_iter().map(JobListItem::from).collect(),
        }
    }
}
