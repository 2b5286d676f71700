use std::sync::Arc;

use bytes::Bytes;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::{ApplicantRow, AppliedApplicationRow};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::job::Job;
use crate::models::user::User;
use crate::storage::{BlobStore, StoredObject};
use crate::utils::validation::{require_pdf, validate_cover_letter};

const APPLICATION_COLUMNS: &str = "id, job_id, applicant_id, cover_letter, resume_name, \
                                   resume_url, resume_handle, status, created_at, updated_at";

/// A resume file as it arrived in the multipart request.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A recruiter may only act on applications for jobs owned by their own
/// company. Recruiters without a company own nothing.
pub fn owns_company(recruiter: &User, company_id: Uuid) -> bool {
    recruiter.company_id == Some(company_id)
}

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
    blobs: Arc<dyn BlobStore>,
}

pub struct AppliedPage {
    pub items: Vec<AppliedApplicationRow>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

pub struct ApplicantPage {
    pub items: Vec<ApplicantRow>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl ApplicationService {
    pub fn new(pool: PgPool, blobs: Arc<dyn BlobStore>) -> Self {
        Self { pool, blobs }
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            "SELECT id, title, description, skills, salary, experience_years, location, \
             job_type, position_count, is_closed, company_id, created_by, created_at, \
             updated_at FROM jobs WHERE id = $1",
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;

        job.ok_or(Error::JobNotFound)
    }

    /// Submit an application for a job. Validations run in order: the job
    /// must exist and be open, the candidate must not have applied before,
    /// the cover letter must be in bounds, and a resume must be resolvable
    /// (fresh upload first, saved profile snapshot second).
    ///
    /// The pre-insert duplicate lookup is only an early exit; the unique
    /// constraint on (job_id, applicant_id) is what actually guarantees at
    /// most one application per candidate per job under concurrent submits.
    pub async fn apply(
        &self,
        applicant: &User,
        job_id: Uuid,
        cover_letter: Option<String>,
        upload: Option<ResumeUpload>,
    ) -> Result<Application> {
        let job = self.get_job(job_id).await?;
        if job.is_closed {
            return Err(Error::JobClosed);
        }

        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM applications WHERE job_id = $1 AND applicant_id = $2",
        )
        .bind(job.id)
        .bind(applicant.id)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(Error::DuplicateApplication);
        }

        if let Some(ref letter) = cover_letter {
            validate_cover_letter(letter)?;
        }

        let resume = self.resolve_resume(applicant, upload).await?;

        let inserted = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (
                job_id, applicant_id, cover_letter, resume_name, resume_url, resume_handle
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(job.id)
        .bind(applicant.id)
        .bind(cover_letter)
        .bind(&resume.original_name)
        .bind(&resume.url)
        .bind(&resume.handle)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(application) => Ok(application),
            // A concurrent submit can slip past the lookup above; the
            // constraint wins the race and we report it as a duplicate.
            Err(e) if is_unique_violation(&e) => Err(Error::DuplicateApplication),
            Err(e) => Err(e.into()),
        }
    }

    /// Uploaded file takes priority over the saved profile snapshot; with
    /// neither, the application cannot proceed.
    async fn resolve_resume(
        &self,
        applicant: &User,
        upload: Option<ResumeUpload>,
    ) -> Result<StoredObject> {
        if let Some(upload) = upload {
            require_pdf(upload.content_type.as_deref(), &upload.data)?;
            return self
                .blobs
                .put(&upload.file_name, upload.data)
                .await
                .map_err(Error::UploadFailed);
        }
        applicant.saved_resume().ok_or(Error::MissingResume)
    }

    pub async fn list_for_applicant(
        &self,
        applicant_id: Uuid,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<AppliedPage> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;

        let items = sqlx::query_as::<_, AppliedApplicationRow>(
            r#"
            SELECT a.id, a.cover_letter, a.resume_name, a.resume_url, a.status, a.created_at,
                   j.id AS job_id, j.title AS job_title, j.location AS job_location,
                   j.job_type AS job_type, j.salary AS job_salary, j.is_closed AS job_is_closed,
                   c.id AS company_id, c.name AS company_name, c.logo_url AS company_logo_url
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN companies c ON c.id = j.company_id
            WHERE a.applicant_id = $1
            ORDER BY a.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(applicant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM applications WHERE applicant_id = $1",
        )
        .bind(applicant_id)
        .fetch_one(&self.pool)
        .await?;

        let total_pages = ((total as f64) / (limit as f64)).ceil() as i64;

        Ok(AppliedPage {
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }

    pub async fn list_for_job(
        &self,
        recruiter: &User,
        job_id: Uuid,
        status: Option<ApplicationStatus>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<ApplicantPage> {
        let job = self.get_job(job_id).await?;
        if !owns_company(recruiter, job.company_id) {
            return Err(Error::Forbidden(
                "You may only view applications for your own company's jobs".to_string(),
            ));
        }

        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;

        let status_filter = if status.is_some() {
            " AND a.status = $4"
        } else {
            ""
        };

        let items_query = format!(
            r#"
            SELECT a.id, a.cover_letter, a.resume_name, a.resume_url, a.status, a.created_at,
                   u.id AS applicant_id, u.name AS applicant_name, u.email AS applicant_email,
                   u.phone AS applicant_phone, u.location AS applicant_location,
                   u.skills AS applicant_skills, u.photo_url AS applicant_photo_url
            FROM applications a
            JOIN users u ON u.id = a.applicant_id
            WHERE a.job_id = $1{status_filter}
            ORDER BY a.created_at DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let mut items_statement = sqlx::query_as::<_, ApplicantRow>(&items_query)
            .bind(job.id)
            .bind(limit)
            .bind(offset);
        if let Some(status) = status {
            items_statement = items_statement.bind(status.as_str());
        }
        let items = items_statement.fetch_all(&self.pool).await?;

        let count_filter = if status.is_some() {
            " AND status = $2"
        } else {
            ""
        };
        let total_query =
            format!("SELECT COUNT(*) FROM applications WHERE job_id = $1{count_filter}");
        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query).bind(job.id);
        if let Some(status) = status {
            total_statement = total_statement.bind(status.as_str());
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (limit as f64)).ceil() as i64;

        Ok(ApplicantPage {
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        application.ok_or(Error::ApplicationNotFound)
    }

    /// Resolve a pending application to `accepted` or `rejected`. The write
    /// is a single conditional update keyed on the current status, so two
    /// racing recruiters cannot both win: the loser's update matches zero
    /// rows and reports the already-settled status.
    pub async fn update_status(
        &self,
        recruiter: &User,
        application_id: Uuid,
        raw_status: Option<String>,
    ) -> Result<Application> {
        let raw = match raw_status {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Err(Error::MissingStatus),
        };
        let target = ApplicationStatus::try_from(raw.clone())
            .map_err(|_| Error::InvalidStatus(raw.clone()))?;
        if target == ApplicationStatus::Pending {
            return Err(Error::InvalidStatus(raw));
        }

        let application = self.get_by_id(application_id).await?;
        let job = self.get_job(application.job_id).await?;
        if !owns_company(recruiter, job.company_id) {
            return Err(Error::Forbidden(
                "You may only manage applications for your own company's jobs".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Application>(&format!(
            r#"
            UPDATE applications
            SET status = $1, updated_at = NOW()
            WHERE id = $2 AND status = 'pending'
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(target.as_str())
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(application) => Ok(application),
            None => {
                // Zero rows: the application left `pending` since we read
                // it. Re-read so the error names the settled status.
                let current = self.get_by_id(application_id).await?;
                Err(Error::InvalidStatusUpdate(current.status.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use chrono::Utc;

    fn recruiter_with_company(company_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Rec".into(),
            email: "rec@example.com".into(),
            role: Role::Recruiter,
            company_id,
            phone: None,
            bio: None,
            location: None,
            skills: None,
            resume_name: None,
            resume_url: None,
            resume_handle: None,
            photo_url: None,
            photo_handle: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn ownership_requires_matching_company() {
        let company = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(owns_company(&recruiter_with_company(Some(company)), company));
        assert!(!owns_company(&recruiter_with_company(Some(other)), company));
        assert!(!owns_company(&recruiter_with_company(None), company));
    }
}
