use crate::dto::job_dto::{CreateJobPayload, JobListQuery, JobWithCompanyRow, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::models::user::User;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

const JOB_COLUMNS: &str = "id, title, description, skills, salary, experience_years, location, \
                           job_type, position_count, is_closed, company_id, created_by, \
                           created_at, updated_at";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub items: Vec<JobWithCompanyRow>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Required-skills list: 1-50 entries, each 2-100 characters.
fn validate_skills(skills: &[String]) -> Result<()> {
    if skills.is_empty() || skills.len() > 50 {
        return Err(Error::BadRequest(
            "A job must list between 1 and 50 required skills".to_string(),
        ));
    }
    if skills
        .iter()
        .any(|s| s.chars().count() < 2 || s.chars().count() > 100)
    {
        return Err(Error::BadRequest(
            "Each skill must be between 2 and 100 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_salary(salary: &Decimal) -> Result<()> {
    if salary.is_sign_negative() {
        return Err(Error::BadRequest("Salary cannot be negative".to_string()));
    }
    Ok(())
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, recruiter: &User, payload: CreateJobPayload) -> Result<Job> {
        let Some(company_id) = recruiter.company_id else {
            return Err(Error::BadRequest(
                "You must belong to a company before posting jobs".to_string(),
            ));
        };
        validate_skills(&payload.skills)?;
        validate_salary(&payload.salary)?;

        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (
                title, description, skills, salary, experience_years,
                location, job_type, position_count, company_id, created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.skills)
        .bind(payload.salary)
        .bind(payload.experience_years)
        .bind(&payload.location)
        .bind(payload.job_type.as_str())
        .bind(payload.position_count)
        .bind(company_id)
        .bind(recruiter.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        job.ok_or(Error::JobNotFound)
    }

    pub async fn get_with_company(&self, id: Uuid) -> Result<JobWithCompanyRow> {
        let job = sqlx::query_as::<_, JobWithCompanyRow>(
            r#"
            SELECT j.id, j.title, j.description, j.skills, j.salary, j.experience_years,
                   j.location, j.job_type, j.position_count, j.is_closed, j.created_by,
                   j.created_at, j.updated_at,
                   c.id AS company_id, c.name AS company_name,
                   c.logo_url AS company_logo_url, c.location AS company_location
            FROM jobs j
            JOIN companies c ON c.id = j.company_id
            WHERE j.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        job.ok_or(Error::JobNotFound)
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if !query.include_closed.unwrap_or(false) {
            filters.push("j.is_closed = FALSE".to_string());
        }
        if let Some(job_type) = query.job_type {
            filters.push(format!("j.job_type = ${}", args.len() + 1));
            args.push(job_type);
        }
        if let Some(location) = query.location {
            filters.push(format!("j.location ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", location));
        }
        if let Some(search) = query.search {
            filters.push(format!("j.title ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", search));
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "SELECT j.id, j.title, j.description, j.skills, j.salary, j.experience_years,
                    j.location, j.job_type, j.position_count, j.is_closed, j.created_by,
                    j.created_at, j.updated_at,
                    c.id AS company_id, c.name AS company_name,
                    c.logo_url AS company_logo_url, c.location AS company_location
             FROM jobs j
             JOIN companies c ON c.id = j.company_id
             {}
             ORDER BY j.created_at DESC
             LIMIT ${} OFFSET ${}",
            where_clause,
            args.len() + 1,
            args.len() + 2
        );

        let total_query = format!("SELECT COUNT(*) FROM jobs j {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, JobWithCompanyRow>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(limit).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (limit as f64)).ceil() as i64;

        Ok(JobList {
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }

    pub async fn update(
        &self,
        recruiter: &User,
        id: Uuid,
        payload: UpdateJobPayload,
    ) -> Result<Job> {
        let job = self.get_by_id(id).await?;
        if job.created_by != recruiter.id {
            return Err(Error::Forbidden(
                "You do not own this job posting".to_string(),
            ));
        }
        if let Some(ref skills) = payload.skills {
            validate_skills(skills)?;
        }
        if let Some(ref salary) = payload.salary {
            validate_salary(salary)?;
        }

        let updated = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                skills = COALESCE($4, skills),
                salary = COALESCE($5, salary),
                experience_years = COALESCE($6, experience_years),
                location = COALESCE($7, location),
                job_type = COALESCE($8, job_type),
                position_count = COALESCE($9, position_count),
                is_closed = COALESCE($10, is_closed),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.skills)
        .bind(payload.salary)
        .bind(payload.experience_years)
        .bind(payload.location)
        .bind(payload.job_type.map(|t| t.as_str()))
        .bind(payload.position_count)
        .bind(payload.is_closed)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_list_bounds() {
        assert!(validate_skills(&[]).is_err());
        assert!(validate_skills(&["Rust".to_string()]).is_ok());
        assert!(validate_skills(&vec!["ok".to_string(); 50]).is_ok());
        assert!(validate_skills(&vec!["ok".to_string(); 51]).is_err());
    }

    #[test]
    fn skill_entry_length_bounds() {
        assert!(validate_skills(&["a".to_string()]).is_err());
        assert!(validate_skills(&["ab".to_string()]).is_ok());
        assert!(validate_skills(&["a".repeat(100)]).is_ok());
        assert!(validate_skills(&["a".repeat(101)]).is_err());
    }

    #[test]
    fn salary_must_be_non_negative() {
        assert!(validate_salary(&Decimal::ZERO).is_ok());
        assert!(validate_salary(&Decimal::new(120_000, 0)).is_ok());
        assert!(validate_salary(&Decimal::new(-1, 0)).is_err());
    }
}
