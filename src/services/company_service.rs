use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::company_dto::{CompanyListQuery, CreateCompanyPayload, UpdateCompanyPayload};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::company::Company;
use crate::models::user::User;
use crate::storage::{BlobStore, StoredObject};

const COMPANY_COLUMNS: &str = "id, name, description, website, location, logo_url, \
                               logo_handle, owner_id, created_at, updated_at";

#[derive(Clone)]
pub struct CompanyService {
    pool: PgPool,
    blobs: Arc<dyn BlobStore>,
}

pub struct CompanyList {
    pub items: Vec<Company>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl CompanyService {
    pub fn new(pool: PgPool, blobs: Arc<dyn BlobStore>) -> Self {
        Self { pool, blobs }
    }

    /// Create a company and attach the creating recruiter to it. Both
    /// writes land in one transaction so a recruiter can never end up
    /// owning a company they are not a member of.
    pub async fn create(&self, owner: &User, payload: CreateCompanyPayload) -> Result<Company> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, Company>(&format!(
            r#"
            INSERT INTO companies (name, description, website, location, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.website)
        .bind(&payload.location)
        .bind(owner.id)
        .fetch_one(&mut *tx)
        .await;

        let company = match inserted {
            Ok(company) => company,
            Err(e) if is_unique_violation(&e) => return Err(Error::CompanyExists),
            Err(e) => return Err(e.into()),
        };

        sqlx::query("UPDATE users SET company_id = $1, updated_at = NOW() WHERE id = $2")
            .bind(company.id)
            .bind(owner.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(company)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        company.ok_or(Error::CompanyNotFound)
    }

    pub async fn list(&self, query: CompanyListQuery) -> Result<CompanyList> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(search) = query.search {
            filters.push(format!("name ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", search));
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "SELECT {} FROM companies {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            COMPANY_COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM companies {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Company>(&items_query);
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

        Ok(CompanyList {
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }

    fn require_owner(company: &Company, user: &User) -> Result<()> {
        if company.owner_id != user.id {
            return Err(Error::Forbidden(
                "Only the company owner may modify it".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn update(
        &self,
        user: &User,
        id: Uuid,
        payload: UpdateCompanyPayload,
    ) -> Result<Company> {
        let company = self.get_by_id(id).await?;
        Self::require_owner(&company, user)?;

        let updated = sqlx::query_as::<_, Company>(&format!(
            r#"
            UPDATE companies
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                website = COALESCE($4, website),
                location = COALESCE($5, location),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payload.name)
        .bind(payload.description)
        .bind(payload.website)
        .bind(payload.location)
        .fetch_one(&self.pool)
        .await;

        match updated {
            Ok(company) => Ok(company),
            Err(e) if is_unique_violation(&e) => Err(Error::CompanyExists),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, user: &User, id: Uuid) -> Result<()> {
        let company = self.get_by_id(id).await?;
        Self::require_owner(&company, user)?;

        sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if let Some(handle) = company.logo_handle {
            if let Err(e) = self.blobs.delete(&handle).await {
                tracing::warn!(handle = %handle, error = %e, "failed to delete company logo blob");
            }
        }
        Ok(())
    }

    /// Replace the company logo, deleting the previous blob after the new
    /// reference is persisted.
    pub async fn set_logo(&self, user: &User, id: Uuid, logo: StoredObject) -> Result<Company> {
        let company = self.get_by_id(id).await?;
        Self::require_owner(&company, user)?;

        let updated = sqlx::query_as::<_, Company>(&format!(
            r#"
            UPDATE companies
            SET logo_url = $2, logo_handle = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&logo.url)
        .bind(&logo.handle)
        .fetch_one(&self.pool)
        .await?;

        if let Some(old_handle) = company.logo_handle {
            if old_handle != logo.handle {
                if let Err(e) = self.blobs.delete(&old_handle).await {
                    tracing::warn!(handle = %old_handle, error = %e, "failed to delete replaced logo blob");
                }
            }
        }
        Ok(updated)
    }
}
