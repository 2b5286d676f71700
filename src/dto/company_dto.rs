use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::company::Company;
use crate::services::company_service::CompanyList;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCompanyPayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub logo_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            description: company.description,
            website: company.website,
            location: company.location,
            logo_url: company.logo_url,
            owner_id: company.owner_id,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyListResponse {
    pub success: bool,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_companies: i64,
    pub companies: Vec<CompanyResponse>,
}

impl From<CompanyList> for CompanyListResponse {
    fn from(list: CompanyList) -> Self {
        Self {
            success: true,
            current_page: list.page,
            total_pages: list.total_pages,
            total_companies: list.total,
            companies: list.items.into_iter().map(CompanyResponse::from).collect(),
        }
    }
}
