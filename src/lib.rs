pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use crate::services::{
    application_service::ApplicationService, company_service::CompanyService,
    job_service::JobService, profile_service::ProfileService,
};
use crate::storage::BlobStore;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub blobs: Arc<dyn BlobStore>,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub company_service: CompanyService,
    pub profile_service: ProfileService,
}

impl AppState {
    pub fn new(pool: PgPool, blobs: Arc<dyn BlobStore>) -> Self {
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone(), blobs.clone());
        let company_service = CompanyService::new(pool.clone(), blobs.clone());
        let profile_service = ProfileService::new(pool.clone(), blobs.clone());

        Self {
            pool,
            blobs,
            job_service,
            application_service,
            company_service,
            profile_service,
        }
    }
}
