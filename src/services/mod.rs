pub mod application_service;
pub mod company_service;
pub mod job_service;
pub mod profile_service;
