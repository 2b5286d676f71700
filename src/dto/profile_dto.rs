use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{Role, User};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub company_id: Option<Uuid>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub resume_name: Option<String>,
    pub resume_url: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            company_id: user.company_id,
            phone: user.phone,
            bio: user.bio,
            location: user.location,
            skills: user.skills,
            resume_name: user.resume_name,
            resume_url: user.resume_url,
            photo_url: user.photo_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileEnvelope {
    pub success: bool,
    pub profile: ProfileResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeUploadResponse {
    pub success: bool,
    pub message: String,
    pub resume_name: String,
    pub resume_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhotoUploadResponse {
    pub success: bool,
    pub message: String,
    pub photo_url: String,
}
