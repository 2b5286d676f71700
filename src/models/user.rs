use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::UnknownVariant;
use crate::storage::StoredObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Recruiter => "recruiter",
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "candidate" => Ok(Role::Candidate),
            "recruiter" => Ok(Role::Recruiter),
            _ => Err(UnknownVariant(value)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub company_id: Option<Uuid>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub resume_name: Option<String>,
    pub resume_url: Option<String>,
    pub resume_handle: Option<String>,
    pub photo_url: Option<String>,
    pub photo_handle: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The saved profile resume, if one has been uploaded. The storage
    /// handle is the marker: a row with a URL but no handle is treated as
    /// having no usable snapshot.
    pub fn saved_resume(&self) -> Option<StoredObject> {
        let handle = self.resume_handle.clone()?;
        Some(StoredObject {
            original_name: self
                .resume_name
                .clone()
                .unwrap_or_else(|| "resume.pdf".to_string()),
            url: self.resume_url.clone().unwrap_or_default(),
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_resume(name: Option<&str>, url: Option<&str>, handle: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test".into(),
            email: "test@example.com".into(),
            role: Role::Candidate,
            company_id: None,
            phone: None,
            bio: None,
            location: None,
            skills: None,
            resume_name: name.map(Into::into),
            resume_url: url.map(Into::into),
            resume_handle: handle.map(Into::into),
            photo_url: None,
            photo_handle: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!(
            Role::try_from("Recruiter".to_string()).unwrap(),
            Role::Recruiter
        );
        assert_eq!(
            Role::try_from("candidate".to_string()).unwrap(),
            Role::Candidate
        );
        assert!(Role::try_from("admin".to_string()).is_err());
    }

    #[test]
    fn saved_resume_requires_storage_handle() {
        let with_handle = user_with_resume(Some("cv.pdf"), Some("/uploads/x"), Some("cv/x.pdf"));
        let snapshot = with_handle.saved_resume().expect("snapshot");
        assert_eq!(snapshot.original_name, "cv.pdf");
        assert_eq!(snapshot.handle, "cv/x.pdf");

        let without_handle = user_with_resume(Some("cv.pdf"), Some("/uploads/x"), None);
        assert!(without_handle.saved_resume().is_none());
    }
}
