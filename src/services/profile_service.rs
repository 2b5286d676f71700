use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::profile_dto::UpdateProfilePayload;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::storage::{BlobStore, StoredObject};

const USER_COLUMNS: &str = "id, name, email, role, company_id, phone, bio, location, skills, \
                            resume_name, resume_url, resume_handle, photo_url, photo_handle, \
                            created_at, updated_at";

#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
    blobs: Arc<dyn BlobStore>,
}

impl ProfileService {
    pub fn new(pool: PgPool, blobs: Arc<dyn BlobStore>) -> Self {
        Self { pool, blobs }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(Error::UserNotFound)
    }

    pub async fn update(&self, user_id: Uuid, payload: UpdateProfilePayload) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                bio = COALESCE($4, bio),
                location = COALESCE($5, location),
                skills = COALESCE($6, skills),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(payload.name)
        .bind(payload.phone)
        .bind(payload.bio)
        .bind(payload.location)
        .bind(payload.skills)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(Error::UserNotFound)
    }

    /// Save a new profile resume snapshot and drop the blob it replaces.
    /// The snapshot is what application submission falls back to when no
    /// file is uploaded with the application itself.
    pub async fn set_resume(&self, user_id: Uuid, resume: StoredObject) -> Result<User> {
        let previous = self.get(user_id).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET resume_name = $2, resume_url = $3, resume_handle = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&resume.original_name)
        .bind(&resume.url)
        .bind(&resume.handle)
        .fetch_one(&self.pool)
        .await?;

        if let Some(old_handle) = previous.resume_handle {
            if old_handle != resume.handle {
                if let Err(e) = self.blobs.delete(&old_handle).await {
                    tracing::warn!(handle = %old_handle, error = %e, "failed to delete replaced resume blob");
                }
            }
        }
        Ok(user)
    }

    pub async fn set_photo(&self, user_id: Uuid, photo: StoredObject) -> Result<User> {
        let previous = self.get(user_id).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET photo_url = $2, photo_handle = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&photo.url)
        .bind(&photo.handle)
        .fetch_one(&self.pool)
        .await?;

        if let Some(old_handle) = previous.photo_handle {
            if old_handle != photo.handle {
                if let Err(e) = self.blobs.delete(&old_handle).await {
                    tracing::warn!(handle = %old_handle, error = %e, "failed to delete replaced photo blob");
                }
            }
        }
        Ok(user)
    }
}
