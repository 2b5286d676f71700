use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Internship")]
    Internship,
    #[serde(rename = "Remote")]
    Remote,
    #[serde(rename = "Contract")]
    Contract,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Internship => "Internship",
            JobType::Remote => "Remote",
            JobType::Contract => "Contract",
        }
    }
}

impl TryFrom<String> for JobType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "full-time" => Ok(JobType::FullTime),
            "part-time" => Ok(JobType::PartTime),
            "internship" => Ok(JobType::Internship),
            "remote" => Ok(JobType::Remote),
            "contract" => Ok(JobType::Contract),
            _ => Err(UnknownVariant(value)),
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
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
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_round_trips_through_text() {
        for raw in ["Full-time", "Part-time", "Internship", "Remote", "Contract"] {
            let parsed = JobType::try_from(raw.to_string()).unwrap();
            assert_eq!(parsed.as_str(), raw);
        }
        assert!(JobType::try_from("Freelance".to_string()).is_err());
    }

    #[test]
    fn job_type_serde_uses_hyphenated_names() {
        let json = serde_json::to_string(&JobType::FullTime).unwrap();
        assert_eq!(json, "\"Full-time\"");
        let back: JobType = serde_json::from_str("\"Part-time\"").unwrap();
        assert_eq!(back, JobType::PartTime);
    }
}
