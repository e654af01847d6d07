use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::list::Filterable;
use crate::traits::Entity;
use crate::types::EntityId;

/// Whether a posting is a full job or an internship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Job,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Job => "job",
            JobType::Internship => "internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job or internship posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub posted_by: Option<EntityId>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Job {
    const RESOURCE: &'static str = "jobs";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Filterable for Job {
    fn display_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.title)
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn kind(&self) -> Option<&str> {
        Some(self.job_type.as_str())
    }
}

/// Body for posting a job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub company: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

/// Review state of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Rejected,
    Hired,
}

/// An application submitted against a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub job: EntityId,
    pub applicant: EntityId,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A file sent along with a job application.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything submitted when applying to a job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub cover_letter: Option<String>,
    pub resume: Option<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_field_maps_to_kind() {
        let job: Job = serde_json::from_value(json!({
            "_id": "j1",
            "title": "Backend Engineer",
            "company": "Acme",
            "type": "internship"
        }))
        .unwrap();

        assert_eq!(job.job_type, JobType::Internship);
        assert_eq!(job.kind(), Some("internship"));
        assert_eq!(job.display_text(), "Backend Engineer");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let parsed = serde_json::from_value::<Job>(json!({
            "_id": "j1",
            "title": "x",
            "company": "y",
            "type": "gig"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn new_job_serializes_type_key() {
        let body = serde_json::to_value(NewJob {
            title: "Analyst".into(),
            company: "Initech".into(),
            job_type: JobType::Job,
            location: None,
            category: Some("Finance".into()),
            description: None,
            deadline: None,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"title": "Analyst", "company": "Initech", "type": "job", "category": "Finance"})
        );
    }
}
