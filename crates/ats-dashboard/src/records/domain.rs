use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::fields::{FieldValue, Projectable};

/// Identifier wrapper shared by every dashboard record.
///
/// The backend is inconsistent about identifier types, so both JSON strings and
/// numbers are accepted and normalized to their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text.trim().to_string(),
            RawId::Number(number) => number.to_string(),
        };

        if id.is_empty() {
            return Err(D::Error::custom("record id must not be empty"));
        }

        Ok(Self(id))
    }
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let status = raw.trim();
    if status.is_empty() {
        return Err(D::Error::custom("record status must not be empty"));
    }
    Ok(status.to_string())
}

/// The four collections rendered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Jobs,
    Candidates,
    Interviews,
    Customers,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jobs => "Jobs",
            Self::Candidates => "Candidates",
            Self::Interviews => "Interviews",
            Self::Customers => "Customers",
        }
    }

    /// Route segment and seed file stem for the collection.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::Candidates => "candidates",
            Self::Interviews => "interviews",
            Self::Customers => "customers",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record kind '{0}' (expected jobs, candidates, interviews, or customers)")]
pub struct ParseEntityKindError(pub String);

impl FromStr for EntityKind {
    type Err = ParseEntityKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "job" | "jobs" => Ok(Self::Jobs),
            "candidate" | "candidates" => Ok(Self::Candidates),
            "interview" | "interviews" => Ok(Self::Interviews),
            "customer" | "customers" | "crm" => Ok(Self::Customers),
            _ => Err(ParseEntityKindError(value.to_string())),
        }
    }
}

/// A job posting as listed on the jobs board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "employmentType")]
    pub employment_type: Option<String>,
    #[serde(deserialize_with = "deserialize_status")]
    pub status: String,
    #[serde(default)]
    pub openings: Option<u32>,
    #[serde(default, alias = "salaryMin")]
    pub salary_min: Option<f64>,
    #[serde(default, alias = "salaryMax")]
    pub salary_max: Option<f64>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

const JOB_SORT_FIELDS: &[&str] = &[
    "id",
    "title",
    "department",
    "location",
    "employment_type",
    "status",
    "openings",
    "salary_min",
    "salary_max",
    "created_at",
];

impl Projectable for Job {
    const KIND: EntityKind = EntityKind::Jobs;
    const SORTABLE_FIELDS: &'static [&'static str] = JOB_SORT_FIELDS;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn title(&self) -> &str {
        text(&self.title)
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            text(&self.title),
            text(&self.department),
            text(&self.location),
            text(&self.employment_type),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::from_identifier(&self.id),
            "title" => FieldValue::from_text(self.title.as_deref()),
            "department" => FieldValue::from_text(self.department.as_deref()),
            "location" => FieldValue::from_text(self.location.as_deref()),
            "employment_type" => FieldValue::from_text(self.employment_type.as_deref()),
            "status" => FieldValue::from_text(Some(self.status.as_str())),
            "openings" => FieldValue::from_number(self.openings.map(f64::from)),
            "salary_min" => FieldValue::from_number(self.salary_min),
            "salary_max" => FieldValue::from_number(self.salary_max),
            "created_at" => FieldValue::from_date_like(self.created_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

/// A candidate moving through a hiring pipeline; `status` is the pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "jobTitle")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "deserialize_status")]
    pub status: String,
    #[serde(default, alias = "experienceYears")]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

const CANDIDATE_SORT_FIELDS: &[&str] = &[
    "id",
    "name",
    "email",
    "job_title",
    "status",
    "experience_years",
    "rating",
    "created_at",
];

impl Projectable for Candidate {
    const KIND: EntityKind = EntityKind::Candidates;
    const SORTABLE_FIELDS: &'static [&'static str] = CANDIDATE_SORT_FIELDS;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn title(&self) -> &str {
        text(&self.name)
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            text(&self.name),
            text(&self.email),
            text(&self.phone),
            text(&self.job_title),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::from_identifier(&self.id),
            "name" => FieldValue::from_text(self.name.as_deref()),
            "email" => FieldValue::from_text(self.email.as_deref()),
            "job_title" => FieldValue::from_text(self.job_title.as_deref()),
            "status" => FieldValue::from_text(Some(self.status.as_str())),
            "experience_years" => FieldValue::from_number(self.experience_years),
            "rating" => FieldValue::from_number(self.rating),
            "created_at" => FieldValue::from_date_like(self.created_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

/// A scheduled interview between a candidate and an interviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: RecordId,
    #[serde(default, alias = "candidateName")]
    pub candidate_name: Option<String>,
    #[serde(default, alias = "jobTitle")]
    pub job_title: Option<String>,
    #[serde(default)]
    pub interviewer: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(deserialize_with = "deserialize_status")]
    pub status: String,
    #[serde(default, alias = "scheduledAt")]
    pub scheduled_at: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

const INTERVIEW_SORT_FIELDS: &[&str] = &[
    "id",
    "candidate_name",
    "job_title",
    "interviewer",
    "mode",
    "status",
    "scheduled_at",
    "created_at",
];

impl Projectable for Interview {
    const KIND: EntityKind = EntityKind::Interviews;
    const SORTABLE_FIELDS: &'static [&'static str] = INTERVIEW_SORT_FIELDS;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn title(&self) -> &str {
        text(&self.candidate_name)
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            text(&self.candidate_name),
            text(&self.job_title),
            text(&self.interviewer),
            text(&self.mode),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::from_identifier(&self.id),
            "candidate_name" => FieldValue::from_text(self.candidate_name.as_deref()),
            "job_title" => FieldValue::from_text(self.job_title.as_deref()),
            "interviewer" => FieldValue::from_text(self.interviewer.as_deref()),
            "mode" => FieldValue::from_text(self.mode.as_deref()),
            "status" => FieldValue::from_text(Some(self.status.as_str())),
            "scheduled_at" => FieldValue::from_date_like(self.scheduled_at.as_deref()),
            "created_at" => FieldValue::from_date_like(self.created_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

/// A CRM customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(deserialize_with = "deserialize_status")]
    pub status: String,
    #[serde(default, alias = "dealValue")]
    pub deal_value: Option<f64>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

const CUSTOMER_SORT_FIELDS: &[&str] = &[
    "id",
    "name",
    "company",
    "email",
    "industry",
    "status",
    "deal_value",
    "created_at",
];

impl Projectable for Customer {
    const KIND: EntityKind = EntityKind::Customers;
    const SORTABLE_FIELDS: &'static [&'static str] = CUSTOMER_SORT_FIELDS;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn title(&self) -> &str {
        text(&self.name)
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            text(&self.name),
            text(&self.company),
            text(&self.email),
            text(&self.industry),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::from_identifier(&self.id),
            "name" => FieldValue::from_text(self.name.as_deref()),
            "company" => FieldValue::from_text(self.company.as_deref()),
            "email" => FieldValue::from_text(self.email.as_deref()),
            "industry" => FieldValue::from_text(self.industry.as_deref()),
            "status" => FieldValue::from_text(Some(self.status.as_str())),
            "deal_value" => FieldValue::from_number(self.deal_value),
            "created_at" => FieldValue::from_date_like(self.created_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
