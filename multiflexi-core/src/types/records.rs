//! Record types listed by the dashboard
//!
//! Thin value objects mirroring the JSON rows of `<noun> list --format=json`.
//! Decoding is tolerant: missing columns fall back to defaults and scalar
//! types are coerced through [`crate::utils::lenient`].

use serde::{Deserialize, Serialize};

use crate::utils::lenient;

/// Executed (or running) job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    /// Application ID
    #[serde(rename = "app", deserialize_with = "lenient::int")]
    pub app_id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub command: String,
    #[serde(deserialize_with = "lenient::string")]
    pub begin: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end: String,
    #[serde(deserialize_with = "lenient::int")]
    pub exitcode: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub executor: String,
    #[serde(deserialize_with = "lenient::int")]
    pub pid: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub schedule: String,
    #[serde(deserialize_with = "lenient::string")]
    pub schedule_type: String,
}

/// Application + company binding that is executed on a schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunTemplate {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub app_id: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub company_id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    /// Interval code: `n`, `h`, `d`, `w` or `m`
    #[serde(deserialize_with = "lenient::string")]
    pub interv: String,
    #[serde(deserialize_with = "lenient::int")]
    pub active: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub executor: String,
    #[serde(deserialize_with = "lenient::string")]
    pub cron: String,
    #[serde(deserialize_with = "lenient::string")]
    pub last_schedule: String,
    #[serde(deserialize_with = "lenient::string")]
    pub next_schedule: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub enabled: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub executable: String,
    #[serde(deserialize_with = "lenient::string")]
    pub version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(deserialize_with = "lenient::string")]
    pub topics: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub enabled: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    /// Company registration number
    #[serde(deserialize_with = "lenient::string")]
    pub ic: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credential {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::int")]
    pub company_id: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub credential_type_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Token {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub user: String,
    #[serde(deserialize_with = "lenient::string")]
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub login: String,
    #[serde(deserialize_with = "lenient::string")]
    pub firstname: String,
    #[serde(deserialize_with = "lenient::string")]
    pub lastname: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
}

/// File produced by a job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artifact {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub job_id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub file: String,
}

/// Credential type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredType {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub uuid: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub class: String,
    #[serde(deserialize_with = "lenient::string")]
    pub version: String,
}

/// Company to application assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyApp {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub company_id: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub app_id: i64,
}

/// Pending entry of the job queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueEntry {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub message: String,
}

/// Credential prototype
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrPrototype {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}
