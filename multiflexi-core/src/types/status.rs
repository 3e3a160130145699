//! System status snapshot and command catalogue

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::lenient;

/// Maximum displayed length of the database DSN
const DATABASE_DISPLAY_LEN: usize = 50;
/// Maximum length of the error carried by a placeholder snapshot
const PLACEHOLDER_ERROR_LEN: usize = 20;

/// Output of `status --format=json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusInfo {
    #[serde(rename = "version-cli", deserialize_with = "lenient::string")]
    pub version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub user: String,
    #[serde(deserialize_with = "lenient::string")]
    pub php: String,
    #[serde(deserialize_with = "lenient::string")]
    pub os: String,
    #[serde(deserialize_with = "lenient::int")]
    pub companies: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub apps: i64,
    #[serde(rename = "runtemplates", deserialize_with = "lenient::int")]
    pub templates: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub executor: String,
    #[serde(deserialize_with = "lenient::string")]
    pub scheduler: String,
    #[serde(deserialize_with = "lenient::string")]
    pub zabbix: String,
    #[serde(deserialize_with = "lenient::string")]
    pub telemetry: String,
    #[serde(deserialize_with = "lenient::string")]
    pub encryption: String,
    #[serde(deserialize_with = "lenient::string")]
    pub database: String,
}

impl StatusInfo {
    /// Decode a status object, shortening the database DSN for display.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut status: Self = serde_json::from_value(value)?;
        status.database = truncate(&status.database, DATABASE_DISPLAY_LEN);
        Ok(status)
    }

    /// Snapshot shown when the status call failed.
    #[must_use]
    pub fn placeholder(error: &str) -> Self {
        Self {
            version: "Error".to_string(),
            user: truncate(error, PLACEHOLDER_ERROR_LEN),
            ..Self::default()
        }
    }

    /// Whether this snapshot came from [`StatusInfo::placeholder`].
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.version == "Error"
    }

    /// Label/value rows for the status dashboard.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("CLI Version", self.version.clone()),
            ("User", self.user.clone()),
            ("PHP", self.php.clone()),
            ("OS", self.os.clone()),
            ("Companies", self.companies.to_string()),
            ("Applications", self.apps.to_string()),
            ("RunTemplates", self.templates.to_string()),
            ("Executor", self.executor.clone()),
            ("Scheduler", self.scheduler.clone()),
            ("Zabbix", self.zabbix.clone()),
            ("Telemetry", self.telemetry.clone()),
            ("Encryption", self.encryption.clone()),
            ("Database", self.database.clone()),
        ]
    }
}

/// An external command advertised by `describe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
}

/// Shorten to `max` characters, appending `...` when something was cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_status_and_truncates_database() {
        let dsn = format!("mysql://multiflexi@localhost/{}", "x".repeat(60));
        let status = StatusInfo::from_value(json!({
            "version-cli": "1.2.3",
            "user": "admin",
            "companies": 4,
            "apps": "12",
            "runtemplates": 30.0,
            "database": dsn,
        }))
        .unwrap();

        assert_eq!(status.version, "1.2.3");
        assert_eq!(status.apps, 12);
        assert_eq!(status.templates, 30);
        assert_eq!(status.database.chars().count(), 53);
        assert!(status.database.ends_with("..."));
    }

    #[test]
    fn placeholder_carries_short_error() {
        let status = StatusInfo::placeholder("multiflexi-cli: command not found");
        assert!(status.is_placeholder());
        assert_eq!(status.user, "multiflexi-cli: comm...");
        assert_eq!(status.companies, 0);
    }
}
