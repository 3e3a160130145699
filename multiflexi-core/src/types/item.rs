//! Closed sum type over every listed record

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::kind::EntityKind;
use super::records::{
    Application, Artifact, Company, CompanyApp, CrPrototype, CredType, Credential, Job, QueueEntry,
    RunTemplate, Token, User,
};
use crate::error::{CoreError, CoreResult};

/// Run template interval codes accepted by the scheduler.
pub const INTERVAL_CODES: [(&str, &str); 5] = [
    ("n", "disabled"),
    ("h", "hourly"),
    ("d", "daily"),
    ("w", "weekly"),
    ("m", "monthly"),
];

/// A single displayable column of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// JSON column name, also the CLI option name on update
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

impl Field {
    fn new(key: &'static str, label: &'static str, value: impl ToString) -> Self {
        Self {
            key,
            label,
            value: value.to_string(),
        }
    }
}

/// One record of any listed kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    RunTemplate(RunTemplate),
    Job(Job),
    Application(Application),
    Company(Company),
    Credential(Credential),
    Token(Token),
    User(User),
    Artifact(Artifact),
    CredType(CredType),
    CompanyApp(CompanyApp),
    Queue(QueueEntry),
    CrPrototype(CrPrototype),
}

impl Item {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::RunTemplate(_) => EntityKind::RunTemplate,
            Self::Job(_) => EntityKind::Job,
            Self::Application(_) => EntityKind::Application,
            Self::Company(_) => EntityKind::Company,
            Self::Credential(_) => EntityKind::Credential,
            Self::Token(_) => EntityKind::Token,
            Self::User(_) => EntityKind::User,
            Self::Artifact(_) => EntityKind::Artifact,
            Self::CredType(_) => EntityKind::CredType,
            Self::CompanyApp(_) => EntityKind::CompanyApp,
            Self::Queue(_) => EntityKind::Queue,
            Self::CrPrototype(_) => EntityKind::CrPrototype,
        }
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::RunTemplate(r) => r.id,
            Self::Job(r) => r.id,
            Self::Application(r) => r.id,
            Self::Company(r) => r.id,
            Self::Credential(r) => r.id,
            Self::Token(r) => r.id,
            Self::User(r) => r.id,
            Self::Artifact(r) => r.id,
            Self::CredType(r) => r.id,
            Self::CompanyApp(r) => r.id,
            Self::Queue(r) => r.id,
            Self::CrPrototype(r) => r.id,
        }
    }

    /// Short human readable name, used in titles and the delete confirmation.
    #[must_use]
    pub fn label(&self) -> String {
        let name = match self {
            Self::RunTemplate(r) => r.name.clone(),
            Self::Job(r) => r.command.clone(),
            Self::Application(r) => r.name.clone(),
            Self::Company(r) => r.name.clone(),
            Self::Credential(r) => r.name.clone(),
            Self::Token(r) => r.user.clone(),
            Self::User(r) => r.login.clone(),
            Self::Artifact(r) => r.file.clone(),
            Self::CredType(r) => r.name.clone(),
            Self::CompanyApp(r) => format!("company {} / app {}", r.company_id, r.app_id),
            Self::Queue(r) => r.message.clone(),
            Self::CrPrototype(r) => r.name.clone(),
        };
        if name.trim().is_empty() {
            format!("{} #{}", self.kind(), self.id())
        } else {
            format!("{} #{} {}", self.kind(), self.id(), name.trim())
        }
    }

    /// All columns in display order.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        match self {
            Self::RunTemplate(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("name", "Name", &r.name),
                Field::new("app_id", "App ID", r.app_id),
                Field::new("company_id", "Company ID", r.company_id),
                Field::new("interv", "Interval", &r.interv),
                Field::new("active", "Active", r.active),
                Field::new("executor", "Executor", &r.executor),
                Field::new("cron", "Cron", &r.cron),
                Field::new("last_schedule", "Last Schedule", &r.last_schedule),
                Field::new("next_schedule", "Next Schedule", &r.next_schedule),
            ],
            Self::Job(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("app", "App ID", r.app_id),
                Field::new("command", "Command", &r.command),
                Field::new("begin", "Begin", &r.begin),
                Field::new("end", "End", &r.end),
                Field::new("exitcode", "Exit Code", r.exitcode),
                Field::new("executor", "Executor", &r.executor),
                Field::new("pid", "PID", r.pid),
                Field::new("schedule", "Schedule", &r.schedule),
                Field::new("schedule_type", "Schedule Type", &r.schedule_type),
            ],
            Self::Application(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("enabled", "Enabled", r.enabled),
                Field::new("name", "Name", &r.name),
                Field::new("description", "Description", &r.description),
                Field::new("executable", "Executable", &r.executable),
                Field::new("version", "Version", &r.version),
                Field::new("code", "Code", &r.code),
                Field::new("topics", "Topics", &r.topics),
            ],
            Self::Company(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("enabled", "Enabled", r.enabled),
                Field::new("name", "Name", &r.name),
                Field::new("ic", "IC", &r.ic),
                Field::new("email", "Email", &r.email),
                Field::new("slug", "Slug", &r.slug),
            ],
            Self::Credential(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("name", "Name", &r.name),
                Field::new("company_id", "Company ID", r.company_id),
                Field::new("credential_type_id", "Type ID", r.credential_type_id),
            ],
            Self::Token(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("user", "User", &r.user),
                Field::new("token", "Token", &r.token),
            ],
            Self::User(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("login", "Login", &r.login),
                Field::new("firstname", "First Name", &r.firstname),
                Field::new("lastname", "Last Name", &r.lastname),
                Field::new("email", "Email", &r.email),
            ],
            Self::Artifact(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("job_id", "Job ID", r.job_id),
                Field::new("file", "File", &r.file),
            ],
            Self::CredType(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("uuid", "UUID", &r.uuid),
                Field::new("name", "Name", &r.name),
                Field::new("class", "Class", &r.class),
                Field::new("version", "Version", &r.version),
            ],
            Self::CompanyApp(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("company_id", "Company ID", r.company_id),
                Field::new("app_id", "App ID", r.app_id),
            ],
            Self::Queue(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("message", "Message", &r.message),
            ],
            Self::CrPrototype(r) => vec![
                Field::new("id", "ID", r.id),
                Field::new("name", "Name", &r.name),
                Field::new("version", "Version", &r.version),
                Field::new("description", "Description", &r.description),
            ],
        }
    }

    /// Value of a single column, `None` if the kind has no such column.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.fields()
            .into_iter()
            .find(|field| field.key == key)
            .map(|field| field.value)
    }

    /// Fields an editor may change, as `(key, label)` pairs.
    #[must_use]
    pub const fn editable_fields(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Job(_) => &[
                ("command", "Command"),
                ("executor", "Executor"),
                ("schedule_type", "Schedule Type"),
            ],
            Self::RunTemplate(_) => &[("name", "Name")],
            Self::Application(_) => &[("name", "Name")],
            Self::Company(_) => &[
                ("name", "Company Name"),
                ("email", "Email"),
                ("ic", "IC"),
                ("slug", "Slug"),
            ],
            _ => &[],
        }
    }

    /// Replace one editable column.
    ///
    /// Fails with `UnsupportedItemKind` for read-only kinds and `InvalidInput`
    /// for unknown keys or values the column cannot hold.
    pub fn set_field(&mut self, key: &str, value: &str) -> CoreResult<()> {
        let value = value.trim().to_string();
        let kind = self.kind();
        let slot = match (self, key) {
            (Self::Job(r), "command") => &mut r.command,
            (Self::Job(r), "executor") => &mut r.executor,
            (Self::Job(r), "schedule_type") => &mut r.schedule_type,
            (Self::RunTemplate(r), "name") => &mut r.name,
            (Self::RunTemplate(r), "interv") => {
                if !INTERVAL_CODES.iter().any(|(code, _)| *code == value) {
                    return Err(CoreError::InvalidInput {
                        field: "interv".to_string(),
                        message: format!("'{value}' is not one of n, h, d, w, m"),
                    });
                }
                &mut r.interv
            }
            (Self::Application(r), "name") => &mut r.name,
            (Self::Company(r), "name") => &mut r.name,
            (Self::Company(r), "email") => &mut r.email,
            (Self::Company(r), "ic") => &mut r.ic,
            (Self::Company(r), "slug") => &mut r.slug,
            (
                Self::Job(_) | Self::RunTemplate(_) | Self::Application(_) | Self::Company(_),
                other,
            ) => {
                return Err(CoreError::InvalidInput {
                    field: other.to_string(),
                    message: format!("{kind} has no editable field '{other}'"),
                });
            }
            _ => {
                return Err(CoreError::UnsupportedItemKind {
                    operation: "Update".to_string(),
                    kind: kind.to_string(),
                });
            }
        };
        *slot = value;
        Ok(())
    }

    /// Arguments following `<noun> update` that persist this record.
    pub fn update_params(&self) -> CoreResult<Vec<String>> {
        let mut keys: Vec<&str> = self.editable_fields().iter().map(|(key, _)| *key).collect();
        if keys.is_empty() {
            return Err(CoreError::UnsupportedItemKind {
                operation: "Update".to_string(),
                kind: self.kind().to_string(),
            });
        }
        if matches!(self, Self::RunTemplate(_)) {
            keys.push("interv");
        }

        let mut args = vec![format!("--id={}", self.id())];
        for key in keys {
            let value = self.value(key).unwrap_or_default();
            args.push(format!("--{key}={value}"));
        }
        Ok(args)
    }
}

/// Decode a JSON list into typed rows.
///
/// `null` and an empty object mean "no rows"; an object keyed by row ID is
/// accepted as well as an array.
pub fn decode_rows<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, String> {
    let rows = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(rows) => rows,
        Value::Object(map) => map.into_iter().map(|(_, row)| row).collect(),
        other => return Err(format!("expected a JSON array, got {other}")),
    };
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(row).map_err(|e| format!("row {index}: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn company() -> Item {
        Item::Company(Company {
            id: 7,
            enabled: 1,
            name: "Acme".to_string(),
            ic: "123".to_string(),
            email: "office@acme.test".to_string(),
            slug: "acme".to_string(),
        })
    }

    #[test]
    fn label_falls_back_to_kind_and_id() {
        let item = Item::Token(Token {
            id: 3,
            ..Token::default()
        });
        assert_eq!(item.label(), "token #3");
        assert_eq!(company().label(), "company #7 Acme");
    }

    #[test]
    fn set_field_updates_editable_columns() {
        let mut item = company();
        item.set_field("email", "  new@acme.test ").unwrap();
        assert_eq!(item.value("email").as_deref(), Some("new@acme.test"));
    }

    #[test]
    fn set_field_rejects_read_only_kinds() {
        let mut item = Item::Queue(QueueEntry {
            id: 1,
            message: "m".to_string(),
        });
        let err = item.set_field("message", "x").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedItemKind { .. }));
    }

    #[test]
    fn set_field_rejects_unknown_key_and_bad_interval() {
        let mut item = company();
        assert!(matches!(
            item.set_field("id", "9"),
            Err(CoreError::InvalidInput { .. })
        ));

        let mut template = Item::RunTemplate(RunTemplate::default());
        assert!(template.set_field("interv", "x").is_err());
        template.set_field("interv", "w").unwrap();
        assert_eq!(template.value("interv").as_deref(), Some("w"));
    }

    #[test]
    fn update_params_cover_editable_fields() {
        let params = company().update_params().unwrap();
        assert_eq!(
            params,
            vec![
                "--id=7",
                "--name=Acme",
                "--email=office@acme.test",
                "--ic=123",
                "--slug=acme"
            ]
        );

        let template = Item::RunTemplate(RunTemplate {
            id: 2,
            name: "nightly".to_string(),
            interv: "d".to_string(),
            ..RunTemplate::default()
        });
        assert_eq!(
            template.update_params().unwrap(),
            vec!["--id=2", "--name=nightly", "--interv=d"]
        );
    }

    #[test]
    fn decode_rows_accepts_arrays_objects_and_null() {
        let rows: Vec<Token> =
            decode_rows(json!([{"id": 1, "user": "a"}, {"id": "2", "user": "b"}])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, 2);

        let rows: Vec<Token> = decode_rows(json!({"5": {"id": 5}})).unwrap();
        assert_eq!(rows[0].id, 5);

        assert!(decode_rows::<Token>(Value::Null).unwrap().is_empty());
        assert!(decode_rows::<Token>(json!("oops")).is_err());
    }
}
