//! Entity registry
//!
//! Maps each [`EntityKind`] to everything a listing needs: title, column
//! schema, decoder, paging and cache policy, and which actions apply.
//! Adding a listing type is one more [`EntitySpec`] registration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::fetcher::{Decoder, FetchOptions, DEFAULT_CACHE_TTL, DEFAULT_LIMIT, DEFAULT_TIMEOUT};
use crate::types::{
    decode_rows, Application, Artifact, Company, CompanyApp, CrPrototype, CredType, Credential,
    EntityKind, Item, Job, QueueEntry, RunTemplate, Token, User,
};

/// Fallback upper bound of a page
pub const DEFAULT_MAX_LIMIT: usize = 50;

/// One table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub width: u16,
    /// Field key looked up through [`Item::value`]
    pub key: &'static str,
}

const fn col(header: &'static str, width: u16, key: &'static str) -> Column {
    Column { header, width, key }
}

/// Registration of one listing type
#[derive(Debug, Clone)]
pub struct EntitySpec {
    pub kind: EntityKind,
    pub title: &'static str,
    pub columns: Vec<Column>,
    pub decode: Decoder,
    pub page_size: usize,
    pub max_page_size: usize,
    pub cache_ttl: Duration,
    /// Zero disables auto-refresh
    pub refresh_interval: Duration,
    pub timeout: Duration,
    pub editable: bool,
    pub deletable: bool,
    pub schedulable: bool,
}

impl EntitySpec {
    /// A read-only listing with default paging and cache policy.
    #[must_use]
    pub fn new(
        kind: EntityKind,
        title: &'static str,
        columns: Vec<Column>,
        decode: Decoder,
    ) -> Self {
        Self {
            kind,
            title,
            columns,
            decode,
            page_size: DEFAULT_LIMIT,
            max_page_size: DEFAULT_MAX_LIMIT,
            cache_ttl: DEFAULT_CACHE_TTL,
            refresh_interval: Duration::ZERO,
            timeout: DEFAULT_TIMEOUT,
            editable: false,
            deletable: false,
            schedulable: false,
        }
    }

    #[must_use]
    pub fn with_policy(
        mut self,
        refresh_interval: Duration,
        cache_ttl: Duration,
        timeout: Duration,
        max_page_size: usize,
    ) -> Self {
        self.refresh_interval = refresh_interval;
        self.cache_ttl = cache_ttl;
        self.timeout = timeout;
        self.max_page_size = max_page_size;
        self
    }

    #[must_use]
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    #[must_use]
    pub fn deletable(mut self) -> Self {
        self.deletable = true;
        self
    }

    #[must_use]
    pub fn schedulable(mut self) -> Self {
        self.schedulable = true;
        self
    }

    #[must_use]
    pub const fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.timeout,
            ttl: self.cache_ttl,
        }
    }

    /// Auto-refresh interval, `None` when disabled
    #[must_use]
    pub fn auto_refresh(&self) -> Option<Duration> {
        (!self.refresh_interval.is_zero()).then_some(self.refresh_interval)
    }
}

/// Decoder for a list of `T` wrapped into [`Item`] by `wrap`.
fn rows_of<T: DeserializeOwned>(value: Value, wrap: fn(T) -> Item) -> Result<Vec<Item>, String> {
    decode_rows::<T>(value).map(|rows| rows.into_iter().map(wrap).collect())
}

/// Entity kind -> spec lookup
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    specs: BTreeMap<EntityKind, EntitySpec>,
}

impl EntityRegistry {
    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in listing type.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for spec in builtin_specs() {
            registry.register(spec);
        }
        registry
    }

    /// Add or replace a registration.
    pub fn register(&mut self, spec: EntitySpec) {
        self.specs.insert(spec.kind, spec);
    }

    pub fn get(&self, kind: EntityKind) -> CoreResult<&EntitySpec> {
        self.specs
            .get(&kind)
            .ok_or_else(|| CoreError::UnknownEntity(kind.to_string()))
    }

    pub fn get_mut(&mut self, kind: EntityKind) -> CoreResult<&mut EntitySpec> {
        self.specs
            .get_mut(&kind)
            .ok_or_else(|| CoreError::UnknownEntity(kind.to_string()))
    }

    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.specs.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn builtin_specs() -> Vec<EntitySpec> {
    const MINUTE: u64 = 60;
    vec![
        EntitySpec::new(
            EntityKind::RunTemplate,
            "Run Templates",
            vec![
                col("ID", 5, "id"),
                col("Name", 25, "name"),
                col("App ID", 8, "app_id"),
                col("Company", 8, "company_id"),
                col("Active", 7, "active"),
                col("Interval", 9, "interv"),
                col("Executor", 15, "executor"),
                col("Next Schedule", 20, "next_schedule"),
            ],
            |v| rows_of(v, Item::RunTemplate),
        )
        .editable()
        .deletable()
        .schedulable(),
        EntitySpec::new(
            EntityKind::Job,
            "Jobs",
            vec![
                col("ID", 6, "id"),
                col("App", 5, "app"),
                col("Command", 28, "command"),
                col("Begin", 20, "begin"),
                col("Exit", 5, "exitcode"),
                col("Executor", 12, "executor"),
                col("Schedule", 20, "schedule"),
            ],
            |v| rows_of(v, Item::Job),
        )
        .with_policy(
            Duration::from_secs(30),
            Duration::from_secs(15),
            Duration::from_secs(15),
            100,
        )
        .editable()
        .deletable(),
        EntitySpec::new(
            EntityKind::Application,
            "Applications",
            vec![
                col("ID", 5, "id"),
                col("Name", 25, "name"),
                col("Enabled", 8, "enabled"),
                col("Version", 10, "version"),
                col("Executable", 25, "executable"),
                col("Description", 40, "description"),
            ],
            |v| rows_of(v, Item::Application),
        )
        .with_policy(
            Duration::from_secs(5 * MINUTE),
            Duration::from_secs(2 * MINUTE),
            DEFAULT_TIMEOUT,
            100,
        )
        .editable()
        .deletable(),
        EntitySpec::new(
            EntityKind::Company,
            "Companies",
            vec![
                col("ID", 5, "id"),
                col("Name", 30, "name"),
                col("Enabled", 8, "enabled"),
                col("IC", 12, "ic"),
                col("Email", 25, "email"),
                col("Slug", 15, "slug"),
            ],
            |v| rows_of(v, Item::Company),
        )
        .with_policy(
            Duration::from_secs(10 * MINUTE),
            Duration::from_secs(5 * MINUTE),
            DEFAULT_TIMEOUT,
            50,
        )
        .editable()
        .deletable(),
        EntitySpec::new(
            EntityKind::Credential,
            "Credentials",
            vec![
                col("ID", 5, "id"),
                col("Name", 30, "name"),
                col("Company ID", 10, "company_id"),
                col("Type ID", 10, "credential_type_id"),
            ],
            |v| rows_of(v, Item::Credential),
        )
        .deletable(),
        EntitySpec::new(
            EntityKind::Token,
            "Tokens",
            vec![col("ID", 5, "id"), col("User", 20, "user"), col("Token", 45, "token")],
            |v| rows_of(v, Item::Token),
        )
        .deletable(),
        EntitySpec::new(
            EntityKind::User,
            "Users",
            vec![
                col("ID", 5, "id"),
                col("Login", 15, "login"),
                col("First Name", 15, "firstname"),
                col("Last Name", 15, "lastname"),
                col("Email", 30, "email"),
            ],
            |v| rows_of(v, Item::User),
        )
        .deletable(),
        EntitySpec::new(
            EntityKind::Artifact,
            "Artifacts",
            vec![col("ID", 6, "id"), col("Job ID", 8, "job_id"), col("File", 50, "file")],
            |v| rows_of(v, Item::Artifact),
        ),
        EntitySpec::new(
            EntityKind::CredType,
            "Credential Types",
            vec![
                col("ID", 5, "id"),
                col("Name", 25, "name"),
                col("Class", 20, "class"),
                col("UUID", 38, "uuid"),
            ],
            |v| rows_of(v, Item::CredType),
        )
        .deletable(),
        EntitySpec::new(
            EntityKind::CompanyApp,
            "Company Applications",
            vec![
                col("ID", 6, "id"),
                col("Company ID", 12, "company_id"),
                col("App ID", 10, "app_id"),
            ],
            |v| rows_of(v, Item::CompanyApp),
        )
        .deletable(),
        EntitySpec::new(
            EntityKind::Queue,
            "Job Queue",
            vec![col("ID", 6, "id"), col("Message", 60, "message")],
            |v| rows_of(v, Item::Queue),
        ),
        EntitySpec::new(
            EntityKind::CrPrototype,
            "Credential Prototypes",
            vec![
                col("ID", 5, "id"),
                col("Name", 25, "name"),
                col("Version", 10, "version"),
                col("Description", 40, "description"),
            ],
            |v| rows_of(v, Item::CrPrototype),
        )
        .with_policy(
            Duration::from_secs(2 * MINUTE),
            Duration::from_secs(MINUTE),
            DEFAULT_TIMEOUT,
            50,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_kind_is_registered() {
        let registry = EntityRegistry::with_defaults();
        assert_eq!(registry.len(), EntityKind::ALL.len());
        for kind in EntityKind::ALL {
            let spec = registry.get(kind).unwrap();
            assert_eq!(spec.kind, kind);
            assert_eq!(spec.page_size, 10);
            assert!(!spec.columns.is_empty());
        }
    }

    #[test]
    fn policy_defaults_follow_entity_type() {
        let registry = EntityRegistry::with_defaults();
        let job = registry.get(EntityKind::Job).unwrap();
        assert_eq!(job.auto_refresh(), Some(Duration::from_secs(30)));
        assert_eq!(job.cache_ttl, Duration::from_secs(15));
        assert_eq!(job.timeout, Duration::from_secs(15));

        let token = registry.get(EntityKind::Token).unwrap();
        assert_eq!(token.auto_refresh(), None);
        assert_eq!(token.cache_ttl, Duration::from_secs(30));
        assert_eq!(token.timeout, Duration::from_secs(10));
    }

    #[test]
    fn capabilities() {
        let registry = EntityRegistry::with_defaults();
        let editable: Vec<_> = registry
            .kinds()
            .filter(|k| registry.get(*k).is_ok_and(|s| s.editable))
            .collect();
        assert_eq!(
            editable,
            vec![
                EntityKind::RunTemplate,
                EntityKind::Job,
                EntityKind::Application,
                EntityKind::Company
            ]
        );
        for kind in [EntityKind::Queue, EntityKind::Artifact, EntityKind::CrPrototype] {
            assert!(!registry.get(kind).unwrap().deletable);
        }
        assert!(registry.get(EntityKind::RunTemplate).unwrap().schedulable);
    }

    #[test]
    fn decoders_produce_matching_items() {
        let registry = EntityRegistry::with_defaults();
        let rows = json!([{"id": 1, "name": "x"}]);
        for kind in EntityKind::ALL {
            let items = (registry.get(kind).unwrap().decode)(rows.clone()).unwrap();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].kind(), kind);
            assert_eq!(items[0].id(), 1);
        }
    }

    #[test]
    fn column_keys_resolve_on_items() {
        let registry = EntityRegistry::with_defaults();
        for kind in EntityKind::ALL {
            let spec = registry.get(kind).unwrap();
            let item = (spec.decode)(json!([{"id": 1}])).unwrap().remove(0);
            for column in &spec.columns {
                assert!(
                    item.value(column.key).is_some(),
                    "{kind}: column {} has no field",
                    column.key
                );
            }
        }
    }

    #[test]
    fn missing_registration_is_unknown_entity() {
        let registry = EntityRegistry::new();
        assert!(matches!(
            registry.get(EntityKind::Job),
            Err(CoreError::UnknownEntity(_))
        ));
    }
}
