//! Dashboard configuration
//!
//! Loaded from a JSON file; every field is optional. Per-entity overrides
//! are layered on top of the [`EntityRegistry`] defaults.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fetcher::{DEFAULT_CACHE_TTL, DEFAULT_FORMAT, DEFAULT_ORDER, DEFAULT_TIMEOUT};
use crate::registry::EntityRegistry;
use crate::source::DEFAULT_PROGRAM;
use crate::types::EntityKind;

/// Environment variable replacing `cli_program`
pub const CLI_PROGRAM_ENV: &str = "MULTIFLEXI_CLI";

/// Per-entity policy override
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntityOverride {
    pub page_size: Option<usize>,
    pub cache_ttl_secs: Option<u64>,
    /// 0 disables auto-refresh
    pub refresh_interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cli_program: String,
    /// Arguments inserted before every request
    pub cli_args: Vec<String>,
    /// Deadline of calls without a specific policy (status, help, actions, ...)
    pub default_timeout_secs: u64,
    pub default_cache_ttl_secs: u64,
    /// `A` ascending or `D` descending (newest first)
    pub order: String,
    pub format: String,
    pub mouse: bool,
    /// Nouns warmed by a batch fetch at startup
    pub prefetch: Vec<String>,
    pub entities: BTreeMap<String, EntityOverride>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cli_program: DEFAULT_PROGRAM.to_string(),
            cli_args: Vec::new(),
            default_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            default_cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            order: DEFAULT_ORDER.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            mouse: true,
            prefetch: vec!["job".to_string(), "runtemplate".to_string()],
            entities: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> CoreResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text).map_err(|e| match e {
                CoreError::Config(msg) => CoreError::Config(format!("{}: {msg}", path.display())),
                other => other,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(CoreError::Config(format!(
                "Cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Apply environment overrides read through `lookup`.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(program) = lookup(CLI_PROGRAM_ENV).filter(|p| !p.trim().is_empty()) {
            self.cli_program = program.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.cli_program.trim().is_empty() {
            return Err(CoreError::Config("cli_program must not be empty".to_string()));
        }
        if self.default_timeout_secs == 0 {
            return Err(CoreError::Config(
                "default_timeout_secs must be positive".to_string(),
            ));
        }
        if !matches!(self.order.as_str(), "A" | "D") {
            return Err(CoreError::Config(format!(
                "order must be \"A\" or \"D\", got {:?}",
                self.order
            )));
        }
        for noun in self.prefetch.iter().chain(self.entities.keys()) {
            noun.parse::<EntityKind>()
                .map_err(|_| CoreError::Config(format!("Unknown entity type: {noun}")))?;
        }
        for (noun, entity) in &self.entities {
            if entity.page_size == Some(0) || entity.timeout_secs == Some(0) {
                return Err(CoreError::Config(format!(
                    "{noun}: page_size and timeout_secs must be positive"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    /// Layer the configured policy over `registry`.
    ///
    /// Global defaults replace the built-in defaults only where an entity has
    /// no policy of its own; per-entity overrides always win. Page sizes are
    /// clamped to the entity maximum.
    pub fn apply_to(&self, registry: &mut EntityRegistry) -> CoreResult<()> {
        let timeout = self.default_timeout();
        let ttl = Duration::from_secs(self.default_cache_ttl_secs);
        let kinds: Vec<EntityKind> = registry.kinds().collect();

        for kind in kinds {
            let spec = registry.get_mut(kind)?;
            if spec.timeout == DEFAULT_TIMEOUT {
                spec.timeout = timeout;
            }
            if spec.cache_ttl == DEFAULT_CACHE_TTL {
                spec.cache_ttl = ttl;
            }

            let Some(entity) = self.entities.get(kind.noun()) else {
                continue;
            };
            if let Some(page_size) = entity.page_size {
                spec.page_size = page_size.clamp(1, spec.max_page_size);
            }
            if let Some(secs) = entity.cache_ttl_secs {
                spec.cache_ttl = Duration::from_secs(secs);
            }
            if let Some(secs) = entity.refresh_interval_secs {
                spec.refresh_interval = Duration::from_secs(secs);
            }
            if let Some(secs) = entity.timeout_secs {
                spec.timeout = Duration::from_secs(secs);
            }
            log::debug!("Applied config override to {kind}: {entity:?}");
        }
        Ok(())
    }

    /// Prefetch nouns as kinds, in configured order.
    pub fn prefetch_kinds(&self) -> CoreResult<Vec<EntityKind>> {
        self.prefetch.iter().map(|noun| noun.parse()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.cli_program, "multiflexi-cli");
        assert_eq!(
            config.prefetch_kinds().unwrap(),
            vec![EntityKind::Job, EntityKind::RunTemplate]
        );
    }

    #[test]
    fn rejects_unknown_nouns_and_bad_order() {
        assert!(matches!(
            AppConfig::from_json(r#"{"prefetch":["invoice"]}"#),
            Err(CoreError::Config(_))
        ));
        assert!(AppConfig::from_json(r#"{"entities":{"invoice":{}}}"#).is_err());
        assert!(AppConfig::from_json(r#"{"order":"X"}"#).is_err());
        assert!(AppConfig::from_json(r#"{"entities":{"job":{"page_size":0}}}"#).is_err());
        assert!(AppConfig::from_json("{").is_err());
    }

    #[test]
    fn env_overrides_program() {
        let config = AppConfig::default().with_env(|key| {
            (key == CLI_PROGRAM_ENV).then(|| "/opt/multiflexi/bin/cli".to_string())
        });
        assert_eq!(config.cli_program, "/opt/multiflexi/bin/cli");

        let unchanged = AppConfig::default().with_env(|_| Some("  ".to_string()));
        assert_eq!(unchanged.cli_program, "multiflexi-cli");
    }

    #[test]
    fn overrides_layer_over_registry() {
        let config = AppConfig::from_json(
            r#"{
                "default_timeout_secs": 20,
                "entities": {
                    "job": {"page_size": 500, "refresh_interval_secs": 0},
                    "token": {"cache_ttl_secs": 5}
                }
            }"#,
        )
        .unwrap();
        let mut registry = EntityRegistry::with_defaults();
        config.apply_to(&mut registry).unwrap();

        let job = registry.get(EntityKind::Job).unwrap();
        assert_eq!(job.page_size, 100);
        assert_eq!(job.auto_refresh(), None);
        // job carries its own timeout
        assert_eq!(job.timeout, Duration::from_secs(15));

        let token = registry.get(EntityKind::Token).unwrap();
        assert_eq!(token.cache_ttl, Duration::from_secs(5));
        assert_eq!(token.timeout, Duration::from_secs(20));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_reports_path_on_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mouse": "yes"}}"#).unwrap();
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
