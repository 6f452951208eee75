use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::ServiceError;
use crate::store::{CsvStore, MemoryStore, RecordStore};

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const CONFIG_FILE_NAME: &str = "patient-visits.toml";
pub const ENV_PREFIX: &str = "PATIENT_VISITS_";

/// Service configuration. Every field is optional; unset fields fall through
/// to the next source and finally to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub bind: Option<String>,
    /// CSV file backing the record store. Unset means the bundled sample.
    pub data_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_retention: Option<usize>,
    /// A log4rs YAML file; when set it replaces the programmatic log setup.
    pub log_config: Option<PathBuf>,
    pub slow_query_ms: Option<u64>,
}

impl AppConfig {
    /// # Errors
    /// Returns an error if the text is not valid TOML for this structure.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ServiceError> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&s)
            .map_err(|e| ServiceError::Config(format!("{}: {e}", path.display())))
    }

    /// Load from the process environment and working directory.
    ///
    /// # Errors
    /// Returns an error if an explicit config file is missing or any found file is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ServiceError> {
        let cwd = std::env::current_dir().ok();
        Self::load_with(explicit, cwd.as_deref(), |k| std::env::var(k).ok())
    }

    /// Precedence: explicit file > `PATIENT_VISITS_CONFIG` file > `./patient-visits.toml`
    /// > environment variables > defaults. CLI flags are applied by the caller on top.
    ///
    /// # Errors
    /// Returns an error if an explicit config file is missing or any found file is invalid.
    pub fn load_with(
        explicit: Option<&Path>,
        cwd: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ServiceError> {
        let mut cfg = Self::default();
        if let Some(p) = explicit {
            if !p.exists() {
                return Err(ServiceError::Config(format!("config file not found: {}", p.display())));
            }
            cfg.fill_from(Self::from_file(p)?);
        }
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(p) = env(&format!("{ENV_PREFIX}CONFIG")) {
            candidates.push(PathBuf::from(p));
        }
        if let Some(dir) = cwd {
            candidates.push(dir.join(CONFIG_FILE_NAME));
        }
        for p in candidates {
            if p.exists() {
                log::debug!("reading config from {}", p.display());
                cfg.fill_from(Self::from_file(&p)?);
            }
        }
        cfg.fill_from(Self::from_env(&env)?);
        Ok(cfg)
    }

    fn from_env(env: &impl Fn(&str) -> Option<String>) -> Result<Self, ServiceError> {
        let var = |name: &str| env(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.is_empty());
        let parse_num = |name: &str| -> Result<Option<u64>, ServiceError> {
            var(name)
                .map(|v| {
                    v.parse::<u64>().map_err(|_| {
                        ServiceError::Config(format!("{ENV_PREFIX}{name} must be a number, got {v:?}"))
                    })
                })
                .transpose()
        };
        Ok(Self {
            bind: var("BIND"),
            data_file: var("DATA").map(PathBuf::from),
            log_dir: var("LOG_DIR").map(PathBuf::from),
            log_level: var("LOG_LEVEL"),
            log_retention: parse_num("LOG_RETENTION")?
                .map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
            log_config: var("LOG_CONFIG").map(PathBuf::from),
            slow_query_ms: parse_num("SLOW_QUERY_MS")?,
        })
    }

    /// Fill fields that are still unset from `other`.
    pub fn fill_from(&mut self, other: Self) {
        if self.bind.is_none() { self.bind = other.bind; }
        if self.data_file.is_none() { self.data_file = other.data_file; }
        if self.log_dir.is_none() { self.log_dir = other.log_dir; }
        if self.log_level.is_none() { self.log_level = other.log_level; }
        if self.log_retention.is_none() { self.log_retention = other.log_retention; }
        if self.log_config.is_none() { self.log_config = other.log_config; }
        if self.slow_query_ms.is_none() { self.slow_query_ms = other.slow_query_ms; }
    }

    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    /// Open the configured record store.
    ///
    /// # Errors
    /// Returns an error if the data file does not exist or the sample fails to load.
    pub fn open_store(&self) -> Result<Arc<dyn RecordStore>, ServiceError> {
        let store: Arc<dyn RecordStore> = match &self.data_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ServiceError::Store(format!("data file not found: {}", path.display())));
                }
                Arc::new(CsvStore::new(path))
            }
            None => Arc::new(MemoryStore::sample()?),
        };
        log::info!("record store: {}", store.describe());
        Ok(store)
    }
}
