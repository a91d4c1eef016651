pub mod cli;
pub mod settings;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use settings::ImportSettings;

pub const URL_VAR: &str = "VITE_SUPABASE_URL";
pub const KEY_VAR: &str = "VITE_SUPABASE_ANON_KEY";

pub const DEFAULT_INPUT: &str = "projects_rows_upload.xlsx";
pub const DEFAULT_TABLE: &str = "projects";
pub const DEFAULT_ERROR_FILE: &str = "import_errors.json";
pub const DEFAULT_PROGRESS_INTERVAL: usize = 50;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Loads `.env` from the working directory or a parent. Existing variables win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Backend URL and access key as found in the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            base_url: read(URL_VAR),
            api_key: read(KEY_VAR),
        }
    }
}

/// Everything the remote loader needs, fixed for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub timeout_seconds: u64,
}

impl BackendConfig {
    /// Command-line values beat the settings file, which beats the environment.
    pub fn resolve(
        credentials: Credentials,
        settings: &ImportSettings,
        table: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let backend = &settings.backend;
        Self {
            base_url: backend
                .url
                .clone()
                .or(credentials.base_url)
                .unwrap_or_default(),
            api_key: backend
                .api_key
                .clone()
                .or(credentials.api_key)
                .unwrap_or_default(),
            table: table
                .or_else(|| backend.table.clone())
                .unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            timeout_seconds: timeout_seconds
                .or(backend.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Names of credential variables that resolved to nothing.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.base_url.is_empty() {
            missing.push(URL_VAR);
        }
        if self.api_key.is_empty() {
            missing.push(KEY_VAR);
        }
        missing
    }
}

/// Credentials are not checked here; a missing one only earns a warning.
impl Validate for BackendConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("table", &self.table)?;
        validate_range("timeout", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        Ok(())
    }
}

impl ConfigProvider for BackendConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}
