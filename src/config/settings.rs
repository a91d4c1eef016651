use crate::adapters::table::SUPPORTED_EXTENSIONS;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    pub backend: BackendSettings,
    pub import: RunSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub input: Option<String>,
    pub error_file: Option<String>,
    pub progress_interval: Option<usize>,
}

impl ImportSettings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().is_file() {
            return Err(ImportError::MissingConfigError {
                field: format!("settings file '{}'", path.as_ref().display()),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(ImportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let re = placeholder_regex()?;
        let processed_content = Self::substitute_env_vars(&re, content);

        let mut settings: Self =
            toml::from_str(&processed_content).map_err(|e| ImportError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        settings.clear_unresolved(&re);
        Ok(settings)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_optional(path: Option<&str>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                tracing::info!("Loading settings from: {}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// 替換環境變數 (例如 ${VITE_SUPABASE_ANON_KEY})，未設定的保持原樣
    fn substitute_env_vars(re: &Regex, content: &str) -> String {
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::debug!("{} is not set; leaving placeholder unresolved", var_name);
                format!("${{{}}}", var_name)
            })
        })
        .to_string()
    }

    /// Values still holding a `${VAR}` placeholder count as unset, so the
    /// environment fallback and the missing-credential warning still apply.
    fn clear_unresolved(&mut self, re: &Regex) {
        let fields = [
            &mut self.backend.url,
            &mut self.backend.api_key,
            &mut self.backend.table,
            &mut self.import.input,
            &mut self.import.error_file,
        ];
        for field in fields {
            if field.as_deref().is_some_and(|v| re.is_match(v)) {
                *field = None;
            }
        }
    }
}

fn placeholder_regex() -> Result<Regex> {
    Regex::new(r"\$\{([^}]+)\}").map_err(|e| ImportError::ConfigError {
        message: e.to_string(),
    })
}

impl Validate for ImportSettings {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.backend.url {
            validate_url("backend.url", url)?;
        }
        if let Some(table) = &self.backend.table {
            validate_non_empty_string("backend.table", table)?;
        }
        if let Some(timeout) = self.backend.timeout_seconds {
            validate_range(
                "backend.timeout_seconds",
                timeout,
                1,
                super::MAX_TIMEOUT_SECONDS,
            )?;
        }
        if let Some(input) = &self.import.input {
            validate_path("import.input", input)?;
            validate_file_extension("import.input", input, SUPPORTED_EXTENSIONS)?;
        }
        if let Some(error_file) = &self.import.error_file {
            validate_path("import.error_file", error_file)?;
        }
        if let Some(interval) = self.import.progress_interval {
            validate_positive_number("import.progress_interval", interval, 1)?;
        }
        Ok(())
    }
}
