use crate::core::binder::{BindingConfig, NavigationPolicy};
use crate::domain::model::ResourceKind;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default = "default_bindings")]
    pub bindings: Vec<BindingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub policy: NavigationPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            navigation: NavigationConfig::default(),
            bindings: default_bindings(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_bindings() -> Vec<BindingConfig> {
    ResourceKind::ALL
        .iter()
        .map(|kind| BindingConfig::for_kind(*kind))
        .collect()
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdminError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FYYUR_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdminError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn binding_for(&self, kind: ResourceKind) -> Option<&BindingConfig> {
        self.bindings.iter().find(|b| b.kind == kind)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("server.base_url", &self.server.base_url)?;

        if let Some(timeout) = self.server.timeout_seconds {
            validation::validate_range("server.timeout_seconds", timeout, 1, 600)?;
        }

        if self.bindings.is_empty() {
            return Err(AdminError::ConfigError {
                message: "At least one [[bindings]] entry is required".to_string(),
            });
        }

        for (i, binding) in self.bindings.iter().enumerate() {
            validation::validate_non_empty_string(
                &format!("bindings[{}].selector", i),
                &binding.selector,
            )?;
            validation::validate_site_path(
                &format!("bindings[{}].endpoint_prefix", i),
                &binding.endpoint_prefix,
            )?;
            validation::validate_site_path(
                &format!("bindings[{}].redirect_path", i),
                &binding.redirect_path,
            )?;

            if self.bindings[..i].iter().any(|b| b.kind == binding.kind) {
                return Err(AdminError::InvalidConfigValueError {
                    field: format!("bindings[{}].kind", i),
                    value: binding.kind.to_string(),
                    reason: "Each resource kind can only be bound once".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.server.base_url
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.server.timeout_seconds
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
