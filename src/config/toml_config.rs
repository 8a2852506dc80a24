use crate::core::{ConfigProvider, Locale};
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://student_db.sqlite";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub verbose: bool,
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| RegistryError::ConfigError {
                message: format!("Cannot read '{}': {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATABASE_URL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid")
        });

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_socket_addr("server.listen", &self.server.listen)?;
        validation::validate_database_url("database.url", &self.database.url)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn listen_addr(&self) -> &str {
        &self.server.listen
    }

    fn database_url(&self) -> &str {
        &self.database.url
    }

    fn locale(&self) -> Locale {
        self.page.locale
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
