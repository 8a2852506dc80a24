pub mod toml_config;

use crate::core::{ConfigProvider, Locale};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;
use toml_config::{LogFormat, TomlConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "student-registry")]
#[command(about = "Student registry page backed by a SQLite students table")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address, overrides [server] listen
    #[arg(long)]
    pub listen: Option<String>,

    /// SQLite URL, overrides [database] url
    #[arg(long)]
    pub database_url: Option<String>,

    /// Page language, overrides [page] locale
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Validate the configuration, probe the database once and exit
    #[arg(long)]
    pub check: bool,
}

/// Effective settings after applying CLI overrides on top of the file.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub file: TomlConfig,
    pub verbose: bool,
}

impl RegistryConfig {
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut file = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        // 命令列參數優先於設定檔
        if let Some(listen) = &cli.listen {
            file.server.listen = listen.clone();
        }
        if let Some(url) = &cli.database_url {
            file.database.url = url.clone();
        }
        if let Some(locale) = cli.locale {
            file.page.locale = locale;
        }

        let verbose = cli.verbose || file.logging.verbose;
        Ok(Self { file, verbose })
    }

    pub fn log_format(&self) -> LogFormat {
        self.file.logging.format
    }
}

impl ConfigProvider for RegistryConfig {
    fn listen_addr(&self) -> &str {
        self.file.listen_addr()
    }

    fn database_url(&self) -> &str {
        self.file.database_url()
    }

    fn locale(&self) -> Locale {
        self.file.locale()
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        self.file.validate()
    }
}
