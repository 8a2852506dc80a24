use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use student_registry::config::toml_config::LogFormat;
use student_registry::core::{ConfigProvider, StudentStore};
use student_registry::utils::error::ErrorSeverity;
use student_registry::utils::{logger, validation, validation::Validate};
use student_registry::{
    CliConfig, RegistryConfig, RegistryError, RegistryPage, Server, SqliteStudentStore,
};

fn exit_code(e: &RegistryError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: RegistryError) -> ! {
    tracing::error!("❌ {} (severity: {:?})", e, e.severity());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match RegistryConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            fail(e);
        }
    };

    // 初始化日誌
    match config.log_format() {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting student-registry");
    tracing::debug!("Effective config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(e);
    }
    let addr = match validation::validate_socket_addr("server.listen", config.listen_addr()) {
        Ok(addr) => addr,
        Err(e) => fail(e),
    };

    let store = match SqliteStudentStore::new(config.database_url()) {
        Ok(store) => Arc::new(store),
        Err(e) => fail(e),
    };

    if cli.check {
        match store.list_students().await {
            Ok(students) => {
                tracing::info!("✅ Configuration valid, {} students in table", students.len());
                println!("✅ OK ({} students)", students.len());
                return Ok(());
            }
            Err(e) => fail(e),
        }
    }

    let page = RegistryPage::new(store, config.locale());
    Server::new(addr, page)
        .run()
        .await
        .with_context(|| format!("server on {} stopped with an error", addr))?;

    Ok(())
}
