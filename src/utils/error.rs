use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Database connection failed: {message}")]
    ConnectionError { message: String },

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Malformed student row #{row}: {message}")]
    RowDecodeError { row: usize, message: String },

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid form field '{field}': {reason}")]
    InvalidFormField { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RegistryError {
    pub fn connection(err: impl std::fmt::Display) -> Self {
        RegistryError::ConnectionError {
            message: err.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RegistryError::InvalidFormField { .. } => ErrorSeverity::Low,
            RegistryError::ConnectionError { .. } | RegistryError::QueryError(_) => {
                ErrorSeverity::Medium
            }
            RegistryError::RowDecodeError { .. } | RegistryError::TemplateError(_) => {
                ErrorSeverity::High
            }
            RegistryError::IoError(_)
            | RegistryError::ConfigError { .. }
            | RegistryError::ConfigValidationError { .. }
            | RegistryError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RegistryError::ConnectionError { .. } => {
                "檢查 database.url 是否正確，以及資料庫檔案是否存在"
            }
            RegistryError::QueryError(_) => {
                "確認 students 資料表存在且包含 name 與 age 欄位"
            }
            RegistryError::RowDecodeError { .. } => {
                "檢查 students 資料表中是否有 NULL 或非文字的 name/age"
            }
            RegistryError::TemplateError(_) => "檢查 templates/registry.html 是否有效",
            RegistryError::IoError(_) => "確認檔案路徑存在且具有讀取權限",
            RegistryError::ConfigError { .. }
            | RegistryError::ConfigValidationError { .. }
            | RegistryError::InvalidConfigValueError { .. } => {
                "修正設定檔或命令列參數後重新啟動"
            }
            RegistryError::InvalidFormField { .. } => {
                "填寫姓名，年齡需為 0 到 150 的整數"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RegistryError::ConnectionError { .. } => format!("無法連線到資料庫: {}", self),
            RegistryError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值錯誤 ({}): {}", field, reason)
            }
            _ => self.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::ConnectionError { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RegistryError::InvalidFormField { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {} (severity: {:?})", self, self.severity());
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
