use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Malformed date input '{input}': {reason}")]
    MalformedDateInput { input: String, reason: String },

    #[error("Element is missing the '{attribute}' attribute")]
    AttributeMissing { attribute: String },

    #[error("Precondition violated: {message}")]
    PreconditionViolation { message: String },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Server rejected DELETE {path} with status {status}")]
    ServerRejected { status: u16, path: String },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 使用者輸入有誤，可直接修正
    Low,
    /// 網路或伺服器問題，可重試
    Medium,
    /// 設定錯誤
    High,
}

impl AdminError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AdminError::MalformedDateInput { .. }
            | AdminError::AttributeMissing { .. }
            | AdminError::PreconditionViolation { .. } => ErrorSeverity::Low,
            AdminError::NetworkFailure(_) | AdminError::ServerRejected { .. } => {
                ErrorSeverity::Medium
            }
            AdminError::InvalidSelector { .. }
            | AdminError::ConfigError { .. }
            | AdminError::InvalidConfigValueError { .. }
            | AdminError::IoError(_)
            | AdminError::SerializationError(_) => ErrorSeverity::High,
        }
    }

    /// 顯示給使用者的訊息（頁面上的 inline 提示）
    pub fn user_friendly_message(&self) -> String {
        match self {
            AdminError::MalformedDateInput { input, .. } => {
                format!("Could not read the date '{}'", input)
            }
            AdminError::AttributeMissing { .. } | AdminError::PreconditionViolation { .. } => {
                "This item cannot be deleted: its identifier is missing or invalid".to_string()
            }
            AdminError::NetworkFailure(_) => {
                "Delete failed: the server could not be reached. Please try again.".to_string()
            }
            AdminError::ServerRejected { status, .. } => {
                format!("Delete failed: the server answered with status {}", status)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
