pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::browser::{LoggingBrowser, RecordingBrowser};
pub use adapters::{dom::Page, http::HttpTransport};
pub use config::AppConfig;
pub use crate::core::admin::{AdminPage, BindSummary};
pub use crate::core::binder::{BindingConfig, ClickOutcome, DeleteBinder, NavigationPolicy};
pub use crate::core::date::{format_date_string, parse_point_in_time, DisplayFormat};
pub use domain::model::{ElementHandle, PointInTime, ResourceId, ResourceKind};
pub use utils::error::{AdminError, Result};
