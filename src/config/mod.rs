pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
use crate::core::date::DisplayFormat;
#[cfg(feature = "cli")]
use crate::domain::model::ResourceKind;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fyyur-admin")]
#[command(about = "Date parsing and delete-button tooling for Fyyur admin pages")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Override server.base_url")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Navigate even when the server rejects a delete")]
    pub always_navigate: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse a date string into a UTC point in time
    ParseDate {
        input: String,
        #[arg(long, default_value = "medium", value_parser = parse_display_format)]
        format: DisplayFormat,
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    /// List the delete triggers a page would bind
    Scan {
        #[arg(long)]
        page: String,
    },
    /// Bind a page and click the delete trigger for one record
    Delete {
        #[arg(long)]
        page: String,
        #[arg(long, value_parser = parse_resource_kind)]
        kind: ResourceKind,
        #[arg(long)]
        id: u64,
    },
}

#[cfg(feature = "cli")]
fn parse_display_format(s: &str) -> std::result::Result<DisplayFormat, String> {
    s.parse().map_err(|e: crate::utils::error::AdminError| e.to_string())
}

#[cfg(feature = "cli")]
fn parse_resource_kind(s: &str) -> std::result::Result<ResourceKind, String> {
    s.parse().map_err(|e: crate::utils::error::AdminError| e.to_string())
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔（沒有就用預設值），再套用命令列覆寫
    pub fn load_app_config(&self) -> crate::utils::error::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.server.base_url = base_url.clone();
        }
        if self.always_navigate {
            config.navigation.policy = crate::core::binder::NavigationPolicy::Always;
        }

        Ok(config)
    }
}
