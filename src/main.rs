use clap::Parser;
use fyyur_admin::utils::error::ErrorSeverity;
use fyyur_admin::utils::{logger, validation::Validate};
use fyyur_admin::{
    parse_point_in_time, AdminError, AdminPage, AppConfig, CliConfig, ClickOutcome, Command,
    HttpTransport, LoggingBrowser, Page, ResourceId, ResourceKind,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<(), AdminError> {
    match &cli.command {
        Command::ParseDate {
            input,
            format,
            json,
        } => {
            let point = parse_point_in_time(input)?;
            if *json {
                let body = serde_json::json!({
                    "input": input,
                    "utc": point,
                    "display": point.format(*format),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", point);
                println!("{}", point.format(*format));
            }
            Ok(())
        }
        Command::Scan { page } => {
            let config = load_config(&cli)?;
            let page = Page::from_file(page)?;
            for binding in &config.bindings {
                let triggers = page.query_all(&binding.selector)?;
                println!("{} ({}): {} trigger(s)", binding.kind, binding.selector, triggers.len());
                for trigger in triggers {
                    match ResourceId::from_element(&trigger) {
                        Ok(id) => println!("  <{}> DELETE {}", trigger.tag, binding.request_path(id)),
                        Err(e) => println!("  <{}> ⚠️  {}", trigger.tag, e),
                    }
                }
            }
            Ok(())
        }
        Command::Delete { page, kind, id } => {
            let config = load_config(&cli)?;
            delete(&config, page, *kind, ResourceId::new(*id)).await
        }
    }
}

fn load_config(cli: &CliConfig) -> Result<AppConfig, AdminError> {
    let config = cli.load_app_config()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }
    Ok(config)
}

async fn delete(
    config: &AppConfig,
    page_path: &str,
    kind: ResourceKind,
    id: ResourceId,
) -> Result<(), AdminError> {
    let page = Page::from_file(page_path)?;
    let transport = HttpTransport::from_config(config)?;
    let mut admin = AdminPage::new(transport, LoggingBrowser, config);
    admin.bind(&page)?;

    let Some(trigger) = admin.find_trigger(&page, kind, id)? else {
        return Err(AdminError::PreconditionViolation {
            message: format!("No {} delete trigger with id {} on {}", kind, id, page_path),
        });
    };

    match admin.click(&trigger).await? {
        ClickOutcome::Deleted {
            status,
            redirected_to,
            ..
        } => {
            println!("✅ Deleted {} {} (HTTP {})", kind, id, status);
            println!("➡️  {}", redirected_to);
        }
        ClickOutcome::Unbound => {
            println!("⚠️  Trigger for {} {} is not bound, nothing sent", kind, id);
        }
    }
    Ok(())
}
