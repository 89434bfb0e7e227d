//! ORBAT Engine - operator entry point.
//!
//! ```text
//! orbat-engine groups
//! orbat-engine group <id>
//! orbat-engine delete-group <id>
//! orbat-engine weapons
//! orbat-engine vehicles
//! orbat-engine nationalities
//! orbat-engine nationality <code>
//! ```

use anyhow::{bail, Context};
use orbat_domain::GroupId;
use orbat_engine::infrastructure::config::AppConfig;
use orbat_engine::App;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Deleted {
    group_id: GroupId,
    deleted: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    let config = AppConfig::from_env()?;

    // Initialize logging
    let filter = match &config.log_filter {
        Some(filter) => tracing_subscriber::EnvFilter::try_new(filter)
            .with_context(|| format!("LOG_FILTER '{filter}' is not a valid filter"))?,
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "orbat_engine=debug,sqlx=warn".into()),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(database = %config.database_url, "Starting ORBAT Engine");

    let app = App::from_config(&config)
        .await
        .context("failed to open roster database")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["groups"] | [] => serde_json::to_string_pretty(&app.use_cases.roster.list_groups().await?)?,
        ["group", id] => {
            let group = app.use_cases.roster.get_group(parse_group_id(id)?).await?;
            serde_json::to_string_pretty(&group)?
        }
        ["delete-group", id] => {
            let group_id = parse_group_id(id)?;
            app.use_cases.roster.delete_group(group_id).await?;
            serde_json::to_string_pretty(&Deleted {
                group_id,
                deleted: true,
            })?
        }
        ["weapons"] => serde_json::to_string_pretty(&app.use_cases.catalog.list_weapons().await?)?,
        ["vehicles"] => {
            serde_json::to_string_pretty(&app.use_cases.catalog.list_vehicles().await?)?
        }
        ["nationalities"] => {
            serde_json::to_string_pretty(&app.use_cases.catalog.list_nationalities().await?)?
        }
        ["nationality", code] => {
            serde_json::to_string_pretty(&app.use_cases.catalog.nationality_usage(code).await?)?
        }
        other => bail!(
            "unknown command {:?}; expected groups | group <id> | delete-group <id> | weapons | vehicles | nationalities | nationality <code>",
            other
        ),
    };

    println!("{output}");
    Ok(())
}

fn parse_group_id(raw: &str) -> anyhow::Result<GroupId> {
    raw.parse()
        .with_context(|| format!("'{raw}' is not a group id"))
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
