//! Diagnostic entry point: opens the garden database and prints everything it holds,
//! including activities whose crop no longer exists.

use chrono::Local;
use dotenvy::dotenv;
use home_garden::{
    config::{app, database, links},
    core::{
        model::DisplayColor,
        persistence::SeaOrmAdapter,
        report::{
            format_debug_report, format_harvest_summary, format_japanese_date,
            format_japanese_month,
        },
        store::EntityStore,
    },
    errors::Result,
};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal
    dotenv().ok();

    // 3. Configuration
    let config = app::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Database
    ensure_sqlite_dir(&config.database_url)?;
    let db = database::create_connection(&config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Load and report
    let store = EntityStore::open(SeaOrmAdapter::new(db)).await?;
    let snapshot = store.snapshot();
    let orphans = store.orphaned_activities();
    if !orphans.is_empty() {
        warn!("{} orphaned activity record(s) found", orphans.len());
    }

    println!("{}", format_debug_report(&snapshot));
    println!("== Harvest totals ==");
    print!("{}", format_harvest_summary(&snapshot, &config.display));

    let today = Local::now().date_naive();
    println!("== {} ==", format_japanese_month(today));
    for cell in snapshot.month_view(today, &config.display) {
        if let (Some(day), false) = (cell.cell.date(), cell.colors.is_empty()) {
            let colors: Vec<&str> = cell.colors.iter().map(DisplayColor::hex).collect();
            println!("{} {}", format_japanese_date(day), colors.join(" "));
        }
    }

    for key in [links::QA, links::CONTACT] {
        match config.resolve_link(key) {
            Some(url) => println!("{key}: {url}"),
            None => println!("{key}: (not configured)"),
        }
    }

    Ok(())
}

/// Creates the directory holding a file-backed `SQLite` database.
fn ensure_sqlite_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = rest.split('?').next().unwrap_or(rest);
    if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
