use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use santa_db::{Database, UserFilter};

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "santa=info,santa_db=info".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("SANTA_DB_PATH").unwrap_or_else(|_| "db".into());

    let db = Database::open(&PathBuf::from(&db_path))
        .with_context(|| format!("opening store at {db_path}"))?;

    report(&db)?;
    Ok(())
}

/// Log what the store currently holds.
fn report(db: &Database) -> anyhow::Result<()> {
    let config = db.get_config()?;
    info!("Confirmation required: {}", config.confirmation_required);

    let users = db.get_all_users(UserFilter::All)?;
    let active = users.iter().filter(|u| u.active).count();
    info!("Users: {} registered, {} confirmed", users.len(), active);

    let deleted = db.get_all_deleted_users()?;
    info!("Deleted users: {}", deleted.len());

    let round = db.get_last_pair_order_id()?;
    if round == 0 {
        info!("No rounds paired yet");
        return Ok(());
    }

    let pairs = db.get_all_pairs(Some(round))?;
    info!("Last round {} has {} pairs", round, pairs.len());
    for pair in &pairs {
        info!("  {} -> {}", pair.nickname1, pair.nickname2);
    }

    Ok(())
}
