//! Seed script for development: fills the drama collection with fake entries.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env). `SEED_AMOUNT` sets how many dramas
//! to insert (default 10); `SEED_RESET=true` clears the collection first.

use dramadex::config::AppConfig;
use dramadex::services::seed::{self, SeedRequest};
use dramadex::store::{Collection, PgDocumentStore};
use dramadex::{db, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let db_url = config
        .database_url
        .clone()
        .expect("DATABASE_URL must be set");
    let pool = db::create_pool(&db_url, 5).await?;

    // Run migrations first
    db::run_migrations(&pool).await?;

    let request = SeedRequest {
        amount: std::env::var("SEED_AMOUNT").ok().and_then(|v| v.parse().ok()),
        reset: std::env::var("SEED_RESET").is_ok_and(|v| v == "true"),
    };
    let amount = request.amount()?;
    let reset = request.reset;

    println!("=== Dramadex Seed Script ===");

    let state = AppState::new(Arc::new(PgDocumentStore::new(pool)), config);
    let url = state.collection_url(Collection::Dramas);
    let fields = seed::fake_dramas(&mut rand::thread_rng(), amount);
    let dramas = seed::seed_dramas(state.store.as_ref(), &url, reset, fields).await?;

    if reset {
        println!("[done] Cleared existing dramas");
    }
    for drama in &dramas {
        println!(
            "[done] {} ({}, {} episodes)",
            drama.fields.title, drama.fields.release_year, drama.fields.episodes
        );
    }

    println!("\n=== Seed complete! {} dramas at {url} ===", dramas.len());

    Ok(())
}
