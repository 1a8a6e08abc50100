use std::env;
use std::sync::Arc;
use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::postgres::PgPoolOptions;
use teloxide::prelude::*;
use tracing::info;

use pantry_bot::constants::MAINTENANCE_SECRET_LEN;
use pantry_bot::handler;
use pantry_bot::jobs::{ExpirySweepJob, JobScheduler, RetentionPurgeJob};
use pantry_bot::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let token =
        env::var("TELEGRAM_BOT_TOKEN").expect("Expected TELEGRAM_BOT_TOKEN in the environment.");
    let database_url = env::var("DATABASE_URL").expect("Expected DATABASE_URL in the environment.");

    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(&database_url)
        .await
        .expect("Error connecting to the database.");
    info!("Database connection OK");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Error applying database migrations.");
    info!("Database migrated");

    let maintenance_secret: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(MAINTENANCE_SECRET_LEN)
        .map(char::from)
        .collect();
    info!(secret = %maintenance_secret, "Maintenance secret for /notifyexpired and /purgewithdrawn");

    let bot = Bot::new(token);
    let state = Arc::new(AppState {
        db: pool.clone(),
        maintenance_secret,
    });

    let mut scheduler = JobScheduler::new();
    scheduler.register(ExpirySweepJob::new(pool.clone(), bot.clone()));
    scheduler.register(RetentionPurgeJob::new(pool));
    scheduler.start();

    let tree = dptree::entry()
        .branch(Update::filter_message().endpoint(handler::handle_message))
        .branch(Update::filter_callback_query().endpoint(handler::handle_callback));

    info!("Starting long polling");
    Dispatcher::builder(bot, tree)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(5)).await;
}
