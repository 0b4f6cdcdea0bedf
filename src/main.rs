// Entrypoint for the CLI application.
// - Keeps `main` small: load config, connect, hand the store to the UI loop.
// - A config or connection failure exits non-zero; Exit from the menu is 0.

use anyhow::Context;
use staffsync::{config::Config, db::Store, ui::main_menu};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // A missing `.env` is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staffsync=warn,sqlx=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let store = Store::connect(&config)
        .await
        .with_context(|| format!("Failed to connect to {}:{}", config.host, config.port))?;

    // Blocks until the user exits. The store is closed either way.
    let outcome = main_menu(&store).await;
    store.close().await;
    outcome
}
