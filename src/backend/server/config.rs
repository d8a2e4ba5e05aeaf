/**
 * Server Configuration
 *
 * Opens the optional PostgreSQL pool named by `AppConfig::database_url`.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. On any
 * failure the function returns `None` and the server runs with in-memory
 * stores.
 */

use sqlx::PgPool;

use crate::shared::AppConfig;

/// Connect to the database and run the embedded migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is connected and migrated
/// - `None` if `database_url` is unset, the connection fails or the
///   migrations fail
pub async fn load_database(config: &AppConfig) -> Option<PgPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using in-memory stores.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory stores.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        tracing::warn!("Falling back to in-memory stores.");
        return None;
    }

    tracing::info!("Database ready");
    Some(pool)
}
