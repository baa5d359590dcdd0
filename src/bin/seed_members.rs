//! Applies the schema and loads sample teams and members into the configured
//! database. Only runs under the `local` profile.

use std::env;

use config::Config;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use dotenvy::dotenv;

use member_search::db::{establish_connection_pool, get_connection};
use member_search::models::config::AppConfig;
use member_search::repository::DieselRepository;
use member_search::services::seed::seed_sample_members;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let app_config = match settings.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {err}");
            std::process::exit(1);
        }
    };

    if !app_config.is_local() {
        log::info!(
            "Profile `{}` is not local, skipping sample data",
            app_config.profile
        );
        return;
    }

    let pool = match establish_connection_pool(&app_config.database) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match get_connection(&pool) {
        Ok(mut conn) => {
            if let Err(e) = conn.run_pending_migrations(MIGRATIONS) {
                log::error!("Failed to run migrations: {e}");
                std::process::exit(1);
            }
        }
        Err(_) => std::process::exit(1),
    }

    let repo = DieselRepository::new(pool);
    match seed_sample_members(&repo, app_config.seed.members) {
        Ok(created) => log::info!("Sample data ready ({created} members created)"),
        Err(e) => {
            log::error!("Failed to seed members: {e}");
            std::process::exit(1);
        }
    }
}
