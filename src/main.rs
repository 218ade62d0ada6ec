use tracing::{error, info};

use bulletin::{ensure_admin, Config, Database, UserRepository};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = bulletin::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        bulletin::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    info!("Bulletin board core");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_admin(&db, &config.admin).await {
        error!("Failed to create admin account: {e}");
        std::process::exit(1);
    }

    let users = match db.acquire().await {
        Ok(mut conn) => UserRepository::new(&mut conn).count(None).await.unwrap_or(0),
        Err(_) => 0,
    };
    info!(
        database = %config.database.path,
        users,
        gold_threshold = config.grade.gold_threshold,
        red_threshold = config.grade.red_threshold,
        "Database ready"
    );
}
