/// Application configuration, constructed once at startup and handed to
/// whatever needs it. There is no ambient global state; every consumer gets
/// the config (or the connection built from it) passed in explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the backing database.
    pub database_url: String,
}

impl AppConfig {
    /// Loads configuration from the environment, reading `.env` if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://centime.db".to_string());

        Self { database_url }
    }
}
