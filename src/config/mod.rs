/// Local database connection and table creation
pub mod database;

/// Application settings loading from config.toml and the environment
pub mod settings;

pub use settings::{AppConfig, NotificationConfig, RemoteConfig, StorageConfig};
