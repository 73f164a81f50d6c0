//! Configuration — typed schema + JSON loader with env overrides.

pub mod loader;
pub mod schema;

pub use loader::{get_config_path, load_config, save_config};
pub use schema::{Config, LoopDefaults, ProviderConfig, ProvidersConfig};
