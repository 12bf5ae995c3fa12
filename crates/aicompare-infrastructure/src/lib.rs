pub mod config;
pub mod paths;

pub use config::{ClientConfig, ConfigStorage, ConfigStorageError, load_client_config};
pub use paths::AppPaths;
