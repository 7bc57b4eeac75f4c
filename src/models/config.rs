//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::domain::session::{SessionUser, UserMetadata};

#[derive(Clone, Debug, Deserialize)]
/// Settings for the dashboard engine and its binary.
pub struct DeskConfig {
    pub api_base_url: String,
    /// Display name for the greeting when no identity session is available.
    #[serde(default)]
    pub user_name: Option<String>,
}

impl DeskConfig {
    /// Identity built from the configured display name.
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            email: None,
            user_metadata: Some(UserMetadata {
                nombre: self.user_name.clone(),
            }),
        }
    }
}

/// Loads `default.yaml` from `dir`, then the optional `{app_env}.yaml`
/// overrides, then `APP_`-prefixed environment variables.
pub fn load_config(dir: &Path, app_env: &str) -> Result<DeskConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(config::File::with_name(&dir.join("default").to_string_lossy()))
        .add_source(config::File::with_name(&dir.join(app_env).to_string_lossy()).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?;
    settings.try_deserialize::<DeskConfig>()
}
