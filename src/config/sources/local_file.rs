//! Local config file source: netview.toml and netview.{NETVIEW_PROFILE}.toml in the working directory

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

pub const LOCAL_CONFIG_FILE: &str = "netview.toml";

/// Add local config files to builder.
/// Precedence: netview.toml (base) then netview.{NETVIEW_PROFILE}.toml (profile-specific).
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = dir.join(LOCAL_CONFIG_FILE);
    if base_config_path.exists() {
        builder = builder.add_source(File::from(base_config_path.as_path()).required(false));
    }

    if let Ok(profile) = std::env::var("NETVIEW_PROFILE") {
        let profile_config_path = dir.join(format!("netview.{}.toml", profile));
        if profile_config_path.exists() {
            builder =
                builder.add_source(File::from(profile_config_path.as_path()).required(false));
        }
    }

    Ok(builder)
}
