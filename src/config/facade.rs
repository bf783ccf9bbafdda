//! Config loader facade: assembles sources in precedence order.

use super::merge::merge_policy;
use super::sources::{env, global_file, local_file};
use super::NetviewConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a working directory.
    ///
    /// Precedence, lowest first: defaults, global file, `<dir>/netview.toml`,
    /// `NETVIEW_*` environment variables.
    pub fn load(dir: &Path) -> Result<NetviewConfig, ConfigError> {
        Self::load_with(dir, None)
    }

    /// Like [`ConfigLoader::load`], with an explicit file layered above the
    /// local file and below the environment. The explicit file must exist.
    pub fn load_with(dir: &Path, explicit: Option<&Path>) -> Result<NetviewConfig, ConfigError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        builder = local_file::add_to_builder(builder, dir)?;
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = env::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load a single file over the defaults, ignoring every other source.
    pub fn load_from_file(path: &Path) -> Result<NetviewConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
