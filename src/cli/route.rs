//! CLI route: single route table and run context. Dispatches to the show service and the table store.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{format_view_json, format_view_text};
use crate::config::{ConfigLoader, NetviewConfig};
use crate::dataset::Dataset;
use crate::error::ViewError;
use crate::query::{parse_path, ShowService};
use crate::store::{SledTableStore, TableWriter};
use crate::types::DbId;
use crate::views::NamingMode;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: effective config, table store and show service.
pub struct RunContext {
    config: NetviewConfig,
    store: Arc<SledTableStore>,
    service: ShowService,
}

impl RunContext {
    /// Load config for `dir` (plus an optional explicit file), validate it and open the store.
    pub fn new(
        dir: &Path,
        config_path: Option<&Path>,
        store_override: Option<PathBuf>,
    ) -> Result<Self, ViewError> {
        let mut config = ConfigLoader::load_with(dir, config_path)?;
        if let Some(path) = store_override {
            config.store.path = path;
        }
        Self::from_config(config)
    }

    pub fn from_config(config: NetviewConfig) -> Result<Self, ViewError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ViewError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        let store = Arc::new(SledTableStore::new(&config.store.path)?);
        let service = ShowService::new(store.clone()).with_naming_mode(config.display.naming_mode);
        info!(store = %config.store.path.display(), "Opened table store");

        Ok(Self {
            config,
            store,
            service,
        })
    }

    pub fn config(&self) -> &NetviewConfig {
        &self.config
    }

    pub fn service(&self) -> &ShowService {
        &self.service
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ViewError> {
        match command {
            Commands::Show {
                view,
                format,
                alias,
            } => {
                self.apply_naming(*alias);
                let rendered = self.service.compute(view.path())?;
                match format {
                    OutputFormat::Text => Ok(format_view_text(&rendered)),
                    OutputFormat::Json => format_view_json(&rendered),
                }
            }
            Commands::Get { path, alias } => {
                self.apply_naming(*alias);
                let bytes = self.service.query(&parse_path(path))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Commands::Load { db, file } => {
                let db: DbId = db.parse()?;
                let dataset = Dataset::from_file(file)?;
                let rows = dataset.apply(self.store.as_ref(), db)?;
                self.store.flush()?;
                Ok(format!("Loaded {} rows into {}", rows, db))
            }
            Commands::Flush { db } => {
                let db: DbId = db.parse()?;
                self.store.flush_db(db)?;
                self.store.flush()?;
                Ok(format!("Flushed {}", db))
            }
            Commands::Config => self
                .config
                .to_toml()
                .map_err(|e| ViewError::ConfigError(format!("Failed to render config: {}", e))),
            Commands::Views => Ok(self.service.registry().paths().join("\n")),
        }
    }

    fn apply_naming(&self, alias: bool) {
        let mode = if alias {
            NamingMode::Alias
        } else {
            self.config.display.naming_mode
        };
        self.service.set_naming_mode(mode);
    }
}
