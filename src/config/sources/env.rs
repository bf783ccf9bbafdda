//! Environment source: NETVIEW_STORE__PATH, NETVIEW_DISPLAY__NAMING_MODE, ...

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Nested keys are separated by a double underscore.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("NETVIEW")
            .prefix_separator("_")
            .separator("__"),
    )
}
