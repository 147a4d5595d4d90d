//! Engine configuration
//!
//! Configuration is read from `weft.yaml`, `weft.yml`, `weft.json` or
//! `weft.toml`, discovered by walking up from the working directory.
//!
//! ## Example Configuration (weft.yaml)
//!
//! ```yaml
//! lineWidth: 100
//! indentWidth: 2
//! applyFixes: true
//! fixIterationCap: 10
//! enabledCategories:
//!   - HTML_PREFER_SELF_CLOSING
//!   - AST_ADD_SELF_CLOSING
//! ```

mod engine_config;
mod loader;

pub use engine_config::EngineConfig;
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
