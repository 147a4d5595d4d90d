use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::WeftError;
use crate::result::Result;

/// Settings consumed by the engine and the printer
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    #[schemars(description = "Maximum line width before a group breaks")]
    pub line_width: usize,

    #[schemars(description = "Spaces per indentation level")]
    pub indent_width: usize,

    #[schemars(description = "Indent with tabs instead of spaces")]
    pub use_tabs: bool,

    #[schemars(description = "Apply fixes instead of only describing them")]
    pub apply_fixes: bool,

    #[schemars(description = "Maximum number of fix passes over one tree")]
    pub fix_iteration_cap: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Categories to report; all categories when absent")]
    pub enabled_categories: Option<BTreeSet<String>>,

    #[schemars(description = "Maximum nesting depth before a tree is rejected")]
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            line_width: 80,
            indent_width: 2,
            use_tabs: false,
            apply_fixes: false,
            fix_iteration_cap: 10,
            enabled_categories: None,
            max_depth: 512,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.line_width == 0 {
            return Err(WeftError::config_error("lineWidth must be greater than 0"));
        }
        if self.fix_iteration_cap == 0 {
            return Err(WeftError::config_error(
                "fixIterationCap must be greater than 0",
            ));
        }
        Ok(())
    }

    /// JSON schema of the configuration file
    pub fn json_schema() -> Result<serde_json::Value> {
        let schema = schemars::schema_for!(EngineConfig);
        serde_json::to_value(&schema)
            .map_err(|e| WeftError::internal_error(format!("Failed to serialize schema: {e}")))
    }

    pub fn is_category_enabled(&self, category: &str) -> bool {
        self.enabled_categories
            .as_ref()
            .is_none_or(|enabled| enabled.contains(category))
    }
}
