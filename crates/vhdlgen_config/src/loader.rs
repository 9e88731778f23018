//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::EmitConfig;
use std::path::Path;

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "vhdlgen.toml";

/// Largest accepted `emit.indent`.
const MAX_INDENT: usize = 16;

/// Loads and validates `vhdlgen.toml` from a project directory.
///
/// A missing file is not an error: the defaults are returned instead.
pub fn load_config(project_dir: &Path) -> Result<EmitConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(EmitConfig::default());
    }
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `vhdlgen.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<EmitConfig, ConfigError> {
    let config: EmitConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates layout bounds and context clause names.
fn validate_config(config: &EmitConfig) -> Result<(), ConfigError> {
    if config.emit.indent == 0 || config.emit.indent > MAX_INDENT {
        return Err(ConfigError::IndentOutOfRange {
            value: config.emit.indent,
            max: MAX_INDENT,
        });
    }
    for lib in &config.preamble.libraries {
        if lib.trim().is_empty() || lib.contains(char::is_whitespace) {
            return Err(ConfigError::BadContextClause {
                clause: "library",
                name: lib.clone(),
            });
        }
    }
    for name in &config.preamble.uses {
        if name.trim().is_empty() || !name.contains('.') {
            return Err(ConfigError::BadContextClause {
                clause: "use",
                name: name.clone(),
            });
        }
    }
    Ok(())
}
