//! Configuration types deserialized from `vhdlgen.toml`.

use serde::Deserialize;

/// Default number of columns per nesting level.
pub const DEFAULT_INDENT: usize = 2;

/// The top-level emission configuration.
///
/// Every section is optional; an empty file yields [`EmitConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmitConfig {
    /// Layout settings.
    #[serde(default)]
    pub emit: LayoutConfig,
    /// Context clauses printed before every entity.
    #[serde(default)]
    pub preamble: PreambleConfig,
}

impl EmitConfig {
    /// Returns the number of columns added per nesting level.
    pub fn indent(&self) -> usize {
        self.emit.indent
    }
}

/// Text layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutConfig {
    /// Columns added per nesting level.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

/// The `library`/`use` context clauses emitted ahead of each design unit.
///
/// Nearly every translated design touches `std_logic` and the numeric
/// packages, so the defaults import them unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreambleConfig {
    /// Library names, one `library <name>;` clause each.
    #[serde(default = "default_libraries")]
    pub libraries: Vec<String>,
    /// Selected names, one `use <name>;` clause each.
    #[serde(default = "default_uses")]
    pub uses: Vec<String>,
}

impl Default for PreambleConfig {
    fn default() -> Self {
        Self {
            libraries: default_libraries(),
            uses: default_uses(),
        }
    }
}

impl PreambleConfig {
    /// Returns `true` if no context clause would be printed.
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty() && self.uses.is_empty()
    }
}

fn default_libraries() -> Vec<String> {
    vec!["ieee".to_string()]
}

fn default_uses() -> Vec<String> {
    vec![
        "ieee.std_logic_1164.all".to_string(),
        "ieee.numeric_std.all".to_string(),
        "std.textio.all".to_string(),
    ]
}
