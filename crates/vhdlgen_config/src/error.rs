//! Errors raised while reading `vhdlgen.toml`.

/// Why an emit configuration could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read vhdlgen.toml: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not TOML, or its tables do not match the emit settings.
    #[error("malformed vhdlgen.toml: {0}")]
    Parse(String),

    /// `emit.indent` would produce no indentation or absurdly wide output.
    #[error("emit.indent must be between 1 and {max}, got {value}")]
    IndentOutOfRange {
        /// The configured step.
        value: usize,
        /// The largest accepted step.
        max: usize,
    },

    /// A `[preamble]` entry would not print as a legal context clause.
    #[error("preamble {clause} clause '{name}' is not a valid VHDL name")]
    BadContextClause {
        /// `library` or `use`.
        clause: &'static str,
        /// The rejected entry.
        name: String,
    },
}
