//! Text emission with level-based indentation.
//!
//! Every node implements [`Emit`]. A node is emitted with the cursor
//! already positioned where it starts; it writes its own text and any line
//! breaks it needs, leaving the cursor at the end of its last line. The
//! `level` argument is the column of the node's first line and nested
//! content goes to [`Emitter::indent`] of it.

use std::fmt;

use vhdlgen_config::EmitConfig;

/// A text sink that knows the configured indentation step.
pub struct Emitter<'c, W: fmt::Write> {
    out: W,
    config: &'c EmitConfig,
}

impl<'c, W: fmt::Write> Emitter<'c, W> {
    /// Creates an emitter writing to `out`.
    pub fn new(out: W, config: &'c EmitConfig) -> Self {
        Self { out, config }
    }

    /// Returns the configuration this emitter was created with.
    pub fn config(&self) -> &'c EmitConfig {
        self.config
    }

    /// Consumes the emitter and returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Returns the level one step deeper than `level`.
    pub fn indent(&self, level: usize) -> usize {
        level + self.config.indent()
    }

    /// Ends the current line and moves to column `level`.
    pub fn newline(&mut self, level: usize) -> fmt::Result {
        self.out.write_char('\n')?;
        self.pad(level)
    }

    /// Ends the current line, leaves one empty line, and moves to column `level`.
    pub fn blank_line(&mut self, level: usize) -> fmt::Result {
        self.out.write_char('\n')?;
        self.newline(level)
    }

    /// Writes `n` spaces.
    pub fn pad(&mut self, n: usize) -> fmt::Result {
        for _ in 0..n {
            self.out.write_char(' ')?;
        }
        Ok(())
    }

    /// Writes an element comment, one `--` line per line of `comment`.
    ///
    /// A block comment goes on its own lines before the element. An
    /// end-of-line comment puts its first line after the element's
    /// terminator and any further lines below it at `level`.
    pub fn comment(&mut self, comment: Option<&str>, level: usize, end_of_line: bool) -> fmt::Result {
        let Some(text) = comment else {
            return Ok(());
        };
        if end_of_line {
            self.out.write_str("  ")?;
        }
        // "".lines() yields nothing, but an empty comment still gets its marker
        let lines: Vec<&str> = if text.is_empty() {
            vec![""]
        } else {
            text.lines().collect()
        };
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                self.newline(level)?;
            }
            write!(self.out, "-- {line}")?;
        }
        if !end_of_line {
            self.newline(level)?;
        }
        Ok(())
    }

    /// Writes `text` as a VHDL string literal body in double quotes,
    /// doubling every embedded `"`.
    pub fn quoted(&mut self, text: &str) -> fmt::Result {
        self.out.write_char('"')?;
        for (i, part) in text.split('"').enumerate() {
            if i > 0 {
                self.out.write_str("\"\"")?;
            }
            self.out.write_str(part)?;
        }
        self.out.write_char('"')
    }

    /// Emits each child on its own line one level deeper, separated by
    /// `delim`, then returns to column `level`.
    ///
    /// With no children only the line break is written, so an empty list
    /// leaves no syntax behind.
    pub fn children<T: Emit>(&mut self, children: &[T], level: usize, delim: &str) -> fmt::Result {
        let inner = self.indent(level);
        for (i, child) in children.iter().enumerate() {
            self.newline(inner)?;
            child.emit(self, inner)?;
            if i + 1 < children.len() {
                self.out.write_str(delim)?;
            }
        }
        self.newline(level)
    }

    /// Emits `items` inline separated by `", "`.
    pub fn comma_list<T: Emit>(&mut self, items: &[T], level: usize) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            item.emit(self, level)?;
        }
        Ok(())
    }

    /// Writes the configured `library`/`use` context clauses and a blank line.
    pub fn preamble(&mut self, level: usize) -> fmt::Result {
        let preamble = &self.config.preamble;
        if preamble.is_empty() {
            return Ok(());
        }
        for lib in &preamble.libraries {
            write!(self.out, "library {lib};")?;
            self.newline(level)?;
        }
        for name in &preamble.uses {
            write!(self.out, "use {name};")?;
            self.newline(level)?;
        }
        self.newline(level)
    }
}

impl<W: fmt::Write> fmt::Write for Emitter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.write_str(s)
    }
}

/// A node that can be rendered as VHDL text.
pub trait Emit {
    /// Writes this node to `out`, starting at column `level`.
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result;

    /// Returns a [`Display`](fmt::Display) adapter rendering this node at level 0.
    fn display<'a>(&'a self, config: &'a EmitConfig) -> Rendered<'a, Self>
    where
        Self: Sized,
    {
        Rendered {
            node: self,
            config,
            level: 0,
        }
    }
}

/// Display adapter returned by [`Emit::display`].
pub struct Rendered<'a, T> {
    node: &'a T,
    config: &'a EmitConfig,
    level: usize,
}

impl<T> Rendered<'_, T> {
    /// Renders at `level` instead of column 0.
    pub fn at_level(self, level: usize) -> Self {
        Self { level, ..self }
    }
}

impl<T: Emit> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Emitter::new(f, self.config);
        self.node.emit(&mut out, self.level)
    }
}

/// Renders a node to a `String` with the given configuration.
pub fn to_vhdl<T: Emit>(node: &T, config: &EmitConfig) -> String {
    node.display(config).to_string()
}
