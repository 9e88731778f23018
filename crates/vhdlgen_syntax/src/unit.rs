//! Design units and the concurrent constructs inside them.
//!
//! An [`Entity`] owns its ports and its [`Architecture`]; the architecture
//! owns its declarations and concurrent statements, processes included.
//! Name lookup from inside a process walks process, architecture, then
//! entity ports; see [`Entity::chain_for`].

use std::fmt::{self, Write};
use std::io;

use log::debug;
use serde::{Deserialize, Serialize};
use vhdlgen_config::EmitConfig;

use crate::decl::{Decl, PortDecl};
use crate::emit::{Emit, Emitter};
use crate::expr::Expr;
use crate::scope::{Scope, ScopeChain};
use crate::stmt::{ConcStmt, SeqStmt, StmtContainer};

/// Text left in place of a process with no statements.
pub const ELIDED_PROCESS: &str = "-- Removed one empty process";

/// A `process` with its local declarations and sensitivity list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Process {
    label: Option<String>,
    scope: Scope,
    sensitivity: Vec<String>,
    stmts: StmtContainer,
    comment: Option<String>,
}

impl Process {
    /// Creates an unlabeled process.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a process with a label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Returns the label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Adds a signal to the sensitivity list. Duplicates are kept.
    pub fn add_sensitivity(&mut self, name: impl Into<String>) {
        self.sensitivity.push(name.into());
    }

    /// Returns the sensitivity list in insertion order.
    pub fn sensitivity(&self) -> &[String] {
        &self.sensitivity
    }

    /// Returns the local declarations.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Mutable access to the local declarations.
    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    /// Appends a statement to the body.
    pub fn add_stmt(&mut self, stmt: SeqStmt) {
        self.stmts.add_stmt(stmt);
    }

    /// Returns the body.
    pub fn stmts(&self) -> &StmtContainer {
        &self.stmts
    }

    /// Sets the comment printed above the process.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }
}

impl Emit for Process {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        // nothing to run, nothing to print
        if self.stmts.is_empty() {
            debug!(
                "eliding empty process {}",
                self.label.as_deref().unwrap_or("<unlabeled>")
            );
            return out.write_str(ELIDED_PROCESS);
        }

        out.comment(self.comment.as_deref(), level, false)?;
        if let Some(label) = &self.label {
            write!(out, "{label}: ")?;
        }
        out.write_str("process ")?;
        if !self.sensitivity.is_empty() {
            write!(out, "({}) ", self.sensitivity.join(", "))?;
        }
        out.write_str("is")?;
        out.children(self.scope.decls(), level, "")?;
        out.write_str("begin")?;
        self.stmts.emit(out, level)?;
        out.write_str("end process;")
    }
}

/// One `formal => actual` association of a port map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortMap {
    /// The component port.
    pub name: String,
    /// The connected expression.
    pub expr: Expr,
}

/// A component instantiation, `inst: comp port map (...);`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentInst {
    inst_name: String,
    comp_name: String,
    mapping: Vec<PortMap>,
    comment: Option<String>,
}

impl ComponentInst {
    /// Creates an instance `inst_name` of component `comp_name`.
    pub fn new(inst_name: impl Into<String>, comp_name: impl Into<String>) -> Self {
        Self {
            inst_name: inst_name.into(),
            comp_name: comp_name.into(),
            mapping: Vec::new(),
            comment: None,
        }
    }

    /// Connects port `name` to `expr`.
    pub fn map_port(&mut self, name: impl Into<String>, expr: Expr) {
        self.mapping.push(PortMap {
            name: name.into(),
            expr,
        });
    }

    /// Returns the port associations in order.
    pub fn mapping(&self) -> &[PortMap] {
        &self.mapping
    }

    /// Sets the comment printed above the instance.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }
}

impl Emit for ComponentInst {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        out.comment(self.comment.as_deref(), level, false)?;
        write!(out, "{}: {}", self.inst_name, self.comp_name)?;
        if !self.mapping.is_empty() {
            let inner = out.indent(level);
            let assoc = out.indent(inner);
            out.newline(inner)?;
            out.write_str("port map (")?;
            for (i, map) in self.mapping.iter().enumerate() {
                out.newline(assoc)?;
                write!(out, "{} => ", map.name)?;
                map.expr.emit(out, assoc)?;
                if i + 1 < self.mapping.len() {
                    out.write_char(',')?;
                }
            }
            out.newline(inner)?;
            out.write_char(')')?;
        }
        out.write_char(';')
    }
}

/// An architecture body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Architecture {
    name: String,
    entity: String,
    scope: Scope,
    stmts: Vec<ConcStmt>,
    comment: Option<String>,
}

impl Architecture {
    /// Creates an empty architecture `name` of entity `entity`.
    pub fn new(name: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity: entity.into(),
            scope: Scope::new(),
            stmts: Vec::new(),
            comment: None,
        }
    }

    /// Returns the architecture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the entity this architecture implements.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the declarative part.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Mutable access to the declarative part.
    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    /// Appends a declaration.
    pub fn add_decl(&mut self, decl: Decl) {
        self.scope.add_decl(decl);
    }

    /// Appends a concurrent statement.
    pub fn add_stmt(&mut self, stmt: ConcStmt) {
        self.stmts.push(stmt);
    }

    /// Appends a process. Its scope resolves through this architecture's
    /// scope; see [`Entity::chain_for`].
    pub fn add_process(&mut self, process: Process) {
        self.stmts.push(ConcStmt::Process(process));
    }

    /// Returns the concurrent statements in order.
    pub fn stmts(&self) -> &[ConcStmt] {
        &self.stmts
    }

    /// Sets the comment printed above the architecture.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }
}

impl Emit for Architecture {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        out.comment(self.comment.as_deref(), level, false)?;
        write!(out, "architecture {} of {} is", self.name, self.entity)?;
        out.children(self.scope.decls(), level, "")?;
        out.write_str("begin")?;
        out.children(&self.stmts, level, "")?;
        out.write_str("end architecture;")?;
        out.blank_line(level)
    }
}

/// An entity together with its single architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    name: String,
    derived_from: String,
    ports: Scope,
    arch: Architecture,
    comment: Option<String>,
}

impl Entity {
    /// Creates an entity with no ports.
    ///
    /// `derived_from` names the source module this entity was translated
    /// from; it is not printed.
    pub fn new(name: impl Into<String>, derived_from: impl Into<String>, arch: Architecture) -> Self {
        Self {
            name: name.into(),
            derived_from: derived_from.into(),
            ports: Scope::new(),
            arch,
            comment: None,
        }
    }

    /// Returns the entity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the source module.
    pub fn derived_from(&self) -> &str {
        &self.derived_from
    }

    /// Appends a port.
    pub fn add_port(&mut self, port: PortDecl) {
        self.ports.add_decl(Decl::Port(port));
    }

    /// Returns the port scope.
    pub fn ports(&self) -> &Scope {
        &self.ports
    }

    /// Returns the architecture.
    pub fn arch(&self) -> &Architecture {
        &self.arch
    }

    /// Mutable access to the architecture.
    pub fn arch_mut(&mut self) -> &mut Architecture {
        &mut self.arch
    }

    /// Sets the comment printed above the entity.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    /// The chain seen from the port clause: ports only.
    pub fn ports_chain(&self) -> ScopeChain<'_> {
        ScopeChain::root(&self.ports)
    }

    /// The chain seen from the architecture: its declarations, then ports.
    pub fn arch_chain(&self) -> ScopeChain<'_> {
        self.ports_chain().nest(&self.arch.scope)
    }

    /// The chain seen from a scope nested in the architecture, typically
    /// a process's: `local`, architecture declarations, then ports.
    pub fn chain_for<'a>(&'a self, local: &'a Scope) -> ScopeChain<'a> {
        self.arch_chain().nest(local)
    }

    /// Renders the entity and its architecture to a `String`.
    pub fn to_vhdl(&self, config: &EmitConfig) -> String {
        crate::emit::to_vhdl(self, config)
    }

    /// Renders the entity and its architecture to `writer`.
    pub fn write_to<W: io::Write>(&self, mut writer: W, config: &EmitConfig) -> io::Result<()> {
        writer.write_all(self.to_vhdl(config).as_bytes())
    }
}

impl Emit for Entity {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        out.preamble(level)?;
        out.comment(self.comment.as_deref(), level, false)?;
        write!(out, "entity {} is", self.name)?;
        if !self.ports.is_empty() {
            let inner = out.indent(level);
            out.newline(inner)?;
            out.write_str("port (")?;
            out.children(self.ports.decls(), inner, ";")?;
            out.write_str(");")?;
        }
        out.newline(level)?;
        out.write_str("end entity;")?;
        out.blank_line(level)?;
        self.arch.emit(out, level)
    }
}
