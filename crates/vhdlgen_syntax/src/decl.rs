//! Declarations: signals, variables, ports, parameters, components and
//! functions.

use std::fmt::{self, Write};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::emit::{Emit, Emitter};
use crate::error::{SyntaxError, SyntaxResult};
use crate::expr::Expr;
use crate::scope::{Scope, ScopeChain};
use crate::stmt::{SeqStmt, StmtContainer};
use crate::types::Type;
use crate::unit::Entity;

/// Name of the variable a translated function returns unless overridden.
pub const DEFAULT_RESULT_NAME: &str = "Verilog_Result";

/// A port direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortMode {
    /// `in`
    In,
    /// `out`
    Out,
    /// `inout`
    Inout,
}

impl PortMode {
    /// Returns the VHDL keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            PortMode::In => "in",
            PortMode::Out => "out",
            PortMode::Inout => "inout",
        }
    }
}

/// A signal or variable declaration with an optional initial value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDecl {
    /// The object name.
    pub name: String,
    /// The declared type.
    pub ty: Type,
    /// The `:=` initializer, if any.
    pub initial: Option<Expr>,
    /// End-of-line comment.
    pub comment: Option<String>,
}

impl ObjectDecl {
    /// Creates a declaration without initializer.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            initial: None,
            comment: None,
        }
    }

    /// Builder form of [`set_initial`](Self::set_initial).
    pub fn with_initial(mut self, initial: Expr) -> Self {
        self.set_initial(initial);
        self
    }

    /// Sets the initializer, dropping any previous one.
    pub fn set_initial(&mut self, initial: Expr) {
        self.initial = Some(initial);
    }
}

/// A port of an entity or component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDecl {
    /// The port name.
    pub name: String,
    /// The direction.
    pub mode: PortMode,
    /// The port type.
    pub ty: Type,
}

impl PortDecl {
    /// Creates a port.
    pub fn new(name: impl Into<String>, mode: PortMode, ty: Type) -> Self {
        Self {
            name: name.into(),
            mode,
            ty,
        }
    }
}

impl Emit for PortDecl {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, _level: usize) -> fmt::Result {
        write!(out, "{} : {} {}", self.name, self.mode.as_str(), self.ty)
    }
}

/// A subprogram parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    /// The parameter name.
    pub name: String,
    /// The parameter type.
    pub ty: Type,
}

/// A component declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDecl {
    /// The component name.
    pub name: String,
    /// The ports, in declaration order.
    pub ports: Vec<PortDecl>,
    /// Comment printed above the declaration.
    pub comment: Option<String>,
}

impl ComponentDecl {
    /// Creates a component without ports.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: Vec::new(),
            comment: None,
        }
    }

    /// Builds the component declaration matching `entity`, so the entity
    /// can be instantiated elsewhere. The entity is only read.
    pub fn component_decl_for(entity: &Entity) -> Self {
        let ports: Vec<PortDecl> = entity
            .ports()
            .decls()
            .iter()
            .filter_map(|d| match d {
                Decl::Port(p) => Some(p.clone()),
                _ => None,
            })
            .collect();
        debug!(
            "component for entity {} with {} ports",
            entity.name(),
            ports.len()
        );
        Self {
            name: entity.name().to_string(),
            ports,
            comment: None,
        }
    }
}

/// A function declaration with body.
///
/// A function has two scopes: the parameters, and the local variables
/// nested inside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    name: String,
    return_type: Type,
    params: Scope,
    variables: Scope,
    body: StmtContainer,
    result_name: String,
    comment: Option<String>,
}

impl FunctionDecl {
    /// Creates an empty function returning `return_type`.
    pub fn new(name: impl Into<String>, return_type: Type) -> Self {
        let mut variables = Scope::new();
        variables.set_allow_signal_assignment(false);
        Self {
            name: name.into(),
            return_type,
            params: Scope::new(),
            variables,
            body: StmtContainer::new(),
            result_name: DEFAULT_RESULT_NAME.to_string(),
            comment: None,
        }
    }

    /// Returns the function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the return type.
    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    /// Appends a parameter.
    pub fn add_param(&mut self, name: impl Into<String>, ty: Type) {
        self.params.add_decl(Decl::Param(ParamDecl {
            name: name.into(),
            ty,
        }));
    }

    /// Returns the parameter scope.
    pub fn params(&self) -> &Scope {
        &self.params
    }

    /// Returns the local variable scope.
    pub fn variables(&self) -> &Scope {
        &self.variables
    }

    /// Mutable access to the local variable scope.
    pub fn variables_mut(&mut self) -> &mut Scope {
        &mut self.variables
    }

    /// The scope chain seen from the body: variables, then parameters.
    pub fn scope_chain(&self) -> ScopeChain<'_> {
        ScopeChain::root(&self.params).nest(&self.variables)
    }

    /// Appends a statement to the body.
    pub fn add_stmt(&mut self, stmt: SeqStmt) {
        self.body.add_stmt(stmt);
    }

    /// Returns the body.
    pub fn body(&self) -> &StmtContainer {
        &self.body
    }

    /// Returns the name of the variable holding the result.
    pub fn result_name(&self) -> &str {
        &self.result_name
    }

    /// Overrides the result variable name.
    pub fn set_result_name(&mut self, name: impl Into<String>) {
        self.result_name = name.into();
    }

    /// Sets the comment printed above the function.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }
}

/// A declarative item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Decl {
    /// `signal n : T [:= init];`
    Signal(ObjectDecl),
    /// `variable n : T [:= init];`
    Variable(ObjectDecl),
    /// `n : mode T` inside a port clause.
    Port(PortDecl),
    /// `n : T` inside a parameter list.
    Param(ParamDecl),
    /// A component declaration.
    Component(ComponentDecl),
    /// A function body.
    Function(Box<FunctionDecl>),
}

impl Decl {
    /// Shorthand for a signal declaration.
    pub fn signal(name: impl Into<String>, ty: Type) -> Self {
        Decl::Signal(ObjectDecl::new(name, ty))
    }

    /// Shorthand for a variable declaration.
    pub fn variable(name: impl Into<String>, ty: Type) -> Self {
        Decl::Variable(ObjectDecl::new(name, ty))
    }

    /// Returns the declared name.
    pub fn name(&self) -> &str {
        match self {
            Decl::Signal(d) | Decl::Variable(d) => &d.name,
            Decl::Port(p) => &p.name,
            Decl::Param(p) => &p.name,
            Decl::Component(c) => &c.name,
            Decl::Function(f) => &f.name,
        }
    }

    /// Returns the declared type; a function's is its return type.
    /// Components have none.
    pub fn ty(&self) -> Option<&Type> {
        match self {
            Decl::Signal(d) | Decl::Variable(d) => Some(&d.ty),
            Decl::Port(p) => Some(&p.ty),
            Decl::Param(p) => Some(&p.ty),
            Decl::Component(_) => None,
            Decl::Function(f) => Some(&f.return_type),
        }
    }

    /// Sets the initial value of a signal or variable, replacing any
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::NoInitialValue`] for other declarations.
    pub fn set_initial(&mut self, initial: Expr) -> SyntaxResult<()> {
        match self {
            Decl::Signal(d) | Decl::Variable(d) => {
                d.set_initial(initial);
                Ok(())
            }
            other => Err(SyntaxError::NoInitialValue {
                name: other.name().to_string(),
            }),
        }
    }

    /// Sets the comment printed with this declaration. Ports and
    /// parameters are printed inside a list and take no comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        let comment = Some(comment.into());
        match self {
            Decl::Signal(d) | Decl::Variable(d) => d.comment = comment,
            Decl::Component(c) => c.comment = comment,
            Decl::Function(f) => f.comment = comment,
            Decl::Port(_) | Decl::Param(_) => {}
        }
    }
}

impl Emit for Decl {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        match self {
            Decl::Signal(d) => emit_object("signal", d, out, level),
            Decl::Variable(d) => emit_object("variable", d, out, level),
            Decl::Port(p) => p.emit(out, level),
            Decl::Param(p) => write!(out, "{} : {}", p.name, p.ty),
            Decl::Component(c) => {
                out.comment(c.comment.as_deref(), level, false)?;
                write!(out, "component {} is", c.name)?;
                if !c.ports.is_empty() {
                    let inner = out.indent(level);
                    out.newline(inner)?;
                    out.write_str("port (")?;
                    out.children(&c.ports, inner, ";")?;
                    out.write_str(");")?;
                }
                out.newline(level)?;
                out.write_str("end component;")
            }
            Decl::Function(f) => {
                out.comment(f.comment.as_deref(), level, false)?;
                write!(out, "function {} (", f.name)?;
                out.children(f.params.decls(), level, ";")?;
                out.write_str(") ")?;
                out.newline(level)?;
                write!(out, "return {} is", f.return_type.conversion_name())?;
                out.children(f.variables.decls(), level, "")?;
                out.write_str("begin")?;
                f.body.emit(out, level)?;
                let step = out.config().indent();
                out.pad(step)?;
                write!(out, "return {};", f.result_name)?;
                out.newline(level)?;
                out.write_str("end function;")
            }
        }
    }
}

fn emit_object<W: fmt::Write>(
    keyword: &str,
    decl: &ObjectDecl,
    out: &mut Emitter<'_, W>,
    level: usize,
) -> fmt::Result {
    write!(out, "{keyword} {} : {}", decl.name, decl.ty)?;
    if let Some(init) = &decl.initial {
        out.write_str(" := ")?;
        init.emit(out, level)?;
    }
    out.write_char(';')?;
    out.comment(decl.comment.as_deref(), level, true)
}
