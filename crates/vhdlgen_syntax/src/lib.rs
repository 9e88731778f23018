//! The VHDL syntax tree of the vhdlgen back-end and its text emitter.
//!
//! The front-end builds an [`Entity`] bottom-up out of typed [`Expr`]
//! nodes, sequential [`SeqStmt`]s, concurrent [`ConcStmt`]s and [`Decl`]s,
//! relying on [`Expr::cast`] to insert the conversions VHDL's strict typing
//! demands. A single render pass through [`Emit`] then produces the text.

#![warn(missing_docs)]

pub mod cast;
pub mod decl;
pub mod emit;
pub mod error;
pub mod expr;
pub mod scope;
pub mod stmt;
pub mod types;
pub mod unit;

pub use decl::{ComponentDecl, Decl, FunctionDecl, ObjectDecl, ParamDecl, PortDecl, PortMode};
pub use emit::{to_vhdl, Emit, Emitter};
pub use error::{SyntaxError, SyntaxResult};
pub use expr::{BinaryOp, Expr, ExprKind, TimeUnit, UnaryOp};
pub use scope::{Scope, ScopeChain};
pub use stmt::{
    CaseBranch, CaseStmt, ConcAssign, ConcStmt, IfStmt, ProcedureCall, SeqStmt, SignalAssign,
    StmtContainer, VarAssign, WaitKind, WaitStmt, WhileStmt,
};
pub use types::{Type, TypeName};
pub use unit::{Architecture, ComponentInst, Entity, Process};
