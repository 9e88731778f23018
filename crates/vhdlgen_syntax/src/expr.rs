//! Typed expression trees.
//!
//! Every [`Expr`] owns its [`Type`]. Operator and call nodes own their
//! operands exclusively; there is no sharing between subtrees.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use vhdlgen_common::{Logic, LogicVec};

use crate::emit::{Emit, Emitter};
use crate::error::{SyntaxError, SyntaxResult};
use crate::types::Type;

/// A binary operator. Binary nodes may fold any number of operands of the
/// same operator into one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `and`
    And,
    /// `or`
    Or,
    /// `=`
    Eq,
    /// `/=`
    Neq,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `sll`
    Sll,
    /// `srl`
    Srl,
    /// `xor`
    Xor,
}

impl BinaryOp {
    /// Returns the VHDL spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Eq => "=",
            BinaryOp::Neq => "/=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Sll => "sll",
            BinaryOp::Srl => "srl",
            BinaryOp::Xor => "xor",
        }
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `not`
    Not,
}

impl UnaryOp {
    /// Returns the VHDL spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
        }
    }
}

/// Unit of a time literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Femtoseconds.
    Fs,
    /// Picoseconds.
    Ps,
    /// Nanoseconds.
    Ns,
    /// Microseconds.
    Us,
    /// Milliseconds.
    Ms,
}

impl TimeUnit {
    /// Returns the VHDL unit name.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Fs => "fs",
            TimeUnit::Ps => "ps",
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
        }
    }
}

/// A bit-vector literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitsLiteral {
    /// The bits, index 0 least significant.
    pub bits: LogicVec,
    /// Whether the literal belongs to the `signed` family.
    pub signed: bool,
    /// Whether the literal prints with an explicit `signed'`/`unsigned'`
    /// qualification.
    pub qualified: bool,
}

/// The variants of an expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// A single bit literal, `'1'`.
    Bit(Logic),
    /// A bit-vector literal, `"0011"`.
    Bits(BitsLiteral),
    /// An integer literal.
    Int(i64),
    /// A time literal, `10 ns`.
    Time {
        /// The magnitude.
        value: u64,
        /// The unit.
        unit: TimeUnit,
    },
    /// A string literal.
    Str(String),
    /// A reference to a signal or variable, optionally sliced or indexed.
    Ref {
        /// The referenced name.
        name: String,
        /// Index or slice expression printed in parentheses after the name.
        slice: Option<Box<Expr>>,
    },
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// A chain of one associative binary operator over two or more operands.
    Binary {
        /// The operator joining every operand.
        op: BinaryOp,
        /// The operands, left to right.
        operands: Vec<Expr>,
    },
    /// A function call (also used for type conversions).
    Call {
        /// The function name.
        name: String,
        /// The arguments.
        args: Vec<Expr>,
    },
    /// A parenthesized expression list.
    List(Vec<Expr>),
}

impl ExprKind {
    fn describe(&self) -> &'static str {
        match self {
            ExprKind::Bit(_) => "bit literal",
            ExprKind::Bits(_) => "bit-vector literal",
            ExprKind::Int(_) => "integer literal",
            ExprKind::Time { .. } => "time literal",
            ExprKind::Str(_) => "string literal",
            ExprKind::Ref { .. } => "reference",
            ExprKind::Unary { .. } => "unary",
            ExprKind::Binary { .. } => "binary",
            ExprKind::Call { .. } => "call",
            ExprKind::List(_) => "list",
        }
    }
}

/// A typed expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub(crate) kind: ExprKind,
    pub(crate) ty: Type,
}

impl Expr {
    /// Creates a node from its parts.
    pub fn new(kind: ExprKind, ty: Type) -> Self {
        Self { kind, ty }
    }

    /// A `std_logic` literal.
    pub fn bit(value: Logic) -> Self {
        Self::new(ExprKind::Bit(value), Type::std_logic())
    }

    /// A bit-vector literal typed `signed`/`unsigned` at the literal's width.
    pub fn bits(bits: LogicVec, signed: bool) -> Self {
        let ty = Type::numeric(signed, bits.width());
        Self::new(
            ExprKind::Bits(BitsLiteral {
                bits,
                signed,
                qualified: false,
            }),
            ty,
        )
    }

    /// An `Integer` literal.
    pub fn int(value: i64) -> Self {
        Self::new(ExprKind::Int(value), Type::integer())
    }

    /// A `Time` literal.
    pub fn time(value: u64, unit: TimeUnit) -> Self {
        Self::new(ExprKind::Time { value, unit }, Type::time())
    }

    /// A `String` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::Str(value.into()), Type::string())
    }

    /// A reference to the object `name` of type `ty`.
    pub fn var_ref(name: impl Into<String>, ty: Type) -> Self {
        Self::new(
            ExprKind::Ref {
                name: name.into(),
                slice: None,
            },
            ty,
        )
    }

    /// A reference to part of `name`; `ty` is the type of the selected part.
    pub fn slice_ref(name: impl Into<String>, ty: Type, slice: Expr) -> Self {
        Self::new(
            ExprKind::Ref {
                name: name.into(),
                slice: Some(Box::new(slice)),
            },
            ty,
        )
    }

    /// A unary operation of result type `ty`.
    pub fn unary(op: UnaryOp, operand: Expr, ty: Type) -> Self {
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            ty,
        )
    }

    /// A binary operation of result type `ty`. Further operands of the same
    /// operator can be folded in with [`add_operand`](Self::add_operand).
    pub fn binary(left: Expr, op: BinaryOp, right: Expr, ty: Type) -> Self {
        Self::new(
            ExprKind::Binary {
                op,
                operands: vec![left, right],
            },
            ty,
        )
    }

    /// A call of `name` returning `ty`.
    pub fn call(name: impl Into<String>, args: Vec<Expr>, ty: Type) -> Self {
        Self::new(
            ExprKind::Call {
                name: name.into(),
                args,
            },
            ty,
        )
    }

    /// A parenthesized list of expressions with aggregate type `ty`.
    pub fn list(exprs: Vec<Expr>, ty: Type) -> Self {
        Self::new(ExprKind::List(exprs), ty)
    }

    /// Appends an operand to a binary chain, a call's arguments, or a list.
    pub fn add_operand(&mut self, operand: Expr) -> SyntaxResult<()> {
        match &mut self.kind {
            ExprKind::Binary { operands, .. } => operands.push(operand),
            ExprKind::Call { args, .. } => args.push(operand),
            ExprKind::List(exprs) => exprs.push(operand),
            other => {
                return Err(SyntaxError::NotAnOperandList {
                    kind: other.describe(),
                })
            }
        }
        Ok(())
    }

    /// Returns the node variant.
    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Returns the node's type.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns `true` for literal nodes.
    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Bit(_)
                | ExprKind::Bits(_)
                | ExprKind::Int(_)
                | ExprKind::Time { .. }
                | ExprKind::Str(_)
        )
    }
}

impl Emit for Expr {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        match &self.kind {
            ExprKind::Bit(b) => write!(out, "'{}'", b.to_vhdl_char()),
            ExprKind::Bits(lit) => {
                if lit.qualified {
                    let family = if lit.signed { "signed" } else { "unsigned" };
                    write!(out, "{family}'(\"{}\")", lit.bits)
                } else {
                    write!(out, "\"{}\"", lit.bits)
                }
            }
            ExprKind::Int(v) => write!(out, "{v}"),
            ExprKind::Time { value, unit } => write!(out, "{value} {}", unit.as_str()),
            // An unqualified string literal can also resolve to a vector
            // type, so it is always qualified as `String`.
            ExprKind::Str(s) => {
                out.write_str("String'(")?;
                out.quoted(s)?;
                out.write_char(')')
            }
            ExprKind::Ref { name, slice } => {
                out.write_str(name)?;
                if let Some(slice) = slice {
                    out.write_char('(')?;
                    slice.emit(out, level)?;
                    out.write_char(')')?;
                }
                Ok(())
            }
            ExprKind::Unary { op, operand } => {
                write!(out, "({} ", op.as_str())?;
                operand.emit(out, level)?;
                out.write_char(')')
            }
            ExprKind::Binary { op, operands } => {
                // fully parenthesized, left to right
                out.write_char('(')?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(out, " {} ", op.as_str())?;
                    }
                    operand.emit(out, level)?;
                }
                out.write_char(')')
            }
            ExprKind::Call { name, args } => {
                out.write_str(name)?;
                out.write_char('(')?;
                out.comma_list(args, level)?;
                out.write_char(')')
            }
            ExprKind::List(exprs) => {
                out.write_char('(')?;
                out.comma_list(exprs, level)?;
                out.write_char(')')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::to_vhdl;
    use vhdlgen_config::EmitConfig;

    fn render(e: &Expr) -> String {
        to_vhdl(e, &EmitConfig::default())
    }

    fn sig(name: &str) -> Expr {
        Expr::var_ref(name, Type::unsigned(4))
    }

    #[test]
    fn literal_bits_print_msb_first() {
        // index0='1', index1='1', index2='0', index3='0' -> value 3
        let bits = LogicVec::from_lsb_chars("1100").unwrap();
        let lit = Expr::bits(bits, false);
        assert_eq!(render(&lit), "\"0011\"");
        assert_eq!(*lit.ty(), Type::unsigned(4));
    }

    #[test]
    fn qualified_literal() {
        let mut lit = Expr::bits(LogicVec::from_binary_str("10").unwrap(), true);
        if let ExprKind::Bits(b) = &mut lit.kind {
            b.qualified = true;
        }
        assert_eq!(render(&lit), "signed'(\"10\")");
    }

    #[test]
    fn scalar_literals() {
        assert_eq!(render(&Expr::bit(Logic::One)), "'1'");
        assert_eq!(render(&Expr::bit(Logic::X)), "'U'");
        assert_eq!(render(&Expr::int(-7)), "-7");
        assert_eq!(render(&Expr::time(10, TimeUnit::Ns)), "10 ns");
        assert_eq!(render(&Expr::string("hi")), "String'(\"hi\")");
    }

    #[test]
    fn string_literal_doubles_quotes() {
        let e = Expr::string("say \"hi\"");
        assert_eq!(render(&e), "String'(\"say \"\"hi\"\"\")");
    }

    #[test]
    fn binary_chain_is_fully_parenthesized() {
        let mut e = Expr::binary(sig("a"), BinaryOp::And, sig("b"), Type::unsigned(4));
        e.add_operand(sig("c")).unwrap();
        assert_eq!(render(&e), "(a and b and c)");
    }

    #[test]
    fn nested_binary() {
        let inner = Expr::binary(sig("a"), BinaryOp::Add, sig("b"), Type::unsigned(4));
        let e = Expr::binary(inner, BinaryOp::Sub, sig("c"), Type::unsigned(4));
        assert_eq!(render(&e), "((a + b) - c)");
    }

    #[test]
    fn unary_and_slice() {
        let e = Expr::unary(UnaryOp::Not, sig("a"), Type::unsigned(4));
        assert_eq!(render(&e), "(not a)");
        let s = Expr::slice_ref("bus", Type::std_logic(), Expr::int(3));
        assert_eq!(render(&s), "bus(3)");
    }

    #[test]
    fn call_and_list() {
        let mut call = Expr::call("f", vec![sig("a")], Type::integer());
        call.add_operand(Expr::int(2)).unwrap();
        assert_eq!(render(&call), "f(a, 2)");
        assert_eq!(render(&Expr::call("now", Vec::new(), Type::time())), "now()");
        let list = Expr::list(vec![Expr::int(1), Expr::int(2)], Type::integer());
        assert_eq!(render(&list), "(1, 2)");
    }

    #[test]
    fn add_operand_to_leaf_is_rejected() {
        let mut e = Expr::int(1);
        let err = e.add_operand(Expr::int(2)).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::NotAnOperandList {
                kind: "integer literal"
            }
        );
    }

    #[test]
    fn operator_spellings() {
        assert_eq!(BinaryOp::Neq.as_str(), "/=");
        assert_eq!(BinaryOp::Srl.as_str(), "srl");
        assert_eq!(UnaryOp::Not.as_str(), "not");
        assert_eq!(TimeUnit::Us.as_str(), "us");
    }

    #[test]
    fn serde_roundtrip() {
        let e = Expr::binary(sig("a"), BinaryOp::Xor, Expr::bit(Logic::One), Type::unsigned(4));
        let json = serde_json::to_string(&e).unwrap();
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
