//! Type-directed cast and resize insertion.
//!
//! [`Expr::cast`] wraps an expression in whatever conversion VHDL needs to
//! present it as another type. Bit-vector literals get a cheaper path since
//! their bits are known and can be rewritten directly.

use log::{debug, trace};
use vhdlgen_common::Logic;

use crate::error::{SyntaxError, SyntaxResult};
use crate::expr::{BinaryOp, BitsLiteral, Expr, ExprKind};
use crate::types::{Type, TypeName};

/// Name of the `numeric_std` width conversion.
pub const RESIZE_FN: &str = "Resize";

/// Name of the `numeric_std` vector-to-integer conversion.
pub const TO_INTEGER_FN: &str = "To_Integer";

impl Expr {
    /// Converts this expression to type `to`.
    ///
    /// Rules, first match wins:
    /// 1. same type mark and width: returned unchanged;
    /// 2. same type mark, other width: [`resize`](Self::resize);
    /// 3. `Boolean`: `(e = '1')`;
    /// 4. `Integer`: `To_Integer(e)`;
    /// 5. anything else: `<type mark>(e)`, then resized if the widths differ.
    ///
    /// The reinterpreting call in rule 5 comes before the resize so that a
    /// signed/unsigned change extends the right sign bit.
    ///
    /// Rule 3 is only legal VHDL for `std_logic` sources. A vector cast to
    /// `Boolean` still yields `(v = '1')`, which a VHDL compiler rejects;
    /// the front-end is expected to reduce vectors to a bit first. Such casts
    /// are logged at debug level.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ResizeNonVector`] if a resize is needed on a
    /// type other than `signed`/`unsigned`.
    pub fn cast(self, to: &Type) -> SyntaxResult<Expr> {
        trace!("cast {} -> {}", self.ty, to);
        match self.kind {
            ExprKind::Bits(lit) => cast_bits(lit, self.ty, to),
            kind => Expr::new(kind, self.ty).cast_generic(to),
        }
    }

    fn cast_generic(self, to: &Type) -> SyntaxResult<Expr> {
        if to.name() == self.ty.name() {
            if to.width() == self.ty.width() {
                return Ok(self);
            }
            return self.resize(to.width());
        }
        match to.name() {
            TypeName::Boolean => {
                if self.ty.is_vector() {
                    debug!(
                        "boolean cast of {} compares a vector with '1'",
                        self.ty
                    );
                }
                // '1' is true, every other value is false
                Ok(Expr::binary(
                    self,
                    BinaryOp::Eq,
                    Expr::bit(Logic::One),
                    Type::boolean(),
                ))
            }
            TypeName::Integer => Ok(Expr::call(TO_INTEGER_FN, vec![self], to.clone())),
            _ => {
                let from_width = self.ty.width();
                let conv = Expr::call(to.conversion_name(), vec![self], to.clone());
                if to.width() != from_width {
                    conv.resize(to.width())
                } else {
                    Ok(conv)
                }
            }
        }
    }

    /// Changes the width of a `signed`/`unsigned` expression, keeping its
    /// signedness: `Resize(e, width)`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ResizeNonVector`] for any other type.
    pub fn resize(self, width: u32) -> SyntaxResult<Expr> {
        let rtype = match self.ty.name() {
            TypeName::Signed => Type::signed(width),
            TypeName::Unsigned => Type::unsigned(width),
            _ => {
                return Err(SyntaxError::ResizeNonVector {
                    ty: self.ty.to_string(),
                })
            }
        };
        trace!("resize {} -> {}", self.ty, rtype);
        let width_arg = Expr::int(i64::from(width));
        Ok(Expr::call(RESIZE_FN, vec![self, width_arg], rtype))
    }
}

fn cast_bits(mut lit: BitsLiteral, ty: Type, to: &Type) -> SyntaxResult<Expr> {
    // An empty literal has no bit 0 to read; treat it as zero.
    let lsb = lit.bits.lsb().unwrap_or(Logic::Zero);
    match to.name() {
        // VHDL has no vector-to-scalar cast, but the bits are right here
        TypeName::StdLogic => Ok(Expr::bit(lsb)),
        TypeName::StdLogicVector => Ok(Expr::new(ExprKind::Bits(lit), ty)),
        TypeName::Signed | TypeName::Unsigned => {
            // Extension repeats bit 0, not the sign bit.
            let signed = to.name() == TypeName::Signed;
            let bits = lit.bits.resized(to.width(), lsb);
            Ok(Expr::new(
                ExprKind::Bits(BitsLiteral {
                    bits,
                    signed,
                    qualified: lit.qualified,
                }),
                to.clone(),
            ))
        }
        TypeName::Integer => {
            // Without the qualification To_Integer is ambiguous between
            // its signed and unsigned overloads.
            lit.qualified = true;
            Expr::new(ExprKind::Bits(lit), ty).cast_generic(to)
        }
        _ => Expr::new(ExprKind::Bits(lit), ty).cast_generic(to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::to_vhdl;
    use vhdlgen_common::LogicVec;
    use vhdlgen_config::EmitConfig;

    fn render(e: &Expr) -> String {
        to_vhdl(e, &EmitConfig::default())
    }

    fn lit(msb_first: &str, signed: bool) -> Expr {
        Expr::bits(LogicVec::from_binary_str(msb_first).unwrap(), signed)
    }

    #[test]
    fn identity_cast_is_a_no_op() {
        let e = Expr::var_ref("a", Type::unsigned(8));
        let before = e.clone();
        let after = e.cast(&Type::unsigned(8)).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn width_change_wraps_in_resize() {
        let e = Expr::var_ref("a", Type::unsigned(8));
        let r = e.cast(&Type::unsigned(16)).unwrap();
        assert_eq!(*r.ty(), Type::unsigned(16));
        match r.kind() {
            ExprKind::Call { name, args } => {
                assert_eq!(name, RESIZE_FN);
                assert_eq!(args.len(), 2);
                assert_eq!(*args[1].kind(), ExprKind::Int(16));
            }
            other => panic!("expected Resize call, got {other:?}"),
        }
        assert_eq!(render(&r), "Resize(a, 16)");
    }

    #[test]
    fn resize_keeps_signedness() {
        let r = Expr::var_ref("s", Type::signed(4)).resize(9).unwrap();
        assert_eq!(*r.ty(), Type::signed(9));
    }

    #[test]
    fn resize_of_non_vector_is_contract_violation() {
        let err = Expr::int(3).resize(8).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::ResizeNonVector {
                ty: "Integer".to_string()
            }
        );
        let slv = Expr::var_ref("v", Type::std_logic_vector(4));
        assert!(slv.cast(&Type::std_logic_vector(8)).is_err());
    }

    #[test]
    fn boolean_cast_compares_with_one() {
        let e = Expr::var_ref("en", Type::std_logic());
        let b = e.cast(&Type::boolean()).unwrap();
        assert_eq!(*b.ty(), Type::boolean());
        match b.kind() {
            ExprKind::Binary { op, operands } => {
                assert_eq!(*op, BinaryOp::Eq);
                assert_eq!(*operands[1].kind(), ExprKind::Bit(Logic::One));
            }
            other => panic!("expected comparison, got {other:?}"),
        }
        assert_eq!(render(&b), "(en = '1')");
    }

    #[test]
    fn vector_to_boolean_compares_with_bit() {
        let v = Expr::var_ref("v", Type::unsigned(4));
        let b = v.cast(&Type::boolean()).unwrap();
        assert_eq!(*b.ty(), Type::boolean());
        assert_eq!(render(&b), "(v = '1')");
    }

    #[test]
    fn integer_cast_calls_to_integer() {
        let e = Expr::var_ref("n", Type::signed(8));
        let i = e.cast(&Type::integer()).unwrap();
        assert_eq!(*i.ty(), Type::integer());
        assert_eq!(render(&i), "To_Integer(n)");
    }

    #[test]
    fn cross_family_same_width() {
        let e = Expr::var_ref("u", Type::unsigned(8));
        let s = e.cast(&Type::signed(8)).unwrap();
        assert_eq!(render(&s), "signed(u)");
        assert_eq!(*s.ty(), Type::signed(8));
    }

    #[test]
    fn cross_family_reinterprets_before_resize() {
        let e = Expr::var_ref("u", Type::unsigned(4));
        let s = e.cast(&Type::signed(8)).unwrap();
        assert_eq!(render(&s), "Resize(signed(u), 8)");
        assert_eq!(*s.ty(), Type::signed(8));
    }

    #[test]
    fn vector_to_std_logic_vector() {
        let e = Expr::var_ref("u", Type::unsigned(4));
        let v = e.cast(&Type::std_logic_vector(4)).unwrap();
        assert_eq!(render(&v), "std_logic_vector(u)");
    }

    #[test]
    fn literal_to_bit_takes_lsb() {
        let b = lit("0011", false).cast(&Type::std_logic()).unwrap();
        assert_eq!(*b.kind(), ExprKind::Bit(Logic::One));
        assert_eq!(render(&b), "'1'");
    }

    #[test]
    fn literal_to_std_logic_vector_is_unchanged() {
        let l = lit("0110", false);
        let before = l.clone();
        assert_eq!(l.cast(&Type::std_logic_vector(8)).unwrap(), before);
    }

    #[test]
    fn literal_to_vector_rewrites_bits() {
        let l = lit("10", false).cast(&Type::unsigned(4)).unwrap();
        assert_eq!(render(&l), "\"0010\"");
        assert_eq!(*l.ty(), Type::unsigned(4));
        assert!(l.is_literal());
    }

    /// Extension copies bit 0 rather than the most significant (sign) bit,
    /// so a negative signed literal with a clear bit 0 is zero-extended.
    /// This matches the behavior the output has always had; kept on
    /// purpose until the front-end relies on true sign extension.
    #[test]
    fn literal_extension_fills_from_lsb() {
        let neg_two = lit("10", true).cast(&Type::signed(4)).unwrap();
        assert_eq!(render(&neg_two), "\"0010\"");
        let neg_one = lit("11", true).cast(&Type::signed(4)).unwrap();
        assert_eq!(render(&neg_one), "\"1111\"");
    }

    #[test]
    fn literal_truncation() {
        let l = lit("1101", false).cast(&Type::unsigned(2)).unwrap();
        assert_eq!(render(&l), "\"01\"");
    }

    #[test]
    fn literal_to_integer_is_qualified() {
        let i = lit("0011", false).cast(&Type::integer()).unwrap();
        assert_eq!(render(&i), "To_Integer(unsigned'(\"0011\"))");
        let s = lit("1", true).cast(&Type::integer()).unwrap();
        assert_eq!(render(&s), "To_Integer(signed'(\"1\"))");
    }

    #[test]
    fn literal_to_boolean_falls_back() {
        let b = lit("1", false).cast(&Type::boolean()).unwrap();
        assert_eq!(render(&b), "(\"1\" = '1')");
    }
}
