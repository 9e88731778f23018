//! VHDL types with name + width identity.
//!
//! A [`Type`] is a small value: expressions own their own copy and casts
//! compare them structurally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type mark of a VHDL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeName {
    /// `std_logic`, a single resolved bit.
    StdLogic,
    /// `std_logic_vector`, an untyped bit vector.
    StdLogicVector,
    /// `signed` from `numeric_std`.
    Signed,
    /// `unsigned` from `numeric_std`.
    Unsigned,
    /// `Boolean`.
    Boolean,
    /// `Integer`.
    Integer,
    /// `Time`.
    Time,
    /// `String`.
    String,
}

impl TypeName {
    /// Returns `true` for the array-of-bits types.
    pub fn is_vector(self) -> bool {
        matches!(
            self,
            TypeName::StdLogicVector | TypeName::Signed | TypeName::Unsigned
        )
    }
}

/// A VHDL type: a [`TypeName`] plus a bit width.
///
/// The width only distinguishes vector types; scalars always have width 1.
/// Two types are identical iff both name and width match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    name: TypeName,
    width: u32,
}

impl Type {
    /// Creates a type from its parts. Scalar widths are normalized to 1.
    pub fn new(name: TypeName, width: u32) -> Self {
        let width = if name.is_vector() { width } else { 1 };
        Self { name, width }
    }

    /// `std_logic`.
    pub fn std_logic() -> Self {
        Self::new(TypeName::StdLogic, 1)
    }

    /// `std_logic_vector(width - 1 downto 0)`.
    pub fn std_logic_vector(width: u32) -> Self {
        Self::new(TypeName::StdLogicVector, width)
    }

    /// `signed(width - 1 downto 0)`.
    pub fn signed(width: u32) -> Self {
        Self::new(TypeName::Signed, width)
    }

    /// `unsigned(width - 1 downto 0)`.
    pub fn unsigned(width: u32) -> Self {
        Self::new(TypeName::Unsigned, width)
    }

    /// `signed` or `unsigned` depending on `is_signed`.
    pub fn numeric(is_signed: bool, width: u32) -> Self {
        if is_signed {
            Self::signed(width)
        } else {
            Self::unsigned(width)
        }
    }

    /// `Boolean`.
    pub fn boolean() -> Self {
        Self::new(TypeName::Boolean, 1)
    }

    /// `Integer`.
    pub fn integer() -> Self {
        Self::new(TypeName::Integer, 1)
    }

    /// `Time`.
    pub fn time() -> Self {
        Self::new(TypeName::Time, 1)
    }

    /// `String`.
    pub fn string() -> Self {
        Self::new(TypeName::String, 1)
    }

    /// Returns the type mark.
    pub fn name(&self) -> TypeName {
        self.name
    }

    /// Returns the bit width (1 for scalars).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns `true` for `std_logic_vector`, `signed` and `unsigned`.
    pub fn is_vector(&self) -> bool {
        self.name.is_vector()
    }

    /// Returns the bare type mark, as used for conversion calls and
    /// function return types (`unsigned`, `Integer`, ...).
    pub fn conversion_name(&self) -> &'static str {
        match self.name {
            TypeName::StdLogic => "std_logic",
            TypeName::StdLogicVector => "std_logic_vector",
            TypeName::Signed => "signed",
            TypeName::Unsigned => "unsigned",
            TypeName::Boolean => "Boolean",
            TypeName::Integer => "Integer",
            TypeName::Time => "Time",
            TypeName::String => "String",
        }
    }
}

/// Formats the type as it appears in a declaration, with the index
/// constraint for vectors: `unsigned(7 downto 0)`.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_vector() {
            let msb = i64::from(self.width) - 1;
            write!(f, "{}({msb} downto 0)", self.conversion_name())
        } else {
            f.write_str(self.conversion_name())
        }
    }
}
