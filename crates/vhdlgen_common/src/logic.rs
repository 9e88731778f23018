//! Four-state bit values and their VHDL `std_logic` spelling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single 4-state bit value as produced by the netlist front-end.
///
/// The four states represent:
/// - `Zero`: logic low (driven 0)
/// - `One`: logic high (driven 1)
/// - `X`: unknown or uninitialized value
/// - `Z`: high-impedance (tri-state, not driven)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Logic low (0).
    Zero = 0,
    /// Logic high (1).
    One = 1,
    /// Unknown or uninitialized.
    X = 2,
    /// High-impedance (tri-state).
    Z = 3,
}

impl Logic {
    /// Converts a netlist bit character to a [`Logic`] value.
    ///
    /// Accepts '0', '1', 'x'/'X', and 'z'/'Z'.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns the `std_logic` character for this value.
    ///
    /// An unknown netlist bit has no driven value yet, so it maps to the
    /// uninitialized `'U'` rather than the conflict value `'X'`.
    pub fn to_vhdl_char(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'U',
            Logic::Z => 'Z',
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_vhdl_char())
    }
}

#[cfg(test)]
mod tests {
    use super::Logic;
    use super::Logic::*;

    #[test]
    fn vhdl_chars() {
        assert_eq!(Zero.to_vhdl_char(), '0');
        assert_eq!(One.to_vhdl_char(), '1');
        assert_eq!(X.to_vhdl_char(), 'U');
        assert_eq!(Z.to_vhdl_char(), 'Z');
    }

    #[test]
    fn display_uses_vhdl_spelling() {
        assert_eq!(format!("{One}"), "1");
        assert_eq!(format!("{X}"), "U");
    }

    #[test]
    fn from_char_valid() {
        assert_eq!(Logic::from_char('0'), Some(Zero));
        assert_eq!(Logic::from_char('1'), Some(One));
        assert_eq!(Logic::from_char('x'), Some(X));
        assert_eq!(Logic::from_char('X'), Some(X));
        assert_eq!(Logic::from_char('z'), Some(Z));
        assert_eq!(Logic::from_char('Z'), Some(Z));
    }

    #[test]
    fn from_char_invalid() {
        assert_eq!(Logic::from_char('a'), None);
        assert_eq!(Logic::from_char('U'), None);
    }
}
