//! LSB-first bit strings backing bit-vector literals.

use crate::logic::Logic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of [`Logic`] values where index 0 is the least
/// significant bit.
///
/// This is the order the netlist front-end hands bits over in. Text
/// rendering ([`Display`](fmt::Display)) reverses it so the most significant
/// bit prints first.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicVec {
    bits: Vec<Logic>,
}

impl LogicVec {
    /// Creates a new `LogicVec` of the given width, initialized to all `Zero`.
    pub fn new(width: u32) -> Self {
        Self {
            bits: vec![Logic::Zero; width as usize],
        }
    }

    /// Creates a `LogicVec` from values already in LSB-first order.
    pub fn from_lsb_first(bits: Vec<Logic>) -> Self {
        Self { bits }
    }

    /// Parses a netlist bit buffer such as `"1100"` where the first
    /// character is bit 0.
    ///
    /// Returns `None` if the string contains invalid characters.
    pub fn from_lsb_chars(s: &str) -> Option<Self> {
        let bits = s.chars().map(Logic::from_char).collect::<Option<Vec<_>>>()?;
        Some(Self { bits })
    }

    /// Parses a conventional binary string like `"10XZ"` where the leftmost
    /// character is the most significant bit.
    ///
    /// Returns `None` if the string contains invalid characters.
    pub fn from_binary_str(s: &str) -> Option<Self> {
        let bits = s
            .chars()
            .rev()
            .map(Logic::from_char)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { bits })
    }

    /// Creates a `LogicVec` from a `u64` value with the given width.
    ///
    /// Bits beyond the given width are ignored.
    pub fn from_u64(value: u64, width: u32) -> Self {
        let bits = (0..width)
            .map(|i| {
                if i < 64 && (value >> i) & 1 != 0 {
                    Logic::One
                } else {
                    Logic::Zero
                }
            })
            .collect();
        Self { bits }
    }

    /// Returns the number of bits.
    pub fn width(&self) -> u32 {
        self.bits.len() as u32
    }

    /// Gets the bit at the given index (0 is the least significant).
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Logic {
        assert!(
            index < self.width(),
            "index {index} out of bounds for width {}",
            self.width()
        );
        self.bits[index as usize]
    }

    /// Sets the bit at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: u32, value: Logic) {
        assert!(
            index < self.width(),
            "index {index} out of bounds for width {}",
            self.width()
        );
        self.bits[index as usize] = value;
    }

    /// Returns bit 0, or `None` for an empty vector.
    pub fn lsb(&self) -> Option<Logic> {
        self.bits.first().copied()
    }

    /// Returns a copy truncated or extended to `width` bits.
    ///
    /// Truncation drops the most significant bits; extension appends
    /// `fill` above the current most significant bit.
    pub fn resized(&self, width: u32, fill: Logic) -> Self {
        let mut bits = self.bits.clone();
        bits.resize(width as usize, fill);
        Self { bits }
    }

    /// Iterates over the bits from most to least significant.
    pub fn iter_msb_first(&self) -> impl Iterator<Item = Logic> + '_ {
        self.bits.iter().rev().copied()
    }
}

impl fmt::Display for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_msb_first() {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicVec({self})")
    }
}
