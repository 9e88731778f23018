//! Shared foundational types for the vhdlgen back-end.
//!
//! This crate provides the four-state [`Logic`] value and the LSB-first
//! [`LogicVec`] bit string that literal expressions are built from.

#![warn(missing_docs)]

pub mod logic;
pub mod logic_vec;

pub use logic::Logic;
pub use logic_vec::LogicVec;
