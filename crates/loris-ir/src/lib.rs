#![doc = include_str!("../README.md")]

//! Loris intermediate representation.
//!
//! This crate defines the plant automaton model with its partitioned
//! alphabet, the fault monitor, the recogniser product, and the reader
//! for the textual plant format.

pub mod alphabet;
pub mod automaton;
pub mod monitor;
#[cfg(any(test, feature = "proptest"))]
pub mod proptest_generators;
pub mod reader;
pub mod recognizer;
