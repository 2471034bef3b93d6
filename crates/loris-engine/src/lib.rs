#![doc = include_str!("../README.md")]

//! Loris diagnosability engine.
//!
//! This crate builds the deterministic observer of the fault
//! recogniser, labels its macro-states, analyses uncertain cycles, and
//! reports the diagnosability verdict.

pub mod cycles;
pub mod labeling;
pub mod observer;
pub mod pipeline;
pub mod result;
pub mod visualization;
