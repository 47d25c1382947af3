//! Solver backends for circle packing models.
//!
//! Every backend implements [`circlepack_core::Solver`]. The only backend so
//! far is [`ScipCli`], which hands the model to the SCIP executable.

pub mod scip;

pub use scip::{ScipCli, ScipError, write_cip};
