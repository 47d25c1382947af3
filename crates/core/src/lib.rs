//! Core types for packing circles into a minimum-area rectangle.
//!
//! This crate builds the constraint model that the solver backends consume:
//!
//! - [`Instance`]: the ordered list of circle radii to pack
//! - [`ModelBuilder`]: turns an instance into variables, constraints, and an
//!   objective ([`Model`])
//! - [`WarmStart`]: a known layout offered to the solver as a starting point
//! - [`Solver`]: the narrow interface every solver backend implements
//! - [`Session`]: a caller-owned model plus its warm start, ready to solve
//! - [`Packing`]: circle positions and box dimensions read back from a solution
//!
//! The search itself is never performed here. Backends live in
//! `circlepack-solvers`; reporting and plotting live in `circlepack-render`.

mod assignment;
mod builder;
mod config;
mod instance;
mod packing;
mod session;
mod verify;
mod warm_start;

pub mod model;
pub mod solver;

pub use assignment::Assignment;
pub use builder::{BuildError, ModelBuilder, ModelConfig, build};
pub use config::ConfigError;
pub use instance::{Instance, InstanceError};
pub use model::{Model, VarId};
pub use packing::{Packing, PlacedCircle};
pub use session::Session;
pub use solver::{Solution, Solver, SolverConfig, SolverError, Status};
pub use verify::{DEFAULT_TOLERANCE, Violation, verify};
pub use warm_start::{Candidate, WarmStart, WarmStartError};
