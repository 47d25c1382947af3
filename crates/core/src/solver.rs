//! The interface between a packing model and a solver backend.
//!
//! A backend receives a finished [`Model`], a [`SolverConfig`], and optionally
//! a warm-start [`Candidate`]. It blocks until the underlying solver finishes,
//! hits its time limit, or fails, and returns a [`Solution`].
//!
//! Backends never see how the model was built. Anything that can minimize a
//! nonconvex quadratically constrained program over continuous variables can
//! implement [`Solver`].
//!
//! # Outcomes
//!
//! Running out of time or proving infeasibility is not an error: both are
//! reported through [`Status`]. [`SolverError`] is reserved for failures of
//! the solver itself.

mod config;
mod error;
mod solution;

pub use config::SolverConfig;
pub use error::SolverError;
pub use solution::{Solution, Status};

use crate::{Candidate, Model};

/// A solver backend.
pub trait Solver {
    /// A short name for log messages.
    fn name(&self) -> &str;

    /// Solves `model`, optionally seeded with `warm_start`.
    ///
    /// A returned assignment must hold exactly one value per variable of
    /// `model`, in declaration order. [`Session::solve`](crate::Session::solve)
    /// rejects any other length.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver fails internally or cannot
    /// handle the model under `config`.
    fn solve(
        &self,
        model: &Model,
        config: &SolverConfig,
        warm_start: Option<&Candidate>,
    ) -> Result<Solution, SolverError>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(
        &self,
        model: &Model,
        config: &SolverConfig,
        warm_start: Option<&Candidate>,
    ) -> Result<Solution, SolverError> {
        (**self).solve(model, config, warm_start)
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(
        &self,
        model: &Model,
        config: &SolverConfig,
        warm_start: Option<&Candidate>,
    ) -> Result<Solution, SolverError> {
        (**self).solve(model, config, warm_start)
    }
}
