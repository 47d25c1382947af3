use std::fmt;

use crate::Assignment;

/// How the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Proved the best solution optimal.
    Optimal,

    /// Hit the time limit holding a feasible, unproven solution.
    TimeLimitFeasible,

    /// Proved that no packing satisfies the model.
    Infeasible,

    /// Hit the time limit without finding any feasible solution.
    TimeLimitNoSolution,
}

impl Status {
    /// Returns true if this status comes with a solution.
    #[must_use]
    pub fn has_solution(self) -> bool {
        matches!(self, Self::Optimal | Self::TimeLimitFeasible)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Optimal => "optimal",
            Self::TimeLimitFeasible => "time limit reached (feasible)",
            Self::Infeasible => "infeasible",
            Self::TimeLimitNoSolution => "time limit reached (no solution)",
        })
    }
}

/// The result of a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// How the solver terminated.
    pub status: Status,

    /// Objective value reported by the solver, if it found a solution.
    pub objective: Option<f64>,

    /// Best assignment found, present exactly when `status.has_solution()`.
    pub assignment: Option<Assignment>,
}

impl Solution {
    /// A solution carrying an assignment.
    #[must_use]
    pub fn found(status: Status, objective: f64, assignment: Assignment) -> Self {
        debug_assert!(status.has_solution());
        Self {
            status,
            objective: Some(objective),
            assignment: Some(assignment),
        }
    }

    /// A terminal status without an assignment.
    #[must_use]
    pub fn none(status: Status) -> Self {
        debug_assert!(!status.has_solution());
        Self {
            status,
            objective: None,
            assignment: None,
        }
    }

    /// Returns the assignment if the solver found one.
    #[must_use]
    pub fn best(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }
}
