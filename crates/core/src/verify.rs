use std::fmt;

use crate::{Assignment, model::Model};

/// Absolute tolerance used when checking solutions and warm starts.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A variable bound or constraint that an assignment fails to satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A variable lies outside its bounds.
    Bound {
        variable: String,
        value: f64,
        amount: f64,
    },

    /// A constraint's activity lies outside `[lhs, rhs]`.
    Constraint {
        name: String,
        activity: f64,
        amount: f64,
    },
}

impl Violation {
    /// The variable or constraint name.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::Bound { variable, .. } => variable,
            Self::Constraint { name, .. } => name,
        }
    }

    /// How far outside the feasible range the value lies.
    #[must_use]
    pub fn amount(&self) -> f64 {
        match self {
            Self::Bound { amount, .. } | Self::Constraint { amount, .. } => *amount,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound {
                variable,
                value,
                amount,
            } => write!(f, "{variable} = {value} is out of bounds by {amount:.3e}"),
            Self::Constraint {
                name,
                activity,
                amount,
            } => write!(f, "{name} (activity {activity}) is violated by {amount:.3e}"),
        }
    }
}

/// Checks every variable bound and constraint of `model` at `assignment`.
///
/// Returns the violations larger than `tolerance`, bounds first, in
/// declaration order. An empty result means the assignment is feasible.
///
/// # Panics
///
/// Panics if `assignment` has fewer values than `model` has variables.
#[must_use]
pub fn verify(model: &Model, assignment: &Assignment, tolerance: f64) -> Vec<Violation> {
    let bounds = model.var_ids().filter_map(|id| {
        let variable = model.variable(id);
        let value = assignment[id];
        let amount = variable.bound_violation(value);
        (amount > tolerance).then(|| Violation::Bound {
            variable: variable.name().to_owned(),
            value,
            amount,
        })
    });

    let constraints = model.constraints().iter().filter_map(|c| {
        let amount = c.violation(assignment);
        (amount > tolerance).then(|| Violation::Constraint {
            name: c.name().to_owned(),
            activity: c.activity(assignment),
            amount,
        })
    });

    bounds.chain(constraints).collect()
}
