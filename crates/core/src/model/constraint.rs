use crate::Assignment;

use super::Expr;

/// The part a constraint plays in the packing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Keeps a circle inside the bounding box along one side.
    Containment,

    /// Caps the bounding box width or height.
    BoxCap,

    /// Keeps two circles from overlapping.
    NonOverlap,

    /// Orders the x coordinates of two interchangeable circles.
    SymmetryBreaking,

    /// Ties the area surrogate to `width · height`.
    AreaLink,

    /// Prunes boxes larger than a known area.
    AreaCutoff,
}

/// A ranged constraint `lhs ≤ expr ≤ rhs`.
///
/// One-sided constraints use an infinite bound on the open side.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    name: String,
    role: Role,
    expr: Expr,
    lhs: f64,
    rhs: f64,
}

impl Constraint {
    /// Creates `expr ≥ lhs`.
    pub(crate) fn at_least(name: impl Into<String>, role: Role, expr: Expr, lhs: f64) -> Self {
        Self {
            name: name.into(),
            role,
            expr,
            lhs,
            rhs: f64::INFINITY,
        }
    }

    /// Creates `expr ≤ rhs`.
    pub(crate) fn at_most(name: impl Into<String>, role: Role, expr: Expr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            role,
            expr,
            lhs: f64::NEG_INFINITY,
            rhs,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Lower bound on the expression; `-∞` when absent.
    #[must_use]
    pub fn lhs(&self) -> f64 {
        self.lhs
    }

    /// Upper bound on the expression; `+∞` when absent.
    #[must_use]
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Returns true if the feasible region of this constraint is convex.
    ///
    /// Linear constraints are. A quadratic constraint is only recognized as
    /// convex when its expression is a positive sum of squares bounded above.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        self.expr.is_linear() || (self.expr.is_separable_convex() && self.lhs == f64::NEG_INFINITY)
    }

    /// Evaluates the expression at `assignment`.
    #[must_use]
    pub fn activity(&self, assignment: &Assignment) -> f64 {
        self.expr.evaluate(assignment)
    }

    /// Amount by which the activity at `assignment` leaves `[lhs, rhs]`, or zero.
    #[must_use]
    pub fn violation(&self, assignment: &Assignment) -> f64 {
        let activity = self.activity(assignment);
        if activity.is_nan() {
            return f64::INFINITY;
        }
        (self.lhs - activity).max(activity - self.rhs).max(0.0)
    }
}
