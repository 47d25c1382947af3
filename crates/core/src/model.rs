//! Solver-neutral representation of a circle packing model.
//!
//! A [`Model`] is a flat list of continuous [`Variable`]s, ranged
//! [`Constraint`]s of the form `lhs ≤ expr ≤ rhs`, and a minimized
//! [`Objective`]. Expressions are at most quadratic ([`Expr`]), which is all a
//! QCQP backend needs to know.
//!
//! On top of the flat lists, a model records its [`Layout`]: which variables
//! hold each circle's center, the bounding box dimensions, and the optional
//! area surrogate. Backends ignore the layout; reporting relies on it.

mod constraint;
mod expr;
mod variable;

pub use constraint::{Constraint, Role};
pub use expr::Expr;
pub use variable::{VarId, Variable};

use crate::Assignment;

/// The variables that describe one circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleVars {
    /// Center x coordinate.
    pub x: VarId,

    /// Center y coordinate.
    pub y: VarId,

    /// Fixed radius from the instance.
    pub radius: f64,
}

/// Where the packing quantities live among the model's variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// One entry per circle, in instance order.
    pub circles: Vec<CircleVars>,

    /// Bounding box width.
    pub width: VarId,

    /// Bounding box height.
    pub height: VarId,

    /// Area surrogate, present only when the surrogate objective is used.
    pub area: Option<VarId>,
}

/// A minimized objective expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    expr: Expr,
}

impl Objective {
    /// Creates an objective that minimizes `expr`.
    #[must_use]
    pub fn minimize(expr: Expr) -> Self {
        Self { expr }
    }

    /// Returns the minimized expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns true if the objective is convex in its variables.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        self.expr.is_linear() || self.expr.is_separable_convex()
    }
}

/// A complete circle packing model.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Objective,
    layout: Layout,
    area_lower_bound: f64,
}

impl Model {
    pub(crate) fn new(
        name: impl Into<String>,
        variables: Vec<Variable>,
        constraints: Vec<Constraint>,
        objective: Objective,
        layout: Layout,
        area_lower_bound: f64,
    ) -> Self {
        Self {
            name: name.into(),
            variables,
            constraints,
            objective,
            layout,
            area_lower_bound,
        }
    }

    /// Returns the problem name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all variables, indexed by [`VarId::index`].
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns the variable behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued for this model.
    #[must_use]
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.index()]
    }

    /// Iterates over variable handles in declaration order.
    pub fn var_ids(&self) -> impl Iterator<Item = VarId> + '_ {
        (0..self.variables.len()).map(VarId::new)
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<VarId> {
        self.variables
            .iter()
            .position(|v| v.name() == name)
            .map(VarId::new)
    }

    /// Returns all constraints in emission order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Iterates over the constraints that play the given role.
    pub fn constraints_with_role(&self, role: Role) -> impl Iterator<Item = &Constraint> + '_ {
        self.constraints.iter().filter(move |c| c.role() == role)
    }

    /// Returns the objective.
    #[must_use]
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Returns the circle and box variable layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the circles in instance order.
    #[must_use]
    pub fn circles(&self) -> &[CircleVars] {
        &self.layout.circles
    }

    /// Returns `Σ π r²`, the area no feasible box can undercut.
    #[must_use]
    pub fn area_lower_bound(&self) -> f64 {
        self.area_lower_bound
    }

    /// Returns true if any constraint or the objective is nonconvex.
    ///
    /// Non-overlap constraints always are, so any model with two or more
    /// circles needs a solver with nonconvex quadratic handling.
    #[must_use]
    pub fn requires_nonconvex(&self) -> bool {
        !self.objective.is_convex() || self.constraints.iter().any(|c| !c.is_convex())
    }

    /// Evaluates the objective at `assignment`.
    #[must_use]
    pub fn objective_value(&self, assignment: &Assignment) -> f64 {
        self.objective.expr.evaluate(assignment)
    }
}
