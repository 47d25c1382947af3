use crate::Assignment;

use super::VarId;

/// A quadratic expression: `Σ cᵢ·vᵢ + Σ qₖ·aₖ·bₖ`.
///
/// There is no constant term; constraints fold constants into their bounds.
/// A square is a product term whose two factors are the same variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    linear: Vec<(VarId, f64)>,
    quadratic: Vec<(VarId, VarId, f64)>,
}

impl Expr {
    /// Creates an empty expression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the expression `1·var`.
    #[must_use]
    pub fn var(var: VarId) -> Self {
        Self::new().plus(var, 1.0)
    }

    /// Creates the expression `a·b`.
    #[must_use]
    pub fn product(a: VarId, b: VarId) -> Self {
        Self::new().plus_product(a, b, 1.0)
    }

    /// Creates `(a - b)²` expanded as `a² + b² - 2ab`.
    #[must_use]
    pub fn squared_difference(a: VarId, b: VarId) -> Self {
        Self::new()
            .plus_product(a, a, 1.0)
            .plus_product(b, b, 1.0)
            .plus_product(a, b, -2.0)
    }

    /// Appends a linear term.
    #[must_use]
    pub fn plus(mut self, var: VarId, coef: f64) -> Self {
        self.linear.push((var, coef));
        self
    }

    /// Appends a product term.
    #[must_use]
    pub fn plus_product(mut self, a: VarId, b: VarId, coef: f64) -> Self {
        self.quadratic.push((a, b, coef));
        self
    }

    /// Appends every term of `other`.
    #[must_use]
    pub fn plus_expr(mut self, other: Expr) -> Self {
        self.linear.extend(other.linear);
        self.quadratic.extend(other.quadratic);
        self
    }

    #[must_use]
    pub fn linear_terms(&self) -> &[(VarId, f64)] {
        &self.linear
    }

    #[must_use]
    pub fn quadratic_terms(&self) -> &[(VarId, VarId, f64)] {
        &self.quadratic
    }

    /// Returns true if the expression has no product terms.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.quadratic.is_empty()
    }

    /// Returns true if every product term is a square with a positive coefficient.
    ///
    /// This is a sufficient (not necessary) condition for convexity; `(a - b)²`
    /// written with a cross term is reported as not separable.
    #[must_use]
    pub fn is_separable_convex(&self) -> bool {
        self.quadratic.iter().all(|&(a, b, q)| a == b && q > 0.0)
    }

    /// Evaluates the expression at `assignment`.
    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        let linear: f64 = self
            .linear
            .iter()
            .map(|&(v, c)| c * assignment[v])
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .map(|&(a, b, q)| q * assignment[a] * assignment[b])
            .sum();
        linear + quadratic
    }
}
