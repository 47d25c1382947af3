use std::ops::Index;

use crate::model::{Model, VarId};

/// One value per model variable.
///
/// Assignments are produced by solver backends and by the warm-start
/// provider. Values are stored in variable declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    /// Creates an assignment with every variable at zero.
    #[must_use]
    pub fn zeros(model: &Model) -> Self {
        Self {
            values: vec![0.0; model.variables().len()],
        }
    }

    /// Wraps values given in variable declaration order.
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Builds an assignment from `(name, value)` pairs.
    ///
    /// Variables that never appear keep the value zero, which matches how
    /// solvers omit zero entries from their solution files. Names unknown to
    /// the model (a backend's auxiliary variables, for example) are skipped.
    pub fn from_named<'a, I>(model: &Model, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut assignment = Self::zeros(model);
        for (name, value) in pairs {
            match model.find(name) {
                Some(id) => assignment.set(id, value),
                None => tracing::trace!(name, "ignoring value for unknown variable"),
            }
        }
        assignment
    }

    /// Returns the value of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range for this assignment.
    #[must_use]
    pub fn get(&self, id: VarId) -> f64 {
        self.values[id.index()]
    }

    /// Sets the value of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range for this assignment.
    pub fn set(&mut self, id: VarId, value: f64) {
        self.values[id.index()] = value;
    }

    /// Returns all values in variable declaration order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Pairs each model variable name with its value.
    pub fn named<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        model
            .variables()
            .iter()
            .zip(&self.values)
            .map(|(var, &value)| (var.name(), value))
    }
}

impl Index<VarId> for Assignment {
    type Output = f64;

    fn index(&self, id: VarId) -> &f64 {
        &self.values[id.index()]
    }
}
