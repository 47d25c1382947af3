/// Handle to a variable within one [`Model`](super::Model).
///
/// Handles are plain indices; using a handle with a different model is a
/// logic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of this variable in the model's variable list.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A continuous decision variable with bounds.
///
/// Either bound may be infinite.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    lower: f64,
    upper: f64,
}

impl Variable {
    pub(crate) fn new(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            lower,
            upper,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Amount by which `value` falls outside the bounds, or zero.
    ///
    /// A NaN value is infinitely far from any bound.
    #[must_use]
    pub fn bound_violation(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::INFINITY;
        }
        (self.lower - value).max(value - self.upper).max(0.0)
    }
}
