//! Seeding the solver with a known layout.
//!
//! A [`WarmStart`] lists one center per circle plus the box dimensions. It is
//! turned into a full [`Assignment`] for a particular model and, unless the
//! caller opts out, checked for feasibility before it reaches a solver.
//!
//! When the model orders equal-radius circles by x, the seed's centers are
//! permuted within each equal-radius group so they respect that order. Circles
//! of equal radius are interchangeable, so the permuted layout is the same
//! packing under a different labelling.

use thiserror::Error;

use crate::{
    Assignment,
    instance::group_equal_radii,
    model::{Model, Role},
    verify::{Violation, verify},
};

/// Centers of the documented seed for the reference instance.
const REFERENCE_POSITIONS: [(f64, f64); 14] = [
    (13.0, 13.0),
    (13.0, 39.0),
    (49.4, 44.0),
    (49.4, 8.0),
    (33.4, 44.0),
    (33.4, 8.0),
    (29.5, 26.0),
    (54.4, 30.0),
    (54.4, 22.0),
    (46.8, 19.7),
    (46.8, 32.2),
    (41.8, 26.0),
    (38.9, 18.6),
    (38.9, 33.4),
];

/// Errors that can occur when preparing a warm start.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WarmStartError {
    #[error("warm start has {found} positions but the model has {expected} circles")]
    LengthMismatch { expected: usize, found: usize },

    #[error("warm start is infeasible ({} violations, first: {})", .violations.len(), first(.violations))]
    Infeasible { violations: Vec<Violation> },
}

fn first(violations: &[Violation]) -> String {
    violations
        .first()
        .map_or_else(|| "none".to_owned(), ToString::to_string)
}

/// A candidate layout: one center per circle plus the box size.
#[derive(Debug, Clone, PartialEq)]
pub struct WarmStart {
    positions: Vec<(f64, f64)>,
    width: f64,
    height: f64,
}

impl WarmStart {
    /// Creates a warm start from centers in circle order.
    #[must_use]
    pub fn new(positions: Vec<(f64, f64)>, width: f64, height: f64) -> Self {
        Self {
            positions,
            width,
            height,
        }
    }

    /// A hand-picked feasible layout for [`Instance::reference`] in a
    /// 58.4 × 52 box.
    ///
    /// [`Instance::reference`]: crate::Instance::reference
    #[must_use]
    pub fn reference() -> Self {
        Self::new(REFERENCE_POSITIONS.to_vec(), 58.4, 52.0)
    }

    #[must_use]
    pub fn positions(&self) -> &[(f64, f64)] {
        &self.positions
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Builds a full assignment of `model`'s variables from this layout.
    ///
    /// The area surrogate, if the model has one, is set to the larger of the
    /// box area and the model's area lower bound.
    ///
    /// # Errors
    ///
    /// Returns [`WarmStartError::LengthMismatch`] if the number of positions
    /// differs from the number of circles in `model`.
    pub fn assignment(&self, model: &Model) -> Result<Assignment, WarmStartError> {
        let circles = model.circles();
        if self.positions.len() != circles.len() {
            return Err(WarmStartError::LengthMismatch {
                expected: circles.len(),
                found: self.positions.len(),
            });
        }

        let mut positions = self.positions.clone();
        if model.constraints_with_role(Role::SymmetryBreaking).next().is_some() {
            let groups = group_equal_radii(circles.iter().map(|c| c.radius));
            order_groups_by_x(&mut positions, &groups);
        }

        let mut assignment = Assignment::zeros(model);
        for (circle, (x, y)) in circles.iter().zip(positions) {
            assignment.set(circle.x, x);
            assignment.set(circle.y, y);
        }

        let layout = model.layout();
        assignment.set(layout.width, self.width);
        assignment.set(layout.height, self.height);
        if let Some(area) = layout.area {
            assignment.set(area, (self.width * self.height).max(model.area_lower_bound()));
        }

        Ok(assignment)
    }

    /// Turns this layout into a solver candidate for `model`.
    ///
    /// With `validate`, the assignment is checked against every bound and
    /// constraint of `model` and rejected if any is violated by more than
    /// `tolerance`. Without it, the candidate is passed on unchecked and the
    /// solver decides what to do with it.
    ///
    /// # Errors
    ///
    /// Returns [`WarmStartError::LengthMismatch`] on a size mismatch, and
    /// [`WarmStartError::Infeasible`] if validation finds violations.
    pub fn prepare(
        &self,
        model: &Model,
        validate: bool,
        tolerance: f64,
    ) -> Result<Candidate, WarmStartError> {
        let assignment = self.assignment(model)?;

        if validate {
            let violations = verify(model, &assignment, tolerance);
            if !violations.is_empty() {
                return Err(WarmStartError::Infeasible { violations });
            }
        }

        Ok(Candidate {
            assignment,
            checked: validate,
        })
    }
}

/// Sorts centers by x within each group, keeping ties in input order.
fn order_groups_by_x(positions: &mut [(f64, f64)], groups: &[Vec<usize>]) {
    for group in groups.iter().filter(|g| g.len() > 1) {
        let mut members: Vec<(f64, f64)> = group.iter().map(|&i| positions[i]).collect();
        members.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (&i, position) in group.iter().zip(members) {
            positions[i] = position;
        }
    }
}

/// A warm start ready to hand to a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    assignment: Assignment,
    checked: bool,
}

impl Candidate {
    /// Returns the full variable assignment.
    #[must_use]
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Returns true if the assignment was verified feasible before solving.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }
}
