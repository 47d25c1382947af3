//! The fixed, ordered set of circles to pack.

use std::f64::consts::PI;

use thiserror::Error;

/// Radii of the reference instance: two large, five medium, seven small.
const REFERENCE_RADII: [f64; 14] = [
    13.0, 13.0, 8.0, 8.0, 8.0, 8.0, 8.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0,
];

/// Errors that can occur when constructing an [`Instance`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InstanceError {
    #[error("instance has no circles")]
    Empty,

    #[error("radius of circle {index} must be positive, got {radius}")]
    NonPositiveRadius { index: usize, radius: f64 },

    #[error("radius of circle {index} is not finite")]
    NonFiniteRadius { index: usize },
}

/// An ordered list of circle radii.
///
/// A circle's identity is its position in this list. Construction rejects
/// empty lists and non-positive or non-finite radii, so every `Instance` can
/// be turned into a model without further checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    radii: Vec<f64>,
}

impl Instance {
    /// Creates an instance from radii in circle order.
    ///
    /// # Errors
    ///
    /// Returns an [`InstanceError`] if `radii` is empty or any radius is
    /// non-finite or not strictly positive.
    pub fn new(radii: impl Into<Vec<f64>>) -> Result<Self, InstanceError> {
        let radii = radii.into();
        if radii.is_empty() {
            return Err(InstanceError::Empty);
        }

        for (index, &radius) in radii.iter().enumerate() {
            if radius.is_nan() || radius.is_infinite() {
                return Err(InstanceError::NonFiniteRadius { index });
            }
            if radius <= 0.0 {
                return Err(InstanceError::NonPositiveRadius { index, radius });
            }
        }

        Ok(Self { radii })
    }

    /// The 14-circle instance `[13, 13, 8 ×5, 4 ×7]`.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            radii: REFERENCE_RADII.to_vec(),
        }
    }

    /// The reference instance followed by fourteen circles of radius 2.
    #[must_use]
    pub fn reference_refined() -> Self {
        let mut radii = REFERENCE_RADII.to_vec();
        radii.extend(std::iter::repeat_n(2.0, 14));
        Self { radii }
    }

    /// A larger variant `[65, 65, 40 ×5, 20 ×7, 10 ×7]`.
    ///
    /// Intended for box caps of 800 rather than 80.
    #[must_use]
    pub fn reference_scaled() -> Self {
        let mut radii = vec![65.0, 65.0];
        radii.extend(std::iter::repeat_n(40.0, 5));
        radii.extend(std::iter::repeat_n(20.0, 7));
        radii.extend(std::iter::repeat_n(10.0, 7));
        Self { radii }
    }

    /// Returns the radii in circle order.
    #[must_use]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Returns the number of circles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// Always false; an instance holds at least one circle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Groups circle indices that share exactly the same radius.
    ///
    /// Groups appear in order of their first member, and indices within a
    /// group keep input order. Radii are compared bit for bit, so `4.0` and
    /// `4.000_000_1` land in different groups. Singleton groups are included.
    #[must_use]
    pub fn symmetry_groups(&self) -> Vec<Vec<usize>> {
        group_equal_radii(self.radii.iter().copied())
    }

    /// Sum of the circle areas, `Σ π r²`.
    ///
    /// Circles cannot overlap (beyond the separation slack), so no feasible
    /// bounding box has a smaller area.
    #[must_use]
    pub fn area_lower_bound(&self) -> f64 {
        self.radii.iter().map(|r| PI * r * r).sum()
    }

    /// Smallest sum of two radii, or `None` for a single circle.
    pub(crate) fn smallest_pair_sum(&self) -> Option<f64> {
        if self.radii.len() < 2 {
            return None;
        }
        let mut sorted = self.radii.clone();
        sorted.sort_by(f64::total_cmp);
        Some(sorted[0] + sorted[1])
    }
}

/// Groups indices of bit-identical radii, in order of first appearance.
pub(crate) fn group_equal_radii(radii: impl IntoIterator<Item = f64>) -> Vec<Vec<usize>> {
    let mut groups: Vec<(u64, Vec<usize>)> = Vec::new();
    for (index, radius) in radii.into_iter().enumerate() {
        let key = radius.to_bits();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(index),
            None => groups.push((key, vec![index])),
        }
    }
    groups.into_iter().map(|(_, members)| members).collect()
}
