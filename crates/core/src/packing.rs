use crate::{Assignment, Model};

/// A circle with its center read back from a solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCircle {
    /// Position in the instance's radius list.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Circle centers and bounding box dimensions extracted from an assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    pub circles: Vec<PlacedCircle>,
    pub width: f64,
    pub height: f64,
}

impl Packing {
    /// Reads circle centers and box dimensions out of `assignment`.
    #[must_use]
    pub fn from_assignment(model: &Model, assignment: &Assignment) -> Self {
        let layout = model.layout();
        let circles = layout
            .circles
            .iter()
            .enumerate()
            .map(|(index, c)| PlacedCircle {
                index,
                x: assignment.get(c.x),
                y: assignment.get(c.y),
                radius: c.radius,
            })
            .collect();

        Self {
            circles,
            width: assignment.get(layout.width),
            height: assignment.get(layout.height),
        }
    }

    /// Returns the bounding box area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns the fraction of the box covered by circles.
    ///
    /// Returns zero for a degenerate box.
    #[must_use]
    pub fn density(&self) -> f64 {
        let area = self.area();
        if area > 0.0 {
            self.circles
                .iter()
                .map(|c| std::f64::consts::PI * c.radius * c.radius)
                .sum::<f64>()
                / area
        } else {
            0.0
        }
    }
}
