use std::fmt;

use circlepack_core::{Model, Packing, Solution};

/// A plain-text summary of a solve.
///
/// Lists the status, the objective reported by the solver, the realized box,
/// and one `circle i: x= y= r=` line per circle. With
/// [`with_variables`](Report::with_variables) it also lists every model
/// variable and its value.
///
/// Statuses without a solution print `no solution found` after the status.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    model: &'a Model,
    solution: &'a Solution,
    variables: bool,
}

impl<'a> Report<'a> {
    #[must_use]
    pub fn new(model: &'a Model, solution: &'a Solution) -> Self {
        Self {
            model,
            solution,
            variables: false,
        }
    }

    /// Appends the full variable listing.
    #[must_use]
    pub fn with_variables(mut self, enabled: bool) -> Self {
        self.variables = enabled;
        self
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "status: {}", self.solution.status)?;

        let Some(assignment) = self.solution.best() else {
            return writeln!(f, "no solution found");
        };

        let packing = Packing::from_assignment(self.model, assignment);
        if let Some(objective) = self.solution.objective {
            writeln!(f, "objective: {objective:.6}")?;
        }
        writeln!(
            f,
            "area: {:.6} (width {:.6}, height {:.6})",
            packing.area(),
            packing.width,
            packing.height
        )?;
        writeln!(f, "density: {:.4}", packing.density())?;

        for c in &packing.circles {
            writeln!(f, "circle {}: x={:.6} y={:.6} r={}", c.index, c.x, c.y, c.radius)?;
        }

        if self.variables {
            writeln!(f, "solution:")?;
            for (name, value) in assignment.named(self.model) {
                writeln!(f, "  {name:<16} {value}")?;
            }
        }

        Ok(())
    }
}
