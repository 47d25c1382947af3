//! Builds the packing model from an instance.
//!
//! # Variables
//!
//! In declaration order:
//!
//! - `x_i`, `y_i`: center of circle `i`, bounded by `[0, W_max]` and `[0, H_max]`
//! - `x_max`, `y_max`: box width and height, bounded by `[0, W_max]` and `[0, H_max]`
//! - `area`: only with the area surrogate, bounded below by `Σ π r²`
//!
//! # Constraints
//!
//! - `boundaryleft_i`, `boundaryright_i`, `boundarybottom_i`, `boundarytop_i`:
//!   circle `i` lies within `[r_i, x_max - r_i] × [r_i, y_max - r_i]`
//! - `w_ub`, `h_ub`: the box caps, repeated as explicit constraints
//! - `area_link`: with the surrogate, `x_max · y_max - area ≤ 0`
//! - `nooverlap_i_j`: for every `i < j`,
//!   `(x_i - x_j)² + (y_i - y_j)² ≥ (r_i + r_j - ε)²`
//! - `symmetry_i_j`: `x_i ≤ x_j` for consecutive members of an equal-radius group
//! - `area_cutoff`: without the surrogate, `x_max · y_max ≤ cutoff` when a
//!   cutoff is configured (with the surrogate, the cutoff caps `area` instead)
//!
//! # Objective
//!
//! Minimize `x_max · y_max`, or minimize `area` when the surrogate is enabled.
//! Both forms share the same optimum; the surrogate gives the solver a
//! variable whose lower bound it can tighten.

mod config;


pub use config::ModelConfig;

use thiserror::Error;

use crate::{
    ConfigError, Instance, InstanceError,
    model::{CircleVars, Constraint, Expr, Layout, Model, Objective, Role, VarId, Variable},
};

const MODEL_NAME: &str = "optimal_circle_packing";

/// Errors that can occur when building a model.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BuildError {
    #[error("invalid instance: {0}")]
    Instance(#[from] InstanceError),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("separation slack {slack} leaves no separation for radii summing to {pair_sum}")]
    SlackTooLarge { slack: f64, pair_sum: f64 },

    #[error("area cutoff {cutoff} is below the area lower bound {lower_bound}")]
    CutoffBelowLowerBound { cutoff: f64, lower_bound: f64 },
}

/// Builds a model for `radii` with the given box caps and default options.
///
/// # Errors
///
/// Returns an error if the radii do not form a valid [`Instance`] or the caps
/// are not finite and positive.
pub fn build(radii: &[f64], bounds: (f64, f64)) -> Result<Model, BuildError> {
    let instance = Instance::new(radii)?;
    let config = ModelConfig::new(bounds.0, bounds.1)?;
    ModelBuilder::new(config).try_build(&instance)
}

/// Turns an [`Instance`] into a [`Model`] according to a [`ModelConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelBuilder {
    config: ModelConfig,
}

impl ModelBuilder {
    #[must_use]
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Builds the model, checking that the config suits the instance.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::SlackTooLarge`] if the separation slack reaches the
    /// sum of the two smallest radii, and
    /// [`BuildError::CutoffBelowLowerBound`] if the area cutoff excludes every
    /// packing.
    pub fn try_build(&self, instance: &Instance) -> Result<Model, BuildError> {
        let slack = self.config.separation_slack();
        if let Some(pair_sum) = instance.smallest_pair_sum() {
            if slack >= pair_sum {
                return Err(BuildError::SlackTooLarge { slack, pair_sum });
            }
        }

        if let Some(cutoff) = self.config.area_cutoff() {
            let lower_bound = instance.area_lower_bound();
            if cutoff < lower_bound {
                return Err(BuildError::CutoffBelowLowerBound {
                    cutoff,
                    lower_bound,
                });
            }
        }

        Ok(self.build(instance))
    }

    /// Builds the model without the instance-specific checks of [`try_build`].
    ///
    /// The result is always a well-formed model, though it may be infeasible.
    ///
    /// [`try_build`]: ModelBuilder::try_build
    #[must_use]
    pub fn build(&self, instance: &Instance) -> Model {
        let config = &self.config;
        let (w_max, h_max) = (config.width_max(), config.height_max());
        let lower_bound = instance.area_lower_bound();

        let mut vars = Vars::default();
        let circles: Vec<CircleVars> = instance
            .radii()
            .iter()
            .enumerate()
            .map(|(i, &radius)| CircleVars {
                x: vars.add(format!("x_{i}"), 0.0, w_max),
                y: vars.add(format!("y_{i}"), 0.0, h_max),
                radius,
            })
            .collect();

        let width = vars.add("x_max", 0.0, w_max);
        let height = vars.add("y_max", 0.0, h_max);
        let area = config.use_area_surrogate().then(|| {
            let upper = config.area_cutoff().unwrap_or(f64::INFINITY);
            vars.add("area", lower_bound, upper)
        });

        let mut constraints = Vec::new();

        for (i, c) in circles.iter().enumerate() {
            if 2.0 * c.radius > w_max || 2.0 * c.radius > h_max {
                tracing::warn!(circle = i, radius = c.radius, "circle cannot fit within the box caps");
            }
            constraints.extend(containment(i, c, width, height));
        }

        constraints.push(Constraint::at_most("w_ub", Role::BoxCap, Expr::var(width), w_max));
        constraints.push(Constraint::at_most("h_ub", Role::BoxCap, Expr::var(height), h_max));

        if let Some(area) = area {
            constraints.push(Constraint::at_most(
                "area_link",
                Role::AreaLink,
                Expr::product(width, height).plus(area, -1.0),
                0.0,
            ));
        }

        constraints.extend(non_overlap(&circles, config.separation_slack()));

        if config.symmetry_breaking() {
            constraints.extend(symmetry_breaking(instance, &circles));
        }

        if let (None, Some(cutoff)) = (area, config.area_cutoff()) {
            constraints.push(Constraint::at_most(
                "area_cutoff",
                Role::AreaCutoff,
                Expr::product(width, height),
                cutoff,
            ));
        }

        let objective = match area {
            Some(area) => Objective::minimize(Expr::var(area)),
            None => Objective::minimize(Expr::product(width, height)),
        };

        tracing::debug!(
            circles = circles.len(),
            variables = vars.list.len(),
            constraints = constraints.len(),
            surrogate = area.is_some(),
            "built packing model"
        );

        let layout = Layout {
            circles,
            width,
            height,
            area,
        };

        Model::new(MODEL_NAME, vars.list, constraints, objective, layout, lower_bound)
    }
}

/// Accumulates variables and hands out their handles.
#[derive(Default)]
struct Vars {
    list: Vec<Variable>,
}

impl Vars {
    fn add(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> VarId {
        let id = VarId::new(self.list.len());
        self.list.push(Variable::new(name, lower, upper));
        id
    }
}

/// The four sides of the box, for circle `i`.
fn containment(i: usize, c: &CircleVars, width: VarId, height: VarId) -> [Constraint; 4] {
    let r = c.radius;
    [
        Constraint::at_least(format!("boundaryleft_{i}"), Role::Containment, Expr::var(c.x), r),
        Constraint::at_most(
            format!("boundaryright_{i}"),
            Role::Containment,
            Expr::var(c.x).plus(width, -1.0),
            -r,
        ),
        Constraint::at_least(format!("boundarybottom_{i}"), Role::Containment, Expr::var(c.y), r),
        Constraint::at_most(
            format!("boundarytop_{i}"),
            Role::Containment,
            Expr::var(c.y).plus(height, -1.0),
            -r,
        ),
    ]
}

/// One constraint per unordered pair; `n(n-1)/2` in total.
fn non_overlap(circles: &[CircleVars], slack: f64) -> Vec<Constraint> {
    let n = circles.len();
    let mut constraints = Vec::with_capacity(n * n.saturating_sub(1) / 2);

    for (i, a) in circles.iter().enumerate() {
        for (j, b) in circles.iter().enumerate().skip(i + 1) {
            let min_sep = a.radius + b.radius - slack;
            let expr = Expr::squared_difference(a.x, b.x).plus_expr(Expr::squared_difference(a.y, b.y));
            constraints.push(Constraint::at_least(
                format!("nooverlap_{i}_{j}"),
                Role::NonOverlap,
                expr,
                min_sep * min_sep,
            ));
        }
    }

    constraints
}

/// `x_i ≤ x_j` for each consecutive pair within an equal-radius group.
fn symmetry_breaking(instance: &Instance, circles: &[CircleVars]) -> Vec<Constraint> {
    instance
        .symmetry_groups()
        .iter()
        .flat_map(|group| group.windows(2))
        .map(|pair| {
            let (i, j) = (pair[0], pair[1]);
            Constraint::at_most(
                format!("symmetry_{i}_{j}"),
                Role::SymmetryBreaking,
                Expr::var(circles[i].x).plus(circles[j].x, -1.0),
                0.0,
            )
        })
        .collect()
}
