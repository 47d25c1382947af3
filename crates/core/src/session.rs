use crate::{
    Candidate, DEFAULT_TOLERANCE, Model, Solution, Solver, SolverConfig, SolverError, WarmStart,
    WarmStartError, verify,
};

/// One model and its optional warm start, owned by the caller.
///
/// Sessions share nothing, so independent instances can be built and solved
/// side by side in one process.
#[derive(Debug, Clone)]
pub struct Session {
    model: Model,
    warm_start: Option<Candidate>,
}

impl Session {
    #[must_use]
    pub fn new(model: Model) -> Self {
        Self {
            model,
            warm_start: None,
        }
    }

    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the warm start that will be offered to the solver, if any.
    #[must_use]
    pub fn warm_start(&self) -> Option<&Candidate> {
        self.warm_start.as_ref()
    }

    /// Prepares `warm_start` for this session's model and keeps it.
    ///
    /// Replaces any earlier warm start. On error the session keeps no warm
    /// start, and solving proceeds without one.
    ///
    /// # Errors
    ///
    /// Returns the [`WarmStartError`] from [`WarmStart::prepare`].
    pub fn offer_warm_start(
        &mut self,
        warm_start: &WarmStart,
        validate: bool,
        tolerance: f64,
    ) -> Result<(), WarmStartError> {
        self.warm_start = None;
        let candidate = warm_start.prepare(&self.model, validate, tolerance)?;
        tracing::info!(
            checked = candidate.is_checked(),
            area = warm_start.width() * warm_start.height(),
            "warm start accepted"
        );
        self.warm_start = Some(candidate);
        Ok(())
    }

    /// Solves the model with `solver`.
    ///
    /// Solutions that violate the model by more than [`DEFAULT_TOLERANCE`] are
    /// still returned, with a warning logged.
    ///
    /// # Errors
    ///
    /// Returns the [`SolverError`] raised by the backend, or
    /// [`SolverError::Output`] if the backend's assignment does not hold one
    /// value per model variable.
    pub fn solve<S: Solver + ?Sized>(
        &self,
        solver: &S,
        config: &SolverConfig,
    ) -> Result<Solution, SolverError> {
        tracing::info!(
            solver = solver.name(),
            time_limit = config.time_limit_seconds(),
            warm_start = self.warm_start.is_some(),
            "solving"
        );

        let solution = solver.solve(&self.model, config, self.warm_start.as_ref())?;

        if let Some(assignment) = solution.best() {
            let (got, expected) = (assignment.values().len(), self.model.variables().len());
            if got != expected {
                return Err(SolverError::Output(format!(
                    "{} returned {got} values for {expected} variables",
                    solver.name()
                )));
            }
        }

        match solution.best() {
            Some(assignment) => {
                let violations = verify(&self.model, assignment, DEFAULT_TOLERANCE);
                if let Some(worst) = violations.iter().max_by(|a, b| a.amount().total_cmp(&b.amount())) {
                    tracing::warn!(
                        count = violations.len(),
                        worst = %worst,
                        "solver returned a solution outside tolerance"
                    );
                }
                tracing::info!(status = %solution.status, objective = ?solution.objective, "solve finished");
            }
            None => tracing::info!(status = %solution.status, "solve finished without a solution"),
        }

        Ok(solution)
    }
}
