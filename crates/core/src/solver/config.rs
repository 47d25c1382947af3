use crate::config::{ConfigError, is_positive};

/// Options forwarded to a solver backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    time_limit_seconds: f64,
    verbosity: u8,
    nonconvex_mode: bool,
    display_frequency: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: 40_000.0,
            verbosity: 4,
            nonconvex_mode: true,
            display_frequency: 100,
        }
    }
}

impl SolverConfig {
    /// Creates a config with the given wall-clock limit and default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the time limit is non-finite or not strictly positive.
    pub fn new(time_limit_seconds: f64) -> Result<Self, ConfigError> {
        if !is_positive(time_limit_seconds) {
            return Err(ConfigError::TimeLimit);
        }

        Ok(Self {
            time_limit_seconds,
            ..Self::default()
        })
    }

    /// Sets how much progress output the solver produces.
    ///
    /// Has no effect on the result. The scale is the backend's own; for SCIP
    /// it is `display/verblevel` (0 to 5).
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Enables or disables nonconvex quadratic handling.
    ///
    /// Non-overlap constraints are nonconvex, so disabling this makes every
    /// backend refuse packing models with two or more circles.
    #[must_use]
    pub fn with_nonconvex_mode(mut self, enabled: bool) -> Self {
        self.nonconvex_mode = enabled;
        self
    }

    /// Sets how many nodes pass between progress lines.
    #[must_use]
    pub fn with_display_frequency(mut self, nodes: u32) -> Self {
        self.display_frequency = nodes;
        self
    }

    /// Returns the wall-clock limit in seconds.
    #[must_use]
    pub fn time_limit_seconds(&self) -> f64 {
        self.time_limit_seconds
    }

    #[must_use]
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    #[must_use]
    pub fn nonconvex_mode(&self) -> bool {
        self.nonconvex_mode
    }

    #[must_use]
    pub fn display_frequency(&self) -> u32 {
        self.display_frequency
    }
}
