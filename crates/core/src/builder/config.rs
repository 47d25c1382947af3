use crate::config::{ConfigError, is_positive};

/// Configuration for the model builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    width_max: f64,
    height_max: f64,
    separation_slack: f64,
    use_area_surrogate: bool,
    symmetry_breaking: bool,
    area_cutoff: Option<f64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            width_max: 80.0,
            height_max: 80.0,
            separation_slack: 0.1,
            use_area_surrogate: false,
            symmetry_breaking: true,
            area_cutoff: None,
        }
    }
}

impl ModelConfig {
    /// Creates a config with the given box caps and default options.
    ///
    /// # Errors
    ///
    /// Returns an error if either cap is non-finite or not strictly positive.
    pub fn new(width_max: f64, height_max: f64) -> Result<Self, ConfigError> {
        if !is_positive(width_max) {
            return Err(ConfigError::WidthMax);
        }
        if !is_positive(height_max) {
            return Err(ConfigError::HeightMax);
        }

        Ok(Self {
            width_max,
            height_max,
            ..Self::default()
        })
    }

    /// Sets how far two circles may overlap along the line between their centers.
    ///
    /// # Errors
    ///
    /// Returns an error if `slack` is negative or non-finite.
    pub fn with_separation_slack(mut self, slack: f64) -> Result<Self, ConfigError> {
        if !slack.is_finite() || slack < 0.0 {
            return Err(ConfigError::SeparationSlack);
        }
        self.separation_slack = slack;
        Ok(self)
    }

    /// Minimizes an area variable bounded below by `width · height`
    /// instead of the product itself.
    #[must_use]
    pub fn with_area_surrogate(mut self, enabled: bool) -> Self {
        self.use_area_surrogate = enabled;
        self
    }

    /// Enables or disables ordering constraints among equal-radius circles.
    #[must_use]
    pub fn with_symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    /// Rejects boxes whose area exceeds `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns an error if `cutoff` is non-finite or not strictly positive.
    pub fn with_area_cutoff(mut self, cutoff: f64) -> Result<Self, ConfigError> {
        if !is_positive(cutoff) {
            return Err(ConfigError::AreaCutoff);
        }
        self.area_cutoff = Some(cutoff);
        Ok(self)
    }

    /// Returns the upper bound on the box width.
    #[must_use]
    pub fn width_max(&self) -> f64 {
        self.width_max
    }

    /// Returns the upper bound on the box height.
    #[must_use]
    pub fn height_max(&self) -> f64 {
        self.height_max
    }

    /// Returns the separation slack ε.
    #[must_use]
    pub fn separation_slack(&self) -> f64 {
        self.separation_slack
    }

    #[must_use]
    pub fn use_area_surrogate(&self) -> bool {
        self.use_area_surrogate
    }

    #[must_use]
    pub fn symmetry_breaking(&self) -> bool {
        self.symmetry_breaking
    }

    #[must_use]
    pub fn area_cutoff(&self) -> Option<f64> {
        self.area_cutoff
    }
}
