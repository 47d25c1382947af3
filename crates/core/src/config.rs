use thiserror::Error;

/// Errors that can occur when validating a model or solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("width_max must be finite and positive")]
    WidthMax,

    #[error("height_max must be finite and positive")]
    HeightMax,

    #[error("separation_slack must be finite and non-negative")]
    SeparationSlack,

    #[error("area_cutoff must be finite and positive")]
    AreaCutoff,

    #[error("time_limit_seconds must be finite and positive")]
    TimeLimit,
}

/// Returns true if `value` is finite and strictly positive.
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
