use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use circlepack_core::{ConfigError, DEFAULT_TOLERANCE, Instance, ModelConfig, SolverConfig, WarmStart};

/// Which built-in radius list to pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 14 circles with radii 13, 8, and 4.
    Reference,
    /// The reference circles plus 14 more of radius 2.
    Refined,
    /// 21 circles with radii 65, 40, 20, 10.
    Scaled,
}

impl Preset {
    pub fn instance(self) -> Instance {
        match self {
            Self::Reference => Instance::reference(),
            Self::Refined => Instance::reference_refined(),
            Self::Scaled => Instance::reference_scaled(),
        }
    }

    /// Box caps used when none are given on the command line.
    pub fn default_caps(self) -> (f64, f64) {
        match self {
            Self::Reference | Self::Refined => (80.0, 80.0),
            Self::Scaled => (800.0, 800.0),
        }
    }

    /// The known layout for this preset, if there is one.
    pub fn warm_start(self) -> Option<WarmStart> {
        match self {
            Self::Reference => Some(WarmStart::reference()),
            Self::Refined | Self::Scaled => None,
        }
    }
}

/// Pack circles into a minimum-area rectangle with SCIP.
#[derive(Debug, Parser)]
#[command(name = "circlepack", version, about)]
pub struct Cli {
    /// Radius list to pack.
    #[arg(long, value_enum, default_value_t = Preset::Reference)]
    pub instance: Preset,

    /// Upper bound on the box width [default: 80, or 800 for `scaled`].
    #[arg(long)]
    pub width_max: Option<f64>,

    /// Upper bound on the box height [default: 80, or 800 for `scaled`].
    #[arg(long)]
    pub height_max: Option<f64>,

    /// Amount subtracted from each pair's minimum center distance.
    #[arg(long, default_value_t = 0.1)]
    pub slack: f64,

    /// Minimize an area variable linked to width times height.
    #[arg(long)]
    pub surrogate: bool,

    /// Do not order equal-radius circles by x.
    #[arg(long)]
    pub no_symmetry_breaking: bool,

    /// Reject boxes with area above this value.
    #[arg(long)]
    pub area_cutoff: Option<f64>,

    /// Solver wall-clock limit in seconds.
    #[arg(long, default_value_t = 40_000.0)]
    pub time_limit: f64,

    /// Solver output level (SCIP `display/verblevel`, 0 to 5).
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub verbosity: u8,

    /// Nodes between solver progress lines.
    #[arg(long, default_value_t = 100)]
    pub display_frequency: u32,

    /// Refuse nonconvex models instead of solving them.
    #[arg(long)]
    pub no_nonconvex: bool,

    /// Do not offer the known layout to the solver.
    #[arg(long)]
    pub no_warm_start: bool,

    /// Offer the known layout without checking it first.
    #[arg(long)]
    pub unchecked_warm_start: bool,

    /// Absolute tolerance for checking warm starts and solutions.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// SCIP executable.
    #[arg(long, default_value = "scip")]
    pub scip: PathBuf,

    /// Write the model in CIP format to this path.
    #[arg(long, value_name = "PATH")]
    pub write_model: Option<PathBuf>,

    /// Write an SVG image of the packing to this path.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// List every variable's value in the report.
    #[arg(long)]
    pub print_solution: bool,

    /// Show the packing in a window.
    #[cfg(feature = "plot")]
    #[arg(long)]
    pub plot: bool,

    /// Log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the model options from the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if a cap, the slack, or the cutoff is out of range.
    pub fn model_config(&self) -> Result<ModelConfig, ConfigError> {
        let (width, height) = self.instance.default_caps();
        let mut config = ModelConfig::new(
            self.width_max.unwrap_or(width),
            self.height_max.unwrap_or(height),
        )?
        .with_separation_slack(self.slack)?
        .with_area_surrogate(self.surrogate)
        .with_symmetry_breaking(!self.no_symmetry_breaking);

        if let Some(cutoff) = self.area_cutoff {
            config = config.with_area_cutoff(cutoff)?;
        }
        Ok(config)
    }

    /// Builds the solver options from the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the time limit is out of range.
    pub fn solver_config(&self) -> Result<SolverConfig, ConfigError> {
        Ok(SolverConfig::new(self.time_limit)?
            .with_verbosity(self.verbosity)
            .with_nonconvex_mode(!self.no_nonconvex)
            .with_display_frequency(self.display_frequency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("circlepack").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn defaults_match_reference_setup() {
        let cli = parse(&[]);
        let model = cli.model_config().unwrap();
        let solver = cli.solver_config().unwrap();

        assert_eq!(cli.instance, Preset::Reference);
        assert_eq!(model, ModelConfig::default());
        assert_eq!(solver, SolverConfig::default());
        assert_eq!(cli.tolerance, DEFAULT_TOLERANCE);
        assert!(cli.instance.warm_start().is_some());
    }

    #[test]
    fn scaled_preset_uses_larger_caps() {
        let cli = parse(&["--instance", "scaled"]);
        let model = cli.model_config().unwrap();

        assert_eq!(model.width_max(), 800.0);
        assert_eq!(model.height_max(), 800.0);
        assert!(cli.instance.warm_start().is_none());
    }

    #[test]
    fn flags_reach_the_configs() {
        let cli = parse(&[
            "--width-max",
            "60",
            "--surrogate",
            "--no-symmetry-breaking",
            "--area-cutoff",
            "3100",
            "--time-limit",
            "5",
            "--verbosity",
            "0",
            "--no-nonconvex",
            "-vv",
        ]);
        let model = cli.model_config().unwrap();
        let solver = cli.solver_config().unwrap();

        assert_eq!(model.width_max(), 60.0);
        assert_eq!(model.height_max(), 80.0);
        assert!(model.use_area_surrogate());
        assert!(!model.symmetry_breaking());
        assert_eq!(model.area_cutoff(), Some(3100.0));
        assert_eq!(solver.time_limit_seconds(), 5.0);
        assert_eq!(solver.verbosity(), 0);
        assert!(!solver.nonconvex_mode());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn invalid_values_become_config_errors() {
        assert_eq!(
            parse(&["--time-limit", "0"]).solver_config(),
            Err(ConfigError::TimeLimit)
        );
        assert_eq!(
            parse(&["--height-max=-1"]).model_config(),
            Err(ConfigError::HeightMax)
        );
    }

    #[test]
    fn rejects_verbosity_outside_scip_range() {
        assert_eq!(parse(&["--verbosity", "5"]).verbosity, 5);
        assert!(Cli::try_parse_from(["circlepack", "--verbosity", "9"]).is_err());
    }

    #[test]
    fn rejects_unknown_instance() {
        assert!(Cli::try_parse_from(["circlepack", "--instance", "huge"]).is_err());
    }
}
