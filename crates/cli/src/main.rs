//! `circlepack`: pack circles into a minimum-area rectangle.
//!
//! Builds the model for a built-in instance, offers the known layout as a warm
//! start, solves with SCIP, and prints a report. Optionally writes the model
//! as CIP, the packing as SVG, and (with the `plot` feature) opens a window.
//!
//! Logging goes to stderr; the report goes to stdout.

mod args;

use std::{
    fs::File,
    io::{BufWriter, Write},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use circlepack_core::{ModelBuilder, Packing, Session, verify};
use circlepack_render::{Report, save_svg};
use circlepack_solvers::{ScipCli, write_cip};

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

/// Filter directives for a `-v` count.
///
/// SCIP's own progress output is shown at every level; `--verbosity` decides
/// how much of it there is.
fn log_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,scip=info",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_directives(0))),
        n => EnvFilter::new(log_directives(n)),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let instance = cli.instance.instance();
    let model_config = cli.model_config().context("invalid model options")?;
    let solver_config = cli.solver_config().context("invalid solver options")?;

    let model = ModelBuilder::new(model_config)
        .try_build(&instance)
        .context("failed to build the model")?;
    tracing::info!(
        instance = ?cli.instance,
        circles = instance.len(),
        variables = model.variables().len(),
        constraints = model.constraints().len(),
        "model built"
    );

    if let Some(path) = &cli.write_model {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        write_cip(&model, &mut out)
            .and_then(|()| out.flush())
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote model");
    }

    let mut session = Session::new(model);

    match cli.instance.warm_start() {
        Some(warm_start) if !cli.no_warm_start => {
            let validate = !cli.unchecked_warm_start;
            if let Err(err) = session.offer_warm_start(&warm_start, validate, cli.tolerance) {
                tracing::warn!(%err, "warm start rejected, solving without one");
            }
        }
        Some(_) => tracing::info!("warm start disabled"),
        None => tracing::info!("no known layout for this instance"),
    }

    let solver = ScipCli::new(&cli.scip);
    let solution = session
        .solve(&solver, &solver_config)
        .with_context(|| format!("solving with {} failed", cli.scip.display()))?;

    let model = session.model();
    print!("{}", Report::new(model, &solution).with_variables(cli.print_solution));

    let Some(assignment) = solution.best() else {
        if cli.svg.is_some() {
            tracing::warn!("no solution found, skipping the image");
        }
        return Ok(());
    };

    let violations = verify(model, assignment, cli.tolerance);
    for violation in &violations {
        tracing::warn!(%violation, "solution violates the model");
    }

    let packing = Packing::from_assignment(model, assignment);

    if let Some(path) = &cli.svg {
        save_svg(&packing, path)?;
    }

    #[cfg(feature = "plot")]
    if cli.plot {
        circlepack_render::show(&packing)
            .map_err(|err| anyhow::anyhow!("failed to open the plot window: {err}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_shows_solver_progress() {
        assert!(log_directives(0).contains("scip=info"));
        for verbose in 0..4 {
            assert!(EnvFilter::try_new(log_directives(verbose)).is_ok());
        }
    }
}
