//! Reading and writing SCIP solution files.
//!
//! A solution file starts with a `solution status:` line, followed by an
//! `objective value:` line and one `name value` line per variable. When SCIP
//! has nothing to report the second line reads `no solution available`.

use std::io::{self, Write};

use circlepack_core::{Assignment, Model, SolverError};

use super::cip::{EPIGRAPH_VAR, number};

/// How SCIP says it terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Termination {
    Optimal,
    Infeasible,
    /// Stopped by a time, node, gap, or similar limit, or by an interrupt.
    Limit,
    MemoryLimit,
    Other(String),
}

impl Termination {
    fn classify(status: &str) -> Self {
        let status = status.trim();
        if status.starts_with("optimal solution found") {
            Self::Optimal
        } else if status == "infeasible" {
            Self::Infeasible
        } else if status.starts_with("memory limit") {
            Self::MemoryLimit
        } else if status.contains("limit reached")
            || status.contains("interrupt")
            || status.contains("termination signal")
        {
            Self::Limit
        } else {
            Self::Other(status.to_owned())
        }
    }
}

/// The parsed contents of a solution file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolFile {
    pub termination: Termination,
    pub objective: Option<f64>,
    /// Variable values, or `None` if SCIP reported no solution.
    pub values: Option<Vec<(String, f64)>>,
}

/// Parses the text of a solution file written by `write solution`.
pub(crate) fn parse_sol(text: &str) -> Result<SolFile, SolverError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let status = lines
        .next()
        .and_then(|l| l.strip_prefix("solution status:"))
        .ok_or_else(|| SolverError::Output("solution file has no status line".into()))?;
    let termination = Termination::classify(status);

    let mut objective = None;
    let mut values = Some(Vec::new());

    for line in lines {
        if line.starts_with("no solution available") {
            values = None;
            break;
        }
        if let Some(rest) = line.strip_prefix("objective value:") {
            objective = Some(parse_value(rest.trim(), "objective value")?);
            continue;
        }

        let mut tokens = line.split_whitespace();
        let (Some(name), Some(value)) = (tokens.next(), tokens.next()) else {
            return Err(SolverError::Output(format!("malformed solution line: {line:?}")));
        };
        if let Some(values) = values.as_mut() {
            values.push((name.to_owned(), parse_value(value, name)?));
        }
    }

    Ok(SolFile {
        termination,
        objective,
        values,
    })
}

fn parse_value(token: &str, what: &str) -> Result<f64, SolverError> {
    match token {
        "+infinity" | "infinity" => Ok(f64::INFINITY),
        "-infinity" => Ok(f64::NEG_INFINITY),
        _ => token
            .parse()
            .map_err(|_| SolverError::Output(format!("invalid value {token:?} for {what}"))),
    }
}

/// Writes `assignment` as a solution file SCIP can read as a warm start.
///
/// When the model's objective is written through an epigraph variable, that
/// variable is set to the objective value so the warm start stays feasible.
pub(crate) fn write_sol<W: Write>(model: &Model, assignment: &Assignment, out: &mut W) -> io::Result<()> {
    let objective = model.objective_value(assignment);

    writeln!(out, "solution status: warm start")?;
    writeln!(out, "objective value: {}", number(objective))?;
    for (name, value) in assignment.named(model) {
        writeln!(out, "{name} {}", number(value))?;
    }
    if !model.objective().expr().is_linear() {
        writeln!(out, "{EPIGRAPH_VAR} {}", number(objective))?;
    }
    Ok(())
}
