//! A backend that drives the SCIP command-line solver.
//!
//! # Exchange
//!
//! Each solve works in a fresh temporary directory:
//!
//! 1. The model is written as `model.cip` (see [`write_cip`]).
//! 2. A warm start, if any, is written as `start.sol`.
//! 3. A batch file sets the limits, reads both files, optimizes, and writes
//!    `result.sol`.
//! 4. `scip -b commands.txt` runs to completion and `result.sol` is parsed.
//!
//! SCIP's stdout is forwarded line by line, as it is printed, to `tracing`
//! events at `info` level with target `scip`. The directory is removed when
//! the solve returns.
//!
//! # Outcomes
//!
//! | SCIP status                     | Result                                   |
//! |---------------------------------|------------------------------------------|
//! | optimal solution found          | [`Status::Optimal`]                      |
//! | infeasible                      | [`Status::Infeasible`]                   |
//! | time, node, gap, ... limit      | [`Status::TimeLimitFeasible`] or [`Status::TimeLimitNoSolution`] |
//! | memory limit reached            | [`SolverError::ResourceExhausted`]       |
//! | anything else                   | [`ScipError::UnexpectedStatus`]          |

mod cip;
mod error;
mod sol;

#[cfg(all(test, unix))]
mod tests;

pub use cip::write_cip;
pub use error::ScipError;

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread,
};

use circlepack_core::{
    Assignment, Candidate, Model, Solution, Solver, SolverConfig, SolverError, Status,
};

use sol::{Termination, parse_sol, write_sol};

const MODEL_FILE: &str = "model.cip";
const START_FILE: &str = "start.sol";
const RESULT_FILE: &str = "result.sol";
const COMMANDS_FILE: &str = "commands.txt";

/// Highest `display/verblevel` SCIP accepts.
const MAX_VERBLEVEL: u8 = 5;

/// Runs the `scip` executable as a child process.
#[derive(Debug, Clone)]
pub struct ScipCli {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Default for ScipCli {
    fn default() -> Self {
        Self::new("scip")
    }
}

impl ScipCli {
    /// Uses `program` as the SCIP executable.
    ///
    /// A bare name is looked up on `PATH`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds an argument passed to the program ahead of `-b <batch file>`.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn run(
        &self,
        model: &Model,
        config: &SolverConfig,
        warm_start: Option<&Candidate>,
    ) -> Result<Solution, SolverError> {
        let dir = tempfile::Builder::new().prefix("circlepack-scip-").tempdir()?;
        let model_path = dir.path().join(MODEL_FILE);
        let start_path = dir.path().join(START_FILE);
        let result_path = dir.path().join(RESULT_FILE);
        let commands_path = dir.path().join(COMMANDS_FILE);

        write_with(&model_path, |out| write_cip(model, out))?;
        if let Some(candidate) = warm_start {
            write_with(&start_path, |out| write_sol(model, candidate.assignment(), out))?;
        }

        let verblevel = config.verbosity().min(MAX_VERBLEVEL);
        if verblevel != config.verbosity() {
            tracing::warn!(
                requested = config.verbosity(),
                used = verblevel,
                "SCIP verbosity out of range"
            );
        }

        let mut commands = format!(
            "set limits time {}\n\
             set display verblevel {}\n\
             set display freq {}\n\
             set write printzeros TRUE\n\
             read {}\n",
            config.time_limit_seconds(),
            verblevel,
            config.display_frequency(),
            quoted(&model_path),
        );
        if warm_start.is_some() {
            commands.push_str(&format!("read {}\n", quoted(&start_path)));
        }
        commands.push_str(&format!(
            "optimize\nwrite solution {}\nquit\n",
            quoted(&result_path)
        ));
        fs::write(&commands_path, commands)?;

        tracing::debug!(dir = %dir.path().display(), program = %self.program.display(), "running SCIP");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("-b")
            .arg(&commands_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => SolverError::backend(ScipError::NotFound {
                    program: self.program.clone(),
                }),
                _ => SolverError::Io(err),
            })?;

        // Drained on its own thread so a chatty stderr cannot block stdout.
        let stderr = child
            .stderr
            .take()
            .map(|pipe| thread::spawn(move || read_lossy(pipe)));

        if let Some(stdout) = child.stdout.take() {
            if let Err(err) = for_each_line(stdout, |line| tracing::info!(target: "scip", "{line}")) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(err.into());
            }
        }

        let status = child.wait()?;
        let stderr = stderr
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if !status.success() {
            return Err(SolverError::backend(ScipError::Failed {
                status,
                stderr: stderr.trim().to_owned(),
            }));
        }

        let text = match fs::read_to_string(&result_path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(SolverError::backend(ScipError::MissingSolution));
            }
            Err(err) => return Err(err.into()),
        };

        interpret(model, &text)
    }
}

impl Solver for ScipCli {
    fn name(&self) -> &str {
        "scip"
    }

    fn solve(
        &self,
        model: &Model,
        config: &SolverConfig,
        warm_start: Option<&Candidate>,
    ) -> Result<Solution, SolverError> {
        if !config.nonconvex_mode() && model.requires_nonconvex() {
            return Err(SolverError::NonconvexDisabled);
        }
        self.run(model, config, warm_start)
    }
}

/// Maps a solution file onto a [`Solution`] for `model`.
fn interpret(model: &Model, text: &str) -> Result<Solution, SolverError> {
    let sol = parse_sol(text)?;

    let status = match (&sol.termination, sol.values.is_some()) {
        (Termination::Optimal, true) => Status::Optimal,
        (Termination::Optimal, false) => {
            return Err(SolverError::Output(
                "optimal status without a solution".into(),
            ));
        }
        (Termination::Infeasible, _) => return Ok(Solution::none(Status::Infeasible)),
        (Termination::Limit, true) => Status::TimeLimitFeasible,
        (Termination::Limit, false) => return Ok(Solution::none(Status::TimeLimitNoSolution)),
        (Termination::MemoryLimit, _) => {
            return Err(SolverError::ResourceExhausted("memory limit reached".into()));
        }
        (Termination::Other(status), _) => {
            return Err(SolverError::backend(ScipError::UnexpectedStatus(status.clone())));
        }
    };

    let values = sol.values.unwrap_or_default();
    let assignment = Assignment::from_named(model, values.iter().map(|(n, v)| (n.as_str(), *v)));
    let objective = sol
        .objective
        .unwrap_or_else(|| model.objective_value(&assignment));

    Ok(Solution::found(status, objective, assignment))
}

/// Quotes `path` for SCIP's command reader, which splits words on spaces.
fn quoted(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

/// Calls `f` with each line of `reader` as soon as it arrives.
///
/// Invalid UTF-8 is replaced rather than treated as an error.
fn for_each_line<R: Read>(reader: R, mut f: impl FnMut(&str)) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        f(line.trim_end_matches(['\n', '\r']));
    }
}

fn read_lossy(mut reader: impl Read) -> String {
    let mut buf = Vec::new();
    if let Err(err) = reader.read_to_end(&mut buf) {
        tracing::debug!(%err, "failed to read SCIP stderr");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_with<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out)?;
    out.flush()
}
