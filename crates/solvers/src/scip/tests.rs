use std::{
    fs,
    path::Path,
    process::{Command, Stdio},
};

use approx::assert_relative_eq;
use circlepack_core::{
    DEFAULT_TOLERANCE, Instance, Model, ModelBuilder, ModelConfig, Solver, SolverConfig,
    SolverError, Status, WarmStart,
};
use tempfile::TempDir;

use super::{ScipCli, ScipError, for_each_line};

/// Writes a stand-in for `scip` that copies `canned` to the requested
/// solution path and records what it was asked to do.
fn fake_scip(dir: &Path, canned: &str, exit_code: i32) -> ScipCli {
    fs::write(dir.join("canned.sol"), canned).unwrap();
    let script = format!(
        r#"here=$(dirname "$0")
cp "$2" "$here/seen_commands.txt"
start=$(sed -n 's/^read "\(.*start\.sol\)"$/\1/p' "$2")
if [ -n "$start" ]; then cp "$start" "$here/seen_start.sol"; fi
echo "fake SCIP progress line"
if [ {exit_code} -ne 0 ]; then echo "license check failed" >&2; exit {exit_code}; fi
result=$(sed -n 's/^write solution "\(.*\)"$/\1/p' "$2")
cp "$here/canned.sol" "$result"
"#
    );
    let path = dir.join("scip.sh");
    fs::write(&path, script).unwrap();
    ScipCli::new("sh").arg(path)
}

fn single_circle() -> Model {
    ModelBuilder::new(ModelConfig::default()).build(&Instance::new(vec![1.0]).unwrap())
}

const OPTIMAL: &str = "\
solution status: optimal solution found
objective value:                      4
x_0                                   1 \t(obj:0)
y_0                                   1 \t(obj:0)
x_max                                 2 \t(obj:0)
y_max                                 2 \t(obj:0)
objective_epigraph                    4 \t(obj:1)
";

#[test]
fn solves_with_warm_start_and_reads_back_solution() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(dir.path(), OPTIMAL, 0);
    let model = single_circle();
    let candidate = WarmStart::new(vec![(1.0, 1.0)], 2.0, 2.0)
        .prepare(&model, true, DEFAULT_TOLERANCE)
        .unwrap();
    let config = SolverConfig::new(30.0).unwrap().with_verbosity(2);

    let solution = scip.solve(&model, &config, Some(&candidate)).unwrap();

    assert_eq!(solution.status, Status::Optimal);
    assert_relative_eq!(solution.objective.unwrap(), 4.0);
    let assignment = solution.best().unwrap();
    assert_eq!(assignment.get(model.layout().width), 2.0);
    assert_eq!(assignment.values().len(), model.variables().len());

    let commands = fs::read_to_string(dir.path().join("seen_commands.txt")).unwrap();
    assert!(commands.starts_with("set limits time 30\nset display verblevel 2\n"));
    assert!(commands.contains("set display freq 100\n"));
    assert!(commands.contains("model.cip\"\n"));
    assert!(commands.contains("\noptimize\nwrite solution \""));
    assert!(commands.ends_with("result.sol\"\nquit\n"));

    let start = fs::read_to_string(dir.path().join("seen_start.sol")).unwrap();
    assert!(start.contains("x_max 2\n"));
    assert!(start.contains("objective_epigraph 4\n"));
}

#[test]
fn omits_warm_start_when_none_is_given() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(dir.path(), OPTIMAL, 0);

    scip.solve(&single_circle(), &SolverConfig::default(), None)
        .unwrap();

    let commands = fs::read_to_string(dir.path().join("seen_commands.txt")).unwrap();
    assert!(!commands.contains("start.sol"));
    assert!(!dir.path().join("seen_start.sol").exists());
}

#[test]
fn time_limit_without_solution() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(
        dir.path(),
        "solution status: time limit reached\nno solution available\n",
        0,
    );

    let solution = scip
        .solve(&single_circle(), &SolverConfig::default(), None)
        .unwrap();

    assert_eq!(solution.status, Status::TimeLimitNoSolution);
    assert!(solution.best().is_none());
    assert!(solution.objective.is_none());
}

#[test]
fn quotes_every_path_in_the_batch_file() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(dir.path(), OPTIMAL, 0);
    let model = single_circle();
    let candidate = WarmStart::new(vec![(1.0, 1.0)], 2.0, 2.0)
        .prepare(&model, true, DEFAULT_TOLERANCE)
        .unwrap();

    scip.solve(&model, &SolverConfig::default(), Some(&candidate))
        .unwrap();

    let commands = fs::read_to_string(dir.path().join("seen_commands.txt")).unwrap();
    let paths: Vec<&str> = commands
        .lines()
        .filter_map(|line| {
            line.strip_prefix("read ")
                .or_else(|| line.strip_prefix("write solution "))
        })
        .collect();
    assert_eq!(paths.len(), 3);
    for path in paths {
        assert!(path.starts_with('"') && path.ends_with('"'), "{path}");
    }
}

#[test]
fn clamps_verbosity_to_scip_range() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(dir.path(), OPTIMAL, 0);
    let config = SolverConfig::default().with_verbosity(9);

    scip.solve(&single_circle(), &config, None).unwrap();

    let commands = fs::read_to_string(dir.path().join("seen_commands.txt")).unwrap();
    assert!(commands.contains("set display verblevel 5\n"));
}

#[test]
fn infeasible_has_no_solution() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(
        dir.path(),
        "solution status: infeasible\nno solution available\n",
        0,
    );

    let solution = scip
        .solve(&single_circle(), &SolverConfig::default(), None)
        .unwrap();

    assert_eq!(solution.status, Status::Infeasible);
    assert!(solution.best().is_none());
    assert!(solution.objective.is_none());
}

#[test]
fn optimal_without_solution_is_an_output_error() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(
        dir.path(),
        "solution status: optimal solution found\nno solution available\n",
        0,
    );

    let err = scip
        .solve(&single_circle(), &SolverConfig::default(), None)
        .unwrap_err();
    assert!(matches!(err, SolverError::Output(_)));
}

#[test]
fn unknown_status_is_a_backend_error() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(
        dir.path(),
        "solution status: unbounded\nno solution available\n",
        0,
    );

    let err = scip
        .solve(&single_circle(), &SolverConfig::default(), None)
        .unwrap_err();

    let source = match err {
        SolverError::Backend(source) => source,
        other => panic!("expected a backend error, got {other:?}"),
    };
    match source.downcast_ref::<ScipError>() {
        Some(ScipError::UnexpectedStatus(status)) => assert_eq!(status, "unbounded"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn forwards_output_while_the_process_runs() {
    let dir = TempDir::new().unwrap();
    let flag = dir.path().join("first_seen");

    // Prints a second line only once the first has been read, giving up after
    // about five seconds.
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(
            r#"echo first
i=0
while [ ! -e "$1" ] && [ "$i" -lt 100 ]; do sleep 0.05; i=$((i + 1)); done
if [ -e "$1" ]; then echo second; else echo late; fi"#,
        )
        .arg("sh")
        .arg(&flag)
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    let mut lines = Vec::new();
    for_each_line(child.stdout.take().unwrap(), |line| {
        if line == "first" {
            fs::write(&flag, "").unwrap();
        }
        lines.push(line.to_owned());
    })
    .unwrap();
    assert!(child.wait().unwrap().success());

    assert_eq!(lines, ["first", "second"]);
}

#[test]
fn time_limit_with_incumbent() {
    let dir = TempDir::new().unwrap();
    let canned = OPTIMAL.replace("optimal solution found", "time limit reached");
    let scip = fake_scip(dir.path(), &canned, 0);

    let solution = scip
        .solve(&single_circle(), &SolverConfig::default(), None)
        .unwrap();

    assert_eq!(solution.status, Status::TimeLimitFeasible);
    assert!(solution.best().is_some());
}

#[test]
fn memory_limit_is_an_error() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(
        dir.path(),
        "solution status: memory limit reached\nno solution available\n",
        0,
    );

    let err = scip
        .solve(&single_circle(), &SolverConfig::default(), None)
        .unwrap_err();
    assert!(matches!(err, SolverError::ResourceExhausted(_)));
}

#[test]
fn refuses_nonconvex_model_when_disabled() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(dir.path(), OPTIMAL, 0);
    let model = ModelBuilder::new(ModelConfig::default())
        .build(&Instance::new(vec![1.0, 1.0]).unwrap());
    let config = SolverConfig::default().with_nonconvex_mode(false);

    let err = scip.solve(&model, &config, None).unwrap_err();

    assert!(matches!(err, SolverError::NonconvexDisabled));
    assert!(!dir.path().join("seen_commands.txt").exists());
}

#[test]
fn reports_failed_process() {
    let dir = TempDir::new().unwrap();
    let scip = fake_scip(dir.path(), OPTIMAL, 3);

    let err = scip
        .solve(&single_circle(), &SolverConfig::default(), None)
        .unwrap_err();

    let source = match err {
        SolverError::Backend(source) => source,
        other => panic!("expected a backend error, got {other:?}"),
    };
    match source.downcast_ref::<ScipError>() {
        Some(ScipError::Failed { status, stderr }) => {
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr, "license check failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_missing_executable() {
    let scip = ScipCli::new("/nonexistent/path/to/scip");

    let err = scip
        .solve(&single_circle(), &SolverConfig::default(), None)
        .unwrap_err();

    let source = match err {
        SolverError::Backend(source) => source,
        other => panic!("expected a backend error, got {other:?}"),
    };
    assert!(matches!(
        source.downcast_ref::<ScipError>(),
        Some(ScipError::NotFound { .. })
    ));
}
