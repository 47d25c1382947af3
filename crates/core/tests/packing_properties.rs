use std::f64::consts::PI;

use approx::assert_relative_eq;
use circlepack_core::{
    Assignment, Candidate, DEFAULT_TOLERANCE, Instance, Model, ModelBuilder, ModelConfig,
    Packing, Session, Solution, Solver, SolverConfig, SolverError, Status, WarmStart, build,
    model::Role, verify,
};

/// Replays a fixed layout as if a solver had found it.
struct Replay {
    centers: Vec<(f64, f64)>,
    width: f64,
    height: f64,
}

impl Solver for Replay {
    fn name(&self) -> &str {
        "replay"
    }

    fn solve(
        &self,
        model: &Model,
        _config: &SolverConfig,
        _warm_start: Option<&Candidate>,
    ) -> Result<Solution, SolverError> {
        let mut assignment = Assignment::zeros(model);
        for (vars, &(x, y)) in model.circles().iter().zip(&self.centers) {
            assignment.set(vars.x, x);
            assignment.set(vars.y, y);
        }
        assignment.set(model.layout().width, self.width);
        assignment.set(model.layout().height, self.height);
        if let Some(area) = model.layout().area {
            assignment.set(area, self.width * self.height);
        }
        let objective = model.objective_value(&assignment);
        Ok(Solution::found(Status::Optimal, objective, assignment))
    }
}

fn solve(model: Model, replay: &Replay) -> (Model, Solution) {
    let session = Session::new(model);
    let solution = session
        .solve(replay, &SolverConfig::default())
        .expect("replay never fails");
    (session.model().clone(), solution)
}

#[test]
fn reference_warm_start_is_feasible_at_documented_box() {
    for surrogate in [false, true] {
        let config = ModelConfig::default().with_area_surrogate(surrogate);
        let model = ModelBuilder::new(config).build(&Instance::reference());
        let mut session = Session::new(model);

        session
            .offer_warm_start(&WarmStart::reference(), true, DEFAULT_TOLERANCE)
            .expect("documented seed is feasible");

        let candidate = session.warm_start().expect("seed kept");
        assert!(candidate.is_checked());
        let packing = Packing::from_assignment(session.model(), candidate.assignment());
        assert_relative_eq!(packing.area(), 58.4 * 52.0, epsilon = 1e-9);
    }
}

#[test]
fn two_large_circles_side_by_side() {
    let model = build(&[13.0, 13.0], (80.0, 80.0)).unwrap();
    let replay = Replay {
        centers: vec![(13.0, 13.0), (38.9, 13.0)],
        width: 51.9,
        height: 26.0,
    };

    let (model, solution) = solve(model, &replay);
    let assignment = solution.best().unwrap();
    assert!(verify(&model, assignment, DEFAULT_TOLERANCE).is_empty());

    let packing = Packing::from_assignment(&model, assignment);
    let [a, b] = [packing.circles[0], packing.circles[1]];
    assert!((a.x - b.x).hypot(a.y - b.y) >= 25.9 - DEFAULT_TOLERANCE);
    assert!(packing.area() >= 2.0 * PI * 13.0 * 13.0);
    assert_relative_eq!(packing.area(), solution.objective.unwrap(), epsilon = 1e-9);
}

#[test]
fn single_circle_fills_its_square() {
    let r = 7.5;
    let model = build(&[r], (80.0, 80.0)).unwrap();
    let replay = Replay {
        centers: vec![(r, r)],
        width: 2.0 * r,
        height: 2.0 * r,
    };

    let (model, solution) = solve(model, &replay);
    let assignment = solution.best().unwrap();
    assert!(verify(&model, assignment, DEFAULT_TOLERANCE).is_empty());

    let tighter = Replay {
        centers: vec![(r, r)],
        width: 2.0 * r - 0.01,
        height: 2.0 * r,
    };
    let (model, solution) = solve(model, &tighter);
    let violations = verify(&model, solution.best().unwrap(), DEFAULT_TOLERANCE);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].subject(), "boundaryright_0");
}

#[test]
fn symmetric_circles_must_be_ordered_by_x() {
    let model = build(&[4.0, 4.0, 4.0], (80.0, 80.0)).unwrap();
    assert_eq!(model.constraints_with_role(Role::SymmetryBreaking).count(), 2);

    let unordered = Replay {
        centers: vec![(12.0, 4.0), (4.0, 4.0), (20.0, 4.0)],
        width: 24.0,
        height: 8.0,
    };
    let (model, solution) = solve(model, &unordered);
    let violations = verify(&model, solution.best().unwrap(), DEFAULT_TOLERANCE);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].subject(), "symmetry_0_1");

    let ordered = Replay {
        centers: vec![(4.0, 4.0), (12.0, 4.0), (20.0, 4.0)],
        width: 24.0,
        height: 8.0,
    };
    let (model, solution) = solve(model, &ordered);
    assert!(verify(&model, solution.best().unwrap(), DEFAULT_TOLERANCE).is_empty());
}

#[test]
fn surrogate_and_direct_objectives_agree() {
    let replay = Replay {
        centers: vec![(13.0, 13.0), (38.9, 13.0)],
        width: 51.9,
        height: 26.0,
    };
    let instance = Instance::new(vec![13.0, 13.0]).unwrap();

    let objectives: Vec<f64> = [false, true]
        .into_iter()
        .map(|surrogate| {
            let config = ModelConfig::default().with_area_surrogate(surrogate);
            let (_, solution) = solve(ModelBuilder::new(config).build(&instance), &replay);
            solution.objective.unwrap()
        })
        .collect();

    assert_relative_eq!(objectives[0], objectives[1], epsilon = 1e-9);
}
