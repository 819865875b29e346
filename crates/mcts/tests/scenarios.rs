//! Fixed scenarios with known outcomes.

use pursuit_core::{Grid, Planner, Position, PursuitState, Reward, ACTIONS};
use pursuit_mcts::{
    greedy_step, Evaluator, GreedyResponse, HoldPosition, MctsConfig, MctsPlanner, RolloutEvaluator,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rollout(grid: &Grid, mover: (i32, i32), target: (i32, i32), threat: (i32, i32), seed: u64) -> Reward {
    let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed), 20);
    let state = PursuitState::new(mover.into(), target.into(), threat.into());
    evaluator.evaluate(grid, &state, &GreedyResponse)
}

/// Mover already standing on its target captures before moving.
#[test]
fn test_capture_fires_before_any_move() {
    let grid = Grid::open(5, 5);
    for seed in 0..20 {
        assert_eq!(rollout(&grid, (2, 2), (2, 2), (4, 0), seed), Reward::CAPTURE);
    }
}

/// Mover sharing a cell with its threat is caught.
#[test]
fn test_caught_by_threat() {
    let grid = Grid::open(5, 5);
    for seed in 0..20 {
        assert_eq!(rollout(&grid, (0, 0), (4, 4), (0, 0), seed), Reward::LOSS);
    }
}

/// Mover on an obstacle loses regardless of the other positions.
#[test]
fn test_standing_on_obstacle() {
    let grid = Grid::with_obstacles(5, 5, &[Position::new(0, 0)]).unwrap();
    for (target, threat) in [((0, 1), (4, 4)), ((4, 4), (0, 1)), ((0, 0), (3, 3)), ((2, 2), (2, 2))] {
        assert_eq!(rollout(&grid, (0, 0), target, threat, 1), Reward::LOSS);
    }
}

/// With a stationary target several steps away along an oblique line and the
/// threat far away, the planner closes in on the target in at least 90% of
/// seeded trials.
#[test]
fn test_planner_approaches_reachable_target() {
    let grid = Grid::open(10, 10);
    let me = Position::new(0, 0);
    let target = Position::new(5, 2);
    let threat = Position::new(9, 9);
    assert!(me.distance(threat) > 10.0);

    let trials = 40;
    let mut successes = 0;
    for seed in 0..trials {
        let mut planner = MctsPlanner::with_model(
            MctsConfig::with_iterations(200),
            ChaCha8Rng::seed_from_u64(seed),
            HoldPosition,
        );
        let action = planner.plan_action(&grid, me, target, threat);
        let stay_distance = me.manhattan(target);
        if action.apply(me).manhattan(target) < stay_distance {
            successes += 1;
        }
    }

    assert!(
        successes * 100 >= trials * 90,
        "only {}/{} searches moved toward the target",
        successes,
        trials
    );
}

/// A mover boxed in by obstacles stays where it is.
#[test]
fn test_boxed_in_mover_stays() {
    let center = Position::new(2, 2);
    let walls: Vec<Position> = ACTIONS.iter().skip(1).map(|a| a.apply(center)).collect();
    let grid = Grid::with_obstacles(5, 5, &walls).unwrap();

    for target in [Position::new(0, 0), Position::new(4, 4), Position::new(2, 4)] {
        assert_eq!(greedy_step(&grid, center, target), center);
    }
}
