//! Episode controller.
//!
//! Every step all three agents plan from the same snapshot of positions,
//! then their moves are applied together. Nobody sees another agent's move
//! for the current step.

use crate::start::sample_start_positions;
use pursuit_core::{is_valid, Action, Grid, Planner, Position, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Number of agents in the pursuit chain.
pub const AGENTS: usize = 3;

/// Positions of agents A, B and C.
pub type Positions = [Position; AGENTS];

/// `(target, threat)` indices for agent `i`.
///
/// Agent `i` pursues `(i + 1) % 3` and flees `(i + 2) % 3`.
#[inline]
pub const fn chain_roles(i: usize) -> (usize, usize) {
    ((i + 1) % AGENTS, (i + 2) % AGENTS)
}

/// Episode limits and start placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    /// Maximum recorded frames, the initial placement included.
    pub max_steps: usize,

    /// Minimum pairwise Manhattan distance between start positions.
    pub min_start_distance: u32,

    /// Candidate draws before start sampling gives up.
    pub max_start_attempts: usize,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            min_start_distance: 3,
            max_start_attempts: 10_000,
        }
    }
}

impl EpisodeConfig {
    /// Default configuration with a different frame limit.
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps,
            ..Default::default()
        }
    }
}

/// Why an episode ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// At least one agent stepped onto its target from a free cell.
    Capture { capturers: Vec<usize> },

    /// At least one agent ended up on an obstacle, with no capture.
    Collision { agents: Vec<usize> },

    /// The frame limit was reached.
    StepLimit,
}

/// Final result of an episode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    pub termination: Termination,

    /// Per-agent score, see [`score_episode`].
    pub scores: [u32; AGENTS],

    /// Number of joint steps played.
    pub steps: usize,

    /// Every recorded frame, starting with the initial placement.
    pub trajectory: Vec<Positions>,
}

/// Score an episode from its final capture and collision flags.
///
/// A unique capturer scores 3 and the others 0. Otherwise, if anyone
/// crashed, every agent that did not crash scores 1. Otherwise all score 1.
pub fn score_episode(captured: [bool; AGENTS], collided: [bool; AGENTS]) -> [u32; AGENTS] {
    let capturers = captured.iter().filter(|&&c| c).count();
    if capturers == 1 {
        return captured.map(|c| if c { 3 } else { 0 });
    }
    if collided.iter().any(|&c| c) {
        return collided.map(|c| if c { 0 } else { 1 });
    }
    [1; AGENTS]
}

/// A three-agent pursuit episode on a fixed grid.
pub struct Episode<'g> {
    grid: &'g Grid,
    agents: [Box<dyn Planner>; AGENTS],
    config: EpisodeConfig,
    positions: Positions,
    trajectory: Vec<Positions>,
}

impl<'g> Episode<'g> {
    /// Create an episode. Agents are placed by [`Episode::reset`] or
    /// [`Episode::reset_to`].
    pub fn new(grid: &'g Grid, agents: [Box<dyn Planner>; AGENTS], config: EpisodeConfig) -> Self {
        let origin = Position::new(0, 0);
        Self {
            grid,
            agents,
            config,
            positions: [origin; AGENTS],
            trajectory: Vec::new(),
        }
    }

    /// Current positions.
    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    /// Frames recorded so far.
    pub fn trajectory(&self) -> &[Positions] {
        &self.trajectory
    }

    /// Place the agents at random spaced free cells and clear the trajectory.
    ///
    /// # Errors
    /// Fails if the grid cannot host three spaced agents.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let starts = sample_start_positions(
            self.grid,
            AGENTS,
            self.config.min_start_distance,
            self.config.max_start_attempts,
            rng,
        )?;
        self.reset_to([starts[0], starts[1], starts[2]]);
        Ok(())
    }

    /// Place the agents at the given positions and clear the trajectory.
    pub fn reset_to(&mut self, positions: Positions) {
        self.positions = positions;
        self.trajectory.clear();
        self.trajectory.push(positions);
        debug!(?positions, "episode reset");
    }

    /// Play one joint step and record the new frame.
    ///
    /// Returns the actions the agents chose. An action that would leave the
    /// grid is dropped and that agent stays put.
    pub fn step(&mut self) -> [Action; AGENTS] {
        let grid = self.grid;
        let snapshot = self.positions;

        let [a, b, c] = &mut self.agents;
        let (action_a, (action_b, action_c)) = rayon::join(
            || plan(a.as_mut(), grid, &snapshot, 0),
            || {
                rayon::join(
                    || plan(b.as_mut(), grid, &snapshot, 1),
                    || plan(c.as_mut(), grid, &snapshot, 2),
                )
            },
        );
        let actions = [action_a, action_b, action_c];

        for (i, action) in actions.iter().enumerate() {
            if is_valid(grid, snapshot[i], *action) {
                self.positions[i] = action.apply(snapshot[i]);
            } else {
                debug!(agent = i, %action, "dropping invalid action");
            }
        }
        self.trajectory.push(self.positions);

        actions
    }

    /// Capture flag per agent: on its target's cell while not on an obstacle.
    pub fn captures(&self) -> [bool; AGENTS] {
        let p = &self.positions;
        std::array::from_fn(|i| {
            let (target, _) = chain_roles(i);
            p[i] == p[target] && !self.grid.is_obstacle(p[i])
        })
    }

    /// Collision flag per agent: standing on an obstacle.
    pub fn collisions(&self) -> [bool; AGENTS] {
        self.positions.map(|p| self.grid.is_obstacle(p))
    }

    /// Termination reason for the current frame, if the episode is over.
    pub fn termination(&self) -> Option<Termination> {
        let capturers: Vec<usize> = indices(self.captures());
        if !capturers.is_empty() {
            return Some(Termination::Capture { capturers });
        }

        let colliders: Vec<usize> = indices(self.collisions());
        if !colliders.is_empty() {
            return Some(Termination::Collision { agents: colliders });
        }

        if self.trajectory.len() >= self.config.max_steps {
            return Some(Termination::StepLimit);
        }
        None
    }

    /// Place the agents randomly and play until termination.
    ///
    /// At least one step is always played.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<EpisodeOutcome> {
        self.reset(rng)?;
        Ok(self.play())
    }

    /// Play from the current placement until termination.
    pub fn play(&mut self) -> EpisodeOutcome {
        let termination = loop {
            self.step();
            if let Some(termination) = self.termination() {
                break termination;
            }
        };

        let scores = score_episode(self.captures(), self.collisions());
        let steps = self.trajectory.len() - 1;

        info!(
            agents = ?self.agents.iter().map(|a| a.name()).collect::<Vec<_>>(),
            ?termination,
            ?scores,
            steps,
            "episode finished"
        );

        EpisodeOutcome {
            termination,
            scores,
            steps,
            trajectory: self.trajectory.clone(),
        }
    }
}

fn plan(agent: &mut dyn Planner, grid: &Grid, positions: &Positions, i: usize) -> Action {
    let (target, threat) = chain_roles(i);
    agent.plan_action(grid, positions[i], positions[target], positions[threat])
}

fn indices(flags: [bool; AGENTS]) -> Vec<usize> {
    flags.iter().enumerate().filter_map(|(i, &f)| f.then_some(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::GreedyPlanner;
    use std::sync::{Arc, Mutex};

    /// Replays a fixed list of actions, then stays.
    struct Scripted {
        actions: Vec<Action>,
    }

    impl Scripted {
        fn boxed(actions: &[Action]) -> Box<dyn Planner> {
            Box::new(Self {
                actions: actions.iter().rev().copied().collect(),
            })
        }
    }

    impl Planner for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn plan_action(&mut self, _grid: &Grid, _me: Position, _target: Position, _threat: Position) -> Action {
            self.actions.pop().unwrap_or(Action::STAY)
        }
    }

    /// Stays put and records what it was shown.
    struct Recorder(Arc<Mutex<Vec<(Position, Position, Position)>>>);

    impl Planner for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn plan_action(&mut self, _grid: &Grid, me: Position, target: Position, threat: Position) -> Action {
            self.0.lock().unwrap().push((me, target, threat));
            Action::STAY
        }
    }

    fn stay() -> [Box<dyn Planner>; AGENTS] {
        [Scripted::boxed(&[]), Scripted::boxed(&[]), Scripted::boxed(&[])]
    }

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_chain_roles() {
        assert_eq!(chain_roles(0), (1, 2));
        assert_eq!(chain_roles(1), (2, 0));
        assert_eq!(chain_roles(2), (0, 1));
    }

    #[test]
    fn test_score_episode() {
        let none = [false; 3];
        assert_eq!(score_episode([false, true, false], none), [0, 3, 0]);
        assert_eq!(score_episode(none, [true, false, false]), [0, 1, 1]);
        assert_eq!(score_episode(none, none), [1, 1, 1]);
        // Two capturers: no unique winner, fall through to collisions
        assert_eq!(score_episode([true, true, false], [false, false, true]), [1, 1, 0]);
        assert_eq!(score_episode([true, true, false], none), [1, 1, 1]);
        // A unique capture wins even if someone else crashed
        assert_eq!(score_episode([true, false, false], [false, true, false]), [3, 0, 0]);
    }

    #[test]
    fn test_moves_are_simultaneous() {
        let grid = Grid::open(5, 5);
        // A steps right onto B's old cell while B steps away: no capture
        let agents = [
            Scripted::boxed(&[Action::RIGHT]),
            Scripted::boxed(&[Action::RIGHT]),
            Scripted::boxed(&[]),
        ];
        let mut episode = Episode::new(&grid, agents, EpisodeConfig::default());
        episode.reset_to([pos(0, 0), pos(0, 1), pos(4, 4)]);

        episode.step();
        assert_eq!(episode.positions(), &[pos(0, 1), pos(0, 2), pos(4, 4)]);
        assert_eq!(episode.termination(), None);
    }

    #[test]
    fn test_invalid_action_is_dropped() {
        let grid = Grid::open(3, 3);
        let agents = [
            Scripted::boxed(&[Action::UP]),
            Scripted::boxed(&[Action::DOWN]),
            Scripted::boxed(&[]),
        ];
        let mut episode = Episode::new(&grid, agents, EpisodeConfig::default());
        episode.reset_to([pos(0, 0), pos(1, 2), pos(2, 0)]);

        let actions = episode.step();
        assert_eq!(actions[0], Action::UP);
        assert_eq!(episode.positions(), &[pos(0, 0), pos(2, 2), pos(2, 0)]);
        assert_eq!(episode.trajectory().len(), 2);
    }

    #[test]
    fn test_capture_ends_episode() {
        let grid = Grid::open(5, 5);
        let agents = [Scripted::boxed(&[Action::RIGHT]), Scripted::boxed(&[]), Scripted::boxed(&[])];
        let mut episode = Episode::new(&grid, agents, EpisodeConfig::default());
        episode.reset_to([pos(2, 1), pos(2, 2), pos(4, 4)]);

        let outcome = episode.play();
        assert_eq!(outcome.termination, Termination::Capture { capturers: vec![0] });
        assert_eq!(outcome.scores, [3, 0, 0]);
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.trajectory.len(), 2);
    }

    #[test]
    fn test_capture_on_obstacle_is_collision() {
        // B stands on an obstacle; A joining it there is a crash, not a capture
        let grid = Grid::with_obstacles(5, 5, &[pos(2, 2)]).unwrap();
        let agents = [Scripted::boxed(&[Action::RIGHT]), Scripted::boxed(&[]), Scripted::boxed(&[])];
        let mut episode = Episode::new(&grid, agents, EpisodeConfig::default());
        episode.reset_to([pos(2, 1), pos(2, 2), pos(4, 4)]);

        let outcome = episode.play();
        assert_eq!(outcome.termination, Termination::Collision { agents: vec![0, 1] });
        assert_eq!(outcome.scores, [0, 0, 1]);
    }

    #[test]
    fn test_collision_ends_episode() {
        let grid = Grid::with_obstacles(5, 5, &[pos(0, 1)]).unwrap();
        let agents = [Scripted::boxed(&[]), Scripted::boxed(&[]), Scripted::boxed(&[Action::UP])];
        let mut episode = Episode::new(&grid, agents, EpisodeConfig::default());
        episode.reset_to([pos(4, 0), pos(4, 4), pos(1, 1)]);

        let outcome = episode.play();
        assert_eq!(outcome.termination, Termination::Collision { agents: vec![2] });
        assert_eq!(outcome.scores, [1, 1, 0]);
    }

    #[test]
    fn test_step_limit_counts_initial_frame() {
        let grid = Grid::open(6, 6);
        let mut episode = Episode::new(&grid, stay(), EpisodeConfig::with_max_steps(5));
        episode.reset_to([pos(0, 0), pos(0, 5), pos(5, 0)]);

        let outcome = episode.play();
        assert_eq!(outcome.termination, Termination::StepLimit);
        assert_eq!(outcome.trajectory.len(), 5);
        assert_eq!(outcome.steps, 4);
        assert_eq!(outcome.scores, [1, 1, 1]);
    }

    #[test]
    fn test_tiny_step_limit_still_plays_once() {
        let grid = Grid::open(6, 6);
        let mut episode = Episode::new(&grid, stay(), EpisodeConfig::with_max_steps(0));
        episode.reset_to([pos(0, 0), pos(0, 5), pos(5, 0)]);
        assert_eq!(episode.play().steps, 1);
    }

    #[test]
    fn test_planners_see_chain_roles() {
        let grid = Grid::open(5, 5);
        let logs: Vec<_> = (0..AGENTS).map(|_| Arc::new(Mutex::new(Vec::new()))).collect();
        let agents: [Box<dyn Planner>; AGENTS] = [
            Box::new(Recorder(logs[0].clone())),
            Box::new(Recorder(logs[1].clone())),
            Box::new(Recorder(logs[2].clone())),
        ];
        let (a, b, c) = (pos(0, 0), pos(0, 4), pos(4, 0));
        let mut episode = Episode::new(&grid, agents, EpisodeConfig::with_max_steps(2));
        episode.reset_to([a, b, c]);

        episode.step();
        assert_eq!(episode.termination(), Some(Termination::StepLimit));
        assert_eq!(logs[0].lock().unwrap().as_slice(), &[(a, b, c)]);
        assert_eq!(logs[1].lock().unwrap().as_slice(), &[(b, c, a)]);
        assert_eq!(logs[2].lock().unwrap().as_slice(), &[(c, a, b)]);
    }

    #[test]
    fn test_run_with_greedy_agents() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let grid = Grid::open(8, 8);
        let agents: [Box<dyn Planner>; AGENTS] = [
            Box::new(GreedyPlanner),
            Box::new(GreedyPlanner),
            Box::new(GreedyPlanner),
        ];
        let mut episode = Episode::new(&grid, agents, EpisodeConfig::with_max_steps(200));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = episode.run(&mut rng).unwrap();
        assert!(outcome.steps >= 1);
        assert!(outcome.trajectory.len() <= 200);
        assert_eq!(outcome.trajectory.len(), outcome.steps + 1);
        for frame in &outcome.trajectory {
            for p in frame {
                assert!(grid.in_bounds(*p));
            }
        }
    }

    #[test]
    fn test_reset_fails_on_crowded_grid() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let grid = Grid::open(1, 2);
        let mut episode = Episode::new(&grid, stay(), EpisodeConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(episode.run(&mut rng).is_err());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: EpisodeConfig = serde_json::from_str(r#"{"max_steps": 50}"#).unwrap();
        assert_eq!(config.max_steps, 50);
        assert_eq!(config.min_start_distance, 3);
        assert_eq!(config.max_start_attempts, 10_000);
    }
}
