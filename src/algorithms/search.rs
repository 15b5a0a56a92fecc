// Grid searches. One step expands one frontier cell; targets (checkpoints, then the end) are
// reached leg by leg, each leg restarting the frontier from the target just reached.
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use super::{Algorithm, StepOutcome, Workspace};
use crate::error::{EngineError, Result};
use crate::model::{CellKind, Grid, Position};

impl Workspace for Grid {
    fn is_solved(&self) -> bool {
        Grid::is_solved(self)
    }

    fn ready(&self) -> Result<()> {
        if self.start().is_none() {
            return Err(EngineError::MissingEndpoint {
                kind: CellKind::Start,
            });
        }
        if self.end().is_none() {
            return Err(EngineError::MissingEndpoint {
                kind: CellKind::End,
            });
        }
        Ok(())
    }
}

/// Expansion order of a search.
pub trait Frontier: Default {
    fn push(&mut self, pos: Position, target: Position);
    fn pop(&mut self) -> Option<Position>;
    fn clear(&mut self);
}

#[derive(Default, Debug)]
pub struct Fifo(VecDeque<Position>);

impl Frontier for Fifo {
    fn push(&mut self, pos: Position, _target: Position) {
        self.0.push_back(pos);
    }
    fn pop(&mut self) -> Option<Position> {
        self.0.pop_front()
    }
    fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Default, Debug)]
pub struct Lifo(Vec<Position>);

impl Frontier for Lifo {
    fn push(&mut self, pos: Position, _target: Position) {
        self.0.push(pos);
    }
    fn pop(&mut self) -> Option<Position> {
        self.0.pop()
    }
    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Closest-to-target first by Manhattan distance; ties go to the earliest push.
#[derive(Default, Debug)]
pub struct Nearest {
    heap: BinaryHeap<Reverse<(u32, u64, Position)>>,
    seq: u64,
}

impl Frontier for Nearest {
    fn push(&mut self, pos: Position, target: Position) {
        self.seq += 1;
        self.heap
            .push(Reverse((pos.manhattan(target), self.seq, pos)));
    }
    fn pop(&mut self) -> Option<Position> {
        self.heap.pop().map(|Reverse((_, _, pos))| pos)
    }
    fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}

#[derive(Default, Debug)]
pub struct FrontierSearch<F: Frontier> {
    frontier: F,
    seen: HashSet<Position>,
    targets: VecDeque<Position>,
    started: bool,
}

pub type BreadthFirst = FrontierSearch<Fifo>;
pub type DepthFirst = FrontierSearch<Lifo>;
pub type BestFirst = FrontierSearch<Nearest>;

impl<F: Frontier> FrontierSearch<F> {
    fn begin_leg(&mut self, from: Position) {
        self.frontier.clear();
        self.seen.clear();
        if let Some(&target) = self.targets.front() {
            self.seen.insert(from);
            self.frontier.push(from, target);
        }
    }

    /// Target of the leg in progress.
    pub fn current_target(&self) -> Option<Position> {
        self.targets.front().copied()
    }
}

impl<F: Frontier> Algorithm<Grid> for FrontierSearch<F> {
    fn step(&mut self, grid: &mut Grid) -> StepOutcome {
        if grid.is_solved() {
            return StepOutcome::AlreadySolved;
        }
        if !self.started {
            let Some(start) = grid.start() else {
                return StepOutcome::Exhausted;
            };
            self.targets = grid.targets().into();
            self.begin_leg(start);
            self.started = true;
        }
        let Some(target) = self.current_target() else {
            return StepOutcome::Exhausted;
        };
        let Some(cur) = self.frontier.pop() else {
            return StepOutcome::Exhausted;
        };
        grid.mark_visited(cur);
        if cur == target {
            self.targets.pop_front();
            self.begin_leg(cur);
            return StepOutcome::Advanced;
        }
        for next in grid.neighbours(cur) {
            if self.seen.insert(next) {
                self.frontier.push(next, target);
            }
        }
        StepOutcome::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::RunOutcome;
    use crate::model::GridSize;

    fn open_grid(w: u32, h: u32) -> Grid {
        let mut g = Grid::new(GridSize::new(w, h).unwrap());
        g.paint(Position::new(0, 0), CellKind::Start).unwrap();
        g.paint(Position::new(w - 1, h - 1), CellKind::End).unwrap();
        g
    }

    #[test]
    fn ready_requires_endpoints() {
        let mut g = Grid::new(GridSize::new(3, 3).unwrap());
        assert!(matches!(
            g.ready(),
            Err(EngineError::MissingEndpoint {
                kind: CellKind::Start
            })
        ));
        g.paint(Position::new(0, 0), CellKind::Start).unwrap();
        assert!(matches!(
            g.ready(),
            Err(EngineError::MissingEndpoint { kind: CellKind::End })
        ));
        g.paint(Position::new(2, 2), CellKind::End).unwrap();
        assert!(g.ready().is_ok());
    }

    #[test]
    fn bfs_expands_one_cell_per_step() {
        let mut g = open_grid(4, 4);
        let mut bfs = BreadthFirst::default();
        assert_eq!(bfs.step(&mut g), StepOutcome::Advanced);
        assert_eq!(g.visited_count(), 1);
        assert_eq!(bfs.step(&mut g), StepOutcome::Advanced);
        assert_eq!(g.visited_count(), 2);
        assert!(g.get(Position::new(1, 0)).unwrap().visited());
    }

    #[test]
    fn every_search_reaches_the_end() {
        for key in ["bfs", "dfs", "greedy"] {
            let mut g = open_grid(6, 5);
            let mut alg = crate::algorithms::search_registry().create(key).unwrap();
            assert!(
                matches!(alg.run(&mut g), RunOutcome::Solved { .. }),
                "{key}"
            );
            assert!(g.is_solved());
        }
    }

    #[test]
    fn greedy_heads_straight_for_the_target() {
        let mut g = open_grid(8, 1);
        let mut alg = BestFirst::default();
        assert_eq!(alg.run(&mut g), RunOutcome::Solved { steps: 8 });
    }

    #[test]
    fn walled_off_end_exhausts() {
        let mut g = open_grid(3, 3);
        g.paint(Position::new(1, 2), CellKind::Wall).unwrap();
        g.paint(Position::new(2, 1), CellKind::Wall).unwrap();
        let mut bfs = BreadthFirst::default();
        assert!(matches!(bfs.run(&mut g), RunOutcome::Exhausted { .. }));
        assert!(!g.is_solved());
        assert_eq!(bfs.step(&mut g), StepOutcome::Exhausted);
    }

    #[test]
    fn checkpoints_are_visited_before_finishing() {
        let mut g = Grid::new(GridSize::new(5, 1).unwrap());
        g.paint(Position::new(2, 0), CellKind::Start).unwrap();
        g.paint(Position::new(0, 0), CellKind::Checkpoint).unwrap();
        g.paint(Position::new(4, 0), CellKind::End).unwrap();
        let mut bfs = BreadthFirst::default();
        bfs.run(&mut g);
        assert!(g.is_solved());
        assert!(g.get(Position::new(0, 0)).unwrap().visited());
    }

    #[test]
    fn solved_grid_is_untouched() {
        let mut g = open_grid(3, 3);
        let mut bfs = BreadthFirst::default();
        bfs.run(&mut g);
        let snapshot = g.clone();
        assert_eq!(bfs.step(&mut g), StepOutcome::AlreadySolved);
        assert_eq!(g, snapshot);
    }
}
