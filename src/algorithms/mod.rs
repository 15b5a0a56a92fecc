//! Step protocol shared by every visualised algorithm, and the registry that resolves them by key.
//!
//! An algorithm owns its resume cursors; the workspace it mutates (bar array or grid) is owned by
//! the caller and passed in on every call. Whether a workspace is finished is decided by the
//! workspace itself through [`Workspace::is_solved`], never by the algorithm.

pub mod search;
pub mod sorting;

use crate::error::{EngineError, Result};
use crate::model::{Grid, SortState};

pub use search::{BestFirst, BreadthFirst, DepthFirst};
pub use sorting::{BubbleSort, CocktailSort, InsertionSort, SelectionSort};

/// State an algorithm runs against.
pub trait Workspace {
    fn is_solved(&self) -> bool;

    /// Preconditions for starting a run at all.
    fn ready(&self) -> Result<()> {
        Ok(())
    }
}

/// Shown when a run is asked of a workspace that is already solved.
pub const DONE: &str = "done";
/// Shown when a search runs out of cells before reaching every target.
pub const NO_PATH: &str = "no path to the next target";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One unit of work was applied.
    Advanced,
    /// Input was already solved; nothing changed.
    AlreadySolved,
    /// The algorithm has nothing left to try and the workspace is not solved.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Solved { steps: usize },
    AlreadySolved,
    Exhausted { steps: usize },
}

impl StepOutcome {
    /// Message the user should see for this outcome, if any.
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Advanced => None,
            Self::AlreadySolved => Some(DONE),
            Self::Exhausted => Some(NO_PATH),
        }
    }
}

impl RunOutcome {
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Solved { .. } => None,
            Self::AlreadySolved => Some(DONE),
            Self::Exhausted { .. } => Some(NO_PATH),
        }
    }
}

pub trait Algorithm<W: Workspace> {
    /// Advance by the smallest observable unit of work. A no-op on solved input.
    fn step(&mut self, state: &mut W) -> StepOutcome;

    /// Run synchronously until solved or exhausted.
    fn run(&mut self, state: &mut W) -> RunOutcome {
        if state.is_solved() {
            return RunOutcome::AlreadySolved;
        }
        let mut steps = 0;
        while !state.is_solved() {
            match self.step(state) {
                StepOutcome::Advanced => steps += 1,
                StepOutcome::AlreadySolved => break,
                StepOutcome::Exhausted => return RunOutcome::Exhausted { steps },
            }
        }
        RunOutcome::Solved { steps }
    }
}

type Factory<W> = fn() -> Box<dyn Algorithm<W>>;

pub struct AlgorithmEntry<W: Workspace> {
    pub key: &'static str,
    pub label: &'static str,
    factory: Factory<W>,
}

/// Algorithms available for one workspace type, looked up by stable string key.
pub struct Registry<W: Workspace> {
    entries: Vec<AlgorithmEntry<W>>,
}

impl<W: Workspace> Default for Registry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Workspace> Registry<W> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, key: &'static str, label: &'static str, factory: Factory<W>) -> Self {
        self.entries.retain(|e| e.key != key);
        self.entries.push(AlgorithmEntry {
            key,
            label,
            factory,
        });
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Fresh instance for `key`, or `NotImplemented` when nothing is registered under it.
    pub fn create(&self, key: &str) -> Result<Box<dyn Algorithm<W>>> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| (e.factory)())
            .ok_or_else(|| EngineError::not_implemented(key))
    }

    /// `(key, label)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|e| (e.key, e.label))
    }
}

pub fn sorting_registry() -> Registry<SortState> {
    Registry::<SortState>::new()
        .with("bubble", "Bubble Sort", || Box::new(BubbleSort::default()))
        .with("cocktail", "Cocktail Sort", || Box::new(CocktailSort::default()))
        .with("insertion", "Insertion Sort", || Box::new(InsertionSort::default()))
        .with("selection", "Selection Sort", || Box::new(SelectionSort::default()))
}

pub fn search_registry() -> Registry<Grid> {
    Registry::<Grid>::new()
        .with("bfs", "Breadth-First Search", || Box::new(BreadthFirst::default()))
        .with("dfs", "Depth-First Search", || Box::new(DepthFirst::default()))
        .with("greedy", "Greedy Best-First", || Box::new(BestFirst::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_not_implemented() {
        let reg = sorting_registry();
        match reg.create("quick") {
            Err(EngineError::NotImplemented { key }) => assert_eq!(key, "quick"),
            other => panic!("expected NotImplemented, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn registry_lists_in_order() {
        let keys: Vec<_> = sorting_registry().entries().map(|(k, _)| k).collect();
        assert_eq!(keys, ["bubble", "cocktail", "insertion", "selection"]);
        assert!(search_registry().contains("bfs"));
    }

    #[test]
    fn re_registering_replaces() {
        let reg = Registry::<SortState>::new()
            .with("bubble", "Old", || Box::new(BubbleSort::default()))
            .with("bubble", "New", || Box::new(BubbleSort::default()));
        let labels: Vec<_> = reg.entries().map(|(_, l)| l).collect();
        assert_eq!(labels, ["New"]);
    }
}
