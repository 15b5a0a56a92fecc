// Sorting algorithms over the bar array. Each keeps its own cursors between steps.
use super::{Algorithm, RunOutcome, StepOutcome, Workspace};
use crate::model::SortState;

impl Workspace for SortState {
    fn is_solved(&self) -> bool {
        SortState::is_solved(self)
    }
}

/// One step = one adjacent swap. Comparisons that do not swap are folded into the same step.
#[derive(Debug, Default, Clone)]
pub struct BubbleSort {
    i: usize,
    /// Exclusive end of the unsettled prefix; `None` until the first step.
    end: Option<usize>,
}

impl Algorithm<SortState> for BubbleSort {
    fn step(&mut self, state: &mut SortState) -> StepOutcome {
        if state.is_solved() {
            return StepOutcome::AlreadySolved;
        }
        let n = state.len();
        loop {
            let end = *self.end.get_or_insert(n);
            if end < 2 || end > n {
                self.end = Some(n);
                self.i = 0;
                continue;
            }
            if self.i + 1 >= end {
                self.i = 0;
                self.end = Some(end - 1);
                continue;
            }
            let i = self.i;
            self.i += 1;
            if state.greater(i, i + 1) {
                state.swap(i, i + 1);
                return StepOutcome::Advanced;
            }
        }
    }

    fn run(&mut self, state: &mut SortState) -> RunOutcome {
        if state.is_solved() {
            return RunOutcome::AlreadySolved;
        }
        let n = state.len();
        let mut swaps = 0;
        for pass in 0..n {
            let mut swapped = false;
            for i in 0..n - 1 - pass {
                if state.greater(i, i + 1) {
                    state.swap(i, i + 1);
                    swaps += 1;
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
        *self = Self::default();
        RunOutcome::Solved { steps: swaps }
    }
}

/// Bidirectional bubble sort. One step = one adjacent swap.
#[derive(Debug, Clone)]
pub struct CocktailSort {
    start: usize,
    end: Option<usize>,
    i: usize,
    forward: bool,
}

impl Default for CocktailSort {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            i: 0,
            forward: true,
        }
    }
}

impl Algorithm<SortState> for CocktailSort {
    fn step(&mut self, state: &mut SortState) -> StepOutcome {
        if state.is_solved() {
            return StepOutcome::AlreadySolved;
        }
        let n = state.len();
        loop {
            let end = *self.end.get_or_insert(n);
            if end > n || end < self.start + 2 {
                *self = Self {
                    end: Some(n),
                    ..Self::default()
                };
                continue;
            }
            if self.forward {
                if self.i + 1 >= end {
                    self.end = Some(end - 1);
                    self.forward = false;
                    self.i = end - 2;
                    continue;
                }
                let i = self.i;
                self.i += 1;
                if state.greater(i, i + 1) {
                    state.swap(i, i + 1);
                    return StepOutcome::Advanced;
                }
            } else {
                if self.i <= self.start {
                    self.start += 1;
                    self.forward = true;
                    self.i = self.start;
                    continue;
                }
                let i = self.i;
                self.i -= 1;
                if state.greater(i - 1, i) {
                    state.swap(i - 1, i);
                    return StepOutcome::Advanced;
                }
            }
        }
    }
}

/// One step = one adjacent swap carrying the current key left.
#[derive(Debug, Clone)]
pub struct InsertionSort {
    /// Index of the next key to insert.
    next: usize,
    /// Current position of the key being inserted, if any.
    key: Option<usize>,
}

impl Default for InsertionSort {
    fn default() -> Self {
        Self { next: 1, key: None }
    }
}

impl Algorithm<SortState> for InsertionSort {
    fn step(&mut self, state: &mut SortState) -> StepOutcome {
        if state.is_solved() {
            return StepOutcome::AlreadySolved;
        }
        let n = state.len();
        loop {
            let j = match self.key {
                Some(j) => j,
                None => {
                    if self.next >= n {
                        self.next = 1;
                    }
                    let j = self.next;
                    self.next += 1;
                    self.key = Some(j);
                    j
                }
            };
            if j == 0 || !state.greater(j - 1, j) {
                self.key = None;
                continue;
            }
            state.swap(j - 1, j);
            self.key = Some(j - 1);
            return StepOutcome::Advanced;
        }
    }
}

/// One step = one comparison against the running minimum; the swap closing a scan is its own step.
#[derive(Debug, Default, Clone)]
pub struct SelectionSort {
    i: usize,
    j: usize,
    min: usize,
    scanning: bool,
}

impl Algorithm<SortState> for SelectionSort {
    fn step(&mut self, state: &mut SortState) -> StepOutcome {
        if state.is_solved() {
            return StepOutcome::AlreadySolved;
        }
        let n = state.len();
        loop {
            if self.i + 1 >= n {
                *self = Self::default();
            }
            if !self.scanning {
                self.min = self.i;
                self.j = self.i + 1;
                self.scanning = true;
            }
            if self.j < n {
                let j = self.j;
                self.j += 1;
                if state.greater(self.min, j) {
                    self.min = j;
                }
                return StepOutcome::Advanced;
            }
            let (i, min) = (self.i, self.min);
            self.i += 1;
            self.scanning = false;
            if min != i {
                state.swap(i, min);
                return StepOutcome::Advanced;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::uniform;

    fn shuffled(n: usize, seed: u64) -> SortState {
        let mut s = SortState::ramp(n, 100);
        s.shuffle(uniform(seed));
        s
    }

    fn inversions(values: &[u32]) -> usize {
        let mut count = 0;
        for i in 0..values.len() {
            for j in i + 1..values.len() {
                if values[i] > values[j] {
                    count += 1;
                }
            }
        }
        count
    }

    fn step_until_solved(alg: &mut dyn Algorithm<SortState>, s: &mut SortState) -> usize {
        let mut steps = 0;
        while !s.is_solved() {
            assert_eq!(alg.step(s), StepOutcome::Advanced);
            steps += 1;
            assert!(steps < 100_000, "runaway stepping");
        }
        steps
    }

    #[test]
    fn bubble_steps_equal_swaps() {
        let mut s = shuffled(20, 11);
        let expected = inversions(s.values());
        let mut alg = BubbleSort::default();
        assert_eq!(step_until_solved(&mut alg, &mut s), expected);
    }

    #[test]
    fn bubble_run_counts_swaps() {
        let mut s = shuffled(30, 5);
        let expected = inversions(s.values());
        assert_eq!(
            BubbleSort::default().run(&mut s),
            RunOutcome::Solved { steps: expected }
        );
        assert!(s.is_solved());
    }

    #[test]
    fn cocktail_steps_equal_swaps() {
        let mut s = shuffled(25, 9);
        let expected = inversions(s.values());
        let mut alg = CocktailSort::default();
        assert_eq!(step_until_solved(&mut alg, &mut s), expected);
    }

    #[test]
    fn insertion_steps_equal_swaps() {
        let mut s = shuffled(25, 21);
        let expected = inversions(s.values());
        let mut alg = InsertionSort::default();
        assert_eq!(step_until_solved(&mut alg, &mut s), expected);
    }

    #[test]
    fn selection_sorts() {
        let mut s = shuffled(40, 17);
        let mut alg = SelectionSort::default();
        step_until_solved(&mut alg, &mut s);
        assert_eq!(s.values(), SortState::ramp(40, 100).values());
    }

    #[test]
    fn step_on_sorted_input_is_a_no_op() {
        let mut s = SortState::ramp(10, 100);
        let before = s.clone();
        let registry = crate::algorithms::sorting_registry();
        for (key, _) in registry.entries() {
            let mut alg = registry.create(key).unwrap();
            assert_eq!(alg.step(&mut s), StepOutcome::AlreadySolved, "{key}");
            assert_eq!(alg.run(&mut s), RunOutcome::AlreadySolved, "{key}");
        }
        assert_eq!(s, before);
    }

    #[test]
    fn duplicates_are_handled() {
        let mut s = SortState::from_values(vec![3, 1, 3, 2, 1, 3]);
        let mut alg = CocktailSort::default();
        step_until_solved(&mut alg, &mut s);
        assert_eq!(s.values(), &[1, 1, 2, 3, 3, 3]);
    }
}
