//! Core data models: grid cells for the search view and the bar array for the sorting view.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Empty,
    Start,
    Checkpoint,
    End,
    Wall,
}

impl CellKind {
    pub const ALL: [CellKind; 5] = [
        CellKind::Empty,
        CellKind::Start,
        CellKind::Checkpoint,
        CellKind::End,
        CellKind::Wall,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CellKind::Empty => "empty",
            CellKind::Start => "start",
            CellKind::Checkpoint => "checkpoint",
            CellKind::End => "end",
            CellKind::Wall => "wall",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

/// Fill color of a cell. Total over every `(kind, visited)` pair.
pub fn cell_color(kind: CellKind, visited: bool) -> &'static str {
    match kind {
        CellKind::Start => "green",
        CellKind::Checkpoint => "blue",
        CellKind::End => "red",
        CellKind::Wall => "black",
        CellKind::Empty if visited => "yellow",
        CellKind::Empty => "white",
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pos: Position,
    kind: CellKind,
    visited: bool,
}

impl Cell {
    pub fn new(pos: Position, kind: CellKind) -> Self {
        Self {
            pos,
            kind,
            visited: false,
        }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn color(&self) -> &'static str {
        cell_color(self.kind, self.visited)
    }

    pub fn is_passable(&self) -> bool {
        self.kind != CellKind::Wall
    }
}

/// Search workspace. Cells are stored column-major so `cells[x * height + y]` is cell `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: GridSize) -> Self {
        let mut cells = Vec::with_capacity(size.cell_count());
        for x in 0..size.width {
            for y in 0..size.height {
                cells.push(Cell::new(Position::new(x, y), CellKind::Empty));
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < self.size.width && pos.y < self.size.height {
            Some(pos.x as usize * self.size.height as usize + pos.y as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Paint `kind` onto a cell. Start and end stay unique: the previous one becomes empty.
    pub fn paint(&mut self, pos: Position, kind: CellKind) -> Result<()> {
        let Some(idx) = self.index(pos) else {
            return Err(EngineError::OutOfBounds {
                x: pos.x as i32,
                y: pos.y as i32,
            });
        };
        if matches!(kind, CellKind::Start | CellKind::End) {
            for cell in self.cells.iter_mut() {
                if cell.kind == kind && cell.pos != pos {
                    cell.set_kind(CellKind::Empty);
                }
            }
        }
        let cell = &mut self.cells[idx];
        cell.set_kind(kind);
        cell.set_visited(false);
        Ok(())
    }

    pub fn find(&self, kind: CellKind) -> Option<Position> {
        self.cells.iter().find(|c| c.kind == kind).map(Cell::pos)
    }

    pub fn start(&self) -> Option<Position> {
        self.find(CellKind::Start)
    }

    pub fn end(&self) -> Option<Position> {
        self.find(CellKind::End)
    }

    /// Checkpoints in row-major order, then the end.
    pub fn targets(&self) -> Vec<Position> {
        let mut checkpoints: Vec<Position> = self
            .cells
            .iter()
            .filter(|c| c.kind == CellKind::Checkpoint)
            .map(Cell::pos)
            .collect();
        checkpoints.sort_by_key(|p| (p.y, p.x));
        checkpoints.extend(self.end());
        checkpoints
    }

    /// Passable 4-neighbours in right, down, left, up order.
    pub fn neighbours(&self, pos: Position) -> Vec<Position> {
        let dirs = [(1, 0), (0, 1), (-1, 0), (0, -1)];
        let mut out = Vec::with_capacity(4);
        for (dx, dy) in dirs {
            let nx = pos.x as i32 + dx;
            let ny = pos.y as i32 + dy;
            if !self.size.contains(nx, ny) {
                continue;
            }
            let np = Position::new(nx as u32, ny as u32);
            if self.get(np).is_some_and(Cell::is_passable) {
                out.push(np);
            }
        }
        out
    }

    pub fn mark_visited(&mut self, pos: Position) {
        if let Some(cell) = self.get_mut(pos) {
            cell.set_visited(true);
        }
    }

    pub fn clear_visited(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_visited(false);
        }
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|c| c.visited).count()
    }

    /// Goal predicate: an end exists and it plus every checkpoint have been visited.
    pub fn is_solved(&self) -> bool {
        let Some(end) = self.end() else {
            return false;
        };
        let end_visited = self.get(end).is_some_and(Cell::visited);
        end_visited
            && self
                .cells
                .iter()
                .filter(|c| c.kind == CellKind::Checkpoint)
                .all(Cell::visited)
    }
}

/// Sorting workspace: bar heights as percentages of the drawable height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    values: Vec<u32>,
    /// Pair touched by the most recent step, for highlighting.
    compared: Option<(usize, usize)>,
}

impl SortState {
    pub fn ramp(item_count: usize, max_height: u32) -> Self {
        let n = item_count.max(1);
        let values = (0..n)
            .map(|i| {
                let v = (max_height as f64 * (i + 1) as f64 / n as f64).round() as u32;
                v.max(1)
            })
            .collect();
        Self {
            values,
            compared: None,
        }
    }

    pub fn from_values(values: Vec<u32>) -> Self {
        Self {
            values,
            compared: None,
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn compared(&self) -> Option<(usize, usize)> {
        self.compared
    }

    pub fn mark(&mut self, a: usize, b: usize) {
        self.compared = Some((a, b));
    }

    pub fn clear_mark(&mut self) {
        self.compared = None;
    }

    /// Compare `values[a] > values[b]`, marking the pair.
    pub fn greater(&mut self, a: usize, b: usize) -> bool {
        self.mark(a, b);
        self.values[a] > self.values[b]
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.mark(a, b);
    }

    /// Fisher-Yates shuffle; `random` yields uniform values in `[0, 1)`.
    pub fn shuffle(&mut self, mut random: impl FnMut() -> f64) {
        for i in (1..self.values.len()).rev() {
            let j = ((random() * (i + 1) as f64).floor() as usize).min(i);
            self.values.swap(i, j);
        }
        self.compared = None;
    }

    pub fn is_solved(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::uniform;

    fn grid(w: u32, h: u32) -> Grid {
        Grid::new(GridSize::new(w, h).unwrap())
    }

    #[test]
    fn color_mapping_matches_kinds() {
        assert_eq!(cell_color(CellKind::Start, true), "green");
        assert_eq!(cell_color(CellKind::Checkpoint, false), "blue");
        assert_eq!(cell_color(CellKind::End, true), "red");
        assert_eq!(cell_color(CellKind::Wall, true), "black");
        assert_eq!(cell_color(CellKind::Empty, true), "yellow");
        assert_eq!(cell_color(CellKind::Empty, false), "white");
    }

    #[test]
    fn color_follows_mutations() {
        let mut c = Cell::new(Position::new(0, 0), CellKind::Empty);
        assert_eq!(c.color(), "white");
        c.set_visited(true);
        assert_eq!(c.color(), "yellow");
        c.set_kind(CellKind::Wall);
        assert_eq!(c.color(), "black");
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(matches!(
            GridSize::new(0, 4),
            Err(EngineError::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn grid_has_one_cell_per_coordinate() {
        let g = grid(4, 3);
        assert_eq!(g.cells().count(), 12);
        for x in 0..4 {
            for y in 0..3 {
                assert_eq!(g.get(Position::new(x, y)).unwrap().pos(), Position::new(x, y));
            }
        }
        assert!(g.get(Position::new(4, 0)).is_none());
    }

    #[test]
    fn start_and_end_stay_unique() {
        let mut g = grid(5, 5);
        g.paint(Position::new(0, 0), CellKind::Start).unwrap();
        g.paint(Position::new(3, 3), CellKind::Start).unwrap();
        assert_eq!(g.start(), Some(Position::new(3, 3)));
        assert_eq!(g.get(Position::new(0, 0)).unwrap().kind(), CellKind::Empty);
        assert!(g.paint(Position::new(9, 9), CellKind::Wall).is_err());
    }

    #[test]
    fn targets_list_checkpoints_then_end() {
        let mut g = grid(5, 5);
        g.paint(Position::new(4, 4), CellKind::End).unwrap();
        g.paint(Position::new(3, 1), CellKind::Checkpoint).unwrap();
        g.paint(Position::new(1, 2), CellKind::Checkpoint).unwrap();
        assert_eq!(
            g.targets(),
            vec![Position::new(3, 1), Position::new(1, 2), Position::new(4, 4)]
        );
    }

    #[test]
    fn neighbours_skip_walls_and_edges() {
        let mut g = grid(3, 3);
        g.paint(Position::new(1, 0), CellKind::Wall).unwrap();
        assert_eq!(g.neighbours(Position::new(0, 0)), vec![Position::new(0, 1)]);
    }

    #[test]
    fn solved_needs_end_and_checkpoints_visited() {
        let mut g = grid(3, 3);
        assert!(!g.is_solved());
        g.paint(Position::new(2, 2), CellKind::End).unwrap();
        g.paint(Position::new(1, 1), CellKind::Checkpoint).unwrap();
        g.mark_visited(Position::new(2, 2));
        assert!(!g.is_solved());
        g.mark_visited(Position::new(1, 1));
        assert!(g.is_solved());
        g.clear_visited();
        assert!(!g.is_solved());
    }

    #[test]
    fn ramp_is_sorted_and_scaled() {
        let s = SortState::ramp(20, 100);
        assert_eq!(s.len(), 20);
        assert_eq!(s.values()[0], 5);
        assert_eq!(s.values()[19], 100);
        assert!(s.is_solved());
        let tiny = SortState::ramp(200, 10);
        assert!(tiny.values().iter().all(|&v| v >= 1));
    }

    #[test]
    fn shuffle_keeps_the_multiset() {
        let mut s = SortState::ramp(50, 100);
        let mut before = s.values().to_vec();
        s.shuffle(uniform(3));
        assert!(!s.is_solved());
        let mut after = s.values().to_vec();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }
}
