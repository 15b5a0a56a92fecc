//! The two visualizers the UI drives: bars being sorted, and a grid being searched.
//!
//! Each one owns its geometry, its workspace and a controller, and is the only thing the UI talks
//! to. Any action that replaces or edits the workspace invalidates the controller first, so a
//! pending timer can never step stale algorithm state.

use crate::algorithms::{
    Registry, RunOutcome, StepOutcome, Workspace, search_registry, sorting_registry,
};
use crate::controller::{Controller, Phase, Scheduler, StartOutcome, TickOutcome, TimerId};
use crate::error::Result;
use crate::geometry::{GridMapper, Layout, Surface};
use crate::model::{Cell, CellKind, Grid, Position, SortState};
use crate::state::DragTracker;
use crate::util::clog;

pub const BAR_COLOR: &str = "white";
pub const BAR_COMPARED_COLOR: &str = "red";
pub const BAR_SOLVED_COLOR: &str = "green";

/// Rows of the bar grid for `item_count` bars; keeps the canvas at roughly 2:1.
fn bar_rows(item_count: u32) -> u32 {
    (item_count / 2).max(1)
}

pub struct SortingVisualizer<S: Scheduler> {
    mapper: GridMapper,
    state: SortState,
    max_height: u32,
    controller: Controller<SortState, S>,
}

impl<S: Scheduler> SortingVisualizer<S> {
    pub fn init_canvas(
        surface: &mut impl Surface,
        item_count: u32,
        max_height: u32,
        gutter: f64,
        scheduler: S,
    ) -> Result<Self> {
        Self::with_registry(surface, item_count, max_height, gutter, sorting_registry(), scheduler)
    }

    pub fn with_registry(
        surface: &mut impl Surface,
        item_count: u32,
        max_height: u32,
        gutter: f64,
        registry: Registry<SortState>,
        scheduler: S,
    ) -> Result<Self> {
        let mapper = GridMapper::initialize(surface, item_count, bar_rows(item_count), gutter)?;
        Ok(Self {
            mapper,
            state: SortState::ramp(item_count as usize, max_height),
            max_height,
            controller: Controller::new(registry, scheduler),
        })
    }

    pub fn state(&self) -> &SortState {
        &self.state
    }

    pub fn mapper(&self) -> &GridMapper {
        &self.mapper
    }

    pub fn controller(&self) -> &Controller<SortState, S> {
        &self.controller
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// New item count / max height: rebuilds the ordered array and refits the canvas.
    pub fn update_values(
        &mut self,
        surface: &mut impl Surface,
        item_count: u32,
        max_height: u32,
    ) -> Result<Layout> {
        self.controller.invalidate();
        self.mapper
            .resize_grid(Some(item_count), Some(bar_rows(item_count)))?;
        self.mapper.resize(surface);
        self.max_height = max_height;
        self.state = SortState::ramp(item_count as usize, max_height);
        Ok(self.mapper.layout())
    }

    pub fn reset_array(&mut self) {
        self.controller.invalidate();
        self.state = SortState::ramp(self.state.len(), self.max_height);
    }

    pub fn shuffle_array(&mut self, random: impl FnMut() -> f64) {
        self.controller.invalidate();
        self.state.shuffle(random);
    }

    pub fn resize(&mut self, surface: &mut impl Surface) -> u32 {
        self.mapper.resize(surface)
    }

    pub fn check_solved(&self) -> bool {
        self.state.is_solved()
    }

    pub fn start(&mut self, key: &str, speed_ms: u32) -> Result<StartOutcome> {
        self.controller.start(key, speed_ms, &mut self.state)
    }

    pub fn tick(&mut self, timer: TimerId) -> TickOutcome {
        self.controller.tick(timer, &mut self.state)
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    pub fn step(&mut self, key: &str) -> Result<StepOutcome> {
        self.controller.single_step(key, &mut self.state)
    }

    pub fn sort(&mut self, key: &str) -> Result<RunOutcome> {
        self.controller.run_to_completion(key, &mut self.state)
    }

    pub fn change_speed(&mut self, speed_ms: u32) -> Result<Option<StartOutcome>> {
        self.controller.change_speed(speed_ms, &mut self.state)
    }

    pub fn draw(&mut self, surface: &mut impl Surface) {
        self.mapper.clear(surface);
        if self.mapper.cell_size() == 0 {
            return;
        }
        let solved = self.state.is_solved();
        let compared = self.state.compared();
        for (i, &value) in self.state.values().iter().enumerate() {
            let color = if solved {
                BAR_SOLVED_COLOR
            } else if compared.is_some_and(|(a, b)| a == i || b == i) {
                BAR_COMPARED_COLOR
            } else {
                BAR_COLOR
            };
            self.mapper
                .draw_bar(surface, i as u32, value as f64 / 100.0, color);
        }
    }
}

pub struct GridVisualizer<S: Scheduler> {
    mapper: GridMapper,
    grid: Grid,
    drag: DragTracker,
    brush: CellKind,
    controller: Controller<Grid, S>,
}

impl<S: Scheduler> GridVisualizer<S> {
    pub fn init_canvas(
        surface: &mut impl Surface,
        width: u32,
        height: u32,
        gutter: f64,
        scheduler: S,
    ) -> Result<Self> {
        let mapper = GridMapper::initialize(surface, width, height, gutter)?;
        Ok(Self {
            grid: Grid::new(mapper.size()),
            mapper,
            drag: DragTracker::new(),
            brush: CellKind::Wall,
            controller: Controller::new(search_registry(), scheduler),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mapper(&self) -> &GridMapper {
        &self.mapper
    }

    pub fn controller(&self) -> &Controller<Grid, S> {
        &self.controller
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    pub fn brush(&self) -> CellKind {
        self.brush
    }

    pub fn set_brush(&mut self, brush: CellKind) {
        self.brush = brush;
    }

    pub fn resize(&mut self, surface: &mut impl Surface) -> u32 {
        self.mapper.resize(surface)
    }

    /// New logical dimensions. The grid is rebuilt empty alongside the mapper.
    pub fn resize_grid(&mut self, width: u32, height: u32) -> Result<Layout> {
        let layout = self.mapper.resize_grid(Some(width), Some(height))?;
        self.controller.invalidate();
        self.grid = Grid::new(self.mapper.size());
        self.drag.reset();
        clog(&format!(
            "grid resized: {}x{} cell={}px",
            layout.grid_width, layout.grid_height, layout.cell_size
        ));
        Ok(layout)
    }

    pub fn reset_grid(&mut self) {
        self.controller.invalidate();
        self.grid = Grid::new(self.mapper.size());
        self.drag.reset();
    }

    pub fn clear_visited(&mut self) {
        self.controller.invalidate();
        self.grid.clear_visited();
    }

    /// Paint the brush onto `pos`. Edits stop any run and wipe previous search marks.
    pub fn paint(&mut self, pos: Position) -> Result<bool> {
        let Some(cell) = self.grid.get(pos) else {
            return Err(crate::error::EngineError::OutOfBounds {
                x: pos.x as i32,
                y: pos.y as i32,
            });
        };
        if cell.kind() == self.brush {
            return Ok(false);
        }
        if self.controller.active_key().is_some() || self.grid.visited_count() > 0 {
            self.controller.invalidate();
            self.grid.clear_visited();
        }
        self.grid.paint(pos, self.brush)?;
        Ok(true)
    }

    /// Pointer pressed at a canvas pixel. Returns whether the grid changed.
    pub fn pointer_down(&mut self, px: f64, py: f64) -> bool {
        let cell = self.mapper.pixel_to_cell(px, py);
        self.drag.track(cell);
        match cell {
            Some(pos) => self.paint(pos).unwrap_or(false),
            None => false,
        }
    }

    /// Pointer moved; with a button held, paints every cell crossed since the last event.
    pub fn pointer_move(&mut self, px: f64, py: f64, pressed: bool) -> bool {
        let cell = self.mapper.pixel_to_cell(px, py);
        let Some(pos) = cell else {
            self.drag.reset();
            return false;
        };
        if !pressed || !matches!(self.brush, CellKind::Wall | CellKind::Empty) {
            self.drag.track(cell);
            return false;
        }
        let mut changed = false;
        for p in self.drag.interpolate(pos) {
            changed |= self.paint(p).unwrap_or(false);
        }
        changed
    }

    pub fn pointer_up(&mut self) {
        self.drag.reset();
    }

    pub fn check_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Switching to another algorithm starts over from a clean grid.
    fn switch_to(&mut self, key: &str) {
        if self.controller.active_key().is_some_and(|k| k != key)
            && self.controller.registry().contains(key)
        {
            self.controller.invalidate();
            self.grid.clear_visited();
        }
    }

    pub fn start(&mut self, key: &str, speed_ms: u32) -> Result<StartOutcome> {
        self.grid.ready()?;
        self.switch_to(key);
        self.controller.start(key, speed_ms, &mut self.grid)
    }

    pub fn tick(&mut self, timer: TimerId) -> TickOutcome {
        self.controller.tick(timer, &mut self.grid)
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    pub fn step(&mut self, key: &str) -> Result<StepOutcome> {
        self.grid.ready()?;
        self.switch_to(key);
        self.controller.single_step(key, &mut self.grid)
    }

    pub fn solve(&mut self, key: &str) -> Result<RunOutcome> {
        self.grid.ready()?;
        self.switch_to(key);
        self.controller.run_to_completion(key, &mut self.grid)
    }

    pub fn change_speed(&mut self, speed_ms: u32) -> Result<Option<StartOutcome>> {
        self.controller.change_speed(speed_ms, &mut self.grid)
    }

    pub fn phase(&self) -> &Phase {
        self.controller.phase()
    }

    pub fn draw(&mut self, surface: &mut impl Surface) {
        let grid = &self.grid;
        self.mapper
            .draw_grid(surface, |p| grid.get(p).map_or("white", Cell::color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ManualScheduler;
    use crate::error::EngineError;
    use crate::geometry::RecordingSurface;
    use crate::util::uniform;

    fn sorting() -> (SortingVisualizer<ManualScheduler>, RecordingSurface) {
        let mut s = RecordingSurface::with_container(800);
        let v = SortingVisualizer::init_canvas(&mut s, 20, 100, 0.25, ManualScheduler::new())
            .unwrap();
        (v, s)
    }

    fn grid() -> (GridVisualizer<ManualScheduler>, RecordingSurface) {
        let mut s = RecordingSurface::with_container(400);
        let v = GridVisualizer::init_canvas(&mut s, 10, 5, 0.25, ManualScheduler::new()).unwrap();
        (v, s)
    }

    #[test]
    fn sorting_canvas_layout() {
        let (v, s) = sorting();
        assert_eq!((s.width, s.height), (800, 400));
        assert_eq!(v.mapper().layout().cell_size, 40);
        assert!(v.check_solved());
    }

    #[test]
    fn shuffle_invalidates_a_running_animation() {
        let (mut v, _) = sorting();
        v.shuffle_array(uniform(2));
        v.start("bubble", 100).unwrap();
        let timer = v.controller().scheduler().live_timer().unwrap();
        v.shuffle_array(uniform(3));
        assert!(!v.is_running());
        assert_eq!(v.tick(timer), TickOutcome::Ignored);
    }

    #[test]
    fn update_values_rebuilds_and_refits() {
        let (mut v, mut s) = sorting();
        let layout = v.update_values(&mut s, 40, 50).unwrap();
        assert_eq!(layout.grid_width, 40);
        assert_eq!(layout.grid_height, 20);
        assert_eq!(v.state().len(), 40);
        assert_eq!(*v.state().values().last().unwrap(), 50);
    }

    #[test]
    fn draw_colors_compared_and_solved_bars() {
        let (mut v, mut s) = sorting();
        v.draw(&mut s);
        assert!(s.fills[1..].iter().all(|f| f.color == BAR_SOLVED_COLOR));
        v.shuffle_array(uniform(8));
        v.step("bubble").unwrap();
        s.fills.clear();
        v.draw(&mut s);
        assert_eq!(
            s.fills.iter().filter(|f| f.color == BAR_COMPARED_COLOR).count(),
            2
        );
    }

    #[test]
    fn search_needs_endpoints() {
        let (mut v, _) = grid();
        assert!(matches!(
            v.start("bfs", 100),
            Err(EngineError::MissingEndpoint { .. })
        ));
        assert!(!v.is_running());
    }

    #[test]
    fn drag_paints_a_continuous_wall() {
        let (mut v, _) = grid();
        // 400x200 canvas, 40px cells, no letterbox
        assert!(v.pointer_down(5.0, 5.0));
        assert!(v.pointer_move(125.0, 45.0, true));
        let walls: Vec<Position> = v
            .grid()
            .cells()
            .filter(|c| c.kind() == CellKind::Wall)
            .map(Cell::pos)
            .collect();
        assert_eq!(
            walls,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 1),
                Position::new(3, 1)
            ]
        );
    }

    #[test]
    fn hover_without_button_paints_nothing() {
        let (mut v, _) = grid();
        assert!(!v.pointer_move(125.0, 45.0, false));
        assert_eq!(v.grid().cells().filter(|c| c.kind() == CellKind::Wall).count(), 0);
    }

    #[test]
    fn painting_mid_run_stops_it() {
        let (mut v, _) = grid();
        v.set_brush(CellKind::Start);
        v.pointer_down(5.0, 5.0);
        v.set_brush(CellKind::End);
        v.pointer_down(395.0, 195.0);
        v.start("bfs", 50).unwrap();
        let timer = v.controller().scheduler().live_timer().unwrap();
        assert_eq!(v.tick(timer), TickOutcome::Stepped);
        v.set_brush(CellKind::Wall);
        assert!(v.pointer_down(205.0, 105.0));
        assert!(!v.is_running());
        assert_eq!(v.grid().visited_count(), 0);
    }

    #[test]
    fn resize_grid_rebuilds_cells() {
        let (mut v, _) = grid();
        v.pointer_down(5.0, 5.0);
        let layout = v.resize_grid(20, 10).unwrap();
        assert_eq!(layout.cell_size, 20);
        assert_eq!(v.grid().size(), v.mapper().size());
        assert_eq!(v.grid().cells().filter(|c| c.kind() == CellKind::Wall).count(), 0);
        assert!(v.resize_grid(0, 10).is_err());
    }

    #[test]
    fn switching_algorithm_clears_marks() {
        let (mut v, _) = grid();
        v.set_brush(CellKind::Start);
        v.pointer_down(5.0, 5.0);
        v.set_brush(CellKind::End);
        v.pointer_down(395.0, 195.0);
        v.step("bfs").unwrap();
        v.step("bfs").unwrap();
        assert_eq!(v.grid().visited_count(), 2);
        v.step("dfs").unwrap();
        assert_eq!(v.grid().visited_count(), 1);
        assert_eq!(v.controller().active_key(), Some("dfs"));
    }

    #[test]
    fn solved_flag_follows_every_edit() {
        let (mut v, _) = sorting();
        assert!(v.check_solved());
        v.shuffle_array(uniform(4));
        assert!(!v.check_solved());
        v.sort("bubble").unwrap();
        assert!(v.check_solved());
        v.shuffle_array(uniform(5));
        v.reset_array();
        assert!(v.check_solved());
    }

    #[test]
    fn visited_count_follows_steps_and_clears() {
        let (mut v, _) = grid();
        v.set_brush(CellKind::Start);
        v.pointer_down(5.0, 5.0);
        v.set_brush(CellKind::End);
        v.pointer_down(395.0, 195.0);
        v.step("bfs").unwrap();
        assert_eq!(v.grid().visited_count(), 1);
        v.solve("bfs").unwrap();
        assert!(v.check_solved());
        v.clear_visited();
        assert_eq!(v.grid().visited_count(), 0);
        assert!(!v.check_solved());
    }
}
