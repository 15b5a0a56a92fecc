// Pointer drag tracking: fills the cells a fast drag skips between two move events.
use crate::model::Position;
use crate::util::lerp;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct DragTracker {
    last: Option<Position>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Position> {
        self.last
    }

    /// Record the cell under the pointer, or forget it when the pointer left the grid.
    pub fn track(&mut self, cell: Option<Position>) {
        self.last = cell;
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Cells from just after the last recorded cell up to `current` inclusive.
    ///
    /// Walks `N = max(|dx|, |dy|)` evenly spaced samples and rounds each to a cell, so consecutive
    /// cells differ by at most one on each axis. With no previous cell only `current` is returned;
    /// with no movement the result is empty. `current` always becomes the last cell.
    pub fn interpolate(&mut self, current: Position) -> Vec<Position> {
        let Some(last) = self.last.replace(current) else {
            return vec![current];
        };
        let (x0, y0) = (last.x as f64, last.y as f64);
        let (x1, y1) = (current.x as f64, current.y as f64);
        let n = last.x.abs_diff(current.x).max(last.y.abs_diff(current.y));
        let mut points = Vec::with_capacity(n as usize);
        for step in 1..=n {
            let t = step as f64 / n as f64;
            points.push(Position::new(
                lerp(x0, x1, t).round() as u32,
                lerp(y0, y1, t).round() as u32,
            ));
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_movement_yields_nothing() {
        let mut d = DragTracker::new();
        d.track(Some(Position::new(2, 2)));
        assert!(d.interpolate(Position::new(2, 2)).is_empty());
        assert_eq!(d.last(), Some(Position::new(2, 2)));
    }

    #[test]
    fn first_contact_yields_current() {
        let mut d = DragTracker::new();
        assert_eq!(d.interpolate(Position::new(4, 1)), vec![Position::new(4, 1)]);
        assert_eq!(d.last(), Some(Position::new(4, 1)));
    }

    #[test]
    fn diagonal_skip_is_filled() {
        let mut d = DragTracker::new();
        d.track(Some(Position::new(0, 0)));
        let pts = d.interpolate(Position::new(3, 1));
        assert_eq!(
            pts,
            vec![Position::new(1, 0), Position::new(2, 1), Position::new(3, 1)]
        );
    }

    #[test]
    fn moves_backwards() {
        let mut d = DragTracker::new();
        d.track(Some(Position::new(5, 5)));
        let pts = d.interpolate(Position::new(2, 5));
        assert_eq!(
            pts,
            vec![Position::new(4, 5), Position::new(3, 5), Position::new(2, 5)]
        );
    }

    #[test]
    fn leaving_the_grid_resets() {
        let mut d = DragTracker::new();
        d.track(Some(Position::new(1, 1)));
        d.track(None);
        assert_eq!(d.interpolate(Position::new(6, 6)), vec![Position::new(6, 6)]);
    }
}
