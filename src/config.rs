//! Startup settings. Read once from the page, never written back.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::util::snap;

/// Slider bounds: `(min, max, step)`.
pub const ITEM_COUNT_RANGE: (u32, u32, u32) = (10, 200, 5);
pub const MAX_HEIGHT_RANGE: (u32, u32, u32) = (10, 100, 5);
pub const SPEED_RANGE: (u32, u32, u32) = (0, 300, 10);
pub const GRID_WIDTH_RANGE: (u32, u32, u32) = (5, 100, 1);
pub const GRID_HEIGHT_RANGE: (u32, u32, u32) = (5, 60, 1);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub item_count: u32,
    /// Tallest bar, percent of the drawable height.
    pub max_height: u32,
    pub speed_ms: u32,
    pub sort_algorithm: String,
    pub search_algorithm: String,
    pub grid_width: u32,
    pub grid_height: u32,
    /// Inset in pixels on each side of a drawn cell.
    pub gutter: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            item_count: 20,
            max_height: 100,
            speed_ms: 100,
            sort_algorithm: "bubble".to_string(),
            search_algorithm: "bfs".to_string(),
            grid_width: 40,
            grid_height: 20,
            gutter: 0.25,
        }
    }
}

fn fit(value: u32, (min, max, step): (u32, u32, u32)) -> u32 {
    snap(value, min, max, step)
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(raw)?;
        Ok(settings.sanitized())
    }

    /// Clamp every numeric field into its slider range.
    pub fn sanitized(mut self) -> Self {
        self.item_count = fit(self.item_count, ITEM_COUNT_RANGE);
        self.max_height = fit(self.max_height, MAX_HEIGHT_RANGE);
        self.speed_ms = fit(self.speed_ms, SPEED_RANGE);
        self.grid_width = fit(self.grid_width, GRID_WIDTH_RANGE);
        self.grid_height = fit(self.grid_height, GRID_HEIGHT_RANGE);
        if !self.gutter.is_finite() || self.gutter < 0.0 {
            self.gutter = Self::default().gutter;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn missing_fields_take_defaults() {
        let s = Settings::from_json(r#"{"speed_ms": 40}"#).unwrap();
        assert_eq!(s.speed_ms, 40);
        assert_eq!(s.item_count, 20);
        assert_eq!(s.sort_algorithm, "bubble");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let s = Settings::from_json(
            r#"{"item_count": 3, "max_height": 250, "speed_ms": 47, "gutter": -1.0}"#,
        )
        .unwrap();
        assert_eq!(s.item_count, 10);
        assert_eq!(s.max_height, 100);
        assert_eq!(s.speed_ms, 40);
        assert_eq!(s.gutter, 0.25);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(EngineError::Config(_))
        ));
    }
}
