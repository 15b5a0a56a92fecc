//! Stepwise sorting and path-search visualizer.
//!
//! Everything here runs without a browser: drawing goes through [`geometry::Surface`] and timers
//! through [`controller::Scheduler`]. The binary supplies canvas and `setInterval` backed
//! implementations plus the Yew UI.

pub mod algorithms;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod model;
pub mod state;
pub mod util;

pub use engine::{GridVisualizer, SortingVisualizer};
pub use error::{EngineError, Result};
