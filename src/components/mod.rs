pub mod app;
pub mod canvas_view;
pub mod controls_panel;
pub mod legend;
pub mod legend_panel;
pub mod notice;
pub mod pathfinding_view;
pub mod slider;
pub mod sorting_view;
