//! Grid snake with power-ups, obstacles and level progression.
//!
//! The simulation core (`game`, `snake`, `food`, `obstacles`) is free of
//! terminal concerns; `renderer`, `ui` and `terminal_runtime` drive it from a
//! ratatui front end.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod obstacles;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod theme;
pub mod ui;
