//! Wrap-around Snake: the simulation core plus a ratatui front end.
//!
//! The core (`grid`, `snake`, `food`, `growth`, `collision`, `scoring`,
//! `game`, `clock`) is free of terminal I/O; `renderer`, `ui`, `input` and
//! `terminal_runtime` present it.

pub mod clock;
pub mod collision;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod growth;
pub mod high_scores;
pub mod input;
pub mod renderer;
pub mod scoring;
pub mod snake;
pub mod terminal_runtime;
pub mod theme;
pub mod ui;
