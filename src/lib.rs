//! Notefall library - one-button rhythm game with music-reactive visuals

pub mod audio;
pub mod cli;
pub mod config;
pub mod game;
pub mod geom;
pub mod oscillator;
pub mod particles;
pub mod render;
pub mod spectrum;
pub mod visualizers;
