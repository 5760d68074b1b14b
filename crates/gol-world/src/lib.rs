//! Two-color Game of Life engine.
//!
//! This module implements the toroidal board, the generation kernel, the
//! driver loop that runs a match to completion, and the setup of the two
//! competing player regions.

pub mod arena;
pub mod control;
pub mod engine;
pub mod grid;
pub mod player;
pub mod render;
pub mod simulation;

pub use arena::Arena;
pub use control::{CancelFn, CancellationSource, NeverCancel, NoopObserver, SimulationObserver};
pub use engine::{Engine, StepSummary};
pub use grid::Board;
pub use player::PlayerGrid;
pub use render::Frame;
pub use simulation::Simulation;
