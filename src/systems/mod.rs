//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod scheduler;
mod simulation;
mod window;

pub use scheduler::{CancelToken, FrameScheduler};
pub use simulation::{SimulationResult, SimulationSystem};
pub use window::WindowSystem;
