// Input handling system
//
// Maps winit keyboard and mouse events onto edge-triggered sandbox actions.
//
// - `action`: action enum and the fixed binding table
// - `manager`: per-frame press state and cursor tracking

pub mod action;
pub mod manager;

pub use action::{Action, InputSource};
pub use manager::InputManager;
