// Hand-rolled physics for the sandbox: per-step integration plus
// inequality-based edge bounces. No broad phase, no body-to-body contacts.

mod body;
mod world;

pub use body::{Body, Bounds};
pub use world::World;

// Re-export tuning constants for future expansion
#[allow(unused_imports)]
pub use body::{FRICTION_PENALTY, X_IMPACT_PENALTY, Y_IMPACT_PENALTY};
#[allow(unused_imports)]
pub use world::{BODY_SIZE, DEFAULT_GRAVITY, GRAVITY_STEP, NUDGE_SPEED};
