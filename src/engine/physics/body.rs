// Falling-crate dynamics: per-frame integration and edge bounces

use glam::Vec2;

/// Horizontal speed shed on impact with a side wall (applied doubled)
pub const X_IMPACT_PENALTY: f32 = 2.0;

/// Vertical speed shed on impact with floor or ceiling (applied doubled)
pub const Y_IMPACT_PENALTY: f32 = 2.0;

/// Horizontal speed shed per update while resting on the floor
pub const FRICTION_PENALTY: f32 = 0.25;

/// Canvas extents the bodies bounce inside, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One falling, bouncing rectangle.
///
/// Positions are the top-left corner of the bounding box in canvas pixels,
/// y growing downward. Velocity is displacement per simulation step and
/// gravity is added to the vertical component each step while airborne.
#[derive(Debug, Clone)]
pub struct Body {
    position: Vec2,
    spawn: Vec2,
    velocity: Vec2,
    gravity: f32,
    at_rest: bool,
    size: Vec2,
}

impl Body {
    /// Create a body at `position` with zero velocity.
    ///
    /// Gravity is stored as its absolute value, so a negative argument
    /// still pulls the body toward the floor.
    pub fn new(gravity: f32, position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            spawn: position,
            velocity: Vec2::ZERO,
            gravity: gravity.abs(),
            at_rest: false,
            size,
        }
    }

    /// Advance one simulation step: integrate position, then either
    /// accumulate gravity (airborne) or bleed horizontal speed (at rest).
    pub fn update(&mut self) {
        self.position += self.velocity;

        if !self.at_rest {
            self.velocity.y += self.gravity;
        } else if self.velocity.x != 0.0 {
            // Friction never overshoots past zero
            let decay = self.velocity.x.abs().min(FRICTION_PENALTY);
            self.velocity.x -= decay.copysign(self.velocity.x);
        }
    }

    /// Detect and resolve contact with the four canvas edges.
    ///
    /// Axes are handled independently, X first, and each wall pair is
    /// mutually exclusive per step. An impact sheds twice the axis penalty
    /// from the leading velocity component, clamps it at zero, reverses it,
    /// and pushes the body back inside the wall. A floor impact whose
    /// rebound clamps to exactly zero puts the body to rest.
    pub fn resolve_bounds(&mut self, bounds: Bounds) {
        if self.position.x + self.size.x >= bounds.width {
            self.velocity.x = -(self.velocity.x - 2.0 * X_IMPACT_PENALTY).max(0.0);
            self.position.x = bounds.width - (self.size.x + 1.0);
        } else if self.position.x <= 0.0 {
            self.velocity.x = -(self.velocity.x + 2.0 * X_IMPACT_PENALTY).min(0.0);
            self.position.x = 1.0;
        }

        if self.position.y + self.size.y > bounds.height {
            let rebound = (self.velocity.y - 2.0 * Y_IMPACT_PENALTY).max(0.0);
            self.at_rest = rebound == 0.0;
            self.velocity.y = -rebound;
            self.position.y = bounds.height - self.size.y;
        } else if self.position.y <= 0.0 {
            self.velocity.y = -(self.velocity.y + 2.0 * Y_IMPACT_PENALTY).min(0.0);
            self.position.y = 1.0;
        }
    }

    /// Add to the current velocity. Wakes the body if the vertical
    /// component of the delta is non-zero.
    pub fn velocity_add(&mut self, delta: Vec2) {
        self.velocity += delta;
        if delta.y != 0.0 {
            self.at_rest = false;
        }
    }

    /// Overwrite the velocity. Wakes the body only for a downward (positive
    /// y) component.
    pub fn velocity_set(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        if velocity.y > 0.0 {
            self.at_rest = false;
        }
    }

    /// Zero velocity, return to the spawn point, wake up. Gravity keeps its
    /// current value.
    pub fn reset_to_spawn(&mut self) {
        self.velocity = Vec2::ZERO;
        self.position = self.spawn;
        self.at_rest = false;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Set the per-step gravity. Callers keep this non-negative; the setter
    /// itself does not clamp.
    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }
}
