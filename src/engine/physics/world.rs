// Sandbox world: the ordered body collection and its global controls

use glam::Vec2;
use log::debug;

use super::body::{Body, Bounds};

/// Gravity given to freshly spawned bodies
pub const DEFAULT_GRAVITY: f32 = 1.0;

/// Increment applied by the raise/lower gravity controls
pub const GRAVITY_STEP: f32 = 0.25;

/// Speed added to the closest body by a mouse nudge
pub const NUDGE_SPEED: f32 = 20.0;

/// Edge length of a spawned crate sprite, in pixels
pub const BODY_SIZE: f32 = 50.0;

/// Vertical offset of the spawn point from the canvas top
const SPAWN_HEIGHT: f32 = 50.0;

/// Container and orchestrator of all bodies.
///
/// Bodies are updated and drawn in insertion order; the collection is
/// append-only between resets and holds at least one body at all times.
pub struct World {
    bodies: Vec<Body>,
    bounds: Bounds,
    previous_gravity: f32,
}

impl World {
    /// Create a world with one default body at the spawn point.
    ///
    /// The gravity cache starts at zero so the first toggle switches
    /// gravity off rather than being a no-op.
    pub fn new(bounds: Bounds) -> Self {
        let mut world = Self {
            bodies: Vec::new(),
            bounds,
            previous_gravity: 0.0,
        };
        world.spawn_body();
        world
    }

    /// Append one body at the spawn point (horizontal center, fixed height)
    /// with the default gravity.
    pub fn spawn_body(&mut self) {
        let spawn = Vec2::new((self.bounds.width - BODY_SIZE) / 2.0, SPAWN_HEIGHT);
        self.bodies
            .push(Body::new(DEFAULT_GRAVITY, spawn, Vec2::splat(BODY_SIZE)));
        debug!("Spawned body #{}", self.bodies.len());
    }

    /// Discard every body and start over with a single default one.
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.spawn_body();
        debug!("World reset");
    }

    /// Advance the simulation one step: per body, integrate then resolve
    /// edge contacts.
    pub fn step(&mut self) {
        for body in &mut self.bodies {
            body.update();
            body.resolve_bounds(self.bounds);
        }
    }

    /// Index of the body closest to the cursor.
    ///
    /// Distance is the average of the absolute x and y offsets to the
    /// body's top-left corner, not the Euclidean distance. Ties go to the
    /// earliest-spawned body. `None` only for an empty collection, which
    /// construction rules out.
    pub fn closest_body(&self, cursor: Vec2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, body) in self.bodies.iter().enumerate() {
            let offset = cursor - body.position();
            let distance = (offset.x.abs() + offset.y.abs()) / 2.0;
            match best {
                Some((_, closest)) if distance >= closest => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| index)
    }

    /// Kick the closest body vertically, away from the cursor.
    pub fn nudge_vertical(&mut self, cursor: Vec2) {
        if let Some(index) = self.closest_body(cursor) {
            let body = &mut self.bodies[index];
            let direction = nudge_direction(cursor.y, body.position().y);
            body.velocity_add(Vec2::new(0.0, NUDGE_SPEED * direction));
        }
    }

    /// Kick the closest body horizontally, away from the cursor.
    pub fn nudge_horizontal(&mut self, cursor: Vec2) {
        if let Some(index) = self.closest_body(cursor) {
            let body = &mut self.bodies[index];
            let direction = nudge_direction(cursor.x, body.position().x);
            body.velocity_add(Vec2::new(NUDGE_SPEED * direction, 0.0));
        }
    }

    /// Raise every body's gravity by one step.
    pub fn raise_gravity(&mut self) {
        for body in &mut self.bodies {
            body.set_gravity(body.gravity() + GRAVITY_STEP);
        }
    }

    /// Lower every body's gravity by one step, never below the step itself.
    pub fn lower_gravity(&mut self) {
        for body in &mut self.bodies {
            body.set_gravity((body.gravity() - GRAVITY_STEP).max(GRAVITY_STEP));
        }
    }

    /// Swap every body's gravity with the cached previous value.
    ///
    /// Only the first body's gravity is cached, so the swap is a clean
    /// on/off toggle while all bodies agree on their gravity; divergent
    /// values collapse onto the first body's (matching the original toy).
    pub fn toggle_gravity(&mut self) {
        let Some(first) = self.bodies.first() else {
            return;
        };
        let cached = first.gravity();
        let restored = self.previous_gravity;
        for body in &mut self.bodies {
            body.set_gravity(restored);
        }
        self.previous_gravity = cached;
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Gravity of the first (oldest) body, shown in the status line.
    pub fn first_gravity(&self) -> f32 {
        self.bodies.first().map_or(0.0, Body::gravity)
    }
}

/// Direction pushing away from the cursor on one axis: positive when the
/// cursor sits at or before the body's coordinate, negative past it.
fn nudge_direction(cursor: f32, coordinate: f32) -> f32 {
    if cursor <= coordinate {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 1280.0,
        height: 1024.0,
    };

    const SPAWN_X: f32 = (1280.0 - BODY_SIZE) / 2.0;

    #[test]
    fn test_new_world_has_one_body_at_spawn() {
        let world = World::new(BOUNDS);
        assert_eq!(world.bounds(), BOUNDS);
        assert_eq!(world.bodies().len(), 1);

        let body = &world.bodies()[0];
        assert_eq!(body.position(), Vec2::new(SPAWN_X, 50.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.gravity(), DEFAULT_GRAVITY);
    }

    #[test]
    fn test_spawn_appends_in_order() {
        let mut world = World::new(BOUNDS);
        world.spawn_body();
        world.spawn_body();
        assert_eq!(world.bodies().len(), 3);
    }

    #[test]
    fn test_reset_discards_extra_bodies() {
        let mut world = World::new(BOUNDS);
        for _ in 0..4 {
            world.spawn_body();
        }
        for _ in 0..30 {
            world.step();
        }
        assert_eq!(world.bodies().len(), 5);

        world.reset();

        assert_eq!(world.bodies().len(), 1);
        let body = &world.bodies()[0];
        assert_eq!(body.position(), Vec2::new(SPAWN_X, 50.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_step_moves_falling_body() {
        let mut world = World::new(BOUNDS);
        let before = world.bodies()[0].position();

        world.step();
        // First step integrates zero velocity, second one falls
        assert_eq!(world.bodies()[0].position(), before);

        world.step();
        assert_eq!(
            world.bodies()[0].position(),
            before + Vec2::new(0.0, DEFAULT_GRAVITY)
        );
    }

    #[test]
    fn test_closest_body_tracks_separated_bodies() {
        let mut world = World::new(BOUNDS);
        world.spawn_body();
        world.toggle_gravity(); // freeze vertical motion for determinism

        // Tie-break picks body 0, cursor right of it kicks it leftward
        world.nudge_horizontal(Vec2::new(SPAWN_X + 1.0, 50.0));
        for _ in 0..5 {
            world.step();
        }
        assert_eq!(world.bodies()[0].position().x, SPAWN_X - 100.0);
        assert_eq!(world.bodies()[1].position().x, SPAWN_X);

        assert_eq!(world.closest_body(Vec2::new(SPAWN_X - 90.0, 50.0)), Some(0));
        assert_eq!(world.closest_body(Vec2::new(SPAWN_X + 10.0, 50.0)), Some(1));
    }

    #[test]
    fn test_closest_body_tie_goes_to_first() {
        let mut world = World::new(BOUNDS);
        world.spawn_body();
        // Both bodies sit exactly on the spawn point, so every cursor
        // position is a tie; the first index must win
        assert_eq!(world.closest_body(Vec2::new(10.0, 700.0)), Some(0));
        assert_eq!(world.closest_body(Vec2::ZERO), Some(0));
    }

    #[test]
    fn test_vertical_nudge_pushes_away_from_cursor() {
        let mut world = World::new(BOUNDS);
        let body_y = world.bodies()[0].position().y;

        // Cursor above the body pushes it down
        world.nudge_vertical(Vec2::new(SPAWN_X, body_y - 10.0));
        assert_eq!(world.bodies()[0].velocity().y, NUDGE_SPEED);

        // Cursor below the body pushes it up
        world.nudge_vertical(Vec2::new(SPAWN_X, body_y + 10.0));
        assert_eq!(world.bodies()[0].velocity().y, 0.0);
        world.nudge_vertical(Vec2::new(SPAWN_X, body_y + 10.0));
        assert_eq!(world.bodies()[0].velocity().y, -NUDGE_SPEED);
    }

    #[test]
    fn test_horizontal_nudge_only_hits_closest_body() {
        let mut world = World::new(BOUNDS);
        world.spawn_body();

        // Cursor right of both bodies pushes the closest (first) one left
        world.nudge_horizontal(Vec2::new(SPAWN_X + 200.0, 50.0));
        assert_eq!(world.bodies()[0].velocity().x, -NUDGE_SPEED);
        assert_eq!(world.bodies()[1].velocity().x, 0.0);
    }

    #[test]
    fn test_raise_gravity_hits_every_body() {
        let mut world = World::new(BOUNDS);
        world.spawn_body();

        world.raise_gravity();

        for body in world.bodies() {
            assert_eq!(body.gravity(), DEFAULT_GRAVITY + GRAVITY_STEP);
        }
    }

    #[test]
    fn test_lower_gravity_floors_at_step() {
        let mut world = World::new(BOUNDS);
        for _ in 0..10 {
            world.lower_gravity();
        }
        assert_eq!(world.first_gravity(), GRAVITY_STEP);
    }

    #[test]
    fn test_gravity_never_negative_via_controls() {
        let mut world = World::new(BOUNDS);
        for _ in 0..20 {
            world.lower_gravity();
            assert!(world.first_gravity() >= 0.0);
        }
        world.toggle_gravity();
        assert!(world.first_gravity() >= 0.0);
    }

    #[test]
    fn test_toggle_gravity_on_off() {
        let mut world = World::new(BOUNDS);
        world.spawn_body();

        world.toggle_gravity();
        for body in world.bodies() {
            assert_eq!(body.gravity(), 0.0);
        }

        world.toggle_gravity();
        for body in world.bodies() {
            assert_eq!(body.gravity(), DEFAULT_GRAVITY);
        }
    }

    #[test]
    fn test_toggle_with_divergent_gravity_collapses_to_first() {
        let mut world = World::new(BOUNDS);
        world.raise_gravity(); // first body now 1.25
        world.spawn_body(); // second body spawns at 1.0

        world.toggle_gravity(); // caches 1.25, restores 0.0
        assert_eq!(world.first_gravity(), 0.0);

        world.toggle_gravity(); // restores 1.25 onto every body
        for body in world.bodies() {
            assert_eq!(body.gravity(), 1.25);
        }
    }

    #[test]
    fn test_nudge_direction_prefers_positive_on_exact_hit() {
        assert_eq!(nudge_direction(10.0, 10.0), 1.0);
        assert_eq!(nudge_direction(5.0, 10.0), 1.0);
        assert_eq!(nudge_direction(15.0, 10.0), -1.0);
    }
}
