//! Cloth points: Verlet particles with implicit velocity.

use crate::float::Float;
use crate::vec::Vec2;

slotmap::new_key_type! {
    /// Stable handle to a point in a [`ClothSimulation`](crate::ClothSimulation).
    ///
    /// Stays valid while other points are swap-removed around it; becomes
    /// stale (and is rejected) once its own point is removed.
    pub struct PointId;
}

/// A simulated cloth particle.
///
/// Velocity is never stored: it is `position - previous_position`.
#[derive(Clone, Debug, PartialEq)]
pub struct Point<F: Float> {
    pub position: Vec2<F>,
    pub previous_position: Vec2<F>,
    /// Pinned points are never moved by integration, collisions or constraints.
    pub pinned: bool,
    /// Number of live constraints that reference this point.
    pub attached_constraints: u32,
}

impl<F: Float> Point<F> {
    /// A free point at rest.
    pub fn new(position: Vec2<F>) -> Self {
        Point {
            position,
            previous_position: position,
            pinned: false,
            attached_constraints: 0,
        }
    }

    /// A point that never moves.
    pub fn pinned(position: Vec2<F>) -> Self {
        Point { pinned: true, ..Point::new(position) }
    }

    /// Displacement over the last step.
    pub fn velocity(&self) -> Vec2<F> {
        self.position - self.previous_position
    }

    /// Verlet step. Damping and gravity are applied once per frame.
    pub fn integrate(&mut self, gravity: Vec2<F>, dt: F, velocity_retention: F) {
        if self.pinned {
            return;
        }
        let velocity = self.velocity().scale(velocity_retention);
        self.previous_position = self.position;
        self.position = self.position + velocity + gravity.scale(dt * dt);
    }

    /// Clamp into the box `[min, max]`, reflecting the offending velocity
    /// component scaled by `restitution`. Axes are handled independently.
    pub fn resolve_boundary(&mut self, min: Vec2<F>, max: Vec2<F>, restitution: F) {
        if self.pinned {
            return;
        }
        let velocity = self.velocity();

        if self.position.x < min.x {
            self.position.x = min.x;
            self.previous_position.x = self.position.x + velocity.x * restitution;
        }
        if self.position.x > max.x {
            self.position.x = max.x;
            self.previous_position.x = self.position.x + velocity.x * restitution;
        }
        if self.position.y < min.y {
            self.position.y = min.y;
            self.previous_position.y = self.position.y + velocity.y * restitution;
        }
        if self.position.y > max.y {
            self.position.y = max.y;
            self.previous_position.y = self.position.y + velocity.y * restitution;
        }
    }
}
