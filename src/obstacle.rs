//! Movable circular collider.

use crate::error::ClothError;
use crate::float::Float;
use crate::point::Point;
use crate::vec::Vec2;

/// A solid disc the cloth drapes over. The host may move it between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleObstacle<F: Float> {
    pub center: Vec2<F>,
    radius: F,
    restitution: F,
}

impl<F: Float> CircleObstacle<F> {
    pub fn new(center: Vec2<F>, radius: F, restitution: F) -> Result<Self, ClothError> {
        if !(radius.is_finite() && radius > F::zero()) {
            return Err(ClothError::InvalidObstacleRadius);
        }
        if !restitution.is_unit() {
            return Err(ClothError::InvalidRestitution);
        }
        Ok(CircleObstacle { center, radius, restitution })
    }

    pub fn radius(&self) -> F {
        self.radius
    }

    pub fn restitution(&self) -> F {
        self.restitution
    }

    pub fn move_to(&mut self, center: Vec2<F>) {
        self.center = center;
    }

    /// Strictly inside the disc.
    pub fn contains(&self, position: Vec2<F>) -> bool {
        (position - self.center).length_sq() < self.radius * self.radius
    }

    /// Push `point` out to the surface if it is inside. Tangential velocity
    /// is kept; normal velocity is reflected and scaled by restitution.
    ///
    /// Returns `true` if the point was moved.
    pub fn collide(&self, point: &mut Point<F>) -> bool {
        if point.pinned {
            return false;
        }
        let offset = point.position - self.center;
        let distance = offset.length();
        if distance >= self.radius || distance == F::zero() {
            return false;
        }

        let normal = offset.scale(F::one() / distance);
        point.position = self.center + normal.scale(self.radius);

        // Velocity is taken after the projection so it includes the jump.
        let velocity = point.velocity();
        let normal_speed = velocity.dot(normal);
        let velocity = velocity - normal.scale((F::one() + self.restitution) * normal_speed);
        point.previous_position = point.position - velocity;
        true
    }
}
