//! Tearable cloth: grid topology, the per-frame pipeline and dynamic removal.

use alloc::vec::Vec as AllocVec;
use slotmap::DenseSlotMap;
use tracing::{debug, trace};

use crate::config::{ClothLayout, SimulationConfig};
use crate::constraint::{Constraint, ConstraintKind};
use crate::error::ClothError;
use crate::float::Float;
use crate::obstacle::CircleObstacle;
use crate::observer::StepObserver;
use crate::point::{Point, PointId};
use crate::vec::Vec2;

/// A mass-spring cloth inside the box `[0, width] x [0, height]`.
///
/// Points live in a dense slot map: iteration is over a packed array and a
/// removed point's slot is refilled by the last one, while constraint
/// endpoints keep pointing at the right point through their [`PointId`].
///
/// Between calls to [`step`](Self::step) a host may read everything, cut
/// constraints and move the obstacle. Nothing else is mutable from outside.
pub struct ClothSimulation<F: Float = f64> {
    points: DenseSlotMap<PointId, Point<F>>,
    constraints: AllocVec<Constraint<F>>,
    obstacle: Option<CircleObstacle<F>>,
    width: F,
    height: F,
}

impl<F: Float> ClothSimulation<F> {
    /// An empty simulation. Call [`build`](Self::build) to weave a cloth.
    pub fn new(width: F, height: F) -> Result<Self, ClothError> {
        let positive = |v: F| v.is_finite() && v > F::zero();
        if !(positive(width) && positive(height)) {
            return Err(ClothError::InvalidBounds);
        }
        Ok(ClothSimulation {
            points: DenseSlotMap::with_key(),
            constraints: AllocVec::new(),
            obstacle: None,
            width,
            height,
        })
    }

    /// Replace the current cloth with a `rows x columns` grid.
    ///
    /// Every grid point gets, where the neighbour exists:
    /// - Structural links to its left and top neighbours (rest = spacing)
    /// - Hidden bend links two rows up and two columns left (rest = 2 * spacing)
    /// - Shear links to its top-left and top-right diagonals (rest = sqrt(2) * spacing)
    ///
    /// Each link's `a` endpoint is the newer point. The obstacle is kept.
    pub fn build(&mut self, layout: &ClothLayout<F>) -> Result<(), ClothError> {
        layout.validate()?;
        let too_large = ClothError::InvalidDimensions { rows: layout.rows, columns: layout.columns };
        let count = layout.point_count().ok_or_else(|| too_large.clone())?;
        let mut ids = AllocVec::new();
        ids.try_reserve_exact(count).map_err(|_| too_large)?;

        self.points.clear();
        self.constraints.clear();

        let columns = layout.columns;
        let spacing = layout.spacing;
        let diagonal = F::two().sqrt() * spacing;
        let bend = spacing * F::two();

        for row in 0..layout.rows {
            for column in 0..columns {
                let position = Vec2::new(
                    F::from_f64(column as f64) * spacing + layout.origin.x,
                    F::from_f64(row as f64) * spacing + layout.origin.y,
                );
                let point = if layout.pin_top_row && row == 0 {
                    Point::pinned(position)
                } else {
                    Point::new(position)
                };
                let id = self.points.insert(point);
                ids.push(id);

                let neighbour = |r: usize, c: usize| ids[r * columns + c];
                let links = &mut self.constraints;

                if column > 0 {
                    links.push(Constraint::new(id, neighbour(row, column - 1), spacing, ConstraintKind::Structural));
                }
                if row > 0 {
                    links.push(Constraint::new(id, neighbour(row - 1, column), spacing, ConstraintKind::Structural));
                }
                if row >= 2 {
                    links.push(Constraint::new(id, neighbour(row - 2, column), bend, ConstraintKind::Bend).hidden());
                }
                if column >= 2 {
                    links.push(Constraint::new(id, neighbour(row, column - 2), bend, ConstraintKind::Bend).hidden());
                }
                if column > 0 && row > 0 {
                    links.push(Constraint::new(id, neighbour(row - 1, column - 1), diagonal, ConstraintKind::Shear));
                }
                if column + 1 < columns && row > 0 {
                    links.push(Constraint::new(id, neighbour(row - 1, column + 1), diagonal, ConstraintKind::Shear));
                }
            }
        }

        for constraint in &self.constraints {
            for id in [constraint.a, constraint.b] {
                if let Some(point) = self.points.get_mut(id) {
                    point.attached_constraints += 1;
                }
            }
        }

        debug!(
            rows = layout.rows,
            columns = layout.columns,
            points = self.points.len(),
            constraints = self.constraints.len(),
            "built cloth"
        );
        Ok(())
    }

    /// Add a loose point. It stays until a constraint attached to it breaks
    /// and leaves it with none.
    pub fn add_point(&mut self, position: Vec2<F>, pinned: bool) -> PointId {
        let point = if pinned { Point::pinned(position) } else { Point::new(position) };
        self.points.insert(point)
    }

    /// Connect two live points. Returns the constraint's current slot, which
    /// is only valid until the next relaxation pass removes something.
    pub fn add_constraint(
        &mut self,
        a: PointId,
        b: PointId,
        kind: ConstraintKind,
        rest_length: F,
        hidden: bool,
    ) -> Result<usize, ClothError> {
        if a == b {
            return Err(ClothError::DegenerateConstraint);
        }
        if !(rest_length.is_finite() && rest_length > F::zero()) {
            return Err(ClothError::InvalidRestLength);
        }
        let [point_a, point_b] = self
            .points
            .get_disjoint_mut([a, b])
            .ok_or(ClothError::UnknownPoint)?;
        point_a.attached_constraints += 1;
        point_b.attached_constraints += 1;

        let mut constraint = Constraint::new(a, b, rest_length, kind);
        constraint.hidden = hidden;
        self.constraints.push(constraint);
        Ok(self.constraints.len() - 1)
    }

    /// Advance one frame: integrate once, then alternate constraint
    /// relaxation and collision resolution `solver_iterations` times.
    pub fn step<O: StepObserver>(&mut self, config: &SimulationConfig<F>, observer: &mut O) {
        debug_assert!(config.validate().is_ok(), "invalid simulation config: {:?}", config.validate());

        self.integrate_all(config);
        observer.on_integrate();

        for i in 0..config.solver_iterations {
            self.relax_constraints(config, observer);
            self.resolve_collisions(config);
            observer.on_relax_pass(i);
        }

        observer.on_step_complete();
    }

    /// Verlet-integrate every free point once.
    pub fn integrate_all(&mut self, config: &SimulationConfig<F>) {
        for point in self.points.values_mut() {
            point.integrate(config.gravity, config.dt, config.velocity_retention);
        }
    }

    /// One Gauss-Seidel pass over every constraint, dropping the broken ones
    /// and any point left without constraints.
    ///
    /// Walks from the back so swap-removal only ever pulls in an
    /// already-visited constraint.
    pub fn relax_constraints<O: StepObserver>(&mut self, config: &SimulationConfig<F>, observer: &mut O) {
        let mut i = self.constraints.len();
        while i > 0 {
            i -= 1;

            let constraint = &mut self.constraints[i];
            let policy = constraint.kind.policy(&config.stiffness);
            if let Some([a, b]) = self.points.get_disjoint_mut([constraint.a, constraint.b]) {
                constraint.relax(a, b, config.snap_ratio, policy);
            }
            if !constraint.broken {
                continue;
            }

            let (a, b, kind) = (constraint.a, constraint.b, constraint.kind);
            trace!(slot = i, ?kind, "constraint broken");
            self.detach(a, observer);
            self.detach(b, observer);
            self.constraints.swap_remove(i);
            observer.on_constraint_broken(kind);
        }
    }

    /// Keep every point inside the bounds and outside the obstacle.
    pub fn resolve_collisions(&mut self, config: &SimulationConfig<F>) {
        let min = Vec2::zero();
        let max = Vec2::new(self.width, self.height);
        for point in self.points.values_mut() {
            point.resolve_boundary(min, max, config.restitution);
            if let Some(obstacle) = &self.obstacle {
                obstacle.collide(point);
            }
        }
    }

    fn detach<O: StepObserver>(&mut self, id: PointId, observer: &mut O) {
        let Some(point) = self.points.get_mut(id) else {
            return;
        };
        point.attached_constraints = point.attached_constraints.saturating_sub(1);
        if point.attached_constraints == 0 {
            self.remove_point(id);
            observer.on_point_removed(id);
        }
    }

    /// O(1): the last point moves into the freed slot; its handle is unaffected.
    fn remove_point(&mut self, id: PointId) -> Option<Point<F>> {
        let removed = self.points.remove(id);
        if removed.is_some() {
            trace!(?id, remaining = self.points.len(), "point removed");
        }
        removed
    }

    /// Mark one constraint as cut. Returns `false` if the slot is empty or
    /// the constraint was already broken.
    pub fn break_constraint(&mut self, slot: usize) -> bool {
        match self.constraints.get_mut(slot) {
            Some(constraint) if !constraint.broken => {
                constraint.broken = true;
                true
            }
            _ => false,
        }
    }

    /// Cut every constraint passing strictly within `radius` of `center`.
    /// Returns how many were newly marked broken.
    pub fn cut(&mut self, center: Vec2<F>, radius: F) -> usize {
        let mut cut = 0;
        for constraint in self.constraints.iter_mut().filter(|c| !c.broken) {
            let (Some(a), Some(b)) = (self.points.get(constraint.a), self.points.get(constraint.b)) else {
                continue;
            };
            let closest = center.closest_on_segment(a.position, b.position);
            if center.distance(closest) < radius {
                constraint.broken = true;
                cut += 1;
            }
        }
        if cut > 0 {
            trace!(cut, "cut constraints");
        }
        cut
    }

    pub fn set_obstacle(&mut self, obstacle: Option<CircleObstacle<F>>) {
        debug!(present = obstacle.is_some(), "obstacle set");
        self.obstacle = obstacle;
    }

    pub fn obstacle(&self) -> Option<&CircleObstacle<F>> {
        self.obstacle.as_ref()
    }

    /// Returns `false` if there is no obstacle to move.
    pub fn move_obstacle(&mut self, center: Vec2<F>) -> bool {
        match &mut self.obstacle {
            Some(obstacle) => {
                obstacle.move_to(center);
                true
            }
            None => false,
        }
    }

    pub fn point(&self, id: PointId) -> Option<&Point<F>> {
        self.points.get(id)
    }

    pub fn contains_point(&self, id: PointId) -> bool {
        self.points.contains_key(id)
    }

    /// All live points in storage order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, &Point<F>)> + '_ {
        self.points.iter()
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.points.values().map(|p| p.position).collect()
    }

    pub fn constraints(&self) -> &[Constraint<F>] {
        &self.constraints
    }

    /// Constraints a renderer should draw.
    pub fn visible_constraints(&self) -> impl Iterator<Item = &Constraint<F>> + '_ {
        self.constraints.iter().filter(|c| !c.hidden)
    }

    /// Endpoint positions of a live constraint.
    pub fn segment(&self, constraint: &Constraint<F>) -> Option<(Vec2<F>, Vec2<F>)> {
        let a = self.points.get(constraint.a)?;
        let b = self.points.get(constraint.b)?;
        Some((a.position, b.position))
    }

    pub fn point_count(&self) -> usize { self.points.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
    pub fn width(&self) -> F { self.width }
    pub fn height(&self) -> F { self.height }
}
