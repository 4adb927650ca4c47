//! Solver parameters and cloth layout.
//!
//! Neither struct is stored inside the simulation: the parameters are
//! handed to every [`ClothSimulation::step`](crate::ClothSimulation::step)
//! and the layout to [`ClothSimulation::build`](crate::ClothSimulation::build),
//! so a host can tweak them between frames.

use crate::constraint::ConstraintKind;
use crate::error::ClothError;
use crate::float::Float;
use crate::vec::Vec2;

/// Per-kind constraint stiffness, each in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stiffness<F: Float> {
    pub structural: F,
    pub bend: F,
    pub shear: F,
}

impl<F: Float> Default for Stiffness<F> {
    fn default() -> Self {
        Stiffness {
            structural: F::one(),
            bend: F::from_f64(0.3),
            shear: F::from_f64(0.8),
        }
    }
}

/// Parameters for one simulation frame.
///
/// # Builder Pattern
/// ```
/// use tatter::{SimulationConfig, Vec2};
///
/// let config: SimulationConfig<f64> = SimulationConfig::new()
///     .with_gravity(Vec2::new(0.0, 980.0))
///     .with_solver_iterations(12)
///     .with_snap_ratio(3.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig<F: Float> {
    /// Acceleration applied to every free point. Default: (0, 400), +y down.
    pub gravity: Vec2<F>,
    /// Frame time step in seconds. Default: 0.016.
    pub dt: F,
    /// Relax/collide passes per frame. Default: 8.
    pub solver_iterations: u32,
    /// Stretch ratio (`length / rest_length`) at which a constraint tears. Default: 4.
    pub snap_ratio: F,
    pub stiffness: Stiffness<F>,
    /// Fraction of normal velocity kept when bouncing off the bounds. Default: 0.9.
    pub restitution: F,
    /// Per-frame velocity damping, 1.0 = none. Default: 0.99.
    pub velocity_retention: F,
}

impl<F: Float> SimulationConfig<F> {
    pub fn new() -> Self {
        SimulationConfig {
            gravity: Vec2::new(F::zero(), F::from_f64(400.0)),
            dt: F::from_f64(0.016),
            solver_iterations: 8,
            snap_ratio: F::from_f64(4.0),
            stiffness: Stiffness::default(),
            restitution: F::from_f64(0.9),
            velocity_retention: F::from_f64(0.99),
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_dt(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_solver_iterations(mut self, iterations: u32) -> Self {
        self.solver_iterations = iterations;
        self
    }

    pub fn with_snap_ratio(mut self, snap_ratio: F) -> Self {
        self.snap_ratio = snap_ratio;
        self
    }

    pub fn with_stiffness(mut self, stiffness: Stiffness<F>) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_restitution(mut self, restitution: F) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_velocity_retention(mut self, velocity_retention: F) -> Self {
        self.velocity_retention = velocity_retention;
        self
    }

    /// Check every parameter against its documented range.
    pub fn validate(&self) -> Result<(), ClothError> {
        if !(self.dt.is_finite() && self.dt > F::zero()) {
            return Err(ClothError::InvalidTimeStep);
        }
        if self.solver_iterations == 0 {
            return Err(ClothError::InvalidIterations);
        }
        if !(self.snap_ratio.is_finite() && self.snap_ratio > F::one()) {
            return Err(ClothError::InvalidSnapRatio);
        }
        for (kind, value) in [
            (ConstraintKind::Structural, self.stiffness.structural),
            (ConstraintKind::Bend, self.stiffness.bend),
            (ConstraintKind::Shear, self.stiffness.shear),
        ] {
            if !value.is_unit() {
                return Err(ClothError::InvalidStiffness(kind));
            }
        }
        if !self.restitution.is_unit() {
            return Err(ClothError::InvalidRestitution);
        }
        if !self.velocity_retention.is_unit() {
            return Err(ClothError::InvalidVelocityRetention);
        }
        Ok(())
    }
}

impl<F: Float> Default for SimulationConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Grid topology for [`ClothSimulation::build`](crate::ClothSimulation::build).
#[derive(Clone, Debug, PartialEq)]
pub struct ClothLayout<F: Float> {
    pub rows: usize,
    pub columns: usize,
    /// Distance between neighbouring grid points.
    pub spacing: F,
    /// Position of the point at row 0, column 0.
    pub origin: Vec2<F>,
    pub pin_top_row: bool,
}

impl<F: Float> ClothLayout<F> {
    pub fn new(rows: usize, columns: usize, spacing: F) -> Self {
        ClothLayout {
            rows,
            columns,
            spacing,
            origin: Vec2::zero(),
            pin_top_row: true,
        }
    }

    pub fn with_origin(mut self, origin: Vec2<F>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_pinned_top_row(mut self, pin_top_row: bool) -> Self {
        self.pin_top_row = pin_top_row;
        self
    }

    /// `None` if `rows * columns` does not fit in a `usize`.
    pub fn point_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        if self.rows == 0 || self.columns == 0 || self.point_count().is_none() {
            return Err(ClothError::InvalidDimensions { rows: self.rows, columns: self.columns });
        }
        if !(self.spacing.is_finite() && self.spacing > F::zero()) {
            return Err(ClothError::InvalidSpacing);
        }
        if !self.origin.is_finite() {
            return Err(ClothError::InvalidBounds);
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothLayout<F> {
    fn default() -> Self {
        ClothLayout::new(30, 80, F::from_f64(8.0))
            .with_origin(Vec2::new(F::from_f64(100.0), F::from_f64(100.0)))
    }
}
