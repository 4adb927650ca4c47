//! Errors for cloth construction and configuration.
//!
//! The per-frame path never fails; only building a cloth, adding
//! constraints and validating parameters return [`ClothError`].

use thiserror::Error;

use crate::constraint::ConstraintKind;

/// Rejected preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClothError {
    #[error("cloth needs at least 1 row and 1 column, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("point spacing must be positive and finite")]
    InvalidSpacing,
    #[error("simulation bounds must be positive and finite")]
    InvalidBounds,
    #[error("time step must be positive and finite")]
    InvalidTimeStep,
    #[error("at least one solver iteration is required")]
    InvalidIterations,
    #[error("snap ratio must be greater than 1")]
    InvalidSnapRatio,
    #[error("{0:?} stiffness must be in [0, 1]")]
    InvalidStiffness(ConstraintKind),
    #[error("restitution must be in [0, 1]")]
    InvalidRestitution,
    #[error("velocity retention must be in [0, 1]")]
    InvalidVelocityRetention,
    #[error("obstacle radius must be positive and finite")]
    InvalidObstacleRadius,
    #[error("rest length must be positive and finite")]
    InvalidRestLength,
    #[error("point handle does not refer to a live point")]
    UnknownPoint,
    #[error("a constraint cannot connect a point to itself")]
    DegenerateConstraint,
}
