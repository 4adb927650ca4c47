//! Tearable cloth simulation with position-based Verlet dynamics.
//!
//! `tatter` weaves a rectangular grid of Verlet points held together by
//! structural, shear and bend distance constraints, then relaxes it with
//! Gauss-Seidel passes. Constraints snap when over-stretched and points
//! left with no constraints drop out of the cloth.
//!
//! # Features
//!
//! - **Verlet integration**: implicit velocity, per-frame damping and gravity
//! - **Tearing**: stretch-ratio breakage plus host-driven cuts
//! - **Collisions**: bounding box and a movable circular obstacle, with restitution
//! - **Stable handles**: points are swap-removed in O(1) without invalidating constraints
//! - **Observable**: monitor steps via the `StepObserver` trait or `tracing`
//! - **`no_std` compatible**: works in embedded and WASM environments
//!
//! ```
//! use tatter::{ClothLayout, ClothSimulation, NoOpStepObserver, SimulationConfig, Vec2};
//!
//! let mut cloth = ClothSimulation::new(800.0, 600.0)?;
//! cloth.build(&ClothLayout::new(10, 20, 8.0).with_origin(Vec2::new(100.0, 50.0)))?;
//!
//! let config = SimulationConfig::new();
//! cloth.step(&config, &mut NoOpStepObserver);
//! cloth.cut(Vec2::new(140.0, 90.0), 12.0);
//! cloth.step(&config, &mut NoOpStepObserver);
//! # Ok::<(), tatter::ClothError>(())
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod point;
pub mod constraint;
pub mod obstacle;
pub mod simulation;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use point::{Point, PointId};
pub use constraint::{Constraint, ConstraintKind, RelaxOutcome, RelaxPolicy};
pub use obstacle::CircleObstacle;
pub use simulation::ClothSimulation;
pub use config::{ClothLayout, SimulationConfig, Stiffness};
pub use observer::{NoOpStepObserver, StepObserver, StepStats};
pub use error::ClothError;
