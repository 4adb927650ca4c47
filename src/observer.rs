//! Step observer trait for watching the solver work.

use crate::constraint::ConstraintKind;
use crate::point::PointId;

/// Hooks called from inside [`ClothSimulation::step`](crate::ClothSimulation::step).
///
/// Implement this to drive debug overlays, tear sound effects or profiling.
/// All methods default to no-ops.
pub trait StepObserver {
    /// Called after every point has been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each relax + collide pass.
    fn on_relax_pass(&mut self, _iteration: u32) {}

    /// Called when a broken constraint is removed from the cloth.
    fn on_constraint_broken(&mut self, _kind: ConstraintKind) {}

    /// Called when a point loses its last constraint and is removed.
    fn on_point_removed(&mut self, _id: PointId) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Running totals of what the solver did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub steps: u64,
    pub relax_passes: u64,
    pub structural_broken: u64,
    pub bend_broken: u64,
    pub shear_broken: u64,
    pub points_removed: u64,
}

impl StepStats {
    pub fn constraints_broken(&self) -> u64 {
        self.structural_broken + self.bend_broken + self.shear_broken
    }
}

impl StepObserver for StepStats {
    fn on_relax_pass(&mut self, _iteration: u32) {
        self.relax_passes += 1;
    }

    fn on_constraint_broken(&mut self, kind: ConstraintKind) {
        match kind {
            ConstraintKind::Structural => self.structural_broken += 1,
            ConstraintKind::Bend => self.bend_broken += 1,
            ConstraintKind::Shear => self.shear_broken += 1,
        }
    }

    fn on_point_removed(&mut self, _id: PointId) {
        self.points_removed += 1;
    }

    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}
