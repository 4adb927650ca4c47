//! Tearable distance constraints between two cloth points.

use crate::config::Stiffness;
use crate::float::Float;
use crate::point::{Point, PointId};

/// What a constraint models in the cloth weave.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Direct horizontal or vertical neighbours.
    Structural,
    /// Skip-one links that resist folding. Hidden from rendering.
    Bend,
    /// Diagonal neighbours.
    Shear,
}

/// How strongly, and in which directions, a constraint is enforced.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RelaxPolicy<F: Float> {
    pub stiffness: F,
    /// Push apart points closer than rest length. Only bend links do this,
    /// so the cloth can fold and crumple without fighting itself.
    pub correct_compression: bool,
}

impl ConstraintKind {
    pub fn policy<F: Float>(self, stiffness: &Stiffness<F>) -> RelaxPolicy<F> {
        match self {
            ConstraintKind::Structural => RelaxPolicy { stiffness: stiffness.structural, correct_compression: false },
            ConstraintKind::Bend => RelaxPolicy { stiffness: stiffness.bend, correct_compression: true },
            ConstraintKind::Shear => RelaxPolicy { stiffness: stiffness.shear, correct_compression: false },
        }
    }
}

/// Which branch a single [`Constraint::relax`] call took.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelaxOutcome {
    /// Not stretched and compression is ignored.
    Slack,
    /// Stretched to the snap ratio or beyond; now broken.
    Snapped,
    /// Endpoints coincide, no direction to correct along.
    Degenerate,
    /// Both endpoints pinned.
    Anchored,
    Corrected,
}

/// A distance constraint. Endpoints are handles, so they survive points
/// being swap-removed elsewhere in the cloth.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint<F: Float> {
    pub a: PointId,
    pub b: PointId,
    pub rest_length: F,
    pub kind: ConstraintKind,
    /// Rendering hint only.
    pub hidden: bool,
    /// Set on over-stretch or by a cut; the constraint is dropped on the
    /// next relaxation pass.
    pub broken: bool,
}

impl<F: Float> Constraint<F> {
    pub fn new(a: PointId, b: PointId, rest_length: F, kind: ConstraintKind) -> Self {
        Constraint {
            a,
            b,
            rest_length,
            kind,
            hidden: false,
            broken: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// One Gauss-Seidel relaxation step. `a` and `b` must be the points
    /// behind `self.a` and `self.b`; corrections land on them immediately.
    ///
    /// On the frame a constraint snaps no correction is applied.
    pub fn relax(
        &mut self,
        a: &mut Point<F>,
        b: &mut Point<F>,
        snap_ratio: F,
        policy: RelaxPolicy<F>,
    ) -> RelaxOutcome {
        let delta = b.position - a.position;
        let length = delta.length();

        if length <= self.rest_length && !policy.correct_compression {
            return RelaxOutcome::Slack;
        }
        if length / self.rest_length >= snap_ratio {
            self.broken = true;
            return RelaxOutcome::Snapped;
        }
        if length == F::zero() {
            return RelaxOutcome::Degenerate;
        }

        let relative_difference = (self.rest_length - length) / length;

        let weight_a = if a.pinned { F::zero() } else { F::one() };
        let weight_b = if b.pinned { F::zero() } else { F::one() };
        let weight_sum = weight_a + weight_b;
        if weight_sum == F::zero() {
            return RelaxOutcome::Anchored;
        }

        let share_a = relative_difference * (weight_a / weight_sum) * policy.stiffness;
        let share_b = relative_difference * (weight_b / weight_sum) * policy.stiffness;

        a.position = a.position - delta.scale(share_a);
        b.position = b.position + delta.scale(share_b);
        RelaxOutcome::Corrected
    }
}
