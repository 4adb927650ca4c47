//! Property-based checks of the solver's global invariants.
//!
//! Run with: cargo test --test invariant_props

mod common;

use proptest::prelude::*;
use tatter::{
    CircleObstacle, ClothLayout, ClothSimulation, NoOpStepObserver, SimulationConfig, Stiffness,
    Vec2,
};

const WIDTH: f64 = 300.0;
const HEIGHT: f64 = 240.0;

/// A cut applied before a given frame: (frame, x, y, radius).
fn arb_cut() -> impl Strategy<Value = (usize, f64, f64, f64)> {
    (0..20usize, 0.0..WIDTH, 0.0..HEIGHT, 1.0..25.0f64)
}

fn arb_config() -> impl Strategy<Value = SimulationConfig<f64>> {
    (
        0.0..3000.0f64,
        1..12u32,
        1.2..6.0f64,
        (0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64),
        0.0..=1.0f64,
        0.8..=1.0f64,
    )
        .prop_map(|(gravity, iterations, snap, (structural, bend, shear), restitution, retention)| {
            SimulationConfig::new()
                .with_gravity(Vec2::new(0.0, gravity))
                .with_solver_iterations(iterations)
                .with_snap_ratio(snap)
                .with_stiffness(Stiffness { structural, bend, shear })
                .with_restitution(restitution)
                .with_velocity_retention(retention)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn invariants_hold_every_frame(
        config in arb_config(),
        cuts in prop::collection::vec(arb_cut(), 0..6),
        obstacle_x in 80.0..220.0f64,
    ) {
        let mut cloth = ClothSimulation::new(WIDTH, HEIGHT).unwrap();
        cloth.build(&ClothLayout::new(8, 10, 10.0).with_origin(Vec2::new(100.0, 20.0))).unwrap();
        cloth.set_obstacle(Some(CircleObstacle::new(Vec2::new(obstacle_x, 150.0), 30.0, 0.4).unwrap()));

        let pinned: Vec<_> = cloth
            .points()
            .filter(|(_, p)| p.pinned)
            .map(|(id, p)| (id, p.position))
            .collect();

        for frame in 0..20 {
            for &(_, x, y, radius) in cuts.iter().filter(|c| c.0 == frame) {
                cloth.cut(Vec2::new(x, y), radius);
            }
            cloth.step(&config, &mut NoOpStepObserver);

            common::assert_attachment_counts(&cloth);

            let obstacle = cloth.obstacle().unwrap().clone();
            for (_, p) in cloth.points() {
                prop_assert!(p.attached_constraints > 0, "orphaned point survived");
                prop_assert!(p.position.x >= 0.0 && p.position.x <= WIDTH);
                prop_assert!(p.position.y >= 0.0 && p.position.y <= HEIGHT);
                if !p.pinned {
                    prop_assert!(p.position.distance(obstacle.center) >= obstacle.radius() - 1e-9);
                }
            }
            for (id, position) in &pinned {
                if let Some(p) = cloth.point(*id) {
                    prop_assert_eq!(p.position, *position);
                }
            }
        }
    }
}
