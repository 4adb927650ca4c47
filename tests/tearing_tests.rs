mod common;

use tatter::{
    ClothLayout, ClothSimulation, Constraint, ConstraintKind, NoOpStepObserver, Point, PointId,
    RelaxOutcome, RelaxPolicy, SimulationConfig, StepStats, Vec2,
};

fn structural() -> RelaxPolicy<f64> {
    RelaxPolicy { stiffness: 1.0, correct_compression: false }
}

#[test]
fn snaps_at_exact_ratio_without_moving() {
    let mut c = Constraint::new(PointId::default(), PointId::default(), 10.0, ConstraintKind::Structural);
    let mut a = Point::new(Vec2::new(0.0, 0.0));
    let mut b = Point::new(Vec2::new(40.0, 0.0));

    assert_eq!(c.relax(&mut a, &mut b, 4.0, structural()), RelaxOutcome::Snapped);
    assert!(c.broken);
    assert_eq!(a.position, Vec2::new(0.0, 0.0));
    assert_eq!(b.position, Vec2::new(40.0, 0.0));
}

#[test]
fn just_below_ratio_is_corrected() {
    let mut c = Constraint::new(PointId::default(), PointId::default(), 10.0, ConstraintKind::Structural);
    let mut a = Point::new(Vec2::new(0.0, 0.0));
    let mut b = Point::new(Vec2::new(39.0, 0.0));

    assert_eq!(c.relax(&mut a, &mut b, 4.0, structural()), RelaxOutcome::Corrected);
    assert!(!c.broken);
    assert!((a.position.distance(b.position) - 10.0).abs() < 1e-9);
}

#[test]
fn compressed_structural_link_is_left_alone() {
    let mut c = Constraint::new(PointId::default(), PointId::default(), 10.0, ConstraintKind::Structural);
    let mut a = Point::new(Vec2::new(0.0, 0.0));
    let mut b = Point::new(Vec2::new(3.0, 4.0));

    assert_eq!(c.relax(&mut a, &mut b, 4.0, structural()), RelaxOutcome::Slack);
    assert_eq!(a.position, Vec2::new(0.0, 0.0));
    assert_eq!(b.position, Vec2::new(3.0, 4.0));
}

#[test]
fn overstretched_pair_tears_and_both_points_drop_out() {
    let mut cloth = ClothSimulation::new(1000.0, 1000.0).unwrap();
    let a = cloth.add_point(Vec2::new(100.0, 100.0), false);
    let b = cloth.add_point(Vec2::new(140.0, 100.0), false);
    cloth.add_constraint(a, b, ConstraintKind::Structural, 10.0, false).unwrap();

    let config = SimulationConfig::new().with_snap_ratio(4.0);
    let mut stats = StepStats::default();
    cloth.relax_constraints(&config, &mut stats);

    assert_eq!(cloth.constraint_count(), 0);
    assert_eq!(cloth.point_count(), 0);
    assert_eq!(stats.structural_broken, 1);
    assert_eq!(stats.points_removed, 2);
    assert!(cloth.point(a).is_none() && cloth.point(b).is_none());
}

#[test]
fn cut_removes_only_orphaned_endpoint() {
    let mut cloth = ClothSimulation::new(1000.0, 1000.0).unwrap();
    let a = cloth.add_point(Vec2::new(0.0, 0.0), true);
    let b = cloth.add_point(Vec2::new(10.0, 0.0), false);
    let c = cloth.add_point(Vec2::new(20.0, 0.0), false);
    let ab = cloth.add_constraint(a, b, ConstraintKind::Structural, 10.0, false).unwrap();
    cloth.add_constraint(b, c, ConstraintKind::Structural, 10.0, false).unwrap();

    assert!(cloth.break_constraint(ab));
    assert!(!cloth.break_constraint(ab), "second cut of the same link is a no-op");
    assert!(!cloth.break_constraint(99));

    cloth.relax_constraints(&SimulationConfig::new(), &mut NoOpStepObserver);

    assert!(!cloth.contains_point(a));
    assert!(cloth.contains_point(b));
    assert!(cloth.contains_point(c));
    assert_eq!(cloth.point(b).unwrap().attached_constraints, 1);
    common::assert_attachment_counts(&cloth);
}

#[test]
fn removing_both_endpoints_survives_relocation() {
    // `keep` sits first, the broken pair last: removing `a` moves `b` into
    // its slot, and `b` must still be found and removed by handle.
    let mut cloth = ClothSimulation::new(1000.0, 1000.0).unwrap();
    let keep = cloth.add_point(Vec2::new(5.0, 5.0), false);
    let a = cloth.add_point(Vec2::new(50.0, 50.0), false);
    let b = cloth.add_point(Vec2::new(60.0, 50.0), false);
    cloth.add_constraint(a, b, ConstraintKind::Shear, 10.0, false).unwrap();
    cloth.break_constraint(0);

    cloth.relax_constraints(&SimulationConfig::new(), &mut NoOpStepObserver);

    assert_eq!(cloth.point_count(), 1);
    assert_eq!(cloth.point(keep).map(|p| p.position), Some(Vec2::new(5.0, 5.0)));
    assert!(!cloth.contains_point(a) && !cloth.contains_point(b));
}

#[test]
fn cut_through_the_middle_splits_cloth() {
    let mut cloth = ClothSimulation::new(1000.0, 1000.0).unwrap();
    cloth.build(&ClothLayout::new(10, 10, 10.0).with_origin(Vec2::new(100.0, 100.0))).unwrap();
    let total = cloth.constraint_count();

    let mut marked = 0;
    for row in 0..=10 {
        marked += cloth.cut(Vec2::new(145.0, 100.0 + row as f64 * 10.0), 6.0);
    }
    assert!(marked > 0);
    assert_eq!(cloth.constraints().iter().filter(|c| c.broken).count(), marked);

    let mut stats = StepStats::default();
    cloth.step(&SimulationConfig::new(), &mut stats);

    assert_eq!(stats.constraints_broken() as usize, marked);
    assert_eq!(cloth.constraint_count(), total - marked);
    assert!(cloth.constraints().iter().all(|c| !c.broken));
    // Every link touching columns 4 and 5 passes within 5 units of a cut.
    assert_eq!(stats.points_removed, 20);
    assert!(cloth.points().all(|(_, p)| p.position.x < 138.0 || p.position.x > 152.0));
    common::assert_attachment_counts(&cloth);
}

#[test]
fn cut_far_away_touches_nothing() {
    let mut cloth = ClothSimulation::new(1000.0, 1000.0).unwrap();
    cloth.build(&ClothLayout::new(4, 4, 10.0).with_origin(Vec2::new(100.0, 100.0))).unwrap();
    assert_eq!(cloth.cut(Vec2::new(900.0, 900.0), 50.0), 0);
}

#[test]
fn shaking_a_cloth_apart_keeps_counts_consistent() {
    let mut cloth = ClothSimulation::new(600.0, 600.0).unwrap();
    cloth.build(&ClothLayout::new(8, 8, 10.0).with_origin(Vec2::new(200.0, 50.0))).unwrap();
    let config = SimulationConfig::new()
        .with_gravity(Vec2::new(0.0, 40000.0))
        .with_snap_ratio(1.5);

    let mut stats = StepStats::default();
    for _ in 0..30 {
        cloth.step(&config, &mut stats);
        common::assert_attachment_counts(&cloth);
        assert!(cloth.points().all(|(_, p)| p.attached_constraints > 0), "orphan survived a pass");
    }
    assert!(stats.constraints_broken() > 0, "heavy gravity with a low snap ratio should tear");
}
