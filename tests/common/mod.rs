use std::collections::HashMap;

use tatter::{ClothSimulation, PointId};

/// Every live point's count matches the live constraints that reference it,
/// and every live constraint references two live points.
pub fn assert_attachment_counts(cloth: &ClothSimulation) {
    let mut expected: HashMap<PointId, u32> = HashMap::new();
    for c in cloth.constraints() {
        assert!(cloth.contains_point(c.a), "constraint endpoint a is not live");
        assert!(cloth.contains_point(c.b), "constraint endpoint b is not live");
        *expected.entry(c.a).or_default() += 1;
        *expected.entry(c.b).or_default() += 1;
    }
    for (id, point) in cloth.points() {
        let want = expected.get(&id).copied().unwrap_or(0);
        assert_eq!(
            point.attached_constraints, want,
            "point {:?} claims {} constraints, {} reference it",
            id, point.attached_constraints, want,
        );
    }
}
