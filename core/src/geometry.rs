//! Pure lattice arithmetic: distances, velocity feedback and wall clamping.

use crate::{ContractViolation, Coordinate, Lattice, Velocity};

/// Computes the Euclidean distance between two coordinates.
///
/// Both coordinates must span the same number of axes; `b` is reported
/// against the dimensionality of `a` otherwise. A single axis reduces to the
/// absolute difference without any special casing.
pub fn distance(a: &Coordinate, b: &Coordinate) -> Result<f64, ContractViolation> {
    if a.dimensions() != b.dimensions() {
        return Err(ContractViolation::CoordinateLength {
            expected: a.dimensions(),
            actual: b.dimensions(),
        });
    }

    let squared = a
        .axes()
        .iter()
        .zip(b.axes())
        .map(|(lhs, rhs)| {
            let delta = lhs.abs_diff(*rhs) as f64;
            delta * delta
        })
        .sum::<f64>();
    Ok(squared.sqrt())
}

/// Distance gained toward `goal` by moving from `from` to `to`.
pub fn velocity(
    goal: &Coordinate,
    from: &Coordinate,
    to: &Coordinate,
) -> Result<Velocity, ContractViolation> {
    Ok(Velocity::new(distance(goal, from)? - distance(goal, to)?))
}

/// Snaps a single axis value into `[0, size - 1]`.
#[must_use]
pub fn clamp(value: i64, lattice: &Lattice) -> i64 {
    value.clamp(0, lattice.upper_bound())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{collection::vec, prelude::*};

    fn coord(axes: &[i64]) -> Coordinate {
        Coordinate::new(axes.to_vec())
    }

    fn dist(a: &[i64], b: &[i64]) -> f64 {
        distance(&coord(a), &coord(b)).expect("equal dimensionality")
    }

    fn same_shape_points(count: usize) -> impl Strategy<Value = Vec<Coordinate>> {
        (1usize..7).prop_flat_map(move |dimensions| {
            vec(
                vec(-1_000i64..1_000, dimensions).prop_map(Coordinate::new),
                count,
            )
        })
    }

    #[test]
    fn single_axis_distance_is_absolute_difference() {
        assert_eq!(dist(&[2], &[7]), 5.0);
        assert_eq!(dist(&[7], &[2]), 5.0);
        assert_eq!(dist(&[-3], &[3]), 6.0);
    }

    #[test]
    fn planar_distance_matches_pythagoras() {
        assert_eq!(dist(&[0, 0], &[3, 4]), 5.0);
        assert_eq!(dist(&[1, 2, 2], &[1, 2, 2]), 0.0);
    }

    #[test]
    fn distance_rejects_mismatched_dimensionality() {
        assert_eq!(
            distance(&coord(&[5, 9]), &coord(&[5])),
            Err(ContractViolation::CoordinateLength {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn velocity_rejects_mismatched_dimensionality() {
        let goal = coord(&[4, 0]);
        assert_eq!(
            velocity(&goal, &coord(&[1, 0, 0]), &coord(&[2, 0])),
            Err(ContractViolation::CoordinateLength {
                expected: 2,
                actual: 3
            })
        );
        assert!(velocity(&goal, &coord(&[1, 0]), &coord(&[2])).is_err());
    }

    #[test]
    fn velocity_sign_tracks_distance_change() {
        let goal = coord(&[4, 0]);
        let feedback = |from: &[i64], to: &[i64]| {
            velocity(&goal, &coord(from), &coord(to)).expect("velocity")
        };

        let closer = feedback(&[1, 0], &[2, 0]);
        assert!(closer.is_approaching());
        assert_eq!(closer.get(), 1.0);

        assert!(feedback(&[2, 0], &[1, 0]).is_receding());
        assert_eq!(feedback(&[4, 1], &[4, -1]).get(), 0.0);
        assert_eq!(feedback(&[1, 1], &[1, 1]).get(), 0.0);
    }

    #[test]
    fn clamp_snaps_to_walls() {
        let lattice = Lattice::new(1, 5).expect("lattice");
        assert_eq!(clamp(-1, &lattice), 0);
        assert_eq!(clamp(0, &lattice), 0);
        assert_eq!(clamp(3, &lattice), 3);
        assert_eq!(clamp(5, &lattice), 4);

        let single = Lattice::new(1, 1).expect("lattice");
        assert_eq!(clamp(1, &single), 0);
        assert_eq!(clamp(-1, &single), 0);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(points in same_shape_points(2)) {
            let (a, b) = (&points[0], &points[1]);
            prop_assert_eq!(distance(a, b), distance(b, a));
        }

        #[test]
        fn distance_to_self_is_zero(points in same_shape_points(1)) {
            prop_assert_eq!(distance(&points[0], &points[0]), Ok(0.0));
        }

        #[test]
        fn velocity_sign_matches_distance_change(points in same_shape_points(3)) {
            let (goal, from, to) = (&points[0], &points[1], &points[2]);
            let before = distance(from, goal).expect("distance");
            let after = distance(to, goal).expect("distance");
            let feedback = velocity(goal, from, to).expect("velocity");

            prop_assert_eq!(feedback.get(), before - after);
            prop_assert_eq!(feedback.is_approaching(), after < before);
            prop_assert_eq!(feedback.is_receding(), after > before);
        }

        #[test]
        fn clamp_always_lands_inside(value in any::<i64>(), size in 1u32..64) {
            let lattice = Lattice::new(1, size).expect("lattice");
            let clamped = clamp(value, &lattice);
            prop_assert!((0..i64::from(size)).contains(&clamped));
        }
    }
}
