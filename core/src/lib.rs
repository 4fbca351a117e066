#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridmaus navigation engine.
//!
//! This crate defines the lattice data model and the message surface that
//! connects adapters, the authoritative world, and movement sources. Adapters
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values describing what changed. The pure [`geometry`] and [`movement`]
//! modules hold the arithmetic the world relies on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod geometry;
pub mod movement;

pub use movement::{resolve, Directive, Movement, ParseDirectiveError};

/// Canonical banner emitted when a session boots.
pub const WELCOME_BANNER: &str = "Welcome to Gridmaus. Somewhere in the lattice, food awaits.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player advance by one movement across every axis.
    MovePlayer {
        /// Per-axis directives; must span exactly the lattice dimensionality.
        movement: Movement,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the player resolved a movement.
    ///
    /// `from` and `to` are equal when every axis was held or blocked by a wall.
    PlayerMoved {
        /// Coordinate the player occupied before the movement.
        from: Coordinate,
        /// Coordinate the player occupies after the movement.
        to: Coordinate,
        /// Feedback reported for the movement.
        velocity: Velocity,
    },
    /// Announces that the player stands on the goal.
    GoalReached {
        /// Coordinate shared by the player and the goal.
        at: Coordinate,
    },
}

/// Position within the lattice expressed as one signed integer per axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate(Vec<i64>);

impl Coordinate {
    /// Creates a coordinate from explicit per-axis values.
    #[must_use]
    pub fn new(axes: Vec<i64>) -> Self {
        Self(axes)
    }

    /// Creates a coordinate repeating `value` along `dimensions` axes.
    #[must_use]
    pub fn splat(value: i64, dimensions: usize) -> Self {
        Self(vec![value; dimensions])
    }

    /// Per-axis values in axis order.
    #[must_use]
    pub fn axes(&self) -> &[i64] {
        &self.0
    }

    /// Value along a single axis, if the axis exists.
    #[must_use]
    pub fn axis(&self, index: usize) -> Option<i64> {
        self.0.get(index).copied()
    }

    /// Number of axes spanned by the coordinate.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<i64>> for Coordinate {
    fn from(axes: Vec<i64>) -> Self {
        Self(axes)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

/// Shape of the playable lattice: how many axes and how many cells per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lattice {
    dimensions: usize,
    size: u32,
}

impl Lattice {
    /// Creates a lattice description, rejecting empty shapes.
    pub fn new(dimensions: usize, size: u32) -> Result<Self, ContractViolation> {
        if dimensions == 0 {
            return Err(ContractViolation::ZeroDimensions);
        }
        if size == 0 {
            return Err(ContractViolation::ZeroSize);
        }
        Ok(Self { dimensions, size })
    }

    /// Number of axes spanned by the lattice.
    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of cells along each axis.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Largest valid value along any axis.
    #[must_use]
    pub const fn upper_bound(&self) -> i64 {
        self.size as i64 - 1
    }

    /// Cell at `floor(size / 2)` on every axis, where the player starts.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::splat(i64::from(self.size / 2), self.dimensions)
    }

    /// Reports whether the coordinate has the right shape and lies inside the lattice.
    #[must_use]
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.dimensions() == self.dimensions
            && coordinate
                .axes()
                .iter()
                .all(|value| (0..=self.upper_bound()).contains(value))
    }
}

/// Policy applied when a movement would carry the player past a wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Values snap back into `[0, size - 1]`.
    #[default]
    Clamped,
    /// Values move freely; bounds are the caller's concern.
    Unbounded,
}

/// Scalar feedback describing how much closer the last movement got to the goal.
///
/// Positive values mean the player approached the goal, negative values mean
/// it receded, and zero means the distance did not change.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Velocity(f64);

impl Velocity {
    /// Feedback reported before the first movement.
    pub const ZERO: Self = Self(0.0);

    /// Wraps a raw distance delta.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw distance delta.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Reports whether the movement reduced the distance to the goal.
    #[must_use]
    pub fn is_approaching(&self) -> bool {
        self.0 > 0.0
    }

    /// Reports whether the movement increased the distance to the goal.
    #[must_use]
    pub fn is_receding(&self) -> bool {
        self.0 < 0.0
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Result of resolving a single player movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    /// Distance gained toward the goal by the movement.
    pub velocity: Velocity,
    /// Indicates whether the player now stands on the goal.
    pub reached_goal: bool,
}

/// Integration errors raised when callers break the engine's contracts.
///
/// These are never recoverable at runtime: they signal that a caller built an
/// invalid lattice or handed over data of the wrong shape.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// The lattice was configured without any axes.
    #[error("a lattice needs at least one dimension")]
    ZeroDimensions,
    /// The lattice was configured without any cells per axis.
    #[error("a lattice needs a size of at least one")]
    ZeroSize,
    /// A movement did not provide exactly one directive per axis.
    #[error("movement spans {actual} axes but the lattice has {expected}")]
    MovementLength {
        /// Dimensionality of the lattice.
        expected: usize,
        /// Number of directives supplied.
        actual: usize,
    },
    /// A coordinate did not provide exactly one value per axis.
    #[error("coordinate spans {actual} axes but {expected} were expected")]
    CoordinateLength {
        /// Dimensionality of the lattice or of the reference coordinate.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// A movement named an axis the lattice does not have.
    #[error("axis {axis} does not exist in a {dimensions}-dimensional lattice")]
    AxisOutOfRange {
        /// The requested axis.
        axis: usize,
        /// Dimensionality of the lattice.
        dimensions: usize,
    },
    /// Stepping along an axis left the range of representable coordinates.
    #[error("movement along axis {axis} overflows the coordinate range")]
    CoordinateOverflow {
        /// The axis that overflowed.
        axis: usize,
    },
    /// A goal was placed outside the playable lattice.
    #[error("goal {goal} lies outside the lattice")]
    GoalOutOfBounds {
        /// The rejected goal.
        goal: Coordinate,
    },
}

#[cfg(test)]
mod tests {
    use super::{BoundaryPolicy, ContractViolation, Coordinate, Lattice, Velocity};
    use crate::{Directive, Movement};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn lattice_rejects_empty_shapes() {
        assert_eq!(Lattice::new(0, 5), Err(ContractViolation::ZeroDimensions));
        assert_eq!(Lattice::new(3, 0), Err(ContractViolation::ZeroSize));
    }

    #[test]
    fn center_uses_floor_of_half_size() {
        let odd = Lattice::new(3, 5).expect("lattice");
        assert_eq!(odd.center(), Coordinate::new(vec![2, 2, 2]));

        let even = Lattice::new(2, 4).expect("lattice");
        assert_eq!(even.center(), Coordinate::new(vec![2, 2]));

        let single = Lattice::new(1, 1).expect("lattice");
        assert_eq!(single.center(), Coordinate::new(vec![0]));
    }

    #[test]
    fn contains_checks_shape_and_bounds() {
        let lattice = Lattice::new(2, 3).expect("lattice");
        assert!(lattice.contains(&Coordinate::new(vec![0, 2])));
        assert!(!lattice.contains(&Coordinate::new(vec![0, 3])));
        assert!(!lattice.contains(&Coordinate::new(vec![-1, 0])));
        assert!(!lattice.contains(&Coordinate::new(vec![1])));
    }

    #[test]
    fn coordinate_display_lists_axes() {
        assert_eq!(Coordinate::new(vec![2, -1, 7]).to_string(), "(2, -1, 7)");
        assert_eq!(Coordinate::new(vec![4]).to_string(), "(4)");
    }

    #[test]
    fn velocity_sign_helpers() {
        assert!(Velocity::new(0.5).is_approaching());
        assert!(Velocity::new(-0.5).is_receding());
        assert!(!Velocity::ZERO.is_approaching());
        assert!(!Velocity::ZERO.is_receding());
    }

    #[test]
    fn default_policy_is_clamped() {
        assert_eq!(BoundaryPolicy::default(), BoundaryPolicy::Clamped);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn movement_round_trips_through_bincode() {
        let movement = Movement::new(vec![Directive::Increase, Directive::Hold, Directive::Decrease]);
        assert_round_trip(&movement);
        assert_round_trip(&Coordinate::new(vec![3, -2]));
    }
}
