//! Movement resolution: maps per-axis directives onto coordinate deltas.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{geometry, BoundaryPolicy, ContractViolation, Coordinate, Lattice};

/// Single-axis movement instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Directive {
    /// Step toward larger values along the axis.
    Increase,
    /// Step toward smaller values along the axis.
    Decrease,
    /// Stay put along the axis.
    Hold,
}

impl Directive {
    /// Every directive in a stable order.
    pub const ALL: [Directive; 3] = [Directive::Increase, Directive::Decrease, Directive::Hold];

    /// Signed unit delta applied to the axis.
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Increase => 1,
            Self::Decrease => -1,
            Self::Hold => 0,
        }
    }

    /// Directive that undoes this one.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Increase => Self::Decrease,
            Self::Decrease => Self::Increase,
            Self::Hold => Self::Hold,
        }
    }

    /// Canonical input symbol for the directive.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Increase => "+",
            Self::Decrease => "-",
            Self::Hold => "0",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Raised when text at the input boundary does not name a directive.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognised movement symbol `{symbol}` (expected +, -, 1, -1, 0 or nothing)")]
pub struct ParseDirectiveError {
    symbol: String,
}

impl ParseDirectiveError {
    /// The rejected input, trimmed.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl FromStr for Directive {
    type Err = ParseDirectiveError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "+" | "1" => Ok(Self::Increase),
            "-" | "-1" => Ok(Self::Decrease),
            "" | "0" => Ok(Self::Hold),
            other => Err(ParseDirectiveError {
                symbol: other.to_owned(),
            }),
        }
    }
}

/// Ordered set of directives, one per lattice axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movement(Vec<Directive>);

impl Movement {
    /// Wraps explicit per-axis directives.
    #[must_use]
    pub fn new(directives: Vec<Directive>) -> Self {
        Self(directives)
    }

    /// Movement that holds every axis.
    #[must_use]
    pub fn hold(dimensions: usize) -> Self {
        Self(vec![Directive::Hold; dimensions])
    }

    /// Movement that applies `directive` to `axis` and holds every other axis.
    pub fn along_axis(
        dimensions: usize,
        axis: usize,
        directive: Directive,
    ) -> Result<Self, ContractViolation> {
        let mut directives = vec![Directive::Hold; dimensions];
        let slot = directives
            .get_mut(axis)
            .ok_or(ContractViolation::AxisOutOfRange { axis, dimensions })?;
        *slot = directive;
        Ok(Self(directives))
    }

    /// Directives in axis order.
    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        &self.0
    }

    /// Number of axes covered by the movement.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether the movement covers no axes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Directive>> for Movement {
    fn from(directives: Vec<Directive>) -> Self {
        Self(directives)
    }
}

impl FromIterator<Directive> for Movement {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, directive) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{directive}")?;
        }
        f.write_str(")")
    }
}

/// Resolves the coordinate reached by applying `movement` at `from`.
///
/// Stateless: the same inputs always yield the same coordinate. Under
/// [`BoundaryPolicy::Clamped`] every axis is snapped into the lattice, under
/// [`BoundaryPolicy::Unbounded`] the raw sum is returned, and a step past the
/// `i64` range is reported as [`ContractViolation::CoordinateOverflow`].
pub fn resolve(
    lattice: &Lattice,
    policy: BoundaryPolicy,
    from: &Coordinate,
    movement: &Movement,
) -> Result<Coordinate, ContractViolation> {
    let expected = lattice.dimensions();
    if movement.len() != expected {
        return Err(ContractViolation::MovementLength {
            expected,
            actual: movement.len(),
        });
    }
    if from.dimensions() != expected {
        return Err(ContractViolation::CoordinateLength {
            expected,
            actual: from.dimensions(),
        });
    }

    let axes = from
        .axes()
        .iter()
        .zip(movement.directives())
        .enumerate()
        .map(|(axis, (value, directive))| {
            let moved = value
                .checked_add(directive.delta())
                .ok_or(ContractViolation::CoordinateOverflow { axis })?;
            Ok(match policy {
                BoundaryPolicy::Clamped => geometry::clamp(moved, lattice),
                BoundaryPolicy::Unbounded => moved,
            })
        })
        .collect::<Result<Vec<_>, ContractViolation>>()?;

    Ok(Coordinate::new(axes))
}
