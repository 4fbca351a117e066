#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Automated movement sources that play Gridmaus without a human.
//!
//! Agents only ever see the velocity reported for their previous movement.
//! [`Seeker`] uses it to settle one axis at a time; [`Wanderer`] ignores it
//! and walks randomly.

use gridmaus_core::{
    ContractViolation,
    Directive::{self, Decrease, Increase},
    Movement, Velocity,
};
use gridmaus_system_session::{MovementSource, SourceError};
use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Agent that settles the goal coordinate axis by axis using velocity alone.
///
/// Each axis is probed upward first. Approaching feedback keeps the agent
/// walking in that direction; receding feedback reverses it. Once a step
/// overshoots, it is undone and the next axis begins. Velocity of zero along a
/// single axis only happens against a wall, which marks the axis as settled.
#[derive(Clone, Debug)]
pub struct Seeker {
    dimensions: usize,
    axis: usize,
    phase: Phase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    ProbingUp,
    Retreating,
    ProbingDown,
    Advancing(Directive),
    Settling,
}

impl Seeker {
    /// Creates a seeker for a lattice with the provided dimensionality.
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            axis: 0,
            phase: Phase::Idle,
        }
    }

    /// Axis the seeker is currently working on.
    #[must_use]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// Chooses the next movement from the feedback of the previous one.
    ///
    /// Fails only for a seeker built for a lattice without axes.
    pub fn decide(&mut self, velocity: Velocity) -> Result<Movement, ContractViolation> {
        let directive = match self.phase {
            Phase::Idle => {
                self.phase = Phase::ProbingUp;
                Increase
            }
            Phase::ProbingUp => {
                if velocity.is_approaching() {
                    self.phase = Phase::Advancing(Increase);
                    Increase
                } else if velocity.is_receding() {
                    self.phase = Phase::Retreating;
                    Decrease
                } else {
                    self.phase = Phase::ProbingDown;
                    Decrease
                }
            }
            Phase::Retreating => {
                self.phase = Phase::ProbingDown;
                Decrease
            }
            Phase::ProbingDown => {
                if velocity.is_approaching() {
                    self.phase = Phase::Advancing(Decrease);
                    Decrease
                } else if velocity.is_receding() {
                    self.phase = Phase::Settling;
                    Increase
                } else {
                    self.begin_next_axis()
                }
            }
            Phase::Advancing(direction) => {
                if velocity.is_approaching() {
                    direction
                } else if velocity.is_receding() {
                    self.phase = Phase::Settling;
                    direction.reversed()
                } else {
                    self.begin_next_axis()
                }
            }
            Phase::Settling => self.begin_next_axis(),
        };

        trace!(
            "seeker axis {} phase {:?} after velocity {velocity}",
            self.axis,
            self.phase
        );
        Movement::along_axis(self.dimensions, self.axis, directive)
    }

    fn begin_next_axis(&mut self) -> Directive {
        self.axis = (self.axis + 1) % self.dimensions.max(1);
        self.phase = Phase::ProbingUp;
        Increase
    }
}

impl MovementSource for Seeker {
    fn next_movement(&mut self, velocity: Velocity) -> Result<Movement, SourceError> {
        Ok(self.decide(velocity)?)
    }
}

/// Agent that picks increase, decrease or hold uniformly on every axis.
#[derive(Clone, Debug)]
pub struct Wanderer {
    dimensions: usize,
    rng: ChaCha8Rng,
}

impl Wanderer {
    /// Creates a wanderer whose walk is fully determined by `seed`.
    #[must_use]
    pub fn new(dimensions: usize, seed: u64) -> Self {
        Self {
            dimensions,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn step(&mut self) -> Movement {
        (0..self.dimensions)
            .map(|_| Directive::ALL[self.rng.gen_range(0..Directive::ALL.len())])
            .collect()
    }
}

impl MovementSource for Wanderer {
    fn next_movement(&mut self, _velocity: Velocity) -> Result<Movement, SourceError> {
        Ok(self.step())
    }
}
