#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Gridmaus.

use gridmaus_core::{
    geometry, resolve, BoundaryPolicy, Command, ContractViolation, Coordinate, Event, Lattice,
    MoveOutcome, Movement,
};
use log::debug;
use rand::Rng;

/// Configuration parameters required to construct a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    lattice: Lattice,
    policy: BoundaryPolicy,
}

impl Config {
    /// Creates a configuration for the provided lattice and boundary policy.
    #[must_use]
    pub const fn new(lattice: Lattice, policy: BoundaryPolicy) -> Self {
        Self { lattice, policy }
    }

    /// Shape of the lattice the world will span.
    #[must_use]
    pub const fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// Policy applied when movements push against a wall.
    #[must_use]
    pub const fn policy(&self) -> BoundaryPolicy {
        self.policy
    }
}

/// Represents the authoritative Gridmaus world state.
///
/// The goal is fixed at construction; the player is the only mutable part and
/// changes exclusively through [`World::move_player`] or [`apply`].
#[derive(Debug)]
pub struct World {
    lattice: Lattice,
    policy: BoundaryPolicy,
    goal: Coordinate,
    player: Coordinate,
}

impl World {
    /// Creates a world whose goal is drawn uniformly per axis from `rng`.
    #[must_use]
    pub fn new<R>(config: Config, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let goal = generate_goal(&config.lattice(), rng);
        Self::from_parts(config, goal)
    }

    /// Creates a world around a caller-chosen goal.
    pub fn with_goal(config: Config, goal: Coordinate) -> Result<Self, ContractViolation> {
        let lattice = config.lattice();
        if goal.dimensions() != lattice.dimensions() {
            return Err(ContractViolation::CoordinateLength {
                expected: lattice.dimensions(),
                actual: goal.dimensions(),
            });
        }
        if !lattice.contains(&goal) {
            return Err(ContractViolation::GoalOutOfBounds { goal });
        }
        Ok(Self::from_parts(config, goal))
    }

    fn from_parts(config: Config, goal: Coordinate) -> Self {
        let lattice = config.lattice();
        Self {
            lattice,
            policy: config.policy(),
            player: lattice.center(),
            goal,
        }
    }

    /// Moves the player by one movement and reports the resulting feedback.
    ///
    /// A movement that leaves the player in place while it already stands on
    /// the goal reports the goal as reached without touching the state.
    pub fn move_player(&mut self, movement: &Movement) -> Result<MoveOutcome, ContractViolation> {
        let candidate = resolve(&self.lattice, self.policy, &self.player, movement)?;
        let velocity = geometry::velocity(&self.goal, &self.player, &candidate)?;

        if candidate == self.player && candidate == self.goal {
            return Ok(MoveOutcome {
                velocity,
                reached_goal: true,
            });
        }

        self.player = candidate;
        Ok(MoveOutcome {
            velocity,
            reached_goal: self.player == self.goal,
        })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Every accepted command broadcasts [`Event::PlayerMoved`]; reaching the goal
/// additionally broadcasts [`Event::GoalReached`]. Rejected commands leave the
/// world and `out_events` untouched.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<MoveOutcome, ContractViolation> {
    match command {
        Command::MovePlayer { movement } => {
            let from = world.player.clone();
            let outcome = world.move_player(&movement)?;
            debug!(
                "movement {movement} took player from {from} to {} (velocity {:.4})",
                world.player,
                outcome.velocity.get()
            );

            out_events.push(Event::PlayerMoved {
                from,
                to: world.player.clone(),
                velocity: outcome.velocity,
            });
            if outcome.reached_goal {
                out_events.push(Event::GoalReached {
                    at: world.goal.clone(),
                });
            }
            Ok(outcome)
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use gridmaus_core::{BoundaryPolicy, Coordinate, Lattice};

    /// Shape of the lattice spanned by the world.
    #[must_use]
    pub fn lattice(world: &World) -> Lattice {
        world.lattice
    }

    /// Boundary policy the world resolves movements with.
    #[must_use]
    pub fn policy(world: &World) -> BoundaryPolicy {
        world.policy
    }

    /// Hidden goal the player is searching for.
    #[must_use]
    pub fn goal(world: &World) -> &Coordinate {
        &world.goal
    }

    /// Coordinate currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> &Coordinate {
        &world.player
    }

    /// Reports whether the player currently stands on the goal.
    #[must_use]
    pub fn is_at_goal(world: &World) -> bool {
        world.player == world.goal
    }
}

fn generate_goal<R>(lattice: &Lattice, rng: &mut R) -> Coordinate
where
    R: Rng + ?Sized,
{
    let size = i64::from(lattice.size());
    (0..lattice.dimensions())
        .map(|_| rng.gen_range(0..size))
        .collect::<Vec<_>>()
        .into()
}
