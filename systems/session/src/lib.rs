#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session driver that runs a single play-through from world construction
//! until the player stands on the goal.
//!
//! The driver knows nothing about where movements come from. Humans, scripted
//! replays and automated agents all plug in through [`MovementSource`], and
//! receive the latest [`Velocity`] as their only feedback.

use std::collections::VecDeque;

use gridmaus_core::{Command, ContractViolation, Coordinate, Event, Movement, Velocity};
use gridmaus_world::{self as world, query, World};
use log::{debug, info};
use thiserror::Error;

/// Capability that supplies the next movement given the latest feedback.
pub trait MovementSource {
    /// Produces the next movement, one directive per lattice axis.
    ///
    /// `velocity` is the feedback from the previous movement, or
    /// [`Velocity::ZERO`] before the first one.
    fn next_movement(&mut self, velocity: Velocity) -> Result<Movement, SourceError>;
}

impl<F> MovementSource for F
where
    F: FnMut(Velocity) -> Movement,
{
    fn next_movement(&mut self, velocity: Velocity) -> Result<Movement, SourceError> {
        Ok(self(velocity))
    }
}

/// Failures raised by a movement source instead of a movement.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source has no further movements to offer.
    #[error("movement source has no further movements")]
    Exhausted,
    /// Reading interactive input failed.
    #[error("failed to read movement input")]
    Io(#[from] std::io::Error),
    /// The source could not shape a movement for the lattice.
    #[error("movement source produced an invalid movement")]
    Contract(#[from] ContractViolation),
}

/// Errors that abort a session step.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The goal was already reached; the world accepts no further movements.
    #[error("session already finished after {moves} moves")]
    Finished {
        /// Moves counted when the session finished.
        moves: u64,
    },
    /// The movement source handed over data of the wrong shape.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
    /// The movement source could not produce a movement.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Observable states of the session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Waiting for the next movement from the source.
    AwaitingMove,
    /// The player stands on the goal. Terminal.
    Finished,
}

/// Summary handed back once the goal has been reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReport {
    /// Number of accepted movements.
    pub moves: u64,
    /// Goal the player reached.
    pub goal: Coordinate,
}

/// Drives one world from its first movement until the goal is reached.
#[derive(Debug)]
pub struct Session {
    world: World,
    velocity: Velocity,
    moves: u64,
    state: SessionState,
}

impl Session {
    /// Starts a session over a freshly constructed world.
    ///
    /// A world whose player already starts on the goal yields a session that
    /// is finished before any movement is requested.
    #[must_use]
    pub fn new(world: World) -> Self {
        let state = if query::is_at_goal(&world) {
            SessionState::Finished
        } else {
            SessionState::AwaitingMove
        };
        info!(
            "session started on a {}-dimensional lattice of size {} ({:?} boundaries)",
            query::lattice(&world).dimensions(),
            query::lattice(&world).size(),
            query::policy(&world)
        );
        Self {
            world,
            velocity: Velocity::ZERO,
            moves: 0,
            state,
        }
    }

    /// World driven by the session.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Feedback from the most recent movement.
    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Number of accepted movements so far.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Current state of the session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Requests one movement from `source` and applies it to the world.
    ///
    /// Movements rejected by the world are not counted.
    pub fn step<S>(
        &mut self,
        source: &mut S,
        out_events: &mut Vec<Event>,
    ) -> Result<SessionState, SessionError>
    where
        S: MovementSource + ?Sized,
    {
        if self.state == SessionState::Finished {
            return Err(SessionError::Finished { moves: self.moves });
        }

        let movement = source.next_movement(self.velocity)?;
        let outcome = world::apply(&mut self.world, Command::MovePlayer { movement }, out_events)?;

        self.moves = self.moves.saturating_add(1);
        self.velocity = outcome.velocity;
        debug!("move {} resolved with velocity {}", self.moves, self.velocity);

        if outcome.reached_goal {
            self.state = SessionState::Finished;
            info!("goal reached after {} moves", self.moves);
        }
        Ok(self.state)
    }

    /// Steps until the goal is reached and reports the final move count.
    ///
    /// No move limit is imposed: a source that never finds the goal keeps
    /// the session running.
    pub fn run<S>(
        mut self,
        source: &mut S,
        out_events: &mut Vec<Event>,
    ) -> Result<SessionReport, SessionError>
    where
        S: MovementSource + ?Sized,
    {
        while self.state == SessionState::AwaitingMove {
            let _ = self.step(source, out_events)?;
        }
        Ok(self.report())
    }

    /// Summarises the session so far: moves counted and the goal searched for.
    #[must_use]
    pub fn report(&self) -> SessionReport {
        SessionReport {
            moves: self.moves,
            goal: query::goal(&self.world).clone(),
        }
    }
}

/// Movement source that replays a fixed list of movements.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    movements: VecDeque<Movement>,
    observed: Vec<Velocity>,
}

impl Scripted {
    /// Creates a source that yields `movements` in order.
    #[must_use]
    pub fn new<I>(movements: I) -> Self
    where
        I: IntoIterator<Item = Movement>,
    {
        Self {
            movements: movements.into_iter().collect(),
            observed: Vec::new(),
        }
    }

    /// Velocities handed to the source so far, in request order.
    #[must_use]
    pub fn observed(&self) -> &[Velocity] {
        &self.observed
    }

    /// Number of movements not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.movements.len()
    }
}

impl MovementSource for Scripted {
    fn next_movement(&mut self, velocity: Velocity) -> Result<Movement, SourceError> {
        self.observed.push(velocity);
        self.movements.pop_front().ok_or(SourceError::Exhausted)
    }
}
