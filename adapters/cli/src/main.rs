#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Gridmaus session.
//!
//! Without `--agent` the game is played by hand: the lattice shape is prompted
//! for when not given on the command line, every turn shows the current
//! coordinates and velocity, and a victory line is printed at the end.

mod prompt;
mod victory;

use std::{
    io::{self, BufRead, Write},
    num::{NonZeroU32, NonZeroUsize},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridmaus_core::{BoundaryPolicy, Event, Lattice, WELCOME_BANNER};
use gridmaus_system_agent::{Seeker, Wanderer};
use gridmaus_system_session::{Session, SessionState};
use gridmaus_world::{query, Config, World};
use log::info;
use prompt::{Console, HumanSource};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const AGENT_DIMENSIONS: usize = 3;
const AGENT_SIZE: u32 = 10;

#[derive(Debug, Parser)]
#[command(name = "gridmaus")]
#[command(version)]
#[command(about = "Find the hidden goal in an n-dimensional lattice using only velocity feedback")]
struct Cli {
    /// Number of lattice axes (prompted for when playing by hand)
    #[arg(long, short)]
    dimensions: Option<NonZeroUsize>,

    /// Cells along each axis (prompted for when playing by hand)
    #[arg(long, short)]
    size: Option<NonZeroU32>,

    /// What happens when a move pushes against a wall
    #[arg(long, value_enum, default_value_t = PolicyArg::Clamped)]
    policy: PolicyArg,

    /// Let an automated agent play instead of prompting for moves
    #[arg(long, value_enum)]
    agent: Option<AgentArg>,

    /// Seed for the goal and the wanderer agent; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// File with one victory food per line
    #[arg(long, default_value = "foods.txt")]
    foods: PathBuf,

    /// Log every move (overridden by RUST_LOG)
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Clamped,
    Unbounded,
}

impl From<PolicyArg> for BoundaryPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Clamped => BoundaryPolicy::Clamped,
            PolicyArg::Unbounded => BoundaryPolicy::Unbounded,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AgentArg {
    /// Settles one axis at a time from the velocity feedback
    Seeker,
    /// Picks a random direction on every axis
    Wanderer,
}

/// Entry point for the Gridmaus command-line interface.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("gridmaus: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let (dimensions, size) = match cli.agent {
        None => (
            resolve_dimensions(cli.dimensions, &mut console)?,
            resolve_size(cli.size, &mut console)?,
        ),
        Some(_) => (
            cli.dimensions.map_or(AGENT_DIMENSIONS, NonZeroUsize::get),
            cli.size.map_or(AGENT_SIZE, NonZeroU32::get),
        ),
    };

    let lattice = Lattice::new(dimensions, size).context("invalid lattice")?;
    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let world = World::new(Config::new(lattice, cli.policy.into()), &mut rng);
    let mut session = Session::new(world);
    let mut events = Vec::new();

    let report = match cli.agent {
        None => {
            console.say(WELCOME_BANNER)?;
            play_by_hand(&mut session, &mut console, &mut events)?;
            session.report()
        }
        Some(AgentArg::Seeker) => session
            .run(&mut Seeker::new(dimensions), &mut events)
            .context("automated play aborted")?,
        Some(AgentArg::Wanderer) => session
            .run(&mut Wanderer::new(dimensions, rng.gen()), &mut events)
            .context("automated play aborted")?,
    };
    info!(
        "goal {} reached; session produced {} events",
        report.goal,
        events.len()
    );

    if cli.agent.is_none() {
        let foods = victory::load_foods(&cli.foods);
        console.say(&victory::victory_line(&foods, &mut rng))?;
    }
    console.say(&format!("Number of moves: {}", report.moves))?;
    Ok(())
}

fn resolve_dimensions<R, W>(
    flag: Option<NonZeroUsize>,
    console: &mut Console<R, W>,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    if let Some(dimensions) = flag {
        return Ok(dimensions.get());
    }
    let answer = console
        .read_positive("Number of dimensions: ")
        .context("failed to read the number of dimensions")?;
    usize::try_from(answer.get()).context("dimension count does not fit this platform")
}

fn resolve_size<R, W>(flag: Option<NonZeroU32>, console: &mut Console<R, W>) -> Result<u32>
where
    R: BufRead,
    W: Write,
{
    if let Some(size) = flag {
        return Ok(size.get());
    }
    let answer = console
        .read_positive("Game size in each dimension: ")
        .context("failed to read the game size")?;
    Ok(answer.get())
}

fn play_by_hand<R, W>(
    session: &mut Session,
    console: &mut Console<R, W>,
    events: &mut Vec<Event>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let dimensions = query::lattice(session.world()).dimensions();
    while session.state() == SessionState::AwaitingMove {
        console.show_status(query::player(session.world()), session.velocity())?;
        let mut source = HumanSource::new(console, dimensions);
        let _ = session
            .step(&mut source, events)
            .context("manual play aborted")?;
    }
    Ok(())
}
