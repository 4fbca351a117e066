use gridmaus_core::{
    BoundaryPolicy, Command, Coordinate,
    Directive::{Decrease, Hold, Increase},
    Event, Lattice, Movement, Velocity,
};
use gridmaus_world::{self as world, query, Config, World};

fn planar_world(goal: Vec<i64>) -> World {
    let config = Config::new(
        Lattice::new(2, 5).expect("lattice"),
        BoundaryPolicy::Clamped,
    );
    World::with_goal(config, Coordinate::new(goal)).expect("world")
}

#[test]
fn apply_broadcasts_player_moved() {
    let mut world = planar_world(vec![4, 0]);
    let mut events = Vec::new();

    let outcome = world::apply(
        &mut world,
        Command::MovePlayer {
            movement: Movement::new(vec![Increase, Hold]),
        },
        &mut events,
    )
    .expect("apply");

    assert!(!outcome.reached_goal);
    assert_eq!(
        events,
        vec![Event::PlayerMoved {
            from: Coordinate::new(vec![2, 2]),
            to: Coordinate::new(vec![3, 2]),
            velocity: outcome.velocity,
        }]
    );
    assert!(outcome.velocity.is_approaching());
}

#[test]
fn apply_broadcasts_goal_reached_after_final_step() {
    let mut world = planar_world(vec![3, 1]);
    let mut events = Vec::new();

    let outcome = world::apply(
        &mut world,
        Command::MovePlayer {
            movement: Movement::new(vec![Increase, Decrease]),
        },
        &mut events,
    )
    .expect("apply");

    assert!(outcome.reached_goal);
    assert!(query::is_at_goal(&world));
    let expected_velocity = Velocity::new(2.0_f64.sqrt());
    assert_eq!(
        events,
        vec![
            Event::PlayerMoved {
                from: Coordinate::new(vec![2, 2]),
                to: Coordinate::new(vec![3, 1]),
                velocity: expected_velocity,
            },
            Event::GoalReached {
                at: Coordinate::new(vec![3, 1]),
            },
        ]
    );
}

#[test]
fn reached_goal_matches_player_position_throughout_a_walk() {
    let mut world = planar_world(vec![0, 4]);
    let script = [
        Movement::new(vec![Decrease, Hold]),
        Movement::new(vec![Decrease, Increase]),
        Movement::new(vec![Decrease, Increase]),
        Movement::new(vec![Hold, Hold]),
        Movement::new(vec![Increase, Hold]),
        Movement::new(vec![Decrease, Increase]),
    ];

    for movement in script {
        let mut events = Vec::new();
        let outcome = world::apply(
            &mut world,
            Command::MovePlayer { movement },
            &mut events,
        )
        .expect("apply");

        assert_eq!(outcome.reached_goal, query::is_at_goal(&world));
        assert!(query::lattice(&world).contains(query::player(&world)));
        assert_eq!(
            events
                .iter()
                .any(|event| matches!(event, Event::GoalReached { .. })),
            outcome.reached_goal
        );
    }

    assert_eq!(query::goal(&world), &Coordinate::new(vec![0, 4]));
}
