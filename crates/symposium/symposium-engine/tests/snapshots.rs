//! What the reporter sees while a run is in progress.

mod common;

use std::collections::HashSet;
use symposium_engine::Simulation;
use symposium_events::Status;

use common::fast_config;

#[test]
fn snapshots_never_show_a_shared_fork() {
    let seats = 5;
    let sim = Simulation::new(fast_config(seats, 20));
    let mut polls = 0;
    let mut seen = HashSet::new();

    sim.run_with(|snap| {
        polls += 1;
        for view in snap.seats() {
            seen.insert(view.status);

            let eating = view.status == Status::Eating;
            assert_eq!(view.holding_left, eating, "{view:?}");
            assert_eq!(view.holding_right, eating, "{view:?}");
            assert_eq!(snap.waiting(view).is_some(), view.status == Status::Hungry);
        }

        // Neighbours share a fork, so they can never both be eating.
        for i in 0..seats {
            let a = &snap.seats()[i];
            let b = &snap.seats()[(i + 1) % seats];
            assert!(
                !(a.status == Status::Eating && b.status == Status::Eating),
                "{} and {} both eating",
                a.seat,
                b.seat
            );
        }
    });

    assert!(polls > 0);
    assert!(seen.contains(&Status::Thinking));
}

#[test]
fn idle_table_yields_identical_snapshots() {
    let sim = Simulation::new(fast_config(4, 2));
    sim.run();

    let a = sim.table().snapshot();
    let b = sim.table().snapshot();
    assert_eq!(a.seats(), b.seats());
    assert!(a.min_meals() >= 2);
}
