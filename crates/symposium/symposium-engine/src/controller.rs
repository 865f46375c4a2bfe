//! Owns a run: builds the ring and the table, seats the philosophers, waits,
//! and tears everything down.
//!
//! Workers live in a `std::thread::scope`, so none of them can outlive
//! `run_with`. A drop guard clears the running signal on every exit path out
//! of the scope body, including an observer panic; otherwise the scope would
//! wait forever on workers that were never told to stop.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use symposium_config::SimulationConfig;
use symposium_events::{SeatId, StateSnapshot};
use symposium_sync::{ForkRing, RunningSignal, SeatTable};
use tracing::{debug, info};

use crate::journal::Journal;
use crate::pacing::Pacing;
use crate::philosopher::Philosopher;
use crate::summary::{RunSummary, SeatSummary};

pub struct Simulation {
    config: SimulationConfig,
    ring: ForkRing,
    table: SeatTable,
    running: RunningSignal,
    pacing: Pacing,
    journal: Option<Arc<Journal>>,
}

struct StopOnDrop<'a>(&'a RunningSignal);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.stop();
    }
}

impl Simulation {
    /// `config` has already been validated by its builder.
    pub fn new(config: SimulationConfig) -> Self {
        let seats = config.philosophers();
        Self {
            pacing: Pacing::from_config(&config),
            ring: ForkRing::new(seats),
            table: SeatTable::new(seats),
            running: RunningSignal::new(),
            journal: None,
            config,
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_journal(mut self, journal: Arc<Journal>) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn ring(&self) -> &ForkRing {
        &self.ring
    }

    pub fn table(&self) -> &SeatTable {
        &self.table
    }

    /// The signal workers poll. Stopping it from another thread ends the
    /// run early. A simulation runs once: after the signal is cleared, any
    /// later run returns as soon as its workers are joined.
    pub fn signal(&self) -> &RunningSignal {
        &self.running
    }

    pub fn run(&self) -> RunSummary {
        self.run_with(|_| {})
    }

    /// Runs for the configured duration, handing `observer` a snapshot every
    /// report interval. Returns once every worker has been joined.
    pub fn run_with(&self, mut observer: impl FnMut(&StateSnapshot)) -> RunSummary {
        let seats = self.config.philosophers();
        let started = Instant::now();
        info!(
            philosophers = seats,
            duration_ms = millis(self.config.duration()),
            seed = ?self.config.seed(),
            "simulation starting"
        );

        let meals: Vec<u64> = thread::scope(|scope| {
            let _stop = StopOnDrop(&self.running);

            let handles: Vec<_> = (0..seats)
                .map(|i| {
                    let seat = SeatId(i);
                    let philosopher = Philosopher::new(
                        seat,
                        &self.ring,
                        &self.table,
                        &self.running,
                        self.pacing.for_seat(seat),
                    )
                    .with_journal(self.journal.as_deref());
                    scope.spawn(move || philosopher.run())
                })
                .collect();

            self.wait(started, &mut observer);

            self.running.stop();
            info!("stop requested, joining philosophers");

            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(meals) => meals,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let elapsed = started.elapsed();
        let seats = self.table.with_lock(|records| {
            records
                .iter()
                .zip(&meals)
                .map(|(r, &meals)| SeatSummary {
                    seat: r.seat(),
                    meals,
                    longest_wait_ms: millis(r.longest_wait()),
                })
                .collect::<Vec<_>>()
        });

        let summary = RunSummary {
            philosophers: self.config.philosophers(),
            elapsed_ms: millis(elapsed),
            seats,
            fork_acquisitions: self.ring.total_acquisitions(),
            violations: self.ring.violations(),
        };
        info!(
            elapsed_ms = summary.elapsed_ms,
            total_meals = summary.total_meals(),
            "simulation finished"
        );
        summary
    }

    fn wait(&self, started: Instant, observer: &mut impl FnMut(&StateSnapshot)) {
        // A duration too large to add to `started` means no deadline: the
        // run ends on the meal target or an outside stop.
        let deadline = started.checked_add(self.config.duration());
        loop {
            let snapshot = self.table.snapshot();
            observer(&snapshot);

            if let Some(target) = self.config.meals_per_seat() {
                if snapshot.min_meals() >= target {
                    info!(meals_target = target, "every seat reached the meal target");
                    return;
                }
            }
            if !self.running.is_running() {
                debug!("stopped from outside");
                return;
            }

            let interval = self.config.report_interval();
            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return;
                    }
                    interval.min(deadline - now)
                }
                None => interval,
            };
            thread::sleep(pause);
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
