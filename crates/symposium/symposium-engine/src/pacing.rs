use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use symposium_config::{DelayRange, SimulationConfig};
use symposium_events::SeatId;

/// How long seats think and eat.
#[derive(Clone, Debug)]
pub enum Pacing {
    /// Independent uniform draws per seat, in ticks.
    Uniform {
        tick: Duration,
        think: DelayRange,
        eat: DelayRange,
        /// Reproducible when set; OS entropy otherwise.
        seed: Option<u64>,
    },
    /// A fixed cyclic sequence shared by all seats. Seat `i` starts at
    /// offset `i` so neighbours do not move in lockstep.
    Fixed(Arc<[Duration]>),
}

impl Pacing {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Pacing::Uniform {
            tick: config.tick(),
            think: config.think(),
            eat: config.eat(),
            seed: config.seed(),
        }
    }

    /// # Panics
    /// Panics if `sequence` is empty.
    pub fn fixed(sequence: impl Into<Vec<Duration>>) -> Self {
        let sequence = sequence.into();
        assert!(!sequence.is_empty(), "fixed pacing needs at least one delay");
        Pacing::Fixed(sequence.into())
    }

    pub fn for_seat(&self, seat: SeatId) -> SeatPacing {
        let source = match self {
            Pacing::Uniform {
                tick,
                think,
                eat,
                seed,
            } => {
                let seed = match seed {
                    Some(s) => seat_seed(*s, seat),
                    None => rand::random(),
                };
                Source::Uniform {
                    rng: ChaCha8Rng::seed_from_u64(seed),
                    tick: *tick,
                    think: Uniform::new_inclusive(think.min, think.max),
                    eat: Uniform::new_inclusive(eat.min, eat.max),
                }
            }
            Pacing::Fixed(sequence) => Source::Fixed {
                cursor: seat.0 % sequence.len(),
                sequence: sequence.clone(),
            },
        };
        SeatPacing { source }
    }
}

// Same master seed + different seat = unrelated streams.
fn seat_seed(master: u64, seat: SeatId) -> u64 {
    master ^ (seat.0 as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

#[derive(Debug)]
enum Source {
    Uniform {
        rng: ChaCha8Rng,
        tick: Duration,
        think: Uniform<u64>,
        eat: Uniform<u64>,
    },
    Fixed {
        sequence: Arc<[Duration]>,
        cursor: usize,
    },
}

/// One seat's private delay stream.
#[derive(Debug)]
pub struct SeatPacing {
    source: Source,
}

impl SeatPacing {
    pub fn think(&mut self) -> Duration {
        self.draw(false)
    }

    pub fn eat(&mut self) -> Duration {
        self.draw(true)
    }

    fn draw(&mut self, eating: bool) -> Duration {
        match &mut self.source {
            Source::Uniform {
                rng,
                tick,
                think,
                eat,
            } => {
                let range = if eating { *eat } else { *think };
                ticks(*tick, rng.sample(range))
            }
            Source::Fixed { sequence, cursor } => {
                let d = sequence[*cursor];
                *cursor = (*cursor + 1) % sequence.len();
                d
            }
        }
    }
}

fn ticks(tick: Duration, n: u64) -> Duration {
    tick.saturating_mul(u32::try_from(n).unwrap_or(u32::MAX))
}
