use serde::Serialize;
use symposium_events::SeatId;

#[derive(Clone, Debug, Serialize)]
pub struct SeatSummary {
    pub seat: SeatId,
    pub meals: u64,
    pub longest_wait_ms: u64,
}

/// What a finished run looked like.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub philosophers: usize,
    pub elapsed_ms: u64,
    pub seats: Vec<SeatSummary>,
    pub fork_acquisitions: u64,
    /// Forks claimed while recorded as held by someone else. Zero unless
    /// mutual exclusion is broken.
    pub violations: u64,
}

impl RunSummary {
    pub fn total_meals(&self) -> u64 {
        self.seats.iter().map(|s| s.meals).sum()
    }

    pub fn min_meals(&self) -> u64 {
        self.seats.iter().map(|s| s.meals).min().unwrap_or(0)
    }

    /// True if every seat ate at least once.
    pub fn everyone_ate(&self) -> bool {
        self.min_meals() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_json_shape() {
        let summary = RunSummary {
            philosophers: 2,
            elapsed_ms: 1000,
            seats: vec![
                SeatSummary {
                    seat: SeatId(0),
                    meals: 3,
                    longest_wait_ms: 12,
                },
                SeatSummary {
                    seat: SeatId(1),
                    meals: 0,
                    longest_wait_ms: 0,
                },
            ],
            fork_acquisitions: 6,
            violations: 0,
        };
        assert_eq!(summary.total_meals(), 3);
        assert!(!summary.everyone_ate());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["seats"][0]["seat"], 0);
        assert_eq!(json["seats"][0]["meals"], 3);
    }
}
