use crossterm::style::Stylize;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use symposium_engine::RunSummary;
use symposium_events::{SeatView, StateSnapshot, Status};

/// Renders one status line per snapshot.
pub struct Reporter<W: Write> {
    out: W,
    started: Instant,
    color: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            started: Instant::now(),
            color,
        }
    }

    pub fn render(&mut self, snap: &StateSnapshot) -> io::Result<()> {
        let elapsed = snap.taken_at().saturating_duration_since(self.started);
        writeln!(self.out, "{}", status_line(snap, elapsed, self.color))?;
        self.out.flush()
    }
}

pub fn status_line(snap: &StateSnapshot, elapsed: Duration, color: bool) -> String {
    let mut line = format!("[{:>8.3}s]", elapsed.as_secs_f64());
    for (i, view) in snap.seats().iter().enumerate() {
        line.push_str(if i == 0 { " " } else { " | " });
        line.push_str(&seat_cell(view, snap.waiting(view), color));
    }
    line
}

fn seat_cell(view: &SeatView, waiting: Option<Duration>, color: bool) -> String {
    let label = format!("{:<8}", view.status.to_string());
    let label = match (color, view.status) {
        (false, _) => label,
        (true, Status::Thinking) => label.blue().to_string(),
        (true, Status::Hungry) => label.yellow().to_string(),
        (true, Status::Eating) => label.green().to_string(),
    };

    let mut cell = format!("{} {label}", view.seat);
    if let Some(w) = waiting {
        let _ = write!(cell, " {}ms", w.as_millis());
    }
    if view.holding_left || view.holding_right {
        let l = if view.holding_left { "L" } else { "-" };
        let r = if view.holding_right { "R" } else { "-" };
        let _ = write!(cell, " {l}{r}");
    }
    cell
}

pub fn summary_table(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:>8} {:>14}", "seat", "meals", "longest wait");
    for s in &summary.seats {
        let _ = writeln!(
            out,
            "{:<6} {:>8} {:>12}ms",
            s.seat.to_string(),
            s.meals,
            s.longest_wait_ms
        );
    }
    let _ = writeln!(
        out,
        "total meals: {}, fork acquisitions: {}, elapsed: {:.2}s",
        summary.total_meals(),
        summary.fork_acquisitions,
        summary.elapsed_ms as f64 / 1000.0
    );
    if summary.violations > 0 {
        let _ = writeln!(out, "MUTUAL EXCLUSION VIOLATIONS: {}", summary.violations);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use symposium_engine::SeatSummary;
    use symposium_events::{SeatId, SeatRecord};

    fn sample() -> StateSnapshot {
        let t0 = Instant::now();
        let thinking = SeatRecord::new(SeatId(0));
        let mut hungry = SeatRecord::new(SeatId(1));
        hungry.become_hungry(t0);
        let mut eating = SeatRecord::new(SeatId(2));
        eating.become_hungry(t0);
        eating.start_eating(t0);

        StateSnapshot::new(
            t0 + Duration::from_millis(230),
            [&thinking, &hungry, &eating].into_iter().map(SeatView::from).collect(),
        )
    }

    #[test]
    fn plain_line_shows_waits_and_forks() {
        let line = status_line(&sample(), Duration::from_millis(1350), false);
        assert_eq!(
            line,
            "[   1.350s] P0 thinking | P1 hungry   230ms | P2 eating   LR"
        );
    }

    #[test]
    fn colored_line_keeps_the_text() {
        let line = status_line(&sample(), Duration::ZERO, true);
        // crossterm drops escape codes when NO_COLOR is set.
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(line.contains("\u{1b}["));
        }
        assert!(line.contains("hungry"));
        assert!(line.contains("230ms"));
    }

    #[test]
    fn reporter_writes_one_line_per_snapshot() {
        let mut buf = Vec::new();
        {
            let mut r = Reporter::new(&mut buf, false);
            r.render(&sample()).unwrap();
            r.render(&sample()).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn summary_lists_every_seat() {
        let summary = RunSummary {
            philosophers: 2,
            elapsed_ms: 2500,
            seats: vec![
                SeatSummary {
                    seat: SeatId(0),
                    meals: 4,
                    longest_wait_ms: 120,
                },
                SeatSummary {
                    seat: SeatId(1),
                    meals: 5,
                    longest_wait_ms: 80,
                },
            ],
            fork_acquisitions: 18,
            violations: 0,
        };
        let table = summary_table(&summary);
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("total meals: 9, fork acquisitions: 18, elapsed: 2.50s"));
        assert!(!table.contains("VIOLATIONS"));
    }
}
