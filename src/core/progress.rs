use std::io::{self, Write};
use std::time::{Duration, Instant};

const REDRAW_INTERVAL: Duration = Duration::from_millis(500);

/// Single-line progress display on stderr.
pub struct ProgressTracker {
    enabled: bool,
    total: usize,
    current: usize,
    t0: Instant,
    last_draw: Option<Instant>,
}

impl ProgressTracker {
    pub fn new(total: usize, enabled: bool) -> Self {
        Self {
            enabled,
            total,
            current: 0,
            t0: Instant::now(),
            last_draw: None,
        }
    }

    pub fn hidden() -> Self {
        Self::new(0, false)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn update(&mut self, n: usize) {
        self.current += n;
        if !self.enabled {
            return;
        }
        let due = self
            .last_draw
            .map_or(true, |at| at.elapsed() >= REDRAW_INTERVAL);
        if due {
            self.draw(false);
        }
    }

    pub fn finish(&mut self) {
        if self.enabled {
            self.draw(true);
        }
    }

    fn draw(&mut self, last: bool) {
        self.last_draw = Some(Instant::now());
        let line = render_line(self.current, self.total, self.t0.elapsed());
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "\r{line}");
        if last {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    }
}

fn render_line(current: usize, total: usize, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 { current as f64 / secs } else { 0.0 };
    let ts = fmt_elapsed(secs);
    if total == 0 {
        return format!("[{ts}] translated {current} lines ({rate:.1} lines/s)");
    }
    let shown = current.min(total);
    let pct = (shown as f64 / total as f64) * 100.0;
    format!("[{ts}] translated {shown}/{total} ({pct:5.1}%) {rate:.1} lines/s")
}

fn fmt_elapsed(seconds: f64) -> String {
    let seconds = seconds.max(0.0) as u64;
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}
