use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::debug;

/// Time source for the tracker's pass and turn measurements.
///
/// Production code uses [`SystemClock`]; tests drive a [`ManualClock`] so
/// budget expiry can be simulated without sleeping.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Shared between the tracker and the
/// test (or simulation host) driving it.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset_us: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_us: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset_us
            .fetch_add(by.as_micros() as u64, Ordering::Relaxed);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_micros(self.offset_us.load(Ordering::Relaxed))
    }
}

/// Lifecycle of a render pass. Owned by one tracker instance, never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No pass is active; `start` may begin one.
    Idle,
    /// A pass is drawing (possibly suspended between turns).
    Running,
    /// The active pass has been asked to abandon at its next check-point.
    StopRequested,
}

/// Gates render passes and enforces the cooperative per-turn time budget.
///
/// This is single-threaded time-slicing, not parallelism: mutual exclusion
/// of passes rests entirely on the state flag, and "yielding" means the
/// draw loop returns control to its host between turns.
///
/// The pass itself must call [`stopped_rendering`](Self::stopped_rendering)
/// on every terminal path. If it never does (a panic inside a drawing
/// primitive is the only way), the tracker stays `Running` forever and any
/// pending render request waits forever.
#[derive(Debug)]
pub struct RenderTracker {
    state: TrackerState,
    turn_budget: Duration,
    started_at: Option<Instant>,
    turn_started_at: Option<Instant>,
    clock: Arc<dyn Clock>,
}

impl RenderTracker {
    /// Default cap on how long one resumption turn may keep drawing.
    pub const DEFAULT_TURN_BUDGET: Duration = Duration::from_millis(500);

    pub fn new(turn_budget: Duration) -> Self {
        Self::with_clock(turn_budget, Arc::new(SystemClock))
    }

    pub fn with_clock(turn_budget: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: TrackerState::Idle,
            turn_budget,
            started_at: None,
            turn_started_at: None,
            clock,
        }
    }

    /// Begin a pass. Returns `false` when one is already active; contention
    /// is resolved by the driver's pending-request slot, not by retrying
    /// here.
    pub fn start(&mut self) -> bool {
        if self.state != TrackerState::Idle {
            return false;
        }
        self.state = TrackerState::Running;
        self.started_at = Some(self.clock.now());
        self.turn_started_at = None;
        debug!("render pass started");
        true
    }

    /// Mark the start of one resumption turn of the draw loop.
    pub fn loop_start(&mut self) {
        self.turn_started_at = Some(self.clock.now());
    }

    /// True once the current turn has used up its time budget.
    pub fn should_loop_stop(&self) -> bool {
        match self.turn_started_at {
            Some(turn_start) => self.clock.now().duration_since(turn_start) > self.turn_budget,
            None => false,
        }
    }

    /// True when the active pass has been asked to abandon.
    pub fn should_stop(&self) -> bool {
        self.state == TrackerState::StopRequested
    }

    /// Ask the active pass to abandon at its next check-point without
    /// queueing a replacement. No-op when idle.
    pub fn force_stop(&mut self) {
        if self.state == TrackerState::Running {
            self.state = TrackerState::StopRequested;
            debug!("render pass stop requested");
        }
    }

    /// Terminal acknowledgement from the pass itself, on completion or
    /// abandonment. Resets to `Idle` so the next pass may start.
    pub fn stopped_rendering(&mut self) {
        debug!(state = ?self.state, "render pass stopped");
        self.state = TrackerState::Idle;
        self.started_at = None;
        self.turn_started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.state != TrackerState::Idle
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Wall time since the active pass started, or zero when idle.
    pub fn running_time(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self.clock.now().duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    pub fn turn_budget(&self) -> Duration {
        self.turn_budget
    }
}

impl Default for RenderTracker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TURN_BUDGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_tracker(budget_ms: u64) -> (Arc<ManualClock>, RenderTracker) {
        let clock = Arc::new(ManualClock::new());
        let tracker = RenderTracker::with_clock(Duration::from_millis(budget_ms), clock.clone());
        (clock, tracker)
    }

    #[test]
    fn start_only_succeeds_from_idle() {
        let (_, mut tracker) = manual_tracker(500);
        assert!(tracker.start());
        assert!(!tracker.start());
        tracker.stopped_rendering();
        assert!(tracker.start());
    }

    #[test]
    fn loop_budget_expires_only_after_budget_elapses() {
        let (clock, mut tracker) = manual_tracker(500);
        tracker.start();
        tracker.loop_start();
        assert!(!tracker.should_loop_stop());

        clock.advance(Duration::from_millis(499));
        assert!(!tracker.should_loop_stop());

        clock.advance(Duration::from_millis(2));
        assert!(tracker.should_loop_stop());

        // A fresh turn resets the budget.
        tracker.loop_start();
        assert!(!tracker.should_loop_stop());
    }

    #[test]
    fn force_stop_sets_the_abandon_flag_once_running() {
        let (_, mut tracker) = manual_tracker(500);
        // Idle: nothing to stop.
        tracker.force_stop();
        assert_eq!(tracker.state(), TrackerState::Idle);

        tracker.start();
        assert!(!tracker.should_stop());
        tracker.force_stop();
        assert!(tracker.should_stop());
        // Still counts as running until the pass acknowledges.
        assert!(tracker.is_running());
        assert!(!tracker.start());

        tracker.stopped_rendering();
        assert!(!tracker.should_stop());
        assert!(!tracker.is_running());
    }

    #[test]
    fn running_time_tracks_the_manual_clock() {
        let (clock, mut tracker) = manual_tracker(500);
        assert_eq!(tracker.running_time(), Duration::ZERO);
        tracker.start();
        clock.advance(Duration::from_millis(1250));
        assert_eq!(tracker.running_time(), Duration::from_millis(1250));
        tracker.stopped_rendering();
        assert_eq!(tracker.running_time(), Duration::ZERO);
    }
}
