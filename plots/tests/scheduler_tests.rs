//! Integration tests for the incremental render scheduler.
//!
//! These drive a [`RenderDriver`] against a recording surface and a manual
//! clock, simulating the host event loop as a queue of deferred resume
//! callbacks. Every drawn primitive is recorded, so the tests can assert
//! exactly what a pass painted, in what order, and across how many turns.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use ensemble_plots::render::driver::RenderDriver;
use ensemble_plots::render::drawloop::{Orientation, RenderRequest, RequestSeries};
use ensemble_plots::render::surface::DrawSurface;
use ensemble_plots::render::tracker::{ManualClock, RenderTracker};
use ensemble_plots::render::RenderConfig;
use ensemble_plots::style::{AreaStyle, LineStyle, MarkerStyle, Rgb, SeriesStyle};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear,
    Segment { from: [f64; 2], to: [f64; 2] },
    Quad,
    Marker { at: [f64; 2] },
}

/// Records every primitive and, when given a clock, advances simulated time
/// per drawn primitive so turn budgets expire deterministically.
struct RecordingSurface {
    ops: Rc<RefCell<Vec<Op>>>,
    clock: Option<Arc<ManualClock>>,
    tick: Duration,
}

impl RecordingSurface {
    fn new(ops: Rc<RefCell<Vec<Op>>>) -> Self {
        Self {
            ops,
            clock: None,
            tick: Duration::ZERO,
        }
    }

    fn with_clock(ops: Rc<RefCell<Vec<Op>>>, clock: Arc<ManualClock>, tick: Duration) -> Self {
        Self {
            ops,
            clock: Some(clock),
            tick,
        }
    }

    fn record(&mut self, op: Op) {
        self.ops.borrow_mut().push(op);
        if let Some(clock) = &self.clock {
            clock.advance(self.tick);
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.borrow_mut().push(Op::Clear);
    }

    fn draw_segment(&mut self, from: [f64; 2], to: [f64; 2], _style: &LineStyle) {
        self.record(Op::Segment { from, to });
    }

    fn fill_quad(&mut self, _corners: [[f64; 2]; 4], _style: &AreaStyle) {
        self.record(Op::Quad);
    }

    fn draw_marker(&mut self, at: [f64; 2], _style: &MarkerStyle) {
        self.record(Op::Marker { at });
    }
}

/// A curve whose y values encode the series id, so recorded primitives can
/// be attributed to their series.
fn curve(id: usize, samples: usize) -> RequestSeries {
    let xs: Vec<f64> = (0..samples).map(|i| i as f64).collect();
    let ys: Vec<f64> = (0..samples).map(|i| (id * 1000 + i) as f64).collect();
    RequestSeries::curve(
        format!("series-{id}"),
        xs,
        ys,
        SeriesStyle::line(Rgb::BLACK),
    )
}

fn request_of(series: Vec<RequestSeries>) -> RenderRequest {
    let mut request = RenderRequest::new(Orientation::Horizontal);
    for s in series {
        request.push(s);
    }
    request
}

struct Harness {
    driver: RenderDriver<RecordingSurface>,
    ops: Rc<RefCell<Vec<Op>>>,
    resumes: Rc<RefCell<VecDeque<Duration>>>,
    finished: Rc<RefCell<usize>>,
    legend: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    /// Deferred-mode driver: budget in simulated ticks, one tick per drawn
    /// primitive.
    fn deferred(budget_ticks: u64) -> Self {
        let ops = Rc::new(RefCell::new(Vec::new()));
        let clock = Arc::new(ManualClock::new());
        let surface =
            RecordingSurface::with_clock(ops.clone(), clock.clone(), Duration::from_micros(1));

        let finished = Rc::new(RefCell::new(0usize));
        let legend = Rc::new(RefCell::new(Vec::new()));
        let finished_sink = finished.clone();
        let legend_sink = legend.clone();
        let config = RenderConfig {
            finished: Some(Box::new(move || *finished_sink.borrow_mut() += 1)),
            legend: Some(Box::new(move |entry| {
                legend_sink.borrow_mut().push(entry.label.clone());
            })),
            ..Default::default()
        };

        let resumes: Rc<RefCell<VecDeque<Duration>>> = Rc::new(RefCell::new(VecDeque::new()));
        let resume_sink = resumes.clone();
        let tracker =
            RenderTracker::with_clock(Duration::from_micros(budget_ticks), clock.clone());
        let driver = RenderDriver::new(surface, config)
            .with_tracker(tracker)
            .with_resume_hook(
                Duration::from_millis(15),
                Box::new(move |delay| resume_sink.borrow_mut().push_back(delay)),
            );

        Self {
            driver,
            ops,
            resumes,
            finished,
            legend,
        }
    }

    /// Drain scheduled resumes until the driver goes quiet. Returns the
    /// number of scheduling turns that ran, counting the initial one.
    fn drain(&mut self) -> usize {
        let mut turns = 1;
        loop {
            let next = self.resumes.borrow_mut().pop_front();
            if next.is_none() {
                break;
            }
            self.driver.resume();
            turns += 1;
        }
        turns
    }

    fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    fn finished_count(&self) -> usize {
        *self.finished.borrow()
    }
}

/// Series id a primitive belongs to, from the y-value encoding in `curve`.
fn op_series(op: &Op) -> Option<usize> {
    match op {
        Op::Segment { to, .. } => Some(to[1] as usize / 1000),
        Op::Marker { at } => Some(at[1] as usize / 1000),
        _ => None,
    }
}

#[test]
fn completed_pass_draws_every_unit_once_in_order() {
    let mut harness = Harness::deferred(1_000_000);
    harness
        .driver
        .set_data(request_of(vec![curve(0, 4), curve(1, 1), curve(2, 3)]));
    harness.driver.render_now();
    harness.drain();

    assert_eq!(harness.finished_count(), 1);
    let ops = harness.ops();
    assert_eq!(ops[0], Op::Clear);

    // 4-sample curve: 3 segments; 1-sample curve: 1 marker; 3-sample: 2 segments
    let drawn: Vec<Op> = ops.iter().filter(|op| **op != Op::Clear).cloned().collect();
    assert_eq!(drawn.len(), 3 + 1 + 2);

    // Strictly increasing series order
    let series_seq: Vec<usize> = drawn.iter().filter_map(op_series).collect();
    let mut sorted = series_seq.clone();
    sorted.sort_unstable();
    assert_eq!(series_seq, sorted);

    // Each consecutive sample pair of series 0 drawn exactly once, in order
    let segs: Vec<[f64; 2]> = drawn
        .iter()
        .filter_map(|op| match op {
            Op::Segment { from, to } if op_series(op) == Some(0) => Some([from[0], to[0]]),
            _ => None,
        })
        .collect();
    assert_eq!(segs, vec![[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]]);

    // The single-sample series renders one marker, never a zero-length line
    assert_eq!(
        drawn
            .iter()
            .filter(|op| matches!(op, Op::Marker { .. }))
            .count(),
        1
    );
}

#[test]
fn turn_budget_slices_large_pass_into_turns() {
    // 1000/1/500 samples, budget ~300 units per turn
    let mut harness = Harness::deferred(300);
    harness
        .driver
        .set_data(request_of(vec![curve(0, 1000), curve(1, 1), curve(2, 500)]));
    harness.driver.render_now();
    let turns = harness.drain();

    assert_eq!(harness.finished_count(), 1);
    assert!(!harness.driver.is_rendering());
    // ceil(1000/300) + 1 + ceil(500/300) = 6 turns at minimum
    assert!(turns >= 6, "expected at least 6 scheduling turns, got {turns}");
    assert!(turns <= 10, "unexpectedly many scheduling turns: {turns}");

    // Every unit drawn exactly once despite the suspensions
    let segments = harness
        .ops()
        .iter()
        .filter(|op| matches!(op, Op::Segment { .. }))
        .count();
    assert_eq!(segments, 999 + 499);
}

#[test]
fn a_turn_never_crosses_a_series_boundary() {
    // Effectively unlimited budget: each turn still ends at a series boundary
    let mut harness = Harness::deferred(1_000_000);
    harness
        .driver
        .set_data(request_of(vec![curve(0, 10), curve(1, 10), curve(2, 10)]));
    harness.driver.render_now();
    let turns = harness.drain();

    assert_eq!(turns, 3);
    assert_eq!(harness.finished_count(), 1);
}

#[test]
fn superseding_request_abandons_then_runs_clean() {
    let mut harness = Harness::deferred(5);
    harness.driver.set_data(request_of(vec![curve(0, 100)]));
    harness.driver.render_now();
    assert!(harness.driver.is_rendering());

    // Supersede mid-flight; repeated calls collapse into the single slot
    harness.driver.set_data(request_of(vec![curve(7, 10)]));
    harness.driver.render_now();
    harness.driver.render_now();
    assert!(harness.driver.has_pending_request());

    harness.drain();

    // Only the superseding pass completes
    assert_eq!(harness.finished_count(), 1);
    assert!(!harness.driver.has_pending_request());
    assert!(!harness.driver.is_rendering());

    // Two passes, two clears; everything after the second clear belongs to
    // the new request — the abandoned cursor never advances again
    let ops = harness.ops();
    let clears: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter_map(|(i, op)| (*op == Op::Clear).then_some(i))
        .collect();
    assert_eq!(clears.len(), 2);
    assert!(
        ops[clears[1] + 1..]
            .iter()
            .all(|op| op_series(op) == Some(7)),
        "old pass drew after the new pass started"
    );
    let old_after_new = ops[clears[1]..]
        .iter()
        .any(|op| op_series(op) == Some(0));
    assert!(!old_after_new);

    // The new pass drew all of its units
    let new_segments = ops[clears[1]..]
        .iter()
        .filter(|op| matches!(op, Op::Segment { .. }))
        .count();
    assert_eq!(new_segments, 9);
}

#[test]
fn legend_reflects_full_series_list_even_when_abandoned() {
    let mut harness = Harness::deferred(2);
    harness.driver.set_data(request_of(vec![
        curve(0, 50),
        curve(1, 50),
        curve(2, 50),
    ]));
    harness.driver.render_now();

    // All legend entries were registered up front, before the first yield
    assert_eq!(
        harness.legend.borrow().as_slice(),
        &["series-0", "series-1", "series-2"]
    );

    // Abandon before the pass gets anywhere near series 2
    harness.driver.force_stop();
    harness.drain();
    assert_eq!(harness.finished_count(), 0);
    assert_eq!(harness.legend.borrow().len(), 3);
}

#[test]
fn force_stop_halts_without_queueing_a_replacement() {
    let mut harness = Harness::deferred(5);
    harness.driver.set_data(request_of(vec![curve(0, 100)]));
    harness.driver.render_now();
    harness.driver.force_stop();
    harness.drain();

    assert_eq!(harness.finished_count(), 0);
    assert!(!harness.driver.is_rendering());
    assert!(!harness.driver.has_pending_request());
    let ops_after_stop = harness.ops().len();

    // A stale resume is a no-op
    harness.driver.resume();
    assert_eq!(harness.ops().len(), ops_after_stop);

    // A fresh request renders cleanly afterwards
    harness.driver.render_now();
    harness.drain();
    assert_eq!(harness.finished_count(), 1);
    let segments = harness
        .ops()
        .iter()
        .skip(ops_after_stop)
        .filter(|op| matches!(op, Op::Segment { .. }))
        .count();
    assert_eq!(segments, 99);
}

#[test]
fn empty_request_completes_immediately() {
    let mut harness = Harness::deferred(100);
    harness
        .driver
        .set_data(RenderRequest::new(Orientation::Horizontal));
    harness.driver.render_now();

    assert_eq!(harness.finished_count(), 1);
    assert!(!harness.driver.is_rendering());
    assert_eq!(harness.ops(), vec![Op::Clear]);
}

#[test]
fn render_now_without_data_is_a_no_op() {
    let mut harness = Harness::deferred(100);
    harness.driver.render_now();
    assert_eq!(harness.finished_count(), 0);
    assert!(harness.ops().is_empty());
    assert!(!harness.driver.is_rendering());
}

#[test]
fn observation_series_draws_markers_and_whiskers() {
    let mut harness = Harness::deferred(1_000_000);
    let mut request = RenderRequest::new(Orientation::Horizontal);
    request.push(RequestSeries::observations(
        "Observations",
        vec![1.0, 2.0],
        vec![10.0, 20.0],
        vec![0.5, 0.0],
        SeriesStyle::markers(Rgb::new(200, 30, 30)),
    ));
    harness.driver.set_data(request);
    harness.driver.render_now();
    harness.drain();

    let ops = harness.ops();
    // First observation: whisker + marker; second (zero error): marker only
    assert_eq!(
        ops,
        vec![
            Op::Clear,
            Op::Segment {
                from: [1.0, 9.5],
                to: [1.0, 10.5]
            },
            Op::Marker { at: [1.0, 10.0] },
            Op::Marker { at: [2.0, 20.0] },
        ]
    );
    assert_eq!(harness.finished_count(), 1);
}

#[test]
fn filled_curve_emits_baseline_quads() {
    let mut harness = Harness::deferred(1_000_000);
    let mut request = RenderRequest::new(Orientation::Horizontal);
    request.push(RequestSeries::curve(
        "area",
        vec![0.0, 1.0, 2.0],
        vec![5.0, 6.0, 4.0],
        SeriesStyle::filled(Rgb::BLACK, Rgb::new(200, 200, 255)),
    ));
    harness.driver.set_data(request);
    harness.driver.render_now();
    harness.drain();

    let quads = harness
        .ops()
        .iter()
        .filter(|op| matches!(op, Op::Quad))
        .count();
    assert_eq!(quads, 2);
}

#[test]
fn immediate_mode_completes_on_the_callers_turn() {
    // No resume hook: the whole pass runs inside render_now
    let ops = Rc::new(RefCell::new(Vec::new()));
    let surface = RecordingSurface::new(ops.clone());
    let finished = Rc::new(RefCell::new(0usize));
    let finished_sink = finished.clone();
    let config = RenderConfig {
        finished: Some(Box::new(move || *finished_sink.borrow_mut() += 1)),
        ..Default::default()
    };

    let mut driver = RenderDriver::new(surface, config);
    driver.set_data(request_of(vec![curve(0, 100), curve(1, 100)]));
    driver.render_now();

    assert_eq!(*finished.borrow(), 1);
    assert!(!driver.is_rendering());
    let segments = ops
        .borrow()
        .iter()
        .filter(|op| matches!(op, Op::Segment { .. }))
        .count();
    assert_eq!(segments, 99 + 99);
}
