use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::render::RenderConfig;
use crate::render::drawloop::{ProgressiveDrawLoop, RenderRequest, TurnOutcome};
use crate::render::progress::ProgressInfo;
use crate::render::surface::DrawSurface;
use crate::render::tracker::RenderTracker;

/// Hook the driver uses to ask its host event loop for a deferred callback.
///
/// The host must call [`RenderDriver::resume`] once the delay elapses.
/// Without a hook the driver runs every turn back to back on the caller's
/// turn, which is the right behavior for small plots and batch rendering.
pub type ResumeHook = Box<dyn FnMut(Duration)>;

/// Coordinates render passes over one drawing surface.
///
/// Owns the tracker, the progressive draw loop, the current request, and a
/// single-slot pending flag. [`render_now`](Self::render_now) is the only
/// entry point callers need: when the driver is idle the pass starts on the
/// caller's turn; when a pass is in flight the new request supersedes it —
/// the in-flight pass is asked to abandon and the superseding pass launches
/// the moment the old one acknowledges. There is no retry timer and no
/// retry bound: a pass that never acknowledges (see
/// [`RenderTracker`](crate::render::tracker::RenderTracker) docs) leaves
/// the pending request waiting forever.
///
/// All of this is cooperative single-threaded scheduling; at most one
/// cursor ever advances over the surface.
pub struct RenderDriver<S: DrawSurface> {
    tracker: RenderTracker,
    drawloop: ProgressiveDrawLoop,
    request: Option<Arc<RenderRequest>>,
    active: Option<Arc<RenderRequest>>,
    pending: bool,
    resume_delay: Duration,
    resume_hook: Option<ResumeHook>,
    config: RenderConfig,
    surface: S,
}

impl<S: DrawSurface> RenderDriver<S> {
    /// Default delay before a suspended pass is resumed by its host.
    pub const DEFAULT_RESUME_DELAY: Duration = Duration::from_millis(15);

    pub fn new(surface: S, config: RenderConfig) -> Self {
        Self {
            tracker: RenderTracker::default(),
            drawloop: ProgressiveDrawLoop::new(),
            request: None,
            active: None,
            pending: false,
            resume_delay: Self::DEFAULT_RESUME_DELAY,
            resume_hook: None,
            config,
            surface,
        }
    }

    /// Replace the tracker, e.g. to change the turn budget or inject a test
    /// clock.
    pub fn with_tracker(mut self, tracker: RenderTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Install the host's deferred-callback hook and the delay passed to it.
    pub fn with_resume_hook(mut self, delay: Duration, hook: ResumeHook) -> Self {
        self.resume_delay = delay;
        self.resume_hook = Some(hook);
        self
    }

    /// Replace the dataset for subsequent passes. An in-flight pass keeps
    /// drawing its own request; a later `render_now` picks this one up.
    pub fn set_data(&mut self, request: RenderRequest) {
        self.request = Some(Arc::new(request));
    }

    /// Request a redraw.
    ///
    /// Idle driver: the pass starts immediately and its first turn runs on
    /// this call. Busy driver: the in-flight pass is signalled to abandon
    /// and the request parks in the single pending slot; repeated calls
    /// while busy collapse into that one slot.
    pub fn render_now(&mut self) {
        if self.tracker.is_running() {
            trace!("render requested while busy; superseding in-flight pass");
            self.pending = true;
            self.tracker.force_stop();
            return;
        }
        self.start_pass();
    }

    /// Host callback: run the next turn of a suspended pass. Stale calls
    /// (after completion or a force stop with no restart) are no-ops.
    pub fn resume(&mut self) {
        if self.active.is_none() {
            return;
        }
        self.step();
    }

    /// Halt the in-flight pass without queueing a replacement.
    pub fn force_stop(&mut self) {
        self.tracker.force_stop();
    }

    pub fn is_rendering(&self) -> bool {
        self.tracker.is_running()
    }

    /// True while a superseding request waits for the in-flight pass to
    /// acknowledge its stop signal.
    pub fn has_pending_request(&self) -> bool {
        self.pending
    }

    pub fn running_time(&self) -> Duration {
        self.tracker.running_time()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tear down the driver and hand back the surface, e.g. for encoding.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Hand back the render config, e.g. to return borrowed callbacks.
    pub fn into_parts(self) -> (S, RenderConfig) {
        (self.surface, self.config)
    }

    fn start_pass(&mut self) {
        let Some(request) = self.request.clone() else {
            return;
        };
        if !self.tracker.start() {
            // Unreachable from render_now; kept as the safe fallback.
            self.pending = true;
            return;
        }
        debug!(
            series = request.series().len(),
            samples = request.total_samples(),
            "starting render pass"
        );
        self.drawloop
            .begin_pass(&request, &mut self.surface, &mut self.config);
        self.active = Some(request);
        self.step();
    }

    /// Drive turns until the pass suspends (deferred mode), completes, or
    /// abandons. Without a resume hook this loops to a terminal state
    /// synchronously.
    fn step(&mut self) {
        loop {
            let Some(request) = self.active.clone() else {
                return;
            };
            match self
                .drawloop
                .run_turn(&mut self.tracker, &request, &mut self.surface)
            {
                TurnOutcome::Yielded { units } => {
                    trace!(units, cursor = ?self.drawloop.cursor(), "render turn yielded");
                    self.config.report_progress(ProgressInfo::new(
                        self.drawloop.units_drawn(),
                        request.total_samples(),
                    ));
                    if let Some(hook) = &mut self.resume_hook {
                        hook(self.resume_delay);
                        return;
                    }
                }
                TurnOutcome::Completed { .. } => {
                    debug!(
                        units = self.drawloop.units_drawn(),
                        "render pass completed"
                    );
                    self.config.report_progress(ProgressInfo::new(
                        self.drawloop.units_drawn(),
                        request.total_samples(),
                    ));
                    self.active = None;
                    self.config.notify_finished();
                    self.launch_pending();
                    return;
                }
                TurnOutcome::Abandoned => {
                    debug!("render pass abandoned");
                    self.active = None;
                    self.launch_pending();
                    return;
                }
            }
        }
    }

    fn launch_pending(&mut self) {
        if self.pending {
            self.pending = false;
            self.start_pass();
        }
    }
}
