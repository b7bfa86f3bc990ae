//! Eased, frame-driven scroll-to-section.
//!
//! The scroller is an explicit state machine:
//!
//! ```text
//! Idle ──scroll_to_section──▶ Running ──last frame──▶ Idle
//!                               │  ▲
//!         scroll_to_section ────┘  │   (cancel old run, start fresh)
//!                               cancel ──▶ Idle
//! ```
//!
//! It never touches the viewport on its own; the host calls
//! [`SmoothScroller::on_frame`] once per rendered frame while
//! [`SmoothScroller::is_running`] is true.

use std::time::Instant;

use tracing::{debug, trace};

use super::easing::Easing;
use super::section::{SectionId, SectionLayout};
use super::viewport::Viewport;

// ───────────────────────────────────────── timing ────────────

/// Tunables shared by every run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTiming {
    /// Subtracted from the section top so it lands just below the fixed
    /// header.
    pub header_offset: f64,
    /// Animation time per pixel of distance.
    pub ms_per_px: f64,
    /// Upper bound on any run's duration.
    pub max_duration_ms: f64,
    pub easing: Easing,
}

impl Default for ScrollTiming {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            ms_per_px: 0.5,
            max_duration_ms: 1000.0,
            easing: Easing::QuadInOut,
        }
    }
}

impl ScrollTiming {
    /// `min(|distance| * ms_per_px, max_duration_ms)`.
    pub fn duration_ms(&self, distance: f64) -> f64 {
        (distance.abs() * self.ms_per_px).min(self.max_duration_ms)
    }
}

// ───────────────────────────────────────── run ───────────────

/// State of one in-flight animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRun {
    pub section: SectionId,
    pub start: f64,
    pub target: f64,
    pub distance: f64,
    pub duration_ms: f64,
    /// Unset until the first frame.
    pub started_at: Option<Instant>,
}

impl ScrollRun {
    fn new(section: SectionId, start: f64, target: f64, timing: &ScrollTiming) -> Self {
        let distance = target - start;
        Self {
            section,
            start,
            target,
            distance,
            duration_ms: timing.duration_ms(distance),
            started_at: None,
        }
    }

    /// Offset to write at `now`, and whether this is the final frame.
    fn sample(&self, now: Instant, easing: Easing) -> (f64, bool) {
        let Some(started_at) = self.started_at else {
            return (self.start, false);
        };
        let elapsed_ms = now.saturating_duration_since(started_at).as_secs_f64() * 1000.0;
        if elapsed_ms >= self.duration_ms {
            return (self.target, true);
        }
        let progress = (elapsed_ms / self.duration_ms).min(1.0);
        (self.start + self.distance * easing.apply(progress), false)
    }
}

/// Scroller state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScrollState {
    #[default]
    Idle,
    Running(ScrollRun),
}

// ───────────────────────────────────────── scroller ──────────

#[derive(Debug, Clone, Default)]
pub struct SmoothScroller {
    timing: ScrollTiming,
    state: ScrollState,
}

impl SmoothScroller {
    pub fn new(timing: ScrollTiming) -> Self {
        Self {
            timing,
            state: ScrollState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ScrollState::Running(_))
    }

    pub fn run(&self) -> Option<&ScrollRun> {
        match &self.state {
            ScrollState::Running(run) => Some(run),
            ScrollState::Idle => None,
        }
    }

    /// Start animating toward `id`.  An unknown section is a silent no-op
    /// (any in-flight run keeps going).  A known section supersedes the
    /// current run.  Returns `true` if a new run started.
    pub fn scroll_to_section(
        &mut self,
        id: &SectionId,
        layout: &impl SectionLayout,
        viewport: &impl Viewport,
    ) -> bool {
        let Some(extent) = layout.extent(id) else {
            debug!(section = %id, "scroll target has no layout; ignoring");
            return false;
        };
        if let Some(old) = self.cancel() {
            debug!(from = %old.section, to = %id, "superseding in-flight scroll");
        }

        let start = viewport.scroll_offset();
        let target = extent.top - self.timing.header_offset;
        let run = ScrollRun::new(id.clone(), start, target, &self.timing);
        debug!(
            section = %id,
            start,
            target,
            duration_ms = run.duration_ms,
            "smooth scroll started"
        );
        self.state = ScrollState::Running(run);
        true
    }

    /// Drop the in-flight run, leaving the viewport wherever it is.
    pub fn cancel(&mut self) -> Option<ScrollRun> {
        match std::mem::take(&mut self.state) {
            ScrollState::Running(run) => Some(run),
            ScrollState::Idle => None,
        }
    }

    /// Frame callback: write the eased offset for `now`.  Returns `true`
    /// while another frame is needed.
    pub fn on_frame(&mut self, now: Instant, viewport: &mut impl Viewport) -> bool {
        let ScrollState::Running(run) = &mut self.state else {
            return false;
        };

        if run.started_at.is_none() {
            // Rebase on the live offset: the user may have scrolled between
            // the request and the first frame.
            let live = viewport.scroll_offset();
            *run = ScrollRun::new(run.section.clone(), live, run.target, &self.timing);
            run.started_at = Some(now);
        }

        let (offset, done) = run.sample(now, self.timing.easing);
        viewport.set_scroll_offset(offset);
        trace!(offset, done, "smooth scroll frame");

        if done {
            debug!(section = %run.section, target = run.target, "smooth scroll landed");
            self.state = ScrollState::Idle;
        }
        !done
    }
}
