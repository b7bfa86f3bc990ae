//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;
use tracing::debug;

use crate::config::{AppConfig, Keymap};
use crate::content::Portfolio;
use crate::core::{
    active::ActiveReader,
    scroller::SmoothScroller,
    section::{SectionId, SectionRegistry},
    tracker::ScrollTracker,
    viewport::{ClampedViewport, Viewport},
};
use crate::ui::{layout::AppLayout, page::PageLayout};

/// Top-level application state.
pub struct AppState {
    pub portfolio: Portfolio,
    pub config: AppConfig,
    pub keymap: Keymap,
    /// Page content laid out for the current width.
    pub page: PageLayout,
    pub viewport: ClampedViewport,
    pub tracker: ScrollTracker,
    pub scroller: SmoothScroller,
    /// Read side of the active-section store, used by the nav header.
    pub active: ActiveReader,
    /// Nav label under the mouse pointer.
    pub hovered_nav: Option<usize>,
    /// Screen regions from the last resize.
    pub layout: AppLayout,
    /// Something visible changed since the last draw.
    pub dirty: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(portfolio: Portfolio, config: AppConfig) -> Self {
        let tracker = ScrollTracker::new(
            SectionRegistry::portfolio(),
            config.scroll.spy_lookahead_px,
        );
        let active = tracker.subscribe();
        Self {
            portfolio,
            keymap: config.keymap(),
            scroller: SmoothScroller::new(config.timing()),
            config,
            page: PageLayout::default(),
            viewport: ClampedViewport::new(0.0),
            tracker,
            active,
            hovered_nav: None,
            layout: AppLayout::default(),
            dirty: true,
            should_quit: false,
        }
    }

    pub fn registry(&self) -> &SectionRegistry {
        self.tracker.registry()
    }

    /// Install the scroll listener.
    pub fn mount(&mut self) {
        self.tracker.mount();
    }

    /// Remove the scroll listener and stop any animation.
    pub fn unmount(&mut self) {
        self.scroller.cancel();
        self.tracker.unmount();
    }

    /// Recompute screen regions and re-wrap the page for a new terminal
    /// size.  The scroll offset is kept and clamped to the new range.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = AppLayout::from_area(Rect::new(0, 0, width, height));
        let page_area = self.layout.page_area;
        let row_px = self.config.scroll.row_height_px;
        self.page = PageLayout::build(
            &self.portfolio,
            self.tracker.registry(),
            page_area.width.saturating_sub(2),
            row_px,
        );
        self.page
            .reserve_tail(usize::from(page_area.height), self.config.scroll.header_offset_px);
        let max = self.page.total_px() - f64::from(page_area.height) * row_px;
        self.viewport.set_max_offset(max);
        debug!(
            width,
            height,
            rows = self.page.total_rows(),
            max_offset = self.viewport.max_offset(),
            "page laid out"
        );
        // Sections moved, so the active one may have too.
        self.tracker.notify_scroll();
        self.dirty = true;
    }

    /// Manual scroll by `delta_px`.
    pub fn scroll_by(&mut self, delta_px: f64) {
        if self.config.scroll.interrupt_on_input && self.scroller.cancel().is_some() {
            debug!("manual scroll interrupted smooth scroll");
            // The status bar still shows the cancelled target.
            self.dirty = true;
        }
        if self.viewport.scroll_by(delta_px) {
            self.tracker.notify_scroll();
            self.dirty = true;
        }
    }

    /// Manual jump to an absolute offset (Home/End).
    pub fn scroll_to_offset(&mut self, offset_px: f64) {
        let delta = offset_px - self.viewport.scroll_offset();
        self.scroll_by(delta);
    }

    pub fn page_height_px(&self) -> f64 {
        f64::from(self.layout.page_area.height) * self.config.scroll.row_height_px
    }

    /// Start a smooth scroll to `id`.  Unknown ids are ignored.
    pub fn scroll_to_section(&mut self, id: &SectionId) {
        if self
            .scroller
            .scroll_to_section(id, &self.page, &self.viewport)
        {
            self.dirty = true;
        }
    }

    pub fn scroll_to_index(&mut self, index: usize) {
        if let Some(id) = self.registry().get(index).map(|s| s.id.clone()) {
            self.scroll_to_section(&id);
        }
    }

    /// Registry index of the active section.
    pub fn active_index(&self) -> Option<usize> {
        let active = self.tracker.active()?;
        self.registry().position(&active)
    }

    /// Smooth scroll to the section after (`step > 0`) or before the active
    /// one, stopping at either end.
    pub fn step_section(&mut self, step: isize) {
        if self.registry().is_empty() {
            return;
        }
        let len = self.registry().len();
        let target = match self.active_index() {
            Some(i) => i.saturating_add_signed(step).min(len - 1),
            None => 0,
        };
        self.scroll_to_index(target);
    }

    /// Per-frame work: advance the animation, then let the tracker run its
    /// scheduled recomputation.  Offsets written by the scroller count as
    /// scroll notifications, same as user input.
    pub fn on_frame(&mut self, now: Instant) {
        if self.scroller.is_running() {
            self.scroller.on_frame(now, &mut self.viewport);
            self.tracker.notify_scroll();
            self.dirty = true;
        }
        if self.tracker.on_frame(&self.page, &self.viewport) {
            self.dirty = true;
        }
    }

    /// Label of the section being scrolled to, if an animation is running.
    pub fn scrolling_to(&self) -> Option<&str> {
        let run = self.scroller.run()?;
        let index = self.registry().position(&run.section)?;
        self.registry().get(index).map(|s| s.label.as_str())
    }
}
