//! Scroll-spy: keeps the active section in sync with the scroll position.
//!
//! Scroll notifications are coalesced: the first one in a frame window sets
//! an in-flight flag, later ones are dropped, and the actual recomputation
//! runs once in [`ScrollTracker::on_frame`].

use tracing::{debug, trace};

use super::active::{ActiveReader, ActiveSection};
use super::section::{SectionId, SectionLayout, SectionRegistry};
use super::viewport::Viewport;

/// Find the first section (document order) whose extent contains `probe`.
/// Sections without a live extent are skipped.
pub fn resolve_active(
    registry: &SectionRegistry,
    layout: &impl SectionLayout,
    probe: f64,
) -> Option<SectionId> {
    registry
        .iter()
        .find(|section| {
            layout
                .extent(&section.id)
                .is_some_and(|extent| extent.contains(probe))
        })
        .map(|section| section.id.clone())
}

/// Passive scroll listener owning the active-section store.
#[derive(Debug)]
pub struct ScrollTracker {
    registry: SectionRegistry,
    /// Added to the scroll offset to get the probe line (fixed header height).
    lookahead: f64,
    active: ActiveSection,
    /// A recomputation is scheduled for the next frame.
    pending: bool,
    mounted: bool,
}

impl ScrollTracker {
    pub fn new(registry: SectionRegistry, lookahead: f64) -> Self {
        Self {
            registry,
            lookahead,
            active: ActiveSection::new(),
            pending: false,
            mounted: false,
        }
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Current active section.
    pub fn active(&self) -> Option<SectionId> {
        self.active.get()
    }

    pub fn subscribe(&self) -> ActiveReader {
        self.active.subscribe()
    }

    /// Start listening.  Schedules an initial recomputation so the header
    /// reflects the starting position on the first frame.
    pub fn mount(&mut self) {
        self.mounted = true;
        self.pending = true;
        debug!(sections = self.registry.len(), "scroll tracker mounted");
    }

    /// Stop listening and forget everything tied to this mount cycle.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.pending = false;
        self.active.publish(None);
        debug!("scroll tracker unmounted");
    }

    /// Scroll notification.  Returns `true` if this call scheduled a
    /// recomputation, `false` if it was dropped (already scheduled, or not
    /// mounted).
    pub fn notify_scroll(&mut self) -> bool {
        if !self.mounted || self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Frame callback.  Runs the scheduled recomputation, if any, and
    /// returns `true` when the active section changed.
    pub fn on_frame(&mut self, layout: &impl SectionLayout, viewport: &impl Viewport) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.recompute(layout, viewport.scroll_offset())
    }

    /// Resolve the section under `offset + lookahead`.  No match leaves the
    /// previous value in place.
    fn recompute(&mut self, layout: &impl SectionLayout, offset: f64) -> bool {
        let probe = offset + self.lookahead;
        let Some(id) = resolve_active(&self.registry, layout, probe) else {
            trace!(probe, "no section under probe; keeping active section");
            return false;
        };
        let changed = self.active.publish(Some(id.clone()));
        if changed {
            debug!(section = %id, probe, "active section changed");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use super::*;
    use crate::core::section::Extent;
    use crate::core::viewport::ClampedViewport;

    /// Fixed layout that counts lookups.
    struct MapLayout {
        extents: HashMap<SectionId, Extent>,
        lookups: Cell<usize>,
    }

    impl MapLayout {
        fn new(entries: &[(&str, f64, f64)]) -> Self {
            Self {
                extents: entries
                    .iter()
                    .map(|&(id, top, bottom)| (SectionId::new(id), Extent::new(top, bottom - top)))
                    .collect(),
                lookups: Cell::new(0),
            }
        }
    }

    impl SectionLayout for MapLayout {
        fn extent(&self, id: &SectionId) -> Option<Extent> {
            self.lookups.set(self.lookups.get() + 1);
            self.extents.get(id).copied()
        }
    }

    fn abc() -> (SectionRegistry, MapLayout) {
        (
            SectionRegistry::new([("a", "A"), ("b", "B"), ("c", "C")]),
            MapLayout::new(&[("a", 0.0, 100.0), ("b", 100.0, 300.0), ("c", 300.0, 500.0)]),
        )
    }

    fn viewport_at(offset: f64) -> ClampedViewport {
        let mut vp = ClampedViewport::new(10_000.0);
        vp.set_scroll_offset(offset);
        vp
    }

    #[test]
    fn first_matching_section_wins() {
        let (reg, layout) = abc();
        assert_eq!(resolve_active(&reg, &layout, 150.0), Some("b".into()));
        assert_eq!(resolve_active(&reg, &layout, 100.0), Some("b".into()));
        assert_eq!(resolve_active(&reg, &layout, 600.0), None);
    }

    #[test]
    fn overlapping_sections_resolve_to_earlier_one() {
        let reg = SectionRegistry::new([("a", "A"), ("b", "B")]);
        let layout = MapLayout::new(&[("a", 0.0, 200.0), ("b", 100.0, 300.0)]);
        assert_eq!(resolve_active(&reg, &layout, 150.0), Some("a".into()));
    }

    #[test]
    fn probe_past_all_sections_keeps_previous_value() {
        let (reg, layout) = abc();
        let mut tracker = ScrollTracker::new(reg, 0.0);
        tracker.mount();

        tracker.on_frame(&layout, &viewport_at(150.0));
        assert_eq!(tracker.active(), Some("b".into()));

        tracker.notify_scroll();
        assert!(!tracker.on_frame(&layout, &viewport_at(600.0)));
        assert_eq!(tracker.active(), Some("b".into()));
    }

    #[test]
    fn burst_of_notifications_recomputes_once_per_frame() {
        let (reg, layout) = abc();
        let mut tracker = ScrollTracker::new(reg, 0.0);
        tracker.mount();
        tracker.on_frame(&layout, &viewport_at(0.0));
        layout.lookups.set(0);

        let scheduled = (0..100).filter(|_| tracker.notify_scroll()).count();
        assert_eq!(scheduled, 1);

        // Probe 350 lands in the third section: three lookups for one pass.
        tracker.on_frame(&layout, &viewport_at(350.0));
        assert_eq!(layout.lookups.get(), 3);

        // Nothing scheduled: the next frame does no work.
        tracker.on_frame(&layout, &viewport_at(350.0));
        assert_eq!(layout.lookups.get(), 3);
        assert_eq!(tracker.active(), Some("c".into()));
    }

    #[test]
    fn missing_extents_are_skipped() {
        let reg = SectionRegistry::new([("ghost", "Ghost"), ("b", "B")]);
        let layout = MapLayout::new(&[("b", 0.0, 500.0)]);
        let mut tracker = ScrollTracker::new(reg, 120.0);
        tracker.mount();
        tracker.on_frame(&layout, &viewport_at(10.0));
        assert_eq!(tracker.active(), Some("b".into()));
    }

    #[test]
    fn lookahead_shifts_the_probe_line() {
        let reg = SectionRegistry::new([("hero", "Home"), ("skills", "Skills")]);
        let layout = MapLayout::new(&[("hero", 0.0, 800.0), ("skills", 800.0, 1600.0)]);
        let mut tracker = ScrollTracker::new(reg, 120.0);
        tracker.mount();
        tracker.on_frame(&layout, &viewport_at(0.0));
        assert_eq!(tracker.active(), Some("hero".into()));

        // 850 + 120 = 970 sits inside skills.
        tracker.notify_scroll();
        assert!(tracker.on_frame(&layout, &viewport_at(850.0)));
        assert_eq!(tracker.active(), Some("skills".into()));

        // 700 + 120 = 820 is already inside skills.
        tracker.notify_scroll();
        assert!(!tracker.on_frame(&layout, &viewport_at(700.0)));
        assert_eq!(tracker.active(), Some("skills".into()));
    }

    #[test]
    fn unmounted_tracker_ignores_scrolls_and_resets() {
        let (reg, layout) = abc();
        let mut tracker = ScrollTracker::new(reg, 0.0);
        assert!(!tracker.notify_scroll());

        tracker.mount();
        tracker.on_frame(&layout, &viewport_at(150.0));
        let reader = tracker.subscribe();
        assert_eq!(*reader.borrow(), Some("b".into()));

        tracker.unmount();
        assert_eq!(tracker.active(), None);
        assert_eq!(*reader.borrow(), None);
        assert!(!tracker.notify_scroll());
        assert!(!tracker.on_frame(&layout, &viewport_at(350.0)));
    }
}
