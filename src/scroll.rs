//! Scroll position to active-section derivation, plus per-frame coalescing of
//! scroll events.

use crate::navigation::SectionId;

/// Scroll distance after which the page counts as scrolled.
pub const SCROLLED_THRESHOLD_PX: f64 = 50.0;
/// Bias added to the scroll position so the next section activates slightly
/// before its top edge reaches the viewport top.
pub const DEFAULT_LOOKAHEAD_PX: f64 = 120.0;

/// Measured top offsets of the sections; `None` for sections not mounted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectionOffsets([Option<f64>; 5]);

impl SectionOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: SectionId, top: f64) -> Self {
        self.set(id, Some(top));
        self
    }

    pub fn set(&mut self, id: SectionId, top: Option<f64>) {
        self.0[id.index()] = top;
    }

    pub fn top(&self, id: SectionId) -> Option<f64> {
        self.0[id.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollReading {
    pub is_scrolled: bool,
    pub active_section: SectionId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTracker {
    lookahead: f64,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD_PX)
    }
}

impl ScrollTracker {
    pub const fn new(lookahead: f64) -> Self {
        Self { lookahead }
    }

    pub fn read(&self, scroll_y: f64, offsets: &SectionOffsets) -> ScrollReading {
        ScrollReading {
            is_scrolled: scroll_y > SCROLLED_THRESHOLD_PX,
            active_section: self.active_section(scroll_y, offsets),
        }
    }

    /// Bottom-most section whose top is at or above the biased position.
    /// Falls back to home.
    pub fn active_section(&self, scroll_y: f64, offsets: &SectionOffsets) -> SectionId {
        let position = scroll_y + self.lookahead;

        SectionId::ALL
            .into_iter()
            .skip(1)
            .rev()
            .find(|id| offsets.top(*id).is_some_and(|top| top <= position))
            .unwrap_or(SectionId::Home)
    }
}

/// Keeps at most one pending frame. `H` is whatever handle keeps the frame
/// alive (an animation-frame registration in the browser).
#[derive(Debug)]
pub struct FrameCoalescer<H> {
    pending: Option<H>,
}

impl<H> Default for FrameCoalescer<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> FrameCoalescer<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `request` only if no frame is pending. Returns whether a new frame
    /// was scheduled; `false` means the event was absorbed.
    pub fn schedule(&mut self, request: impl FnOnce() -> H) -> bool {
        if self.pending.is_some() {
            return false;
        }

        self.pending = Some(request());
        true
    }

    /// Marks the pending frame as fired (or cancels it) and hands back its handle.
    pub fn complete(&mut self) -> Option<H> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_offsets() -> SectionOffsets {
        SectionOffsets::new()
            .with(SectionId::Home, 0.0)
            .with(SectionId::Projects, 700.0)
            .with(SectionId::Skills, 1_600.0)
            .with(SectionId::Education, 2_300.0)
            .with(SectionId::Contact, 2_900.0)
    }

    #[test]
    fn top_of_page_is_home_and_not_scrolled() {
        let reading = ScrollTracker::new(100.0).read(0.0, &page_offsets());

        assert_eq!(
            reading,
            ScrollReading {
                is_scrolled: false,
                active_section: SectionId::Home,
            }
        );
    }

    #[test]
    fn lookahead_reaches_contact_before_its_top() {
        let offsets = SectionOffsets::new()
            .with(SectionId::Home, 0.0)
            .with(SectionId::Projects, 150.0)
            .with(SectionId::Skills, 300.0)
            .with(SectionId::Education, 420.0)
            .with(SectionId::Contact, 550.0);

        let reading = ScrollTracker::new(100.0).read(600.0, &offsets);

        assert!(reading.is_scrolled);
        assert_eq!(reading.active_section, SectionId::Contact);
    }

    #[test]
    fn scrolled_flag_is_strictly_past_threshold() {
        let tracker = ScrollTracker::default();

        assert!(!tracker.read(50.0, &page_offsets()).is_scrolled);
        assert!(tracker.read(50.5, &page_offsets()).is_scrolled);
    }

    #[test]
    fn boundary_is_inclusive() {
        let tracker = ScrollTracker::new(120.0);

        assert_eq!(tracker.active_section(579.0, &page_offsets()), SectionId::Home);
        assert_eq!(tracker.active_section(580.0, &page_offsets()), SectionId::Projects);
    }

    #[test]
    fn scrolling_down_never_moves_the_active_section_up() {
        let tracker = ScrollTracker::default();
        let offsets = page_offsets();
        let mut previous = SectionId::Home.index();

        for step in 0..=400 {
            let scroll_y = f64::from(step) * 10.0;
            let current = tracker.active_section(scroll_y, &offsets).index();
            assert!(current >= previous, "regressed at scroll_y={scroll_y}");
            previous = current;
        }

        assert_eq!(previous, SectionId::Contact.index());
    }

    #[test]
    fn unmounted_sections_are_skipped() {
        let offsets = SectionOffsets::new()
            .with(SectionId::Home, 0.0)
            .with(SectionId::Projects, 700.0);

        let active = ScrollTracker::default().active_section(5_000.0, &offsets);

        assert_eq!(active, SectionId::Projects);
    }

    #[test]
    fn nothing_mounted_defaults_to_home() {
        let active = ScrollTracker::default().active_section(5_000.0, &SectionOffsets::new());

        assert_eq!(active, SectionId::Home);
    }

    #[test]
    fn burst_of_events_schedules_one_frame() {
        let mut coalescer = FrameCoalescer::new();
        let mut requested = 0;

        let scheduled: Vec<bool> = (0..5)
            .map(|_| {
                coalescer.schedule(|| {
                    requested += 1;
                    requested
                })
            })
            .collect();

        assert_eq!(scheduled, vec![true, false, false, false, false]);
        assert_eq!(requested, 1);
        assert_eq!(coalescer.complete(), Some(1));
        assert_eq!(coalescer.complete(), None);

        assert!(coalescer.schedule(|| 2));
        assert_eq!(coalescer.complete(), Some(2));
    }
}
