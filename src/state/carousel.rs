/// Auto-advancing media carousel
///
/// Manual navigation and timer ticks both go through `step`, the single
/// mutation point for the slide index. The recurring timer is a chain of
/// one-shot sleeps; each live tick returns the ticket for the next sleep.

use std::time::Duration;

use super::schedule::{Generations, Ticket};

/// Carousel auto-advance interval
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideState {
    /// No media to show
    Inactive,
    AtIndex(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

#[derive(Debug)]
pub struct Carousel {
    len: usize,
    state: SlideState,
    interval: Duration,
    timer: Generations,
    running: bool,
}

impl Carousel {
    pub fn new(interval: Duration) -> Self {
        Self {
            len: 0,
            state: SlideState::Inactive,
            interval,
            timer: Generations::new(),
            running: false,
        }
    }

    pub fn state(&self) -> SlideState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current slide, if any
    pub fn index(&self) -> Option<usize> {
        match self.state {
            SlideState::Inactive => None,
            SlideState::AtIndex(i) => Some(i),
        }
    }

    /// Previous/next controls are shown only for two or more slides
    pub fn shows_controls(&self) -> bool {
        self.len > 1
    }

    /// Horizontal translation of the slide strip, in percent of one slide
    pub fn offset_percent(&self) -> f32 {
        self.index().map_or(0.0, |i| i as f32 * 100.0)
    }

    /// Apply one transition; a no-op for fewer than two slides
    pub fn step(&mut self, step: Step) {
        let SlideState::AtIndex(i) = self.state else {
            return;
        };
        if self.len <= 1 {
            return;
        }
        let next = match step {
            Step::Next => (i + 1) % self.len,
            Step::Previous => (i + self.len - 1) % self.len,
        };
        self.state = SlideState::AtIndex(next);
    }

    /// Load a media sequence of `len` slides and (re)arm the timer
    ///
    /// Returns the ticket for the first tick, or `None` when there is
    /// nothing to show.
    pub fn load(&mut self, len: usize) -> Option<Ticket> {
        self.len = len;
        self.state = match (len, self.state) {
            (0, _) => SlideState::Inactive,
            (_, SlideState::AtIndex(i)) if i < len => SlideState::AtIndex(i),
            _ => SlideState::AtIndex(0),
        };

        if len == 0 {
            self.stop();
            return None;
        }
        self.running = true;
        Some(self.timer.issue())
    }

    /// Handle a timer tick; returns the ticket for the next tick when live
    pub fn tick(&mut self, ticket: Ticket) -> Option<Ticket> {
        if !self.running || !self.timer.is_live(ticket) {
            return None;
        }
        self.step(Step::Next);
        Some(ticket)
    }

    /// Cancel the timer and forget the sequence
    pub fn stop(&mut self) {
        self.running = false;
        self.timer.cancel();
        self.len = 0;
        self.state = SlideState::Inactive;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_around() {
        let mut carousel = Carousel::default();
        carousel.load(3);
        assert_eq!(carousel.state(), SlideState::AtIndex(0));

        carousel.step(Step::Next);
        carousel.step(Step::Next);
        carousel.step(Step::Next);
        assert_eq!(carousel.state(), SlideState::AtIndex(0));
    }

    #[test]
    fn test_previous_from_first_goes_to_last() {
        let mut carousel = Carousel::default();
        carousel.load(3);
        carousel.step(Step::Previous);
        assert_eq!(carousel.state(), SlideState::AtIndex(2));
    }

    #[test]
    fn test_single_slide_is_fixed_and_has_no_controls() {
        let mut carousel = Carousel::default();
        carousel.load(1);
        carousel.step(Step::Next);
        carousel.step(Step::Previous);
        assert_eq!(carousel.state(), SlideState::AtIndex(0));
        assert!(!carousel.shows_controls());
    }

    #[test]
    fn test_empty_sequence_is_inactive() {
        let mut carousel = Carousel::default();
        assert_eq!(carousel.load(0), None);
        assert_eq!(carousel.state(), SlideState::Inactive);
        assert!(!carousel.shows_controls());
        carousel.step(Step::Next);
        assert_eq!(carousel.index(), None);
    }

    #[test]
    fn test_tick_advances_and_rearms() {
        let mut carousel = Carousel::default();
        let ticket = carousel.load(2).expect("timer armed");
        let next = carousel.tick(ticket);
        assert_eq!(next, Some(ticket));
        assert_eq!(carousel.index(), Some(1));
    }

    #[test]
    fn test_manual_and_timer_steps_share_one_path() {
        let mut carousel = Carousel::default();
        let ticket = carousel.load(3).expect("timer armed");
        carousel.step(Step::Next);
        carousel.tick(ticket);
        assert_eq!(carousel.index(), Some(2));
    }

    #[test]
    fn test_reload_invalidates_previous_timer() {
        let mut carousel = Carousel::default();
        let stale = carousel.load(3).expect("timer armed");
        let fresh = carousel.load(4).expect("timer rearmed");
        assert_eq!(carousel.tick(stale), None);
        assert_eq!(carousel.index(), Some(0));
        assert_eq!(carousel.tick(fresh), Some(fresh));
        assert_eq!(carousel.index(), Some(1));
    }

    #[test]
    fn test_tick_from_another_carousel_is_ignored() {
        let mut previous = Carousel::default();
        let stale = previous.load(3).expect("timer armed");
        previous.stop();

        let mut current = Carousel::default();
        let live = current.load(3).expect("timer armed");
        assert_eq!(current.tick(stale), None);
        assert_eq!(current.index(), Some(0));
        assert_eq!(current.tick(live), Some(live));
        assert_eq!(current.index(), Some(1));
    }

    #[test]
    fn test_shrinking_sequence_resets_out_of_range_index() {
        let mut carousel = Carousel::default();
        carousel.load(4);
        carousel.step(Step::Previous);
        assert_eq!(carousel.index(), Some(3));
        carousel.load(2);
        assert_eq!(carousel.index(), Some(0));
    }

    #[test]
    fn test_stop_cancels_timer() {
        let mut carousel = Carousel::default();
        let ticket = carousel.load(3).expect("timer armed");
        carousel.stop();
        assert_eq!(carousel.tick(ticket), None);
        assert_eq!(carousel.state(), SlideState::Inactive);
        assert!(!carousel.is_running());
    }

    #[test]
    fn test_offset_follows_index() {
        let mut carousel = Carousel::default();
        assert_eq!(carousel.offset_percent(), 0.0);
        carousel.load(3);
        carousel.step(Step::Previous);
        assert_eq!(carousel.offset_percent(), 200.0);
    }
}
