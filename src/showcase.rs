//! The showcase state machine.
//!
//! `Showcase` owns the navigation state of the full-screen carousel and
//! implements every transition synchronously. It knows nothing about time:
//! each operation reports whether a transition started so the driver in
//! `controller.rs` can arm the lockout, and `finish_transition` is the only
//! way the lock is released.
//!
//! Invalid requests (out of range, same slide, while locked) are silent no-ops.

use std::ops::Index;

use log::{debug, info, trace};

use crate::errors::CatalogError;
use crate::model::{Direction, ShowcaseSnapshot};

/// Ordered, non-empty, fixed-length list of slides.
#[derive(Clone, Debug)]
pub struct SlideSequence<T> {
    slides: Vec<T>,
}

impl<T> SlideSequence<T> {
    /// # Errors
    /// Returns `CatalogError::EmptySequence` when `slides` is empty.
    #[must_use = "building a sequence can fail, the Result must be handled"]
    pub fn new(slides: Vec<T>) -> Result<Self, CatalogError> {
        if slides.is_empty() {
            return Err(CatalogError::EmptySequence);
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

}

impl<T> Index<usize> for SlideSequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.slides[index]
    }
}

/// Navigation state for a sequence of `len` slides.
#[derive(Clone, Debug)]
pub struct Showcase {
    len: usize,
    current_index: usize,
    direction: Direction,
    is_transitioning: bool,
    is_auto_playing: bool,
    has_completed_cycle: bool,
    is_paused: bool,
}

impl Showcase {
    /// Starts at slide 0, unlocked, with autoplay on.
    pub fn new<T>(sequence: &SlideSequence<T>) -> Self {
        Self::with_len(sequence.len())
    }

    fn with_len(len: usize) -> Self {
        debug!("Initializing showcase with {} slide(s).", len);
        Self {
            len,
            current_index: 0,
            direction: Direction::Forward,
            is_transitioning: false,
            is_auto_playing: true,
            has_completed_cycle: false,
            is_paused: false,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.len
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn is_auto_playing(&self) -> bool {
        self.is_auto_playing
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Autoplay may be armed: enabled, unlocked and not hover-paused.
    pub fn autoplay_eligible(&self) -> bool {
        self.is_auto_playing && !self.is_transitioning && !self.is_paused
    }

    pub fn snapshot(&self) -> ShowcaseSnapshot {
        ShowcaseSnapshot {
            current_index: self.current_index,
            direction: self.direction,
            is_transitioning: self.is_transitioning,
            is_auto_playing: self.is_auto_playing,
            has_completed_cycle: self.has_completed_cycle,
            is_paused: self.is_paused,
            slide_count: self.len,
        }
    }

    /// Moves to `target` and takes the transition lock.
    ///
    /// Without an explicit `direction`, moving to a higher index is forward and
    /// anything else is backward. Returns `true` if a transition started.
    pub fn go_to_slide(&mut self, target: usize, direction: Option<Direction>) -> bool {
        if target >= self.len || target == self.current_index || self.is_transitioning {
            trace!(
                "Ignoring go_to_slide({}) at index {} (transitioning: {}).",
                target, self.current_index, self.is_transitioning
            );
            return false;
        }

        let direction = direction.unwrap_or(if target > self.current_index {
            Direction::Forward
        } else {
            Direction::Backward
        });
        debug!("Slide {} -> {} ({}).", self.current_index, target, direction);

        self.is_transitioning = true;
        self.direction = direction;
        self.current_index = target;

        if target == self.len - 1 && !self.has_completed_cycle {
            info!("Last slide reached, showcase cycle completed.");
            self.has_completed_cycle = true;
        }
        true
    }

    /// Next slide; wraps to the first only while autoplay is on.
    pub fn advance(&mut self) -> bool {
        let next = self.current_index + 1;
        if next < self.len {
            self.go_to_slide(next, Some(Direction::Forward))
        } else if self.is_auto_playing {
            self.go_to_slide(0, Some(Direction::Forward))
        } else {
            trace!("At last slide with autoplay off, not looping.");
            false
        }
    }

    /// Previous slide; always wraps to the last.
    pub fn retreat(&mut self) -> bool {
        match self.current_index.checked_sub(1) {
            Some(prev) => self.go_to_slide(prev, Some(Direction::Backward)),
            None => self.go_to_slide(self.len - 1, Some(Direction::Backward)),
        }
    }

    /// Flips autoplay and returns the new value.
    pub fn toggle_auto_play(&mut self) -> bool {
        self.is_auto_playing = !self.is_auto_playing;
        info!("Autoplay {}.", if self.is_auto_playing { "enabled" } else { "disabled" });
        self.is_auto_playing
    }

    /// Autoplay interval elapsed.
    pub fn on_auto_play_tick(&mut self) -> bool {
        if self.is_auto_playing && !self.is_transitioning {
            self.advance()
        } else {
            trace!(
                "Autoplay tick ignored (auto_playing: {}, transitioning: {}).",
                self.is_auto_playing, self.is_transitioning
            );
            false
        }
    }

    /// Lockout expired. Returns `true` if a lock was released.
    pub fn finish_transition(&mut self) -> bool {
        let was_locked = self.is_transitioning;
        self.is_transitioning = false;
        was_locked
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn showcase(len: usize) -> Showcase {
        let sequence = SlideSequence::new((0..len).collect::<Vec<_>>()).unwrap();
        Showcase::new(&sequence)
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = SlideSequence::<u8>::new(Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::EmptySequence));
    }

    #[test]
    fn initial_state() {
        let snap = showcase(4).snapshot();
        assert_eq!(snap.current_index, 0);
        assert_eq!(snap.direction, Direction::Forward);
        assert!(!snap.is_transitioning);
        assert!(snap.is_auto_playing);
        assert!(!snap.has_completed_cycle);
        assert!(!snap.is_paused);
        assert_eq!(snap.slide_count, 4);
    }

    #[test]
    fn go_to_slide_infers_direction() {
        let mut s = showcase(5);
        assert!(s.go_to_slide(3, None));
        assert_eq!(s.snapshot().direction, Direction::Forward);
        s.finish_transition();
        assert!(s.go_to_slide(1, None));
        assert_eq!(s.snapshot().direction, Direction::Backward);
    }

    #[test]
    fn explicit_direction_wins() {
        let mut s = showcase(5);
        assert!(s.go_to_slide(2, Some(Direction::Backward)));
        assert_eq!(s.snapshot().direction, Direction::Backward);
    }

    #[test]
    fn invalid_targets_are_no_ops() {
        let mut s = showcase(3);
        assert!(!s.go_to_slide(3, None));
        assert!(!s.go_to_slide(0, None));
        assert_eq!(s.snapshot(), showcase(3).snapshot());
    }

    #[test]
    fn lock_is_released_only_by_finish_transition() {
        let mut s = showcase(3);
        assert!(s.advance());
        assert!(!s.advance());
        assert!(!s.retreat());
        assert_eq!(s.current_index(), 1);
        assert!(s.finish_transition());
        assert!(!s.finish_transition());
        assert!(s.advance());
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn advance_visits_every_slide_and_latches_completion() {
        let mut s = showcase(5);
        for expected in 1..5 {
            assert!(!s.snapshot().has_completed_cycle);
            assert!(s.advance());
            assert_eq!(s.current_index(), expected);
            s.finish_transition();
        }
        assert!(s.snapshot().has_completed_cycle);

        // Wrap and go backwards; the latch never clears.
        assert!(s.advance());
        s.finish_transition();
        assert!(s.retreat());
        s.finish_transition();
        assert!(s.go_to_slide(1, None));
        assert!(s.snapshot().has_completed_cycle);
    }

    #[test]
    fn retreat_from_first_wraps_to_last() {
        let mut s = showcase(4);
        assert!(s.retreat());
        let snap = s.snapshot();
        assert_eq!(snap.current_index, 3);
        assert_eq!(snap.direction, Direction::Backward);
        assert!(snap.has_completed_cycle);
    }

    #[test]
    fn retreat_wraps_even_with_autoplay_off() {
        let mut s = showcase(4);
        s.toggle_auto_play();
        assert!(s.retreat());
        assert_eq!(s.current_index(), 3);
    }

    #[test]
    fn advance_at_end_without_autoplay_stays_put() {
        let mut s = showcase(3);
        s.go_to_slide(2, None);
        s.finish_transition();
        assert!(!s.toggle_auto_play());
        assert!(!s.advance());
        assert_eq!(s.current_index(), 2);

        assert!(s.toggle_auto_play());
        assert!(s.advance());
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.snapshot().direction, Direction::Forward);
    }

    #[test]
    fn tick_respects_autoplay_and_lock() {
        let mut s = showcase(3);
        assert!(s.on_auto_play_tick());
        assert!(!s.on_auto_play_tick());
        s.finish_transition();
        s.toggle_auto_play();
        assert!(!s.on_auto_play_tick());
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn single_slide_never_transitions() {
        let mut s = showcase(1);
        assert!(!s.advance());
        assert!(!s.retreat());
        assert!(!s.on_auto_play_tick());
        assert!(!s.snapshot().has_completed_cycle);
    }

    #[test]
    fn hover_pause_blocks_eligibility() {
        let mut s = showcase(3);
        assert!(s.autoplay_eligible());
        s.set_paused(true);
        assert!(!s.autoplay_eligible());
        assert!(s.snapshot().is_auto_playing);
    }

    proptest! {
        #[test]
        fn second_request_during_lockout_is_ignored(len in 2usize..32, i in 0usize..64, j in 0usize..64) {
            let i = 1 + i % (len - 1);
            prop_assume!(j != i);
            let mut s = showcase(len);
            prop_assert!(s.go_to_slide(i, None));
            let locked = s.snapshot();
            prop_assert!(!s.go_to_slide(j, None));
            prop_assert_eq!(s.snapshot(), locked);
            prop_assert_eq!(s.current_index(), i);
        }
    }
}
