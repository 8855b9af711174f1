//! Hero slider interaction state machine.
//!
//! The slider is either autoplaying, paused (hover/focus, or the short hold
//! after a drag), or dragging. All transitions are driven by explicit events
//! so the same model can render the initial server markup and be unit tested
//! without a browser. Time is passed in by the caller.
//!
//! The server only renders the initial position. In the browser the same
//! transitions run in `views::catalog::SLIDER_SCRIPT`, which takes its
//! threshold, resume delay and snap transition from the constants below via
//! data attributes. The event methods are the reference model for that
//! script and are exercised by the tests.
#![cfg_attr(not(test), allow(dead_code))]

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

use std::time::{Duration, Instant};

/// Horizontal distance a release must exceed to commit a slide change.
pub const DRAG_THRESHOLD_PX: f64 = 50.0;
/// Autoplay stays paused this long after a drag release.
pub const RESUME_DELAY: Duration = Duration::from_millis(250);
pub const SNAP_TRANSITION: &str = "transform 450ms ease";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Autoplaying,
    Paused,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// Track position to apply after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub index: usize,
    /// Live drag offset as a percentage of the track width.
    pub offset_pct: f64,
    /// Snap transitions animate; live drag updates do not.
    pub animated: bool,
}

impl Transform {
    #[must_use]
    pub fn css(&self) -> String {
        let base = track_offset(self.index);
        if self.offset_pct == 0.0 {
            format!("translateX({base}%)")
        } else {
            format!("translateX(calc({base}% + {}%))", self.offset_pct)
        }
    }

    #[must_use]
    pub fn transition(&self) -> &'static str {
        if self.animated { SNAP_TRANSITION } else { "none" }
    }
}

fn track_offset(index: usize) -> String {
    if index == 0 { "0".to_owned() } else { format!("-{}", index * 100) }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f64,
    delta_x: f64,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    count: usize,
    index: usize,
    paused: bool,
    drag: Option<Drag>,
    resume_at: Option<Instant>,
}

impl Carousel {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count, index: 0, paused: false, drag: None, resume_at: None }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Arrows and dots only make sense with more than one slide.
    #[must_use]
    pub fn has_controls(&self) -> bool {
        self.count > 1
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.drag.is_some() {
            Phase::Dragging
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Autoplaying
        }
    }

    /// Wrap any signed index into `0..count`.
    fn wrap(&self, i: isize) -> usize {
        if self.count == 0 {
            return 0;
        }
        let n = isize::try_from(self.count).unwrap_or(isize::MAX);
        usize::try_from(i.rem_euclid(n)).unwrap_or(0)
    }

    fn signed_index(&self) -> isize {
        isize::try_from(self.index).unwrap_or(0)
    }

    pub fn go_to(&mut self, i: usize) {
        self.index = self.wrap(isize::try_from(i).unwrap_or(0));
    }

    pub fn next(&mut self) {
        self.index = self.wrap(self.signed_index() + 1);
    }

    pub fn prev(&mut self) {
        self.index = self.wrap(self.signed_index() - 1);
    }

    /// Autoplay interval elapsed. Returns whether the slide advanced.
    pub fn tick(&mut self) -> bool {
        if self.count < 2 || self.phase() != Phase::Autoplaying {
            return false;
        }
        self.next();
        true
    }

    pub fn key(&mut self, key: Key) {
        if self.count <= 1 {
            return;
        }
        match key {
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::Other => {}
        }
    }

    /// Pointer entered (or focus moved into) the slider.
    pub fn hover(&mut self, inside: bool) {
        self.paused = inside;
        self.resume_at = None;
    }

    /// Start a drag. Ignored with fewer than two slides.
    pub fn pointer_down(&mut self, x: f64) -> bool {
        if self.count <= 1 {
            return false;
        }
        self.paused = true;
        self.resume_at = None;
        self.drag = Some(Drag { start_x: x, delta_x: 0.0 });
        true
    }

    /// Follow the pointer. Returns the live, non-animated transform.
    pub fn pointer_move(&mut self, x: f64, track_width: f64) -> Option<Transform> {
        let drag = self.drag.as_mut()?;
        if track_width <= 0.0 {
            return None;
        }
        drag.delta_x = x - drag.start_x;
        Some(Transform { index: self.index, offset_pct: drag.delta_x / track_width * 100.0, animated: false })
    }

    /// Finish a drag: commit at most one slide change and snap.
    pub fn pointer_up(&mut self, now: Instant) -> Option<Transform> {
        let drag = self.drag.take()?;
        if drag.delta_x > DRAG_THRESHOLD_PX {
            self.prev();
        } else if drag.delta_x < -DRAG_THRESHOLD_PX {
            self.next();
        }
        self.resume_at = Some(now + RESUME_DELAY);
        Some(self.track_transform())
    }

    /// Lift the post-drag pause once its delay has passed.
    pub fn resume_if_due(&mut self, now: Instant) -> bool {
        match self.resume_at {
            Some(at) if now >= at => {
                self.resume_at = None;
                self.paused = false;
                true
            }
            _ => false,
        }
    }

    /// Resting position of the track for the current slide.
    #[must_use]
    pub fn track_transform(&self) -> Transform {
        Transform { index: self.index, offset_pct: 0.0, animated: true }
    }
}
