//! Testimonial carousel state machine.
//!
//! ```text
//!            dwell elapsed / go_to(i)
//!   Idle{a} ──────────────────────────▶ Transitioning{a, i, dir}
//!      ▲                                        │
//!      └──────────── transition elapsed ────────┘  (a := i)
//! ```
//!
//! Time is injected: every method that can start or stop a timer takes the
//! current instant as a [`Duration`] since an arbitrary origin, and
//! [`Carousel::tick`] fires whatever timer is due. The machine owns exactly
//! one timer slot, so starting any timer replaces the previous one and
//! nothing can fire twice.
//!
//! The browser driver in `static/carousel.js` implements the same machine
//! and reads its timings from the `data-*` attributes the renderer emits
//! from [`DWELL`] and [`TRANSITION`].

use std::time::Duration;

/// How long a slide stays before auto-advancing.
pub const DWELL: Duration = Duration::from_millis(3000);
/// How long the slide transition lasts.
pub const TRANSITION: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselState {
    Idle {
        active: usize,
    },
    Transitioning {
        active: usize,
        incoming: usize,
        direction: Direction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Dwell { due: Duration },
    Transition { due: Duration },
}

impl Timer {
    fn due(self) -> Duration {
        match self {
            Timer::Dwell { due } | Timer::Transition { due } => due,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    state: CarouselState,
    hovered: bool,
    timer: Option<Timer>,
}

impl Carousel {
    /// A carousel over `len` items, showing the first one.
    pub fn new(len: usize, now: Duration) -> Self {
        let mut carousel = Self {
            len,
            state: CarouselState::Idle { active: 0 },
            hovered: false,
            timer: None,
        };
        carousel.schedule_dwell(now);
        carousel
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    /// Index of the slide currently shown (the outgoing one mid-transition).
    pub fn active(&self) -> usize {
        match self.state {
            CarouselState::Idle { active } | CarouselState::Transitioning { active, .. } => active,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// When the pending timer fires, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.map(Timer::due)
    }

    /// Jump to `index`. Returns whether a transition started.
    ///
    /// Ignored mid-transition, for the active index, for an index out of
    /// range, and when there are fewer than two items.
    pub fn go_to(&mut self, index: usize, now: Duration) -> bool {
        let active = self.active();
        let direction = if index > active {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.start_transition(index, direction, now)
    }

    /// Fire every timer due at or before `now`, in order.
    pub fn tick(&mut self, now: Duration) {
        while let Some(timer) = self.timer {
            if timer.due() > now {
                break;
            }
            self.timer = None;
            match timer {
                Timer::Dwell { due } => {
                    let next = (self.active() + 1) % self.len.max(1);
                    self.start_transition(next, Direction::Forward, due);
                }
                Timer::Transition { due } => {
                    if let CarouselState::Transitioning { incoming, .. } = self.state {
                        self.state = CarouselState::Idle { active: incoming };
                    }
                    self.schedule_dwell(due);
                }
            }
        }
    }

    /// Pointer entered or left the slide area.
    ///
    /// Hovering cancels a pending dwell; leaving schedules a full new one.
    /// A transition already in flight completes either way.
    pub fn set_hovered(&mut self, hovered: bool, now: Duration) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        if matches!(self.state, CarouselState::Idle { .. }) {
            if hovered {
                self.timer = None;
            } else {
                self.schedule_dwell(now);
            }
        }
    }

    /// The item list changed size.
    ///
    /// If the visible or incoming slide no longer exists the carousel
    /// resets to the first slide.
    pub fn set_len(&mut self, len: usize, now: Duration) {
        self.len = len;
        let out_of_range = match self.state {
            CarouselState::Idle { active } => active >= len,
            CarouselState::Transitioning {
                active, incoming, ..
            } => active >= len || incoming >= len,
        };
        if out_of_range {
            self.state = CarouselState::Idle { active: 0 };
            self.schedule_dwell(now);
        } else if matches!(self.state, CarouselState::Idle { .. }) && self.timer.is_none() {
            self.schedule_dwell(now);
        } else if len < 2 {
            self.timer = None;
        }
    }

    /// Clear the timer slot; nothing fires after this.
    pub fn teardown(&mut self) {
        self.timer = None;
    }

    fn start_transition(&mut self, target: usize, direction: Direction, now: Duration) -> bool {
        let CarouselState::Idle { active } = self.state else {
            return false;
        };
        if self.len < 2 || target == active || target >= self.len {
            return false;
        }
        self.state = CarouselState::Transitioning {
            active,
            incoming: target,
            direction,
        };
        self.timer = Some(Timer::Transition {
            due: now + TRANSITION,
        });
        true
    }

    /// Arm the dwell timer if the carousel should auto-advance; clear it
    /// otherwise.
    fn schedule_dwell(&mut self, now: Duration) {
        let idle = matches!(self.state, CarouselState::Idle { .. });
        self.timer = (idle && self.len >= 2 && !self.hovered).then_some(Timer::Dwell { due: now + DWELL });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn idle(active: usize) -> CarouselState {
        CarouselState::Idle { active }
    }

    #[test]
    fn go_to_active_index_is_ignored() {
        let mut c = Carousel::new(3, ms(0));
        assert!(!c.go_to(0, ms(10)));
        assert_eq!(c.state(), idle(0));
        assert_eq!(c.next_deadline(), Some(ms(3000)));
    }

    #[test]
    fn go_to_while_transitioning_is_ignored() {
        let mut c = Carousel::new(3, ms(0));
        assert!(c.go_to(1, ms(100)));
        assert!(!c.go_to(2, ms(200)));
        assert_eq!(
            c.state(),
            CarouselState::Transitioning {
                active: 0,
                incoming: 1,
                direction: Direction::Forward
            }
        );

        c.tick(ms(1600));
        assert_eq!(c.state(), idle(1));
        assert!(c.go_to(2, ms(1700)));
        c.tick(ms(3200));
        assert_eq!(c.state(), idle(2));
    }

    #[test]
    fn go_to_lower_index_goes_backward() {
        let mut c = Carousel::new(3, ms(0));
        c.go_to(2, ms(0));
        c.tick(ms(1500));
        c.go_to(0, ms(1500));
        assert_eq!(
            c.state(),
            CarouselState::Transitioning {
                active: 2,
                incoming: 0,
                direction: Direction::Backward
            }
        );
    }

    #[test]
    fn out_of_range_and_single_item_ignored() {
        let mut c = Carousel::new(3, ms(0));
        assert!(!c.go_to(3, ms(0)));

        let mut single = Carousel::new(1, ms(0));
        assert_eq!(single.next_deadline(), None);
        assert!(!single.go_to(0, ms(0)));
        single.tick(ms(100_000));
        assert_eq!(single.state(), idle(0));
    }

    #[test]
    fn auto_advance_wraps_forward() {
        let mut c = Carousel::new(2, ms(0));
        c.tick(ms(3000));
        assert!(matches!(c.state(), CarouselState::Transitioning { incoming: 1, .. }));
        c.tick(ms(4500));
        assert_eq!(c.state(), idle(1));
        assert_eq!(c.next_deadline(), Some(ms(7500)));
        c.tick(ms(7500));
        assert_eq!(
            c.state(),
            CarouselState::Transitioning {
                active: 1,
                incoming: 0,
                direction: Direction::Forward
            }
        );
    }

    #[test]
    fn one_tick_can_fire_a_chain_of_timers() {
        let mut c = Carousel::new(3, ms(0));
        // 3000 dwell, 4500 arrive at 1, 7500 dwell, 9000 arrive at 2
        c.tick(ms(9000));
        assert_eq!(c.state(), idle(2));
        assert_eq!(c.next_deadline(), Some(ms(12_000)));
    }

    #[test]
    fn hover_pauses_and_resumes_with_full_dwell() {
        let mut c = Carousel::new(3, ms(0));
        c.set_hovered(true, ms(2900));
        assert_eq!(c.next_deadline(), None);
        c.tick(ms(10_000));
        assert_eq!(c.state(), idle(0));

        c.set_hovered(false, ms(10_000));
        assert_eq!(c.next_deadline(), Some(ms(13_000)));
    }

    #[test]
    fn transition_completes_while_hovered_without_new_dwell() {
        let mut c = Carousel::new(3, ms(0));
        c.go_to(1, ms(0));
        c.set_hovered(true, ms(100));
        assert_eq!(c.next_deadline(), Some(ms(1500)));
        c.tick(ms(1500));
        assert_eq!(c.state(), idle(1));
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn shrinking_resets_to_first_slide() {
        let mut c = Carousel::new(4, ms(0));
        c.go_to(3, ms(0));
        c.tick(ms(1500));
        c.set_len(2, ms(2000));
        assert_eq!(c.state(), idle(0));
        assert_eq!(c.next_deadline(), Some(ms(5000)));

        c.set_len(1, ms(2100));
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn growing_from_one_item_starts_dwell() {
        let mut c = Carousel::new(1, ms(0));
        c.set_len(3, ms(50));
        assert_eq!(c.next_deadline(), Some(ms(3050)));
    }

    #[test]
    fn teardown_clears_timer() {
        let mut c = Carousel::new(3, ms(0));
        c.go_to(1, ms(0));
        c.teardown();
        assert_eq!(c.next_deadline(), None);
        c.tick(ms(60_000));
        assert!(matches!(c.state(), CarouselState::Transitioning { .. }));
    }
}
