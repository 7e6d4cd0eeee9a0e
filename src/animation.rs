//! Per-instance animation state: backdrop, pointer, pacing and lifecycle.

use std::time::{Duration, Instant};

use crate::backdrop::Backdrop;
use crate::field::PointerState;
use crate::surface::StrokeSurface;

/// Skips display refreshes to hold a lower frame rate
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Option<Duration>,
    last_frame: Option<Instant>,
}

impl FrameThrottle {
    /// `None` renders on every refresh
    pub fn new(target_fps: Option<u32>) -> Self {
        Self {
            interval: target_fps
                .filter(|&fps| fps > 0)
                .map(|fps| Duration::from_secs_f64(1.0 / fps as f64)),
            last_frame: None,
        }
    }

    /// Whether a frame should be drawn at `now`; records it if so
    pub fn should_render(&mut self, now: Instant) -> bool {
        let due = match (self.interval, self.last_frame) {
            (Some(interval), Some(last)) => now.saturating_duration_since(last) >= interval,
            _ => true,
        };
        if due {
            self.last_frame = Some(now);
        }
        due
    }

    /// Earliest instant the next frame may be drawn; `None` if it already may
    pub fn next_due(&self) -> Option<Instant> {
        match (self.interval, self.last_frame) {
            (Some(interval), Some(last)) => Some(last + interval),
            _ => None,
        }
    }
}

/// One running background
///
/// Owns everything a frame needs, so several instances can coexist and
/// dropping or stopping one leaves nothing behind.
pub struct Animation {
    backdrop: Box<dyn Backdrop>,
    pointer: PointerState,
    throttle: FrameThrottle,
    running: bool,
    frames: u64,
}

impl Animation {
    pub fn new(backdrop: Box<dyn Backdrop>, target_fps: Option<u32>) -> Self {
        Self {
            backdrop,
            pointer: PointerState::new(),
            throttle: FrameThrottle::new(target_fps),
            running: true,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    pub(crate) fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Input handlers write here; ignored once stopped
    pub fn pointer_mut(&mut self) -> Option<&mut PointerState> {
        self.running.then_some(&mut self.pointer)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if self.running {
            self.backdrop.resize(width, height);
        }
    }

    /// Draw a frame if running and the throttle allows; returns whether one was drawn
    pub fn tick(&mut self, now: Instant, surface: &mut dyn StrokeSurface) -> bool {
        if !self.running || !self.throttle.should_render(now) {
            return false;
        }
        self.backdrop.render_frame(&self.pointer, surface);
        self.frames += 1;
        true
    }

    /// When the throttle next lets a frame through; `None` means right away
    pub fn next_frame_due(&self) -> Option<Instant> {
        self.throttle.next_due()
    }

    /// Tear down: no further frames, pointer back to far away
    pub fn stop(&mut self) {
        if self.running {
            log::info!("animation stopped after {} frames", self.frames);
        }
        self.running = false;
        self.pointer.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::Segment;
    use crate::params::{Color, LineStyle};
    use glam::Vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts frames and remembers the last pointer it saw
    struct Probe {
        frames: Rc<Cell<u32>>,
        last_pointer: Rc<Cell<Vec2>>,
    }

    impl Backdrop for Probe {
        fn resize(&mut self, _width: f32, _height: f32) {}

        fn render_frame(&mut self, pointer: &PointerState, _surface: &mut dyn StrokeSurface) {
            self.frames.set(self.frames.get() + 1);
            self.last_pointer.set(pointer.position());
        }
    }

    struct Null;

    impl StrokeSurface for Null {
        fn fill(&mut self, _color: Color) {}
        fn stroke_path(&mut self, _segments: &[Segment], _style: &LineStyle) {}
    }

    fn probe(target_fps: Option<u32>) -> (Animation, Rc<Cell<u32>>, Rc<Cell<Vec2>>) {
        let frames = Rc::new(Cell::new(0));
        let last_pointer = Rc::new(Cell::new(Vec2::ZERO));
        let backdrop = Probe {
            frames: Rc::clone(&frames),
            last_pointer: Rc::clone(&last_pointer),
        };
        (Animation::new(Box::new(backdrop), target_fps), frames, last_pointer)
    }

    #[test]
    fn test_unthrottled_renders_every_tick() {
        let (mut animation, frames, _) = probe(None);
        let now = Instant::now();
        for _ in 0..5 {
            assert!(animation.tick(now, &mut Null));
        }
        assert_eq!(frames.get(), 5);
        assert_eq!(animation.frames(), 5);
    }

    #[test]
    fn test_throttle_skips_early_frames() {
        let mut throttle = FrameThrottle::new(Some(30));
        let t0 = Instant::now();
        assert!(throttle.should_render(t0));
        // 60 Hz refresh: every other frame is skipped
        assert!(!throttle.should_render(t0 + Duration::from_micros(16_667)));
        assert!(throttle.should_render(t0 + Duration::from_micros(33_334)));
        assert!(!throttle.should_render(t0 + Duration::from_micros(50_000)));
    }

    #[test]
    fn test_next_due_follows_last_frame() {
        let t0 = Instant::now();

        let mut unthrottled = FrameThrottle::new(None);
        unthrottled.should_render(t0);
        assert_eq!(unthrottled.next_due(), None);

        let mut throttle = FrameThrottle::new(Some(20));
        assert_eq!(throttle.next_due(), None);
        throttle.should_render(t0);
        let due = t0 + Duration::from_millis(50);
        assert_eq!(throttle.next_due(), Some(due));

        // A skipped refresh does not move the deadline
        assert!(!throttle.should_render(t0 + Duration::from_millis(10)));
        assert_eq!(throttle.next_due(), Some(due));
        assert!(throttle.should_render(due));
        assert_eq!(throttle.next_due(), Some(due + Duration::from_millis(50)));
    }

    #[test]
    fn test_animation_reports_next_frame() {
        let (mut animation, _, _) = probe(Some(10));
        assert_eq!(animation.next_frame_due(), None);
        let t0 = Instant::now();
        animation.tick(t0, &mut Null);
        assert_eq!(animation.next_frame_due(), Some(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_pointer_reaches_backdrop() {
        let (mut animation, _, last_pointer) = probe(None);
        if let Some(pointer) = animation.pointer_mut() {
            pointer.move_to(Vec2::new(42.0, 7.0));
        }
        animation.tick(Instant::now(), &mut Null);
        assert_eq!(last_pointer.get(), Vec2::new(42.0, 7.0));
    }

    #[test]
    fn test_stop_ends_frames_and_input() {
        let (mut animation, frames, _) = probe(None);
        animation.tick(Instant::now(), &mut Null);
        animation.stop();

        assert!(!animation.is_running());
        assert!(!animation.tick(Instant::now(), &mut Null));
        assert!(animation.pointer_mut().is_none());
        assert!(!animation.pointer().is_active());
        assert_eq!(frames.get(), 1);
    }
}
