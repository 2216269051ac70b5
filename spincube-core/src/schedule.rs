/// Frame scheduling: when the next step runs, and whether it runs at all
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::animation::Animation;
use crate::surface::Surface;

/// What a scheduler decided after waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

/// Decides when the next frame is due.
///
/// `wait` is called once before every frame, including the first.
pub trait Scheduler {
    fn wait(&mut self, delay: Duration) -> Tick;
}

/// Shared flag that asks a running loop to stop after the current frame.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Sleeps on the calling thread between frames.
///
/// Delays are measured from the end of the previous wait, so a slow frame
/// eats into the next delay. Overruns are not caught up.
#[derive(Debug, Default)]
pub struct RealTimeScheduler {
    frame_limit: Option<u64>,
    frames: u64,
    stop: Option<StopHandle>,
    last_wake: Option<Instant>,
}

impl RealTimeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = Some(stop);
        self
    }

    fn should_stop(&self) -> bool {
        self.stop.as_ref().is_some_and(StopHandle::is_stopped)
            || self.frame_limit.is_some_and(|limit| self.frames >= limit)
    }
}

impl Scheduler for RealTimeScheduler {
    fn wait(&mut self, delay: Duration) -> Tick {
        if self.should_stop() {
            return Tick::Stop;
        }

        let busy = self.last_wake.map(|t| t.elapsed()).unwrap_or_default();
        if busy > delay {
            warn!(?busy, ?delay, "frame overran its budget");
        }
        thread::sleep(delay.saturating_sub(busy));

        if self.should_stop() {
            return Tick::Stop;
        }
        self.frames += 1;
        self.last_wake = Some(Instant::now());
        Tick::Continue
    }
}

/// Runs a fixed number of frames without touching the wall clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedStepScheduler {
    remaining: u64,
    elapsed: Duration,
}

impl FixedStepScheduler {
    pub fn new(frames: u64) -> Self {
        Self {
            remaining: frames,
            elapsed: Duration::ZERO,
        }
    }

    /// Virtual time the loop would have spent waiting
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Scheduler for FixedStepScheduler {
    fn wait(&mut self, delay: Duration) -> Tick {
        if self.remaining == 0 {
            return Tick::Stop;
        }
        self.remaining -= 1;
        self.elapsed += delay;
        Tick::Continue
    }
}

/// Lifecycle of a [`FrameLoop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Waiting for the first frame
    Idle,
    /// Stepping once per frame delay
    Running,
    /// The scheduler said stop
    Stopped,
}

/// Drives an [`Animation`] against a surface under a [`Scheduler`].
#[derive(Debug)]
pub struct FrameLoop<S> {
    scheduler: S,
    phase: LoopPhase,
    frames: u64,
}

impl<S: Scheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            phase: LoopPhase::Idle,
            frames: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Wait for the next frame and step once. Returns `false` once stopped.
    pub fn tick<D: Surface + ?Sized>(&mut self, animation: &mut Animation, surface: &mut D) -> bool {
        if self.phase == LoopPhase::Stopped {
            return false;
        }

        match self.scheduler.wait(animation.frame_delay()) {
            Tick::Stop => {
                self.phase = LoopPhase::Stopped;
                info!(frames = self.frames, "animation loop stopped");
                false
            }
            Tick::Continue => {
                if self.phase == LoopPhase::Idle {
                    info!(fps = animation.fps(), "animation loop running");
                    self.phase = LoopPhase::Running;
                }
                animation.step(surface);
                self.frames += 1;
                true
            }
        }
    }

    /// Step until the scheduler stops the loop; returns the number of frames run.
    pub fn run<D: Surface + ?Sized>(&mut self, animation: &mut Animation, surface: &mut D) -> u64 {
        while self.tick(animation, surface) {}
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_fixed_step_runs_exact_frames() {
        let mut animation = Animation::default();
        let mut surface = RecordingSurface::new();
        let mut frame_loop = FrameLoop::new(FixedStepScheduler::new(3));

        assert_eq!(frame_loop.phase(), LoopPhase::Idle);
        assert_eq!(frame_loop.run(&mut animation, &mut surface), 3);
        assert_eq!(frame_loop.phase(), LoopPhase::Stopped);
        assert_eq!(surface.clears().count(), 3);
        assert_eq!(surface.lines().count(), 48);
        assert_eq!(frame_loop.scheduler().elapsed(), animation.frame_delay() * 3);
    }

    #[test]
    fn test_phase_transitions() {
        let mut animation = Animation::default();
        let mut surface = RecordingSurface::new();
        let mut frame_loop = FrameLoop::new(FixedStepScheduler::new(1));

        assert!(frame_loop.tick(&mut animation, &mut surface));
        assert_eq!(frame_loop.phase(), LoopPhase::Running);
        assert!(!frame_loop.tick(&mut animation, &mut surface));
        assert_eq!(frame_loop.phase(), LoopPhase::Stopped);
        assert!(!frame_loop.tick(&mut animation, &mut surface));
        assert_eq!(frame_loop.frames(), 1);
    }

    #[test]
    fn test_zero_frames_never_draws() {
        let mut animation = Animation::default();
        let mut surface = RecordingSurface::new();
        let frames = FrameLoop::new(FixedStepScheduler::new(0)).run(&mut animation, &mut surface);

        assert_eq!(frames, 0);
        assert!(surface.calls().is_empty());
        assert_eq!(animation.state().angle, 0.0);
    }

    #[test]
    fn test_stop_handle_halts_real_time_loop() {
        let stop = StopHandle::new();
        stop.stop();
        let mut animation = Animation::default();
        let mut surface = RecordingSurface::new();
        let scheduler = RealTimeScheduler::new().with_stop_handle(stop.clone());

        assert_eq!(FrameLoop::new(scheduler).run(&mut animation, &mut surface), 0);
        assert!(stop.is_stopped());
    }

    #[test]
    fn test_real_time_frame_limit() {
        let mut animation = Animation::default().with_fps(1000);
        let mut surface = RecordingSurface::new();
        let scheduler = RealTimeScheduler::new().with_frame_limit(2);

        assert_eq!(FrameLoop::new(scheduler).run(&mut animation, &mut surface), 2);
        assert_eq!(surface.clears().count(), 2);
    }
}
