// Self-rescheduling frame loop over an injectable scheduler, so the loop can
// be driven by requestAnimationFrame in the browser and by hand in tests.

pub type FrameHandle = i32;

pub trait Scheduler {
    // Asks for one callback on the next frame. `None` means the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait Animate {
    // One frame: advance the simulation, then draw it
    fn frame(&mut self);
}

#[derive(Debug, Default)]
pub struct AnimationLoop {
    pending: Option<FrameHandle>,
    running: bool,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        AnimationLoop::default()
    }

    // Starts the loop; calling it on a running loop does nothing
    pub fn run<S: Scheduler>(&mut self, scheduler: &mut S) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("frame request refused, animation not started");
            self.running = false;
        }
    }

    // Called from the scheduled callback. Returns whether a frame ran.
    pub fn tick<S: Scheduler, A: Animate>(&mut self, scheduler: &mut S, scene: &mut A) -> bool {
        self.pending = None;
        if !self.running {
            return false;
        }
        scene.frame();
        self.frames += 1;
        self.pending = scheduler.request_frame();
        if self.pending.is_none() {
            self.running = false;
        }
        true
    }

    // Halts rescheduling and releases the pending frame request
    pub fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ManualScheduler {
        next: FrameHandle,
        pending: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
        refuse: bool,
    }

    impl Scheduler for ManualScheduler {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            if self.refuse {
                return None;
            }
            self.next += 1;
            self.pending.push(self.next);
            Some(self.next)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.pending.retain(|h| *h != handle);
            self.cancelled.push(handle);
        }
    }

    impl ManualScheduler {
        // Fires every pending callback once
        fn pump(&mut self, lp: &mut AnimationLoop, scene: &mut Counter) {
            let due: Vec<FrameHandle> = self.pending.drain(..).collect();
            for _ in due {
                lp.tick(self, scene);
            }
        }
    }

    #[derive(Default)]
    struct Counter(u32);

    impl Animate for Counter {
        fn frame(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn runs_one_frame_per_callback() {
        let mut sched = ManualScheduler::default();
        let mut lp = AnimationLoop::new();
        let mut scene = Counter::default();

        lp.run(&mut sched);
        lp.run(&mut sched);
        assert_eq!(sched.pending.len(), 1);

        for _ in 0..5 {
            sched.pump(&mut lp, &mut scene);
        }
        assert_eq!(scene.0, 5);
        assert_eq!(lp.frames(), 5);
        assert_eq!(sched.pending.len(), 1);
    }

    #[test]
    fn stop_cancels_and_halts() {
        let mut sched = ManualScheduler::default();
        let mut lp = AnimationLoop::new();
        let mut scene = Counter::default();

        lp.run(&mut sched);
        sched.pump(&mut lp, &mut scene);
        lp.stop(&mut sched);

        assert!(!lp.is_running());
        assert!(sched.pending.is_empty());
        assert_eq!(sched.cancelled, vec![2]);

        // A callback already in flight must not draw or reschedule
        assert!(!lp.tick(&mut sched, &mut scene));
        assert_eq!(scene.0, 1);
        assert!(sched.pending.is_empty());
    }

    #[test]
    fn refused_request_leaves_loop_stopped() {
        let mut sched = ManualScheduler {
            refuse: true,
            ..ManualScheduler::default()
        };
        let mut lp = AnimationLoop::new();
        lp.run(&mut sched);
        assert!(!lp.is_running());
    }
}
