use std::time::{Duration, Instant};

// ── State ─────────────────────────────────────────────────────────────────────

/// A game state (title screen, level, editor …) driven by a [`GameLoop`].
pub trait State {
    /// Called when the loop switches to this state.
    fn begin(&mut self, _ctx: &mut LoopContext) {}
    /// Called when the loop switches away from this state or stops.
    fn end(&mut self, _ctx: &mut LoopContext) {}
    /// One fixed-length logic update.
    fn frame(&mut self, ctx: &mut LoopContext);
    /// Render. Interpolate with [`LoopContext::alpha`] for smooth motion.
    fn draw(&mut self, _ctx: &LoopContext) {}
}

enum Transition {
    To(Box<dyn State>),
    Quit,
}

/// What a [`State`] can see of and ask from the loop that runs it.
pub struct LoopContext {
    delta_time: f32,
    alpha: f32,
    frame_rate: u32,
    tick: u64,
    pending: Option<Transition>,
}

impl LoopContext {
    /// Seconds simulated by one [`State::frame`]; always `1 / target_rate`.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Fraction of a frame left unsimulated, in `[0, 1)`:
    ///
    /// ```text
    /// x_draw = x_current * alpha + x_previous * (1 - alpha)
    /// ```
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Logic updates run during the last full second of wall time.
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Logic updates run since the loop started.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Switch to `next` after the current update. The last request wins.
    pub fn transition(&mut self, next: Box<dyn State>) {
        self.pending = Some(Transition::To(next));
    }

    /// Stop the loop after the current update.
    pub fn quit(&mut self) {
        self.pending = Some(Transition::Quit);
    }
}

// ── FixedTimestep ─────────────────────────────────────────────────────────────

/// Accumulator that turns variable wall-clock frame times into a whole number
/// of fixed-length updates.
///
/// Time is kept as whole nanoseconds, so `n` updates of `dt` consume exactly
/// `n * dt` and `floor(elapsed / dt)` updates run for a single `elapsed`.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    dt: Duration,
    accumulator: Duration,
    alpha: f32,
    frames: u32,
    frame_clock: Duration,
    frame_rate: u32,
}

impl FixedTimestep {
    /// Longest wall-clock step credited at once; longer stalls are dropped
    /// instead of replayed.
    pub const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

    /// Panics if `target_rate` is zero.
    pub fn new(target_rate: u32) -> Self {
        assert!(target_rate > 0, "target update rate must be positive");
        Self {
            dt: Duration::from_secs(1) / target_rate,
            accumulator: Duration::ZERO,
            alpha: 0.0,
            frames: 0,
            frame_clock: Duration::ZERO,
            frame_rate: 0,
        }
    }

    /// Seconds per update.
    pub fn delta_time(&self) -> f32 {
        self.dt.as_secs_f32()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Credit `elapsed` wall time, clamped to [`Self::MAX_FRAME_TIME`].
    pub fn accumulate(&mut self, elapsed: Duration) {
        self.accumulator += elapsed.min(Self::MAX_FRAME_TIME);
        self.frame_clock += elapsed;
        self.update_alpha();
    }

    /// Consume one update's worth of time. Returns `false` once less than a
    /// full step remains; `alpha` then holds the leftover fraction.
    pub fn step(&mut self) -> bool {
        if self.accumulator < self.dt {
            self.update_alpha();
            if self.frame_clock >= Duration::from_secs(1) {
                self.frame_rate = self.frames;
                self.frames = 0;
                self.frame_clock = Duration::ZERO;
            }
            return false;
        }
        self.accumulator -= self.dt;
        self.frames += 1;
        true
    }

    fn update_alpha(&mut self) {
        self.alpha = (self.accumulator.as_secs_f64() / self.dt.as_secs_f64()) as f32;
    }
}

// ── GameLoop ──────────────────────────────────────────────────────────────────

/// Fixed-timestep loop: logic runs at a constant rate, drawing as often as the
/// caller presents.
pub struct GameLoop {
    state: Box<dyn State>,
    timestep: FixedTimestep,
    ctx: LoopContext,
    begun: bool,
    running: bool,
}

impl GameLoop {
    pub fn new(initial: Box<dyn State>, target_rate: u32) -> Self {
        let timestep = FixedTimestep::new(target_rate);
        let ctx = LoopContext {
            delta_time: timestep.delta_time(),
            alpha: 0.0,
            frame_rate: 0,
            tick: 0,
            pending: None,
        };
        Self { state: initial, timestep, ctx, begun: false, running: true }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn context(&self) -> &LoopContext {
        &self.ctx
    }

    /// Run every update `elapsed` wall time pays for, then draw once.
    /// Returns `false` once the loop has stopped.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }
        if !self.begun {
            self.begun = true;
            self.state.begin(&mut self.ctx);
            if !self.apply_transition() {
                return false;
            }
        }

        self.timestep.accumulate(elapsed);
        while self.timestep.step() {
            self.ctx.tick += 1;
            self.ctx.frame_rate = self.timestep.frame_rate();
            self.state.frame(&mut self.ctx);
            if !self.apply_transition() {
                return false;
            }
        }

        self.ctx.alpha = self.timestep.alpha();
        self.ctx.frame_rate = self.timestep.frame_rate();
        self.state.draw(&self.ctx);
        true
    }

    /// Drive the loop from the wall clock until a state quits or `present`
    /// returns `false` (e.g. the window was closed). `present` runs after each
    /// draw.
    pub fn run(&mut self, mut present: impl FnMut() -> bool) {
        log::info!("game loop: starting at {:.1} updates/s", 1.0 / self.timestep.delta_time());
        let mut last = Instant::now();
        loop {
            let now = Instant::now();
            let elapsed = now.duration_since(last);
            last = now;

            if !self.advance(elapsed) {
                break;
            }
            if !present() {
                self.stop();
                break;
            }
        }
        log::info!("game loop: stopped after {} updates", self.ctx.tick);
    }

    /// End the current state and stop. Further calls to `advance` do nothing.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            if self.begun {
                self.state.end(&mut self.ctx);
            }
        }
    }

    /// Handle a pending transition (possibly requested by the state a
    /// transition just began). Returns `false` when the loop stopped.
    fn apply_transition(&mut self) -> bool {
        while let Some(pending) = self.ctx.pending.take() {
            match pending {
                Transition::Quit => {
                    log::info!("game loop: quit requested at tick {}", self.ctx.tick);
                    self.stop();
                    return false;
                }
                Transition::To(next) => {
                    log::info!("game loop: state transition at tick {}", self.ctx.tick);
                    self.state.end(&mut self.ctx);
                    self.state = next;
                    self.state.begin(&mut self.ctx);
                }
            }
        }
        true
    }
}
