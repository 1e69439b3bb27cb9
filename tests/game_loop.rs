use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tilescape::game_loop::{FixedTimestep, GameLoop, LoopContext, State};

type Log = Rc<RefCell<Vec<String>>>;

/// Records every callback; quits or transitions after a fixed number of frames.
struct Recorder {
    name: &'static str,
    log: Log,
    frames: u32,
    quit_after: Option<u32>,
    next: Option<Box<dyn State>>,
}

impl Recorder {
    fn new(name: &'static str, log: &Log) -> Self {
        Self { name, log: log.clone(), frames: 0, quit_after: None, next: None }
    }

    fn push(&self, event: &str) {
        self.log.borrow_mut().push(format!("{}:{event}", self.name));
    }
}

impl State for Recorder {
    fn begin(&mut self, _ctx: &mut LoopContext) {
        self.push("begin");
    }

    fn end(&mut self, _ctx: &mut LoopContext) {
        self.push("end");
    }

    fn frame(&mut self, ctx: &mut LoopContext) {
        self.frames += 1;
        self.push("frame");
        if self.quit_after == Some(self.frames) {
            ctx.quit();
        } else if let Some(next) = self.next.take() {
            ctx.transition(next);
        }
    }

    fn draw(&mut self, _ctx: &LoopContext) {
        self.push("draw");
    }
}

fn count(log: &Log, event: &str) -> usize {
    log.borrow().iter().filter(|e| e.as_str() == event).count()
}

// ── FixedTimestep ─────────────────────────────────────────────────────────

#[test]
fn test_timestep_runs_whole_steps() {
    let mut ts = FixedTimestep::new(8);
    ts.accumulate(Duration::from_secs_f32(0.1875));
    let mut steps = 0;
    while ts.step() {
        steps += 1;
    }
    assert_eq!(steps, 1);
    assert_eq!(ts.alpha(), 0.5);
}

#[test]
fn test_timestep_at_60hz_runs_floor_of_elapsed() {
    let mut ts = FixedTimestep::new(60);
    ts.accumulate(Duration::from_millis(50));
    let mut steps = 0;
    while ts.step() {
        steps += 1;
    }
    assert_eq!(steps, 3);
    assert!(ts.alpha() < 1e-3, "alpha {}", ts.alpha());
}

#[test]
fn test_timestep_does_not_drift() {
    let mut ts = FixedTimestep::new(60);
    let mut steps = 0;
    for _ in 0..600 {
        ts.accumulate(Duration::from_nanos(16_666_666));
        while ts.step() {
            steps += 1;
        }
    }
    assert_eq!(steps, 600);
    assert_eq!(ts.alpha(), 0.0);
}

#[test]
fn test_timestep_clamps_long_stalls() {
    let mut ts = FixedTimestep::new(8);
    ts.accumulate(Duration::from_secs(5));
    let mut steps = 0;
    while ts.step() {
        steps += 1;
    }
    // 0.25 s at 8 updates per second.
    assert_eq!(steps, 2);
}

#[test]
fn test_frame_rate_measured_per_second() {
    let mut ts = FixedTimestep::new(8);
    for _ in 0..4 {
        ts.accumulate(Duration::from_secs_f32(0.25));
        while ts.step() {}
    }
    assert_eq!(ts.frame_rate(), 8);
}

#[test]
#[should_panic]
fn test_zero_rate_panics() {
    FixedTimestep::new(0);
}

// ── GameLoop ──────────────────────────────────────────────────────────────

#[test]
fn test_advance_begins_then_frames_then_draws() {
    let log = Log::default();
    let mut game = GameLoop::new(Box::new(Recorder::new("a", &log)), 8);
    assert!(game.advance(Duration::from_secs_f32(0.25)));
    assert_eq!(
        *log.borrow(),
        vec!["a:begin", "a:frame", "a:frame", "a:draw"]
    );
    assert_eq!(game.context().tick(), 2);
    assert_eq!(game.context().delta_time(), 0.125);
}

#[test]
fn test_short_step_only_draws() {
    let log = Log::default();
    let mut game = GameLoop::new(Box::new(Recorder::new("a", &log)), 8);
    assert!(game.advance(Duration::from_secs_f32(0.0625)));
    assert_eq!(count(&log, "a:frame"), 0);
    assert_eq!(count(&log, "a:draw"), 1);
    assert_eq!(game.context().alpha(), 0.5);
}

#[test]
fn test_transition_ends_old_and_begins_new() {
    let log = Log::default();
    let mut first = Recorder::new("a", &log);
    first.next = Some(Box::new(Recorder::new("b", &log)));
    let mut game = GameLoop::new(Box::new(first), 8);

    assert!(game.advance(Duration::from_secs_f32(0.25)));
    assert_eq!(
        *log.borrow(),
        vec!["a:begin", "a:frame", "a:end", "b:begin", "b:frame", "b:draw"]
    );
}

#[test]
fn test_quit_stops_loop() {
    let log = Log::default();
    let mut state = Recorder::new("a", &log);
    state.quit_after = Some(1);
    let mut game = GameLoop::new(Box::new(state), 8);

    assert!(!game.advance(Duration::from_secs_f32(0.25)));
    assert!(!game.is_running());
    assert_eq!(*log.borrow(), vec!["a:begin", "a:frame", "a:end"]);

    // Once stopped nothing else runs.
    assert!(!game.advance(Duration::from_secs_f32(0.25)));
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn test_run_stops_when_present_fails() {
    let log = Log::default();
    let mut game = GameLoop::new(Box::new(Recorder::new("a", &log)), 1000);
    let mut presents = 0;
    game.run(|| {
        presents += 1;
        presents < 3
    });
    assert_eq!(presents, 3);
    assert_eq!(count(&log, "a:draw"), 3);
    assert_eq!(count(&log, "a:end"), 1);
    assert!(!game.is_running());
}
