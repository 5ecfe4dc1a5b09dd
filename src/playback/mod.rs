//! Playback controller: cooperative replay of a recorded trace
//!
//! The controller owns at most one [`Run`] — a cursor over an immutable
//! [`Trace`] — and advances it from the host's event loop: the loop calls
//! [`Controller::tick`] with the current time, and the controller performs
//! one advance whenever the scheduled deadline has passed.  Each advance
//! moves the cursor forward by exactly one step, emits that step to the
//! subscribed [`Sink`], and schedules the next advance after
//! `base_delay(kind) / speed`.
//!
//! Because the algorithm already ran to completion inside the producer,
//! pause and cancel never race a computation: pausing drops the pending
//! deadline, cancelling drops the whole run.  Steps are emitted in strictly
//! increasing index order, each exactly once per run.

use crate::step::{Step, Trace};
use std::fmt;
use std::time::Instant;

/// Slowest supported speed multiplier.
pub const SPEED_MIN: f64 = 0.25;

/// Fastest supported speed multiplier.
pub const SPEED_MAX: f64 = 16.0;

/// Receives each emitted step.
///
/// Fire-and-forget: the controller makes no assumption about what the sink
/// does or how long rendering takes.
pub trait Sink {
    fn on_step(&mut self, step: &Step, status: RunStatus);
}

/// Lifecycle state of a playback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No run exists
    Idle,
    /// Advancing on schedule
    Running,
    /// Cursor frozen, pending advance dropped
    Paused,
    /// Cursor reached the last step (terminal)
    Completed,
    /// Run discarded by explicit cancel (terminal)
    Cancelled,
}

impl RunStatus {
    /// Short label for status displays.
    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Paused => "paused",
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a run in this state still owns its trace.
    pub fn is_active(self) -> bool {
        matches!(self, RunStatus::Running | RunStatus::Paused)
    }
}

/// Read-only view of the controller for status displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusView {
    pub status: RunStatus,
    /// Index of the last emitted step, -1 before the first advance
    pub cursor: isize,
    pub total_steps: usize,
}

/// Invalid control transitions.
///
/// These are programming errors — a well-behaved controls layer prevents
/// them — but they fail loudly rather than corrupt the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// `start` while a run is running or paused
    AlreadyActive { status: RunStatus },
    /// `pause` outside running/paused
    NotRunning { status: RunStatus },
    /// `resume` outside paused
    NotPaused { status: RunStatus },
    /// `step_once` with no advanceable run
    NoActiveRun { status: RunStatus },
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::AlreadyActive { status } => {
                write!(f, "Cannot start: a run is already {}", status.label())
            }
            ControlError::NotRunning { status } => {
                write!(f, "Cannot pause: run is {}", status.label())
            }
            ControlError::NotPaused { status } => {
                write!(f, "Cannot resume: run is {}", status.label())
            }
            ControlError::NoActiveRun { status } => {
                write!(f, "Cannot step: run is {}", status.label())
            }
        }
    }
}

impl std::error::Error for ControlError {}

/// One playback session over a fixed trace.
struct Run {
    trace: Trace,
    cursor: isize,
    status: RunStatus,
    speed: f64,
    /// Generation token of the controller at creation; a deadline firing
    /// for a stale generation is ignored
    generation: u64,
    /// Deadline of the next scheduled advance; `None` while running means
    /// due immediately
    next_due: Option<Instant>,
}

/// The playback controller.  At most one run is active at a time.
pub struct Controller {
    run: Option<Run>,
    sink: Option<Box<dyn Sink>>,
    generation: u64,
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            run: None,
            sink: None,
            generation: 0,
        }
    }

    /// Register the sink that receives emitted steps.
    pub fn subscribe(&mut self, sink: Box<dyn Sink>) {
        self.sink = Some(sink);
    }

    /// Remove the registered sink, returning it to the caller.
    pub fn unsubscribe(&mut self) -> Option<Box<dyn Sink>> {
        self.sink.take()
    }

    /// Begin a new run over `trace` at the given speed multiplier.
    ///
    /// Rejected while a run is running or paused; completed and cancelled
    /// runs are replaced.  The first advance is due on the next tick.
    pub fn start(&mut self, trace: Trace, speed: f64) -> Result<(), ControlError> {
        if let Some(run) = &self.run {
            if run.status.is_active() {
                return Err(ControlError::AlreadyActive { status: run.status });
            }
        }

        self.generation += 1;
        let status = if trace.is_empty() {
            RunStatus::Completed
        } else {
            RunStatus::Running
        };
        self.run = Some(Run {
            trace,
            cursor: -1,
            status,
            speed: speed.clamp(SPEED_MIN, SPEED_MAX),
            generation: self.generation,
            next_due: None,
        });
        Ok(())
    }

    /// Advance if running and the scheduled deadline has passed.
    ///
    /// Returns true when a step was emitted.  Called from the host event
    /// loop with the current time; never blocks.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = match &self.run {
            Some(run) if run.status == RunStatus::Running => {
                run.generation == self.generation
                    && run.next_due.map_or(true, |due| now >= due)
            }
            _ => false,
        };
        if !due {
            return false;
        }

        self.advance(now);
        true
    }

    /// Manual single advance, valid while running or paused.
    ///
    /// Does not change the paused/running status (except that advancing
    /// onto the last step completes the run).
    pub fn step_once(&mut self, now: Instant) -> Result<(), ControlError> {
        match &self.run {
            Some(run) if run.status.is_active() => {}
            _ => {
                return Err(ControlError::NoActiveRun {
                    status: self.status().status,
                });
            }
        }

        self.advance(now);
        Ok(())
    }

    /// Freeze the cursor and drop the pending advance.  Idempotent while
    /// paused; an error in any other state.
    pub fn pause(&mut self) -> Result<(), ControlError> {
        let status = self.status().status;
        match self.run.as_mut() {
            Some(run) if run.status == RunStatus::Running => {
                run.status = RunStatus::Paused;
                run.next_due = None;
                Ok(())
            }
            Some(run) if run.status == RunStatus::Paused => Ok(()),
            _ => Err(ControlError::NotRunning { status }),
        }
    }

    /// Return a paused run to running, scheduling the next advance a full
    /// delay out.
    pub fn resume(&mut self, now: Instant) -> Result<(), ControlError> {
        let status = self.status().status;
        match self.run.as_mut() {
            Some(run) if run.status == RunStatus::Paused => {
                run.status = RunStatus::Running;
                run.next_due = if run.cursor < 0 {
                    None
                } else {
                    let kind = run.trace.steps[run.cursor as usize].kind;
                    Some(now + run.trace.delays.base_delay(kind).div_f64(run.speed))
                };
                Ok(())
            }
            _ => Err(ControlError::NotPaused { status }),
        }
    }

    /// Discard the run and return to idle.  Valid from any state; a
    /// deadline already scheduled for the discarded run can never fire
    /// because its generation token is retired here.
    pub fn cancel(&mut self) {
        self.run = None;
        self.generation += 1;
    }

    /// Update the speed multiplier for future scheduling decisions.
    ///
    /// Clamped to `SPEED_MIN..=SPEED_MAX`; an already-scheduled deadline is
    /// not re-computed.  Returns the clamped value.
    pub fn set_speed(&mut self, multiplier: f64) -> f64 {
        let clamped = multiplier.clamp(SPEED_MIN, SPEED_MAX);
        if let Some(run) = self.run.as_mut() {
            run.speed = clamped;
        }
        clamped
    }

    /// Read-only status for displays.
    pub fn status(&self) -> StatusView {
        match &self.run {
            Some(run) => StatusView {
                status: run.status,
                cursor: run.cursor,
                total_steps: run.trace.len(),
            },
            None => StatusView {
                status: RunStatus::Idle,
                cursor: -1,
                total_steps: 0,
            },
        }
    }

    /// Move the cursor forward one step, emit it, and schedule the next
    /// advance.  Callers have already checked that the run is advanceable.
    fn advance(&mut self, now: Instant) {
        let idx = {
            let run = self.run.as_mut().unwrap();
            let idx = (run.cursor + 1) as usize;
            run.cursor = idx as isize;

            if idx + 1 == run.trace.len() {
                run.status = RunStatus::Completed;
                run.next_due = None;
            } else if run.status == RunStatus::Running {
                let kind = run.trace.steps[idx].kind;
                run.next_due = Some(now + run.trace.delays.base_delay(kind).div_f64(run.speed));
            }
            idx
        };

        if let (Some(run), Some(sink)) = (self.run.as_ref(), self.sink.as_mut()) {
            sink.on_step(&run.trace.steps[idx], run.status);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{DelayTable, Snapshot, StepKind, StepRecorder};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    struct RecordingSink(Rc<RefCell<Vec<(usize, RunStatus)>>>);

    impl Sink for RecordingSink {
        fn on_step(&mut self, step: &Step, status: RunStatus) {
            self.0.borrow_mut().push((step.index, status));
        }
    }

    /// A trace of `n` steps with a uniform 100 ms base delay.
    fn test_trace(n: usize) -> Trace {
        let mut rec = StepRecorder::new(n);
        for i in 0..n {
            let kind = if i + 1 == n {
                StepKind::Final
            } else {
                StepKind::Compare
            };
            rec.record(
                kind,
                format!("step {}", i),
                Snapshot::Array {
                    values: vec![i as i64],
                    focus: vec![],
                    region: None,
                    sorted_region: None,
                    depth: 0,
                },
                i as f64 / n as f64,
            )
            .unwrap();
        }
        rec.into_trace(DelayTable::uniform(100))
    }

    fn controller_with_log() -> (Controller, Rc<RefCell<Vec<(usize, RunStatus)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut controller = Controller::new();
        controller.subscribe(Box::new(RecordingSink(log.clone())));
        (controller, log)
    }

    #[test]
    fn test_start_rejected_while_active() {
        let (mut controller, _log) = controller_with_log();
        controller.start(test_trace(3), 1.0).unwrap();

        let err = controller.start(test_trace(3), 1.0).unwrap_err();
        assert_eq!(
            err,
            ControlError::AlreadyActive {
                status: RunStatus::Running,
            }
        );
    }

    #[test]
    fn test_cancel_before_first_tick_emits_nothing() {
        let (mut controller, log) = controller_with_log();
        controller.start(test_trace(5), 1.0).unwrap();
        controller.cancel();

        let t0 = Instant::now();
        assert!(!controller.tick(t0));
        assert!(log.borrow().is_empty());
        assert_eq!(controller.status().status, RunStatus::Idle);
        assert_eq!(controller.status().cursor, -1);
    }

    #[test]
    fn test_tick_respects_deadline() {
        let (mut controller, log) = controller_with_log();
        controller.start(test_trace(3), 1.0).unwrap();

        let t0 = Instant::now();
        assert!(controller.tick(t0)); // first advance is due immediately
        assert!(!controller.tick(t0)); // next deadline is 100 ms out
        assert!(!controller.tick(t0 + Duration::from_millis(50)));
        assert!(controller.tick(t0 + Duration::from_millis(100)));

        assert_eq!(
            log.borrow().iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_full_run_emits_each_step_once_in_order() {
        let (mut controller, log) = controller_with_log();
        controller.start(test_trace(10), 1.0).unwrap();

        let mut now = Instant::now();
        while controller.status().status == RunStatus::Running {
            controller.tick(now);
            now += Duration::from_millis(100);
        }

        let indices: Vec<usize> = log.borrow().iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
        assert_eq!(controller.status().status, RunStatus::Completed);
        assert_eq!(controller.status().cursor, 9);
    }

    #[test]
    fn test_pause_is_idempotent_and_resume_continues_exactly() {
        let (mut controller, log) = controller_with_log();
        controller.start(test_trace(10), 1.0).unwrap();

        let mut now = Instant::now();
        for _ in 0..4 {
            assert!(controller.tick(now));
            now += Duration::from_millis(100);
        }
        assert_eq!(controller.status().cursor, 3);

        controller.pause().unwrap();
        let paused_view = controller.status();
        controller.pause().unwrap(); // idempotent
        assert_eq!(controller.status(), paused_view);

        // Ticks while paused do nothing
        now += Duration::from_millis(500);
        assert!(!controller.tick(now));

        controller.resume(now).unwrap();
        let mut guard = 0;
        while controller.status().status == RunStatus::Running && guard < 100 {
            controller.tick(now);
            now += Duration::from_millis(100);
            guard += 1;
        }

        let indices: Vec<usize> = log.borrow().iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_resume_requires_paused() {
        let (mut controller, _log) = controller_with_log();
        controller.start(test_trace(3), 1.0).unwrap();
        assert!(matches!(
            controller.resume(Instant::now()),
            Err(ControlError::NotPaused { .. })
        ));
    }

    #[test]
    fn test_pause_requires_active_run() {
        let mut controller = Controller::new();
        assert!(matches!(
            controller.pause(),
            Err(ControlError::NotRunning {
                status: RunStatus::Idle,
            })
        ));
    }

    #[test]
    fn test_speed_scales_next_deadline() {
        let (mut controller, _log) = controller_with_log();
        controller.start(test_trace(5), 2.0).unwrap();

        let t0 = Instant::now();
        assert!(controller.tick(t0));
        // Base 100 ms at speed 2.0 -> 50 ms
        assert!(!controller.tick(t0 + Duration::from_millis(49)));
        assert!(controller.tick(t0 + Duration::from_millis(50)));
    }

    #[test]
    fn test_set_speed_applies_to_future_scheduling_only() {
        let (mut controller, _log) = controller_with_log();
        controller.start(test_trace(5), 1.0).unwrap();

        let t0 = Instant::now();
        assert!(controller.tick(t0));

        // Already-scheduled deadline is unchanged
        controller.set_speed(4.0);
        assert!(!controller.tick(t0 + Duration::from_millis(99)));
        assert!(controller.tick(t0 + Duration::from_millis(100)));

        // The new speed governs the following deadline: 100 ms / 4
        let t1 = t0 + Duration::from_millis(100);
        assert!(!controller.tick(t1 + Duration::from_millis(24)));
        assert!(controller.tick(t1 + Duration::from_millis(25)));
    }

    #[test]
    fn test_set_speed_clamps() {
        let mut controller = Controller::new();
        assert_eq!(controller.set_speed(1000.0), SPEED_MAX);
        assert_eq!(controller.set_speed(0.0), SPEED_MIN);
    }

    #[test]
    fn test_step_once_while_paused() {
        let (mut controller, log) = controller_with_log();
        controller.start(test_trace(5), 1.0).unwrap();

        let t0 = Instant::now();
        controller.tick(t0);
        controller.pause().unwrap();

        controller.step_once(t0).unwrap();
        controller.step_once(t0).unwrap();
        assert_eq!(controller.status().status, RunStatus::Paused);
        assert_eq!(controller.status().cursor, 2);

        let indices: Vec<usize> = log.borrow().iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_step_once_completes_run() {
        let (mut controller, _log) = controller_with_log();
        controller.start(test_trace(2), 1.0).unwrap();

        let t0 = Instant::now();
        controller.step_once(t0).unwrap();
        controller.step_once(t0).unwrap();
        assert_eq!(controller.status().status, RunStatus::Completed);

        assert!(matches!(
            controller.step_once(t0),
            Err(ControlError::NoActiveRun {
                status: RunStatus::Completed,
            })
        ));
    }

    #[test]
    fn test_completed_run_can_be_restarted() {
        let (mut controller, log) = controller_with_log();
        controller.start(test_trace(1), 1.0).unwrap();
        controller.tick(Instant::now());
        assert_eq!(controller.status().status, RunStatus::Completed);

        controller.start(test_trace(1), 1.0).unwrap();
        controller.tick(Instant::now());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_status_reports_totals() {
        let (mut controller, _log) = controller_with_log();
        assert_eq!(controller.status().total_steps, 0);

        controller.start(test_trace(7), 1.0).unwrap();
        let view = controller.status();
        assert_eq!(view.total_steps, 7);
        assert_eq!(view.cursor, -1);
        assert_eq!(view.status, RunStatus::Running);
    }
}
