// Integration tests for the playback controller driving real producer
// traces through the public API.

use algotty::playback::{ControlError, Controller, RunStatus, Sink};
use algotty::producer::{searching, sorting};
use algotty::step::{Step, Trace};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

struct RecordingSink(Rc<RefCell<Vec<usize>>>);

impl Sink for RecordingSink {
    fn on_step(&mut self, step: &Step, _status: RunStatus) {
        self.0.borrow_mut().push(step.index);
    }
}

fn controller_with_log() -> (Controller, Rc<RefCell<Vec<usize>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut controller = Controller::new();
    controller.subscribe(Box::new(RecordingSink(log.clone())));
    (controller, log)
}

/// A linear-search miss over nine elements: exactly ten steps.
fn ten_step_trace() -> Trace {
    let values: Vec<i64> = (1..=9).collect();
    let trace = searching::linear_search(&values, 100).expect("Producer failed");
    assert_eq!(trace.len(), 10);
    trace
}

/// Drive ticks with synthetic time until the run leaves `Running`.
fn play_to_completion(controller: &mut Controller, mut now: Instant) {
    let mut guard = 0;
    while controller.status().status == RunStatus::Running && guard < 10_000 {
        controller.tick(now);
        now += Duration::from_millis(50);
        guard += 1;
    }
}

#[test]
fn test_pause_at_cursor_three_then_resume_replays_nothing() {
    let (mut controller, log) = controller_with_log();
    controller.start(ten_step_trace(), 1.0).unwrap();

    // Advance exactly four steps (cursor 3)
    let mut now = Instant::now();
    for _ in 0..4 {
        controller.step_once(now).unwrap();
        now += Duration::from_millis(10);
    }
    assert_eq!(controller.status().cursor, 3);

    controller.pause().unwrap();
    controller.resume(now).unwrap();
    play_to_completion(&mut controller, now);

    // Steps 4..=9 each emitted exactly once, in order, nothing replayed
    assert_eq!(*log.borrow(), (0..10).collect::<Vec<_>>());
    assert_eq!(controller.status().status, RunStatus::Completed);
}

#[test]
fn test_cancel_immediately_after_start_emits_nothing() {
    let (mut controller, log) = controller_with_log();
    controller.start(ten_step_trace(), 1.0).unwrap();
    controller.cancel();

    // A tick that would have fired the first advance is now a no-op
    controller.tick(Instant::now() + Duration::from_secs(60));

    assert!(log.borrow().is_empty());
    assert_eq!(controller.status().status, RunStatus::Idle);
}

#[test]
fn test_start_while_running_is_rejected_without_corrupting_run() {
    let (mut controller, log) = controller_with_log();
    controller.start(ten_step_trace(), 1.0).unwrap();

    let now = Instant::now();
    controller.tick(now);

    assert!(matches!(
        controller.start(ten_step_trace(), 1.0),
        Err(ControlError::AlreadyActive {
            status: RunStatus::Running,
        })
    ));

    // The original run is untouched
    assert_eq!(controller.status().cursor, 0);
    assert_eq!(*log.borrow(), vec![0]);
}

#[test]
fn test_full_playback_of_a_sorting_trace() {
    let values = algotty::input::parse_array("5,3,8,1").unwrap();
    let trace = sorting::bubble_sort(&values).unwrap();
    let total = trace.len();

    let (mut controller, log) = controller_with_log();
    controller.start(trace, 16.0).unwrap();
    play_to_completion(&mut controller, Instant::now());

    assert_eq!(*log.borrow(), (0..total).collect::<Vec<_>>());
    assert_eq!(controller.status().cursor, total as isize - 1);
}

#[test]
fn test_reset_then_replay_emits_the_same_sequence() {
    let (mut controller, log) = controller_with_log();

    controller.start(ten_step_trace(), 1.0).unwrap();
    let now = Instant::now();
    for _ in 0..3 {
        controller.step_once(now).unwrap();
    }
    controller.cancel();
    assert_eq!(controller.status().status, RunStatus::Idle);

    controller.start(ten_step_trace(), 1.0).unwrap();
    play_to_completion(&mut controller, now);

    // Three steps from the abandoned run, then the full fresh run
    let expected: Vec<usize> = (0..3).chain(0..10).collect();
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn test_unsubscribed_controller_still_advances() {
    let mut controller = Controller::new();
    controller.start(ten_step_trace(), 1.0).unwrap();
    play_to_completion(&mut controller, Instant::now());
    assert_eq!(controller.status().status, RunStatus::Completed);
}
