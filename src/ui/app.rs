//! Main TUI application state and logic

use crate::playback::{Controller, RunStatus, Sink};
use crate::step::{Snapshot, Step, Trace};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::panes;
use super::theme::DEFAULT_THEME;

/// What the sink has received so far: the latest step plus the narration log.
#[derive(Default)]
pub struct ViewState {
    pub last_step: Option<Step>,
    pub log: Vec<String>,
}

impl ViewState {
    fn clear(&mut self) {
        self.last_step = None;
        self.log.clear();
    }
}

/// The sink registered with the playback controller; shares the view state
/// with the app through an `Rc`.
struct ViewSink(Rc<RefCell<ViewState>>);

impl Sink for ViewSink {
    fn on_step(&mut self, step: &Step, _status: RunStatus) {
        let mut view = self.0.borrow_mut();
        view.log
            .push(format!("{:>5}  {}", step.index, step.description));
        view.last_step = Some(step.clone());
    }
}

/// The main application state
pub struct App {
    /// Playback controller driving the run
    controller: Controller,

    /// The recorded trace, retained so a reset can replay it
    trace: Trace,

    /// State shared with the registered sink
    view: Rc<RefCell<ViewState>>,

    /// Title shown while no step has been emitted yet
    title: String,

    /// Current speed multiplier
    speed: f64,

    /// Log pane scroll offset; `usize::MAX` sticks to the bottom
    log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app around a recorded trace.
    pub fn new(trace: Trace, title: String) -> Self {
        let view = Rc::new(RefCell::new(ViewState::default()));
        let mut controller = Controller::new();
        controller.subscribe(Box::new(ViewSink(view.clone())));

        App {
            controller,
            trace,
            view,
            title,
            speed: 1.0,
            log_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready! Press Space to play"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.controller.tick(Instant::now()) {
                self.log_scroll = usize::MAX;
                if self.controller.status().status == RunStatus::Completed {
                    self.status_message = "Playback complete".to_string();
                }
            }

            // Poll with a timeout so scheduled advances keep firing
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Left: algorithm state. Right: narration log above the progress gauge.
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(pane_area);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(columns[1]);

        let view = self.view.borrow();
        match &view.last_step {
            Some(step) => self.render_visual_pane(frame, columns[0], step),
            None => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title))
                    .border_style(Style::default().fg(DEFAULT_THEME.border_normal));
                let placeholder = Paragraph::new(format!(
                    "\n  {} steps recorded.\n\n  Press Space to play.",
                    self.trace.len()
                ))
                .style(Style::default().fg(DEFAULT_THEME.comment))
                .block(block);
                frame.render_widget(placeholder, columns[0]);
            }
        }

        let mut log_scroll = self.log_scroll;
        panes::render_log_pane(frame, right_rows[0], &view.log, &mut log_scroll);
        panes::render_progress_pane(frame, right_rows[1], view.last_step.as_ref());
        drop(view);
        self.log_scroll = log_scroll;

        panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.controller.status(),
            self.speed,
        );
    }

    /// Pick the visual pane that matches the snapshot family.
    fn render_visual_pane(
        &self,
        frame: &mut Frame,
        area: ratatui::layout::Rect,
        step: &Step,
    ) {
        match &step.snapshot {
            Snapshot::Array { .. }
            | Snapshot::ArrayMerge { .. }
            | Snapshot::SearchBracket { .. }
            | Snapshot::SearchScan { .. } => panes::render_array_pane(frame, area, step),
            Snapshot::Graph { .. } => panes::render_graph_pane(frame, area, step),
            Snapshot::Board { .. } | Snapshot::Grid { .. } => {
                panes::render_board_pane(frame, area, step)
            }
            Snapshot::Forest { .. } => panes::render_forest_pane(frame, area, step),
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.toggle_playback();
            }
            KeyCode::Right => {
                self.manual_step();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.speed = self.controller.set_speed(self.speed * 2.0);
                self.status_message = format!("Speed x{:.2}", self.speed);
            }
            KeyCode::Char('-') => {
                self.speed = self.controller.set_speed(self.speed / 2.0);
                self.status_message = format!("Speed x{:.2}", self.speed);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.controller.cancel();
                self.view.borrow_mut().clear();
                self.log_scroll = usize::MAX;
                self.status_message = "Reset".to_string();
            }
            KeyCode::Enter => {
                self.jump_to_end();
            }
            KeyCode::Up => {
                if self.log_scroll == usize::MAX {
                    self.log_scroll = self.view.borrow().log.len().saturating_sub(1);
                }
                self.log_scroll = self.log_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                self.log_scroll = self.log_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        match self.controller.status().status {
            RunStatus::Running => {
                if self.controller.pause().is_ok() {
                    self.status_message = "Paused".to_string();
                }
            }
            RunStatus::Paused => {
                if self.controller.resume(Instant::now()).is_ok() {
                    self.status_message = "Playing...".to_string();
                }
            }
            RunStatus::Idle | RunStatus::Completed | RunStatus::Cancelled => {
                self.restart();
                self.status_message = "Playing...".to_string();
            }
        }
    }

    fn manual_step(&mut self) {
        let status = self.controller.status().status;
        if !status.is_active() {
            // Start a fresh run, paused, so stepping inspects from step 0
            self.restart();
            let _ = self.controller.pause();
        }

        match self.controller.step_once(Instant::now()) {
            Ok(()) => {
                self.log_scroll = usize::MAX;
                self.status_message = "Stepped".to_string();
            }
            Err(e) => {
                self.status_message = format!("Cannot step: {}", e);
            }
        }
    }

    fn jump_to_end(&mut self) {
        if !self.controller.status().status.is_active() {
            self.restart();
        }

        let total = self.controller.status().total_steps;
        let mut guard = 0;
        while self.controller.status().status.is_active() && guard <= total {
            if self.controller.step_once(Instant::now()).is_err() {
                break;
            }
            guard += 1;
        }
        self.log_scroll = usize::MAX;
        self.status_message = "Jumped to end".to_string();
    }

    /// Discard any finished run and start the retained trace from the top.
    fn restart(&mut self) {
        self.controller.cancel();
        self.view.borrow_mut().clear();
        self.log_scroll = usize::MAX;
        if let Err(e) = self.controller.start(self.trace.clone(), self.speed) {
            self.status_message = format!("Cannot start: {}", e);
        }
    }
}
