//! Main TUI application state and logic

use crate::player::Playback;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Visual,
    Log,
    Details,
}

impl FocusedPane {
    /// Move focus to the next pane (visual -> log -> details)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Visual => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Details,
            FocusedPane::Details => FocusedPane::Visual,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Visual => FocusedPane::Details,
            FocusedPane::Log => FocusedPane::Visual,
            FocusedPane::Details => FocusedPane::Log,
        }
    }
}

/// The main application state
pub struct App {
    pub playback: Playback,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub log_scroll: usize,
    pub details_scroll: usize,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,

    /// Delay between steps in play mode
    pub play_interval: Duration,
}

impl App {
    pub fn new(playback: Playback) -> Self {
        let status_message = format!(
            "{} ready, {} steps",
            playback.trace().algorithm,
            playback.total_steps()
        );
        App {
            playback,
            focused_pane: FocusedPane::Visual,
            log_scroll: 0,
            details_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
            play_interval: Duration::from_secs(1),
        }
    }

    pub fn with_play_interval(mut self, interval: Duration) -> Self {
        self.play_interval = interval;
        self
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval {
                self.tick();
            }

            // Use poll with timeout to allow auto-play to work
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

    /// One autoplay step; stops playing at the end of the trace
    pub fn tick(&mut self) {
        if self.playback.step_forward().is_ok() {
            self.status_message = "Playing...".to_string();
            self.log_scroll = usize::MAX;
        } else {
            self.is_playing = false;
            self.status_message = "Playback complete".to_string();
        }
        self.last_play_time = Instant::now();
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        // Left column: visual (top) | log (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let title = self.playback.trace().algorithm.name();
        super::panes::render_visual_pane(
            frame,
            left_rows[0],
            self.playback.current(),
            title,
            self.focused_pane == FocusedPane::Visual,
        );

        super::panes::render_log_pane(
            frame,
            left_rows[1],
            &self.playback,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        super::panes::render_details_pane(
            frame,
            columns[1],
            self.playback.current(),
            self.focused_pane == FocusedPane::Details,
            &mut self.details_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.playback.position(),
            self.playback.total_steps(),
            self.playback.current().kind(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = self.playback.step_forward_by(n);
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.log_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Log => self.log_scroll = self.log_scroll.saturating_sub(1),
                FocusedPane::Details => {
                    self.details_scroll = self.details_scroll.saturating_sub(1)
                }
                FocusedPane::Visual => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Log => self.log_scroll = self.log_scroll.saturating_add(1),
                FocusedPane::Details => {
                    self.details_scroll = self.details_scroll.saturating_add(1)
                }
                FocusedPane::Visual => {}
            },
            KeyCode::Char(' ') => {
                // 200ms debounce against key repeat
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(self.play_interval)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.playback.jump_to_end();
                self.status_message = "Jumped to end".to_string();
                self.log_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.playback.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
                self.log_scroll = 0;
            }
            _ => {}
        }
    }

    fn step_forward(&mut self) {
        match self.playback.step_forward() {
            Ok(step) => {
                self.status_message = step.description().to_string();
                self.log_scroll = usize::MAX;
            }
            Err(e) => self.status_message = format!("Cannot step forward: {}", e),
        }
    }

    fn step_backward(&mut self) {
        match self.playback.step_backward() {
            Ok(step) => {
                self.status_message = step.description().to_string();
                self.log_scroll = usize::MAX;
            }
            Err(e) => self.status_message = format!("Cannot step backward: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;
    use crate::generator::generate;
    use crate::generator::sorting::bubble_sort;
    use crate::input::{Algorithm, Request};
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(Playback::new(bubble_sort(&[3, 1, 2]).unwrap()).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn focus_cycles_both_ways() {
        let pane = FocusedPane::Visual;
        assert_eq!(pane.next().next().next(), pane);
        assert_eq!(pane.prev(), FocusedPane::Details);
        assert_eq!(pane.next().prev(), pane);
    }

    #[test]
    fn arrows_move_the_cursor() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.playback.position(), 0);
        assert!(app.status_message.starts_with("Cannot step backward"));

        press(&mut app, KeyCode::Right);
        assert_eq!(app.playback.position(), 1);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.playback.position(), 4);

        press(&mut app, KeyCode::Enter);
        assert!(app.playback.is_at_end());
        press(&mut app, KeyCode::Backspace);
        assert!(app.playback.is_at_start());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn autoplay_stops_at_the_end() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.is_playing);
        for _ in 0..app.playback.total_steps() {
            app.tick();
        }
        assert!(!app.is_playing);
        assert!(app.playback.is_at_end());
        assert_eq!(app.status_message, "Playback complete");
    }

    #[test]
    fn renders_every_family() {
        for algorithm in Algorithm::ALL {
            let trace = generate(&Request::sample(algorithm), &Limits::default()).unwrap();
            let mut app = App::new(Playback::new(trace).unwrap());
            let mut terminal = Terminal::new(TestBackend::new(200, 40)).unwrap();
            terminal.draw(|f| app.render(f)).unwrap();
            app.playback.jump_to_end();
            terminal.draw(|f| app.render(f)).unwrap();

            let text = screen(&terminal);
            assert!(text.contains(algorithm.name()), "{algorithm} title missing");
            assert!(text.contains("Step Log"));
            assert!(text.contains(" END "));
        }
    }
}
