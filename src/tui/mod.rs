mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Config;
use crate::db::Database;
use crate::error::QuizError;
use crate::models::QuizSummary;
use crate::session::{AnswerOutcome, QuizSession, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Courses,
    Question,
    Results,
}

pub const LOGIN_CHOICES: [&str; 2] = ["Take a Quiz", "Quit"];

pub struct StatefulList<T> {
    pub items: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self { items, selected }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

/// The player. Owns the store handle and the single active session; screens
/// only ever see that one session through here.
pub struct App {
    db: Database,
    config: Config,
    pub screen: Screen,
    pub menu: StatefulList<&'static str>,
    pub courses: StatefulList<String>,
    pub session: Option<QuizSession>,
    /// Option cursor on the question screen; `None` until the student picks.
    pub selected_option: Option<usize>,
    /// Outcome of the scored submission plus the correct text, for feedback.
    pub feedback: Option<(AnswerOutcome, String)>,
    pub summary: Option<QuizSummary>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(db: Database, config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let courses = db.list_courses()?;

        Ok(Self {
            db,
            config,
            screen: Screen::Login,
            menu: StatefulList::with_items(LOGIN_CHOICES.to_vec()),
            courses: StatefulList::with_items(courses),
            session: None,
            selected_option: None,
            feedback: None,
            summary: None,
            status: None,
            should_quit: false,
        })
    }

    fn refresh_courses(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.courses = StatefulList::with_items(self.db.list_courses()?);
        Ok(())
    }

    fn report(&mut self, e: &QuizError) {
        self.status = Some(format!("{} ({})", e, e.recovery_hint()));
    }

    fn start_course(&mut self, course: String) {
        match QuizSession::start(&self.db, &course, &self.config) {
            Ok(session) => {
                self.status = if session.is_partial() {
                    Some(format!(
                        "'{}' has fewer than {} questions; this attempt has {}.",
                        course,
                        self.config.sample_size,
                        session.total()
                    ))
                } else {
                    None
                };
                self.session = Some(session);
                self.selected_option = None;
                self.feedback = None;
                self.summary = None;
                self.screen = Screen::Question;
            }
            Err(e) => self.report(&e),
        }
    }

    fn start_selected_course(&mut self) {
        if let Some(course) = self.courses.selected_item().cloned() {
            self.start_course(course);
        }
    }

    // Enter on the question screen: the first press scores the selection,
    // the second moves on.
    fn submit_or_advance(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if self.feedback.is_none() {
            let choice = match (self.selected_option, session.current_question()) {
                (Some(i), Ok(q)) => q.options()[i].to_string(),
                _ => String::new(),
            };
            match session.submit_answer(&choice) {
                Ok(outcome) => {
                    let correct = session
                        .correct_answer_text()
                        .unwrap_or_default()
                        .to_string();
                    self.feedback = Some((outcome, correct));
                    self.status = None;
                }
                Err(QuizError::NoSelection) => {
                    self.status = Some("Please select an answer first.".to_string());
                }
                Err(e) => {
                    // fail closed: drop the attempt and go back to selection
                    self.report(&e);
                    self.session = None;
                    self.screen = Screen::Courses;
                }
            }
            return;
        }

        match session.advance() {
            Ok(SessionState::InProgress) => {
                self.feedback = None;
                self.selected_option = None;
            }
            Ok(SessionState::Completed) | Ok(SessionState::Aborted) => self.finish_session(),
            Err(e) => self.report(&e),
        }
    }

    fn finish_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        match session.summary() {
            Ok(summary) => {
                if let Err(e) = self.db.record_attempt(
                    session.course(),
                    summary.score,
                    summary.total,
                ) {
                    log::warn!("could not record attempt: {}", e);
                }
                self.summary = Some(summary);
                self.feedback = None;
                self.screen = Screen::Results;
            }
            Err(e) => {
                self.report(&e);
                self.screen = Screen::Courses;
            }
        }
    }

    fn abandon_session(&mut self) {
        // abandoned attempts are discarded, not recorded
        self.session = None;
        self.feedback = None;
        self.selected_option = None;
        self.status = None;
        self.screen = Screen::Courses;
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let KeyCode::Char('r') = key {
            if modifiers.contains(KeyModifiers::CONTROL) && self.screen == Screen::Courses {
                self.refresh_courses()?;
                return Ok(());
            }
        }

        match self.screen {
            Screen::Login => match key {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down => self.menu.next(),
                KeyCode::Char('k') | KeyCode::Up => self.menu.previous(),
                KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                    match self.menu.selected_item() {
                        Some(&"Take a Quiz") => {
                            self.refresh_courses()?;
                            self.status = None;
                            self.screen = Screen::Courses;
                        }
                        Some(&"Quit") => self.should_quit = true,
                        _ => {}
                    }
                }
                _ => {}
            },

            Screen::Courses => match key {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down => self.courses.next(),
                KeyCode::Char('k') | KeyCode::Up => self.courses.previous(),
                KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                    self.start_selected_course()
                }
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => {
                    self.status = None;
                    self.screen = Screen::Login;
                }
                _ => {}
            },

            Screen::Question => match key {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down => {
                    self.selected_option = Some(match self.selected_option {
                        Some(i) if i < 3 => i + 1,
                        Some(_) => 0,
                        None => 0,
                    });
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.selected_option = Some(match self.selected_option {
                        Some(0) | None => 3,
                        Some(i) => i - 1,
                    });
                }
                KeyCode::Enter => self.submit_or_advance(),
                KeyCode::Esc => self.abandon_session(),
                _ => {}
            },

            Screen::Results => match key {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Enter | KeyCode::Esc => {
                    self.summary = None;
                    self.refresh_courses()?;
                    self.screen = Screen::Courses;
                }
                _ => {}
            },
        }
        Ok(())
    }
}

pub fn run(
    db: Database,
    config: Config,
    start_course: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(db, config)?;
    if let Some(course) = start_course {
        app.screen = Screen::Courses;
        app.start_course(course);
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers)?;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
