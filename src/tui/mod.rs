// Terminal front end: login screen and the three main sections.
//
// The TUI owns a `ViewState` with the rendered data for each section. Key
// presses drive `AppState` calls directly; section data is re-fetched on
// entry and on demand ('r'), with a loading banner drawn before each
// fetch so slow upstream calls are visible rather than silent.

pub mod widgets;

use std::time::Duration;

use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::DefaultTerminal;
use ratatui::Frame;
use tracing::info;

use crate::app::{AchievementsView, AppState};
use crate::dashboard::DashboardTiles;
use crate::league_table::TableRow;

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Main,
}

/// Main-view sections, in nav order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Achievements,
    LeagueTable,
}

/// The login form's focused input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// Login screen state.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        LoginForm {
            username: String::new(),
            password: String::new(),
            focus: LoginField::Username,
            error: None,
        }
    }
}

/// TUI-local state mirroring what each section last fetched.
pub struct ViewState {
    pub screen: Screen,
    pub section: Section,
    pub login: LoginForm,
    pub tiles: DashboardTiles,
    pub achievements: Option<AchievementsView>,
    pub table: Vec<TableRow>,
    /// Shown when the startup standings fetch failed.
    pub standings_error: Option<String>,
    /// Banner drawn while a section fetch is in flight.
    pub loading: Option<&'static str>,
}

impl ViewState {
    fn new(screen: Screen) -> Self {
        ViewState {
            screen,
            section: Section::Dashboard,
            login: LoginForm::default(),
            tiles: DashboardTiles::placeholder("Manager"),
            achievements: None,
            table: Vec::new(),
            standings_error: None,
            loading: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// What a key press asked the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    SubmitLogin,
    Logout,
    EnterSection(Section),
    Refresh,
}

/// Run the TUI until the user quits. Takes over the terminal; tracing
/// must already be pointed at a file.
pub async fn run(mut app: AppState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app).await;
    ratatui::restore();
    result
}

async fn event_loop(terminal: &mut DefaultTerminal, app: &mut AppState) -> anyhow::Result<()> {
    let screen = if app.is_logged_in() {
        Screen::Main
    } else {
        Screen::Login
    };
    let mut state = ViewState::new(screen);
    if state.screen == Screen::Main {
        enter_main(terminal, app, &mut state).await?;
    }

    let mut events = EventStream::new();
    let mut render_tick = tokio::time::interval(Duration::from_millis(100));

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                let action = match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        handle_key(key, &mut state)
                    }
                    Some(Ok(_)) => Action::None,
                    Some(Err(_)) | None => Action::Quit,
                };

                match action {
                    Action::None => {}
                    Action::Quit => break,
                    Action::SubmitLogin => {
                        match app.login(&state.login.username, &state.login.password) {
                            Ok(()) => {
                                state = ViewState::new(Screen::Main);
                                enter_main(terminal, app, &mut state).await?;
                            }
                            Err(e) => {
                                state.login.error = Some(e.to_string());
                                state.login.password.clear();
                            }
                        }
                    }
                    Action::Logout => {
                        app.logout();
                        state = ViewState::new(Screen::Login);
                    }
                    Action::EnterSection(section) => {
                        state.section = section;
                        load_section(terminal, app, &mut state).await?;
                    }
                    Action::Refresh => {
                        load_section(terminal, app, &mut state).await?;
                    }
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &state))?;
            }
        }
    }

    info!("TUI exited");
    Ok(())
}

/// After login or session restore: fetch the startup standings, then the
/// dashboard.
async fn enter_main(
    terminal: &mut DefaultTerminal,
    app: &mut AppState,
    state: &mut ViewState,
) -> anyhow::Result<()> {
    state.loading = Some("Loading league data...");
    terminal.draw(|frame| render_frame(frame, state))?;

    if app.load_standings().await.is_err() {
        state.standings_error = Some("Couldn't load live league data.".into());
    }
    state.loading = None;
    load_section(terminal, app, state).await
}

/// Fetch the active section's data, drawing a loading banner first.
async fn load_section(
    terminal: &mut DefaultTerminal,
    app: &mut AppState,
    state: &mut ViewState,
) -> anyhow::Result<()> {
    state.loading = Some(match state.section {
        Section::Dashboard => "Loading dashboard...",
        Section::Achievements => "Loading achievements...",
        Section::LeagueTable => "Loading league table...",
    });
    terminal.draw(|frame| render_frame(frame, state))?;

    match state.section {
        Section::Dashboard => {
            state.tiles = app.dashboard(Utc::now()).await;
        }
        Section::Achievements => {
            state.achievements = Some(app.achievements().await);
        }
        Section::LeagueTable => {
            state.table = app.league_table();
        }
    }

    state.loading = None;
    terminal.draw(|frame| render_frame(frame, state))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Input handling
// ---------------------------------------------------------------------------

/// Translate a key press into an action, mutating form state in place.
fn handle_key(key: KeyEvent, state: &mut ViewState) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match state.screen {
        Screen::Login => handle_login_key(key, &mut state.login),
        Screen::Main => handle_main_key(key),
    }
}

fn handle_login_key(key: KeyEvent, form: &mut LoginForm) -> Action {
    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
            form.focus = match form.focus {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
            Action::None
        }
        KeyCode::Enter => Action::SubmitLogin,
        KeyCode::Backspace => {
            match form.focus {
                LoginField::Username => form.username.pop(),
                LoginField::Password => form.password.pop(),
            };
            Action::None
        }
        KeyCode::Char(c) => {
            match form.focus {
                LoginField::Username => form.username.push(c),
                LoginField::Password => form.password.push(c),
            }
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_main_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('l') => Action::Logout,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('1') => Action::EnterSection(Section::Dashboard),
        KeyCode::Char('2') => Action::EnterSection(Section::Achievements),
        KeyCode::Char('3') => Action::EnterSection(Section::LeagueTable),
        _ => Action::None,
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_frame(frame: &mut Frame, state: &ViewState) {
    match state.screen {
        Screen::Login => widgets::login::render(frame, frame.area(), &state.login),
        Screen::Main => render_main(frame, state),
    }
}

fn render_main(frame: &mut Frame, state: &ViewState) {
    let [nav_area, body_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    widgets::nav::render_nav(frame, nav_area, state);
    widgets::nav::render_help(frame, help_area);

    if let Some(message) = state.loading {
        widgets::nav::render_banner(frame, body_area, message);
        return;
    }

    match state.section {
        Section::Dashboard => widgets::tiles::render(frame, body_area, state),
        Section::Achievements => {
            widgets::boards::render(frame, body_area, state.achievements.as_ref())
        }
        Section::LeagueTable => widgets::table::render(frame, body_area, &state.table),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
