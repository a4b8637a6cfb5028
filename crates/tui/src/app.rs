use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lettrus_core::{
    engine::MAX_ATTEMPTS, AppConfig, FileWordStore, GamePhase, GameSnapshot, LetterState,
    Session, SessionController,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const TICK_RATE: Duration = Duration::from_millis(250);
const KEYBOARD_ROWS: [&str; 3] = ["AZERTYUIOP", "QSDFGHJKLM", "WXCVBN"];

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    correct: Color,
    misplaced: Color,
    absent: Color,
    danger: Color,
    on_cell: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            correct: Color::Red,
            misplaced: Color::Yellow,
            absent: Color::Blue,
            danger: Color::LightRed,
            on_cell: Color::Black,
        }
    }
}

impl Theme {
    fn cell_style(&self, state: LetterState) -> Style {
        match state {
            LetterState::Correct => Style::default().bg(self.correct).fg(self.on_cell),
            LetterState::Misplaced => Style::default().bg(self.misplaced).fg(self.on_cell),
            LetterState::Absent => Style::default().bg(self.absent).fg(self.primary_fg),
            LetterState::Empty => Style::default().fg(self.primary_fg),
        }
        .add_modifier(Modifier::BOLD)
    }
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Terminal frontend driving a [`SessionController`].
pub struct LettrusApp {
    controller: SessionController<FileWordStore>,
    config: AppConfig,
    daily: bool,
    theme: Theme,
    should_quit: bool,
}

impl LettrusApp {
    pub fn new(controller: SessionController<FileWordStore>, config: AppConfig, daily: bool) -> Self {
        Self {
            controller,
            config,
            daily,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        terminal.draw(|frame| self.draw(frame))?;
        self.load_dictionary().await;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }

            tokio::select! {
                maybe_event = event_rx.recv() => {
                    match maybe_event {
                        Some(AppEvent::Input(event)) => self.handle_input(event).await,
                        Some(AppEvent::Tick) => {}
                        None => break,
                    }
                }
                Some(event) = self.controller.next_event() => {
                    self.controller.handle_event(event);
                }
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    async fn load_dictionary(&mut self) {
        match self.controller.initialize().await {
            Ok(()) => self.new_game(),
            Err(err) => warn!(%err, "dictionary load failed; press Ctrl-R to retry"),
        }
    }

    fn new_game(&mut self) {
        let AppConfig {
            letter_count,
            difficulty,
            timer_enabled,
            ..
        } = self.config;
        let result = if self.daily {
            let today = Local::now().date_naive();
            self.controller
                .start_daily_game(letter_count, difficulty, today, timer_enabled)
        } else {
            self.controller
                .start_game(letter_count, difficulty, timer_enabled)
        };
        if let Err(err) = result {
            debug!(%err, "new game not started");
        }
    }

    async fn handle_input(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key).await;
            }
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.new_game(),
            KeyCode::F(2) => self.new_game(),
            KeyCode::Char('r') if ctrl => {
                info!("retrying dictionary load");
                self.load_dictionary().await;
            }
            KeyCode::Esc => {
                if self.controller.snapshot().show_result {
                    self.controller.dismiss_result();
                } else {
                    self.controller.clear_error();
                }
            }
            _ if self.controller.snapshot().show_result => self.handle_result_key(key),
            KeyCode::Backspace => self.controller.on_backspace(),
            KeyCode::Enter => self.controller.on_submit(),
            KeyCode::Char(ch) if !ctrl => self.controller.on_letter_input(ch),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('n') => self.new_game(),
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.controller.snapshot();
        let area = frame.size();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(MAX_ATTEMPTS as u16 + 2),
                Constraint::Length(5),
                Constraint::Length(3),
            ])
            .split(area);

        self.draw_header(frame, rows[0], snapshot);
        match snapshot.session.as_ref() {
            Some(session) => {
                self.draw_board(frame, rows[1], session);
                self.draw_keyboard(frame, rows[2], session);
            }
            None => self.draw_placeholder(frame, rows[1], snapshot),
        }
        self.draw_status(frame, rows[3], snapshot);

        if snapshot.show_result {
            if let Some(session) = snapshot.session.as_ref() {
                self.draw_result(frame, area, session);
            }
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
        let mut spans = vec![Span::styled(
            "LETTRUS",
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(session) = snapshot.session.as_ref() {
            spans.push(Span::raw(format!(
                "   {} letters · {} · score {}",
                session.letter_count, session.difficulty, session.score
            )));
            if self.daily {
                spans.push(Span::styled(" · daily", Style::default().fg(self.theme.muted)));
            }
        }
        let header = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_board(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let mut lines: Vec<Line> = Vec::with_capacity(session.max_attempts);

        for attempt in &session.attempts {
            let spans = attempt
                .results
                .iter()
                .map(|result| {
                    Span::styled(format!(" {} ", result.letter), self.theme.cell_style(result.state))
                })
                .collect::<Vec<_>>();
            lines.push(Line::from(spans));
        }

        if !session.is_game_over() {
            lines.push(self.input_line(session));
        }

        while lines.len() < session.max_attempts {
            let blanks = (0..session.letter_count)
                .map(|_| Span::styled(" · ", Style::default().fg(self.theme.muted)))
                .collect::<Vec<_>>();
            lines.push(Line::from(blanks));
        }

        let board = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Grid"));
        frame.render_widget(board, area);
    }

    fn input_line(&self, session: &Session) -> Line<'static> {
        let typed: Vec<char> = session.current_input.chars().collect();
        let prefill = session.next_attempt_prefill();
        let spans = (0..session.letter_count)
            .map(|position| {
                if let Some(letter) = typed.get(position) {
                    Span::styled(
                        format!(" {letter} "),
                        Style::default()
                            .fg(self.theme.primary_fg)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    )
                } else if let Some(letter) = prefill.get(&position) {
                    Span::styled(format!(" {letter} "), Style::default().fg(self.theme.muted))
                } else {
                    Span::styled(" _ ", Style::default().fg(self.theme.muted))
                }
            })
            .collect::<Vec<_>>();
        Line::from(spans)
    }

    fn draw_keyboard(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let states = session.keyboard_letter_states();
        let lines = KEYBOARD_ROWS
            .iter()
            .map(|row| {
                let spans = row
                    .chars()
                    .map(|letter| {
                        let state = states.get(&letter).copied().unwrap_or(LetterState::Empty);
                        Span::styled(format!(" {letter} "), self.theme.cell_style(state))
                    })
                    .collect::<Vec<_>>();
                Line::from(spans)
            })
            .collect::<Vec<_>>();
        let keyboard = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Letters"));
        frame.render_widget(keyboard, area);
    }

    fn draw_placeholder(&self, frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
        let text = if snapshot.loading {
            "Loading dictionary…"
        } else {
            "No game in progress. Ctrl-N to start, Ctrl-R to reload the dictionary."
        };
        let placeholder = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(placeholder, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
        let line = if let Some(error) = snapshot.error.as_ref() {
            Line::from(Span::styled(
                error.clone(),
                Style::default()
                    .fg(self.theme.danger)
                    .add_modifier(Modifier::BOLD),
            ))
        } else if let Some(session) = snapshot.session.as_ref() {
            let mut spans = vec![Span::raw(format!(
                "{} attempts left",
                session.attempts_remaining()
            ))];
            if session.timer_enabled && session.phase == GamePhase::Playing {
                let style = if snapshot.timer_seconds_remaining <= 3 {
                    Style::default().fg(self.theme.danger)
                } else {
                    Style::default().fg(self.theme.accent)
                };
                spans.push(Span::raw(" · "));
                spans.push(Span::styled(
                    format!("{}s", snapshot.timer_seconds_remaining),
                    style,
                ));
            }
            spans.push(Span::styled(
                "   Enter submit · Ctrl-N new game · Ctrl-C quit",
                Style::default().fg(self.theme.muted),
            ));
            Line::from(spans)
        } else {
            Line::from("")
        };
        let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, area);
    }

    fn draw_result(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let (title, color) = match session.phase {
            GamePhase::Won => ("Found it!", self.theme.correct),
            GamePhase::Timeout => ("Out of time", self.theme.danger),
            _ => ("Out of attempts", self.theme.danger),
        };
        let popup = centered_rect(44, 8, area);
        frame.render_widget(Clear, popup);

        let lines = vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("The word was {}", session.target_word)),
            Line::from(format!("Score: {}", session.score)),
            Line::from(""),
            Line::from(Span::styled(
                "Enter new game · Esc close · q quit",
                Style::default().fg(self.theme.muted),
            )),
        ];
        let dialog = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Game over"));
        frame.render_widget(dialog, popup);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
