//! Terminal conversation view for the Hailey chat proxy
//!
//! Renders the conversation and an input box, and forwards key presses to a
//! `ChatRuntime` that talks to the proxy over HTTP.

use crossterm::event::{
    Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use hailey::chat::{ChatHandle, ChatRuntime, ChatState, HttpProxyClient, KeyPress, Role, Turn};
use hailey::config::ClientConfig;
use hailey::persona::ASSISTANT_NAME;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{Frame, Terminal};
use std::fs::File;
use std::io::{self, Stderr};
use std::sync::Mutex;
use tokio::sync::broadcast::error::RecvError;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

type Tui = Terminal<CrosstermBackend<Stderr>>;

const LOG_FILE: &str = "hailey-chat.log";
const MAX_INPUT_LINES: usize = 5;
const PAGE: u16 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config = ClientConfig::from_env();
    tracing::info!(proxy = %config.proxy_url, "Starting chat client");
    let handle = ChatRuntime::spawn(HttpProxyClient::new(&config.proxy_url));

    install_panic_hook();
    let mut terminal = init_terminal()?;
    let result = run(&mut terminal, handle).await;
    restore_terminal()?;

    result
}

/// Logs go to a file so they never draw over the alternate screen
fn init_logging() -> io::Result<()> {
    let path = std::env::temp_dir().join(LOG_FILE);
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hailey=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(io::stderr()))
}

fn restore_terminal() -> io::Result<()> {
    execute!(io::stderr(), LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Restore the terminal before the default hook prints the panic
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

async fn run(terminal: &mut Tui, handle: ChatHandle) -> Result<(), Box<dyn std::error::Error>> {
    let mut updates = handle.subscribe();
    let mut events = EventStream::new();
    let mut view = View::new(handle.snapshot());

    loop {
        terminal.draw(|frame| view.draw(frame))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    match map_key(key) {
                        Some(Action::Quit) => break,
                        Some(Action::ScrollUp(n)) => view.scroll_up(n),
                        Some(Action::ScrollDown(n)) => view.scroll_down(n),
                        Some(Action::Press(press)) => handle.key_press(press).await?,
                        None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            update = updates.recv() => match update {
                Ok(update) => view.apply(update.state, update.scroll_to_latest),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "View fell behind; resyncing");
                    view.apply(handle.snapshot(), true);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}

/// What a terminal key means to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    ScrollUp(u16),
    ScrollDown(u16),
    Press(KeyPress),
}

fn map_key(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Enter => {
            let modified = key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL);
            Some(Action::Press(if modified {
                KeyPress::modified_enter()
            } else {
                KeyPress::enter()
            }))
        }
        KeyCode::Char(c) if !ctrl => Some(Action::Press(KeyPress::char(c))),
        KeyCode::Backspace => Some(Action::Press(KeyPress::backspace())),
        KeyCode::Up => Some(Action::ScrollUp(1)),
        KeyCode::Down => Some(Action::ScrollDown(1)),
        KeyCode::PageUp => Some(Action::ScrollUp(PAGE)),
        KeyCode::PageDown => Some(Action::ScrollDown(PAGE)),
        _ => None,
    }
}

/// Presentation state: the latest `ChatState` plus the transcript scroll position
struct View {
    state: ChatState,
    /// Lines scrolled from the top of the transcript
    offset: u16,
    /// Pin to the newest turn on the next draw
    follow: bool,
}

impl View {
    fn new(state: ChatState) -> Self {
        Self {
            state,
            offset: 0,
            follow: true,
        }
    }

    fn apply(&mut self, state: ChatState, scroll_to_latest: bool) {
        self.state = state;
        if scroll_to_latest {
            self.follow = true;
        }
    }

    fn scroll_up(&mut self, n: u16) {
        self.follow = false;
        self.offset = self.offset.saturating_sub(n);
    }

    fn scroll_down(&mut self, n: u16) {
        self.offset = self.offset.saturating_add(n);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let input_width = usize::from(frame.area().width.saturating_sub(2));
        let draft_lines = wrap(&self.state.draft, input_width);
        let input_height = draft_lines.len().clamp(1, MAX_INPUT_LINES) + 2;

        let [transcript_area, input_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(to_u16(input_height)),
        ])
        .areas(frame.area());

        self.draw_transcript(frame, transcript_area);
        self.draw_input(frame, input_area, &draft_lines);
    }

    fn draw_transcript(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = usize::from(area.width.saturating_sub(2));
        let inner_height = area.height.saturating_sub(2);
        let lines = transcript_lines(self.state.conversation.turns(), inner_width);

        let bottom = to_u16(lines.len()).saturating_sub(inner_height);
        if self.follow || self.offset >= bottom {
            self.offset = bottom;
            self.follow = true;
        }

        let block = Block::bordered().title(format!(" {ASSISTANT_NAME} "));
        frame.render_widget(Paragraph::new(lines).block(block).scroll((self.offset, 0)), area);
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect, draft_lines: &[String]) {
        let inner_height = usize::from(area.height.saturating_sub(2));
        let visible = &draft_lines[draft_lines.len().saturating_sub(inner_height)..];

        let (title, style) = if self.state.awaiting_response {
            (
                " waiting for reply... ",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (" Message (Enter to send, Alt+Enter for newline) ", Style::default())
        };

        let text: Vec<Line> = visible.iter().map(|l| Line::raw(l.clone())).collect();
        let block = Block::bordered().title(title).border_style(style);
        frame.render_widget(Paragraph::new(text).style(style).block(block), area);

        let last = visible.last().map_or(0, |l| l.width());
        let row = visible.len().saturating_sub(1);
        frame.set_cursor_position(Position::new(
            area.x + 1 + to_u16(last).min(area.width.saturating_sub(3)),
            area.y + 1 + to_u16(row),
        ));
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Label each turn and wrap its content to `width` columns, with a blank
/// line between turns
fn transcript_lines(turns: &[Turn], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, turn) in turns.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        let color = match turn.role {
            Role::Assistant => Color::Cyan,
            Role::User => Color::Green,
        };
        lines.push(Line::from(Span::styled(
            format!("{}:", turn.role.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(wrap(&turn.content, width).into_iter().map(Line::raw));
    }
    lines
}

/// Hard-wrap `text` to `width` terminal columns, keeping explicit newlines.
/// Wrapping here rather than in the widget keeps the line count exact, so
/// the view can scroll to the true bottom. A glyph wider than `width` gets a
/// line of its own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for line in text.split('\n') {
        let mut current = String::new();
        let mut used = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && !current.is_empty() {
                out.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push(c);
            used += w;
        }
        out.push(current);
    }
    out
}
