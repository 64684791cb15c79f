#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::event::KeyboardEnhancementFlags;
use crossterm::event::PopKeyboardEnhancementFlags;
use crossterm::event::PushKeyboardEnhancementFlags;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::supports_keyboard_enhancement;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use owo_colors::OwoColorize;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Location;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::EmptyState;
use crate::domain::services::Header;

const SEND_BUTTON_WIDTH: u16 = 5;

pub fn draw<B: Backend>(frame: &mut Frame<B>, app_state: &mut AppState) {
    let is_empty = app_state.transcript.is_empty();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(Header::height(is_empty)),
            Constraint::Min(1),
            Constraint::Length(TextArea::height(&app_state.textarea)),
        ])
        .split(frame.size());

    let selector_label = app_state
        .selector
        .label(&app_state.spinner, app_state.selection.as_ref());
    Header::render(frame, layout[0], is_empty, selector_label);

    if layout[1].width != app_state.last_known_width
        || layout[1].height != app_state.last_known_height
    {
        app_state.set_rect(layout[1]);
    }

    if is_empty {
        EmptyState::render(frame, layout[1]);
    } else {
        app_state
            .bubble_list
            .render(frame, layout[1], app_state.scroll.position);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            layout[1].inner(&Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut app_state.scroll.scrollbar_state,
        );
    }

    app_state.selector.render(frame, layout[1]);

    let input_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Min(1),
            Constraint::Length(SEND_BUTTON_WIDTH),
        ])
        .split(layout[2]);

    frame.render_widget(app_state.textarea.widget(), input_layout[0]);
    if app_state.is_in_flight() {
        app_state.spinner.render(frame, input_layout[1]);
    } else {
        frame.render_widget(
            Paragraph::new("⏎")
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double),
                )
                .alignment(Alignment::Center),
            input_layout[1],
        );
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    loop {
        terminal.draw(|frame| {
            draw(frame, app_state);
        })?;

        if app_state.selector.is_loading {
            app_state.mount(&mut rand::thread_rng());
            continue;
        }

        let event = events.next().await?;
        if app_state.handle_event(event, &tx)? {
            break;
        }
    }

    return Ok(());
}

fn restore_terminal() -> Result<()> {
    if supports_keyboard_enhancement().unwrap_or(false) {
        crossterm::execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        cursor::Show
    )?;

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    if let Err(err) = restore_terminal() {
        eprintln!("Failed to restore terminal: {err}");
    }
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let location = Location::parse(&Config::get(ConfigKey::Location))?;
    let mut app_state = AppState::new(location);

    enable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    // Shift+Enter is only distinguishable from Enter with this enabled.
    if supports_keyboard_enhancement().unwrap_or(false) {
        crossterm::execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }

    let term_backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(term_backend)?;

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;
    restore_terminal()?;
    res?;

    println!(
        "{} {}",
        OwoColorize::bold(&"Share this chat window:"),
        app_state.location.as_str()
    );

    return Ok(());
}
