#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK_MILLIS: u64 = 100;

fn handle_key(keyevent: KeyEvent) -> Option<Event> {
    if keyevent.kind != KeyEventKind::Press {
        return None;
    }

    // Checked on the raw event, tui-textarea's Input does not carry Shift.
    if keyevent.code == KeyCode::Enter
        && keyevent
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
    {
        return Some(Event::KeyboardNewline());
    }

    if keyevent.code == KeyCode::Tab {
        return Some(Event::KeyboardTab());
    }

    match keyevent.into() {
        Input { key: Key::Down, .. } => {
            return Some(Event::UIScrollDown());
        }
        Input { key: Key::Up, .. } => {
            return Some(Event::UIScrollUp());
        }
        Input {
            key: Key::PageDown, ..
        } => {
            return Some(Event::UIScrollPageDown());
        }
        Input { key: Key::PageUp, .. } => {
            return Some(Event::UIScrollPageUp());
        }
        Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => {
            return Some(Event::UIScrollPageDown());
        }
        Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => {
            return Some(Event::UIScrollPageUp());
        }
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => {
            return Some(Event::KeyboardCTRLC());
        }
        Input {
            key: Key::Char(digit @ '1'..='9'),
            alt: true,
            ..
        } => {
            let idx = digit.to_digit(10).unwrap_or(1) as usize - 1;
            return Some(Event::KeyboardSuggestion(idx));
        }
        Input { key: Key::Esc, .. } => {
            return Some(Event::KeyboardEsc());
        }
        Input {
            key: Key::Enter, ..
        } => {
            return Some(Event::KeyboardEnter());
        }
        input => {
            return Some(Event::KeyboardCharInput(input));
        }
    }
}

pub fn handle_crossterm(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Paste(text) => {
            return Some(Event::KeyboardPaste(text));
        }
        CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
            MouseEventKind::ScrollUp => {
                return Some(Event::UIScrollUp());
            }
            MouseEventKind::ScrollDown => {
                return Some(Event::UIScrollDown());
            }
            _ => {
                return None;
            }
        },
        CrosstermEvent::Key(keyevent) => {
            return handle_key(keyevent);
        }
        _ => return None,
    }
}

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => handle_crossterm(input),
                    Some(Err(err)) => {
                        tracing::warn!(err = ?err, "failed to read terminal event");
                        None
                    },
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(TICK_MILLIS)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
