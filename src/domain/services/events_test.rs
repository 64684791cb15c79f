use crossterm::event::Event as CrosstermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyEventState;
use crossterm::event::KeyModifiers;
use tui_textarea::Key;

use super::handle_crossterm;
use crate::domain::models::Event;

fn key(code: KeyCode, modifiers: KeyModifiers) -> Option<Event> {
    return handle_crossterm(CrosstermEvent::Key(KeyEvent::new(code, modifiers)));
}

#[test]
fn it_submits_on_enter() {
    assert!(matches!(
        key(KeyCode::Enter, KeyModifiers::NONE),
        Some(Event::KeyboardEnter())
    ));
}

#[test]
fn it_inserts_newline_on_shift_enter() {
    assert!(matches!(
        key(KeyCode::Enter, KeyModifiers::SHIFT),
        Some(Event::KeyboardNewline())
    ));
}

#[test]
fn it_inserts_newline_on_alt_enter() {
    assert!(matches!(
        key(KeyCode::Enter, KeyModifiers::ALT),
        Some(Event::KeyboardNewline())
    ));
}

#[test]
fn it_maps_alt_digits_to_suggestions() {
    assert!(matches!(
        key(KeyCode::Char('1'), KeyModifiers::ALT),
        Some(Event::KeyboardSuggestion(0))
    ));
    assert!(matches!(
        key(KeyCode::Char('4'), KeyModifiers::ALT),
        Some(Event::KeyboardSuggestion(3))
    ));
}

#[test]
fn it_passes_plain_digits_through_as_input() {
    match key(KeyCode::Char('1'), KeyModifiers::NONE) {
        Some(Event::KeyboardCharInput(input)) => {
            assert!(matches!(input.key, Key::Char('1')));
        }
        _ => panic!("Wrong event"),
    }
}

#[test]
fn it_maps_control_keys() {
    assert!(matches!(
        key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Some(Event::KeyboardCTRLC())
    ));
    assert!(matches!(
        key(KeyCode::Tab, KeyModifiers::NONE),
        Some(Event::KeyboardTab())
    ));
    assert!(matches!(
        key(KeyCode::Esc, KeyModifiers::NONE),
        Some(Event::KeyboardEsc())
    ));
    assert!(matches!(
        key(KeyCode::Up, KeyModifiers::NONE),
        Some(Event::UIScrollUp())
    ));
    assert!(matches!(
        key(KeyCode::Char('d'), KeyModifiers::CONTROL),
        Some(Event::UIScrollPageDown())
    ));
}

#[test]
fn it_ignores_key_releases() {
    let release = KeyEvent::new_with_kind_and_state(
        KeyCode::Enter,
        KeyModifiers::NONE,
        KeyEventKind::Release,
        KeyEventState::NONE,
    );
    assert!(handle_crossterm(CrosstermEvent::Key(release)).is_none());
}

#[test]
fn it_forwards_paste() {
    match handle_crossterm(CrosstermEvent::Paste("a\nb".to_string())) {
        Some(Event::KeyboardPaste(text)) => assert_eq!(text, "a\nb"),
        _ => panic!("Wrong event"),
    }
}

#[test]
fn it_ignores_focus_events() {
    assert!(handle_crossterm(CrosstermEvent::FocusGained).is_none());
}
