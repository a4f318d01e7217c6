//! Input thread and key mapping so the event loop only sees semantic events.

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    /// Category shortcut by display position (0-based).
    Category(usize),
    Panic,
    FocusNext,
    FocusPrev,
    /// Press whichever button has focus.
    Activate,
    Redraw,
    Exit,
}

pub(crate) fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(InputEvent::Exit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(digit @ '1'..='9') => {
            let position = digit.to_digit(10).unwrap_or(1) as usize - 1;
            Some(InputEvent::Category(position))
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char('!') => Some(InputEvent::Panic),
        KeyCode::Right | KeyCode::Down | KeyCode::Tab => Some(InputEvent::FocusNext),
        KeyCode::Left | KeyCode::Up | KeyCode::BackTab => Some(InputEvent::FocusPrev),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputEvent::Activate),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Exit),
        _ => None,
    }
}

fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(_, _) => Some(InputEvent::Redraw),
        _ => None,
    }
}

pub(crate) fn spawn_input_thread(tx: Sender<InputEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(%err, "terminal event read failed");
                let _ = tx.send(InputEvent::Exit);
                return;
            }
        };
        let Some(mapped) = map_event(event) else {
            continue;
        };
        tracing::trace!(?mapped, "input event");
        if tx.send(mapped).is_err() || mapped == InputEvent::Exit {
            return;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[rstest]
    #[case(KeyCode::Char('1'), Some(InputEvent::Category(0)))]
    #[case(KeyCode::Char('7'), Some(InputEvent::Category(6)))]
    #[case(KeyCode::Char('p'), Some(InputEvent::Panic))]
    #[case(KeyCode::Tab, Some(InputEvent::FocusNext))]
    #[case(KeyCode::Left, Some(InputEvent::FocusPrev))]
    #[case(KeyCode::Enter, Some(InputEvent::Activate))]
    #[case(KeyCode::Esc, Some(InputEvent::Exit))]
    #[case(KeyCode::Char('x'), None)]
    fn map_key_cases(#[case] code: KeyCode, #[case] expected: Option<InputEvent>) {
        assert_eq!(map_key(press(code)), expected);
    }

    #[test]
    fn ctrl_c_exits_and_other_chords_are_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(InputEvent::Exit));
        let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_p), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Char('p'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn resize_requests_redraw() {
        assert_eq!(map_event(Event::Resize(80, 24)), Some(InputEvent::Redraw));
    }
}
