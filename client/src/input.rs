use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use snake_common::snake::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Start,
    Quit,
    None,
}

pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            KeyAction::Turn(Direction::Right)
        }
        KeyCode::Enter => KeyAction::Start,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(map_key(press(KeyCode::Up)), KeyAction::Turn(Direction::Up));
        assert_eq!(map_key(press(KeyCode::Down)), KeyAction::Turn(Direction::Down));
        assert_eq!(map_key(press(KeyCode::Left)), KeyAction::Turn(Direction::Left));
        assert_eq!(map_key(press(KeyCode::Right)), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(map_key(press(KeyCode::Char('w'))), KeyAction::Turn(Direction::Up));
        assert_eq!(map_key(press(KeyCode::Char('S'))), KeyAction::Turn(Direction::Down));
        assert_eq!(map_key(press(KeyCode::Char('a'))), KeyAction::Turn(Direction::Left));
        assert_eq!(map_key(press(KeyCode::Char('D'))), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_key(press(KeyCode::Enter)), KeyAction::Start);
        assert_eq!(map_key(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(map_key(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(map_key(press(KeyCode::Char('c'))), KeyAction::None);
        assert_eq!(map_key(press(KeyCode::Tab)), KeyAction::None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), KeyAction::None);
    }
}
