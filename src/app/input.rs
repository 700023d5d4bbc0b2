use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which keymap is active, decided by the screen being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// A form has focus (login or editor): most keys are typed into it.
    Form,
    /// A collection table has focus: single letters act as commands.
    List,
}

#[derive(Debug, Clone)]
pub enum KeyCommand {
    Quit,
    Logout,
    FocusNext,
    FocusPrev,
    Submit,
    Back,
    RowNext,
    RowPrev,
    Create,
    Edit,
    Delete,
    Refresh,
    SwitchTab,
    Input(KeyEvent),
    None,
}

pub fn classify(mode: InputMode, key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('c') | KeyCode::Char('C') => {
                KeyCommand::Quit
            }
            KeyCode::Char('l') | KeyCode::Char('L') => KeyCommand::Logout,
            KeyCode::Char('s') | KeyCode::Char('S') if mode == InputMode::Form => {
                KeyCommand::Submit
            }
            _ => KeyCommand::None,
        };
    }

    match mode {
        InputMode::Form => match key.code {
            KeyCode::Tab | KeyCode::Down => KeyCommand::FocusNext,
            KeyCode::BackTab | KeyCode::Up => KeyCommand::FocusPrev,
            KeyCode::Enter => KeyCommand::Submit,
            KeyCode::Esc => KeyCommand::Back,
            _ => KeyCommand::Input(*key),
        },
        InputMode::List => match key.code {
            KeyCode::Down | KeyCode::Char('j') => KeyCommand::RowNext,
            KeyCode::Up | KeyCode::Char('k') => KeyCommand::RowPrev,
            KeyCode::Char('n') => KeyCommand::Create,
            KeyCode::Enter | KeyCode::Char('e') => KeyCommand::Edit,
            KeyCode::Char('d') => KeyCommand::Delete,
            KeyCode::Char('r') => KeyCommand::Refresh,
            KeyCode::Tab => KeyCommand::SwitchTab,
            KeyCode::Char('q') => KeyCommand::Quit,
            _ => KeyCommand::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_chords_work_in_both_modes() {
        for mode in [InputMode::Form, InputMode::List] {
            assert!(matches!(classify(mode, &ctrl('q')), KeyCommand::Quit));
            assert!(matches!(classify(mode, &ctrl('c')), KeyCommand::Quit));
            assert!(matches!(classify(mode, &ctrl('l')), KeyCommand::Logout));
        }
        assert!(matches!(
            classify(InputMode::Form, &ctrl('s')),
            KeyCommand::Submit
        ));
        assert!(matches!(
            classify(InputMode::List, &ctrl('s')),
            KeyCommand::None
        ));
    }

    #[test]
    fn form_mode_types_plain_letters() {
        assert!(matches!(
            classify(InputMode::Form, &plain(KeyCode::Char('d'))),
            KeyCommand::Input(_)
        ));
        assert!(matches!(
            classify(InputMode::Form, &plain(KeyCode::Enter)),
            KeyCommand::Submit
        ));
        assert!(matches!(
            classify(InputMode::Form, &plain(KeyCode::Down)),
            KeyCommand::FocusNext
        ));
    }

    #[test]
    fn list_mode_letters_are_commands() {
        assert!(matches!(
            classify(InputMode::List, &plain(KeyCode::Char('d'))),
            KeyCommand::Delete
        ));
        assert!(matches!(
            classify(InputMode::List, &plain(KeyCode::Char('n'))),
            KeyCommand::Create
        ));
        assert!(matches!(
            classify(InputMode::List, &plain(KeyCode::Tab)),
            KeyCommand::SwitchTab
        ));
        assert!(matches!(
            classify(InputMode::List, &plain(KeyCode::Char('x'))),
            KeyCommand::None
        ));
    }
}
