use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which pane receives plain keys. Search is the text-entry surface; the
/// other two are navigation surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Members,
    Bands,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Search => Self::Members,
            Self::Members => Self::Bands,
            Self::Bands => Self::Search,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Ctrl+K: focus the search box and select its content.
    FocusSearch,
    /// Ctrl+T: flip the theme.
    ToggleTheme,
    /// Escape: clear search if non-empty, else clear member selection.
    Escape,
    CycleFocus,
    InputChar(char),
    Backspace,
    CursorLeft,
    CursorRight,
    /// Ctrl+U in the search box: clear it outright.
    ClearSearch,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Home / g: back to top of the band pane.
    Top,
    /// Enter/Space on a member tag.
    ToggleMember,
    ToggleFilterActive,
    ToggleFilterCore,
    ToggleFilterExternal,
    Noop,
}

pub fn action_for_key(key: KeyEvent, focus: Focus) -> Action {
    // Global chords first; they apply regardless of pane.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('k') => Action::FocusSearch,
            KeyCode::Char('t') => Action::ToggleTheme,
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('u') if focus == Focus::Search => Action::ClearSearch,
            _ => Action::Noop,
        };
    }
    if key.code == KeyCode::Esc {
        return Action::Escape;
    }
    if key.code == KeyCode::Tab {
        return Action::CycleFocus;
    }

    if focus == Focus::Search {
        return match key.code {
            KeyCode::Char(c) => Action::InputChar(c),
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Left => Action::CursorLeft,
            KeyCode::Right => Action::CursorRight,
            KeyCode::Enter | KeyCode::Down => Action::CycleFocus,
            _ => Action::Noop,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::Top,
        KeyCode::Enter | KeyCode::Char(' ') if focus == Focus::Members => Action::ToggleMember,
        KeyCode::Char('1') => Action::ToggleFilterActive,
        KeyCode::Char('2') => Action::ToggleFilterCore,
        KeyCode::Char('3') => Action::ToggleFilterExternal,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('/') => Action::FocusSearch,
        _ => Action::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_k_focuses_search_from_any_pane() {
        for focus in [Focus::Search, Focus::Members, Focus::Bands] {
            assert_eq!(action_for_key(ctrl('k'), focus), Action::FocusSearch);
        }
    }

    #[test]
    fn ctrl_t_toggles_theme_from_any_pane() {
        for focus in [Focus::Search, Focus::Members, Focus::Bands] {
            assert_eq!(action_for_key(ctrl('t'), focus), Action::ToggleTheme);
        }
    }

    #[test]
    fn escape_is_global() {
        for focus in [Focus::Search, Focus::Members, Focus::Bands] {
            assert_eq!(action_for_key(key(KeyCode::Esc), focus), Action::Escape);
        }
    }

    #[test]
    fn plain_chars_type_into_the_search_box() {
        assert_eq!(
            action_for_key(key(KeyCode::Char('q')), Focus::Search),
            Action::InputChar('q')
        );
        // Outside search focus, q quits.
        assert_eq!(action_for_key(key(KeyCode::Char('q')), Focus::Bands), Action::Quit);
    }

    #[test]
    fn member_toggle_only_in_members_pane() {
        assert_eq!(
            action_for_key(key(KeyCode::Enter), Focus::Members),
            Action::ToggleMember
        );
        assert_eq!(action_for_key(key(KeyCode::Enter), Focus::Bands), Action::Noop);
    }

    #[test]
    fn filter_digits_map_in_navigation_panes() {
        assert_eq!(
            action_for_key(key(KeyCode::Char('1')), Focus::Bands),
            Action::ToggleFilterActive
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('2')), Focus::Members),
            Action::ToggleFilterCore
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('3')), Focus::Bands),
            Action::ToggleFilterExternal
        );
        // In search they are just text.
        assert_eq!(
            action_for_key(key(KeyCode::Char('1')), Focus::Search),
            Action::InputChar('1')
        );
    }

    #[test]
    fn focus_cycles_through_all_panes() {
        assert_eq!(Focus::Search.next(), Focus::Members);
        assert_eq!(Focus::Members.next(), Focus::Bands);
        assert_eq!(Focus::Bands.next(), Focus::Search);
    }
}
