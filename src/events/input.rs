//! Key-binding parsing and matching.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A parsed key binding such as `"q"`, `"?"`, `"Shift+r"` or `"Ctrl+c"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    code: KeyCode,
    ctrl: bool,
    alt: bool,
}

impl KeyChord {
    /// Parse a binding string. Returns None for unrecognized tokens.
    pub fn parse(binding: &str) -> Option<Self> {
        let mut ctrl = false;
        let mut alt = false;
        let mut shift = false;
        let mut key_token = None;

        for part in binding.split('+') {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" => ctrl = true,
                "alt" => alt = true,
                "shift" => shift = true,
                _ => key_token = Some(part),
            }
        }

        let token = key_token?;
        let code = match token.to_ascii_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            _ => {
                let mut chars = token.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                // Shift over a letter means the uppercase character; the
                // terminal reports it that way. Shift over symbols is
                // already baked into the character itself.
                if shift && c.is_ascii_alphabetic() {
                    KeyCode::Char(c.to_ascii_uppercase())
                } else {
                    KeyCode::Char(c)
                }
            }
        };

        Some(Self { code, ctrl, alt })
    }

    /// Whether a terminal key event matches this chord.
    ///
    /// The shift modifier is intentionally not compared: it is implied by
    /// the reported character (`R`, `?`) and terminals disagree on whether
    /// they set it for symbols.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.code == event.code
            && self.ctrl == event.modifiers.contains(KeyModifiers::CONTROL)
            && self.alt == event.modifiers.contains(KeyModifiers::ALT)
    }
}

/// Convenience matcher for binding strings straight from the config.
pub fn binding_matches(binding: &str, event: &KeyEvent) -> bool {
    KeyChord::parse(binding).is_some_and(|chord| chord.matches(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_letter() {
        assert!(binding_matches(
            "q",
            &key(KeyCode::Char('q'), KeyModifiers::NONE)
        ));
        assert!(!binding_matches(
            "q",
            &key(KeyCode::Char('Q'), KeyModifiers::SHIFT)
        ));
    }

    #[test]
    fn shifted_letter_is_uppercase_char() {
        let event = key(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert!(binding_matches("Shift+r", &event));
        assert!(!binding_matches("r", &event));
    }

    #[test]
    fn symbol_ignores_shift_modifier() {
        assert!(binding_matches(
            "?",
            &key(KeyCode::Char('?'), KeyModifiers::SHIFT)
        ));
        assert!(binding_matches(
            "?",
            &key(KeyCode::Char('?'), KeyModifiers::NONE)
        ));
    }

    #[test]
    fn ctrl_must_match() {
        let event = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(binding_matches("Ctrl+c", &event));
        assert!(!binding_matches("c", &event));
    }

    #[test]
    fn named_keys() {
        assert!(binding_matches(
            "Enter",
            &key(KeyCode::Enter, KeyModifiers::NONE)
        ));
        assert!(binding_matches("Esc", &key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(KeyChord::parse("NoSuchKey").is_none());
    }
}
