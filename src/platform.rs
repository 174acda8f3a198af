//! Platform-specific key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Modifier for the alternate submit key: Cmd on macOS, Ctrl elsewhere
#[cfg(target_os = "macos")]
const ALT_SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
const ALT_SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut shown in hints. Ctrl+S works everywhere;
/// Cmd+W (macOS) or Ctrl+W is accepted too.
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// True for the keys that submit the current form
pub fn is_submit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('s') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('w') => key.modifiers.contains(ALT_SUBMIT_MODIFIER),
        _ => false,
    }
}

/// Characters typed with Ctrl, Cmd or Alt held are shortcuts, not text
pub fn is_text_input(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), modifiers)
    }

    #[test]
    fn test_ctrl_s_submits_everywhere() {
        assert!(is_submit_key(&key('s', KeyModifiers::CONTROL)));
        assert!(!is_submit_key(&key('s', KeyModifiers::NONE)));
        assert!(!is_submit_key(&key('x', KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_alternate_submit_key() {
        assert!(is_submit_key(&key('w', ALT_SUBMIT_MODIFIER)));
        assert!(!is_submit_key(&key('w', KeyModifiers::NONE)));
    }

    #[test]
    fn test_text_input() {
        assert!(is_text_input(&key('a', KeyModifiers::NONE)));
        assert!(is_text_input(&key('A', KeyModifiers::SHIFT)));
        assert!(!is_text_input(&key('a', KeyModifiers::CONTROL)));
        assert!(!is_text_input(&key('a', KeyModifiers::ALT)));
    }
}
