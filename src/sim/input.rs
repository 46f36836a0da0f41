//! Input vocabulary
//!
//! Hosts translate their native key and pointer events into these types
//! before handing them to the session.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` / `code` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "KeyA" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "KeyD" | "d" | "D" => Some(Key::Right),
            " " | "Space" | "ArrowUp" | "KeyW" | "w" | "W" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Pointer button; touches report `Primary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` index
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            _ => PointerButton::Primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_key_name("d"), Some(Key::Right));
        assert_eq!(Key::from_key_name(" "), Some(Key::Fire));
        assert_eq!(Key::from_key_name("Escape"), None);
    }

    #[test]
    fn test_dom_buttons() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
    }
}
