//! Remote-control keys understood by `keypress/<Key>`.

use std::fmt;

/// A key on the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Home,
    Rev,
    Fwd,
    Play,
    Select,
    Left,
    Right,
    Down,
    Up,
    Back,
    InstantReplay,
    Info,
    Backspace,
    Search,
    Enter,
    /// A literal character typed into the focused text field
    Lit(char),
}

impl Key {
    /// Path segment used after `keypress/`
    pub fn path(&self) -> String {
        match self {
            Key::Lit(c) => {
                let mut buf = [0u8; 4];
                format!("Lit_{}", urlencoding::encode(c.encode_utf8(&mut buf)))
            }
            named => named.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Home => "Home",
            Key::Rev => "Rev",
            Key::Fwd => "Fwd",
            Key::Play => "Play",
            Key::Select => "Select",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Down => "Down",
            Key::Up => "Up",
            Key::Back => "Back",
            Key::InstantReplay => "InstantReplay",
            Key::Info => "Info",
            Key::Backspace => "Backspace",
            Key::Search => "Search",
            Key::Enter => "Enter",
            Key::Lit(c) => return write!(f, "Lit_{}", c),
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Key::Home, "Home")]
    #[case(Key::InstantReplay, "InstantReplay")]
    #[case(Key::Lit('a'), "Lit_a")]
    #[case(Key::Lit(' '), "Lit_%20")]
    #[case(Key::Lit('&'), "Lit_%26")]
    #[case(Key::Lit('é'), "Lit_%C3%A9")]
    fn test_key_path(#[case] key: Key, #[case] expected: &str) {
        assert_eq!(key.path(), expected);
    }
}
