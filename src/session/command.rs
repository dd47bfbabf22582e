//! Key-to-command mapping for the interactive session.

use std::fmt;

/// A keyboard command. Every key maps to exactly one command; keys without
/// a binding become [`Command::Inactive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `q`: detach handlers, close figures, end the session.
    Quit,
    /// `e`: extract the density along the line between two clicks.
    Extract,
    /// `n`: forget clicks and close the profile.
    NewVector,
    /// `c`: clear the plot and redraw it from retained state.
    Clear,
    /// `i`: integrate over the box spanned by two clicks.
    Integrate,
    /// `h`: print help.
    Help,
    /// `z`: zoom to the box spanned by two clicks.
    Zoom,
    /// `u`: reset limits to the grid extent.
    Unzoom,
    /// `p`: cycle the colour palette.
    Palette,
    /// `t`: cycle the UI theme.
    Theme,
    /// `y`: copy the current profile to the clipboard.
    CopyProfile,
    /// Any other key.
    Inactive(String),
}

impl Command {
    /// Command bound to a character key (case-insensitive).
    pub fn from_char(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'q' => Self::Quit,
            'e' => Self::Extract,
            'n' => Self::NewVector,
            'c' => Self::Clear,
            'i' => Self::Integrate,
            'h' => Self::Help,
            'z' => Self::Zoom,
            'u' => Self::Unzoom,
            'p' => Self::Palette,
            't' => Self::Theme,
            'y' => Self::CopyProfile,
            _ => Self::Inactive(key.to_string()),
        }
    }

    /// Command bound to a key name. Single characters go through
    /// [`Command::from_char`]; named keys (`Esc`, `Left`, ...) are inactive.
    pub fn from_key(key: &str) -> Self {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Self::Inactive(key.to_string()),
        }
    }

    /// Whether this command consumes two buffered clicks.
    pub fn needs_two_clicks(&self) -> bool {
        matches!(self, Self::Extract | Self::Integrate | Self::Zoom)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Quit => "quit",
            Self::Extract => "extract",
            Self::NewVector => "new vector",
            Self::Clear => "clear",
            Self::Integrate => "integrate",
            Self::Help => "help",
            Self::Zoom => "zoom",
            Self::Unzoom => "unzoom",
            Self::Palette => "palette",
            Self::Theme => "theme",
            Self::CopyProfile => "copy profile",
            Self::Inactive(key) => return write!(f, "inactive key '{}'", key),
        };
        write!(f, "{}", name)
    }
}

/// Help text printed by `h`.
pub const HELP_LINES: &[&str] = &[
    "-------------------------------------------------",
    "'e': extract a vector",
    "'i': integrate over a rectangular box",
    "'n': clear list of clicks and restart extracting",
    "'c': clear the plot",
    "'h': print help",
    "'z': zoom",
    "'u': unzoom",
    "'p': cycle colour palette",
    "'t': cycle theme",
    "'y': copy the extracted profile to the clipboard",
    "'q': quit",
    "All other keys are inactive.",
    "Click to set pointers.",
    "-------------------------------------------------",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_case_insensitive() {
        for (lower, upper, cmd) in [
            ('q', 'Q', Command::Quit),
            ('e', 'E', Command::Extract),
            ('n', 'N', Command::NewVector),
            ('c', 'C', Command::Clear),
            ('i', 'I', Command::Integrate),
            ('h', 'H', Command::Help),
            ('z', 'Z', Command::Zoom),
            ('u', 'U', Command::Unzoom),
        ] {
            assert_eq!(Command::from_char(lower), cmd);
            assert_eq!(Command::from_char(upper), cmd);
        }
    }

    #[test]
    fn test_unbound_keys_are_inactive() {
        assert_eq!(Command::from_char('x'), Command::Inactive("x".into()));
        assert_eq!(Command::from_char('7'), Command::Inactive("7".into()));
        assert_eq!(Command::from_key("Esc"), Command::Inactive("Esc".into()));
        assert_eq!(Command::from_key("Z"), Command::Zoom);
        assert_eq!(Command::from_key(""), Command::Inactive(String::new()));
    }

    #[test]
    fn test_two_click_commands() {
        assert!(Command::Extract.needs_two_clicks());
        assert!(Command::Integrate.needs_two_clicks());
        assert!(Command::Zoom.needs_two_clicks());
        assert!(!Command::Unzoom.needs_two_clicks());
    }
}
