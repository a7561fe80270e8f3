//! Light/dark display mode. Session-only; not persisted.

/// Current display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Switch to the other mode and return it.
    pub fn toggle(&mut self) -> Self {
        *self = match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        };
        *self
    }

    /// Label of the toggle button, naming the mode it switches to.
    #[must_use]
    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Light => "🌙 Night",
            Self::Dark => "☀️ Light",
        }
    }

    /// Class applied to the page body.
    #[must_use]
    pub const fn body_class(self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Dark => "dark-mode",
        }
    }
}
