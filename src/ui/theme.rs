use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Zinc,
    Nord,
    Light,
    SolarizedDark,
}

impl ThemeVariant {
    pub fn cycle(&self) -> Self {
        match self {
            Self::Zinc => Self::Nord,
            Self::Nord => Self::Light,
            Self::Light => Self::SolarizedDark,
            Self::SolarizedDark => Self::Zinc,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Zinc => "Zinc",
            Self::Nord => "Nord",
            Self::Light => "Light",
            Self::SolarizedDark => "Solarized Dark",
        }
    }

    /// Parse a theme name from config or the command line (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
            "zinc" => Some(Self::Zinc),
            "nord" => Some(Self::Nord),
            "light" => Some(Self::Light),
            "solarized-dark" | "solarized" => Some(Self::SolarizedDark),
            _ => None,
        }
    }
}

/// Colours for what the browser shows: entries, the watch indicator, dialogs.
pub struct Theme {
    pub variant: ThemeVariant,
    pub background: Color,
    /// Selected row and dialog fill.
    pub highlight: Color,
    pub text: Color,
    pub text_dim: Color,
    pub frame: Color,
    pub frame_dim: Color,
    pub directory: Color,
    /// Path bar dot while changes arrive live.
    pub watch_live: Color,
    /// Path bar dot when the folder is listed but no longer watched.
    pub watch_lost: Color,
    pub error: Color,
    pub cursor: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        // background, highlight, text, text_dim, frame, frame_dim, directory, live, lost, error, cursor
        let c: [u32; 11] = match variant {
            ThemeVariant::Zinc => [
                0x09090b, 0x27272a, 0xf4f4f5, 0xa1a1aa, 0x52525b, 0x27272a, 0x60a5fa, 0x22c55e, 0xf59e0b,
                0xef4444, 0xe4e4e7,
            ],
            ThemeVariant::Nord => [
                0x2e3440, 0x434c5e, 0xeceff4, 0xd8dee9, 0x88c0d0, 0x4c566a, 0x81a1c1, 0xa3be8c, 0xebcb8b,
                0xbf616a, 0x88c0d0,
            ],
            ThemeVariant::Light => [
                0xffffff, 0xe4e4e7, 0x18181b, 0x71717a, 0x52525b, 0xd4d4d8, 0x1d4ed8, 0x16a34a, 0xca8a04,
                0xdc2626, 0x18181b,
            ],
            ThemeVariant::SolarizedDark => [
                0x002b36, 0x073642, 0x93a1a1, 0x586e75, 0x2aa198, 0x073642, 0x268bd2, 0x859900, 0xb58900,
                0xdc322f, 0xeee8d5,
            ],
        };

        Self {
            variant,
            background: rgb(c[0]),
            highlight: rgb(c[1]),
            text: rgb(c[2]),
            text_dim: rgb(c[3]),
            frame: rgb(c[4]),
            frame_dim: rgb(c[5]),
            directory: rgb(c[6]),
            watch_live: rgb(c[7]),
            watch_lost: rgb(c[8]),
            error: rgb(c[9]),
            cursor: rgb(c[10]),
        }
    }

    pub fn cycle(&mut self) {
        *self = Self::new(self.variant.cycle());
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::Zinc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_variant() {
        let mut theme = Theme::default();
        let mut seen = vec![theme.variant];
        for _ in 0..3 {
            theme.cycle();
            seen.push(theme.variant);
        }
        theme.cycle();

        assert_eq!(theme.variant, ThemeVariant::Zinc);
        assert_eq!(
            seen,
            [ThemeVariant::Zinc, ThemeVariant::Nord, ThemeVariant::Light, ThemeVariant::SolarizedDark]
        );
    }

    #[test]
    fn test_watch_states_and_entry_kinds_are_distinguishable() {
        let mut theme = Theme::default();
        for _ in 0..4 {
            assert_ne!(theme.watch_live, theme.watch_lost, "{}", theme.variant.name());
            assert_ne!(theme.directory, theme.text, "{}", theme.variant.name());
            assert_ne!(theme.highlight, theme.background, "{}", theme.variant.name());
            theme.cycle();
        }
    }

    #[test]
    fn test_rgb_unpacks_hex() {
        assert_eq!(rgb(0x2e3440), Color::Rgb(0x2e, 0x34, 0x40));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ThemeVariant::from_name("Nord"), Some(ThemeVariant::Nord));
        assert_eq!(ThemeVariant::from_name("Solarized Dark"), Some(ThemeVariant::SolarizedDark));
        assert_eq!(ThemeVariant::from_name("solarized_dark"), Some(ThemeVariant::SolarizedDark));
        assert_eq!(ThemeVariant::from_name("sepia"), None);
    }
}
