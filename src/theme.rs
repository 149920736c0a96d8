use std::str::FromStr;

use ratatui::style::Color;

/// The two display themes. Toggled independently of everything else and
/// persisted immediately under `bm-map-theme`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                fg: Color::Black,
                dim: Color::DarkGray,
                accent: Color::Red,
                highlight: Color::LightRed,
                border: Color::Gray,
            },
            Self::Dark => Palette {
                fg: Color::White,
                dim: Color::Gray,
                accent: Color::LightRed,
                highlight: Color::Yellow,
                border: Color::DarkGray,
            },
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}

/// Per-theme color roles used by the render layer.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub highlight: Color,
    pub border: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_both_ways() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn string_round_trip() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
        assert!("midnight".parse::<Theme>().is_err());
    }

    #[test]
    fn default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }
}
