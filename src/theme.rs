use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// A color given as `#RRGGBB`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("invalid color {0:?}, expected #RRGGBB")]
pub struct ParseColorError(String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(raw.to_owned());
        let hex = raw.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
        Ok(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Rgb {
    /// Linear blend towards `other`; `t` is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn blend(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self(
            lerp_u8(self.0, other.0, t),
            lerp_u8(self.1, other.1, t),
            lerp_u8(self.2, other.2, t),
        )
    }
}

fn lerp_u8(from: u8, to: u8, t: f32) -> u8 {
    ((from as f32) + ((to as f32) - (from as f32)) * t).round() as u8
}

/// The three colors a theme contributes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
pub struct ThemeColors {
    pub background: Rgb,
    pub snake: Rgb,
    pub food: Rgb,
}

/// Named theme as it appears in the config file.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct ThemeDef {
    pub name: String,
    #[serde(flatten)]
    pub colors: ThemeColors,
}

const BUILTIN_THEMES: &[(&str, ThemeColors)] = &[
    (
        "classic",
        ThemeColors {
            background: Rgb(0xE8, 0xE9, 0xEB),
            snake: Rgb(0xE4, 0xB3, 0x63),
            food: Rgb(0xEF, 0x64, 0x61),
        },
    ),
    (
        "retro",
        ThemeColors {
            background: Rgb(0x1E, 0x1E, 0x1E),
            snake: Rgb(0x00, 0xFF, 0x00),
            food: Rgb(0xFF, 0x00, 0x00),
        },
    ),
    (
        "aquatic",
        ThemeColors {
            background: Rgb(0x4A, 0x90, 0xD9),
            snake: Rgb(0x28, 0x52, 0x38),
            food: Rgb(0xFA, 0xD8, 0x48),
        },
    ),
    (
        "desert",
        ThemeColors {
            background: Rgb(0xE9, 0xC4, 0x6A),
            snake: Rgb(0x26, 0x46, 0x53),
            food: Rgb(0xF4, 0xA2, 0x61),
        },
    ),
    (
        "night",
        ThemeColors {
            background: Rgb(0x1F, 0x1F, 0x3D),
            snake: Rgb(0xE6, 0x39, 0x46),
            food: Rgb(0xF1, 0xFA, 0xEE),
        },
    ),
];

#[derive(Debug, Clone)]
struct ThemeItem {
    id: String,
    colors: ThemeColors,
}

/// Ordered theme table with a current selection.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<ThemeItem>,
    selected_idx: usize,
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::with_overrides(&[])
    }
}

impl ThemeCatalog {
    /// Built-in themes, then `overrides` replacing same-named entries or appended.
    #[must_use]
    pub fn with_overrides(overrides: &[ThemeDef]) -> Self {
        let mut themes: Vec<ThemeItem> = BUILTIN_THEMES
            .iter()
            .map(|(id, colors)| ThemeItem {
                id: (*id).to_owned(),
                colors: *colors,
            })
            .collect();

        for def in overrides {
            match themes.iter_mut().find(|item| item.id == def.name) {
                Some(item) => item.colors = def.colors,
                None => themes.push(ThemeItem {
                    id: def.name.clone(),
                    colors: def.colors,
                }),
            }
        }

        Self {
            themes,
            selected_idx: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> &ThemeColors {
        &self.themes[self.selected_idx].colors
    }

    #[must_use]
    pub fn current_id(&self) -> &str {
        &self.themes[self.selected_idx].id
    }

    pub fn select_next(&mut self) {
        self.selected_idx = (self.selected_idx + 1) % self.themes.len();
    }

    pub fn select_previous(&mut self) {
        self.selected_idx = if self.selected_idx == 0 {
            self.themes.len() - 1
        } else {
            self.selected_idx - 1
        };
    }

    #[must_use]
    pub fn select_by_id(&mut self, id: &str) -> bool {
        if let Some(idx) = self.themes.iter().position(|theme| theme.id == id) {
            self.selected_idx = idx;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::{Rgb, ThemeCatalog, ThemeColors, ThemeDef};

    #[test]
    fn hex_colors_parse() {
        assert_eq!("#E4B363".parse::<Rgb>(), Ok(Rgb(0xE4, 0xB3, 0x63)));
        assert_eq!("#00ff00".parse::<Rgb>(), Ok(Rgb(0, 255, 0)));
        assert!("E4B363".parse::<Rgb>().is_err());
        assert!("#E4B36".parse::<Rgb>().is_err());
        assert!("#GGGGGG".parse::<Rgb>().is_err());
        assert_eq!(Rgb(0xE4, 0xB3, 0x63).to_string(), "#E4B363");
    }

    #[test]
    fn blend_hits_both_endpoints() {
        let from = Rgb(0, 100, 200);
        let to = Rgb(200, 100, 0);

        assert_eq!(from.blend(to, 0.0), from);
        assert_eq!(from.blend(to, 1.0), to);
        assert_eq!(from.blend(to, 0.5), Rgb(100, 100, 100));
    }

    #[test]
    fn catalog_cycles_through_builtins() {
        let mut catalog = ThemeCatalog::default();
        assert_eq!(catalog.current_id(), "classic");

        for _ in 0..5 {
            catalog.select_next();
        }
        assert_eq!(catalog.current_id(), "classic");

        catalog.select_previous();
        assert_eq!(catalog.current_id(), "night");
        catalog.select_next();
        catalog.select_next();
        assert_eq!(catalog.current_id(), "retro");

        assert!(catalog.select_by_id("desert"));
        assert!(!catalog.select_by_id("missing"));
        assert_eq!(catalog.current_id(), "desert");
    }

    #[test]
    fn overrides_replace_or_append() {
        let colors = ThemeColors {
            background: Rgb(1, 2, 3),
            snake: Rgb(4, 5, 6),
            food: Rgb(7, 8, 9),
        };
        let mut catalog = ThemeCatalog::with_overrides(&[
            ThemeDef {
                name: "retro".to_owned(),
                colors,
            },
            ThemeDef {
                name: "mono".to_owned(),
                colors,
            },
        ]);

        assert!(catalog.select_by_id("retro"));
        assert_eq!(*catalog.current(), colors);

        // The appended theme sits last, right before wrapping to the first.
        catalog.select_previous();
        assert_eq!(catalog.current_id(), "classic");
        catalog.select_previous();
        assert_eq!(catalog.current_id(), "mono");
    }
}
