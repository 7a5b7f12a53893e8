//! Dark and light color palettes.

use bevy::prelude::*;
use dreamstory_logic::factors::FactorTier;

pub struct Palette {
    pub background: Color,
    pub panel: Color,
    pub button: Color,
    pub button_hover: Color,
    pub button_selected: Color,
    pub button_disabled: Color,
    pub text: Color,
    pub text_dim: Color,
    pub accent: Color,
    pub good: Color,
    pub fair: Color,
    pub poor: Color,
}

pub const DARK: Palette = Palette {
    background: Color::srgb(0.08, 0.08, 0.12),
    panel: Color::srgb(0.14, 0.14, 0.2),
    button: Color::srgb(0.22, 0.22, 0.3),
    button_hover: Color::srgb(0.3, 0.3, 0.42),
    button_selected: Color::srgb(0.35, 0.3, 0.6),
    button_disabled: Color::srgb(0.15, 0.15, 0.18),
    text: Color::srgb(0.92, 0.92, 0.95),
    text_dim: Color::srgb(0.5, 0.5, 0.55),
    accent: Color::srgb(1.0, 0.85, 0.4),
    good: Color::srgb(0.4, 0.85, 0.45),
    fair: Color::srgb(0.95, 0.8, 0.3),
    poor: Color::srgb(0.9, 0.35, 0.35),
};

pub const LIGHT: Palette = Palette {
    background: Color::srgb(0.96, 0.96, 0.98),
    panel: Color::srgb(0.88, 0.88, 0.93),
    button: Color::srgb(0.8, 0.8, 0.88),
    button_hover: Color::srgb(0.72, 0.72, 0.84),
    button_selected: Color::srgb(0.62, 0.55, 0.9),
    button_disabled: Color::srgb(0.9, 0.9, 0.92),
    text: Color::srgb(0.1, 0.1, 0.14),
    text_dim: Color::srgb(0.45, 0.45, 0.5),
    accent: Color::srgb(0.75, 0.45, 0.0),
    good: Color::srgb(0.15, 0.6, 0.25),
    fair: Color::srgb(0.75, 0.55, 0.0),
    poor: Color::srgb(0.8, 0.15, 0.15),
};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Label for the button that switches away from this theme.
    pub fn switch_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light",
            Theme::Light => "Dark",
        }
    }
}

impl Palette {
    pub fn tier(&self, tier: FactorTier) -> Color {
        match tier {
            FactorTier::Good => self.good,
            FactorTier::Fair => self.fair,
            FactorTier::Poor => self.poor,
        }
    }
}
