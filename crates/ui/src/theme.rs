use egui::{Color32, Rounding, Stroke, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ThemeTokens {
    /// Brand green, also used for hit results.
    pub accent_hit: Color32,
    pub accent_miss: Color32,
    pub idle: Color32,
    pub neutral_bg: Color32,
    pub neutral_surface: Color32,
    pub neutral_panel: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub grid: Color32,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub tokens: ThemeTokens,
    pub visuals: Visuals,
}

pub fn theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => dark(),
        ThemeMode::Light => light(),
    }
}

pub fn dark() -> Theme {
    let tokens = ThemeTokens {
        accent_hit: Color32::from_rgb(0x1D, 0xB9, 0x54),
        accent_miss: Color32::from_rgb(0xE5, 0x39, 0x35),
        idle: Color32::from_rgb(0xB3, 0xB3, 0xB3),
        neutral_bg: Color32::from_rgb(0x12, 0x12, 0x12),
        neutral_surface: Color32::from_rgb(0x18, 0x18, 0x18),
        neutral_panel: Color32::from_rgb(0x28, 0x28, 0x28),
        text_primary: Color32::from_rgb(0xFF, 0xFF, 0xFF),
        text_muted: Color32::from_rgb(0xB3, 0xB3, 0xB3),
        grid: Color32::from_rgba_unmultiplied(255, 255, 255, 38),
    };

    let mut visuals = Visuals::dark();
    visuals.window_rounding = Rounding::same(12.0);
    visuals.panel_fill = tokens.neutral_surface;
    visuals.extreme_bg_color = tokens.neutral_bg;
    visuals.widgets.noninteractive.bg_fill = tokens.neutral_surface;
    visuals.widgets.inactive.bg_fill = tokens.neutral_panel;
    visuals.widgets.hovered.bg_fill = tokens.neutral_panel.linear_multiply(1.2);
    visuals.widgets.active.bg_fill = tokens.accent_hit;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, tokens.text_primary);
    visuals.selection.bg_fill = tokens.accent_hit;
    visuals.selection.stroke = Stroke::new(1.0, tokens.text_primary);

    Theme { tokens, visuals }
}

pub fn light() -> Theme {
    let tokens = ThemeTokens {
        accent_hit: Color32::from_rgb(0x1A, 0xA3, 0x4A),
        accent_miss: Color32::from_rgb(0xD3, 0x2F, 0x2F),
        idle: Color32::from_rgb(0x9E, 0x9E, 0x9E),
        neutral_bg: Color32::from_rgb(0xF4, 0xF6, 0xF8),
        neutral_surface: Color32::from_rgb(0xFA, 0xFB, 0xFC),
        neutral_panel: Color32::from_rgb(0xE7, 0xEB, 0xF0),
        text_primary: Color32::from_rgb(0x19, 0x14, 0x14),
        text_muted: Color32::from_rgb(0x6A, 0x6A, 0x6A),
        grid: Color32::from_rgba_unmultiplied(0, 0, 0, 38),
    };

    let mut visuals = Visuals::light();
    visuals.window_rounding = Rounding::same(12.0);
    visuals.panel_fill = tokens.neutral_bg;
    // Sliders need visible tracks on the pale background
    visuals.widgets.noninteractive.bg_fill = tokens.neutral_surface;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Color32::from_gray(190));
    visuals.widgets.inactive.bg_fill = tokens.neutral_panel;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, tokens.text_primary);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_gray(200));
    visuals.widgets.active.bg_fill = tokens.accent_hit;
    visuals.selection.bg_fill = tokens.accent_hit;
    visuals.selection.stroke = Stroke::new(1.0, tokens.text_primary);

    Theme { tokens, visuals }
}

pub fn apply(ctx: &egui::Context, mode: ThemeMode) {
    ctx.set_visuals(theme(mode).visuals);
}
