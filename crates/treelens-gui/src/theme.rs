/// Colour scheme for the TreeLens window chrome.
///
/// Treemap tiles and size bars take their colours from the engine
/// (`treelens_core::color`); this module only styles panels, text and the
/// selection highlight around them.
use egui::{Color32, Stroke, Visuals};
use treelens_core::color::{
    size_band_color, Rgb, DEFAULT_DIR_COLOR, DEFAULT_FILE_COLOR, HIGHLIGHT_COLOR,
};

/// Semantic colour palette.
pub struct TreeLensTheme {
    pub dark: bool,
    pub background: Color32,
    pub surface: Color32,
    pub surface_hover: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub folder_icon: Color32,
    pub file_icon: Color32,
    pub error: Color32,
    pub success: Color32,
    pub separator: Color32,
    pub selection: Color32,
    pub header_bg: Color32,
    /// Outline of the selected treemap tile.
    pub highlight: Color32,
    /// Label text drawn on top of treemap tiles.
    pub tile_label: Color32,
}

/// The handful of tones every other colour is mixed from.
struct BaseTones {
    ground: Color32,
    ink: Color32,
    accent: Color32,
    error: Color32,
    success: Color32,
}

impl TreeLensTheme {
    /// Slate background with the directory blue as accent. The default.
    pub fn dark() -> Self {
        Self::from_tones(
            true,
            BaseTones {
                ground: Color32::from_rgb(0x1b, 0x20, 0x26),
                ink: Color32::from_rgb(0xe6, 0xea, 0xee),
                accent: to_color32(DEFAULT_DIR_COLOR),
                error: Color32::from_rgb(0xe7, 0x4c, 0x3c),
                success: Color32::from_rgb(0x2e, 0xcc, 0x71),
            },
        )
    }

    pub fn light() -> Self {
        Self::from_tones(
            false,
            BaseTones {
                ground: Color32::from_rgb(0xf4, 0xf6, 0xf8),
                ink: Color32::from_rgb(0x1f, 0x2a, 0x33),
                accent: to_color32(DEFAULT_DIR_COLOR.darken(0.8)),
                error: Color32::from_rgb(0xc0, 0x39, 0x2b),
                success: Color32::from_rgb(0x27, 0xae, 0x60),
            },
        )
    }

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    fn from_tones(dark: bool, t: BaseTones) -> Self {
        let mix = |amount: f32| lerp(t.ground, t.ink, amount);
        Self {
            dark,
            background: t.ground,
            surface: mix(0.06),
            surface_hover: mix(0.12),
            text_primary: t.ink,
            text_secondary: mix(0.75),
            text_muted: mix(0.45),
            accent: t.accent,
            folder_icon: t.accent,
            file_icon: to_color32(DEFAULT_FILE_COLOR),
            error: t.error,
            success: t.success,
            separator: mix(0.18),
            selection: lerp(t.ground, t.accent, 0.3),
            header_bg: mix(0.03),
            highlight: to_color32(HIGHLIGHT_COLOR),
            tile_label: Color32::WHITE,
        }
    }

    /// Apply this theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.window_stroke = Stroke::new(1.0, self.separator);
        visuals.extreme_bg_color = self.header_bg;
        visuals.faint_bg_color = self.surface;
        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        let widgets = &mut visuals.widgets;
        for (w, fill, fg) in [
            (&mut widgets.noninteractive, self.background, self.text_primary),
            (&mut widgets.inactive, self.surface, self.text_secondary),
            (&mut widgets.hovered, self.surface_hover, self.accent),
            (&mut widgets.active, self.accent, self.background),
        ] {
            w.bg_fill = fill;
            w.weak_bg_fill = fill;
            w.fg_stroke = Stroke::new(1.0, fg);
        }

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(6.0, 4.0);
        style.spacing.button_padding = egui::vec2(6.0, 3.0);
        ctx.set_style(style);
    }

    /// Size-bar fill for a percentage of the parent (0.0 – 100.0).
    pub fn bar_color(&self, percent: f32) -> Color32 {
        to_color32(size_band_color(percent))
    }
}

pub fn to_color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

fn lerp(a: Color32, b: Color32, t: f32) -> Color32 {
    let ch = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(ch(a.r(), b.r()), ch(a.g(), b.g()), ch(a.b(), b.b()))
}
