use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from config. Only the first call has any effect.
pub fn init(theme: Theme) {
    let _ = THEME.set(theme);
}

/// Get the active theme, falling back to the default palette.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

const SLATE_800: Color = Color::Rgb(30, 41, 59);
const SLATE_400: Color = Color::Rgb(148, 163, 184);
const SLATE_500: Color = Color::Rgb(100, 116, 139);
const ROSE_500: Color = Color::Rgb(244, 63, 94);
const ROSE_300: Color = Color::Rgb(253, 164, 175);
const EMERALD_400: Color = Color::Rgb(52, 211, 153);
const EMERALD_600: Color = Color::Rgb(5, 150, 105);

#[derive(Debug, Clone)]
pub struct Theme {
    #[allow(dead_code)]
    pub name: String,
    pub header: Style,
    pub subtitle: Style,
    pub weekday: Style,
    pub weekend: Style,
    pub day: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub selected: Style,
    pub today: Style,
    pub reporting_day: Style,
    pub reporting: Style,
    pub holiday: Style,
    pub other: Style,
    pub tip: Style,
    pub action: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            header: Style::default().fg(Color::White).bg(SLATE_800).add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(SLATE_400).bg(SLATE_800),
            weekday: Style::default().fg(SLATE_400).add_modifier(Modifier::BOLD),
            weekend: Style::default().fg(ROSE_500).add_modifier(Modifier::BOLD),
            day: Style::default(),
            dim: Style::default().fg(SLATE_500),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(SLATE_800),
            selected: Style::default().fg(Color::White).bg(EMERALD_600).add_modifier(Modifier::BOLD),
            today: Style::default().fg(Color::Black).bg(EMERALD_400),
            reporting_day: Style::default().fg(ROSE_300).add_modifier(Modifier::BOLD),
            reporting: Style::default().fg(ROSE_300).add_modifier(Modifier::BOLD),
            holiday: Style::default().fg(EMERALD_400),
            other: Style::default().fg(SLATE_400),
            tip: Style::default().add_modifier(Modifier::ITALIC),
            action: Style::default().fg(EMERALD_400).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        config.clone().into_theme()
    }

    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn nord() -> Self {
        let polar = Color::Rgb(59, 66, 82);
        let snow = Color::Rgb(229, 233, 240);
        let frost = Color::Rgb(136, 192, 208);
        let aurora_red = Color::Rgb(191, 97, 106);
        let aurora_green = Color::Rgb(163, 190, 140);
        Self {
            name: "nord".to_string(),
            header: Style::default().fg(snow).bg(polar).add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::Rgb(216, 222, 233)).bg(polar),
            weekday: Style::default().fg(frost).add_modifier(Modifier::BOLD),
            weekend: Style::default().fg(aurora_red).add_modifier(Modifier::BOLD),
            day: Style::default().fg(snow),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default().fg(snow).bg(polar),
            selected: Style::default().fg(Color::Black).bg(frost).add_modifier(Modifier::BOLD),
            today: Style::default().fg(Color::Black).bg(aurora_green),
            reporting_day: Style::default().fg(aurora_red).add_modifier(Modifier::BOLD),
            reporting: Style::default().fg(aurora_red).add_modifier(Modifier::BOLD),
            holiday: Style::default().fg(aurora_green),
            other: Style::default().fg(Color::Rgb(216, 222, 233)),
            tip: Style::default().fg(snow).add_modifier(Modifier::ITALIC),
            action: Style::default().fg(aurora_green).add_modifier(Modifier::BOLD),
        }
    }

    pub fn category(&self, category: crate::calendar::Category) -> Style {
        use crate::calendar::Category;
        match category {
            Category::Reporting => self.reporting,
            Category::Holiday => self.holiday,
            Category::Other => self.other,
        }
    }
}

// ── [theme] section of config.toml ──

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    preset: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    today_fg: Option<String>,
    today_bg: Option<String>,
    reporting_fg: Option<String>,
    holiday_fg: Option<String>,
    other_fg: Option<String>,
    header_fg: Option<String>,
    header_bg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        if let Some(c) = self.selected_fg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.today_fg.as_deref().and_then(parse_color) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.reporting_fg.as_deref().and_then(parse_color) {
            theme.reporting = theme.reporting.fg(c);
            theme.reporting_day = theme.reporting_day.fg(c);
        }
        if let Some(c) = self.holiday_fg.as_deref().and_then(parse_color) {
            theme.holiday = theme.holiday.fg(c);
        }
        if let Some(c) = self.other_fg.as_deref().and_then(parse_color) {
            theme.other = theme.other.fg(c);
        }
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.header_bg.as_deref().and_then(parse_color) {
            theme.header = theme.header.bg(c);
            theme.subtitle = theme.subtitle.bg(c);
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(parse_color("#f43f5e"), Some(Color::Rgb(244, 63, 94)));
        assert_eq!(parse_color(" Cyan "), Some(Color::Cyan));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#зел"), None);
        assert_eq!(parse_color("teal"), None);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config: ThemeConfig = toml::from_str(
            r##"
            preset = "nord"
            reporting_fg = "red"
            "##,
        )
        .unwrap();

        let theme = Theme::from_config(&config);
        assert_eq!(theme.name, "nord");
        assert_eq!(theme.reporting.fg, Some(Color::Red));
        assert_eq!(theme.reporting_day.fg, Some(Color::Red));
    }

    #[test]
    fn unknown_preset_is_default() {
        assert_eq!(Theme::preset("solarized").name, "default");
    }
}
