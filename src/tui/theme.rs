//! Theme definitions for the TUI
//!
//! Colorblind-safe themes for both dark and light terminals. The default is
//! "dark" but users can configure "light" via config file or env var.

use ratatui::style::Color;

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeName::Light,
            _ => ThemeName::Dark,
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,

    // Base colors
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,

    // Status colors (colorblind-safe)
    pub active: Color,
    pub completed: Color,
    pub failed: Color,
    pub pending: Color,
    pub skipped: Color,

    // UI elements
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub stale_indicator: Color,
    pub placeholder: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,

            fg: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            // Colorblind-safe palette for dark backgrounds
            active: Color::Rgb(0, 200, 0),       // Bright green
            completed: Color::Rgb(80, 160, 255), // Light blue
            failed: Color::Rgb(255, 80, 80),     // Bright red
            pending: Color::Rgb(255, 180, 0),    // Orange
            skipped: Color::DarkGray,

            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,
            header_bg: Color::Rgb(40, 80, 120),
            header_fg: Color::White,
            stale_indicator: Color::Rgb(255, 100, 100),
            placeholder: Color::DarkGray,
        }
    }

    /// Create a light theme
    /// Uses darker, more saturated colors for visibility on light backgrounds
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,

            fg: Color::Black,
            border: Color::Rgb(120, 120, 120),
            border_focused: Color::Rgb(0, 100, 180),

            active: Color::Rgb(0, 140, 0),
            completed: Color::Rgb(0, 80, 180),
            failed: Color::Rgb(200, 0, 0),
            pending: Color::Rgb(200, 120, 0),
            skipped: Color::Rgb(100, 100, 100),

            selected_bg: Color::Rgb(200, 220, 255),
            selected_fg: Color::Black,
            header_bg: Color::Rgb(180, 200, 230),
            header_fg: Color::Black,
            stale_indicator: Color::Rgb(200, 0, 0),
            placeholder: Color::Rgb(100, 100, 100),
        }
    }

    /// Create theme from name string
    pub fn from_name(name: &str) -> Self {
        match ThemeName::from_str(name) {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Color for a Spark status string (jobs, stages, and tasks share these)
    pub fn status_color(&self, status: &str) -> Color {
        match status.to_uppercase().as_str() {
            "RUNNING" | "ACTIVE" => self.active,
            "SUCCEEDED" | "COMPLETE" | "SUCCESS" | "COMPLETED" => self.completed,
            "FAILED" | "KILLED" | "ERROR" => self.failed,
            "PENDING" => self.pending,
            "SKIPPED" => self.skipped,
            _ => self.fg,
        }
    }

    /// Color for an application row (completed vs still running)
    pub fn app_status_color(&self, completed: bool) -> Color {
        if completed {
            self.completed
        } else {
            self.active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let dark = Theme::from_name("dark");
        assert_eq!(dark.name, ThemeName::Dark);

        let light = Theme::from_name("light");
        assert_eq!(light.name, ThemeName::Light);

        // Unknown defaults to dark
        let unknown = Theme::from_name("unknown");
        assert_eq!(unknown.name, ThemeName::Dark);
    }

    #[test]
    fn test_status_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.status_color("RUNNING"), theme.active);
        assert_eq!(theme.status_color("succeeded"), theme.completed);
        assert_eq!(theme.status_color("FAILED"), theme.failed);
        assert_eq!(theme.status_color("SKIPPED"), theme.skipped);
        assert_eq!(theme.status_color("weird"), theme.fg);
    }

    #[test]
    fn test_app_status_color() {
        let theme = Theme::light();
        assert_eq!(theme.app_status_color(true), theme.completed);
        assert_eq!(theme.app_status_color(false), theme.active);
    }
}
