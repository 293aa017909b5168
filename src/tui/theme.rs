//! Centralized theme module for form color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::output::gradient_rgb;
use crate::scoring::Tier;

/// Complete color palette for the form
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Interpretation colors (success/info/warning/error)
    pub tier_excellent: Color,
    pub tier_good: Color,
    pub tier_moderate: Color,
    pub tier_low: Color,

    // Gauge
    pub gauge_empty: Color,
    pub needle: Color,

    // Form
    pub section_title: Style,
    pub field_label: Color,
    pub field_value: Color,
    pub field_selected: Style,
    pub slider_filled: Color,
    pub slider_empty: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub border: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub stale: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    /// Dark terminal palette
    pub fn dark() -> Self {
        Self {
            tier_excellent: Color::Green,
            tier_good: Color::Cyan,
            tier_moderate: Color::Yellow,
            tier_low: Color::Red,
            gauge_empty: Color::DarkGray,
            needle: Color::White,
            section_title: Style::new().fg(Color::Rgb(43, 136, 216)).bold(),
            field_label: Color::Gray,
            field_value: Color::White,
            field_selected: Style::new().reversed(),
            slider_filled: Color::Rgb(0, 120, 215),
            slider_empty: Color::Indexed(238),
            muted: Color::Gray,
            title_color: Color::Rgb(43, 136, 216),
            border: Color::Indexed(240),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            stale: Color::Yellow,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    /// Light terminal palette
    pub fn light() -> Self {
        Self {
            tier_excellent: Color::Rgb(16, 124, 16),
            tier_good: Color::Rgb(0, 120, 215),
            tier_moderate: Color::Rgb(157, 93, 0),
            tier_low: Color::Rgb(196, 43, 28),
            gauge_empty: Color::Indexed(252),
            needle: Color::Black,
            section_title: Style::new().fg(Color::Rgb(0, 120, 215)).bold(),
            field_label: Color::Rgb(51, 51, 51),
            field_value: Color::Black,
            field_selected: Style::new().fg(Color::White).bg(Color::Rgb(0, 120, 215)),
            slider_filled: Color::Rgb(16, 110, 190),
            slider_empty: Color::Indexed(250),
            muted: Color::Indexed(244),
            title_color: Color::Rgb(0, 120, 215),
            border: Color::Indexed(248),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Rgb(0, 120, 215),
            flash_success: Color::Rgb(16, 124, 16),
            stale: Color::Rgb(157, 93, 0),
            popup_border: Color::Rgb(0, 120, 215),
            popup_title: Style::new().fg(Color::Rgb(0, 120, 215)).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Excellent => self.tier_excellent,
            Tier::Good => self.tier_good,
            Tier::Moderate => self.tier_moderate,
            Tier::Low => self.tier_low,
        }
    }

    /// Gauge cell color at `percent` of the 0-100 scale (low red, high green)
    pub fn gauge_color(&self, percent: f64) -> Color {
        let (r, g, b) = gradient_rgb(percent);
        Color::Rgb(r, g, b)
    }
}

/// Pick the palette for `mode`, probing the terminal background for `Auto`.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                crate::verbose_eprintln!("Could not detect terminal background ({}), using dark theme", e);
                ThemeColors::dark()
            }
        },
    }
}
