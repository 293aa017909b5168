pub mod formatter;

pub use formatter::{
    format_breakdown, format_gauge, format_histogram, format_inputs, format_interpretation,
    format_json, format_recommendations, format_report, gauge_width, get_terminal_width,
    gradient_rgb, needle_position, should_use_colors, ABOUT, DISCLAIMER,
};
