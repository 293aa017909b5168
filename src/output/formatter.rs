use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::inputs::{Field, InputRecord};
use crate::sample::Histogram;
use crate::scoring::{Prediction, Tier};

pub const ABOUT: &str = "\
A cognitive score estimates your brain's performance in areas like
memory and recall, focus and attention, processing speed and problem-solving.

Factors that influence scores:
  Sleep: impacts memory and restoration.
  Stress: chronic stress reduces focus.
  Diet & caffeine: fuel or hinder mental clarity.
  Exercise: supports brain plasticity.
  Screen time: impacts attention and sleep.";

pub const DISCLAIMER: &str =
    "Note: this tool is for educational purposes. Please consult a healthcare provider for clinical assessments.";

const GAUGE_MIN_WIDTH: usize = 21;
const GAUGE_MAX_WIDTH: usize = 61;
const TICKS: [u32; 5] = [0, 25, 50, 75, 100];

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors(no_color: bool) -> bool {
    !no_color && std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
pub fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Gauge width for the current terminal: odd, so 50 sits on a cell
pub fn gauge_width(term_width: Option<usize>) -> usize {
    let width = term_width
        .map(|w| w.saturating_sub(4))
        .unwrap_or(GAUGE_MAX_WIDTH)
        .clamp(GAUGE_MIN_WIDTH, GAUGE_MAX_WIDTH);
    if width % 2 == 0 {
        width - 1
    } else {
        width
    }
}

/// RGB color at `percent` along a red → yellow → green ramp.
pub fn gradient_rgb(percent: f64) -> (u8, u8, u8) {
    const RED: (f64, f64, f64) = (215.0, 48.0, 39.0);
    const YELLOW: (f64, f64, f64) = (254.0, 224.0, 139.0);
    const GREEN: (f64, f64, f64) = (26.0, 152.0, 80.0);

    let p = percent.clamp(0.0, 100.0) / 100.0;
    let (from, to, t) = if p < 0.5 {
        (RED, YELLOW, p * 2.0)
    } else {
        (YELLOW, GREEN, (p - 0.5) * 2.0)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    (lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Cell index of `score` on a gauge `width` cells wide.
pub fn needle_position(score: f64, width: usize) -> usize {
    let ratio = score.clamp(0.0, 100.0) / 100.0;
    (ratio * (width.saturating_sub(1)) as f64).round() as usize
}

/// Three-line horizontal gauge: tick labels, colored bar, needle.
pub fn format_gauge(score: f64, width: usize, use_colors: bool) -> String {
    let width = width.max(GAUGE_MIN_WIDTH);

    // Tick labels, centered on their cells where possible
    let mut labels = vec![' '; width + 2];
    for tick in TICKS {
        let text = tick.to_string();
        let center = needle_position(tick as f64, width);
        let start = (center + 1).saturating_sub(text.len() / 2).min(labels.len() - text.len());
        for (i, c) in text.chars().enumerate() {
            labels[start + i] = c;
        }
    }
    let labels: String = labels.into_iter().collect::<String>().trim_end().to_string();

    let bar: String = (0..width)
        .map(|i| {
            let percent = i as f64 / (width - 1) as f64 * 100.0;
            if use_colors {
                let (r, g, b) = gradient_rgb(percent);
                "█".truecolor(r, g, b).to_string()
            } else {
                "█".to_string()
            }
        })
        .collect();

    let needle_at = needle_position(score, width);
    let needle = format!("{}▲", " ".repeat(needle_at + 1));

    format!("{}\n[{}]\n{}", labels, bar, needle)
}

/// Interpretation line, colored by tier.
pub fn format_interpretation(prediction: &Prediction, use_colors: bool) -> String {
    let message = prediction.interpretation();
    if !use_colors {
        return message;
    }
    match prediction.tier {
        Tier::Excellent => message.green().bold().to_string(),
        Tier::Good => message.blue().to_string(),
        Tier::Moderate => message.yellow().to_string(),
        Tier::Low => message.red().bold().to_string(),
    }
}

/// Numbered recommendations, or the optimal-lifestyle line.
pub fn format_recommendations(prediction: &Prediction) -> String {
    if prediction.recommendations.is_empty() {
        return prediction.advice().join("\n");
    }
    prediction
        .recommendations
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, r))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-factor table: label, normalized value, weight, points.
pub fn format_breakdown(prediction: &Prediction, use_colors: bool) -> String {
    let mut lines: Vec<String> = prediction
        .breakdown
        .iter()
        .map(|c| {
            let line = format!(
                "  {:<14} {:>6.3} x {:.2} = {:>6.2}",
                c.label, c.normalized, c.weight, c.points
            );
            if use_colors && c.points < 0.0 {
                line.red().to_string()
            } else {
                line
            }
        })
        .collect();
    let total: f64 = prediction.breakdown.iter().map(|c| c.points).sum();
    lines.push(format!("  {:<14} {:>25.2}", "Total (raw)", total));
    lines.join("\n")
}

/// Inputs as "Label: value" lines.
pub fn format_inputs(record: &InputRecord) -> String {
    Field::ALL
        .iter()
        .map(|f| format!("  {}: {}", f.label(), f.display_value(record)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

/// Full text report for one prediction.
pub fn format_report(
    record: &InputRecord,
    prediction: &Prediction,
    term_width: Option<usize>,
    show_breakdown: bool,
    use_colors: bool,
) -> String {
    let score_line = format!("{:.1}", prediction.score);
    let mut sections = vec![
        heading("Your Predicted Score", use_colors),
        format_gauge(prediction.score, gauge_width(term_width), use_colors),
        format!(
            "Cognitive Score: {}",
            if use_colors { score_line.bold().to_string() } else { score_line }
        ),
        String::new(),
        heading("Interpretation", use_colors),
        format_interpretation(prediction, use_colors),
        String::new(),
        heading("Recommendations", use_colors),
        format_recommendations(prediction),
    ];

    if show_breakdown {
        sections.push(String::new());
        sections.push(heading("Inputs", use_colors));
        sections.push(format_inputs(record));
        sections.push(String::new());
        sections.push(heading("Score Breakdown", use_colors));
        sections.push(format_breakdown(prediction, use_colors));
    }

    sections.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    inputs: &'a InputRecord,
    score: f64,
    tier: Tier,
    interpretation: String,
    recommendations: &'a [String],
    breakdown: &'a [crate::scoring::FactorContribution],
}

/// Machine-readable report for scripting.
pub fn format_json(record: &InputRecord, prediction: &Prediction) -> Result<String> {
    let report = JsonReport {
        inputs: record,
        score: prediction.score,
        tier: prediction.tier,
        interpretation: prediction.interpretation(),
        recommendations: &prediction.recommendations,
        breakdown: &prediction.breakdown,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize prediction")
}

/// Horizontal bar histogram, one line per bucket.
pub fn format_histogram(histogram: &Histogram, term_width: Option<usize>, use_colors: bool) -> String {
    // "100-100 | " label plus count suffix
    let bar_space = term_width.unwrap_or(80).saturating_sub(20).clamp(10, 50);
    let max = histogram.max_count().max(1);

    histogram
        .counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let low = i as f64 * histogram.bucket_width;
            let high = low + histogram.bucket_width;
            let len = (*count as f64 / max as f64 * bar_space as f64).round() as usize;
            let bar = "█".repeat(len);
            let bar = if use_colors {
                let (r, g, b) = gradient_rgb(low + histogram.bucket_width / 2.0);
                bar.truecolor(r, g, b).to_string()
            } else {
                bar
            };
            format!("{:>3}-{:<3} | {} {}", low as u32, high as u32, bar, count)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::ExerciseFrequency;
    use crate::scoring::{compute, OPTIMAL_MESSAGE};

    fn optimal_prediction() -> (InputRecord, Prediction) {
        let record = InputRecord {
            sleep_duration: 8.0,
            stress_level: 2,
            exercise_frequency: ExerciseFrequency::High,
            ..Default::default()
        };
        let prediction = compute(&record);
        (record, prediction)
    }

    #[test]
    fn test_gauge_width_is_odd_and_bounded() {
        assert_eq!(gauge_width(None), 61);
        assert_eq!(gauge_width(Some(10)), 21);
        assert_eq!(gauge_width(Some(44)), 39);
        assert_eq!(gauge_width(Some(200)), 61);
    }

    #[test]
    fn test_needle_position_endpoints() {
        assert_eq!(needle_position(0.0, 21), 0);
        assert_eq!(needle_position(50.0, 21), 10);
        assert_eq!(needle_position(100.0, 21), 20);
        assert_eq!(needle_position(150.0, 21), 20);
    }

    #[test]
    fn test_gradient_runs_red_to_green() {
        let (r0, g0, _) = gradient_rgb(0.0);
        let (r100, g100, _) = gradient_rgb(100.0);
        assert!(r0 > g0);
        assert!(g100 > r100);
        assert_eq!(gradient_rgb(50.0), (254, 224, 139));
    }

    #[test]
    fn test_gauge_plain_layout() {
        let gauge = format_gauge(50.0, 21, false);
        let lines: Vec<&str> = gauge.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("0 "));
        assert!(lines[0].contains("50"));
        assert!(lines[0].ends_with("100"));
        assert_eq!(lines[1].chars().count(), 23);
        // Needle sits under the middle cell, after the opening bracket
        assert_eq!(lines[2].chars().count(), 12);
        assert!(lines[2].ends_with('▲'));
    }

    #[test]
    fn test_recommendations_numbered() {
        let prediction = compute(&InputRecord {
            stress_level: 9,
            ..Default::default()
        });
        let text = format_recommendations(&prediction);
        assert_eq!(
            text,
            "1. Reduce stress with meditation or exercise.\n2. Increase physical activity (e.g., 30 mins/day)."
        );
    }

    #[test]
    fn test_recommendations_optimal() {
        let (_, prediction) = optimal_prediction();
        assert_eq!(format_recommendations(&prediction), OPTIMAL_MESSAGE);
    }

    #[test]
    fn test_report_plain_sections() {
        let record = InputRecord::default();
        let prediction = compute(&record);
        let report = format_report(&record, &prediction, None, false, false);
        assert!(report.contains("Your Predicted Score"));
        assert!(report.contains("Cognitive Score: 51.7"));
        assert!(report.contains("Moderate score of 51.7."));
        assert!(report.contains("1. Increase physical activity"));
        assert!(!report.contains("Score Breakdown"));
    }

    #[test]
    fn test_no_color_forces_plain_output() {
        assert!(!should_use_colors(true));

        let record = InputRecord::default();
        let prediction = compute(&record);
        let plain = format_report(&record, &prediction, None, true, should_use_colors(true));
        assert!(!plain.contains('\x1b'));

        let colored = format_report(&record, &prediction, None, true, true);
        assert!(colored.contains('\x1b'));
    }

    #[test]
    fn test_report_with_breakdown() {
        let record = InputRecord::default();
        let prediction = compute(&record);
        let report = format_report(&record, &prediction, Some(100), true, false);
        assert!(report.contains("Score Breakdown"));
        assert!(report.contains("Sleep quality"));
        assert!(report.contains("Age: 30"));
        assert!(report.contains("Total (raw)"));
    }

    #[test]
    fn test_json_report_fields() {
        let record = InputRecord::default();
        let prediction = compute(&record);
        let json = format_json(&record, &prediction).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tier"], "Moderate");
        assert_eq!(value["inputs"]["diet_type"], "Non-Vegetarian");
        assert_eq!(value["breakdown"].as_array().unwrap().len(), 9);
        assert!((value["score"].as_f64().unwrap() - prediction.score).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_lines() {
        let histogram = Histogram {
            bucket_width: 10.0,
            counts: vec![0, 0, 0, 0, 1, 4, 2, 0, 0, 0],
        };
        let text = format_histogram(&histogram, Some(60), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("  0-10 "));
        assert!(lines[5].ends_with(" 4"));
        assert_eq!(lines[5].matches('█').count(), 40);
        assert_eq!(lines[4].matches('█').count(), 10);
    }
}
