use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::inputs::{DietType, ExerciseFrequency, Field, Gender};
use crate::output::{needle_position, ABOUT, DISCLAIMER};
use crate::tui::app::{App, InputMode};
use crate::tui::theme::ThemeColors;

const FORM_WIDTH: u16 = 46;
const SLIDER_WIDTH: usize = 18;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 20 || area.width < 80 {
        let msg = Paragraph::new("Terminal too small (need 80x20)")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Title bar
        Constraint::Fill(1),    // Form and results
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    let body = Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Fill(1)])
        .split(chunks[1]);

    render_title(frame, chunks[0], app);
    render_form(frame, body[0], app);
    render_results(frame, body[1], app);
    render_status_bar(frame, chunks[2], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::ScoreBreakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = "Cognitive Score Predictor";
    let mut spans = vec![Span::styled(title, Style::default().fg(app.theme.title_color).bold())];

    let sample_text = if app.sample.loaded {
        format!("sample: {} records", app.sample.records.len())
    } else {
        "no sample data".to_string()
    };
    let padding_len = (area.width as usize).saturating_sub(title.len() + sample_text.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(sample_text, Style::default().fg(app.theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Your Inputs ")
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut section = None;
    for (idx, field) in Field::ALL.iter().enumerate() {
        if section != Some(field.section()) {
            if section.is_some() {
                lines.push(Line::from(""));
            }
            section = Some(field.section());
            lines.push(Line::from(Span::styled(field.section().title(), theme.section_title)));
        }

        let selected = idx == app.selected;
        if selected {
            selected_line = lines.len();
        }
        let marker = if selected { "> " } else { "  " };
        let label_style = if selected {
            theme.field_selected
        } else {
            Style::default().fg(theme.field_label)
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<22}", field.label()), label_style),
            Span::raw(" "),
            Span::styled(field.display_value(&app.inputs), Style::default().fg(theme.field_value).bold()),
        ]));
        lines.push(field_control(*field, app));
    }

    // Keep the selected label and its control on screen
    let scroll = (selected_line + 2).saturating_sub(inner.height as usize) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

/// Slider for numeric fields, option row for categorical ones.
fn field_control(field: Field, app: &App) -> Line<'static> {
    let theme = &app.theme;
    if let (Some(bounds), Some(value)) = (field.bounds(), field.numeric_value(&app.inputs)) {
        let ratio = ((value - bounds.min) / (bounds.max - bounds.min)).clamp(0.0, 1.0);
        let filled = (ratio * SLIDER_WIDTH as f64).round() as usize;
        let empty = SLIDER_WIDTH - filled;
        return Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:>5} ", bounds.min), Style::default().fg(theme.muted)),
            Span::styled("━".repeat(filled), Style::default().fg(theme.slider_filled)),
            Span::styled("─".repeat(empty), Style::default().fg(theme.slider_empty)),
            Span::styled(format!(" {}", bounds.max), Style::default().fg(theme.muted)),
        ]);
    }

    let (options, current): (Vec<&'static str>, &'static str) = match field {
        Field::Gender => (Gender::ALL.iter().map(|g| g.label()).collect(), app.inputs.gender.label()),
        Field::DietType => (
            DietType::ALL.iter().map(|d| d.label()).collect(),
            app.inputs.diet_type.label(),
        ),
        _ => (
            ExerciseFrequency::ALL.iter().map(|e| e.label()).collect(),
            app.inputs.exercise_frequency.label(),
        ),
    };

    let mut spans = vec![Span::raw("    ")];
    for (i, option) in options.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(theme.muted)));
        }
        if option == current {
            spans.push(Span::styled(option, Style::default().fg(theme.slider_filled).bold()));
        } else {
            spans.push(Span::styled(option, Style::default().fg(theme.muted)));
        }
    }
    Line::from(spans)
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(7),  // Gauge
        Constraint::Length(3),  // Interpretation
        Constraint::Length(9),  // Recommendations
        Constraint::Fill(1),    // About / distribution
    ])
    .split(area);

    render_gauge(frame, chunks[0], app);
    render_interpretation(frame, chunks[1], app);
    render_recommendations(frame, chunks[2], app);
    render_about(frame, chunks[3], app);
}

fn render_gauge(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let title = if app.stale {
        Line::from(vec![
            Span::raw(" Your Predicted Score "),
            Span::styled("(inputs changed) ", Style::default().fg(theme.stale)),
        ])
    } else {
        Line::from(" Your Predicted Score ")
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as usize;
    if width < 10 {
        return;
    }

    // Tick labels over the bar
    let mut ticks = vec![' '; width + 2];
    for tick in [0u32, 25, 50, 75, 100] {
        let text = tick.to_string();
        let start = (needle_position(tick as f64, width) + 1)
            .saturating_sub(text.len() / 2)
            .min(ticks.len() - text.len());
        for (i, c) in text.chars().enumerate() {
            ticks[start + i] = c;
        }
    }
    let ticks: String = ticks.into_iter().collect();

    let bar_spans: Vec<Span> = (0..width)
        .map(|i| {
            let percent = i as f64 / (width - 1) as f64 * 100.0;
            Span::styled("█", Style::default().fg(theme.gauge_color(percent)))
        })
        .collect();
    let mut bar_line = vec![Span::raw(" ")];
    bar_line.extend(bar_spans);

    let (needle_line, score_line) = match &app.prediction {
        Some(prediction) => {
            let at = needle_position(prediction.score, width);
            (
                Line::from(vec![
                    Span::raw(" ".repeat(at + 1)),
                    Span::styled("▲", Style::default().fg(theme.needle).bold()),
                ]),
                Line::from(vec![
                    Span::styled(
                        format!("{:.1}", prediction.score),
                        Style::default().fg(theme.tier_color(prediction.tier)).bold(),
                    ),
                    Span::styled("  Cognitive Score", Style::default().fg(theme.muted)),
                ])
                .alignment(Alignment::Center),
            )
        }
        None => (
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to predict your cognitive score",
                Style::default().fg(theme.muted),
            ))
            .alignment(Alignment::Center),
        ),
    };

    let lines = vec![
        Line::from(Span::styled(ticks, Style::default().fg(theme.muted).bold())),
        Line::from(bar_line),
        needle_line,
        Line::from(""),
        score_line,
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_interpretation(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Interpretation ")
        .border_style(Style::default().fg(theme.border));

    let line = match &app.prediction {
        Some(prediction) => Line::from(Span::styled(
            prediction.interpretation(),
            Style::default().fg(theme.tier_color(prediction.tier)).bold(),
        )),
        None => Line::from(Span::styled("-", Style::default().fg(theme.muted))),
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_recommendations(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Recommendations ")
        .border_style(Style::default().fg(theme.border));

    let lines: Vec<Line> = match &app.prediction {
        Some(prediction) if prediction.recommendations.is_empty() => prediction
            .advice()
            .into_iter()
            .map(|msg| Line::from(Span::styled(msg, Style::default().fg(theme.tier_excellent))))
            .collect(),
        Some(prediction) => prediction
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(theme.muted)),
                    Span::raw(r.clone()),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled("-", Style::default().fg(theme.muted)))],
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_about(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" About Cognitive Scores ")
        .border_style(Style::default().fg(theme.border));

    let mut lines: Vec<Line> = ABOUT.lines().map(|l| Line::from(l.to_string())).collect();

    if let Some(histogram) = app.sample.histogram() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Sample Distribution", theme.section_title)));
        let max = histogram.max_count().max(1);
        let bar_space = 24usize;
        for (i, count) in histogram.counts.iter().enumerate() {
            let low = i as f64 * histogram.bucket_width;
            let len = (*count as f64 / max as f64 * bar_space as f64).round() as usize;
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>3}-{:<3} ", low as u32, (low + histogram.bucket_width) as u32),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    "█".repeat(len),
                    Style::default().fg(theme.gauge_color(low + histogram.bucket_width / 2.0)),
                ),
                Span::styled(format!(" {}", count), Style::default().fg(theme.muted)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(DISCLAIMER, Style::default().fg(theme.muted).italic())));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        Line::from(Span::styled(msg.clone(), Style::default().fg(theme.flash_success)))
    } else {
        // Build hints with colored shortcut keys
        let hints = [
            ("j/k", ":field "),
            ("h/l", ":adjust "),
            ("Enter", ":predict "),
            ("b", ":breakdown "),
            ("r", ":reset "),
            ("?", ":help "),
            ("q", ":quit"),
        ];
        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    // Calculate centered position
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 15, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("j / Down / Tab    ", "Next field"),
        ("k / Up / S-Tab    ", "Previous field"),
        ("l / Right         ", "Increase value / next option"),
        ("h / Left          ", "Decrease value / previous option"),
        ("Shift + arrow     ", "Move slider 10 steps"),
        ("Enter / p         ", "Predict cognitive score"),
        ("b                 ", "Show/hide score breakdown"),
        ("r                 ", "Reset inputs"),
        ("?                 ", "Show/hide this help"),
        ("q / Esc / Ctrl-c  ", "Quit"),
    ];
    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// Render the per-factor score breakdown popup
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(prediction) = &app.prediction else {
        return;
    };
    let theme = &app.theme;
    let popup_area = centered_rect_fixed(56, prediction.breakdown.len() as u16 + 7, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Score Breakdown ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![Line::from(Span::styled(
        format!("{:<14} {:>7} {:>7} {:>8}", "Factor", "Value", "Weight", "Points"),
        Style::default().fg(theme.muted).bold(),
    ))];
    for contribution in &prediction.breakdown {
        let points_color = if contribution.points > 0.0 {
            theme.tier_excellent
        } else {
            theme.muted
        };
        lines.push(Line::from(vec![
            Span::raw(format!(
                "{:<14} {:>7.3} {:>7.2} ",
                contribution.label, contribution.normalized, contribution.weight
            )),
            Span::styled(
                format!("{:>8.2}", contribution.points),
                Style::default().fg(points_color),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(format!("{:<30}", "Score (clamped 0-100)")),
        Span::styled(
            format!("{:>8.2}", prediction.score),
            Style::default().fg(theme.tier_color(prediction.tier)).bold(),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "Esc or b to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::InputRecord;
    use crate::sample::SampleDataset;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(InputRecord::default(), SampleDataset::placeholder(), ThemeColors::dark())
    }

    #[test]
    fn test_small_terminal_message() {
        let screen = render(&app(), 40, 10);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_form_before_prediction() {
        let screen = render(&app(), 120, 40);
        assert!(screen.contains("Cognitive Score Predictor"));
        assert!(screen.contains("Personal Information"));
        assert!(screen.contains("Memory Test Score"));
        assert!(screen.contains("Press Enter to predict"));
        assert!(screen.contains("no sample data"));
    }

    #[test]
    fn test_results_after_prediction() {
        let mut app = app();
        app.predict();
        let screen = render(&app, 120, 40);
        assert!(screen.contains("51.7"));
        assert!(screen.contains("Moderate score of 51.7."));
        assert!(screen.contains("1. Increase physical activity"));
    }

    #[test]
    fn test_breakdown_popup_renders() {
        let mut app = app();
        app.predict();
        app.toggle_breakdown();
        let screen = render(&app, 120, 40);
        assert!(screen.contains("Score Breakdown"));
        assert!(screen.contains("Sleep quality"));
    }

    #[test]
    fn test_form_scrolls_to_selected_field() {
        let mut app = app();
        let screen = render(&app, 80, 20);
        assert!(!screen.contains("Memory Test Score"));

        app.selected = Field::ALL.len() - 1;
        let screen = render(&app, 80, 20);
        assert!(screen.contains("> Memory Test Score"));
    }
}
