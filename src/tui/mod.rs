pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

/// Run the interactive form until the user quits.
pub async fn run_form(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while the form is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // 250ms tick drives flash expiry
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(anyhow::Error::from(e));
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.clear_expired_flash(),
            Some(Event::Resize) => {}
            None => break Ok(()),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    crate::stderr_buffer::flush();

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Shift moves sliders ten steps at a time
    let steps = if key.modifiers.contains(KeyModifiers::SHIFT) { 10 } else { 1 };

    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Field navigation
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.next_field(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.previous_field(),

            // Slider adjustment
            KeyCode::Char('l') | KeyCode::Right => app.adjust_selected(steps),
            KeyCode::Char('h') | KeyCode::Left => app.adjust_selected(-steps),
            KeyCode::Char('L') => app.adjust_selected(10),
            KeyCode::Char('H') => app.adjust_selected(-10),

            // Predict
            KeyCode::Enter | KeyCode::Char('p') => app.predict(),

            // Reset to starting inputs
            KeyCode::Char('r') => app.reset(),

            // Overlays
            KeyCode::Char('?') => app.toggle_help(),
            KeyCode::Char('b') => app.toggle_breakdown(),

            _ => {}
        },
        app::InputMode::ScoreBreakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => app.toggle_breakdown(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.toggle_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{Field, InputRecord};
    use crate::sample::SampleDataset;

    fn app() -> App {
        App::new(InputRecord::default(), SampleDataset::placeholder(), ThemeColors::dark())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_arrow_keys_adjust_selected_field() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.inputs.age, 31);
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
        assert_eq!(app.inputs.age, 21);
    }

    #[test]
    fn test_navigation_then_adjust() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_field(), Field::SleepDuration);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.inputs.sleep_duration, 7.1);
    }

    #[test]
    fn test_enter_predicts() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.prediction.is_some());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, app::InputMode::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_q_in_breakdown_closes_overlay_not_app() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.input_mode, app::InputMode::ScoreBreakdown);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
