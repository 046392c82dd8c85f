use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use nwi_core::page::Section;
use nwi_core::{DashboardError, Suggestion};

use crate::app::actions;
use crate::app::state::{App, Focus};

const WHEEL_ROWS: i32 = 3;

/// Handles one key press. Returns a validated suggestion when the user
/// submits the form.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Option<Suggestion> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return None;
    }

    // The failure alert blocks until acknowledged.
    if app.alert.take().is_some() {
        return None;
    }

    match app.focus {
        Focus::Page => {
            handle_page_input(app, key.code);
            None
        }
        Focus::Search => {
            handle_search_input(app, key.code);
            None
        }
        Focus::FormName | Focus::FormText => handle_form_input(app, key.code),
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_ROWS),
        MouseEventKind::ScrollDown => app.scroll_by(WHEEL_ROWS),
        _ => {}
    }
}

fn page_rows(app: &App) -> i32 {
    i32::from(app.viewport_height().saturating_sub(1).max(1))
}

fn handle_page_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::PageUp => app.scroll_by(-page_rows(app)),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(page_rows(app)),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_by(-i32::from(u16::MAX)),
        KeyCode::End | KeyCode::Char('G') => app.scroll_by(i32::from(u16::MAX)),
        KeyCode::Char(digit @ '1'..='6') => {
            let index = digit as usize - '1' as usize;
            if let Some(section) = Section::ALL.get(index) {
                app.scroll_to(*section);
            }
        }
        KeyCode::Char('r') => actions::start_refresh(app),
        KeyCode::Char('[') => app.cycle_region(false),
        KeyCode::Char(']') => app.cycle_region(true),
        KeyCode::Char('/') => {
            app.focus = Focus::Search;
            app.scroll_to(Section::Countries);
        }
        KeyCode::Tab => {
            if app.form.is_editable() {
                app.focus = Focus::FormName;
                app.scroll_to(Section::Form);
            }
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Enter => app.focus = Focus::Page,
        KeyCode::Backspace => {
            let mut search = app.search.clone();
            search.pop();
            app.set_search(search);
        }
        KeyCode::Char(c) => {
            let search = format!("{}{c}", app.search);
            app.set_search(search);
        }
        _ => {}
    }
}

fn handle_form_input(app: &mut App, key: KeyCode) -> Option<Suggestion> {
    if key == KeyCode::Esc {
        app.focus = Focus::Page;
        return None;
    }

    // Submitting disables the form.
    if !app.form.is_editable() {
        return None;
    }

    match (app.focus, key) {
        (Focus::FormName, KeyCode::Tab | KeyCode::Enter) => app.focus = Focus::FormText,
        (Focus::FormText, KeyCode::Tab | KeyCode::BackTab) => app.focus = Focus::FormName,
        (Focus::FormText, KeyCode::Enter) => {
            return match Suggestion::new(&app.form.name, &app.form.text) {
                Ok(suggestion) => Some(suggestion),
                Err(DashboardError::EmptySuggestion) => {
                    app.status_message = DashboardError::EmptySuggestion.to_string();
                    None
                }
                Err(error) => {
                    app.alert = Some(error.to_string());
                    None
                }
            };
        }
        (Focus::FormName, KeyCode::Backspace) => {
            app.form.name.pop();
        }
        (Focus::FormText, KeyCode::Backspace) => {
            app.form.text.pop();
        }
        (Focus::FormName, KeyCode::Char(c)) => app.form.name.push(c),
        (Focus::FormText, KeyCode::Char(c)) => app.form.text.push(c),
        _ => {}
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::{parse_base_url, AppConfig};
    use std::time::Duration;

    fn app() -> App {
        let api = ApiClient::new(&AppConfig {
            base_url: parse_base_url("http://127.0.0.1:9").unwrap(),
            geometry_url: None,
            timeout: Duration::from_millis(100),
        })
        .unwrap();
        let mut app = App::new(api);
        app.resize(100, 41);
        app
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Suggestion> {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn form_collects_a_suggestion() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::FormName);

        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::FormText);
        type_text(&mut app, " More maps ");

        let suggestion = press(&mut app, KeyCode::Enter).unwrap();
        assert_eq!(suggestion.name, "Ada");
        assert_eq!(suggestion.suggestion, "More maps");
    }

    #[test]
    fn blank_suggestion_is_not_sent() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "   ");

        assert!(press(&mut app, KeyCode::Enter).is_none());
        assert_eq!(app.status_message, "Suggestion text is required");
        assert_eq!(app.focus, Focus::FormText);
    }

    #[test]
    fn alert_swallows_the_next_key() {
        let mut app = app();
        app.alert = Some("Failed".to_string());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.alert.is_none());
        assert!(app.running);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn search_typing_stays_out_of_navigation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "qj");
        assert_eq!(app.search, "qj");
        assert!(app.running);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Page);
    }

    #[test]
    fn wheel_and_keys_scroll() {
        let mut app = app();
        handle_mouse(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.scroll, 3);

        press(&mut app, KeyCode::End);
        assert_eq!(app.scroll, app.page.max_scroll());
        press(&mut app, KeyCode::Home);
        assert_eq!(app.scroll, 0);
    }
}
