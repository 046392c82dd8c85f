use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use nwi_core::aggregate::thousands;
use nwi_core::suggestion::SubmitState;
use nwi_core::{CountryRank, Dashboard, DashboardError, Suggestion};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;
use std::time::Instant;

use crate::api::ApiClient;
use crate::app::actions::{self, Completion};
use crate::app::{handle_input, handle_mouse, App, Focus};
use crate::ui;

// Events driving the suggestion form
#[derive(Clone, Debug)]
enum SubmitEvent {
    Submit(Suggestion),
    Accepted,
    Rejected(String),
    Reset,
}

impl fmt::Display for SubmitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit(_) => write!(f, "Submit"),
            Self::Accepted => write!(f, "Accepted"),
            Self::Rejected(reason) => write!(f, "Rejected({reason})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: SubmitState,
    event: SubmitEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {:?} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct NextState(SubmitState);

impl TryFrom<(SubmitState, &SubmitEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (SubmitState, &SubmitEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (SubmitState::Editing, SubmitEvent::Submit(suggestion)) => {
                actions::start_submission(app, suggestion.clone());
                app.status_message = "Sending suggestion...".to_string();
                Ok(Self(SubmitState::Submitting))
            }
            (SubmitState::Submitting, SubmitEvent::Accepted) => {
                app.form.thank_you_since = Some(Instant::now());
                app.status_message.clear();
                app.focus = Focus::Page;
                Ok(Self(SubmitState::ThankYou))
            }
            (SubmitState::Submitting, SubmitEvent::Rejected(reason)) => {
                log::error!("Suggestion submission failed: {reason}");
                app.alert = Some("Failed to submit suggestion. Please try again.".to_string());
                app.status_message.clear();
                Ok(Self(SubmitState::Editing))
            }
            (SubmitState::ThankYou, SubmitEvent::Reset) => {
                app.form.clear();
                app.form.thank_you_since = None;
                Ok(Self(SubmitState::Editing))
            }
            _ => Err(StateTransitionError {
                from: current_state,
                event: event.clone(),
            }),
        }
    }
}

/// Drives the form through one event.
fn process_submit_event(
    app: &mut App,
    event: &SubmitEvent,
) -> std::result::Result<(), StateTransitionError> {
    let next_state = NextState::try_from((app.form.state, event, &mut *app))?;
    app.form.state = next_state.0;
    Ok(())
}

/// Submits a suggestion without the UI.
pub async fn run_suggest(api: &ApiClient, name: &str, text: &str) -> Result<()> {
    let suggestion = Suggestion::new(name, text)?;
    api.submit_suggestion(&suggestion).await?;
    println!("Thank you! Your suggestion was received.");
    Ok(())
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(api: &ApiClient, json: bool) -> Result<()> {
    let (dashboard, error) = api.fetch_dashboard().await;
    if let Some(error) = &error {
        log::warn!("{error}");
    }

    let stats = HeadlessStats::new(&dashboard, error.as_ref());
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(&stats);
    }

    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats) {
    println!("\nNWI Usage");
    println!("=========");
    if let Some(error) = &stats.error {
        println!("Statistics unavailable: {error}");
    }
    println!(
        "Date: {}",
        stats.chosen_date.as_deref().unwrap_or("(no data)")
    );
    println!("Users: {}", thousands(stats.total_users));
    println!("Unique users: {}", thousands(stats.total_unique_users));
    println!("Countries: {}", stats.country_count);

    println!("\nDaily unique users:");
    for day in &stats.daily {
        println!("- {}: {}", day.date, thousands(day.unique_users));
    }

    println!("\nTop countries:");
    if stats.top_countries.is_empty() {
        println!("No country data yet.");
    }
    for country in &stats.top_countries {
        println!("- {} {} | {}", country.flag, country.name, country.users_label);
    }
}

const HEADLESS_TOP_COUNTRIES: usize = 10;

#[derive(Debug, serde::Serialize)]
struct HeadlessStats {
    chosen_date: Option<String>,
    total_users: u64,
    total_unique_users: u64,
    country_count: usize,
    daily: Vec<HeadlessDay>,
    top_countries: Vec<CountryRank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct HeadlessDay {
    date: String,
    unique_users: u64,
}

impl HeadlessStats {
    fn new(dashboard: &Dashboard, error: Option<&DashboardError>) -> Self {
        let mut top_countries = dashboard.ranked_countries();
        top_countries.truncate(HEADLESS_TOP_COUNTRIES);

        Self {
            chosen_date: dashboard.aggregate.chosen_date.clone(),
            total_users: dashboard.aggregate.total_users,
            total_unique_users: dashboard.total_unique_users,
            country_count: dashboard.country_total(),
            daily: dashboard
                .daily_series()
                .into_iter()
                .map(|point| HeadlessDay {
                    date: point.date,
                    unique_users: point.unique_users,
                })
                .collect(),
            top_countries,
            error: error.map(ToString::to_string),
        }
    }
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let size = terminal.size()?;
    app.resize(size.width, size.height);

    actions::start_refresh(app);
    actions::start_geometry(app);

    loop {
        if let Some(Completion::Submission(result)) = actions::poll_tasks(app).await {
            let event = match result {
                Ok(()) => SubmitEvent::Accepted,
                Err(e) => SubmitEvent::Rejected(e.to_string()),
            };
            if let Err(e) = process_submit_event(app, &event) {
                log::warn!("{e}");
            }
        }

        if app.thank_you_elapsed() {
            if let Err(e) = process_submit_event(app, &SubmitEvent::Reset) {
                log::warn!("{e}");
            }
        }

        // Showcase tick and coalesced recompute
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if let Some(suggestion) = handle_input(app, key) {
                    if let Err(e) = process_submit_event(app, &SubmitEvent::Submit(suggestion)) {
                        log::warn!("{e}");
                    }
                }
                if !app.running {
                    break;
                }
            }
            Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
            Ok(Event::Resize(width, height)) => app.resize(width, height),
            Ok(_) | Err(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_base_url, AppConfig};
    use nwi_core::summary::{DailySummary, SummaryCollection};
    use std::time::Duration;

    fn app() -> App {
        let api = ApiClient::new(&AppConfig {
            base_url: parse_base_url("http://127.0.0.1:9").unwrap(),
            geometry_url: None,
            timeout: Duration::from_millis(100),
        })
        .unwrap();
        App::new(api)
    }

    #[tokio::test]
    async fn submission_walks_through_the_form_states() {
        let mut app = app();
        app.form.text = "More maps".to_string();
        let suggestion = Suggestion::new("", "More maps").unwrap();

        process_submit_event(&mut app, &SubmitEvent::Submit(suggestion)).unwrap();
        assert_eq!(app.form.state, SubmitState::Submitting);
        assert_eq!(app.status_message, "Sending suggestion...");

        process_submit_event(&mut app, &SubmitEvent::Accepted).unwrap();
        assert_eq!(app.form.state, SubmitState::ThankYou);
        assert!(app.form.thank_you_since.is_some());

        process_submit_event(&mut app, &SubmitEvent::Reset).unwrap();
        assert_eq!(app.form.state, SubmitState::Editing);
        assert!(app.form.text.is_empty());
    }

    #[test]
    fn rejection_alerts_and_reenables_the_form() {
        let mut app = app();
        app.form.state = SubmitState::Submitting;
        app.form.text = "More maps".to_string();

        process_submit_event(&mut app, &SubmitEvent::Rejected("HTTP 500".to_string())).unwrap();
        assert_eq!(app.form.state, SubmitState::Editing);
        assert!(app.alert.is_some());
        assert_eq!(app.form.text, "More maps");
    }

    #[test]
    fn out_of_order_events_are_refused() {
        let mut app = app();
        assert!(process_submit_event(&mut app, &SubmitEvent::Accepted).is_err());
        assert!(process_submit_event(&mut app, &SubmitEvent::Reset).is_err());
        assert_eq!(app.form.state, SubmitState::Editing);
    }

    #[test]
    fn headless_stats_json_shape() {
        let mut summary = SummaryCollection::new();
        summary.insert(
            "2024-01-02".to_string(),
            DailySummary {
                unique_users: 25,
                countries: [("NL".to_string(), 20), ("XX".to_string(), 5)]
                    .into_iter()
                    .collect(),
            },
        );
        let (dashboard, _) = Dashboard::from_fetch(Ok(summary), Ok(812));

        let stats = HeadlessStats::new(&dashboard, None);
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["chosen_date"], "2024-01-02");
        assert_eq!(json["total_users"], 25);
        assert_eq!(json["total_unique_users"], 812);
        assert_eq!(json["country_count"], 1);
        assert_eq!(json["daily"][0]["unique_users"], 25);
        assert_eq!(json["top_countries"][0]["code"], "NL");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn headless_stats_carry_the_fetch_error() {
        let error = DashboardError::fetch("api/summary", "HTTP 502");
        let stats = HeadlessStats::new(&Dashboard::default(), Some(&error));
        assert_eq!(stats.total_users, 0);
        assert_eq!(
            stats.error.as_deref(),
            Some("Failed to fetch api/summary: HTTP 502")
        );
    }
}
