use geojson::FeatureCollection;
use nwi_core::{choropleth, Dashboard, DashboardError, Suggestion};
use tokio::task::JoinHandle;

use crate::api::ApiClient;
use crate::app::state::App;

type DashboardTask = JoinHandle<(Dashboard, Option<DashboardError>)>;
type GeometryTask = JoinHandle<Result<FeatureCollection, DashboardError>>;
type SubmissionTask = JoinHandle<Result<(), DashboardError>>;

/// Requests running in the background while the UI keeps drawing.
#[derive(Debug, Default)]
pub struct Tasks {
    dashboard: Option<DashboardTask>,
    geometry: Option<GeometryTask>,
    submission: Option<SubmissionTask>,
}

/// What finished since the last poll.
#[derive(Debug)]
pub enum Completion {
    Submission(Result<(), DashboardError>),
}

pub fn start_refresh(app: &mut App) {
    if app.tasks.dashboard.is_some() {
        return;
    }
    let api = app.api.clone();
    app.tasks.dashboard = Some(tokio::spawn(async move { api.fetch_dashboard().await }));
    app.loading = true;
}

pub fn start_geometry(app: &mut App) {
    if !app.api.map_enabled() || app.tasks.geometry.is_some() {
        return;
    }
    let api = app.api.clone();
    app.tasks.geometry = Some(tokio::spawn(async move { load_geometry(&api).await }));
}

/// Decoded and antimeridian-normalized boundaries.
pub async fn load_geometry(api: &ApiClient) -> Result<FeatureCollection, DashboardError> {
    let mut collection = api.fetch_geometry().await?;
    choropleth::normalize(&mut collection);
    Ok(collection)
}

pub fn start_submission(app: &mut App, suggestion: Suggestion) {
    let api = app.api.clone();
    app.tasks.submission = Some(tokio::spawn(async move {
        api.submit_suggestion(&suggestion).await
    }));
}

/// Applies finished statistics and geometry loads to the app. A finished
/// submission is handed back so the caller can drive the form through it.
pub async fn poll_tasks(app: &mut App) -> Option<Completion> {
    if let Some(task) = take_finished(&mut app.tasks.dashboard) {
        app.loading = false;
        match task.await {
            Ok((dashboard, error)) => app.set_dashboard(dashboard, error),
            Err(e) => log::error!("Statistics task failed: {e}"),
        }
    }

    if let Some(task) = take_finished(&mut app.tasks.geometry) {
        match task.await {
            Ok(Ok(collection)) => app.set_geometry(&collection),
            Ok(Err(error)) => log::warn!("{error}"),
            Err(e) => log::error!("Geometry task failed: {e}"),
        }
    }

    if let Some(task) = take_finished(&mut app.tasks.submission) {
        let result = task
            .await
            .unwrap_or_else(|e| Err(DashboardError::submission(e)));
        return Some(Completion::Submission(result));
    }

    None
}

fn take_finished<T>(slot: &mut Option<JoinHandle<T>>) -> Option<JoinHandle<T>> {
    if slot.as_ref().is_some_and(JoinHandle::is_finished) {
        slot.take()
    } else {
        None
    }
}
