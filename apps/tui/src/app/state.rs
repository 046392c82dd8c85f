use std::time::Instant;

use chrono::Utc;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use geojson::FeatureCollection;
use nwi_core::page::{PageLayout, Section};
use nwi_core::raster::{MapRaster, RegionShape};
use nwi_core::schedule::{intersects_viewport, FrameGate, Reveal, TickTimer};
use nwi_core::showcase::{self, ShowcaseFrame, ShowcaseInput};
use nwi_core::suggestion::{SubmitState, THANK_YOU_SECONDS};
use nwi_core::{choropleth, CountryRank, Dashboard, DashboardError};
use throbber_widgets_tui::ThrobberState;

use crate::api::ApiClient;
use crate::app::actions::Tasks;
use crate::ui::widgets::map;

/// Rows reserved under the page for the status bar.
pub const STATUS_ROWS: u16 = 1;
/// Reveal margin at the bottom of the viewport, in rows.
const REVEAL_MARGIN_ROWS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    Search,
    FormName,
    FormText,
}

#[derive(Debug, Default)]
pub struct FormState {
    pub name: String,
    pub text: String,
    pub state: SubmitState,
    pub thank_you_since: Option<Instant>,
}

impl FormState {
    pub const fn is_editable(&self) -> bool {
        matches!(self.state, SubmitState::Editing)
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.text.clear();
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub api: ApiClient,
    pub dashboard: Dashboard,
    pub ranked: Vec<CountryRank>,
    pub shapes: Vec<RegionShape>,
    pub raster: MapRaster,
    /// Regions with users, in the order `[` and `]` step through them
    pub map_cycle: Vec<usize>,
    pub selected_region: Option<usize>,
    pub loading: bool,
    pub alert: Option<String>,
    pub status_message: String,
    pub focus: Focus,
    pub search: String,
    pub form: FormState,
    pub scroll: u16,
    pub width: u16,
    pub page: PageLayout,
    pub gate: FrameGate,
    pub tick: TickTimer,
    pub showcase: ShowcaseFrame,
    pub reveal: Reveal,
    pub throbber: ThrobberState,
    pub tasks: Tasks,
    started: Instant,
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        let page = PageLayout::new(1, 0, false);
        let showcase = showcase::derive(&ShowcaseInput {
            top: 0.0,
            showcase_height: 1.0,
            viewport_height: 1.0,
            now: Utc::now(),
        });

        let mut app = Self {
            running: true,
            api,
            dashboard: Dashboard::default(),
            ranked: Vec::new(),
            shapes: Vec::new(),
            raster: MapRaster::default(),
            map_cycle: Vec::new(),
            selected_region: None,
            loading: false,
            alert: None,
            status_message: String::new(),
            focus: Focus::Page,
            search: String::new(),
            form: FormState::default(),
            scroll: 0,
            width: 0,
            page,
            gate: FrameGate::new(),
            tick: TickTimer::default(),
            showcase,
            reveal: Reveal::new(Section::ALL.len()),
            throbber: ThrobberState::default(),
            tasks: Tasks::default(),
            started: Instant::now(),
        };
        app.gate.request();
        app
    }

    pub fn viewport_height(&self) -> u16 {
        self.page.viewport_height
    }

    /// Recomputes the page for a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.relayout(height.saturating_sub(STATUS_ROWS));
    }

    fn relayout(&mut self, viewport_height: u16) {
        self.page = PageLayout::new(
            viewport_height,
            self.visible_countries().len(),
            !self.shapes.is_empty(),
        );
        self.scroll = self.page.clamp_scroll(self.scroll);
        self.rebuild_raster();
        self.gate.request();
    }

    fn rebuild_raster(&mut self) {
        let Some(span) = self.page.span(Section::Map) else {
            self.raster = MapRaster::default();
            return;
        };
        let area = map::canvas_area(ratatui::layout::Rect::new(0, 0, self.width, span.height));
        if !self.raster.matches(area.width, area.height) {
            self.raster = MapRaster::build(&self.shapes, area.width, area.height);
        }
    }

    pub fn set_dashboard(&mut self, dashboard: Dashboard, error: Option<DashboardError>) {
        if let Some(error) = error {
            log::warn!("{error}");
            self.status_message = "Statistics unavailable".to_string();
        } else {
            self.status_message.clear();
        }

        self.ranked = dashboard.ranked_countries();
        self.dashboard = dashboard;
        self.rebuild_map_cycle();
        self.relayout(self.viewport_height());
    }

    /// Takes normalized geometry. The map stays hidden if it never arrives.
    pub fn set_geometry(&mut self, collection: &FeatureCollection) {
        self.shapes = RegionShape::from_features(collection);
        self.raster = MapRaster::default();
        self.rebuild_map_cycle();
        self.relayout(self.viewport_height());
    }

    fn rebuild_map_cycle(&mut self) {
        let choropleth = choropleth::Choropleth::new(&self.dashboard.aggregate);
        let mut cycle = self
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| choropleth.count_for(&shape.id) > 0)
            .map(|(index, shape)| (choropleth.count_for(&shape.id), index))
            .collect::<Vec<_>>();
        cycle.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        self.map_cycle = cycle.into_iter().map(|(_, index)| index).collect();
        self.selected_region = None;
    }

    pub fn selected_shape(&self) -> Option<&RegionShape> {
        self.shapes.get(self.selected_region?)
    }

    /// Steps the map selection through regions with users.
    pub fn cycle_region(&mut self, forward: bool) {
        if self.map_cycle.is_empty() {
            return;
        }
        let len = self.map_cycle.len();
        let position = self
            .selected_region
            .and_then(|selected| self.map_cycle.iter().position(|&index| index == selected));
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(current), true) => (current + 1) % len,
            (Some(current), false) => (current + len - 1) % len,
        };
        self.selected_region = self.map_cycle.get(next).copied();
    }

    /// Ranked countries matching the search box, best match first.
    pub fn visible_countries(&self) -> Vec<&CountryRank> {
        let query = self.search.trim();
        if query.is_empty() {
            return self.ranked.iter().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = self
            .ranked
            .iter()
            .filter_map(|rank| {
                let name_score = matcher.fuzzy_match(&rank.name, query);
                let code_score = matcher.fuzzy_match(&rank.code, query);
                name_score.max(code_score).map(|score| (score, rank))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, rank)| rank).collect()
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.relayout(self.viewport_height());
    }

    pub fn scroll_by(&mut self, rows: i32) {
        let target = (i32::from(self.scroll) + rows).clamp(0, i32::from(self.page.max_scroll()));
        self.scroll = u16::try_from(target).unwrap_or(0);
        self.gate.request();
    }

    pub fn scroll_to(&mut self, section: Section) {
        if let Some(scroll) = self.page.scroll_to(section) {
            self.scroll = scroll;
            self.gate.request();
        }
    }

    pub fn is_revealed(&self, section: Section) -> bool {
        self.reveal.is_revealed(section.index())
    }

    /// Per-frame work: advances the spinner, requests the showcase tick while
    /// it is on screen, recomputes at most once, and resets the form once the
    /// thank-you notice has been up long enough.
    pub fn update(&mut self) {
        if self.loading {
            self.throbber.calc_next();
        }

        if let Some(span) = self.page.span(Section::Showcase).copied() {
            let top = f64::from(span.top_in_viewport(self.scroll));
            if self.tick.poll(self.started.elapsed().as_secs_f64())
                && intersects_viewport(top, f64::from(span.height), f64::from(self.viewport_height()))
            {
                self.gate.request();
            }
        }

        if self.gate.take() {
            self.recompute();
        }
    }

    /// Derives the showcase frame and reveal flags for the current scroll.
    pub fn recompute(&mut self) {
        let viewport = f64::from(self.viewport_height());

        for span in &self.page.spans {
            self.reveal.observe(
                span.section.index(),
                f64::from(span.top_in_viewport(self.scroll)),
                f64::from(span.height),
                viewport,
                REVEAL_MARGIN_ROWS,
            );
        }

        if let Some(span) = self.page.span(Section::Showcase) {
            self.showcase = showcase::derive(&ShowcaseInput {
                top: f64::from(span.top_in_viewport(self.scroll)),
                showcase_height: f64::from(span.height),
                viewport_height: viewport,
                now: Utc::now(),
            });
        }
    }

    pub fn thank_you_elapsed(&self) -> bool {
        self.form
            .thank_you_since
            .is_some_and(|since| since.elapsed().as_secs_f64() >= THANK_YOU_SECONDS)
    }
}
