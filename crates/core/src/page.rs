//! Vertical layout of the scrolling page, in rows of a terminal grid. Shared
//! by the terminal and browser dashboards, which both draw on a cell grid.

/// Scroll distance of the showcase, in viewport heights.
pub const SHOWCASE_VIEWPORTS: u16 = 3;

const HERO_ROWS: u16 = 9;
const CHART_ROWS: u16 = 16;
const MAP_ROWS: u16 = 26;
const FORM_ROWS: u16 = 11;
/// Border plus search line around the country rows.
const COUNTRY_CHROME_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Showcase,
    Chart,
    Map,
    Countries,
    Form,
}

impl Section {
    pub const ALL: [Self; 6] = [
        Self::Hero,
        Self::Showcase,
        Self::Chart,
        Self::Map,
        Self::Countries,
        Self::Form,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Hero => 0,
            Self::Showcase => 1,
            Self::Chart => 2,
            Self::Map => 3,
            Self::Countries => 4,
            Self::Form => 5,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Hero => "Overview",
            Self::Showcase => "Watch",
            Self::Chart => "Daily Users",
            Self::Map => "World Map",
            Self::Countries => "Countries",
            Self::Form => "Suggestions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub section: Section,
    /// Offset from the top of the page
    pub top: u16,
    pub height: u16,
}

impl SectionSpan {
    /// Top edge relative to the top of the viewport.
    pub fn top_in_viewport(&self, scroll: u16) -> i32 {
        i32::from(self.top) - i32::from(scroll)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub viewport_height: u16,
    pub spans: Vec<SectionSpan>,
    pub total_height: u16,
}

impl PageLayout {
    /// Lays the sections out top to bottom. The map is dropped when there is
    /// no geometry to show.
    pub fn new(viewport_height: u16, country_rows: usize, show_map: bool) -> Self {
        let viewport_height = viewport_height.max(1);
        let country_rows = u16::try_from(country_rows.max(1)).unwrap_or(u16::MAX);

        let mut spans = Vec::with_capacity(Section::ALL.len());
        let mut top: u16 = 0;

        for section in Section::ALL {
            let height = match section {
                Section::Hero => HERO_ROWS,
                Section::Showcase => viewport_height.saturating_mul(SHOWCASE_VIEWPORTS),
                Section::Chart => CHART_ROWS,
                Section::Map if show_map => MAP_ROWS,
                Section::Map => continue,
                Section::Countries => COUNTRY_CHROME_ROWS.saturating_add(country_rows),
                Section::Form => FORM_ROWS,
            };
            spans.push(SectionSpan {
                section,
                top,
                height,
            });
            top = top.saturating_add(height);
        }

        Self {
            viewport_height,
            spans,
            total_height: top,
        }
    }

    pub fn span(&self, section: Section) -> Option<&SectionSpan> {
        self.spans.iter().find(|span| span.section == section)
    }

    pub fn max_scroll(&self) -> u16 {
        self.total_height.saturating_sub(self.viewport_height)
    }

    pub fn clamp_scroll(&self, scroll: u16) -> u16 {
        scroll.min(self.max_scroll())
    }

    /// Sections with at least one row inside the viewport.
    pub fn visible(&self, scroll: u16) -> impl Iterator<Item = &SectionSpan> + '_ {
        let bottom = scroll.saturating_add(self.viewport_height);
        self.spans
            .iter()
            .filter(move |span| span.top < bottom && span.top.saturating_add(span.height) > scroll)
    }

    /// Scroll offset that brings `section` to the top of the viewport.
    pub fn scroll_to(&self, section: Section) -> Option<u16> {
        self.span(section).map(|span| self.clamp_scroll(span.top))
    }
}

/// Screen row of the pinned showcase panel, which is one viewport tall and
/// sticks to the top while its section scrolls past.
pub fn sticky_panel_top(section_top: i32, section_height: u16, viewport_height: u16) -> i32 {
    let release = section_top + i32::from(section_height) - i32::from(viewport_height);
    section_top.max(release.min(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_stacked_in_order() {
        let page = PageLayout::new(40, 5, true);
        let tops = page.spans.iter().map(|span| span.top).collect::<Vec<_>>();
        assert_eq!(tops, [0, 9, 129, 145, 171, 179]);
        assert_eq!(page.total_height, 190);
        assert_eq!(page.max_scroll(), 150);
    }

    #[test]
    fn showcase_spans_three_viewports() {
        let page = PageLayout::new(30, 0, true);
        let showcase = page.span(Section::Showcase).unwrap();
        assert_eq!(showcase.height, 90);
        assert_eq!(page.span(Section::Countries).unwrap().height, 4);
    }

    #[test]
    fn map_is_omitted_without_geometry() {
        let page = PageLayout::new(40, 5, false);
        assert!(page.span(Section::Map).is_none());
        assert_eq!(page.span(Section::Countries).unwrap().top, 145);
    }

    #[test]
    fn visible_sections_follow_scroll() {
        let page = PageLayout::new(40, 5, true);
        let at_top = page.visible(0).map(|span| span.section).collect::<Vec<_>>();
        assert_eq!(at_top, [Section::Hero, Section::Showcase]);

        let at_bottom = page
            .visible(page.max_scroll())
            .map(|span| span.section)
            .collect::<Vec<_>>();
        assert_eq!(at_bottom, [Section::Map, Section::Countries, Section::Form]);
    }

    #[test]
    fn panel_sticks_while_the_section_scrolls() {
        assert_eq!(sticky_panel_top(10, 120, 40), 10);
        assert_eq!(sticky_panel_top(0, 120, 40), 0);
        assert_eq!(sticky_panel_top(-50, 120, 40), 0);
        assert_eq!(sticky_panel_top(-80, 120, 40), 0);
        assert_eq!(sticky_panel_top(-90, 120, 40), -10);
    }

    #[test]
    fn scroll_is_clamped() {
        let page = PageLayout::new(40, 5, true);
        assert_eq!(page.clamp_scroll(u16::MAX), page.max_scroll());
        assert_eq!(page.scroll_to(Section::Chart), Some(129));
        assert_eq!(page.scroll_to(Section::Form), Some(page.max_scroll()));
    }
}
