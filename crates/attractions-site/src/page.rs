//! Static page assembly: an HTML list presentation, the marker manifest and
//! template filling.

use attractions_core::{FilterState, MapSettings};
use attractions_feed::{FeedError, NormalizedFeed};
use serde::Serialize;

use crate::controller::Controller;
use crate::error::{SiteError, ViewError};
use crate::map::{MapConfig, MarkerIndex};
use crate::notice::{load_failure_message, MAP_FAILED};
use crate::presentation::{Card, FilterOptions, ListPresentation, NoticeRegion};
use crate::render::{escape_html, filter_controls_html, filter_options};

/// Page template used when the site directory has no `index.html`.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/index.html");

/// List presentation that accumulates HTML.
#[derive(Debug)]
pub struct HtmlList {
    options: FilterOptions,
    selected: FilterState,
    cards: Vec<Card>,
    empty: Option<String>,
    list_notice: Option<String>,
    filter_notice: Option<String>,
    checkpoint: Option<(Vec<Card>, Option<String>)>,
}

impl Default for HtmlList {
    fn default() -> Self {
        Self {
            options: filter_options(std::iter::empty(), std::iter::empty()),
            selected: FilterState::default(),
            cards: Vec::new(),
            empty: None,
            list_notice: None,
            filter_notice: None,
            checkpoint: None,
        }
    }
}

impl HtmlList {
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn notice(&self, region: NoticeRegion) -> Option<&str> {
        match region {
            NoticeRegion::List => self.list_notice.as_deref(),
            NoticeRegion::Filter => self.filter_notice.as_deref(),
        }
    }

    fn cards_html(&self) -> String {
        match &self.empty {
            Some(message) => format!(r#"<p class="no-results">{}</p>"#, escape_html(message)),
            None => self.cards.iter().map(|c| c.html.as_str()).collect(),
        }
    }
}

fn notice_html(id: &str, message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<div id="{id}" class="error-message">{}</div>"#,
            escape_html(message)
        ),
        None => format!(r#"<div id="{id}" class="error-message" hidden></div>"#),
    }
}

impl ListPresentation for HtmlList {
    fn begin_render(&mut self) {
        self.checkpoint = Some((self.cards.clone(), self.empty.clone()));
    }

    fn commit_render(&mut self) {
        self.checkpoint = None;
    }

    fn rollback_render(&mut self) {
        if let Some((cards, empty)) = self.checkpoint.take() {
            self.cards = cards;
            self.empty = empty;
        }
    }

    fn set_filter_options(&mut self, options: &FilterOptions) -> Result<(), ViewError> {
        self.options = options.clone();
        Ok(())
    }

    fn select_filters(&mut self, filter: &FilterState) -> Result<(), ViewError> {
        self.selected = filter.clone();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ViewError> {
        self.cards.clear();
        self.empty = None;
        Ok(())
    }

    fn show_empty(&mut self, message: &str) -> Result<(), ViewError> {
        self.empty = Some(message.to_string());
        Ok(())
    }

    fn append_card(&mut self, card: &Card) -> Result<(), ViewError> {
        self.cards.push(card.clone());
        Ok(())
    }

    fn show_notice(&mut self, region: NoticeRegion, message: &str) {
        let slot = match region {
            NoticeRegion::List => &mut self.list_notice,
            NoticeRegion::Filter => &mut self.filter_notice,
        };
        *slot = Some(message.to_string());
    }

    fn hide_notice(&mut self, region: NoticeRegion) {
        match region {
            NoticeRegion::List => self.list_notice = None,
            NoticeRegion::Filter => self.filter_notice = None,
        }
    }
}

/// Everything the generated `index.html` shows.
///
/// `list` and `markers` are separate fields so the controller can paint into
/// both at once.
#[derive(Debug, Default)]
pub struct StaticPage {
    pub list: HtmlList,
    pub markers: MarkerIndex,
    /// `None` when the map could not be initialized.
    pub map: Option<MapConfig>,
}

/// Serializes `value` for embedding inside a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T, context: &'static str) -> Result<String, SiteError> {
    serde_json::to_string(value)
        .map(|json| json.replace("</", "<\\/"))
        .map_err(|source| SiteError::Json { context, source })
}

/// Replaces `{{ name }}` placeholders in one pass. Substituted text is never
/// rescanned; unknown placeholders are left as they are.
fn fill_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let name = after[..end].trim();
        match lookup(name) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

impl StaticPage {
    /// Renders the page into `template`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Json`] if the map manifest cannot be serialized.
    pub fn render(&self, template: &str, title: &str) -> Result<String, SiteError> {
        let (category_options, state_options) =
            filter_controls_html(&self.list.options, &self.list.selected);
        let map_config = script_json(&self.map, "map config")?;
        let markers = match self.map {
            Some(_) => script_json(self.markers.markers(), "marker manifest")?,
            None => "[]".to_string(),
        };
        let map_notice = if self.map.is_some() {
            r#"<p class="loading-message">Loading map...</p>"#.to_string()
        } else {
            format!(r#"<p class="error-message">{MAP_FAILED}</p>"#)
        };
        let list_notice = notice_html("list-error-message", self.list.notice(NoticeRegion::List));
        let filter_notice = notice_html("filter-error", self.list.notice(NoticeRegion::Filter));
        let cards = self.list.cards_html();
        let title = escape_html(title);

        Ok(fill_template(template, |name| {
            let value = match name {
                "title" => &title,
                "category_options" => &category_options,
                "state_options" => &state_options,
                "cards" => &cards,
                "list_notice" => &list_notice,
                "filter_notice" => &filter_notice,
                "map_notice" => &map_notice,
                "map_config" => &map_config,
                "markers" => &markers,
                _ => return None,
            };
            Some(value.clone())
        }))
    }
}

/// A page plus what it was built from.
pub struct PageOutcome {
    pub page: StaticPage,
    /// Present when the feed loaded.
    pub controller: Option<Controller>,
    /// The load failure shown in the list notice, if any.
    pub load_error: Option<FeedError>,
}

/// Initializes the map, then paints the loaded feed (or the load failure)
/// into a fresh [`StaticPage`]. A map failure does not stop the list from
/// rendering, and a load failure does not stop the map.
#[must_use]
pub fn assemble_page(
    settings: &MapSettings,
    loaded: Result<NormalizedFeed, FeedError>,
) -> PageOutcome {
    let mut page = StaticPage::default();
    match MapConfig::from_settings(settings) {
        Ok(map) => page.map = Some(map),
        Err(err) => tracing::error!(error = %err, "error initializing map"),
    }

    let feed = match loaded {
        Ok(feed) => feed,
        Err(err) => {
            tracing::error!(error = %err, "failed to load attraction data");
            page.list
                .show_notice(NoticeRegion::List, &load_failure_message(&err));
            return PageOutcome {
                page,
                controller: None,
                load_error: Some(err),
            };
        }
    };

    let mut controller = Controller::with_focused_zoom(feed, settings.focused_zoom);
    if let Err(err) = controller.populate_filters(&mut page.list) {
        tracing::warn!(error = %err, "failed to populate filter controls");
    }
    // Failures are already shown in the filter notice and logged.
    let _ = controller.apply_filters(&mut page.list, &mut page.markers);

    PageOutcome {
        page,
        controller: Some(controller),
        load_error: None,
    }
}
