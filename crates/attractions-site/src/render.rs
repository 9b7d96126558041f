//! HTML fragments for cards, popups and filter options.

use std::fmt::Write as _;
use std::sync::LazyLock;

use attractions_core::{AttractionRecord, FilterState, Selection};
use regex::Regex;

use crate::presentation::{Card, FilterOption, FilterOptions, Marker};

pub const UNKNOWN_CITY: &str = "Unknown City";
pub const UNKNOWN_STATE: &str = "Unknown State";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_CATEGORIES: &str = "None";
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";
pub const ALL_STATES_LABEL: &str = "All States";

static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// CSS class derived from the first category, e.g. `"Art & Design"` →
/// `category-art-design`.
#[must_use]
pub fn category_class(record: &AttractionRecord) -> String {
    let slug = record
        .categories
        .first()
        .map(|c| NON_SLUG.replace_all(&c.to_lowercase(), "-").into_owned())
        .map(|s| s.trim_matches('-').to_string())
        .filter(|s| !s.is_empty());
    match slug {
        Some(slug) => format!("category-{slug}"),
        None => "category-default".to_string(),
    }
}

/// `"City, State"` with fallbacks for missing parts.
#[must_use]
pub fn location_label(record: &AttractionRecord) -> String {
    let city = if record.city.is_empty() {
        UNKNOWN_CITY
    } else {
        &record.city
    };
    let state = record.state.as_deref().unwrap_or(UNKNOWN_STATE);
    format!("{city}, {state}")
}

#[must_use]
pub fn categories_label(record: &AttractionRecord) -> String {
    if record.categories.is_empty() {
        NO_CATEGORIES.to_string()
    } else {
        record.categories.join(", ")
    }
}

fn description(record: &AttractionRecord) -> &str {
    if record.description.is_empty() {
        NO_DESCRIPTION
    } else {
        &record.description
    }
}

/// Builds the list card for the record at `index` of the visible subset.
#[must_use]
pub fn card(record: &AttractionRecord, index: usize) -> Card {
    let dom_id = format!("attraction-{index}");
    let location = location_label(record);
    let categories = categories_label(record);
    // Categories travel as a JSON array so the page script can filter
    // without re-parsing the label.
    let categories_json =
        serde_json::to_string(&record.categories).unwrap_or_else(|_| "[]".to_string());

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="attraction-card {class}" id="{dom_id}" data-lat="{lat}" data-lng="{lng}" data-key="{key}" data-state="{state}" data-categories="{cats}">"#,
        class = category_class(record),
        lat = record.latitude,
        lng = record.longitude,
        key = escape_html(&record.identity_key()),
        state = escape_html(record.state.as_deref().unwrap_or_default()),
        cats = escape_html(&categories_json),
    );

    let has_image = !record.image_url.is_empty();
    if has_image {
        let _ = write!(
            html,
            r#"<img src="{src}" alt="{alt}" loading="lazy" onerror="this.style.display='none'; this.closest('.attraction-card').querySelector('.no-image-placeholder').style.display='block';">"#,
            src = escape_html(&record.image_url),
            alt = escape_html(record.image_alt()),
        );
    }
    let _ = write!(
        html,
        r#"<div class="no-image-placeholder" style="display: {}; align-items: center; justify-content: center; height: 100px; background: #eee; color: #aaa; font-size: 0.9em;">No image available</div>"#,
        if has_image { "none" } else { "flex" }
    );

    let _ = write!(
        html,
        r#"<div class="card-content"><h3>{name}</h3><p class="location">{location}</p><p class="description">{description}</p><p class="categories">Categories: {categories}</p>"#,
        name = escape_html(&record.name),
        location = escape_html(&location),
        description = escape_html(description(record)),
        categories = escape_html(&categories),
    );
    if !record.website.is_empty() {
        let _ = write!(
            html,
            r#"<div class="website-link"><a href="{}" target="_blank" rel="noopener noreferrer">Visit Website</a></div>"#,
            escape_html(&record.website)
        );
    }
    html.push_str("</div></div>");

    Card {
        index,
        dom_id,
        identity_key: record.identity_key(),
        name: record.name.clone(),
        location,
        categories,
        html,
    }
}

/// Builds the map marker and popup for a record.
#[must_use]
pub fn marker(record: &AttractionRecord) -> Marker {
    let mut popup = format!("<h4>{}</h4>", escape_html(&record.name));
    if !record.image_url.is_empty() {
        let _ = write!(
            popup,
            r#"<img src="{src}" alt="{alt}" style="max-height: 150px; width: 100%; object-fit: cover;" onerror="this.style.display='none'; this.nextElementSibling.style.display='block';"><p style="display: none; font-style: italic; color: #888;">Image not available</p>"#,
            src = escape_html(&record.image_url),
            alt = escape_html(record.image_alt()),
        );
    }
    let _ = write!(popup, "<p>{}</p>", escape_html(description(record)));
    if !record.website.is_empty() {
        let _ = write!(
            popup,
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="popup-website-link">Visit Website</a>"#,
            escape_html(&record.website)
        );
    }

    Marker {
        key: record.identity_key(),
        coordinates: record.coordinates(),
        title: record.name.clone(),
        popup_html: popup,
    }
}

/// Filter control options: the "all" entry followed by `values` in order.
#[must_use]
pub fn filter_options<'a>(
    categories: impl IntoIterator<Item = &'a String>,
    states: impl IntoIterator<Item = &'a String>,
) -> FilterOptions {
    fn with_all<'a>(label: &str, values: impl IntoIterator<Item = &'a String>) -> Vec<FilterOption> {
        std::iter::once(FilterOption {
            value: Selection::All.as_value().to_string(),
            label: label.to_string(),
        })
        .chain(values.into_iter().map(|v| FilterOption {
            value: v.clone(),
            label: v.clone(),
        }))
        .collect()
    }

    FilterOptions {
        categories: with_all(ALL_CATEGORIES_LABEL, categories),
        states: with_all(ALL_STATES_LABEL, states),
    }
}

/// `<option>` elements for one control, marking `selected`.
#[must_use]
pub fn options_html(options: &[FilterOption], selected: &Selection) -> String {
    let mut html = String::new();
    for option in options {
        let marker = if option.value == selected.as_value() {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<option value="{}"{marker}>{}</option>"#,
            escape_html(&option.value),
            escape_html(&option.label)
        );
    }
    html
}

/// Both option lists rendered against `filter`.
#[must_use]
pub fn filter_controls_html(options: &FilterOptions, filter: &FilterState) -> (String, String) {
    (
        options_html(&options.categories, &filter.category),
        options_html(&options.states, &filter.state),
    )
}
