//! Info popups shown when the user selects an overlay.

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::debug;

use crate::error::AccessMapError;
use crate::model::{Crossing, Institution, Obstacle, StreetSegment};
use crate::surface::{MapSurface, OverlayId, PopupAnchor, PopupId};

const CHECK_MARK: &str = "✅";
const CROSS_MARK: &str = "❌";
const IMAGE_WIDTH: u32 = 200;

/// Content of an info popup.
///
/// Text parts are escaped when rendered to HTML. Only `markup` is inserted as is, since it comes from the
/// institution fixture, which contains prepared markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupContent {
    title: String,
    lines: Vec<String>,
    image: Option<String>,
    markup: Option<String>,
}

impl PopupContent {
    /// Creates a popup with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Adds a text line below the title.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Adds an image below the text.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Adds prepared markup at the end of the popup.
    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = Some(markup.into());
        self
    }

    /// Popup title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text lines below the title.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Image URL.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Renders the popup as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut html = format!("<strong>{}</strong>", encode_text(&self.title));
        for line in &self.lines {
            html.push_str("<br>");
            html.push_str(&encode_text(line));
        }

        if let Some(image) = &self.image {
            html.push_str(&format!(
                "<br><img src=\"{}\" alt=\"{}\" width=\"{IMAGE_WIDTH}\">",
                encode_double_quoted_attribute(image),
                encode_double_quoted_attribute(&self.title),
            ));
        }

        if let Some(markup) = &self.markup {
            html.push_str("<br>");
            html.push_str(markup);
        }

        html
    }
}

fn mark(value: bool) -> &'static str {
    if value {
        CHECK_MARK
    } else {
        CROSS_MARK
    }
}

/// Popup of a street segment.
pub fn street_popup(street: &StreetSegment) -> PopupContent {
    let content = PopupContent::new(street.street_name.as_str())
        .with_line(format!("Ceļa kvalitāte: {}", street.quality.label()))
        .with_line(format!("Ietve: {}", mark(street.sidewalk)))
        .with_line(format!("Segums: {}", mark(street.paved)));

    if street.has_obstacles() {
        let descriptions: Vec<&str> = street
            .obstacles
            .iter()
            .map(|o| o.description.as_str())
            .collect();
        content.with_line(format!("Šķēršļi: {}", descriptions.join(", ")))
    } else {
        content
    }
}

/// Popup of an obstacle marker.
pub fn obstacle_popup(obstacle: &Obstacle) -> PopupContent {
    let content = PopupContent::new(obstacle.description.as_str());
    if obstacle.image.is_empty() {
        content
    } else {
        content.with_image(obstacle.image.as_str())
    }
}

/// Popup of a crossing.
pub fn crossing_popup(crossing: &Crossing) -> PopupContent {
    PopupContent::new(crossing.street_name.as_str())
        .with_line(format!("Zebra: {}", mark(crossing.zebra)))
        .with_line(format!("Uzbrauktuve: {}", mark(crossing.ramp)))
        .with_line(format!("Luksofors: {}", mark(crossing.traffic_light)))
}

/// Popup of an institution marker.
pub fn institution_popup(institution: &Institution) -> PopupContent {
    PopupContent::new(institution.title.as_str()).with_markup(institution.info_content.as_str())
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct OpenPopup {
    popup: PopupId,
    owner: OverlayId,
}

/// Keeps track of the single popup that may be open on the map.
///
/// Opening a popup through the tracker closes the previously opened one, once the new one is shown.
#[derive(Debug, Default)]
pub struct PopupTracker {
    open: Option<OpenPopup>,
}

impl PopupTracker {
    /// Opens a popup for the `owner` overlay and closes the current one.
    ///
    /// If the surface fails to open the new popup, the current one stays open.
    pub fn open(
        &mut self,
        surface: &mut dyn MapSurface,
        owner: OverlayId,
        content: &PopupContent,
        anchor: PopupAnchor,
    ) -> Result<PopupId, AccessMapError> {
        let popup = surface.open_popup(content, anchor)?;
        self.close(surface);

        debug!("Popup {popup:?} opened for overlay {owner:?}");
        self.open = Some(OpenPopup { popup, owner });

        Ok(popup)
    }

    /// Closes the current popup.
    pub fn close(&mut self, surface: &mut dyn MapSurface) {
        if let Some(open) = self.open.take() {
            surface.close_popup(open.popup);
        }
    }

    /// Closes the current popup if it belongs to an overlay matching the predicate.
    pub fn close_if(&mut self, surface: &mut dyn MapSurface, predicate: impl Fn(OverlayId) -> bool) {
        if self.open.is_some_and(|open| predicate(open.owner)) {
            self.close(surface);
        }
    }

    /// Currently open popup.
    pub fn current(&self) -> Option<PopupId> {
        self.open.map(|open| open.popup)
    }

    /// Overlay the currently open popup belongs to.
    pub fn current_owner(&self) -> Option<OverlayId> {
        self.open.map(|open| open.owner)
    }
}
