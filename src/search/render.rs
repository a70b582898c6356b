//! Search results rendering
//!
//! Results are turned into a [`ResultsView`] (a plain view model that tests
//! and the CLI can inspect) and from there into HTML. Input order is kept:
//! ranking belongs to the service.

use crate::html::{escape, number};
use crate::models::PhoneResult;

/// Raster image suffixes shown as a thumbnail
pub const RASTER_SUFFIXES: [&str; 3] = [".jpg", ".png", ".webp"];

/// Hosting domain whose URLs are 3D model embeds
pub const MODEL_3D_DOMAIN: &str = "sketchfab.com";

/// Marker text of the empty-results placeholder
pub const NO_RESULTS_TEXT: &str = "No phones found ❌";

/// What goes in a card's image slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    /// Generic "No Image" glyph
    Placeholder,
    /// Thumbnail that hides itself if it fails to load
    Image { url: String },
    /// "3D Model" badge for embed URLs
    Model3d,
}

impl ImageSlot {
    /// Pick the slot for an optional image URL
    ///
    /// URLs that are neither raster images nor 3D embeds fall back to the
    /// generic placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use phonefinder::search::ImageSlot;
    ///
    /// assert_eq!(ImageSlot::classify(None), ImageSlot::Placeholder);
    /// assert_eq!(
    ///     ImageSlot::classify(Some("https://sketchfab.com/models/abc/embed")),
    ///     ImageSlot::Model3d
    /// );
    /// ```
    pub fn classify(image_url: Option<&str>) -> Self {
        match image_url {
            Some(url) if RASTER_SUFFIXES.iter().any(|s| url.ends_with(s)) => Self::Image {
                url: url.to_string(),
            },
            Some(url) if url.contains(MODEL_3D_DOMAIN) => Self::Model3d,
            _ => Self::Placeholder,
        }
    }

    /// HTML for the slot
    pub fn to_html(&self) -> String {
        match self {
            Self::Placeholder => "<div class=\"image-placeholder\">No Image</div>".to_string(),
            Self::Image { url } => format!(
                "<img class=\"phone-image\" src=\"{}\" alt=\"Phone image\" onerror=\"this.style.display='none'\">",
                escape(url)
            ),
            Self::Model3d => "<div class=\"model-placeholder\">3D Model</div>".to_string(),
        }
    }
}

/// One rendered result card
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    /// Position of the result in the batch; the "view details" key
    pub detail_index: usize,
    pub image: ImageSlot,
    pub phone: PhoneResult,
}

impl ResultCard {
    pub fn to_html(&self) -> String {
        let phone = &self.phone;
        format!(
            concat!(
                "<div class=\"phone\">",
                "{image}",
                "<div class=\"phone-info\">",
                "<h3>{name}</h3>",
                "<p><strong>{brand}</strong></p>",
                "<p>💰 Price: ${price}</p>",
                "<p>🔋 Battery: {battery} mAh</p>",
                "<p>📷 Camera: {camera} MP</p>",
                "<p>🧠 RAM: {ram} MB</p>",
                "<p>⭐ Match Score: {score}%</p>",
                "<button class=\"details-btn\" data-index=\"{index}\">📸 View Details</button>",
                "</div></div>"
            ),
            image = self.image.to_html(),
            name = escape(&phone.name),
            brand = escape(&phone.brand),
            price = number(phone.price),
            battery = number(phone.battery),
            camera = number(phone.camera_mp),
            ram = number(phone.ram),
            score = number(phone.match_percentage),
            index = self.detail_index,
        )
    }
}

/// Contents of the results container
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsView {
    /// Nothing rendered yet
    #[default]
    Blank,
    /// The fixed "no results" placeholder
    NoResults,
    Cards(Vec<ResultCard>),
}

impl ResultsView {
    /// Cards in the container (empty for the placeholder states)
    pub fn cards(&self) -> &[ResultCard] {
        match self {
            Self::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::NoResults => format!("<p class=\"no-results\">{}</p>", NO_RESULTS_TEXT),
            Self::Cards(cards) => cards.iter().map(ResultCard::to_html).collect(),
        }
    }
}

/// Owner of the results container
#[derive(Debug, Default)]
pub struct ResultsRenderer {
    view: ResultsView,
    renders: usize,
}

impl ResultsRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the container contents with `results`
    ///
    /// Detail indices are rebuilt on every call, so indices from an earlier
    /// render must not be reused.
    pub fn render(&mut self, results: &[PhoneResult]) -> &ResultsView {
        self.view = if results.is_empty() {
            ResultsView::NoResults
        } else {
            ResultsView::Cards(
                results
                    .iter()
                    .enumerate()
                    .map(|(index, phone)| ResultCard {
                        detail_index: index,
                        image: ImageSlot::classify(phone.image_url.as_deref()),
                        phone: phone.clone(),
                    })
                    .collect(),
            )
        };
        self.renders += 1;
        tracing::debug!(cards = self.view.cards().len(), "Rendered results");
        &self.view
    }

    /// What the container currently shows
    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    /// How many times `render` has run
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{phone, phone_with_image};

    #[test]
    fn test_render_empty_shows_only_placeholder() {
        let mut renderer = ResultsRenderer::new();
        let view = renderer.render(&[]);

        assert_eq!(view, &ResultsView::NoResults);
        assert!(view.cards().is_empty());
        let html = view.to_html();
        assert!(html.contains(NO_RESULTS_TEXT));
        assert!(!html.contains("class=\"phone\""));
    }

    #[test]
    fn test_render_preserves_input_order() {
        let mut renderer = ResultsRenderer::new();
        // Deliberately not sorted by score
        let results = vec![phone("Low", 10.0), phone("High", 99.0), phone("Mid", 50.0)];
        let view = renderer.render(&results);

        let names: Vec<&str> = view.cards().iter().map(|c| c.phone.name.as_str()).collect();
        assert_eq!(names, vec!["Low", "High", "Mid"]);
        let indices: Vec<usize> = view.cards().iter().map(|c| c.detail_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_png_url_renders_image_element() {
        let mut renderer = ResultsRenderer::new();
        let url = "https://cdn.example.com/pixel.png";
        let html = renderer.render(&[phone_with_image("Pixel", Some(url))]).to_html();

        assert!(html.contains(&format!("<img class=\"phone-image\" src=\"{}\"", url)));
        assert!(html.contains("onerror=\"this.style.display='none'\""));
        assert!(!html.contains("No Image"));
    }

    #[test]
    fn test_3d_url_renders_model_placeholder_without_image() {
        let mut renderer = ResultsRenderer::new();
        let url = "https://sketchfab.com/models/1234/embed";
        let html = renderer.render(&[phone_with_image("S24", Some(url))]).to_html();

        assert!(html.contains("3D Model"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_missing_url_renders_generic_placeholder() {
        let mut renderer = ResultsRenderer::new();
        let html = renderer.render(&[phone_with_image("X", None)]).to_html();

        assert!(html.contains("No Image"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_unknown_url_falls_back_to_placeholder() {
        assert_eq!(
            ImageSlot::classify(Some("https://example.com/photo.gif")),
            ImageSlot::Placeholder
        );
    }

    #[test]
    fn test_card_shows_info_fields_escaped() {
        let mut renderer = ResultsRenderer::new();
        let mut p = phone("<Galaxy>", 88.5);
        p.brand = "Sam & Sung".to_string();
        let html = renderer.render(&[p]).to_html();

        assert!(html.contains("<h3>&lt;Galaxy&gt;</h3>"));
        assert!(html.contains("Sam &amp; Sung"));
        assert!(html.contains("⭐ Match Score: 88.5%"));
        assert!(html.contains("data-index=\"0\""));
    }

    #[test]
    fn test_render_count_tracks_calls() {
        let mut renderer = ResultsRenderer::new();
        assert_eq!(renderer.view(), &ResultsView::Blank);
        renderer.render(&[]);
        renderer.render(&[phone("A", 1.0)]);
        assert_eq!(renderer.render_count(), 2);
    }
}
